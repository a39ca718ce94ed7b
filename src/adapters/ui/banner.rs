//! Start-up banner: figlet "LOG-TIME" in cyan with a grey tagline.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

const TITLE: &str = "LOG-TIME";

fn tagline() -> String {
    format!(
        "v{}  worklogs for your assigned Jira issues",
        env!("CARGO_PKG_VERSION")
    )
}

/// Figlet art, or the bare title if the bundled font fails to load.
fn art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|figure| figure.to_string()))
        .map(|art| art.trim_end().to_string())
        .filter(|art| !art.trim().is_empty())
        .unwrap_or_else(|| TITLE.to_string())
}

pub fn print_welcome() {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(Color::Cyan));
    let _ = out.execute(Print(art().replace('\n', "\r\n")));
    let _ = out.execute(SetForegroundColor(Color::DarkGrey));
    let _ = out.execute(Print(format!("\r\n{}\r\n\r\n", tagline())));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
