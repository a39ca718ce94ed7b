pub mod banner;
pub mod progress;
pub mod terminal;
pub mod tui;

pub use terminal::TerminalPresenter;
pub use tui::TuiInputPort;

/// Prints the welcome banner and applies the neon theme for all subsequent inquire prompts.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}
