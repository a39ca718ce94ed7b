//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the interactive front end that turns user actions into use-case calls.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Load the table, then dispatch user actions (log time, reload) until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
