//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/adapter into the application
//! - Outbound: Called by application into infrastructure (tracker, presenter)

pub mod inbound;
pub mod outbound;
pub mod presenter;

pub use inbound::InputPort;
pub use outbound::TrackerPort;
pub use presenter::PresenterPort;
