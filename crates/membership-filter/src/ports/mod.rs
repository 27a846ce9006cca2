//! Ports Layer
//!
//! - Driving port (inbound): the membership API callers program against
//! - Driven port (outbound): the remote list store the remote backend needs

pub mod inbound;
pub mod outbound;

pub use inbound::MembershipFilter;
pub use outbound::ListStore;
