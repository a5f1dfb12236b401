//! Cross-frame messaging with the host
//!
//! The renderer asks its parent frame for configuration once, then handles
//! whatever configuration messages arrive.

pub mod channel;
pub mod inbound;

pub use channel::*;
pub use inbound::*;
