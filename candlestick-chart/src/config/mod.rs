//! Configuration module
//!
//! Host-supplied webapp configuration, the descriptor it is checked
//! against, and the options that shape row building and rendering.

pub mod descriptor;
pub mod options;
pub mod policy;
pub mod webapp;

pub use descriptor::*;
pub use options::*;
pub use policy::*;
pub use webapp::*;
