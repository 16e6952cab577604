//! Command implementations for OxiArc CLI.

pub mod inflate64;
pub mod methods;

pub use inflate64::cmd_inflate64;
pub use methods::cmd_methods;
