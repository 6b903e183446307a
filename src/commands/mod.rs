//! Command implementations

pub mod create;
pub mod demo;
pub mod get;
pub mod session;

pub use create::*;
pub use demo::*;
pub use get::*;
pub use session::*;
