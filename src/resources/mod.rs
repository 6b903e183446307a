//! Typed resource shapes and the registry that maps kinds to them

pub mod operators;
pub mod registry;
pub mod traits;

pub use registry::{KindInfo, Scheme};
pub use traits::*;
