//! Shared error and result types used across every layer.

pub mod error;
pub mod result;

pub use error::PawgitError;
pub use result::{PawgitResult, PawgitResultExt};
