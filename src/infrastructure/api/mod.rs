//! Provider API access.
//!
//! The [`ConsoleApi`] trait is the seam between orchestration and the
//! provider; [`ApiClient`] is its HTTP implementation.

pub mod client;
pub mod console_api;

pub use client::{ApiClient, ApiClientConfig};
pub use console_api::ConsoleApi;
