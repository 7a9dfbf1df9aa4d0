//! Common test utilities and helpers
//!
//! Shared across integration tests: the scripted fake provider API and
//! configuration fixtures.

// 各テストバイナリは共通モジュールの一部しか使わない
#![allow(dead_code)]

pub mod fake_api;
pub mod test_fixtures;
