//! アプリケーション層
//!
//! ドメイン層とインフラ層を組み合わせてユースケースを実現する。

pub mod services;
pub mod use_cases;
