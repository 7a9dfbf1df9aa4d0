//! プレゼンテーション層
//!
//! CLIの引数解釈とユーザー向け出力。

pub mod cli;
