//! ドメイン層
//!
//! 外部サービスやフレームワークに依存しない、このツールの核となる型と規則。

pub mod entities;
pub mod value_objects;
