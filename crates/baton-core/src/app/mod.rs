//! App - アプリケーション層
//!
//! ports と lifecycle を組み合わせて Subject を組み立てます。

pub mod builder;

pub use self::builder::{BuildError, SubjectBuilder};
