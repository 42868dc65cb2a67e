//! Domain identifiers.
//!
//! - `SubjectId`: ULID ベースの ID（Phantom type パターン）
//! - `ParticipantId`: 呼び出し側が与えるラベル（"A", "B", ...）
//!
//! Subject はログと status view で識別できればよいので、
//! 生成順にソートできる ULID を使います。
//! 参加者は呼び出し側の語彙なので、文字列の newtype にとどめます。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"subject-"）を提供します。
pub trait IdMarker: 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// `T` は PhantomData のマーカーで、実行時のメモリは消費しません。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// Subject のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubjectMarker {}

impl IdMarker for SubjectMarker {
    fn prefix() -> &'static str {
        "subject-"
    }
}

/// Identifier of a Subject (one lifecycle run).
pub type SubjectId = Id<SubjectMarker>;

/// Identifier of a participant in a Subject's ordered sequence.
///
/// Equality and ordering are those of the underlying label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for ParticipantId {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
