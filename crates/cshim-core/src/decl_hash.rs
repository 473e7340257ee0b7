//! Deterministic hash-based declaration identity.
//!
//! [`DeclHash`] is a 64-bit hash identifying a declaration (type, method,
//! constructor, operator, free function) for provenance links and registry
//! reverse indexes. Hashes are computed from qualified names rather than
//! assigned sequentially, so:
//!
//! - identity is stable across runs and registration order
//! - a wrapper function can carry its source declaration's identity without
//!   holding a reference into the type table
//!
//! Domain-specific mixing constants keep distinct declaration categories
//! sharing a name (a type `T` and a free function `T`) from colliding.

use std::fmt;
use xxhash_rust::xxh64::xxh64;

use crate::QualifiedName;

/// Domain markers mixed into each hash so declaration categories never
/// collide on a shared name.
mod domain {
    /// Separator constant folded between path segments.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;
    /// Bound aggregate types.
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;
    /// Free functions.
    pub const FUNCTION: u64 = 0x5ea77ffbcdf5f302;
    /// Instance methods.
    pub const METHOD: u64 = 0x7d3c8b4a92e15f6d;
    /// Operator members.
    pub const OPERATOR: u64 = 0x3e9f5d2a8c7b1403;
    /// Constructors (all overloads share the domain; the overload index
    /// is mixed in separately).
    pub const CONSTRUCTOR: u64 = 0x9a7f3d5e2b8c4601;
    /// Destructors.
    pub const DESTRUCTOR: u64 = 0x1a095090689d4647;
}

/// 64-bit deterministic declaration identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclHash(pub u64);

impl DeclHash {
    fn of_segments(name: &QualifiedName, domain: u64) -> u64 {
        let mut acc = domain;
        for seg in &name.namespace {
            acc = xxh64(seg.as_bytes(), acc) ^ domain::SEP;
        }
        xxh64(name.name.as_bytes(), acc)
    }

    /// Hash of a bound aggregate type.
    pub fn of_type(name: &QualifiedName) -> Self {
        Self(Self::of_segments(name, domain::TYPE))
    }

    /// Hash of a free function.
    pub fn of_function(name: &QualifiedName) -> Self {
        Self(Self::of_segments(name, domain::FUNCTION))
    }

    /// Hash of an instance method `owner::method`.
    pub fn of_method(owner: &QualifiedName, method: &str) -> Self {
        let seed = Self::of_segments(owner, domain::METHOD) ^ domain::SEP;
        Self(xxh64(method.as_bytes(), seed))
    }

    /// Hash of an operator member.
    pub fn of_operator(owner: &QualifiedName, suffix: &str) -> Self {
        let seed = Self::of_segments(owner, domain::OPERATOR) ^ domain::SEP;
        Self(xxh64(suffix.as_bytes(), seed))
    }

    /// Hash of a constructor overload, disambiguated by position.
    pub fn of_constructor(owner: &QualifiedName, overload: usize) -> Self {
        let seed = Self::of_segments(owner, domain::CONSTRUCTOR);
        Self(xxh64(&(overload as u64).to_le_bytes(), seed))
    }

    /// Hash of the destructor.
    pub fn of_destructor(owner: &QualifiedName) -> Self {
        Self(Self::of_segments(owner, domain::DESTRUCTOR))
    }
}

impl fmt::Display for DeclHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
