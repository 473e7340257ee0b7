//! Representation kinds for bound aggregate types.

use std::fmt;

/// Memory-layout strategy assigned to every bound aggregate.
///
/// A closed set with one synthesis code path per variant. The assignment is
/// a pure function of the field set and never changes after classification:
///
/// - a heap-owning field (a dynamic container, or a field already
///   classified [`Kind::OpaquePointer`]) forces heap allocation of the
///   whole aggregate, because the boundary cannot safely expose the inner
///   pointer's reallocation behavior by value;
/// - a hidden field forces an opaque byte region, so callers may allocate
///   the storage without depending on layout;
/// - an all-public, non-owning aggregate is mirrored field-for-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Never laid out in the boundary surface; only a pointer-sized handle
    /// crosses, and instances are always heap-allocated.
    OpaquePointer,
    /// Layout mirrored field-for-field in the boundary surface.
    ValueType { size: usize, align: usize },
    /// Size and alignment mirrored, fields hidden behind an opaque byte
    /// array; callers control allocation without seeing layout.
    OpaqueBytes { size: usize, align: usize },
}

impl Kind {
    /// Whether instances live behind a heap-allocated handle.
    pub fn is_heap(self) -> bool {
        matches!(self, Kind::OpaquePointer)
    }

    /// Byte size, known only for the in-place kinds.
    pub fn size(self) -> Option<usize> {
        match self {
            Kind::OpaquePointer => None,
            Kind::ValueType { size, .. } | Kind::OpaqueBytes { size, .. } => Some(size),
        }
    }

    /// Alignment, known only for the in-place kinds.
    pub fn align(self) -> Option<usize> {
        match self {
            Kind::OpaquePointer => None,
            Kind::ValueType { align, .. } | Kind::OpaqueBytes { align, .. } => Some(align),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::OpaquePointer => write!(f, "opaque-pointer"),
            Kind::ValueType { size, align } => write!(f, "value-type({size}b/{align})"),
            Kind::OpaqueBytes { size, align } => write!(f, "opaque-bytes({size}b/{align})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_known_only_in_place() {
        assert_eq!(Kind::OpaquePointer.size(), None);
        assert_eq!(Kind::ValueType { size: 12, align: 4 }.size(), Some(12));
        assert_eq!(Kind::OpaqueBytes { size: 4, align: 4 }.align(), Some(4));
        assert!(Kind::OpaquePointer.is_heap());
        assert!(!Kind::ValueType { size: 4, align: 4 }.is_heap());
    }
}
