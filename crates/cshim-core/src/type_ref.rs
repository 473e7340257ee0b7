//! Type references appearing in fields and signatures.
//!
//! A [`TypeRef`] is how the input declaration tree names a type: a
//! primitive, a bound aggregate by qualified name, one of the two
//! dynamically-sized container shapes, or an unsupported template
//! instantiation. The classifier resolves `Named` references against the
//! type table; the synthesizer translates each reference into its boundary
//! form.

use std::fmt;

use bitflags::bitflags;

use crate::QualifiedName;

/// Primitive kinds crossing the boundary unchanged.
///
/// These are the built-in numeric and boolean types, each with a fixed
/// C representation, size, and alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Void,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
}

impl PrimitiveKind {
    /// The C spelling of this primitive in the boundary surface.
    pub const fn c_name(self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int8 => "int8_t",
            PrimitiveKind::Int16 => "int16_t",
            PrimitiveKind::Int32 => "int32_t",
            PrimitiveKind::Int64 => "int64_t",
            PrimitiveKind::Uint8 => "uint8_t",
            PrimitiveKind::Uint16 => "uint16_t",
            PrimitiveKind::Uint32 => "uint32_t",
            PrimitiveKind::Uint64 => "uint64_t",
            PrimitiveKind::Float32 => "float",
            PrimitiveKind::Float64 => "double",
        }
    }

    /// Short tag used in `from_`/`to_` identifier suffixes.
    pub const fn tag(self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Uint8 => "uint8",
            PrimitiveKind::Uint16 => "uint16",
            PrimitiveKind::Uint32 => "uint",
            PrimitiveKind::Uint64 => "uint64",
            PrimitiveKind::Float32 => "float",
            PrimitiveKind::Float64 => "double",
        }
    }

    /// Size in bytes. `Void` has no size; returns 0.
    pub const fn size(self) -> usize {
        match self {
            PrimitiveKind::Void => 0,
            PrimitiveKind::Bool | PrimitiveKind::Int8 | PrimitiveKind::Uint8 => 1,
            PrimitiveKind::Int16 | PrimitiveKind::Uint16 => 2,
            PrimitiveKind::Int32 | PrimitiveKind::Uint32 | PrimitiveKind::Float32 => 4,
            PrimitiveKind::Int64 | PrimitiveKind::Uint64 | PrimitiveKind::Float64 => 8,
        }
    }

    /// Alignment in bytes. Matches size for every sized primitive.
    pub const fn align(self) -> usize {
        match self {
            PrimitiveKind::Void => 1,
            other => other.size(),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.c_name())
    }
}

/// Reference to a type in a field or signature position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A built-in primitive.
    Primitive(PrimitiveKind),
    /// A bound aggregate type, resolved against the type table.
    Named(QualifiedName),
    /// Dynamically-sized array container with the given element type.
    Vector(Box<TypeRef>),
    /// Dynamically-sized text container.
    Text,
    /// A template instantiation the generator cannot represent.
    /// Classifying or translating one is an unsupported-type error.
    Template(String),
}

impl TypeRef {
    /// Shorthand for `TypeRef::Primitive(PrimitiveKind::Void)`.
    pub const fn void() -> Self {
        TypeRef::Primitive(PrimitiveKind::Void)
    }

    /// Shorthand for a named reference.
    pub fn named(name: impl Into<QualifiedName>) -> Self {
        TypeRef::Named(name.into())
    }

    /// Shorthand for a vector of the given element type.
    pub fn vector(elem: TypeRef) -> Self {
        TypeRef::Vector(Box::new(elem))
    }

    /// Whether this reference is a dynamically-sized container.
    pub fn is_container(&self) -> bool {
        matches!(self, TypeRef::Vector(_) | TypeRef::Text)
    }

    /// Whether this is `void`.
    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Primitive(PrimitiveKind::Void))
    }

    /// Identifier tag used in `from_`/`to_` suffixes.
    ///
    /// Primitives use their short tag, named types their flat name, text
    /// `text`, vectors `array_<element-tag>`.
    pub fn suffix_tag(&self) -> String {
        match self {
            TypeRef::Primitive(p) => p.tag().to_string(),
            TypeRef::Named(name) => name.flat(),
            TypeRef::Vector(elem) => format!("array_{}", elem.suffix_tag()),
            TypeRef::Text => "text".to_string(),
            TypeRef::Template(name) => name.clone(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "{p}"),
            TypeRef::Named(name) => write!(f, "{name}"),
            TypeRef::Vector(elem) => write!(f, "vector<{elem}>"),
            TypeRef::Text => write!(f, "text"),
            TypeRef::Template(name) => write!(f, "{name}<...>"),
        }
    }
}

bitflags! {
    /// Qualifiers on a signature parameter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParamFlags: u8 {
        /// The parameter is `const`-qualified.
        const CONST = 0b0001;
        /// The parameter is passed by reference.
        const REFERENCE = 0b0010;
    }
}

impl ParamFlags {
    /// Read-only reference (`const T&`).
    pub const fn const_ref() -> Self {
        Self::CONST.union(Self::REFERENCE)
    }

    /// Mutable reference (`T&`).
    pub const fn mut_ref() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_layout() {
        assert_eq!(PrimitiveKind::Int32.size(), 4);
        assert_eq!(PrimitiveKind::Int32.align(), 4);
        assert_eq!(PrimitiveKind::Float64.size(), 8);
        assert_eq!(PrimitiveKind::Bool.size(), 1);
        assert_eq!(PrimitiveKind::Void.size(), 0);
    }

    #[test]
    fn test_container_detection() {
        assert!(TypeRef::Text.is_container());
        assert!(TypeRef::vector(TypeRef::Primitive(PrimitiveKind::Float64)).is_container());
        assert!(!TypeRef::Primitive(PrimitiveKind::Int32).is_container());
        assert!(!TypeRef::named("game::Vec3").is_container());
    }

    #[test]
    fn test_suffix_tags() {
        assert_eq!(TypeRef::Primitive(PrimitiveKind::Float32).suffix_tag(), "float");
        assert_eq!(TypeRef::named("game::Vec3").suffix_tag(), "game_Vec3");
        assert_eq!(TypeRef::Text.suffix_tag(), "text");
        assert_eq!(
            TypeRef::vector(TypeRef::Primitive(PrimitiveKind::Float64)).suffix_tag(),
            "array_double"
        );
    }

    #[test]
    fn test_param_flags() {
        assert!(ParamFlags::const_ref().contains(ParamFlags::CONST));
        assert!(ParamFlags::const_ref().contains(ParamFlags::REFERENCE));
        assert!(!ParamFlags::mut_ref().contains(ParamFlags::CONST));
    }
}
