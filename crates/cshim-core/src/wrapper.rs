//! Generated wrapper artifacts.
//!
//! The generator's output is a model, not source text: an ordered sequence
//! of [`WrapperFunction`] records plus one [`BoundaryRepr`] per bound type.
//! A downstream renderer turns these into whatever output syntax it wants;
//! everything it needs (flat name, C-compatible signature, body kind,
//! provenance) is captured here.

use std::fmt;

use crate::{DeclHash, ElementKind, OperatorKind, PrimitiveKind, QualifiedName};

/// A boundary-compatible type in a wrapper signature.
///
/// Only shapes a C caller can express: primitives, pointers to bound-type
/// representations, pointer+length pairs, and container wrapper storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CType {
    Void,
    Primitive(PrimitiveKind),
    /// Pointer to the boundary representation of a bound type.
    Ptr {
        target: QualifiedName,
        is_const: bool,
    },
    /// A mirrored value-type aggregate passed by value.
    Value(QualifiedName),
    /// Borrowed read-only element buffer; always paired with a [`CType::Len`].
    SlicePtr(ElementKind),
    /// Element count for the preceding [`CType::SlicePtr`].
    Len,
    /// A zero-based element index.
    Index,
    /// Pointer to caller-allocated `ContainerWrapper` storage the wrapper
    /// fills (or reads, for accessors).
    ContainerPtr { is_const: bool },
    /// Out-pointer for a primitive element value.
    OutPrimitive(PrimitiveKind),
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CType::Void => write!(f, "void"),
            CType::Primitive(p) => write!(f, "{}", p.c_name()),
            CType::Ptr { target, is_const } => {
                if *is_const {
                    write!(f, "const {}*", target.flat())
                } else {
                    write!(f, "{}*", target.flat())
                }
            }
            CType::Value(target) => write!(f, "{}", target.flat()),
            CType::SlicePtr(elem) => write!(f, "const {}*", elem.c_name()),
            CType::Len => write!(f, "size_t"),
            CType::Index => write!(f, "size_t"),
            CType::ContainerPtr { is_const } => {
                if *is_const {
                    write!(f, "const cshim_container*")
                } else {
                    write!(f, "cshim_container*")
                }
            }
            CType::OutPrimitive(p) => write!(f, "{}*", p.c_name()),
        }
    }
}

/// One parameter of a wrapper function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CParam {
    pub name: String,
    pub ty: CType,
}

impl CParam {
    pub fn new(name: impl Into<String>, ty: CType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// What the wrapper's body does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyKind {
    /// Construct an instance: on the heap (returning a handle) or in place
    /// into caller storage (returning the storage pointer).
    Construct { heap: bool },
    /// Destroy an instance: free the heap allocation, or run the
    /// destructor in place and leave the storage to the caller.
    Destruct { free: bool },
    /// Copy-construct from an existing instance.
    Copy,
    /// Copy-assign over an existing instance.
    Assign,
    /// Invoke an operator member.
    Operator(OperatorKind),
    /// Getter-shaped method (const, no arguments, non-void return).
    Accessor,
    /// Any other method or free-function call.
    Passthrough,
}

/// Where a wrapper function came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Source declaration's qualified name.
    pub source: QualifiedName,
    /// Source declaration's identity hash.
    pub hash: DeclHash,
}

impl Provenance {
    pub fn new(source: QualifiedName, hash: DeclHash) -> Self {
        Self { source, hash }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.source, self.hash)
    }
}

/// One generated boundary function.
///
/// References, never owns, the type records it mentions; many wrapper
/// functions point at one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperFunction {
    /// Collision-checked flat identifier.
    pub name: String,
    pub params: Vec<CParam>,
    pub ret: CType,
    pub body: BodyKind,
    pub provenance: Provenance,
}

impl WrapperFunction {
    /// Render a C-style prototype, for diagnostics and tests.
    pub fn prototype(&self) -> String {
        use std::fmt::Write;
        let mut out = String::new();
        let _ = write!(out, "{} {}(", self.ret, self.name);
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{} {}", p.ty, p.name);
        }
        out.push(')');
        out
    }
}

impl fmt::Display for WrapperFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prototype())
    }
}

/// One field of a mirrored aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorField {
    pub name: String,
    pub ty: CType,
}

/// The per-type boundary declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryRepr {
    /// Forward-declared opaque handle type; only pointers to it cross.
    OpaqueHandle,
    /// Field-for-field mirrored aggregate.
    Mirror(Vec<MirrorField>),
    /// Fixed-size opaque byte array annotated with the source alignment.
    OpaqueBytes { size: usize, align: usize },
}
