//! cshim - a C-ABI binding generator for object-oriented native libraries.
//!
//! Given a declaration tree (types with fields, visibilities, constructors,
//! operators, and methods, plus free functions), cshim produces a wrapper
//! *model*: a kind-tagged boundary declaration per type and an ordered
//! stream of C-compatible wrapper function records, ready for any renderer
//! to turn into source text.
//!
//! # Pipeline
//!
//! 1. **Classification** ([`cshim_registry`]) walks the field containment
//!    DAG and assigns every aggregate one of three representation kinds:
//!    heap-allocated opaque handle, mirrored value struct, or opaque byte
//!    region.
//! 2. **Naming** ([`naming`]) derives a collision-checked flat identifier
//!    for every declaration.
//! 3. **Synthesis** ([`synthesize`]) emits the wrapper functions, routing
//!    dynamic-container signatures through the transfer engine
//!    ([`cshim_core::ContainerWrapper`]).
//!
//! The [`generate`] entry point runs all three and batches per-declaration
//! diagnostics; see [`GeneratedUnit`].
//!
//! # Example
//!
//! ```
//! use cshim::{generate, BindingUnit, Field, PrimitiveKind, TypeDecl, TypeRef};
//!
//! let mut unit = BindingUnit::new();
//! unit.add_type(TypeDecl::new(
//!     "Vec2",
//!     vec![
//!         Field::public("x", TypeRef::Primitive(PrimitiveKind::Float32)),
//!         Field::public("y", TypeRef::Primitive(PrimitiveKind::Float32)),
//!     ],
//! ));
//!
//! let generated = generate(&unit).unwrap();
//! assert!(generated.is_clean());
//! assert_eq!(generated.types[0].flat, "Vec2");
//! ```

pub mod generator;
pub mod naming;
pub mod synthesize;

pub use generator::{GeneratedUnit, Skipped, generate};
pub use naming::{NamingResolver, SELF_PARAM};
pub use synthesize::{BoundaryType, SynthOutput, synthesize};

// Re-export the shared model so downstream users need only this crate.
pub use cshim_core::{
    BindingUnit, BodyKind, BoundaryRepr, CParam, CType, ClassifyError, ContainerError,
    ContainerWrapper, CshimError, CtorPolicy, DeclCategory, DeclHash, Declaration, ElementKind,
    Field, Kind, MirrorField, NamingError, OperatorKind, Param, ParamFlags, PrimitiveKind,
    Provenance, QualifiedName, StagingHandle, SynthesisError, TypeDecl, TypeRef, Visibility,
    WrapperFunction, staging,
};
pub use cshim_registry::{Classification, TypeRecord, TypeTable, classify_unit};
