//! Core data model for the cshim binding generator.
//!
//! Everything the generator's phases share lives here: the input
//! declaration tree ([`BindingUnit`]), qualified names and hash identity,
//! the three representation kinds, the generated wrapper model, the error
//! hierarchy, and the boundary container runtime
//! ([`ContainerWrapper`] and the legacy [`staging`] fallback).

mod container;
mod decl_hash;
mod declaration;
mod error;
mod kind;
mod operator;
mod qualified_name;
pub mod staging;
mod type_ref;
mod wrapper;

pub use container::{ContainerError, ContainerWrapper, ElementKind};
pub use decl_hash::DeclHash;
pub use declaration::{
    BindingUnit, CtorPolicy, DeclCategory, Declaration, Field, Param, TypeDecl, Visibility,
};
pub use error::{ClassifyError, CshimError, NamingError, SynthesisError};
pub use kind::Kind;
pub use operator::OperatorKind;
pub use qualified_name::QualifiedName;
pub use staging::StagingHandle;
pub use type_ref::{ParamFlags, PrimitiveKind, TypeRef};
pub use wrapper::{BodyKind, BoundaryRepr, CParam, CType, MirrorField, Provenance, WrapperFunction};
