//! Unified error types for cshim.
//!
//! One error enum per generation phase, all convertible into the top-level
//! [`CshimError`] wrapper:
//!
//! ```text
//! CshimError (top-level wrapper)
//! ├── ClassifyError   - Kind assignment over the field-dependency DAG
//! ├── NamingError     - Flat-identifier resolution
//! ├── SynthesisError  - Wrapper emission
//! └── ContainerError  - Container wrapper runtime access
//! ```
//!
//! Severity is part of the taxonomy, not the call site:
//! [`CshimError::is_fatal`] says whether an error invalidates the whole
//! unit (identifier collisions, containment cycles) or only skips the
//! declaration that raised it (unsupported types and signatures). The
//! generator accumulates skippable errors per declaration and reports them
//! as a batch; fatal errors abort the run.

use thiserror::Error;

use crate::{ContainerError, QualifiedName};

/// Errors from type classification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    /// A field's type has no boundary classification (an unsupported
    /// template instantiation, or a name the unit never declares).
    /// The enclosing type is skipped, never defaulted.
    #[error("type {owner}: field '{field}' has unsupported type {ty}")]
    UnsupportedFieldType {
        owner: QualifiedName,
        field: String,
        ty: String,
    },

    /// A field's type was itself skipped, so this type cannot be
    /// classified either.
    #[error("type {owner}: field '{field}' depends on skipped type {ty}")]
    DependsOnSkipped {
        owner: QualifiedName,
        field: String,
        ty: QualifiedName,
    },

    /// Value aggregates cannot contain themselves; a containment cycle is
    /// malformed input, not a recoverable condition.
    #[error("cyclic field containment through {0}")]
    CyclicFieldDependency(QualifiedName),
}

/// Errors from flat-identifier resolution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NamingError {
    /// Two declarations resolved to the same flat identifier. Downstream
    /// output would be ambiguous, so this aborts the unit.
    #[error("flat identifier '{name}' claimed by both {first} and {second}")]
    IdentifierCollision {
        name: String,
        first: QualifiedName,
        second: QualifiedName,
    },
}

/// Errors from wrapper synthesis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    /// A parameter or return type has no representable boundary form.
    #[error("{decl}: no boundary representation for type {ty}")]
    UnsupportedType { decl: QualifiedName, ty: String },

    /// A signature shape the generator explicitly refuses, e.g. a
    /// mutable-reference dynamic-container parameter.
    #[error("{decl}: unsupported signature: {reason}")]
    UnsupportedSignature { decl: QualifiedName, reason: String },
}

/// Top-level error wrapper for all cshim phases.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CshimError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Container(#[from] ContainerError),
}

impl CshimError {
    /// Whether this error invalidates the whole generation unit.
    ///
    /// Identifier collisions and containment cycles corrupt the type table
    /// or the symbol surface; everything else skips one declaration and
    /// lets generation continue.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CshimError::Naming(NamingError::IdentifierCollision { .. })
                | CshimError::Classify(ClassifyError::CyclicFieldDependency(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality_split() {
        let collision = CshimError::from(NamingError::IdentifierCollision {
            name: "T_ctor".into(),
            first: QualifiedName::global("T"),
            second: QualifiedName::global("T"),
        });
        assert!(collision.is_fatal());

        let cycle =
            CshimError::from(ClassifyError::CyclicFieldDependency(QualifiedName::global("A")));
        assert!(cycle.is_fatal());

        let unsupported = CshimError::from(SynthesisError::UnsupportedType {
            decl: QualifiedName::global("T"),
            ty: "map<K,V>".into(),
        });
        assert!(!unsupported.is_fatal());

        let container = CshimError::from(ContainerError::Empty);
        assert!(!container.is_fatal());
    }

    #[test]
    fn test_messages_name_the_declaration() {
        let e = ClassifyError::UnsupportedFieldType {
            owner: QualifiedName::from("game::T"),
            field: "items".into(),
            ty: "map<string,int>".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("game::T"));
        assert!(msg.contains("items"));
    }
}
