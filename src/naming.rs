//! Flat-identifier resolution.
//!
//! Every declaration crossing the boundary gets a single, namespace-free C
//! identifier derived deterministically from its qualified name and
//! category. The naming surface is a contract: `_new`/`_delete` for
//! heap-allocated kinds versus `_ctor`/`_dtor` for in-place kinds,
//! `_copy`/`_assign` for copy operations, the fixed operator suffix table,
//! and `from_`/`with_` disambiguation for constructor overloads under a
//! caller-supplied policy.
//!
//! The resolver keeps a claim table over every identifier it hands out; a
//! second declaration resolving to an already-claimed name is an
//! [`IdentifierCollision`](NamingError::IdentifierCollision), a hard
//! error, never a silent overwrite, because ambiguous output symbols would
//! poison the whole unit.

use rustc_hash::FxHashMap;

use cshim_core::{
    CshimError, CtorPolicy, Kind, NamingError, OperatorKind, Param, QualifiedName, SynthesisError,
};

/// Conventional name of the instance-pointer first parameter on every
/// non-static method and operator wrapper.
pub const SELF_PARAM: &str = "self";

/// Collision-checked flat identifier resolver.
#[derive(Debug, Default)]
pub struct NamingResolver {
    /// Every claimed identifier and the declaration that claimed it.
    claimed: FxHashMap<String, QualifiedName>,
}

impl NamingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `name` for `source`, surfacing a collision with whoever got
    /// there first.
    fn claim(&mut self, name: String, source: &QualifiedName) -> Result<String, NamingError> {
        if let Some(first) = self.claimed.get(&name) {
            return Err(NamingError::IdentifierCollision {
                name,
                first: first.clone(),
                second: source.clone(),
            });
        }
        self.claimed.insert(name.clone(), source.clone());
        Ok(name)
    }

    /// The boundary name of the type itself (handle, mirror struct, or
    /// byte-array typedef).
    pub fn resolve_type(&mut self, name: &QualifiedName) -> Result<String, NamingError> {
        self.claim(name.flat(), name)
    }

    /// Constructor name: `_new` for heap kinds, `_ctor` otherwise, with the
    /// caller-supplied overload policy applied when present.
    ///
    /// `Conversion` policy demands exactly one parameter, the argument
    /// type names the behavior; anything else is an unsupported signature.
    pub fn resolve_constructor(
        &mut self,
        owner: &QualifiedName,
        kind: Kind,
        policy: Option<CtorPolicy>,
        params: &[Param],
    ) -> Result<String, CshimError> {
        let base = owner.flat();
        let name = match policy {
            None => {
                if kind.is_heap() {
                    format!("{base}_new")
                } else {
                    format!("{base}_ctor")
                }
            }
            Some(CtorPolicy::Conversion) => {
                if params.len() != 1 {
                    return Err(SynthesisError::UnsupportedSignature {
                        decl: owner.clone(),
                        reason: format!(
                            "conversion-policy constructor takes {} parameters, expected exactly 1",
                            params.len()
                        ),
                    }
                    .into());
                }
                format!("{base}_from_{}", params[0].ty.suffix_tag())
            }
            Some(CtorPolicy::Configuration) => {
                let mut name = format!("{base}_with");
                for p in params {
                    name.push('_');
                    name.push_str(&p.name);
                }
                name
            }
        };
        Ok(self.claim(name, owner)?)
    }

    /// Destructor name: `_delete` for heap kinds (frees), `_dtor` otherwise
    /// (in-place only).
    pub fn resolve_destructor(
        &mut self,
        owner: &QualifiedName,
        kind: Kind,
    ) -> Result<String, NamingError> {
        let suffix = if kind.is_heap() { "delete" } else { "dtor" };
        self.claim(format!("{}_{suffix}", owner.flat()), owner)
    }

    /// Copy constructor name: `<Base>_copy`.
    pub fn resolve_copy(&mut self, owner: &QualifiedName) -> Result<String, NamingError> {
        self.claim(format!("{}_copy", owner.flat()), owner)
    }

    /// Operator name from the fixed suffix table; `None` when the operator
    /// is dropped from the boundary (move assignment).
    pub fn resolve_operator(
        &mut self,
        owner: &QualifiedName,
        op: &OperatorKind,
    ) -> Result<Option<String>, NamingError> {
        match op.suffix() {
            Some(suffix) => Ok(Some(
                self.claim(format!("{}_{suffix}", owner.flat()), owner)?,
            )),
            None => Ok(None),
        }
    }

    /// Instance or static method name: `<Base>_<method>`.
    pub fn resolve_method(
        &mut self,
        owner: &QualifiedName,
        method: &str,
    ) -> Result<String, NamingError> {
        self.claim(format!("{}_{method}", owner.flat()), &owner.child(method))
    }

    /// Free function name: the flat qualified name itself.
    pub fn resolve_free_function(&mut self, name: &QualifiedName) -> Result<String, NamingError> {
        self.claim(name.flat(), name)
    }

    /// Auxiliary engine helper (container accessors). Same identifier
    /// space, same collision rules.
    pub fn resolve_auxiliary(
        &mut self,
        name: String,
        source: &QualifiedName,
    ) -> Result<String, NamingError> {
        self.claim(name, source)
    }
}
