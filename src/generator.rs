//! Generation driver.
//!
//! Runs the two passes in order (classification over the field-dependency
//! DAG, then naming and synthesis per record) and collects everything into
//! a [`GeneratedUnit`]. Skippable problems accumulate per declaration and
//! come back as a batch; identifier collisions and containment cycles
//! return `Err` because they invalidate the whole unit.

use std::fmt;

use cshim_core::{BindingUnit, CshimError, QualifiedName};
use cshim_registry::classify_unit;

use crate::synthesize::{BoundaryType, SynthOutput, synthesize};

/// One declaration the run could not bind, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub decl: QualifiedName,
    pub reason: CshimError,
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped {}: {}", self.decl, self.reason)
    }
}

/// The wrapper model for one generation run, ready for a downstream
/// renderer.
#[derive(Debug, Default)]
pub struct GeneratedUnit {
    /// Per-type boundary declarations, in dependency order.
    pub types: Vec<BoundaryType>,
    /// Wrapper functions, in emission order.
    pub functions: Vec<cshim_core::WrapperFunction>,
    /// Every declaration skipped during the run.
    pub skipped: Vec<Skipped>,
}

impl GeneratedUnit {
    /// Whether the run bound every declaration it was given.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Process exit status for an embedding CLI: a run that skipped
    /// anything must not report success.
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() { 0 } else { 1 }
    }

    /// One line per skipped declaration, for the end-of-run report.
    pub fn skip_report(&self) -> String {
        let mut out = String::new();
        for skip in &self.skipped {
            out.push_str(&skip.to_string());
            out.push('\n');
        }
        out
    }
}

/// Generate the wrapper model for a declaration tree.
pub fn generate(unit: &BindingUnit) -> Result<GeneratedUnit, CshimError> {
    let classification = classify_unit(unit)?;
    let SynthOutput {
        types,
        functions,
        skipped,
    } = synthesize(&classification.table, &unit.free_functions)?;

    let mut all_skipped: Vec<Skipped> = classification
        .skipped
        .into_iter()
        .map(|(decl, reason)| Skipped {
            decl,
            reason: reason.into(),
        })
        .collect();
    all_skipped.extend(skipped.into_iter().map(|(decl, reason)| Skipped { decl, reason }));

    Ok(GeneratedUnit {
        types,
        functions,
        skipped: all_skipped,
    })
}
