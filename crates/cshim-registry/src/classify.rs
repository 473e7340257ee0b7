//! Type classification over the field-dependency DAG.
//!
//! Assigns every aggregate in a [`BindingUnit`] one of the three
//! representation kinds. The decision is a pure function of the field set,
//! first match wins:
//!
//! 1. any field already classified `OpaquePointer`, or any field that is a
//!    dynamically-sized container, forces `OpaquePointer`;
//! 2. any hidden (non-public) field forces `OpaqueBytes`;
//! 3. otherwise the type is `ValueType`.
//!
//! A type's kind depends only on the already-resolved kinds of its field
//! types, so classification runs in topological order over the field
//! containment graph. A containment cycle is malformed input and fatal; a
//! field whose type cannot be classified skips the enclosing type (and,
//! transitively, everything containing it), recorded per declaration rather
//! than aborting the pass.
//!
//! For the two in-place kinds the classifier also computes byte size and
//! alignment with C struct layout rules, so the synthesizer can emit
//! caller-allocated storage declarations.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use cshim_core::{
    BindingUnit, ClassifyError, DeclHash, Kind, QualifiedName, TypeDecl, TypeRef,
};

use crate::table::{TypeRecord, TypeTable};

/// Result of the classification pass.
#[derive(Debug, Default)]
pub struct Classification {
    /// Classified records in dependency order.
    pub table: TypeTable,
    /// Types that could not be classified, with the reason each was
    /// skipped. Reported as a batch by the generator.
    pub skipped: Vec<(QualifiedName, ClassifyError)>,
}

impl Classification {
    /// Reason a type was skipped, if it was.
    pub fn skip_reason(&self, name: &QualifiedName) -> Option<&ClassifyError> {
        self.skipped
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e)
    }
}

/// Classify every type in the unit.
///
/// Returns `Err` only for containment cycles, which invalidate the whole
/// unit; unsupported field types are recorded in
/// [`Classification::skipped`] and classification continues.
pub fn classify_unit(unit: &BindingUnit) -> Result<Classification, ClassifyError> {
    let decls: FxHashMap<&QualifiedName, &TypeDecl> =
        unit.types.iter().map(|t| (&t.name, t)).collect();

    let order = dependency_order(unit, &decls)?;

    let mut out = Classification::default();
    for decl in order {
        match classify_one(decl, &out) {
            Ok(kind) => out.table.insert(TypeRecord {
                hash: DeclHash::of_type(&decl.name),
                name: decl.name.clone(),
                fields: decl.fields.clone(),
                members: decl.members.clone(),
                kind,
            }),
            Err(e) => out.skipped.push((decl.name.clone(), e)),
        }
    }
    Ok(out)
}

/// Topologically order the unit's types by field containment.
fn dependency_order<'a>(
    unit: &'a BindingUnit,
    decls: &FxHashMap<&QualifiedName, &'a TypeDecl>,
) -> Result<Vec<&'a TypeDecl>, ClassifyError> {
    let mut graph: DiGraph<&QualifiedName, ()> = DiGraph::new();
    let mut nodes: FxHashMap<&QualifiedName, NodeIndex> = FxHashMap::default();

    for decl in &unit.types {
        let idx = graph.add_node(&decl.name);
        nodes.insert(&decl.name, idx);
    }
    for decl in &unit.types {
        let to = nodes[&decl.name];
        for field in &decl.fields {
            // Only named references to types in this unit create ordering
            // edges; containers and primitives resolve without one.
            if let TypeRef::Named(field_ty) = &field.ty
                && let Some(&from) = nodes.get(field_ty)
            {
                graph.update_edge(from, to, ());
            }
        }
    }

    match toposort(&graph, None) {
        Ok(sorted) => Ok(sorted
            .into_iter()
            .map(|idx| decls[graph[idx]])
            .collect()),
        Err(cycle) => Err(ClassifyError::CyclicFieldDependency(
            graph[cycle.node_id()].clone(),
        )),
    }
}

/// Classify a single type against already-resolved field kinds.
fn classify_one(decl: &TypeDecl, resolved: &Classification) -> Result<Kind, ClassifyError> {
    // Unclassifiable fields skip the type outright; no rule may default
    // over them.
    for field in &decl.fields {
        match &field.ty {
            TypeRef::Template(t) => {
                return Err(ClassifyError::UnsupportedFieldType {
                    owner: decl.name.clone(),
                    field: field.name.clone(),
                    ty: format!("{t}<...>"),
                });
            }
            TypeRef::Primitive(p) if p.size() == 0 => {
                return Err(ClassifyError::UnsupportedFieldType {
                    owner: decl.name.clone(),
                    field: field.name.clone(),
                    ty: p.c_name().to_string(),
                });
            }
            TypeRef::Named(name) if !resolved.table.contains(name) => {
                return Err(if resolved.skip_reason(name).is_some() {
                    ClassifyError::DependsOnSkipped {
                        owner: decl.name.clone(),
                        field: field.name.clone(),
                        ty: name.clone(),
                    }
                } else {
                    ClassifyError::UnsupportedFieldType {
                        owner: decl.name.clone(),
                        field: field.name.clone(),
                        ty: name.to_string(),
                    }
                });
            }
            _ => {}
        }
    }

    // Rule 1: a heap-owning field forces heap allocation of the whole
    // aggregate.
    let heap_owning = decl.fields.iter().any(|f| match &f.ty {
        TypeRef::Vector(_) | TypeRef::Text => true,
        TypeRef::Named(name) => resolved.table.kind_of(name) == Some(Kind::OpaquePointer),
        _ => false,
    });
    if heap_owning {
        return Ok(Kind::OpaquePointer);
    }

    // Rules 2 and 3 both mirror size/alignment.
    let (size, align) = layout(decl, resolved);
    let hidden = decl
        .fields
        .iter()
        .any(|f| !f.visibility.is_visible());
    if hidden {
        Ok(Kind::OpaqueBytes { size, align })
    } else {
        Ok(Kind::ValueType { size, align })
    }
}

/// C struct layout: each field aligned to its own alignment, total size
/// rounded up to the struct alignment. An empty aggregate still occupies
/// one byte.
fn layout(decl: &TypeDecl, resolved: &Classification) -> (usize, usize) {
    let mut offset = 0usize;
    let mut align = 1usize;
    for field in &decl.fields {
        let (fsize, falign) = match &field.ty {
            TypeRef::Primitive(p) => (p.size(), p.align()),
            TypeRef::Named(name) => {
                // Present and in-place: rule 1 already diverted opaque
                // pointers, and unresolved names were rejected above.
                let kind = resolved.table.kind_of(name).unwrap_or(Kind::OpaquePointer);
                (kind.size().unwrap_or(0), kind.align().unwrap_or(1))
            }
            // Unreachable per the checks in classify_one.
            _ => (0, 1),
        };
        offset = align_up(offset, falign) + fsize;
        align = align.max(falign);
    }
    (align_up(offset, align).max(1), align)
}

fn align_up(offset: usize, align: usize) -> usize {
    offset.div_ceil(align) * align
}
