//! TypeTable - kind-tagged type storage.
//!
//! The classifier's output: one [`TypeRecord`] per classifiable aggregate,
//! stored by `QualifiedName` as primary key with a hash reverse index, in
//! the dependency order classification ran in. The synthesizer walks the
//! table in that order so every record it reaches only references
//! already-emitted boundary declarations.
//!
//! The table is populated single-threaded during the classification pass
//! and read-only afterwards; see the concurrency notes in the crate docs.

use rustc_hash::FxHashMap;

use cshim_core::{DeclHash, Declaration, Field, Kind, QualifiedName};

/// One classified aggregate type.
///
/// `kind` is assigned exactly once, from the field set alone, and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRecord {
    pub name: QualifiedName,
    pub hash: DeclHash,
    pub fields: Vec<Field>,
    /// Member declarations carried through for synthesis.
    pub members: Vec<Declaration>,
    pub kind: Kind,
}

/// Kind-tagged type table.
#[derive(Debug, Default)]
pub struct TypeTable {
    /// Records by qualified name (primary storage).
    records: FxHashMap<QualifiedName, TypeRecord>,
    /// Reverse index: hash -> name.
    hash_to_name: FxHashMap<DeclHash, QualifiedName>,
    /// Insertion order = dependency (classification) order.
    order: Vec<QualifiedName>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a classified record. Insertion order is preserved as the
    /// synthesis order.
    pub fn insert(&mut self, record: TypeRecord) {
        self.hash_to_name.insert(record.hash, record.name.clone());
        self.order.push(record.name.clone());
        self.records.insert(record.name.clone(), record);
    }

    pub fn get(&self, name: &QualifiedName) -> Option<&TypeRecord> {
        self.records.get(name)
    }

    pub fn get_by_hash(&self, hash: DeclHash) -> Option<&TypeRecord> {
        self.hash_to_name.get(&hash).and_then(|n| self.records.get(n))
    }

    /// The assigned kind of a type, if it was classified.
    pub fn kind_of(&self, name: &QualifiedName) -> Option<Kind> {
        self.records.get(name).map(|r| r.kind)
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in dependency order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeRecord> {
        self.order.iter().filter_map(|n| self.records.get(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, kind: Kind) -> TypeRecord {
        let qn = QualifiedName::from(name);
        TypeRecord {
            hash: DeclHash::of_type(&qn),
            name: qn,
            fields: Vec::new(),
            members: Vec::new(),
            kind,
        }
    }

    #[test]
    fn test_lookup_by_name_and_hash() {
        let mut table = TypeTable::new();
        table.insert(record("game::Vec3", Kind::ValueType { size: 12, align: 4 }));

        let name = QualifiedName::from("game::Vec3");
        assert!(table.contains(&name));
        assert_eq!(
            table.kind_of(&name),
            Some(Kind::ValueType { size: 12, align: 4 })
        );
        let by_hash = table.get_by_hash(DeclHash::of_type(&name)).unwrap();
        assert_eq!(by_hash.name, name);
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let mut table = TypeTable::new();
        table.insert(record("B", Kind::OpaquePointer));
        table.insert(record("A", Kind::OpaquePointer));
        let names: Vec<_> = table.iter().map(|r| r.name.to_string()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
