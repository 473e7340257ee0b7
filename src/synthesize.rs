//! Wrapper synthesis.
//!
//! Consumes the classified type table and emits, per type, its boundary
//! declaration plus the ordered wrapper functions for constructors,
//! destructor, copy operations, operators, and methods, with one code path per
//! representation kind, never dynamic dispatch. Signatures containing a
//! dynamic container are routed through the container transfer engine,
//! which rewrites them to pointer+length inputs or caller-allocated
//! `ContainerWrapper` outputs and contributes the per-element-kind
//! auxiliary accessors at the end of the run.
//!
//! Skippable problems (unrepresentable types, refused signature shapes)
//! are accumulated per declaration; identifier collisions abort the unit.

use cshim_core::{
    BodyKind, BoundaryRepr, CParam, CType, CshimError, DeclCategory, DeclHash, Declaration,
    ElementKind, Kind, MirrorField, PrimitiveKind, Provenance, QualifiedName, SynthesisError,
    TypeRef, WrapperFunction,
};
use cshim_registry::{TypeRecord, TypeTable};

use crate::naming::{NamingResolver, SELF_PARAM};

/// One bound type's boundary declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryType {
    pub name: QualifiedName,
    /// Collision-checked flat type identifier.
    pub flat: String,
    pub kind: Kind,
    pub repr: BoundaryRepr,
}

/// Everything the synthesis pass produced.
#[derive(Debug, Default)]
pub struct SynthOutput {
    pub types: Vec<BoundaryType>,
    pub functions: Vec<WrapperFunction>,
    /// Declarations skipped with the reason each was refused.
    pub skipped: Vec<(QualifiedName, CshimError)>,
}

/// Synthesize wrappers for every record in the table plus the unit's free
/// functions.
///
/// `Err` only for unit-fatal conditions (identifier collisions); all other
/// problems land in [`SynthOutput::skipped`].
pub fn synthesize(
    table: &TypeTable,
    free_functions: &[Declaration],
) -> Result<SynthOutput, CshimError> {
    let mut s = Synthesizer {
        table,
        resolver: NamingResolver::new(),
        out: SynthOutput::default(),
        used_elements: Vec::new(),
    };
    for record in table.iter() {
        s.synthesize_type(record)?;
    }
    for decl in free_functions {
        s.synthesize_free_function(decl)?;
    }
    s.emit_container_support()?;
    Ok(s.out)
}

/// How one source parameter crosses the boundary.
enum Translated {
    /// A single C parameter.
    Single(CType),
    /// A borrowed container: expands to a pointer+length pair.
    Slice(ElementKind),
}

/// How the return value crosses.
enum RetForm {
    Direct(CType),
    /// A produced container: becomes a trailing out-pointer to
    /// caller-allocated `ContainerWrapper` storage.
    ContainerOut(ElementKind),
}

struct Synthesizer<'a> {
    table: &'a TypeTable,
    resolver: NamingResolver,
    out: SynthOutput,
    /// Element kinds that crossed the boundary, in first-use order; each
    /// gets auxiliary accessors emitted once.
    used_elements: Vec<ElementKind>,
}

impl<'a> Synthesizer<'a> {
    fn synthesize_type(&mut self, record: &TypeRecord) -> Result<(), CshimError> {
        let flat = self.resolver.resolve_type(&record.name)?;
        self.out.types.push(BoundaryType {
            name: record.name.clone(),
            flat,
            kind: record.kind,
            repr: self.boundary_repr(record),
        });

        let mut ctor_index = 0usize;
        for member in &record.members {
            let result = self.synthesize_member(record, member, &mut ctor_index);
            if let Err(e) = result {
                if e.is_fatal() {
                    return Err(e);
                }
                self.out.skipped.push((member_name(record, member), e));
            }
        }
        Ok(())
    }

    /// The type's own boundary declaration, per kind.
    fn boundary_repr(&self, record: &TypeRecord) -> BoundaryRepr {
        match record.kind {
            Kind::OpaquePointer => BoundaryRepr::OpaqueHandle,
            Kind::OpaqueBytes { size, align } => BoundaryRepr::OpaqueBytes { size, align },
            Kind::ValueType { .. } => BoundaryRepr::Mirror(
                record
                    .fields
                    .iter()
                    .map(|f| MirrorField {
                        name: f.name.clone(),
                        ty: match &f.ty {
                            TypeRef::Primitive(p) => CType::Primitive(*p),
                            // A ValueType field is either a primitive or an
                            // in-place aggregate, embedded by value.
                            other => CType::Value(match other {
                                TypeRef::Named(n) => n.clone(),
                                _ => QualifiedName::global(other.to_string()),
                            }),
                        },
                    })
                    .collect(),
            ),
        }
    }

    fn synthesize_member(
        &mut self,
        record: &TypeRecord,
        member: &Declaration,
        ctor_index: &mut usize,
    ) -> Result<(), CshimError> {
        let owner = &record.name;
        let kind = record.kind;
        match &member.category {
            DeclCategory::Constructor { policy } => {
                let overload = *ctor_index;
                *ctor_index += 1;
                let name =
                    self.resolver
                        .resolve_constructor(owner, kind, *policy, &member.params)?;
                let (mut params, _ret) = self.translate_signature(owner, member, None)?;
                let self_ptr = CType::Ptr {
                    target: owner.clone(),
                    is_const: false,
                };
                if !kind.is_heap() {
                    // In-place construction into caller-supplied storage;
                    // the same pointer comes back.
                    params.insert(0, CParam::new(SELF_PARAM, self_ptr.clone()));
                }
                self.out.functions.push(WrapperFunction {
                    name,
                    params,
                    ret: self_ptr,
                    body: BodyKind::Construct {
                        heap: kind.is_heap(),
                    },
                    provenance: Provenance::new(
                        owner.clone(),
                        DeclHash::of_constructor(owner, overload),
                    ),
                });
                Ok(())
            }

            DeclCategory::CopyConstructor => {
                let name = self.resolver.resolve_copy(owner)?;
                let const_self = CParam::new(
                    SELF_PARAM,
                    CType::Ptr {
                        target: owner.clone(),
                        is_const: true,
                    },
                );
                let ret = CType::Ptr {
                    target: owner.clone(),
                    is_const: false,
                };
                let params = if kind.is_heap() {
                    // Clone to a fresh heap allocation.
                    vec![const_self]
                } else {
                    // Construct into caller storage from a source instance.
                    vec![CParam::new(SELF_PARAM, ret.clone()), {
                        let mut src = const_self;
                        src.name = "src".to_string();
                        src
                    }]
                };
                self.out.functions.push(WrapperFunction {
                    name,
                    params,
                    ret,
                    body: BodyKind::Copy,
                    provenance: Provenance::new(owner.clone(), DeclHash::of_constructor(owner, usize::MAX)),
                });
                Ok(())
            }

            // The boundary has no move semantics; dropped without report.
            DeclCategory::MoveConstructor => Ok(()),

            DeclCategory::Destructor => {
                let name = self.resolver.resolve_destructor(owner, kind)?;
                self.out.functions.push(WrapperFunction {
                    name,
                    params: vec![CParam::new(
                        SELF_PARAM,
                        CType::Ptr {
                            target: owner.clone(),
                            is_const: false,
                        },
                    )],
                    ret: CType::Void,
                    body: BodyKind::Destruct {
                        free: kind.is_heap(),
                    },
                    provenance: Provenance::new(owner.clone(), DeclHash::of_destructor(owner)),
                });
                Ok(())
            }

            DeclCategory::Operator(op) => {
                let Some(name) = self.resolver.resolve_operator(owner, op)? else {
                    return Ok(()); // dropped (move assignment)
                };
                let self_param = CParam::new(
                    SELF_PARAM,
                    CType::Ptr {
                        target: owner.clone(),
                        is_const: !op.is_compound_assign(),
                    },
                );
                let (params, ret) = self.translate_signature(owner, member, Some(self_param))?;
                let body = match op {
                    cshim_core::OperatorKind::CopyAssign => BodyKind::Assign,
                    other => BodyKind::Operator(other.clone()),
                };
                let suffix = op.suffix().unwrap_or_default();
                self.out.functions.push(WrapperFunction {
                    name,
                    params,
                    ret,
                    body,
                    provenance: Provenance::new(
                        owner.clone(),
                        DeclHash::of_operator(owner, &suffix),
                    ),
                });
                Ok(())
            }

            DeclCategory::Method { is_const, is_static } => {
                let method = member.name.simple_name();
                let name = self.resolver.resolve_method(owner, method)?;
                let self_param = (!*is_static).then(|| {
                    CParam::new(
                        SELF_PARAM,
                        CType::Ptr {
                            target: owner.clone(),
                            is_const: *is_const,
                        },
                    )
                });
                let (params, ret) = self.translate_signature(owner, member, self_param)?;
                let body = if *is_const && member.params.is_empty() && !member.return_ty.is_void() {
                    BodyKind::Accessor
                } else {
                    BodyKind::Passthrough
                };
                self.out.functions.push(WrapperFunction {
                    name,
                    params,
                    ret,
                    body,
                    provenance: Provenance::new(
                        owner.child(method),
                        DeclHash::of_method(owner, method),
                    ),
                });
                Ok(())
            }

            DeclCategory::FreeFunction | DeclCategory::EnumValue => {
                // Neither occurs as a type member in well-formed input.
                Err(SynthesisError::UnsupportedSignature {
                    decl: owner.clone(),
                    reason: "free function or enumerator declared as a type member".to_string(),
                }
                .into())
            }
        }
    }

    fn synthesize_free_function(&mut self, decl: &Declaration) -> Result<(), CshimError> {
        match &decl.category {
            // Enumerators are rendered as constants downstream; no wrapper
            // function exists for them.
            DeclCategory::EnumValue => Ok(()),
            DeclCategory::FreeFunction => {
                let result = self.try_free_function(decl);
                if let Err(e) = result {
                    if e.is_fatal() {
                        return Err(e);
                    }
                    self.out.skipped.push((decl.name.clone(), e));
                }
                Ok(())
            }
            _ => {
                let e = SynthesisError::UnsupportedSignature {
                    decl: decl.name.clone(),
                    reason: "member declaration outside a type".to_string(),
                };
                self.out.skipped.push((decl.name.clone(), e.into()));
                Ok(())
            }
        }
    }

    fn try_free_function(&mut self, decl: &Declaration) -> Result<(), CshimError> {
        let name = self.resolver.resolve_free_function(&decl.name)?;
        let (params, ret) = self.translate_signature(&decl.name, decl, None)?;
        self.out.functions.push(WrapperFunction {
            name,
            params,
            ret,
            body: BodyKind::Passthrough,
            provenance: Provenance::new(decl.name.clone(), DeclHash::of_function(&decl.name)),
        });
        Ok(())
    }

    /// Translate a declaration's parameter list and return type to their
    /// boundary forms, expanding container routing.
    fn translate_signature(
        &mut self,
        decl_name: &QualifiedName,
        decl: &Declaration,
        self_param: Option<CParam>,
    ) -> Result<(Vec<CParam>, CType), CshimError> {
        let mut params = Vec::with_capacity(decl.params.len() + 2);
        if let Some(p) = self_param {
            params.push(p);
        }
        for p in &decl.params {
            match self.translate_param(decl_name, p)? {
                Translated::Single(ty) => params.push(CParam::new(p.name.clone(), ty)),
                Translated::Slice(elem) => {
                    self.note_element(elem);
                    params.push(CParam::new(p.name.clone(), CType::SlicePtr(elem)));
                    params.push(CParam::new(format!("{}_len", p.name), CType::Len));
                }
            }
        }
        let ret = match self.translate_return(decl_name, &decl.return_ty)? {
            RetForm::Direct(ty) => ty,
            RetForm::ContainerOut(elem) => {
                self.note_element(elem);
                params.push(CParam::new("out", CType::ContainerPtr { is_const: false }));
                CType::Void
            }
        };
        Ok((params, ret))
    }

    fn translate_param(
        &mut self,
        decl_name: &QualifiedName,
        p: &cshim_core::Param,
    ) -> Result<Translated, CshimError> {
        use cshim_core::ParamFlags;
        match &p.ty {
            TypeRef::Primitive(prim) => {
                if p.is_mut_ref() {
                    Ok(Translated::Single(CType::OutPrimitive(*prim)))
                } else {
                    // Const references to primitives degrade to copies.
                    Ok(Translated::Single(CType::Primitive(*prim)))
                }
            }
            TypeRef::Named(name) => {
                let Some(kind) = self.table.kind_of(name) else {
                    return Err(SynthesisError::UnsupportedType {
                        decl: decl_name.clone(),
                        ty: name.to_string(),
                    }
                    .into());
                };
                let ty = match kind {
                    // Heap kinds always cross by pointer.
                    Kind::OpaquePointer => CType::Ptr {
                        target: name.clone(),
                        is_const: p.flags.contains(ParamFlags::CONST),
                    },
                    Kind::ValueType { .. } | Kind::OpaqueBytes { .. } => {
                        if p.flags.contains(ParamFlags::REFERENCE) {
                            CType::Ptr {
                                target: name.clone(),
                                is_const: p.flags.contains(ParamFlags::CONST),
                            }
                        } else {
                            CType::Value(name.clone())
                        }
                    }
                };
                Ok(Translated::Single(ty))
            }
            TypeRef::Vector(_) | TypeRef::Text => {
                if p.is_mut_ref() {
                    // No safe ownership story for an in-out caller-managed
                    // buffer; redesign the binding declaration instead.
                    return Err(SynthesisError::UnsupportedSignature {
                        decl: decl_name.clone(),
                        reason: format!(
                            "parameter '{}': mutable reference to dynamic container",
                            p.name
                        ),
                    }
                    .into());
                }
                let elem = self.container_element(decl_name, &p.ty)?;
                Ok(Translated::Slice(elem))
            }
            TypeRef::Template(t) => Err(SynthesisError::UnsupportedType {
                decl: decl_name.clone(),
                ty: format!("{t}<...>"),
            }
            .into()),
        }
    }

    fn translate_return(
        &mut self,
        decl_name: &QualifiedName,
        ret: &TypeRef,
    ) -> Result<RetForm, CshimError> {
        match ret {
            TypeRef::Primitive(p) => Ok(RetForm::Direct(if p.size() == 0 {
                CType::Void
            } else {
                CType::Primitive(*p)
            })),
            TypeRef::Named(name) => {
                let Some(kind) = self.table.kind_of(name) else {
                    return Err(SynthesisError::UnsupportedType {
                        decl: decl_name.clone(),
                        ty: name.to_string(),
                    }
                    .into());
                };
                Ok(RetForm::Direct(match kind {
                    Kind::OpaquePointer => CType::Ptr {
                        target: name.clone(),
                        is_const: false,
                    },
                    Kind::ValueType { .. } | Kind::OpaqueBytes { .. } => CType::Value(name.clone()),
                }))
            }
            TypeRef::Vector(_) | TypeRef::Text => {
                let elem = self.container_element(decl_name, ret)?;
                Ok(RetForm::ContainerOut(elem))
            }
            TypeRef::Template(t) => Err(SynthesisError::UnsupportedType {
                decl: decl_name.clone(),
                ty: format!("{t}<...>"),
            }
            .into()),
        }
    }

    /// Map a container type reference onto the closed element-kind set.
    fn container_element(
        &self,
        decl_name: &QualifiedName,
        ty: &TypeRef,
    ) -> Result<ElementKind, CshimError> {
        let unsupported = |detail: String| -> CshimError {
            SynthesisError::UnsupportedSignature {
                decl: decl_name.clone(),
                reason: detail,
            }
            .into()
        };
        match ty {
            TypeRef::Text => Ok(ElementKind::Text),
            TypeRef::Vector(elem) => match elem.as_ref() {
                TypeRef::Primitive(p) => match p {
                    PrimitiveKind::Void => {
                        Err(unsupported("container of void elements".to_string()))
                    }
                    PrimitiveKind::Bool => Ok(ElementKind::Bool),
                    PrimitiveKind::Int8 => Ok(ElementKind::Int8),
                    PrimitiveKind::Int16 => Ok(ElementKind::Int16),
                    PrimitiveKind::Int32 => Ok(ElementKind::Int32),
                    PrimitiveKind::Int64 => Ok(ElementKind::Int64),
                    PrimitiveKind::Uint8 => Ok(ElementKind::Uint8),
                    PrimitiveKind::Uint16 => Ok(ElementKind::Uint16),
                    PrimitiveKind::Uint32 => Ok(ElementKind::Uint32),
                    PrimitiveKind::Uint64 => Ok(ElementKind::Uint64),
                    PrimitiveKind::Float32 => Ok(ElementKind::Float32),
                    PrimitiveKind::Float64 => Ok(ElementKind::Float64),
                },
                TypeRef::Named(name) => match self.table.kind_of(name) {
                    Some(Kind::ValueType { size, align })
                    | Some(Kind::OpaqueBytes { size, align }) => {
                        Ok(ElementKind::Value { size, align })
                    }
                    Some(Kind::OpaquePointer) => Err(unsupported(format!(
                        "container of heap-managed elements ({name})"
                    ))),
                    None => Err(CshimError::from(SynthesisError::UnsupportedType {
                        decl: decl_name.clone(),
                        ty: name.to_string(),
                    })),
                },
                nested => Err(unsupported(format!("container of {nested} elements"))),
            },
            other => Err(unsupported(format!("{other} is not a container"))),
        }
    }

    /// Remember an element kind for auxiliary accessor emission. Keyed by
    /// tag: all fixed-size value kinds share one accessor family.
    fn note_element(&mut self, elem: ElementKind) {
        if !self.used_elements.iter().any(|e| e.tag() == elem.tag()) {
            self.used_elements.push(elem);
        }
    }

    /// Emit the per-element-kind container accessors, plus one shared
    /// release function, for every element kind that crossed the boundary.
    fn emit_container_support(&mut self) -> Result<(), CshimError> {
        if self.used_elements.is_empty() {
            return Ok(());
        }
        let engine = QualifiedName::from("cshim::container");
        let elems = std::mem::take(&mut self.used_elements);
        for elem in &elems {
            let tag = elem.tag();
            let source = engine.child(tag);
            let const_self = CParam::new(SELF_PARAM, CType::ContainerPtr { is_const: true });

            let size_name = self
                .resolver
                .resolve_auxiliary(format!("container_{tag}_size"), &source)?;
            self.out.functions.push(WrapperFunction {
                name: size_name,
                params: vec![const_self.clone()],
                ret: CType::Len,
                body: BodyKind::Accessor,
                provenance: Provenance::new(source.clone(), DeclHash::of_function(&source)),
            });

            let out_ty = match elem {
                ElementKind::Bool => CType::OutPrimitive(PrimitiveKind::Bool),
                ElementKind::Int8 => CType::OutPrimitive(PrimitiveKind::Int8),
                ElementKind::Int16 => CType::OutPrimitive(PrimitiveKind::Int16),
                ElementKind::Int32 => CType::OutPrimitive(PrimitiveKind::Int32),
                ElementKind::Int64 => CType::OutPrimitive(PrimitiveKind::Int64),
                ElementKind::Uint8 => CType::OutPrimitive(PrimitiveKind::Uint8),
                ElementKind::Uint16 => CType::OutPrimitive(PrimitiveKind::Uint16),
                ElementKind::Uint32 => CType::OutPrimitive(PrimitiveKind::Uint32),
                ElementKind::Uint64 => CType::OutPrimitive(PrimitiveKind::Uint64),
                ElementKind::Float32 => CType::OutPrimitive(PrimitiveKind::Float32),
                ElementKind::Float64 => CType::OutPrimitive(PrimitiveKind::Float64),
                // Value and text elements are copied out byte-wise.
                ElementKind::Value { .. } | ElementKind::Text => {
                    CType::OutPrimitive(PrimitiveKind::Uint8)
                }
            };
            let get_name = self
                .resolver
                .resolve_auxiliary(format!("container_{tag}_get"), &source)?;
            self.out.functions.push(WrapperFunction {
                name: get_name,
                params: vec![
                    const_self,
                    CParam::new("index", CType::Index),
                    CParam::new("out", out_ty),
                ],
                ret: CType::Primitive(PrimitiveKind::Bool),
                body: BodyKind::Accessor,
                provenance: Provenance::new(source.clone(), DeclHash::of_function(&source)),
            });
        }

        let release_src = engine.child("release");
        let release_name = self
            .resolver
            .resolve_auxiliary("container_release".to_string(), &release_src)?;
        self.out.functions.push(WrapperFunction {
            name: release_name,
            params: vec![CParam::new(
                SELF_PARAM,
                CType::ContainerPtr { is_const: false },
            )],
            ret: CType::Void,
            // Runs the held container's destructor in place; the wrapper
            // storage itself stays with the caller.
            body: BodyKind::Destruct { free: false },
            provenance: Provenance::new(release_src.clone(), DeclHash::of_function(&release_src)),
        });
        Ok(())
    }
}

/// Qualified name used when reporting a skipped member.
fn member_name(record: &TypeRecord, member: &Declaration) -> QualifiedName {
    match &member.category {
        DeclCategory::Method { .. } => record.name.child(member.name.simple_name()),
        _ => record.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cshim_core::{BindingUnit, CtorPolicy, Field, OperatorKind, Param, TypeDecl};
    use cshim_registry::classify_unit;

    fn float() -> TypeRef {
        TypeRef::Primitive(PrimitiveKind::Float32)
    }

    fn synth(unit: &BindingUnit) -> SynthOutput {
        let c = classify_unit(unit).expect("classification");
        synthesize(&c.table, &unit.free_functions).expect("synthesis")
    }

    fn find<'a>(out: &'a SynthOutput, name: &str) -> &'a WrapperFunction {
        out.functions
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("missing wrapper {name}"))
    }

    #[test]
    fn test_value_type_mirror() {
        let mut unit = BindingUnit::new();
        unit.add_type(TypeDecl::new(
            "Vec2",
            vec![Field::public("x", float()), Field::public("y", float())],
        ));
        let out = synth(&unit);
        assert_eq!(out.types.len(), 1);
        assert_eq!(out.types[0].flat, "Vec2");
        match &out.types[0].repr {
            BoundaryRepr::Mirror(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].name, "x");
                assert_eq!(fields[0].ty, CType::Primitive(PrimitiveKind::Float32));
            }
            other => panic!("expected mirror, got {other:?}"),
        }
    }

    #[test]
    fn test_in_place_constructor_and_destructor() {
        let mut unit = BindingUnit::new();
        unit.add_type(
            TypeDecl::new(
                "T",
                vec![Field::private("a", TypeRef::Primitive(PrimitiveKind::Int32))],
            )
            .with_members(vec![
                Declaration::constructor(
                    "T",
                    None,
                    vec![Param::value("a", TypeRef::Primitive(PrimitiveKind::Int32))],
                ),
                Declaration::destructor("T"),
            ]),
        );
        let out = synth(&unit);

        let ctor = find(&out, "T_ctor");
        assert_eq!(ctor.prototype(), "T* T_ctor(T* self, int32_t a)");
        assert_eq!(ctor.body, BodyKind::Construct { heap: false });

        let dtor = find(&out, "T_dtor");
        assert_eq!(dtor.prototype(), "void T_dtor(T* self)");
        assert_eq!(dtor.body, BodyKind::Destruct { free: false });
    }

    #[test]
    fn test_heap_constructor_and_destructor() {
        let mut unit = BindingUnit::new();
        unit.add_type(
            TypeDecl::new("T", vec![Field::private("name", TypeRef::Text)]).with_members(vec![
                Declaration::constructor("T", None, vec![]),
                Declaration::destructor("T"),
            ]),
        );
        let out = synth(&unit);
        assert_eq!(out.types[0].repr, BoundaryRepr::OpaqueHandle);

        let ctor = find(&out, "T_new");
        assert_eq!(ctor.prototype(), "T* T_new()");
        assert_eq!(ctor.body, BodyKind::Construct { heap: true });

        let dtor = find(&out, "T_delete");
        assert_eq!(dtor.body, BodyKind::Destruct { free: true });
    }

    #[test]
    fn test_operator_wrappers() {
        let mut unit = BindingUnit::new();
        unit.add_type(
            TypeDecl::new(
                "Vec2",
                vec![Field::public("x", float()), Field::public("y", float())],
            )
            .with_members(vec![
                Declaration::operator(
                    "Vec2",
                    OperatorKind::Add,
                    vec![Param::const_ref("rhs", TypeRef::named("Vec2"))],
                    TypeRef::named("Vec2"),
                ),
                Declaration::operator(
                    "Vec2",
                    OperatorKind::MulAssign,
                    vec![Param::value("factor", float())],
                    TypeRef::void(),
                ),
                Declaration::operator("Vec2", OperatorKind::Neg, vec![], TypeRef::named("Vec2")),
                Declaration::operator(
                    "Vec2",
                    OperatorKind::Convert(float()),
                    vec![],
                    float(),
                ),
                // Move assignment never reaches the boundary.
                Declaration::operator(
                    "Vec2",
                    OperatorKind::MoveAssign,
                    vec![Param::mut_ref("rhs", TypeRef::named("Vec2"))],
                    TypeRef::void(),
                ),
            ]),
        );
        let out = synth(&unit);

        let add = find(&out, "Vec2_add");
        assert_eq!(
            add.prototype(),
            "Vec2 Vec2_add(const Vec2* self, const Vec2* rhs)"
        );

        let mul_assign = find(&out, "Vec2_mul_assign");
        assert_eq!(
            mul_assign.prototype(),
            "void Vec2_mul_assign(Vec2* self, float factor)"
        );

        find(&out, "Vec2_neg");
        let conv = find(&out, "Vec2_to_float");
        assert_eq!(conv.prototype(), "float Vec2_to_float(const Vec2* self)");

        assert!(!out.functions.iter().any(|f| f.name.contains("move")));
        assert!(out.skipped.is_empty());
    }

    #[test]
    fn test_accessor_detection() {
        let mut unit = BindingUnit::new();
        unit.add_type(
            TypeDecl::new("Vec2", vec![Field::public("x", float())]).with_members(vec![
                Declaration::const_method("Vec2::length", vec![], float()),
                Declaration::method(
                    "Vec2::scale",
                    vec![Param::value("by", float())],
                    TypeRef::void(),
                ),
            ]),
        );
        let out = synth(&unit);
        assert_eq!(find(&out, "Vec2_length").body, BodyKind::Accessor);
        assert_eq!(
            find(&out, "Vec2_length").prototype(),
            "float Vec2_length(const Vec2* self)"
        );
        assert_eq!(find(&out, "Vec2_scale").body, BodyKind::Passthrough);
    }

    #[test]
    fn test_container_return_routing() {
        let mut unit = BindingUnit::new();
        unit.add_free_function(Declaration::free_function(
            "sample",
            vec![],
            TypeRef::vector(TypeRef::Primitive(PrimitiveKind::Float64)),
        ));
        let out = synth(&unit);

        let f = find(&out, "sample");
        assert_eq!(f.ret, CType::Void);
        assert_eq!(f.params.len(), 1);
        assert_eq!(f.params[0].ty, CType::ContainerPtr { is_const: false });

        // Auxiliary accessors for the used element kind, plus release.
        find(&out, "container_double_size");
        find(&out, "container_double_get");
        find(&out, "container_release");
    }

    #[test]
    fn test_borrowed_container_param_becomes_ptr_len() {
        let mut unit = BindingUnit::new();
        unit.add_free_function(Declaration::free_function(
            "mean",
            vec![Param::const_ref(
                "values",
                TypeRef::vector(TypeRef::Primitive(PrimitiveKind::Float64)),
            )],
            TypeRef::Primitive(PrimitiveKind::Float64),
        ));
        let out = synth(&unit);
        let f = find(&out, "mean");
        assert_eq!(
            f.prototype(),
            "double mean(const double* values, size_t values_len)"
        );
    }

    #[test]
    fn test_mutable_container_param_refused() {
        let mut unit = BindingUnit::new();
        unit.add_free_function(Declaration::free_function(
            "fill",
            vec![Param::mut_ref(
                "values",
                TypeRef::vector(TypeRef::Primitive(PrimitiveKind::Float64)),
            )],
            TypeRef::void(),
        ));
        let out = synth(&unit);
        assert!(out.functions.iter().all(|f| f.name != "fill"));
        assert_eq!(out.skipped.len(), 1);
        assert!(matches!(
            out.skipped[0].1,
            CshimError::Synthesis(SynthesisError::UnsupportedSignature { .. })
        ));
    }

    #[test]
    fn test_text_param_and_return() {
        let mut unit = BindingUnit::new();
        unit.add_free_function(Declaration::free_function(
            "greet",
            vec![Param::const_ref("name", TypeRef::Text)],
            TypeRef::Text,
        ));
        let out = synth(&unit);
        let f = find(&out, "greet");
        assert_eq!(f.params[0].ty, CType::SlicePtr(ElementKind::Text));
        assert_eq!(f.params[1].ty, CType::Len);
        assert_eq!(f.params[2].ty, CType::ContainerPtr { is_const: false });
        find(&out, "container_text_size");
        find(&out, "container_text_get");
    }

    #[test]
    fn test_ctor_policies() {
        let mut unit = BindingUnit::new();
        unit.add_type(
            TypeDecl::new(
                "T",
                vec![Field::private("a", TypeRef::Primitive(PrimitiveKind::Int32))],
            )
            .with_members(vec![
                Declaration::constructor(
                    "T",
                    Some(CtorPolicy::Conversion),
                    vec![Param::value("v", float())],
                ),
                Declaration::constructor(
                    "T",
                    Some(CtorPolicy::Configuration),
                    vec![
                        Param::value("rows", TypeRef::Primitive(PrimitiveKind::Int32)),
                        Param::value("cols", TypeRef::Primitive(PrimitiveKind::Int32)),
                    ],
                ),
            ]),
        );
        let out = synth(&unit);
        find(&out, "T_from_float");
        find(&out, "T_with_rows_cols");
    }

    #[test]
    fn test_copy_wrappers() {
        let mut unit = BindingUnit::new();
        unit.add_type(
            TypeDecl::new("Buf", vec![Field::private("data", TypeRef::Text)]).with_members(vec![
                Declaration::new(
                    "Buf",
                    DeclCategory::CopyConstructor,
                    vec![],
                    TypeRef::void(),
                ),
                Declaration::operator(
                    "Buf",
                    OperatorKind::CopyAssign,
                    vec![Param::const_ref("src", TypeRef::named("Buf"))],
                    TypeRef::void(),
                ),
            ]),
        );
        let out = synth(&unit);
        let copy = find(&out, "Buf_copy");
        assert_eq!(copy.prototype(), "Buf* Buf_copy(const Buf* self)");
        assert_eq!(copy.body, BodyKind::Copy);

        let assign = find(&out, "Buf_assign");
        assert_eq!(assign.body, BodyKind::Assign);
        assert_eq!(
            assign.prototype(),
            "void Buf_assign(Buf* self, const Buf* src)"
        );
    }

    #[test]
    fn test_unsupported_param_type_skips_method() {
        let mut unit = BindingUnit::new();
        unit.add_type(
            TypeDecl::new("T", vec![Field::public("x", float())]).with_members(vec![
                Declaration::method(
                    "T::merge",
                    vec![Param::value("other", TypeRef::Template("map".into()))],
                    TypeRef::void(),
                ),
                Declaration::const_method("T::x", vec![], float()),
            ]),
        );
        let out = synth(&unit);
        // The bad method is skipped with a report; the good one survives.
        assert_eq!(out.skipped.len(), 1);
        assert_eq!(out.skipped[0].0.to_string(), "T::merge");
        find(&out, "T_x");
    }

    #[test]
    fn test_collision_aborts() {
        let mut unit = BindingUnit::new();
        unit.add_type(TypeDecl::new("T", vec![Field::public("x", float())]).with_members(vec![
            Declaration::const_method("T::go", vec![], float()),
        ]));
        unit.add_free_function(Declaration::free_function("T_go", vec![], TypeRef::void()));
        let c = classify_unit(&unit).unwrap();
        let err = synthesize(&c.table, &unit.free_functions).unwrap_err();
        assert!(err.is_fatal());
    }
}
