//! Integration tests for cshim using the generator as the entry point.
//!
//! These tests validate the full pipeline (classification + naming +
//! synthesis) against complete declaration trees, plus the container
//! transfer runtime the generated wrappers rely on.

use cshim::{
    BindingUnit, BodyKind, BoundaryRepr, CType, ContainerError, ContainerWrapper, CtorPolicy,
    Declaration, Field, Kind, Param, PrimitiveKind, TypeDecl, TypeRef, generate,
};

fn float() -> TypeRef {
    TypeRef::Primitive(PrimitiveKind::Float32)
}

fn int() -> TypeRef {
    TypeRef::Primitive(PrimitiveKind::Int32)
}

fn find<'a>(unit: &'a cshim::GeneratedUnit, name: &str) -> &'a cshim::WrapperFunction {
    unit.functions
        .iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("missing wrapper {name}"))
}

// =============================================================================
// End-to-end: representation kinds drive the wrapper surface
// =============================================================================

#[test]
fn test_private_int_type_is_opaque_bytes_with_in_place_lifecycle() {
    let mut unit = BindingUnit::new();
    unit.add_type(
        TypeDecl::new("T", vec![Field::private("a", int())]).with_members(vec![
            Declaration::constructor("T", None, vec![Param::value("a", int())]),
            Declaration::destructor("T"),
        ]),
    );
    let generated = generate(&unit).unwrap();
    assert!(generated.is_clean());

    assert_eq!(generated.types[0].kind, Kind::OpaqueBytes { size: 4, align: 4 });
    assert_eq!(
        generated.types[0].repr,
        BoundaryRepr::OpaqueBytes { size: 4, align: 4 }
    );

    // Caller supplies storage; the constructor returns the same pointer.
    let ctor = find(&generated, "T_ctor");
    assert_eq!(ctor.prototype(), "T* T_ctor(T* self, int32_t a)");
    assert_eq!(ctor.body, BodyKind::Construct { heap: false });

    // Destructor runs in place and frees nothing.
    let dtor = find(&generated, "T_dtor");
    assert_eq!(dtor.prototype(), "void T_dtor(T* self)");
    assert_eq!(dtor.body, BodyKind::Destruct { free: false });
}

#[test]
fn test_string_owning_type_is_opaque_pointer_with_heap_lifecycle() {
    let mut unit = BindingUnit::new();
    unit.add_type(
        TypeDecl::new("T", vec![Field::private("name", TypeRef::Text)]).with_members(vec![
            Declaration::constructor("T", None, vec![]),
            Declaration::destructor("T"),
        ]),
    );
    let generated = generate(&unit).unwrap();
    assert!(generated.is_clean());

    assert_eq!(generated.types[0].kind, Kind::OpaquePointer);
    assert_eq!(generated.types[0].repr, BoundaryRepr::OpaqueHandle);

    let ctor = find(&generated, "T_new");
    assert_eq!(ctor.prototype(), "T* T_new()");
    assert_eq!(ctor.body, BodyKind::Construct { heap: true });

    let dtor = find(&generated, "T_delete");
    assert_eq!(dtor.body, BodyKind::Destruct { free: true });
}

#[test]
fn test_all_public_type_is_mirrored_value_type() {
    let mut unit = BindingUnit::new();
    unit.add_type(TypeDecl::new(
        "gfx::Vec3",
        vec![
            Field::public("x", float()),
            Field::public("y", float()),
            Field::public("z", float()),
        ],
    ));
    let generated = generate(&unit).unwrap();

    let ty = &generated.types[0];
    assert_eq!(ty.flat, "gfx_Vec3");
    assert_eq!(ty.kind, Kind::ValueType { size: 12, align: 4 });
    match &ty.repr {
        BoundaryRepr::Mirror(fields) => {
            let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, vec!["x", "y", "z"]);
        }
        other => panic!("expected mirror, got {other:?}"),
    }
}

#[test]
fn test_classification_is_deterministic_across_runs() {
    let mut unit = BindingUnit::new();
    unit.add_type(TypeDecl::new("Inner", vec![Field::public("text", TypeRef::Text)]));
    unit.add_type(TypeDecl::new(
        "Outer",
        vec![Field::public("inner", TypeRef::named("Inner"))],
    ));
    unit.add_type(TypeDecl::new("Plain", vec![Field::public("v", int())]));

    let first = generate(&unit).unwrap();
    let second = generate(&unit).unwrap();
    let kinds = |g: &cshim::GeneratedUnit| -> Vec<(String, Kind)> {
        g.types.iter().map(|t| (t.flat.clone(), t.kind)).collect()
    };
    assert_eq!(kinds(&first), kinds(&second));

    // Heap ownership propagates through the field DAG.
    let outer = first.types.iter().find(|t| t.flat == "Outer").unwrap();
    assert_eq!(outer.kind, Kind::OpaquePointer);
}

// =============================================================================
// End-to-end: constructor overload policies
// =============================================================================

#[test]
fn test_ctor_overload_policies() {
    let mut unit = BindingUnit::new();
    unit.add_type(
        TypeDecl::new("T", vec![Field::private("a", int())]).with_members(vec![
            Declaration::constructor(
                "T",
                Some(CtorPolicy::Conversion),
                vec![Param::value("v", float())],
            ),
            Declaration::constructor(
                "T",
                Some(CtorPolicy::Configuration),
                vec![Param::value("width", int()), Param::value("height", int())],
            ),
        ]),
    );
    let generated = generate(&unit).unwrap();
    assert!(generated.is_clean());
    find(&generated, "T_from_float");
    find(&generated, "T_with_width_height");
}

#[test]
fn test_duplicate_declarations_collide_fatally() {
    let mut unit = BindingUnit::new();
    unit.add_type(TypeDecl::new("T", vec![Field::public("x", float())]).with_members(vec![
        Declaration::const_method("T::value", vec![], float()),
        Declaration::const_method("T::value", vec![], float()),
    ]));
    let err = generate(&unit).unwrap_err();
    assert!(err.is_fatal());
}

// =============================================================================
// End-to-end: container transfer
// =============================================================================

#[test]
fn test_returned_array_becomes_container_out_param() {
    let mut unit = BindingUnit::new();
    unit.add_free_function(Declaration::free_function(
        "sample",
        vec![],
        TypeRef::vector(TypeRef::Primitive(PrimitiveKind::Float64)),
    ));
    let generated = generate(&unit).unwrap();

    let f = find(&generated, "sample");
    assert_eq!(f.ret, CType::Void);
    assert_eq!(f.params.last().unwrap().ty, CType::ContainerPtr { is_const: false });

    // Element-kind accessors come along exactly once.
    find(&generated, "container_double_size");
    find(&generated, "container_double_get");
    find(&generated, "container_release");
}

#[test]
fn test_container_round_trip_at_runtime() {
    // What the generated `sample` wrapper does: adopt the produced
    // container into caller storage, then the caller reads it out.
    let mut w = ContainerWrapper::adopt_f64(vec![1.0, 2.0, 3.0]);
    assert_eq!(w.len(), Ok(3));
    assert_eq!(w.get_f64(0), Ok(1.0));
    assert_eq!(w.get_f64(1), Ok(2.0));
    assert_eq!(w.get_f64(2), Ok(3.0));
    assert_eq!(
        w.get_f64(3),
        Err(ContainerError::OutOfBounds { index: 3, len: 3 })
    );

    // Release ends the container's lifetime in place; further use is a
    // reported usage error, exactly once per construction.
    assert_eq!(w.release(), Ok(()));
    assert_eq!(w.len(), Err(ContainerError::Empty));
    assert_eq!(w.get_f64(0), Err(ContainerError::Empty));
    assert_eq!(w.release(), Err(ContainerError::Empty));
}

#[test]
fn test_borrowed_container_input_copies() {
    let mut unit = BindingUnit::new();
    unit.add_free_function(Declaration::free_function(
        "mean",
        vec![Param::const_ref(
            "values",
            TypeRef::vector(TypeRef::Primitive(PrimitiveKind::Float64)),
        )],
        TypeRef::Primitive(PrimitiveKind::Float64),
    ));
    let generated = generate(&unit).unwrap();
    assert_eq!(
        find(&generated, "mean").prototype(),
        "double mean(const double* values, size_t values_len)"
    );

    // The runtime path for that signature: a temporary owned container
    // built from the caller's raw view.
    let borrowed = [0.5f64, 1.5];
    let temp = ContainerWrapper::copy_from_f64(&borrowed);
    assert_eq!(temp.len(), Ok(2));
    assert_eq!(temp.get_f64(1), Ok(1.5));
}

#[test]
fn test_mutable_container_param_is_reported_not_wrapped() {
    let mut unit = BindingUnit::new();
    unit.add_free_function(Declaration::free_function(
        "fill",
        vec![Param::mut_ref(
            "values",
            TypeRef::vector(TypeRef::Primitive(PrimitiveKind::Float64)),
        )],
        TypeRef::void(),
    ));
    let generated = generate(&unit).unwrap();
    assert!(generated.functions.iter().all(|f| f.name != "fill"));
    assert_eq!(generated.skipped.len(), 1);
    assert_eq!(generated.exit_code(), 1);
    assert!(generated.skip_report().contains("mutable reference"));
}

// =============================================================================
// Error reporting
// =============================================================================

#[test]
fn test_unsupported_types_are_batched_not_fatal() {
    let mut unit = BindingUnit::new();
    unit.add_type(TypeDecl::new(
        "Bad",
        vec![Field::public("m", TypeRef::Template("map".into()))],
    ));
    unit.add_type(TypeDecl::new(
        "AlsoBad",
        vec![Field::public("b", TypeRef::named("Bad"))],
    ));
    unit.add_type(TypeDecl::new("Good", vec![Field::public("x", float())]));

    let generated = generate(&unit).unwrap();
    // Both bad types reported, the good one still bound.
    assert_eq!(generated.skipped.len(), 2);
    assert_eq!(generated.types.len(), 1);
    assert_eq!(generated.types[0].flat, "Good");
    assert_eq!(generated.exit_code(), 1);

    let report = generated.skip_report();
    assert!(report.contains("Bad"));
    assert!(report.contains("AlsoBad"));
}

#[test]
fn test_cyclic_containment_fails_the_unit() {
    let mut unit = BindingUnit::new();
    unit.add_type(TypeDecl::new("A", vec![Field::public("b", TypeRef::named("B"))]));
    unit.add_type(TypeDecl::new("B", vec![Field::public("a", TypeRef::named("A"))]));
    let err = generate(&unit).unwrap_err();
    assert!(err.is_fatal());
}

// =============================================================================
// Provenance
// =============================================================================

#[test]
fn test_wrappers_link_back_to_their_declarations() {
    let mut unit = BindingUnit::new();
    unit.add_type(
        TypeDecl::new("gfx::Vec2", vec![Field::public("x", float())]).with_members(vec![
            Declaration::const_method("Vec2::x", vec![], float()),
        ]),
    );
    let generated = generate(&unit).unwrap();
    let getter = find(&generated, "gfx_Vec2_x");
    assert_eq!(getter.provenance.source.to_string(), "gfx::Vec2::x");
    assert_eq!(getter.body, BodyKind::Accessor);
}
