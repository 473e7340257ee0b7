//! Input declaration tree.
//!
//! These records are what the external front end hands the generator: a
//! [`BindingUnit`] of aggregate types and free functions, each carrying the
//! qualified names, fields, visibilities, and signatures the classifier and
//! synthesizer consume. The tree is read-only from the generator's point of
//! view.

use std::fmt;

use crate::{OperatorKind, ParamFlags, QualifiedName, TypeRef};

/// Visibility modifier for aggregate fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Whether a boundary caller may see this member's layout.
    ///
    /// The caller sits outside the class hierarchy, so protected is as
    /// hidden as private.
    pub fn is_visible(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// One field of an aggregate type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
    pub visibility: Visibility,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility,
        }
    }

    /// Public field shorthand.
    pub fn public(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, ty, Visibility::Public)
    }

    /// Private field shorthand.
    pub fn private(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, ty, Visibility::Private)
    }
}

/// One parameter of a bound signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
    pub flags: ParamFlags,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeRef, flags: ParamFlags) -> Self {
        Self {
            name: name.into(),
            ty,
            flags,
        }
    }

    /// By-value parameter shorthand.
    pub fn value(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, ty, ParamFlags::empty())
    }

    /// `const T&` parameter shorthand.
    pub fn const_ref(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, ty, ParamFlags::const_ref())
    }

    /// `T&` parameter shorthand.
    pub fn mut_ref(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, ty, ParamFlags::mut_ref())
    }

    /// Whether this parameter is a mutable reference.
    pub fn is_mut_ref(&self) -> bool {
        self.flags.contains(ParamFlags::REFERENCE) && !self.flags.contains(ParamFlags::CONST)
    }
}

/// Caller-supplied constructor overload naming policy.
///
/// Never inferred: the binding author states whether an overload is
/// conceptually a conversion or a configuration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtorPolicy {
    /// `<Base>_from_<type-tag>`; requires exactly one parameter.
    Conversion,
    /// `<Base>_with_<param-names-joined>`.
    Configuration,
}

/// What a [`Declaration`] declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclCategory {
    Method { is_const: bool, is_static: bool },
    Constructor { policy: Option<CtorPolicy> },
    /// Copy constructor; resolves to `<Base>_copy`.
    CopyConstructor,
    /// Move constructor. Dropped at the boundary, never emitted.
    MoveConstructor,
    Destructor,
    Operator(OperatorKind),
    FreeFunction,
    /// An enumerator constant. Carried through for the renderer; produces
    /// no wrapper function here.
    EnumValue,
}

/// A named entity to be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Qualified name. For members this is `Owner::member`; for free
    /// functions the function's own qualified name.
    pub name: QualifiedName,
    pub category: DeclCategory,
    pub params: Vec<Param>,
    pub return_ty: TypeRef,
}

impl Declaration {
    pub fn new(
        name: impl Into<QualifiedName>,
        category: DeclCategory,
        params: Vec<Param>,
        return_ty: TypeRef,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            params,
            return_ty,
        }
    }

    /// A const instance method.
    pub fn const_method(
        name: impl Into<QualifiedName>,
        params: Vec<Param>,
        return_ty: TypeRef,
    ) -> Self {
        Self::new(
            name,
            DeclCategory::Method {
                is_const: true,
                is_static: false,
            },
            params,
            return_ty,
        )
    }

    /// A mutating instance method.
    pub fn method(name: impl Into<QualifiedName>, params: Vec<Param>, return_ty: TypeRef) -> Self {
        Self::new(
            name,
            DeclCategory::Method {
                is_const: false,
                is_static: false,
            },
            params,
            return_ty,
        )
    }

    /// A constructor overload, optionally carrying a naming policy.
    pub fn constructor(
        owner: impl Into<QualifiedName>,
        policy: Option<CtorPolicy>,
        params: Vec<Param>,
    ) -> Self {
        Self::new(
            owner,
            DeclCategory::Constructor { policy },
            params,
            TypeRef::void(),
        )
    }

    /// The destructor.
    pub fn destructor(owner: impl Into<QualifiedName>) -> Self {
        Self::new(owner, DeclCategory::Destructor, Vec::new(), TypeRef::void())
    }

    /// An operator member.
    pub fn operator(
        owner: impl Into<QualifiedName>,
        op: OperatorKind,
        params: Vec<Param>,
        return_ty: TypeRef,
    ) -> Self {
        Self::new(owner, DeclCategory::Operator(op), params, return_ty)
    }

    /// A free function.
    pub fn free_function(
        name: impl Into<QualifiedName>,
        params: Vec<Param>,
        return_ty: TypeRef,
    ) -> Self {
        Self::new(name, DeclCategory::FreeFunction, params, return_ty)
    }

    /// Whether the wrapper takes an instance pointer as its first
    /// parameter.
    pub fn has_self(&self) -> bool {
        match &self.category {
            DeclCategory::Method { is_static, .. } => !is_static,
            DeclCategory::CopyConstructor
            | DeclCategory::MoveConstructor
            | DeclCategory::Destructor
            | DeclCategory::Operator(_) => true,
            DeclCategory::Constructor { .. }
            | DeclCategory::FreeFunction
            | DeclCategory::EnumValue => false,
        }
    }
}

/// An aggregate type as declared by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: QualifiedName,
    /// Ordered field list; order is layout order for mirrored kinds.
    pub fields: Vec<Field>,
    /// Member declarations: constructors, destructor, methods, operators.
    pub members: Vec<Declaration>,
}

impl TypeDecl {
    pub fn new(name: impl Into<QualifiedName>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
            members: Vec::new(),
        }
    }

    pub fn with_members(mut self, members: Vec<Declaration>) -> Self {
        self.members = members;
        self
    }
}

/// The whole declaration tree for one generation run.
#[derive(Debug, Clone, Default)]
pub struct BindingUnit {
    pub types: Vec<TypeDecl>,
    pub free_functions: Vec<Declaration>,
}

impl BindingUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(&mut self, decl: TypeDecl) -> &mut Self {
        self.types.push(decl);
        self
    }

    pub fn add_free_function(&mut self, decl: Declaration) -> &mut Self {
        self.free_functions.push(decl);
        self
    }
}
