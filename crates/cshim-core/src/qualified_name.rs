use std::fmt;

/// Qualified name of a bound declaration.
///
/// Primary key for the type table and the input to flat-identifier
/// resolution. The source library's scoping is preserved as an ordered
/// segment path; the boundary surface sees only the `_`-joined [`flat`]
/// form.
///
/// [`flat`]: QualifiedName::flat
///
/// # Examples
///
/// ```
/// use cshim_core::QualifiedName;
///
/// // Global namespace
/// let vec3 = QualifiedName::global("Vec3");
/// assert_eq!(vec3.to_string(), "Vec3");
///
/// // With namespace
/// let entity = QualifiedName::new("Entity", vec!["game".into(), "core".into()]);
/// assert_eq!(entity.to_string(), "game::core::Entity");
/// assert_eq!(entity.flat(), "game_core_Entity");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// Simple name (e.g., "Vec3", "length")
    pub name: String,
    /// Namespace path (e.g., ["game", "core"])
    /// Empty for global namespace
    pub namespace: Vec<String>,
}

impl QualifiedName {
    /// Create a new qualified name with namespace.
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Create a qualified name in the global namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Create from a qualified string (e.g., "game::Vec3").
    ///
    /// Splits on "::" - the last segment is the name, rest is namespace.
    /// Leading "::" (absolute path) is normalized: "::game::Vec3" == "game::Vec3".
    pub fn from_qualified_string(s: &str) -> Self {
        let parts: Vec<&str> = s.split("::").filter(|p| !p.is_empty()).collect();
        if parts.is_empty() {
            Self::global("")
        } else if parts.len() == 1 {
            Self::global(parts[0])
        } else {
            let name = parts.last().unwrap().to_string();
            let namespace = parts[..parts.len() - 1]
                .iter()
                .map(|s| s.to_string())
                .collect();
            Self { name, namespace }
        }
    }

    /// Check if this is in the global namespace.
    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Get the namespace path.
    pub fn namespace_path(&self) -> &[String] {
        &self.namespace
    }

    /// The flat, namespace-free boundary identifier base.
    ///
    /// Every namespace segment is joined with `_`, giving a collision-safe
    /// C identifier prefix: `game::core::Entity` -> `game_core_Entity`.
    /// All emitted wrapper names start from this base.
    pub fn flat(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            let mut out = self.namespace.join("_");
            out.push('_');
            out.push_str(&self.name);
            out
        }
    }

    /// Create a child name within this scope.
    ///
    /// Example: `game::core` + `Entity` = `game::core::Entity`
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut child_ns = self.namespace.clone();
        child_ns.push(self.name.clone());
        Self {
            name: name.into(),
            namespace: child_ns,
        }
    }

    /// Get the parent scope as a QualifiedName (if any).
    ///
    /// Example: `game::core::Entity` -> Some(`game::core`)
    pub fn parent(&self) -> Option<Self> {
        if self.namespace.is_empty() {
            None
        } else {
            let name = self.namespace.last().unwrap().clone();
            let namespace = self.namespace[..self.namespace.len() - 1].to_vec();
            Some(Self { name, namespace })
        }
    }

    /// Compute the declaration hash for this name in the type domain.
    pub fn type_hash(&self) -> crate::DeclHash {
        crate::DeclHash::of_type(self)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.namespace.join("::"), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}
