use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// Reference to a type, with list/non-null wrappers modeled recursively.
///
/// Invariant: `NonNull` never wraps another `NonNull`. [`TypeRef::non_null`]
/// enforces this at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(Arc<str>),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    #[must_use]
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }

    /// Wraps `inner` in a non-null marker. Wrapping an already non-null
    /// reference is a no-op.
    #[must_use]
    pub fn non_null(inner: Self) -> Self {
        match inner {
            Self::NonNull(_) => inner,
            other => Self::NonNull(Box::new(other)),
        }
    }

    /// Strips all list/non-null wrappers down to the named type.
    #[must_use]
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }

    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// The kind of a named type. Mostly useful for logging and error messages;
/// traversal code matches on [`TypeDef`] variants directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDefKind {
    Scalar,
    Enum,
    Object,
    Interface,
    Union,
    InputObject,
}

impl fmt::Display for TypeDefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Scalar => "scalar",
            Self::Enum => "enum",
            Self::Object => "object",
            Self::Interface => "interface",
            Self::Union => "union",
            Self::InputObject => "input object",
        };
        write!(f, "{s}")
    }
}

/// A named type definition, one variant per GraphQL kind.
///
/// Traversals dispatch on this with exhaustive matching so that a new kind
/// is a compile-time-checked exercise rather than a runtime predicate chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDef {
    Scalar(ScalarDef),
    Enum(EnumDef),
    Object(ObjectDef),
    Interface(InterfaceDef),
    Union(UnionDef),
    InputObject(InputObjectDef),
}

impl TypeDef {
    #[must_use]
    pub fn name(&self) -> &Arc<str> {
        match self {
            Self::Scalar(d) => &d.name,
            Self::Enum(d) => &d.name,
            Self::Object(d) => &d.name,
            Self::Interface(d) => &d.name,
            Self::Union(d) => &d.name,
            Self::InputObject(d) => &d.name,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TypeDefKind {
        match self {
            Self::Scalar(_) => TypeDefKind::Scalar,
            Self::Enum(_) => TypeDefKind::Enum,
            Self::Object(_) => TypeDefKind::Object,
            Self::Interface(_) => TypeDefKind::Interface,
            Self::Union(_) => TypeDefKind::Union,
            Self::InputObject(_) => TypeDefKind::InputObject,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScalarDef {
    pub name: Arc<str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumDef {
    pub name: Arc<str>,
    /// Values in declaration order.
    pub values: Vec<Arc<str>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectDef {
    pub name: Arc<str>,
    pub fields: Vec<FieldDef>,
    pub implements: Vec<Arc<str>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceDef {
    pub name: Arc<str>,
    pub fields: Vec<FieldDef>,
    pub implements: Vec<Arc<str>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnionDef {
    pub name: Arc<str>,
    pub members: Vec<Arc<str>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputObjectDef {
    pub name: Arc<str>,
    pub fields: Vec<InputFieldDef>,
}

/// Signature of an output field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDef {
    pub name: Arc<str>,
    pub ty: TypeRef,
    pub args: Vec<ArgumentDef>,
}

/// A field of an input object type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputFieldDef {
    pub name: Arc<str>,
    pub ty: TypeRef,
    /// Serialized GraphQL value text (e.g. `"hello"`, `3`, `ENUM_VALUE`).
    pub default_value: Option<Arc<str>>,
}

/// Argument definition on an output field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgumentDef {
    pub name: Arc<str>,
    pub ty: TypeRef,
    pub default_value: Option<Arc<str>>,
}

/// The names of the three root operation types, as declared by a `schema`
/// block or defaulted to `Query`/`Mutation`/`Subscription`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootTypes {
    pub query: Option<Arc<str>>,
    pub mutation: Option<Arc<str>>,
    pub subscription: Option<Arc<str>>,
}

/// Built-in scalars need no declaration in synthesized SDL.
#[must_use]
pub fn is_builtin_scalar(name: &str) -> bool {
    matches!(name, "String" | "Int" | "Float" | "Boolean" | "ID")
}

/// Read-only view over a full GraphQL type system.
///
/// Construction validates nothing beyond what the adapters enforce; lookups
/// return `None` for unknown names and callers decide how defensive to be.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaModel {
    types: HashMap<Arc<str>, TypeDef>,
    roots: RootTypes,
    /// Interface name -> concrete object types implementing it.
    implementers: HashMap<Arc<str>, BTreeSet<Arc<str>>>,
}

impl SchemaModel {
    /// Builds a model from a list of type definitions and explicit root type
    /// names. Missing root names default to `Query`/`Mutation`/`Subscription`
    /// when an object type with that name exists.
    #[must_use]
    pub fn new(defs: Vec<TypeDef>, mut roots: RootTypes) -> Self {
        let mut types: HashMap<Arc<str>, TypeDef> = HashMap::with_capacity(defs.len());
        let mut implementers: HashMap<Arc<str>, BTreeSet<Arc<str>>> = HashMap::new();

        for def in defs {
            if let TypeDef::Object(obj) = &def {
                for iface in &obj.implements {
                    implementers
                        .entry(iface.clone())
                        .or_default()
                        .insert(obj.name.clone());
                }
            }
            types.insert(def.name().clone(), def);
        }

        let default_root = |name: &str| -> Option<Arc<str>> {
            match types.get(name) {
                Some(TypeDef::Object(obj)) => Some(obj.name.clone()),
                _ => None,
            }
        };
        if roots.query.is_none() {
            roots.query = default_root("Query");
        }
        if roots.mutation.is_none() {
            roots.mutation = default_root("Mutation");
        }
        if roots.subscription.is_none() {
            roots.subscription = default_root("Subscription");
        }

        Self {
            types,
            roots,
            implementers,
        }
    }

    #[must_use]
    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Concrete object types implementing the named interface, sorted by name.
    pub fn possible_types<'a>(&'a self, interface: &str) -> impl Iterator<Item = &'a Arc<str>> + 'a {
        self.implementers.get(interface).into_iter().flatten()
    }

    #[must_use]
    pub fn query_root(&self) -> Option<&TypeDef> {
        self.root_def(self.roots.query.as_deref())
    }

    #[must_use]
    pub fn mutation_root(&self) -> Option<&TypeDef> {
        self.root_def(self.roots.mutation.as_deref())
    }

    #[must_use]
    pub fn subscription_root(&self) -> Option<&TypeDef> {
        self.root_def(self.roots.subscription.as_deref())
    }

    fn root_def(&self, name: Option<&str>) -> Option<&TypeDef> {
        self.types.get(name?)
    }
}
