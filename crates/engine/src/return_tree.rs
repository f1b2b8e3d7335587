//! Bounded structural mirror of an operation's return type.
//!
//! Depth counts composite hops only: list and non-null wrappers are free,
//! so `[User!]!` costs the same depth as `User`. A branch-scoped seen set
//! marks revisited composites as truncated instead of recursing.

use crate::limits::ReturnTreeLimits;
use crate::priority::prioritized;
use graphql_schema_model::{FieldDef, SchemaModel, TypeDef, TypeRef};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    Object,
    Interface,
}

impl CompositeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
        }
    }
}

/// One node of the return tree. Built fresh per operation and never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnTree {
    Leaf {
        type_name: Arc<str>,
        non_null: bool,
    },
    List {
        of: Box<ReturnTree>,
        non_null: bool,
    },
    Composite {
        type_name: Arc<str>,
        kind: CompositeKind,
        /// Priority order, not name order.
        fields: Vec<(Arc<str>, ReturnTree)>,
        non_null: bool,
        truncated: bool,
        /// Concrete implementer names, interfaces only.
        implementers: Vec<Arc<str>>,
    },
    Union {
        type_name: Arc<str>,
        variants: Vec<ReturnTree>,
        non_null: bool,
    },
}

impl ReturnTree {
    fn mark_non_null(&mut self) {
        match self {
            Self::Leaf { non_null, .. }
            | Self::List { non_null, .. }
            | Self::Composite { non_null, .. }
            | Self::Union { non_null, .. } => *non_null = true,
        }
    }

    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::Composite { truncated: true, .. })
    }
}

/// Builds the bounded return tree for one return type.
#[must_use]
pub fn synthesize_return_tree(
    schema: &SchemaModel,
    return_type: &TypeRef,
    limits: &ReturnTreeLimits,
) -> ReturnTree {
    build(schema, return_type, limits.depth, limits, &HashSet::new())
}

fn build(
    schema: &SchemaModel,
    ty: &TypeRef,
    depth: u32,
    limits: &ReturnTreeLimits,
    seen: &HashSet<Arc<str>>,
) -> ReturnTree {
    match ty {
        TypeRef::NonNull(inner) => {
            let mut node = build(schema, inner, depth, limits, seen);
            node.mark_non_null();
            node
        }
        TypeRef::List(inner) => ReturnTree::List {
            of: Box::new(build(schema, inner, depth, limits, seen)),
            non_null: false,
        },
        TypeRef::Named(name) => build_named(schema, name, depth, limits, seen),
    }
}

fn build_named(
    schema: &SchemaModel,
    name: &Arc<str>,
    depth: u32,
    limits: &ReturnTreeLimits,
    seen: &HashSet<Arc<str>>,
) -> ReturnTree {
    match schema.type_def(name) {
        // Unknown names behave like custom scalars.
        None | Some(TypeDef::Scalar(_) | TypeDef::Enum(_)) => ReturnTree::Leaf {
            type_name: name.clone(),
            non_null: false,
        },
        Some(TypeDef::Object(o)) => {
            if depth == 0 || seen.contains(name.as_ref()) {
                return truncated(o.name.clone(), CompositeKind::Object, Vec::new());
            }
            ReturnTree::Composite {
                type_name: o.name.clone(),
                kind: CompositeKind::Object,
                fields: child_fields(schema, &o.name, &o.fields, depth, limits, seen),
                non_null: false,
                truncated: false,
                implementers: Vec::new(),
            }
        }
        Some(TypeDef::Interface(i)) => {
            let implementers: Vec<Arc<str>> = schema.possible_types(&i.name).cloned().collect();
            if depth == 0 || seen.contains(name.as_ref()) {
                return truncated(i.name.clone(), CompositeKind::Interface, implementers);
            }
            ReturnTree::Composite {
                type_name: i.name.clone(),
                kind: CompositeKind::Interface,
                fields: child_fields(schema, &i.name, &i.fields, depth, limits, seen),
                non_null: false,
                truncated: false,
                implementers,
            }
        }
        Some(TypeDef::Union(u)) => {
            // An empty variants list is the union form of truncation.
            if depth == 0 || seen.contains(name.as_ref()) {
                return ReturnTree::Union {
                    type_name: u.name.clone(),
                    variants: Vec::new(),
                    non_null: false,
                };
            }
            let mut next = seen.clone();
            next.insert(u.name.clone());
            let variants = u
                .members
                .iter()
                .take(limits.max_fields.max(1))
                .map(|member| build_named(schema, member, depth - 1, limits, &next))
                .collect();
            ReturnTree::Union {
                type_name: u.name.clone(),
                variants,
                non_null: false,
            }
        }
        // Input object in an output position: opaque, never expanded.
        Some(TypeDef::InputObject(input)) => {
            truncated(input.name.clone(), CompositeKind::Object, Vec::new())
        }
    }
}

fn truncated(type_name: Arc<str>, kind: CompositeKind, implementers: Vec<Arc<str>>) -> ReturnTree {
    ReturnTree::Composite {
        type_name,
        kind,
        fields: Vec::new(),
        non_null: false,
        truncated: true,
        implementers,
    }
}

fn child_fields(
    schema: &SchemaModel,
    name: &Arc<str>,
    fields: &[FieldDef],
    depth: u32,
    limits: &ReturnTreeLimits,
    seen: &HashSet<Arc<str>>,
) -> Vec<(Arc<str>, ReturnTree)> {
    let mut next = seen.clone();
    next.insert(name.clone());
    prioritized(fields)
        .into_iter()
        .take(limits.max_fields.max(1))
        .map(|f| (f.name.clone(), build(schema, &f.ty, depth - 1, limits, &next)))
        .collect()
}

/// Serialized shape keeps `__type`/`__kind` discriminator tags so a consumer
/// can tell leaf, list, composite, and union nodes apart without schema
/// access. Composite `fields` keep priority order.
impl Serialize for ReturnTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf {
                type_name,
                non_null,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("__type", type_name.as_ref())?;
                map.serialize_entry("__kind", "LEAF")?;
                map.serialize_entry("__nonNull", non_null)?;
                map.end()
            }
            Self::List { of, non_null } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("__kind", "LIST")?;
                map.serialize_entry("__nonNull", non_null)?;
                map.serialize_entry("of", of)?;
                map.end()
            }
            Self::Composite {
                type_name,
                kind,
                fields,
                non_null,
                truncated,
                implementers,
            } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("__type", type_name.as_ref())?;
                map.serialize_entry("__kind", kind.as_str())?;
                map.serialize_entry("__nonNull", non_null)?;
                map.serialize_entry("__truncated", truncated)?;
                if !implementers.is_empty() {
                    let names: Vec<&str> = implementers.iter().map(AsRef::as_ref).collect();
                    map.serialize_entry("__implementers", &names)?;
                }
                map.serialize_entry("fields", &OrderedFields(fields))?;
                map.end()
            }
            Self::Union {
                type_name,
                variants,
                non_null,
            } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("__type", type_name.as_ref())?;
                map.serialize_entry("__kind", "UNION")?;
                map.serialize_entry("__nonNull", non_null)?;
                map.serialize_entry("variants", variants)?;
                map.end()
            }
        }
    }
}

struct OrderedFields<'a>(&'a [(Arc<str>, ReturnTree)]);

impl Serialize for OrderedFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, node) in self.0 {
            map.serialize_entry(name.as_ref(), node)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_schema_model::sdl::parse_sdl;

    fn tree_for(sdl: &str, ty: &str, limits: &ReturnTreeLimits) -> ReturnTree {
        let schema = parse_sdl(sdl).unwrap();
        synthesize_return_tree(&schema, &TypeRef::named(ty), limits)
    }

    #[test]
    fn cycles_truncate_within_a_branch() {
        let tree = tree_for(
            "type A { b: B } type B { a: A } type Query { a: A }",
            "A",
            &ReturnTreeLimits {
                depth: 10,
                max_fields: 25,
            },
        );
        let ReturnTree::Composite { fields, .. } = &tree else {
            panic!("expected composite root");
        };
        let ReturnTree::Composite { fields: b_fields, .. } = &fields[0].1 else {
            panic!("expected composite B");
        };
        assert!(b_fields[0].1.is_truncated());
    }

    #[test]
    fn list_non_null_survives_serialization() {
        let schema = parse_sdl("type User { id: ID! } type Query { u: User }").unwrap();
        let ty = TypeRef::non_null(TypeRef::list(TypeRef::named("User")));
        let tree = synthesize_return_tree(&schema, &ty, &ReturnTreeLimits::default());
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["__kind"], "LIST");
        assert_eq!(json["__nonNull"], true);
        assert_eq!(json["of"]["__type"], "User");
        assert_eq!(json["of"]["fields"]["id"]["__nonNull"], true);
    }

    #[test]
    fn interfaces_record_implementers() {
        let tree = tree_for(
            "interface Node { id: ID! }\n\
             type User implements Node { id: ID! }\n\
             type Post implements Node { id: ID! }\n\
             type Query { node: Node }",
            "Node",
            &ReturnTreeLimits::default(),
        );
        let ReturnTree::Composite { implementers, .. } = &tree else {
            panic!("expected composite");
        };
        let names: Vec<&str> = implementers.iter().map(AsRef::as_ref).collect();
        assert_eq!(names, vec!["Post", "User"]);
    }
}
