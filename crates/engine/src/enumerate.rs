//! Enumeration of root operation fields.

use graphql_schema_model::{ArgumentDef, SchemaModel, TypeDef, TypeRef};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }

    /// Capitalized form used in synthesized operation names.
    #[must_use]
    pub const fn capitalized(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }
}

/// One field of a root operation type, captured at enumeration time.
/// Immutable thereafter; every downstream synthesis step keys off this.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationField {
    pub kind: OperationKind,
    pub parent_type: Arc<str>,
    pub field_name: Arc<str>,
    pub args: Vec<ArgumentDef>,
    pub return_type: TypeRef,
}

impl OperationField {
    /// `ParentType.fieldName`, the stable identity used for ordering and
    /// for per-operation output directories.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.parent_type, self.field_name)
    }
}

/// Lists every field of the query/mutation/subscription root types, sorted
/// lexicographically by `parentTypeName.fieldName`. Deterministic output is
/// a hard requirement: downstream file placement and test diffing depend on
/// this ordering.
#[must_use]
pub fn enumerate_operations(schema: &SchemaModel) -> Vec<OperationField> {
    let mut out = Vec::new();

    let roots = [
        (OperationKind::Query, schema.query_root()),
        (OperationKind::Mutation, schema.mutation_root()),
        (OperationKind::Subscription, schema.subscription_root()),
    ];

    for (kind, root) in roots {
        let Some(TypeDef::Object(obj)) = root else {
            continue;
        };
        for field in &obj.fields {
            out.push(OperationField {
                kind,
                parent_type: obj.name.clone(),
                field_name: field.name.clone(),
                args: field.args.clone(),
                return_type: field.ty.clone(),
            });
        }
    }

    out.sort_by_key(OperationField::qualified_name);
    out
}
