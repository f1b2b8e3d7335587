//! Per-operation context assembly: everything a downstream consumer needs
//! about one root field, bundled as serializable metadata.

use crate::closure::compute_closure;
use crate::document::synthesize_document;
use crate::enumerate::{OperationField, OperationKind};
use crate::limits::GenerateLimits;
use crate::return_tree::{synthesize_return_tree, ReturnTree};
use crate::sdl::synthesize_sdl;
use graphql_schema_model::SchemaModel;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationMetadata {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub parent_type: String,
    pub field_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArgumentMetadata {
    pub name: String,
    /// Rendered type reference, e.g. `[User!]!`.
    #[serde(rename = "type")]
    pub ty: String,
}

/// The machine-readable half of a context package (`context.json`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationContext {
    pub operation: OperationMetadata,
    pub args: Vec<ArgumentMetadata>,
    pub return_type: String,
    pub variables_skeleton: Value,
    /// Sorted type names from the closure.
    pub type_closure: Vec<String>,
    pub return_tree: ReturnTree,
}

/// Everything synthesized for one operation field.
#[derive(Debug, Clone)]
pub struct OperationArtifacts {
    pub sdl: String,
    pub document: String,
    pub context: OperationContext,
}

/// Runs the full synthesis pipeline for one field: closure, pruned SDL,
/// operation document, variables skeleton, and return tree. Pure; callers
/// may run fields in parallel against the same schema.
#[must_use]
pub fn generate_artifacts(
    schema: &SchemaModel,
    field: &OperationField,
    limits: &GenerateLimits,
) -> OperationArtifacts {
    let closure = compute_closure(schema, field);
    let sdl = synthesize_sdl(schema, field, &closure);
    let document = synthesize_document(schema, field, &limits.selection);
    let return_tree = synthesize_return_tree(schema, &field.return_type, &limits.return_tree);

    let context = OperationContext {
        operation: OperationMetadata {
            kind: field.kind,
            parent_type: field.parent_type.to_string(),
            field_name: field.field_name.to_string(),
        },
        args: field
            .args
            .iter()
            .map(|a| ArgumentMetadata {
                name: a.name.to_string(),
                ty: a.ty.to_string(),
            })
            .collect(),
        return_type: field.return_type.to_string(),
        variables_skeleton: document.variables_skeleton,
        type_closure: closure.iter().map(ToString::to_string).collect(),
        return_tree,
    };

    OperationArtifacts {
        sdl,
        document: document.text,
        context,
    }
}
