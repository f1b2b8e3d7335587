//! Synthesis of a complete operation document and its variables skeleton.
//!
//! The document must stay valid against the pruned SDL at every truncation
//! point: depth exhaustion yields a minimal leaf sub-selection (never an
//! empty one), and fields requiring arguments without defaults are skipped
//! rather than selected bare.

use crate::enumerate::OperationField;
use crate::limits::SelectionLimits;
use crate::priority::prioritized;
use graphql_schema_model::{FieldDef, SchemaModel, TypeDef, TypeRef, UnionDef};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;

/// A synthesized operation document plus the placeholder values for its
/// variables, shaped exactly like the field's argument nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionDocument {
    pub text: String,
    pub variables_skeleton: Value,
}

/// Builds the operation document for one root field: variable declarations,
/// the field invocation, and a recursively bounded selection set.
#[must_use]
pub fn synthesize_document(
    schema: &SchemaModel,
    field: &OperationField,
    limits: &SelectionLimits,
) -> SelectionDocument {
    let declarations = if field.args.is_empty() {
        String::new()
    } else {
        let rendered: Vec<String> = field
            .args
            .iter()
            .map(|a| format!("${}: {}", a.name, a.ty))
            .collect();
        format!("({})", rendered.join(", "))
    };
    let invocation = if field.args.is_empty() {
        String::new()
    } else {
        let rendered: Vec<String> = field
            .args
            .iter()
            .map(|a| format!("{}: ${}", a.name, a.name))
            .collect();
        format!("({})", rendered.join(", "))
    };

    let selection = selection_set(
        schema,
        field.return_type.named_type(),
        limits.depth,
        limits,
        &field.parent_type,
        1,
    )
    .map_or(String::new(), |s| format!(" {s}"));

    let text = format!(
        "{} {}_{}{} {{\n  {}{}{}\n}}\n",
        field.kind.as_str(),
        field.kind.capitalized(),
        field.field_name,
        declarations,
        field.field_name,
        invocation,
        selection,
    );

    let mut skeleton = Map::new();
    for arg in &field.args {
        skeleton.insert(
            arg.name.to_string(),
            placeholder_for_input(schema, &arg.ty, &HashSet::new()),
        );
    }

    SelectionDocument {
        text,
        variables_skeleton: Value::Object(skeleton),
    }
}

/// Recursive selection synthesis. Returns `None` for leaf types (scalars,
/// enums) and for anything that cannot legally carry a sub-selection.
///
/// `root` is the operation's parent type. The pruned schema keeps only the
/// selected field on it, so when the type graph cycles back to the root the
/// selection is restricted to `__typename` instead of the full schema's
/// sibling root fields.
fn selection_set(
    schema: &SchemaModel,
    type_name: &str,
    depth: u32,
    limits: &SelectionLimits,
    root: &str,
    indent: usize,
) -> Option<String> {
    if type_name == root {
        return Some(render_block(&["__typename".to_string()], indent));
    }
    let def = schema.type_def(type_name)?;
    match def {
        // Input objects in an output position are opaque, like leaves.
        TypeDef::Scalar(_) | TypeDef::Enum(_) | TypeDef::InputObject(_) => None,
        TypeDef::Object(o) => Some(fields_selection(schema, &o.fields, depth, limits, root, indent)),
        TypeDef::Interface(i) => {
            Some(fields_selection(schema, &i.fields, depth, limits, root, indent))
        }
        TypeDef::Union(u) => Some(union_selection(schema, u, depth, limits, root, indent)),
    }
}

fn fields_selection(
    schema: &SchemaModel,
    fields: &[FieldDef],
    depth: u32,
    limits: &SelectionLimits,
    root: &str,
    indent: usize,
) -> String {
    if depth == 0 {
        return render_block(&minimal_leaves(schema, fields), indent);
    }

    let mut lines = Vec::new();
    for field in prioritized(fields)
        .into_iter()
        .filter(|f| selectable(f))
        .take(limits.max_fields.max(1))
    {
        let sub = selection_set(
            schema,
            field.ty.named_type(),
            depth - 1,
            limits,
            root,
            indent + 1,
        );
        match sub {
            Some(sub) => lines.push(format!("{} {sub}", field.name)),
            None => lines.push(field.name.to_string()),
        }
    }
    if lines.is_empty() {
        lines.push("__typename".to_string());
    }
    render_block(&lines, indent)
}

fn union_selection(
    schema: &SchemaModel,
    union_def: &UnionDef,
    depth: u32,
    limits: &SelectionLimits,
    root: &str,
    indent: usize,
) -> String {
    if depth == 0 {
        return render_block(&["__typename".to_string()], indent);
    }

    let mut lines = Vec::new();
    for member in union_def.members.iter().take(limits.max_fields.max(1)) {
        let inner = selection_set(schema, member, depth - 1, limits, root, indent + 1)
            .unwrap_or_else(|| render_block(&["__typename".to_string()], indent + 1));
        lines.push(format!("... on {member} {inner}"));
    }
    if lines.is_empty() {
        lines.push("__typename".to_string());
    }
    render_block(&lines, indent)
}

/// The minimal sub-selection for a composite type at exhausted depth:
/// one or two scalar/enum leaves by priority order, `__typename` when the
/// type has none.
fn minimal_leaves(schema: &SchemaModel, fields: &[FieldDef]) -> Vec<String> {
    let leaves: Vec<String> = prioritized(fields)
        .into_iter()
        .filter(|f| selectable(f) && is_leaf(schema, f.ty.named_type()))
        .take(2)
        .map(|f| f.name.to_string())
        .collect();
    if leaves.is_empty() {
        vec!["__typename".to_string()]
    } else {
        leaves
    }
}

/// A field can be selected without arguments only if every argument is
/// nullable or carries a default.
fn selectable(field: &FieldDef) -> bool {
    field
        .args
        .iter()
        .all(|a| !a.ty.is_non_null() || a.default_value.is_some())
}

fn is_leaf(schema: &SchemaModel, type_name: &str) -> bool {
    matches!(
        schema.type_def(type_name),
        Some(TypeDef::Scalar(_) | TypeDef::Enum(_))
    )
}

fn render_block(lines: &[String], indent: usize) -> String {
    let pad = "  ".repeat(indent + 1);
    let close = "  ".repeat(indent);
    let mut out = String::from("{\n");
    for line in lines {
        out.push_str(&pad);
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&close);
    out.push('}');
    out
}

/// Placeholder value for one argument type. Non-null unwraps transparently,
/// a list wraps a one-element array of the inner placeholder, and input
/// objects recurse field by field. A branch-scoped seen set turns recursive
/// input types into `null` instead of unbounded nesting.
fn placeholder_for_input(schema: &SchemaModel, ty: &TypeRef, seen: &HashSet<Arc<str>>) -> Value {
    match ty {
        TypeRef::NonNull(inner) => placeholder_for_input(schema, inner, seen),
        TypeRef::List(inner) => Value::Array(vec![placeholder_for_input(schema, inner, seen)]),
        TypeRef::Named(name) => named_placeholder(schema, name, seen),
    }
}

fn named_placeholder(schema: &SchemaModel, name: &Arc<str>, seen: &HashSet<Arc<str>>) -> Value {
    match schema.type_def(name) {
        Some(TypeDef::Scalar(s)) => scalar_placeholder(&s.name),
        Some(TypeDef::Enum(e)) => e.values.first().map_or_else(
            || Value::String("<ENUM>".to_string()),
            |v| Value::String(v.to_string()),
        ),
        Some(TypeDef::InputObject(input)) => {
            if seen.contains(name.as_ref()) {
                return Value::Null;
            }
            let mut next = seen.clone();
            next.insert(input.name.clone());
            let mut map = Map::new();
            for f in &input.fields {
                map.insert(
                    f.name.to_string(),
                    placeholder_for_input(schema, &f.ty, &next),
                );
            }
            Value::Object(map)
        }
        // Output kind in an input position: no sensible placeholder.
        Some(_) => Value::Null,
        // Unknown names are treated like custom scalars.
        None => Value::String(format!("<{name}>")),
    }
}

fn scalar_placeholder(name: &str) -> Value {
    match name {
        "ID" | "AWSID" => Value::String("<ID>".to_string()),
        "Int" | "AWSInteger" => Value::from(0),
        "Float" => Value::from(0.0),
        "Boolean" => Value::Bool(true),
        other => Value::String(format!("<{other}>")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::enumerate_operations;
    use graphql_schema_model::sdl::parse_sdl;

    fn single_op(sdl: &str) -> (SchemaModel, OperationField) {
        let schema = parse_sdl(sdl).unwrap();
        let mut ops = enumerate_operations(&schema);
        assert_eq!(ops.len(), 1);
        (schema, ops.remove(0))
    }

    #[test]
    fn scalar_return_has_no_selection() {
        let (schema, op) = single_op("type Query { ping: String }");
        let doc = synthesize_document(&schema, &op, &SelectionLimits::default());
        assert_eq!(doc.text, "query Query_ping {\n  ping\n}\n");
        assert_eq!(doc.variables_skeleton, Value::Object(Map::new()));
    }

    #[test]
    fn skeleton_guards_recursive_input_objects() {
        let (schema, op) = single_op(
            "input Nested { again: Nested label: String }\n\
             type Query { probe(n: Nested): String }",
        );
        let doc = synthesize_document(&schema, &op, &SelectionLimits::default());
        let nested = &doc.variables_skeleton["n"];
        assert_eq!(nested["label"], Value::String("<String>".to_string()));
        assert_eq!(nested["again"], Value::Null);
    }

    #[test]
    fn fields_with_required_args_are_skipped() {
        let (schema, op) = single_op(
            "type User { id: ID! avatar(size: Int!): String badge(size: Int = 1): String }\n\
             type Query { me: User }",
        );
        let doc = synthesize_document(&schema, &op, &SelectionLimits::default());
        assert!(!doc.text.contains("avatar"));
        assert!(doc.text.contains("badge"));
    }
}
