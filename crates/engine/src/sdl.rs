//! Rendering a closure back into free-standing schema text.

use crate::enumerate::{OperationField, OperationKind};
use graphql_schema_model::{
    is_builtin_scalar, ArgumentDef, FieldDef, InputFieldDef, SchemaModel, TypeDef,
};
use std::collections::BTreeSet;
use std::fmt::Write;
use std::sync::Arc;

/// How the pruned schema satisfies the query-root requirement. A schema
/// without a query root does not validate, so mutation and subscription
/// parents either reuse a `Query` object already in the closure or get a
/// one-field stub.
enum QueryRoot {
    Parent,
    Existing(String),
    Stub(String),
}

fn pruned_query_root(
    schema: &SchemaModel,
    field: &OperationField,
    closure: &BTreeSet<Arc<str>>,
) -> QueryRoot {
    if field.kind == OperationKind::Query {
        return QueryRoot::Parent;
    }
    if field.parent_type.as_ref() != "Query"
        && closure.contains("Query")
        && matches!(schema.type_def("Query"), Some(TypeDef::Object(_)))
    {
        return QueryRoot::Existing("Query".to_string());
    }
    let mut name = String::from("Query");
    while closure.contains(name.as_str()) {
        name.push('_');
    }
    QueryRoot::Stub(name)
}

/// Renders a self-contained schema: root operation declarations where the
/// conventional type names do not apply, one root-type block holding only
/// the selected field, then a declaration for every other closure member in
/// sorted order. Built-in scalars are skipped. A closure member missing from
/// the schema gets a visible inline marker instead of aborting the operation.
#[must_use]
pub fn synthesize_sdl(
    schema: &SchemaModel,
    field: &OperationField,
    closure: &BTreeSet<Arc<str>>,
) -> String {
    let mut blocks = Vec::with_capacity(closure.len() + 2);

    let query_root = pruned_query_root(schema, field, closure);
    match &query_root {
        QueryRoot::Parent => {
            if field.parent_type.as_ref() != "Query" {
                blocks.push(format!("schema {{\n  query: {}\n}}", field.parent_type));
            }
        }
        QueryRoot::Existing(name) | QueryRoot::Stub(name) => {
            blocks.push(format!(
                "schema {{\n  query: {name}\n  {}: {}\n}}",
                field.kind.as_str(),
                field.parent_type
            ));
        }
    }

    blocks.push(format!(
        "type {} {{\n  {}\n}}",
        field.parent_type,
        render_field(&field.field_name, &field.args, &field.return_type.to_string())
    ));
    if let QueryRoot::Stub(name) = &query_root {
        blocks.push(format!("type {name} {{\n  ok: Boolean\n}}"));
    }

    for name in closure {
        if name.as_ref() == field.parent_type.as_ref() || is_builtin_scalar(name) {
            continue;
        }
        match schema.type_def(name) {
            Some(def) => blocks.push(render_type_def(def)),
            None => {
                tracing::warn!(
                    operation = %field.qualified_name(),
                    type_name = %name,
                    "closure member missing from schema"
                );
                blocks.push(format!("# unresolved type in closure: {name}"));
            }
        }
    }

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn render_type_def(def: &TypeDef) -> String {
    match def {
        TypeDef::Scalar(s) => format!("scalar {}", s.name),
        TypeDef::Enum(e) => {
            let mut out = format!("enum {} {{\n", e.name);
            for value in &e.values {
                let _ = writeln!(out, "  {value}");
            }
            out.push('}');
            out
        }
        TypeDef::Object(o) => render_fielded("type", &o.name, &o.implements, &o.fields),
        TypeDef::Interface(i) => render_fielded("interface", &i.name, &i.implements, &i.fields),
        TypeDef::Union(u) => {
            let members: Vec<&str> = u.members.iter().map(AsRef::as_ref).collect();
            format!("union {} = {}", u.name, members.join(" | "))
        }
        TypeDef::InputObject(input) => {
            let mut out = format!("input {} {{\n", input.name);
            for f in &input.fields {
                let _ = writeln!(out, "  {}", render_input_field(f));
            }
            out.push('}');
            out
        }
    }
}

fn render_fielded(keyword: &str, name: &str, implements: &[Arc<str>], fields: &[FieldDef]) -> String {
    let mut out = String::new();
    out.push_str(keyword);
    out.push(' ');
    out.push_str(name);
    if !implements.is_empty() {
        let list: Vec<&str> = implements.iter().map(AsRef::as_ref).collect();
        let _ = write!(out, " implements {}", list.join(" & "));
    }
    out.push_str(" {\n");
    for f in fields {
        let _ = writeln!(out, "  {}", render_field(&f.name, &f.args, &f.ty.to_string()));
    }
    out.push('}');
    out
}

fn render_field(name: &str, args: &[ArgumentDef], return_type: &str) -> String {
    if args.is_empty() {
        format!("{name}: {return_type}")
    } else {
        let rendered: Vec<String> = args.iter().map(render_argument).collect();
        format!("{name}({}): {return_type}", rendered.join(", "))
    }
}

fn render_argument(arg: &ArgumentDef) -> String {
    match &arg.default_value {
        Some(default) => format!("{}: {} = {default}", arg.name, arg.ty),
        None => format!("{}: {}", arg.name, arg.ty),
    }
}

fn render_input_field(field: &InputFieldDef) -> String {
    match &field.default_value {
        Some(default) => format!("{}: {} = {default}", field.name, field.ty),
        None => format!("{}: {}", field.name, field.ty),
    }
}
