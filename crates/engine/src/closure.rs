//! Minimal type closure for one operation field.
//!
//! Two mutually recursive traversals walk the input side (argument types)
//! and the output side (the return type). Every composite kind checks the
//! accumulator before recursing, which both breaks cycles and guarantees
//! termination; scalars and enums never recurse.

use crate::enumerate::OperationField;
use graphql_schema_model::{SchemaModel, TypeDef};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Computes the minimal set of named types the field's arguments and return
/// type transitively depend on.
///
/// The parent root type is forced into the closure but never expanded: the
/// closure concerns the single selected field, not its sibling fields.
#[must_use]
pub fn compute_closure(schema: &SchemaModel, field: &OperationField) -> BTreeSet<Arc<str>> {
    let mut keep = BTreeSet::new();
    keep.insert(field.parent_type.clone());

    for arg in &field.args {
        visit_input_type(schema, arg.ty.named_type(), &mut keep);
    }
    visit_output_type(schema, field.return_type.named_type(), &mut keep);

    keep
}

fn visit_input_type(schema: &SchemaModel, name: &str, keep: &mut BTreeSet<Arc<str>>) {
    let Some(def) = schema.type_def(name) else {
        // Dangling reference; recorded so SDL synthesis can surface it.
        keep.insert(Arc::from(name));
        return;
    };

    match def {
        TypeDef::Scalar(s) => {
            keep.insert(s.name.clone());
        }
        TypeDef::Enum(e) => {
            keep.insert(e.name.clone());
        }
        TypeDef::InputObject(input) => {
            if !keep.insert(input.name.clone()) {
                return;
            }
            for f in &input.fields {
                visit_input_type(schema, f.ty.named_type(), keep);
            }
        }
        // Output kinds are illegal on the input side; tolerate them as
        // opaque references without field expansion.
        TypeDef::Object(o) => {
            keep.insert(o.name.clone());
        }
        TypeDef::Interface(i) => {
            keep.insert(i.name.clone());
        }
        TypeDef::Union(u) => {
            keep.insert(u.name.clone());
        }
    }
}

fn visit_output_type(schema: &SchemaModel, name: &str, keep: &mut BTreeSet<Arc<str>>) {
    let Some(def) = schema.type_def(name) else {
        keep.insert(Arc::from(name));
        return;
    };

    match def {
        TypeDef::Scalar(s) => {
            keep.insert(s.name.clone());
        }
        TypeDef::Enum(e) => {
            keep.insert(e.name.clone());
        }
        TypeDef::Object(obj) => {
            if !keep.insert(obj.name.clone()) {
                return;
            }
            // Implemented interfaces are bare-added: the object redeclares
            // every interface field, so their types are covered by the
            // field walk below.
            for iface in &obj.implements {
                keep.insert(iface.clone());
            }
            for f in &obj.fields {
                visit_output_type(schema, f.ty.named_type(), keep);
                for arg in &f.args {
                    visit_input_type(schema, arg.ty.named_type(), keep);
                }
            }
        }
        TypeDef::Interface(iface) => {
            if !keep.insert(iface.name.clone()) {
                return;
            }
            for parent in &iface.implements {
                keep.insert(parent.clone());
            }
            for f in &iface.fields {
                visit_output_type(schema, f.ty.named_type(), keep);
                for arg in &f.args {
                    visit_input_type(schema, arg.ty.named_type(), keep);
                }
            }
            // Concrete implementers keep type-condition fragments valid
            // against the pruned schema.
            for implementer in schema.possible_types(&iface.name) {
                visit_output_type(schema, implementer, keep);
            }
        }
        TypeDef::Union(u) => {
            if !keep.insert(u.name.clone()) {
                return;
            }
            for member in &u.members {
                visit_output_type(schema, member, keep);
            }
        }
        // Input object on the output side: walk it with the input visitor.
        TypeDef::InputObject(_) => visit_input_type(schema, name, keep),
    }
}
