//! Adapter from schema-definition-language text to the [`SchemaModel`].
//!
//! Parsing is strict first; on failure a lenient recovery pass strips vendor
//! runtime directive usages (the `@aws_*` family reserved by the hosting
//! platform) and retries once. If the retry also fails the original error is
//! reported and the whole batch is abandoned.

use crate::error::{Result, SchemaError};
use crate::model::{
    ArgumentDef, EnumDef, FieldDef, InputFieldDef, InputObjectDef, InterfaceDef, ObjectDef,
    RootTypes, ScalarDef, SchemaModel, TypeDef, TypeRef, UnionDef,
};
use apollo_compiler::ast;
use std::collections::HashMap;
use std::sync::Arc;

/// Parses schema text into a [`SchemaModel`].
pub fn parse_sdl(text: &str) -> Result<SchemaModel> {
    match parse_document(text) {
        Ok(doc) => Ok(build_model(&doc)),
        Err(first) => {
            tracing::debug!("strict schema parse failed, retrying with runtime directives stripped");
            let cleaned = strip_runtime_directives(text);
            match parse_document(&cleaned) {
                Ok(doc) => {
                    tracing::info!("schema parsed after stripping runtime directives");
                    Ok(build_model(&doc))
                }
                Err(_) => Err(SchemaError::UnparseableSdl { message: first }),
            }
        }
    }
}

fn parse_document(text: &str) -> std::result::Result<ast::Document, String> {
    ast::Document::parse(text, "schema.graphql").map_err(|err| err.errors.to_string())
}

/// Removes vendor runtime directive usages like `@aws_auth`, `@aws_iam` or
/// `@aws_cognito_user_pools(cognito_groups: [...])`, then trims the trailing
/// whitespace that removal leaves behind on each line.
#[must_use]
pub fn strip_runtime_directives(sdl: &str) -> String {
    let mut out = String::with_capacity(sdl.len());
    let mut rest = sdl;

    while let Some(pos) = rest.find("@aws") {
        out.push_str(&rest[..pos]);
        let bytes = rest.as_bytes();
        let mut end = pos + "@aws".len();
        while end < rest.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
            end += 1;
        }
        let mut open = end;
        while open < rest.len() && bytes[open].is_ascii_whitespace() {
            open += 1;
        }
        if open < rest.len() && bytes[open] == b'(' {
            if let Some(close) = rest[open..].find(')') {
                end = open + close + 1;
            }
        }
        rest = &rest[end..];
    }
    out.push_str(rest);

    let mut cleaned = String::with_capacity(out.len());
    for (idx, line) in out.lines().enumerate() {
        if idx > 0 {
            cleaned.push('\n');
        }
        cleaned.push_str(line.trim_end_matches([' ', '\t']));
    }
    if out.ends_with('\n') {
        cleaned.push('\n');
    }
    cleaned
}

fn build_model(doc: &ast::Document) -> SchemaModel {
    let mut order: Vec<TypeDef> = Vec::new();
    let mut index: HashMap<Arc<str>, usize> = HashMap::new();
    let mut roots = RootTypes::default();

    for definition in &doc.definitions {
        match definition {
            ast::Definition::SchemaDefinition(schema_def) => {
                apply_root_operations(&schema_def.root_operations, &mut roots);
            }
            ast::Definition::SchemaExtension(ext) => {
                apply_root_operations(&ext.root_operations, &mut roots);
            }
            ast::Definition::ObjectTypeDefinition(obj) => {
                upsert(&mut order, &mut index, TypeDef::Object(object_def(obj)));
            }
            ast::Definition::InterfaceTypeDefinition(iface) => {
                upsert(
                    &mut order,
                    &mut index,
                    TypeDef::Interface(interface_def(iface)),
                );
            }
            ast::Definition::UnionTypeDefinition(union_def) => {
                upsert(
                    &mut order,
                    &mut index,
                    TypeDef::Union(UnionDef {
                        name: Arc::from(union_def.name.as_str()),
                        members: union_def
                            .members
                            .iter()
                            .map(|m| Arc::from(m.as_str()))
                            .collect(),
                    }),
                );
            }
            ast::Definition::EnumTypeDefinition(enum_def) => {
                upsert(
                    &mut order,
                    &mut index,
                    TypeDef::Enum(EnumDef {
                        name: Arc::from(enum_def.name.as_str()),
                        values: enum_def
                            .values
                            .iter()
                            .map(|v| Arc::from(v.value.as_str()))
                            .collect(),
                    }),
                );
            }
            ast::Definition::ScalarTypeDefinition(scalar) => {
                upsert(
                    &mut order,
                    &mut index,
                    TypeDef::Scalar(ScalarDef {
                        name: Arc::from(scalar.name.as_str()),
                    }),
                );
            }
            ast::Definition::InputObjectTypeDefinition(input) => {
                upsert(
                    &mut order,
                    &mut index,
                    TypeDef::InputObject(InputObjectDef {
                        name: Arc::from(input.name.as_str()),
                        fields: input.fields.iter().map(|f| input_field_def(f)).collect(),
                    }),
                );
            }
            // Type extensions merge into their base definition.
            ast::Definition::ObjectTypeExtension(ext) => {
                upsert(
                    &mut order,
                    &mut index,
                    TypeDef::Object(ObjectDef {
                        name: Arc::from(ext.name.as_str()),
                        fields: ext.fields.iter().map(|f| field_def(f)).collect(),
                        implements: ext
                            .implements_interfaces
                            .iter()
                            .map(|t| Arc::from(t.as_str()))
                            .collect(),
                    }),
                );
            }
            ast::Definition::InterfaceTypeExtension(ext) => {
                upsert(
                    &mut order,
                    &mut index,
                    TypeDef::Interface(InterfaceDef {
                        name: Arc::from(ext.name.as_str()),
                        fields: ext.fields.iter().map(|f| field_def(f)).collect(),
                        implements: ext
                            .implements_interfaces
                            .iter()
                            .map(|t| Arc::from(t.as_str()))
                            .collect(),
                    }),
                );
            }
            ast::Definition::UnionTypeExtension(ext) => {
                upsert(
                    &mut order,
                    &mut index,
                    TypeDef::Union(UnionDef {
                        name: Arc::from(ext.name.as_str()),
                        members: ext.members.iter().map(|m| Arc::from(m.as_str())).collect(),
                    }),
                );
            }
            ast::Definition::EnumTypeExtension(ext) => {
                upsert(
                    &mut order,
                    &mut index,
                    TypeDef::Enum(EnumDef {
                        name: Arc::from(ext.name.as_str()),
                        values: ext.values.iter().map(|v| Arc::from(v.value.as_str())).collect(),
                    }),
                );
            }
            ast::Definition::InputObjectTypeExtension(ext) => {
                upsert(
                    &mut order,
                    &mut index,
                    TypeDef::InputObject(InputObjectDef {
                        name: Arc::from(ext.name.as_str()),
                        fields: ext.fields.iter().map(|f| input_field_def(f)).collect(),
                    }),
                );
            }
            ast::Definition::ScalarTypeExtension(ext) => {
                upsert(
                    &mut order,
                    &mut index,
                    TypeDef::Scalar(ScalarDef {
                        name: Arc::from(ext.name.as_str()),
                    }),
                );
            }
            _ => {}
        }
    }

    SchemaModel::new(order, roots)
}

fn apply_root_operations(
    ops: &[apollo_compiler::Node<(ast::OperationType, ast::NamedType)>],
    roots: &mut RootTypes,
) {
    for node in ops {
        let (op_type, name) = &**node;
        let name: Arc<str> = Arc::from(name.as_str());
        match op_type {
            ast::OperationType::Query => roots.query = Some(name),
            ast::OperationType::Mutation => roots.mutation = Some(name),
            ast::OperationType::Subscription => roots.subscription = Some(name),
        }
    }
}

/// Inserts a definition, merging fields/members/values into an existing base
/// definition of the same name (the extension path).
fn upsert(order: &mut Vec<TypeDef>, index: &mut HashMap<Arc<str>, usize>, def: TypeDef) {
    if let Some(&at) = index.get(def.name()) {
        merge_into(&mut order[at], def);
    } else {
        index.insert(def.name().clone(), order.len());
        order.push(def);
    }
}

fn merge_into(base: &mut TypeDef, ext: TypeDef) {
    match (&mut *base, ext) {
        (TypeDef::Object(b), TypeDef::Object(e)) => {
            b.fields.extend(e.fields);
            b.implements.extend(e.implements);
        }
        (TypeDef::Interface(b), TypeDef::Interface(e)) => {
            b.fields.extend(e.fields);
            b.implements.extend(e.implements);
        }
        (TypeDef::Union(b), TypeDef::Union(e)) => b.members.extend(e.members),
        (TypeDef::Enum(b), TypeDef::Enum(e)) => b.values.extend(e.values),
        (TypeDef::InputObject(b), TypeDef::InputObject(e)) => b.fields.extend(e.fields),
        (TypeDef::Scalar(_), TypeDef::Scalar(_)) => {}
        (base, ext) => {
            tracing::warn!(
                name = %ext.name(),
                base_kind = %base.kind(),
                ext_kind = %ext.kind(),
                "ignoring extension with mismatched kind"
            );
        }
    }
}

fn object_def(obj: &ast::ObjectTypeDefinition) -> ObjectDef {
    ObjectDef {
        name: Arc::from(obj.name.as_str()),
        fields: obj.fields.iter().map(|f| field_def(f)).collect(),
        implements: obj
            .implements_interfaces
            .iter()
            .map(|t| Arc::from(t.as_str()))
            .collect(),
    }
}

fn interface_def(iface: &ast::InterfaceTypeDefinition) -> InterfaceDef {
    InterfaceDef {
        name: Arc::from(iface.name.as_str()),
        fields: iface.fields.iter().map(|f| field_def(f)).collect(),
        implements: iface
            .implements_interfaces
            .iter()
            .map(|t| Arc::from(t.as_str()))
            .collect(),
    }
}

fn field_def(field: &ast::FieldDefinition) -> FieldDef {
    FieldDef {
        name: Arc::from(field.name.as_str()),
        ty: convert_type(&field.ty),
        args: field.arguments.iter().map(|a| argument_def(a)).collect(),
    }
}

fn argument_def(arg: &ast::InputValueDefinition) -> ArgumentDef {
    ArgumentDef {
        name: Arc::from(arg.name.as_str()),
        ty: convert_type(&arg.ty),
        default_value: arg
            .default_value
            .as_ref()
            .map(|v| Arc::from(v.to_string().as_str())),
    }
}

fn input_field_def(field: &ast::InputValueDefinition) -> InputFieldDef {
    InputFieldDef {
        name: Arc::from(field.name.as_str()),
        ty: convert_type(&field.ty),
        default_value: field
            .default_value
            .as_ref()
            .map(|v| Arc::from(v.to_string().as_str())),
    }
}

fn convert_type(ty: &ast::Type) -> TypeRef {
    match ty {
        ast::Type::Named(name) => TypeRef::named(name.as_str()),
        ast::Type::NonNullNamed(name) => TypeRef::non_null(TypeRef::named(name.as_str())),
        ast::Type::List(inner) => TypeRef::list(convert_type(inner)),
        ast::Type::NonNullList(inner) => TypeRef::non_null(TypeRef::list(convert_type(inner))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeDefKind;

    #[test]
    fn parses_basic_schema() {
        let model = parse_sdl(
            "type Query { getUser(id: ID!): User }\n\
             type User { id: ID! name: String friends: [User!] }",
        )
        .unwrap();

        assert!(model.contains("User"));
        let root = model.query_root().unwrap();
        assert_eq!(root.name().as_ref(), "Query");

        let Some(TypeDef::Object(user)) = model.type_def("User") else {
            panic!("expected object type");
        };
        assert_eq!(user.fields.len(), 3);
        assert_eq!(user.fields[2].ty.to_string(), "[User!]");
    }

    #[test]
    fn honors_schema_definition_roots() {
        let model = parse_sdl(
            "schema { query: RootQ }\n\
             type RootQ { ping: String }\n\
             type Query { decoy: String }",
        )
        .unwrap();
        assert_eq!(model.query_root().unwrap().name().as_ref(), "RootQ");
    }

    #[test]
    fn merges_type_extensions() {
        let model = parse_sdl(
            "type Query { a: String }\n\
             extend type Query { b: Int }\n\
             enum Color { RED }\n\
             extend enum Color { BLUE }",
        )
        .unwrap();

        let Some(TypeDef::Object(query)) = model.type_def("Query") else {
            panic!("expected object type");
        };
        assert_eq!(query.fields.len(), 2);

        let Some(TypeDef::Enum(color)) = model.type_def("Color") else {
            panic!("expected enum type");
        };
        assert_eq!(color.values.len(), 2);
    }

    #[test]
    fn parses_all_kinds() {
        let model = parse_sdl(
            "scalar DateTime\n\
             enum Role { ADMIN USER }\n\
             interface Node { id: ID! }\n\
             type User implements Node { id: ID! role: Role }\n\
             union Entity = User\n\
             input Filter { q: String = \"all\" }\n\
             type Query { search(filter: Filter): Entity }",
        )
        .unwrap();

        assert_eq!(model.type_def("DateTime").unwrap().kind(), TypeDefKind::Scalar);
        assert_eq!(model.type_def("Entity").unwrap().kind(), TypeDefKind::Union);
        let Some(TypeDef::InputObject(filter)) = model.type_def("Filter") else {
            panic!("expected input object");
        };
        assert_eq!(filter.fields[0].default_value.as_deref(), Some("\"all\""));
    }

    #[test]
    fn strips_runtime_directives() {
        let sdl = "type Query @aws_api_key {\n  me: User @aws_auth(cognito_groups: [\"admin\"])\n}";
        let cleaned = strip_runtime_directives(sdl);
        assert!(!cleaned.contains("@aws"));
        assert!(cleaned.contains("me: User"));
        // removal never mangles the surrounding declaration
        parse_sdl(&cleaned).unwrap();
    }

    #[test]
    fn unparseable_sdl_is_fatal() {
        let err = parse_sdl("type {{{{").unwrap_err();
        assert!(matches!(err, SchemaError::UnparseableSdl { .. }));
    }
}
