//! Adapter from a standard introspection JSON document to the [`SchemaModel`].
//!
//! Tolerates both a full response envelope (`{ "data": { "__schema": … } }`)
//! and a bare `{ "__schema": … }` document.

use crate::error::{Result, SchemaError};
use crate::model::{
    ArgumentDef, EnumDef, FieldDef, InputFieldDef, InputObjectDef, InterfaceDef, ObjectDef,
    RootTypes, ScalarDef, SchemaModel, TypeDef, TypeRef, UnionDef,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<Document>,
    #[serde(rename = "__schema")]
    schema: Option<Schema>,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "__schema")]
    schema: Option<Schema>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Schema {
    query_type: Option<RootRef>,
    mutation_type: Option<RootRef>,
    subscription_type: Option<RootRef>,
    types: Vec<Type>,
}

#[derive(Debug, Deserialize)]
struct RootRef {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Type {
    kind: String,
    name: Option<String>,
    #[serde(default)]
    fields: Option<Vec<Field>>,
    #[serde(default)]
    input_fields: Option<Vec<InputValue>>,
    #[serde(default)]
    interfaces: Option<Vec<TypeRefJson>>,
    #[serde(default)]
    possible_types: Option<Vec<TypeRefJson>>,
    #[serde(default)]
    enum_values: Option<Vec<EnumValue>>,
}

#[derive(Debug, Deserialize)]
struct Field {
    name: String,
    #[serde(default)]
    args: Vec<InputValue>,
    #[serde(rename = "type")]
    ty: TypeRefJson,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InputValue {
    name: String,
    #[serde(rename = "type")]
    ty: TypeRefJson,
    #[serde(default)]
    default_value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EnumValue {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypeRefJson {
    kind: String,
    name: Option<String>,
    of_type: Option<Box<TypeRefJson>>,
}

/// Parses an introspection JSON document into a [`SchemaModel`].
pub fn parse_introspection(json: &str) -> Result<SchemaModel> {
    let envelope: Envelope = serde_json::from_str(json)
        .map_err(|e| SchemaError::InvalidIntrospection(e.to_string()))?;

    let schema = envelope
        .data
        .and_then(|d| d.schema)
        .or(envelope.schema)
        .ok_or_else(|| SchemaError::InvalidIntrospection("missing __schema".to_string()))?;

    let roots = RootTypes {
        query: schema.query_type.map(|r| Arc::from(r.name.as_str())),
        mutation: schema.mutation_type.map(|r| Arc::from(r.name.as_str())),
        subscription: schema.subscription_type.map(|r| Arc::from(r.name.as_str())),
    };

    let mut defs = Vec::with_capacity(schema.types.len());
    for ty in schema.types {
        let Some(name) = ty.name.as_deref() else {
            continue;
        };
        // Introspection meta types carry no user-facing declarations.
        if name.starts_with("__") {
            continue;
        }
        defs.push(convert_type_def(&ty, name)?);
    }

    Ok(SchemaModel::new(defs, roots))
}

fn convert_type_def(ty: &Type, name: &str) -> Result<TypeDef> {
    let name: Arc<str> = Arc::from(name);
    let def = match ty.kind.as_str() {
        "SCALAR" => TypeDef::Scalar(ScalarDef { name }),
        "ENUM" => TypeDef::Enum(EnumDef {
            name,
            values: ty
                .enum_values
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|v| Arc::from(v.name.as_str()))
                .collect(),
        }),
        "OBJECT" => TypeDef::Object(ObjectDef {
            name,
            fields: convert_fields(ty)?,
            implements: named_refs(ty.interfaces.as_deref())?,
        }),
        "INTERFACE" => TypeDef::Interface(InterfaceDef {
            name,
            fields: convert_fields(ty)?,
            implements: named_refs(ty.interfaces.as_deref())?,
        }),
        "UNION" => TypeDef::Union(UnionDef {
            name,
            members: named_refs(ty.possible_types.as_deref())?,
        }),
        "INPUT_OBJECT" => TypeDef::InputObject(InputObjectDef {
            name,
            fields: ty
                .input_fields
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|f| {
                    Ok(InputFieldDef {
                        name: Arc::from(f.name.as_str()),
                        ty: convert_type_ref(&f.ty)?,
                        default_value: f.default_value.as_deref().map(Arc::from),
                    })
                })
                .collect::<Result<_>>()?,
        }),
        other => {
            return Err(SchemaError::InvalidIntrospection(format!(
                "unknown type kind {other:?} for type {name}"
            )));
        }
    };
    Ok(def)
}

fn convert_fields(ty: &Type) -> Result<Vec<FieldDef>> {
    ty.fields
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|f| {
            Ok(FieldDef {
                name: Arc::from(f.name.as_str()),
                ty: convert_type_ref(&f.ty)?,
                args: f
                    .args
                    .iter()
                    .map(|a| {
                        Ok(ArgumentDef {
                            name: Arc::from(a.name.as_str()),
                            ty: convert_type_ref(&a.ty)?,
                            default_value: a.default_value.as_deref().map(Arc::from),
                        })
                    })
                    .collect::<Result<_>>()?,
            })
        })
        .collect()
}

fn named_refs(refs: Option<&[TypeRefJson]>) -> Result<Vec<Arc<str>>> {
    refs.unwrap_or_default()
        .iter()
        .map(|r| {
            r.name
                .as_deref()
                .map(Arc::from)
                .ok_or_else(|| SchemaError::InvalidIntrospection("unnamed type reference".to_string()))
        })
        .collect()
}

fn convert_type_ref(ty: &TypeRefJson) -> Result<TypeRef> {
    match ty.kind.as_str() {
        "NON_NULL" => {
            let inner = ty.of_type.as_deref().ok_or_else(|| {
                SchemaError::InvalidIntrospection("NON_NULL with no ofType".to_string())
            })?;
            Ok(TypeRef::non_null(convert_type_ref(inner)?))
        }
        "LIST" => {
            let inner = ty.of_type.as_deref().ok_or_else(|| {
                SchemaError::InvalidIntrospection("LIST with no ofType".to_string())
            })?;
            Ok(TypeRef::list(convert_type_ref(inner)?))
        }
        _ => ty
            .name
            .as_deref()
            .map(TypeRef::named)
            .ok_or_else(|| SchemaError::InvalidIntrospection("unnamed type reference".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r##"{
      "data": {
        "__schema": {
          "queryType": { "name": "Query" },
          "mutationType": null,
          "subscriptionType": null,
          "types": [
            {
              "kind": "OBJECT",
              "name": "Query",
              "fields": [
                {
                  "name": "getUser",
                  "args": [
                    {
                      "name": "id",
                      "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } },
                      "defaultValue": null
                    }
                  ],
                  "type": { "kind": "OBJECT", "name": "User", "ofType": null }
                }
              ],
              "interfaces": []
            },
            {
              "kind": "OBJECT",
              "name": "User",
              "fields": [
                { "name": "id", "args": [], "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } } },
                { "name": "friends", "args": [], "type": { "kind": "LIST", "name": null, "ofType": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "OBJECT", "name": "User", "ofType": null } } } }
              ],
              "interfaces": []
            },
            { "kind": "SCALAR", "name": "ID" },
            { "kind": "SCALAR", "name": "__Nope" }
          ]
        }
      }
    }"##;

    #[test]
    fn parses_envelope_document() {
        let model = parse_introspection(DOC).unwrap();
        assert_eq!(model.query_root().unwrap().name().as_ref(), "Query");
        assert!(model.contains("User"));
        assert!(!model.contains("__Nope"));

        let Some(TypeDef::Object(user)) = model.type_def("User") else {
            panic!("expected object type");
        };
        assert_eq!(user.fields[1].ty.to_string(), "[User!]");
    }

    #[test]
    fn parses_bare_schema_document() {
        let bare = r#"{ "__schema": { "queryType": null, "mutationType": null, "subscriptionType": null, "types": [] } }"#;
        let model = parse_introspection(bare).unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn missing_schema_key_is_invalid() {
        let err = parse_introspection("{}").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidIntrospection(_)));
    }
}
