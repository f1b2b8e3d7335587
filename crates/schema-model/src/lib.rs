//! Read-only model of a GraphQL type system.
//!
//! This crate is the type-reference layer the scaffolding engine traverses:
//! named type definitions as an explicit sum type, recursive list/non-null
//! wrappers, root operation types, and a polymorphism index (interface name
//! to concrete implementers).
//!
//! Two adapters produce the model: [`sdl::parse_sdl`] for schema text and
//! [`introspection::parse_introspection`] for introspection JSON, plus the
//! file-level [`loader`] that picks between them. All defensive handling of
//! malformed sources lives here; downstream traversal code can assume a
//! well-typed model.

mod error;
mod model;

pub mod introspection;
pub mod loader;
pub mod sdl;

pub use error::{Result, SchemaError};
pub use model::{
    is_builtin_scalar, ArgumentDef, EnumDef, FieldDef, InputFieldDef, InputObjectDef,
    InterfaceDef, ObjectDef, RootTypes, ScalarDef, SchemaModel, TypeDef, TypeDefKind, TypeRef,
    UnionDef,
};
