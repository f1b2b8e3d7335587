//! Per-operation scaffolding over a GraphQL schema model.
//!
//! For each root operation field the engine computes the minimal type
//! closure, renders a self-contained pruned SDL, synthesizes a bounded
//! operation document with a variables skeleton, and builds a structural
//! return tree. Every step is a pure function of the schema model, the
//! field descriptor, and numeric limits, with deterministic output.

pub mod closure;
pub mod context;
pub mod document;
pub mod enumerate;
pub mod limits;
pub mod priority;
pub mod return_tree;
pub mod sdl;

pub use closure::compute_closure;
pub use context::{
    generate_artifacts, ArgumentMetadata, OperationArtifacts, OperationContext, OperationMetadata,
};
pub use document::{synthesize_document, SelectionDocument};
pub use enumerate::{enumerate_operations, OperationField, OperationKind};
pub use limits::{GenerateLimits, ReturnTreeLimits, SelectionLimits};
pub use priority::field_priority;
pub use return_tree::{synthesize_return_tree, CompositeKind, ReturnTree};
pub use sdl::synthesize_sdl;
