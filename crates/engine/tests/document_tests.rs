use apollo_compiler::{ExecutableDocument, Schema};
use graphql_scaffold_engine::{
    compute_closure, enumerate_operations, synthesize_document, synthesize_sdl, OperationField,
    SelectionLimits,
};
use graphql_schema_model::sdl::parse_sdl;
use graphql_schema_model::SchemaModel;

fn operation(schema: &SchemaModel, qualified: &str) -> OperationField {
    enumerate_operations(schema)
        .into_iter()
        .find(|o| o.qualified_name() == qualified)
        .unwrap()
}

#[test]
fn get_user_scenario() {
    let schema = parse_sdl(
        "type Query { getUser(id: ID!): User }\n\
         type User { id: ID! name: String friends: [User!] }",
    )
    .unwrap();
    let op = operation(&schema, "Query.getUser");
    let limits = SelectionLimits {
        depth: 1,
        max_fields: 20,
    };
    let doc = synthesize_document(&schema, &op, &limits);

    assert_eq!(
        doc.text,
        "query Query_getUser($id: ID!) {\n\
         \x20 getUser(id: $id) {\n\
         \x20   id\n\
         \x20   name\n\
         \x20   friends {\n\
         \x20     id\n\
         \x20     name\n\
         \x20   }\n\
         \x20 }\n\
         }\n"
    );
    assert_eq!(doc.variables_skeleton, serde_json::json!({ "id": "<ID>" }));
}

#[test]
fn union_return_emits_one_fragment_per_member() {
    let schema = parse_sdl(
        "type Ok { value: String }\n\
         type Err { message: String code: Int }\n\
         union Outcome = Ok | Err\n\
         type Query { attempt: Outcome }",
    )
    .unwrap();
    let op = operation(&schema, "Query.attempt");
    let limits = SelectionLimits {
        depth: 2,
        max_fields: 20,
    };
    let doc = synthesize_document(&schema, &op, &limits);

    assert!(doc.text.contains("... on Ok {"));
    assert!(doc.text.contains("... on Err {"));
    assert!(doc.text.contains("value"));
    assert!(doc.text.contains("message"));
}

const MATRIX_FIXTURE: &str = "\
interface Node { id: ID! }\n\
type User implements Node { id: ID! name: String status: Status friends: [User!] posts: [Post!]! root: Query }\n\
type Post implements Node { id: ID! title: String author: User }\n\
enum Status { ACTIVE BANNED }\n\
union Feed = User | Post\n\
input Filter { name: String limit: Int = 10 nested: Filter }\n\
type Query { getUser(id: ID!, filter: Filter): User feed: [Feed!] node(id: ID!): Node }\n\
type Mutation { setName(name: String): User }\n\
type Subscription { onPost: Post }";

/// Every depth/width combination must produce a document with zero
/// validation errors against its own pruned schema.
#[test]
fn documents_validate_at_every_truncation_point() {
    let schema = parse_sdl(MATRIX_FIXTURE).unwrap();
    for op in enumerate_operations(&schema) {
        let closure = compute_closure(&schema, &op);
        let sdl = synthesize_sdl(&schema, &op, &closure);
        let valid = Schema::parse_and_validate(&sdl, "pruned.graphql")
            .unwrap_or_else(|e| panic!("{}: invalid pruned schema: {e}", op.qualified_name()));

        for depth in [0, 1, 2, 3] {
            for max_fields in [1, 5, 20] {
                let limits = SelectionLimits { depth, max_fields };
                let doc = synthesize_document(&schema, &op, &limits);
                ExecutableDocument::parse_and_validate(&valid, &doc.text, "op.graphql")
                    .unwrap_or_else(|e| {
                        panic!(
                            "{} depth={depth} max={max_fields}: {e}\n{}",
                            op.qualified_name(),
                            doc.text
                        )
                    });
            }
        }
    }
}

#[test]
fn synthesis_is_deterministic() {
    let schema = parse_sdl(MATRIX_FIXTURE).unwrap();
    for op in enumerate_operations(&schema) {
        let closure_a = compute_closure(&schema, &op);
        let closure_b = compute_closure(&schema, &op);
        assert_eq!(closure_a, closure_b);
        assert_eq!(
            synthesize_sdl(&schema, &op, &closure_a),
            synthesize_sdl(&schema, &op, &closure_b)
        );
        let limits = SelectionLimits::default();
        assert_eq!(
            synthesize_document(&schema, &op, &limits),
            synthesize_document(&schema, &op, &limits)
        );
    }
}

#[test]
fn root_type_cycles_stay_valid_against_pruned_sdl() {
    // The pruned schema keeps only the selected field on the root type, so
    // a selection cycling back to it must not expand sibling root fields.
    let schema = parse_sdl(
        "type User { id: ID! root: Query }\n\
         type Query { me: User extra: String }",
    )
    .unwrap();
    let op = operation(&schema, "Query.me");

    let closure = compute_closure(&schema, &op);
    let sdl = synthesize_sdl(&schema, &op, &closure);
    let valid = Schema::parse_and_validate(&sdl, "pruned.graphql").unwrap();

    let doc = synthesize_document(
        &schema,
        &op,
        &SelectionLimits {
            depth: 2,
            max_fields: 20,
        },
    );
    assert!(doc.text.contains("root {\n      __typename\n    }"));
    assert!(!doc.text.contains("extra"));
    ExecutableDocument::parse_and_validate(&valid, &doc.text, "op.graphql").unwrap();
}

#[test]
fn depth_zero_never_emits_an_empty_selection() {
    let schema = parse_sdl(MATRIX_FIXTURE).unwrap();
    let op = operation(&schema, "Query.getUser");
    let doc = synthesize_document(
        &schema,
        &op,
        &SelectionLimits {
            depth: 0,
            max_fields: 20,
        },
    );
    assert!(!doc.text.contains("{ }"));
    assert!(!doc.text.contains("{\n  }"));
    assert!(doc.text.contains("id"));
}
