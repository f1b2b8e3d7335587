//! Field ordering shared by the document and return-tree synthesizers.

use graphql_schema_model::FieldDef;

/// Sort key for selecting which fields survive a width cap: id-like names
/// first, `name`-prefixed next, `__typename` last, everything else in a
/// fixed middle tier. Ties keep declaration order (stable sort).
#[must_use]
pub fn field_priority(name: &str) -> u32 {
    if name == "id" || name.ends_with("Id") || name.ends_with("ID") {
        0
    } else if name.starts_with("name") {
        1
    } else if name == "__typename" {
        9999
    } else {
        10
    }
}

/// Fields sorted by priority, declaration order breaking ties.
pub(crate) fn prioritized(fields: &[FieldDef]) -> Vec<&FieldDef> {
    let mut sorted: Vec<&FieldDef> = fields.iter().collect();
    sorted.sort_by_key(|f| field_priority(&f.name));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_like_names_sort_first() {
        assert_eq!(field_priority("id"), 0);
        assert_eq!(field_priority("userId"), 0);
        assert_eq!(field_priority("userID"), 0);
        assert!(field_priority("name") < field_priority("email"));
        assert!(field_priority("email") < field_priority("__typename"));
    }
}
