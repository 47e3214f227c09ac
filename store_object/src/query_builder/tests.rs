//! Query builder utilities
//!
//! This module provides SQL query construction utilities.

#[cfg(test)]
mod tests {
    use crate::marker::MarkerStrategy;
    use crate::query_builder::{QueryBuilder, QueryFilter, SortOrder, UpdateSet};
    use serde_json::json;

    const MARKER: MarkerStrategy = MarkerStrategy::ActiveFlag {
        field: "is_not_deleted",
    };

    // ========================================
    // Scope composition
    // ========================================

    #[test]
    fn test_default_visibility_excludes_deleted_rows() {
        let builder = QueryBuilder::new();
        let (where_clause, _, _, values) = builder.build_scoped(&MARKER);

        assert_eq!(where_clause, "WHERE is_not_deleted IS TRUE");
        assert!(values.is_empty());
    }

    #[test]
    fn test_scope_composes_before_user_conditions() {
        let builder = QueryBuilder::new().filter(QueryFilter::eq("title", json!("widget")));
        let (where_clause, _, _, values) = builder.build_scoped(&MARKER);

        assert_eq!(
            where_clause,
            "WHERE is_not_deleted IS TRUE AND title = $1"
        );
        assert_eq!(values, vec![json!("widget")]);
    }

    #[test]
    fn test_deleted_only_visibility() {
        let builder = QueryBuilder::new().deleted_only();
        let (where_clause, _, _, _) = builder.build_scoped(&MARKER);

        assert_eq!(where_clause, "WHERE is_not_deleted IS NOT TRUE");
    }

    #[test]
    fn test_unscoped_visibility_leaves_conditions_alone() {
        let builder = QueryBuilder::new()
            .ignoring_soft_deletion()
            .filter(QueryFilter::gt("id", json!(10)));
        let (where_clause, _, _, values) = builder.build_scoped(&MARKER);

        assert_eq!(where_clause, "WHERE id > $1");
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_unscoped_visibility_without_conditions_builds_no_where() {
        let builder = QueryBuilder::new().ignoring_soft_deletion();
        let (where_clause, _, _, values) = builder.build_scoped(&MARKER);

        assert_eq!(where_clause, "");
        assert!(values.is_empty());
    }

    #[test]
    fn test_scope_does_not_shift_parameter_numbers() {
        // The scope predicate is constant SQL; user placeholders start at $1
        // whether or not it is present.
        let builder = QueryBuilder::new().filters(vec![
            QueryFilter::eq("title", json!("widget")),
            QueryFilter::gte("id", json!(5)),
        ]);

        let (scoped, _, _, scoped_values) = builder.clone().build_scoped(&MARKER);
        let (unscoped, unscoped_values) = builder.build_where_clause();

        assert!(scoped.contains("title = $1"));
        assert!(scoped.contains("id >= $2"));
        assert!(unscoped.contains("title = $1"));
        assert!(unscoped.contains("id >= $2"));
        assert_eq!(scoped_values, unscoped_values);
    }

    #[test]
    fn test_both_marker_variants_compose() {
        let deleted_flag = MarkerStrategy::DeletedFlag { field: "is_deleted" };
        let (where_clause, _, _, _) = QueryBuilder::new().build_scoped(&deleted_flag);
        assert_eq!(where_clause, "WHERE is_deleted = FALSE");
    }

    // ========================================
    // QueryFilter edge cases
    // ========================================

    #[test]
    fn test_query_filter_null_handling() {
        let filter = QueryFilter::is_null("deleted_at");
        assert!(matches!(filter, QueryFilter::Condition(_)));

        let filter = QueryFilter::is_not_null("deleted_at");
        assert!(matches!(filter, QueryFilter::Condition(_)));
    }

    #[test]
    fn test_empty_in_clause_matches_nothing() {
        let builder = QueryBuilder::new().filter(QueryFilter::in_values("id", vec![]));
        let (where_clause, values) = builder.build_where_clause();

        assert_eq!(where_clause, "WHERE 1=0");
        assert!(values.is_empty());
    }

    #[test]
    fn test_empty_not_in_clause_matches_everything() {
        let builder = QueryBuilder::new().filter(QueryFilter::not_in_values("id", vec![]));
        let (where_clause, _) = builder.build_where_clause();

        assert_eq!(where_clause, "WHERE 1=1");
    }

    #[test]
    fn test_in_clause_numbers_each_element() {
        let builder = QueryBuilder::new().filter(QueryFilter::in_values(
            "id",
            vec![json!(1), json!(2), json!(3)],
        ));
        let (where_clause, values) = builder.build_where_clause();

        assert_eq!(where_clause, "WHERE id IN ($1, $2, $3)");
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_nested_groups() {
        let filter = QueryFilter::and(vec![
            QueryFilter::eq("state", json!("open")),
            QueryFilter::or(vec![
                QueryFilter::eq("priority", json!("high")),
                QueryFilter::eq("priority", json!("urgent")),
            ]),
        ]);
        let builder = QueryBuilder::new().filter(filter);
        let (where_clause, values) = builder.build_where_clause();

        assert_eq!(
            where_clause,
            "WHERE (state = $1 AND (priority = $2 OR priority = $3))"
        );
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_special_characters_stay_in_bind_values() {
        let builder = QueryBuilder::new()
            .filter(QueryFilter::eq("title", json!("'; DROP TABLE products; --")));
        let (where_clause, values) = builder.build_where_clause();

        assert_eq!(where_clause, "WHERE title = $1");
        assert_eq!(values[0], json!("'; DROP TABLE products; --"));
    }

    // ========================================
    // Ordering and pagination
    // ========================================

    #[test]
    fn test_order_and_limit_clauses() {
        let builder = QueryBuilder::new()
            .order_by("deleted_at", SortOrder::Desc)
            .order_by("id", SortOrder::Asc)
            .limit(25)
            .offset(50);

        assert_eq!(
            builder.build_order_clause(),
            "ORDER BY deleted_at DESC, id ASC"
        );
        assert_eq!(builder.build_limit_clause(), "LIMIT 25 OFFSET 50");
    }

    // ========================================
    // UpdateSet
    // ========================================

    #[test]
    fn test_update_set_sql_is_deterministic() {
        let set = UpdateSet::new()
            .set("title", json!("renamed"))
            .decrement("comments_count", json!(1));
        let (clause, values) = set.to_sql(1);

        assert_eq!(
            clause,
            "comments_count = comments_count - $1, title = $2"
        );
        assert_eq!(values, vec![json!(1), json!("renamed")]);
    }

    #[test]
    fn test_update_set_respects_first_param_offset() {
        let set = UpdateSet::new().increment("views", json!(2));
        let (clause, values) = set.to_sql(4);

        assert_eq!(clause, "views = views + $4");
        assert_eq!(values, vec![json!(2)]);
    }
}
