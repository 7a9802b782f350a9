use postsearch_core::filters::{FilterSet, PageLimits, SearchParams};
use postsearch_core::query_builder::{PlaceholderStyle, Projection, QueryPlan, SqlValue};
use postsearch_core::schema::{POSTS, TOP_USERS, USERS};
use postsearch_core::services::{apply_page, build_dynamic_query};
use proptest::prelude::*;

fn sortable_projections() -> [&'static Projection; 3] {
    [&POSTS, &USERS, &TOP_USERS]
}

fn limits_strategy() -> impl Strategy<Value = PageLimits> {
    (1_u32..200, 0_u32..200).prop_map(|(default_limit, extra)| PageLimits {
        default_limit,
        max_limit: default_limit + extra,
    })
}

/// Identifiers that are never on any allow-list
fn unlisted_column_strategy() -> impl Strategy<Value = String> {
    "[a-z_;' ]{1,24}".prop_filter("must not be allow-listed", |name| {
        sortable_projections()
            .iter()
            .all(|projection| projection.sortable_column(name).is_none())
    })
}

proptest! {
    /// Property: an unlisted ordering column always normalizes to the projection default
    #[test]
    fn unlisted_ordering_falls_back_to_default(column in unlisted_column_strategy()) {
        for projection in sortable_projections() {
            let params = SearchParams {
                order_by: Some(column.clone()),
                ..SearchParams::default()
            };
            let filters = FilterSet::normalize(&params, projection, PageLimits::default());
            prop_assert_eq!(filters.order_by, projection.default_order);

            let statement = apply_page(QueryPlan::select(projection), &filters)
                .build(PlaceholderStyle::Dollar)
                .unwrap();
            let expected_order = format!("ORDER BY {}", projection.default_order);
            prop_assert!(statement.sql.contains(&expected_order));
        }
    }

    /// Property: absent or non-positive limits become the default
    #[test]
    fn non_positive_limits_use_default(
        limit in prop::option::of(i64::MIN..=0),
        limits in limits_strategy(),
    ) {
        let params = SearchParams { limit, ..SearchParams::default() };
        let filters = FilterSet::normalize(&params, &POSTS, limits);
        prop_assert_eq!(filters.limit, limits.default_limit);
    }

    /// Property: limits above the maximum are clamped to it
    #[test]
    fn oversized_limits_are_clamped(extra in 1_i64..1_000_000, limits in limits_strategy()) {
        let params = SearchParams {
            limit: Some(i64::from(limits.max_limit) + extra),
            ..SearchParams::default()
        };
        let filters = FilterSet::normalize(&params, &POSTS, limits);
        prop_assert_eq!(filters.limit, limits.max_limit);
    }

    /// Property: the normalized limit is always within (0, max]
    #[test]
    fn limit_is_always_in_range(limit in any::<Option<i64>>(), limits in limits_strategy()) {
        let params = SearchParams { limit, ..SearchParams::default() };
        let filters = FilterSet::normalize(&params, &USERS, limits);
        prop_assert!(filters.limit > 0);
        prop_assert!(filters.limit <= limits.max_limit);
    }

    /// Property: degenerate page limits still produce a positive page size
    #[test]
    fn zero_configured_limits_stay_positive(
        limit in any::<Option<i64>>(),
        default_limit in 0_u32..3,
        max_limit in 0_u32..3,
    ) {
        let limits = PageLimits { default_limit, max_limit };
        let params = SearchParams { limit, ..SearchParams::default() };
        let filters = FilterSet::normalize(&params, &POSTS, limits);
        prop_assert!(filters.limit >= 1);
        prop_assert!(filters.limit <= max_limit.max(1));
    }

    /// Property: the offset is never negative and positive offsets pass through
    #[test]
    fn offsets_are_non_negative(offset in any::<Option<i32>>()) {
        let params = SearchParams { offset: offset.map(i64::from), ..SearchParams::default() };
        let filters = FilterSet::normalize(&params, &POSTS, PageLimits::default());
        let expected = offset.map_or(0, |offset| u32::try_from(offset).unwrap_or(0));
        prop_assert_eq!(filters.offset, expected);
    }

    /// Property: a text-only filter yields one OR-group and one pattern per search column
    #[test]
    fn free_text_binds_pattern_per_column(query in "[a-zA-Z0-9]{1,16}") {
        let params = SearchParams { query: Some(query.clone()), ..SearchParams::default() };
        let filters = FilterSet::normalize(&params, &POSTS, PageLimits::default());
        let plan = build_dynamic_query(QueryPlan::select(&POSTS), &filters).unwrap();
        prop_assert_eq!(plan.predicates().len(), 1);

        let statement = plan.build(PlaceholderStyle::Dollar).unwrap();
        let pattern = SqlValue::from(format!("%{query}%"));
        prop_assert_eq!(statement.params, vec![pattern.clone(), pattern]);
        prop_assert!(statement.sql.ends_with("WHERE (title LIKE $1 OR content LIKE $2)"));
    }

    /// Property: caller text only ever appears in bound parameters
    #[test]
    fn caller_text_is_never_inlined(query in "[a-z]{12,20}") {
        let params = SearchParams {
            query: Some(query.clone()),
            order_by: Some(query.clone()),
            order_dir: Some(query.clone()),
            ..SearchParams::default()
        };
        let filters = FilterSet::normalize(&params, &POSTS, PageLimits::default());
        let plan = build_dynamic_query(QueryPlan::select(&POSTS), &filters).unwrap();
        let statement = apply_page(plan, &filters).build(PlaceholderStyle::Question).unwrap();
        prop_assert!(!statement.sql.contains(&query));
    }
}
