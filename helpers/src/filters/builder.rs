//! Filter builder
//!
//! Turns request arguments into predicates on a [`SelectQuery`] according to a
//! [`FilterConfig`]. Construction is pure; nothing touches the database until
//! the query is executed.

use serde_json::Value;

use super::arguments::{Arguments, present_argument};
use super::error::FilterError;
use super::types::{FieldConfig, FilterConfig, FilterEntry, Lookup};
use crate::data::query::{Column, CompareOp, Join, MatchAnchor, Predicate, SelectQuery, SqlValue};

/// Build the predicate applying `lookup` between `column` and `value`
///
/// `in`/`not_in` require an array; every other lookup requires a scalar.
/// `is_null`/`is_not_null` ignore the value.
pub fn build_predicate(
    column: &Column,
    value: &Value,
    lookup: Lookup,
) -> Result<Predicate, FilterError> {
    let predicate = match lookup {
        Lookup::Eq => compare_or_null(column, value, lookup, CompareOp::Eq)?,
        Lookup::Ne => compare_or_null(column, value, lookup, CompareOp::Ne)?,
        Lookup::Lt => compare(column, value, lookup, CompareOp::Lt)?,
        Lookup::Le => compare(column, value, lookup, CompareOp::Le)?,
        Lookup::Gt => compare(column, value, lookup, CompareOp::Gt)?,
        Lookup::Ge => compare(column, value, lookup, CompareOp::Ge)?,
        Lookup::Like => pattern(column, value, lookup, MatchAnchor::Anywhere, false)?,
        Lookup::Ilike => pattern(column, value, lookup, MatchAnchor::Anywhere, true)?,
        Lookup::Starts => pattern(column, value, lookup, MatchAnchor::Start, false)?,
        Lookup::Ends => pattern(column, value, lookup, MatchAnchor::End, false)?,
        Lookup::Istarts => pattern(column, value, lookup, MatchAnchor::Start, true)?,
        Lookup::Iends => pattern(column, value, lookup, MatchAnchor::End, true)?,
        Lookup::In => Predicate::InList {
            column: column.clone(),
            values: list(value, lookup)?,
            negated: false,
        },
        Lookup::NotIn => Predicate::InList {
            column: column.clone(),
            values: list(value, lookup)?,
            negated: true,
        },
        Lookup::Contains => Predicate::Contains {
            column: column.clone(),
            value: scalar(value, lookup)?,
        },
        Lookup::IsNull => Predicate::IsNull {
            column: column.clone(),
            negated: false,
        },
        Lookup::IsNotNull => Predicate::IsNull {
            column: column.clone(),
            negated: true,
        },
    };
    Ok(predicate)
}

/// [`build_predicate`] with the lookup given by name, e.g. `"not_in"`
pub fn build_predicate_str(
    column: &Column,
    value: &Value,
    lookup: &str,
) -> Result<Predicate, FilterError> {
    build_predicate(column, value, lookup.parse()?)
}

/// Apply the configured filters for every present argument to `base`
///
/// Keys are visited in configuration order. A key whose argument is missing or
/// falsy adds nothing. Alternatives for one key are OR-combined into a single
/// predicate. Each target in `joins` is inner-joined, `ignore_deleted` excludes
/// soft-deleted rows, and the result is distinct by primary key.
pub fn build_filtered_query(
    base: SelectQuery,
    arguments: &Arguments,
    config: &FilterConfig,
    joins: &[Join],
    ignore_deleted: bool,
) -> Result<SelectQuery, FilterError> {
    let mut predicates = Vec::new();

    for (key, entry) in config.iter() {
        let Some(value) = present_argument(arguments, key) else {
            tracing::trace!(key, "Filter argument absent, skipping");
            continue;
        };

        match entry {
            FilterEntry::Single(field) => predicates.push(field_predicate(field, value)?),
            FilterEntry::Alternatives(fields) => {
                let alternatives = fields
                    .iter()
                    .map(|field| field_predicate(field, value))
                    .collect::<Result<Vec<_>, _>>()?;
                if alternatives.is_empty() {
                    tracing::trace!(key, "Empty alternatives, skipping");
                    continue;
                }
                predicates.push(Predicate::Or(alternatives));
            }
        }
    }

    let mut query = joins.iter().cloned().fold(base, SelectQuery::join);

    if ignore_deleted {
        predicates.push(Predicate::Compare {
            column: query.entity().deleted_column(),
            op: CompareOp::Eq,
            value: SqlValue::Bool(false),
        });
    }

    tracing::debug!(
        table = %query.entity().table,
        predicates = predicates.len(),
        joins = joins.len(),
        ignore_deleted,
        "Built filtered query"
    );

    query = query.filter_all(predicates).distinct_by_id();
    Ok(query)
}

fn field_predicate(field: &FieldConfig, value: &Value) -> Result<Predicate, FilterError> {
    let predicate = build_predicate(&field.column, value, field.lookup)?;
    Ok(match &field.wrapper {
        Some(wrapper) => wrapper.apply(predicate),
        None => predicate,
    })
}

fn scalar(value: &Value, lookup: Lookup) -> Result<SqlValue, FilterError> {
    SqlValue::from_json(value).ok_or(FilterError::ExpectedScalar { lookup })
}

fn list(value: &Value, lookup: Lookup) -> Result<Vec<SqlValue>, FilterError> {
    let Value::Array(items) = value else {
        return Err(FilterError::ExpectedList { lookup });
    };
    items.iter().map(|item| scalar(item, lookup)).collect()
}

fn compare(
    column: &Column,
    value: &Value,
    lookup: Lookup,
    op: CompareOp,
) -> Result<Predicate, FilterError> {
    Ok(Predicate::Compare {
        column: column.clone(),
        op,
        value: scalar(value, lookup)?,
    })
}

/// Equality against `null` means a nullity test in SQL
fn compare_or_null(
    column: &Column,
    value: &Value,
    lookup: Lookup,
    op: CompareOp,
) -> Result<Predicate, FilterError> {
    if value.is_null() {
        return Ok(Predicate::IsNull {
            column: column.clone(),
            negated: op == CompareOp::Ne,
        });
    }
    compare(column, value, lookup, op)
}

fn pattern(
    column: &Column,
    value: &Value,
    lookup: Lookup,
    anchor: MatchAnchor,
    case_insensitive: bool,
) -> Result<Predicate, FilterError> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            return Err(FilterError::ExpectedScalar { lookup });
        }
    };
    Ok(Predicate::Match {
        column: column.clone(),
        value: text,
        anchor,
        case_insensitive,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::query::SqlParams;
    use crate::data::sql::SqliteDialect;
    use crate::data::{QueryExecutor, SqliteExecutor};
    use crate::filters::{Relation, Wrapper};
    use crate::test_support::{people, people_executor, row_ids};

    fn col(name: &str) -> Column {
        people().column(name)
    }

    fn args(value: Value) -> Arguments {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    /// Ids of people matching one field filter on `value`
    async fn matching(
        executor: &SqliteExecutor,
        column: &str,
        lookup: Lookup,
        value: Value,
    ) -> Vec<i64> {
        let config = FilterConfig::new().field("v", FieldConfig::new(col(column)).lookup(lookup));
        let query = build_filtered_query(
            SelectQuery::new(people()),
            &args(json!({ "v": value })),
            &config,
            &[],
            false,
        )
        .unwrap();
        row_ids(executor, query).await
    }

    /// Assert each `(column, lookup, value, expected ids)` case against the fixture
    async fn assert_lookups(cases: Vec<(&str, Lookup, Value, Vec<i64>)>) {
        let executor = people_executor().await;
        for (column, lookup, value, expected) in cases {
            let context = format!("{column} {lookup} {value}");
            let ids = matching(&executor, column, lookup, value).await;
            assert_eq!(ids, expected, "{context}");
        }
    }

    #[tokio::test]
    async fn comparison_lookups() {
        assert_lookups(vec![
            ("name", Lookup::Eq, json!("Alice"), vec![1]),
            ("name", Lookup::Ne, json!("Alice"), vec![2, 3, 4, 5]),
            ("age", Lookup::Lt, json!(27), vec![2]),
            ("age", Lookup::Le, json!(27), vec![2, 4]),
            ("age", Lookup::Gt, json!(41), vec![3]),
            ("age", Lookup::Ge, json!(41), vec![3, 5]),
        ])
        .await;
    }

    #[tokio::test]
    async fn substring_lookups() {
        assert_lookups(vec![
            ("name", Lookup::Like, json!("lic"), vec![1, 5]),
            ("name", Lookup::Like, json!("Ali"), vec![1]),
            ("name", Lookup::Ilike, json!("ALI"), vec![1, 5]),
        ])
        .await;
    }

    #[tokio::test]
    async fn anchored_lookups() {
        assert_lookups(vec![
            ("name", Lookup::Starts, json!("al"), vec![5]),
            ("name", Lookup::Istarts, json!("al"), vec![1, 5]),
            ("name", Lookup::Ends, json!("ce"), vec![1]),
            ("name", Lookup::Ends, json!("CE"), vec![]),
            ("name", Lookup::Iends, json!("OB"), vec![2]),
        ])
        .await;
    }

    #[tokio::test]
    async fn pattern_metacharacters_match_literally() {
        assert_lookups(vec![
            ("name", Lookup::Like, json!("a%e"), vec![]),
            ("name", Lookup::Like, json!("b_b"), vec![]),
            ("name", Lookup::Like, json!("*"), vec![]),
            ("name", Lookup::Ilike, json!("a%e"), vec![]),
            ("name", Lookup::Ilike, json!("b_b"), vec![]),
            ("name", Lookup::Ilike, json!("*"), vec![]),
            ("name", Lookup::Starts, json!("[A]"), vec![]),
        ])
        .await;
    }

    #[tokio::test]
    async fn membership_lookups() {
        assert_lookups(vec![
            ("id", Lookup::In, json!([1, 3, 9]), vec![1, 3]),
            ("id", Lookup::NotIn, json!([1, 3]), vec![2, 4, 5]),
            ("tags", Lookup::Contains, json!("staff"), vec![1, 2, 5]),
        ])
        .await;
    }

    #[tokio::test]
    async fn nullity_lookups_ignore_value() {
        assert_lookups(vec![
            ("email", Lookup::IsNull, json!(true), vec![2, 5]),
            ("email", Lookup::IsNotNull, json!("anything"), vec![1, 3, 4]),
        ])
        .await;
    }

    #[test]
    fn eq_null_is_a_nullity_test() {
        let column = col("email");
        assert_eq!(
            build_predicate(&column, &Value::Null, Lookup::Eq).unwrap(),
            Predicate::IsNull {
                column: column.clone(),
                negated: false
            }
        );
        assert_eq!(
            build_predicate(&column, &Value::Null, Lookup::Ne).unwrap(),
            Predicate::IsNull {
                column,
                negated: true
            }
        );
    }

    #[test]
    fn numbers_are_matched_as_text() {
        let predicate = build_predicate(&col("name"), &json!(42), Lookup::Istarts).unwrap();
        match predicate {
            Predicate::Match { value, .. } => assert_eq!(value, "42"),
            other => panic!("expected a pattern match, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_lookup_name() {
        assert_eq!(
            build_predicate_str(&col("age"), &json!(1), "between"),
            Err(FilterError::UnsupportedLookup("between".to_string()))
        );
        let not_in = build_predicate_str(&col("id"), &json!([1]), "not_in");
        assert!(not_in.is_ok());
    }

    #[test]
    fn membership_requires_list() {
        assert_eq!(
            build_predicate(&col("id"), &json!(1), Lookup::In),
            Err(FilterError::ExpectedList { lookup: Lookup::In })
        );
        assert_eq!(
            build_predicate(&col("id"), &json!([[1]]), Lookup::NotIn),
            Err(FilterError::ExpectedScalar {
                lookup: Lookup::NotIn
            })
        );
    }

    #[test]
    fn scalar_lookups_reject_collections() {
        assert_eq!(
            build_predicate(&col("age"), &json!([30]), Lookup::Gt),
            Err(FilterError::ExpectedScalar { lookup: Lookup::Gt })
        );
        assert_eq!(
            build_predicate(&col("name"), &json!({"a": 1}), Lookup::Like),
            Err(FilterError::ExpectedScalar {
                lookup: Lookup::Like
            })
        );
    }

    #[test]
    fn absent_arguments_leave_query_unchanged() {
        let config = FilterConfig::new()
            .field("name", FieldConfig::new(col("name")))
            .field("age", FieldConfig::new(col("age")).lookup(Lookup::Ge))
            .field("ids", FieldConfig::new(col("id")).lookup(Lookup::In))
            .field("flag", FieldConfig::new(col("deleted")));
        let base = SelectQuery::new(people());

        for arguments in [
            json!({}),
            json!({"name": "", "age": 0, "ids": [], "flag": false}),
            json!({"name": null, "other": "ignored"}),
        ] {
            let query =
                build_filtered_query(base.clone(), &args(arguments), &config, &[], false).unwrap();
            assert!(query.predicates().is_empty());
            assert_eq!(query.to_sql(&SqliteDialect), base.to_sql(&SqliteDialect));
        }
    }

    #[test]
    fn predicates_follow_config_order() {
        let config = FilterConfig::new()
            .field("b", FieldConfig::new(col("age")).lookup(Lookup::Gt))
            .field("a", FieldConfig::new(col("name")));
        let query = build_filtered_query(
            SelectQuery::new(people()),
            &args(json!({"a": "Alice", "b": 18})),
            &config,
            &[],
            true,
        )
        .unwrap();

        let (sql, params) = query.to_sql(&SqliteDialect);
        assert_eq!(
            sql,
            "SELECT people.* FROM people WHERE people.age > ? AND people.name = ? AND people.deleted = ?"
        );
        assert_eq!(
            params,
            SqlParams {
                values: vec![SqlValue::Int(18), "Alice".into(), SqlValue::Bool(false)]
            }
        );
        assert!(query.is_distinct());
    }

    #[test]
    fn empty_alternatives_are_skipped() {
        let config = FilterConfig::new().field("q", Vec::<FieldConfig>::new());
        let query = build_filtered_query(
            SelectQuery::new(people()),
            &args(json!({"q": "x"})),
            &config,
            &[],
            false,
        )
        .unwrap();
        assert!(query.predicates().is_empty());
    }

    #[test]
    fn errors_propagate_from_fields() {
        let config =
            FilterConfig::new().field("ids", FieldConfig::new(col("id")).lookup(Lookup::In));
        let err = build_filtered_query(
            SelectQuery::new(people()),
            &args(json!({"ids": 3})),
            &config,
            &[],
            false,
        )
        .unwrap_err();
        assert_eq!(err, FilterError::ExpectedList { lookup: Lookup::In });
    }

    #[tokio::test]
    async fn alternatives_are_or_combined() {
        let executor = people_executor().await;
        let config = FilterConfig::new().field(
            "q",
            vec![
                FieldConfig::new(col("name")).lookup(Lookup::Ilike),
                FieldConfig::new(col("email")).lookup(Lookup::Ilike),
            ],
        );

        for (q, expected) in [
            ("example.org", vec![3]),
            ("ali", vec![1, 5]),
            ("ROL", vec![3]),
        ] {
            let query = build_filtered_query(
                SelectQuery::new(people()),
                &args(json!({ "q": q })),
                &config,
                &[],
                false,
            )
            .unwrap();
            assert_eq!(query.predicates().len(), 1);
            assert_eq!(row_ids(&executor, query).await, expected, "q = {q}");
        }
    }

    #[tokio::test]
    async fn or_group_stays_grouped_beside_other_filters() {
        let executor = people_executor().await;
        let config = FilterConfig::new()
            .field(
                "q",
                vec![
                    FieldConfig::new(col("name")).lookup(Lookup::Ilike),
                    FieldConfig::new(col("email")).lookup(Lookup::Ilike),
                ],
            )
            .field("min_age", FieldConfig::new(col("age")).lookup(Lookup::Ge));
        let query = build_filtered_query(
            SelectQuery::new(people()),
            &args(json!({"q": "ali", "min_age": 40})),
            &config,
            &[],
            true,
        )
        .unwrap();

        let (sql, params) = query.to_sql(&SqliteDialect);
        assert_eq!(
            sql,
            r"SELECT people.* FROM people WHERE (people.name LIKE ? ESCAPE '\' OR people.email LIKE ? ESCAPE '\') AND people.age >= ? AND people.deleted = ?"
        );
        assert_eq!(
            params.values,
            vec![
                SqlValue::Text("%ali%".to_string()),
                SqlValue::Text("%ali%".to_string()),
                SqlValue::Int(40),
                SqlValue::Bool(false),
            ]
        );
        // Alice matches the group but is younger than 40
        assert_eq!(row_ids(&executor, query).await, vec![5]);
    }

    #[tokio::test]
    async fn alternatives_carry_their_own_wrapper() {
        let executor = people_executor().await;
        let pets = Relation::one_to_many(
            "pets",
            Column::new("pets", "owner_id"),
            people().id_column(),
        );
        let name = FieldConfig::new(col("name")).lookup(Lookup::Ilike);
        let pet_kind = FieldConfig::new(Column::new("pets", "kind")).wrapper(pets.any());
        let config = FilterConfig::new().field("q", vec![name, pet_kind]);
        let query = |q: &str| {
            build_filtered_query(
                SelectQuery::new(people()),
                &args(json!({ "q": q })),
                &config,
                &[],
                false,
            )
            .unwrap()
        };

        let (sql, _) = query("cat").to_sql(&SqliteDialect);
        assert_eq!(
            sql,
            r"SELECT people.* FROM people WHERE (people.name LIKE ? ESCAPE '\' OR EXISTS (SELECT 1 FROM pets AS pets_r1 WHERE pets_r1.owner_id = people.id AND pets_r1.kind = ?))"
        );
        for (q, expected) in [
            ("cat", vec![1, 4]),
            ("dog", vec![1, 3]),
            ("ali", vec![1, 5]),
        ] {
            assert_eq!(row_ids(&executor, query(q)).await, expected, "q = {q}");
        }
    }

    #[tokio::test]
    async fn ignore_deleted_excludes_soft_deleted_rows() {
        let executor = people_executor().await;
        let query = build_filtered_query(
            SelectQuery::new(people()),
            &Arguments::new(),
            &FilterConfig::new(),
            &[],
            true,
        )
        .unwrap();
        assert_eq!(row_ids(&executor, query).await, vec![1, 2, 3, 5]);
    }

    #[tokio::test]
    async fn relation_wrapper_filters_parents() {
        let executor = people_executor().await;
        let pets = Relation::one_to_many(
            "pets",
            Column::new("pets", "owner_id"),
            people().id_column(),
        );
        let kind = Column::new("pets", "kind");
        let config = FilterConfig::new()
            .field("pet", FieldConfig::new(kind.clone()).wrapper(pets.any()))
            .field(
                "no_pet",
                FieldConfig::new(kind).wrapper(Wrapper::new(move |p| !pets.exists(p))),
            );

        let query = |arguments: Value, ignore_deleted: bool| {
            build_filtered_query(
                SelectQuery::new(people()),
                &args(arguments),
                &config,
                &[],
                ignore_deleted,
            )
            .unwrap()
        };

        let cat_owners = row_ids(&executor, query(json!({"pet": "cat"}), false)).await;
        assert_eq!(cat_owners, vec![1, 4]);
        let live_cat_owners = row_ids(&executor, query(json!({"pet": "cat"}), true)).await;
        assert_eq!(live_cat_owners, vec![1]);
        assert_eq!(
            row_ids(&executor, query(json!({"no_pet": "dog"}), false)).await,
            vec![2, 4, 5]
        );
    }

    #[tokio::test]
    async fn joins_count_each_parent_once() {
        let executor = people_executor().await;
        let config = FilterConfig::new().field(
            "kinds",
            FieldConfig::new(Column::new("pets", "kind")).lookup(Lookup::In),
        );
        let joins = [Join::inner(
            "pets",
            Column::new("pets", "owner_id"),
            people().id_column(),
        )];
        let query = build_filtered_query(
            SelectQuery::new(people()),
            &args(json!({"kinds": ["cat", "dog"]})),
            &config,
            &joins,
            false,
        )
        .unwrap();

        assert_eq!(executor.count(&query).await.unwrap(), 3);
        assert_eq!(row_ids(&executor, query).await, vec![1, 3, 4]);
    }
}
