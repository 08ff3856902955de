//! Query builder utilities
//!
//! Renders the typed fragments held by a [`StatementBuilder`] into MySQL text.
//! Every clause helper returns either an empty string or a fragment starting
//! with a single space, so statements are assembled by plain concatenation in
//! a fixed order per command.

use crate::errors::QueryError;
use crate::query_builder::builder::{Predicate, StatementBuilder, TableRef};
use crate::query_builder::escape::{escape_literal, quote_identifier};
use crate::query_builder::join::JoinClause;
use crate::query_builder::ordering::SortOrder;
use crate::query_builder::pagination::Pagination;
use crate::query_builder::update::UpdateAssignment;
use serde_json::Value;

pub struct SqlGenerator;

impl SqlGenerator {
    /// `SELECT <fields|*> FROM <tables><joins><where><group><having><order><limit>;`
    pub fn build_select(builder: &StatementBuilder) -> String {
        let fields = if builder.fields.is_empty() {
            "*".to_string()
        } else {
            builder.fields.join(", ")
        };

        let mut sql = String::with_capacity(128);
        sql.push_str("SELECT ");
        sql.push_str(&fields);
        sql.push_str(" FROM ");
        sql.push_str(&Self::build_table_list(&builder.tables));
        sql.push_str(&Self::build_join_clause(&builder.joins));
        sql.push_str(&Self::build_where_clause(
            &builder.or_groups,
            &builder.conditions,
        ));
        sql.push_str(&Self::build_group_by_clause(&builder.group_by));
        sql.push_str(&Self::build_having_clause(&builder.having));
        sql.push_str(&Self::build_order_clause(&builder.order_by));
        sql.push_str(&Self::build_limit_clause(builder.limit.as_ref()));
        sql.push(';');
        sql
    }

    /// `UPDATE <table><joins> SET <assignments><where><order><limit>;`
    pub fn build_update(builder: &StatementBuilder) -> Result<String, QueryError> {
        let assignments = Self::build_set_items(&builder.assignments);
        if assignments.is_empty() {
            let table = builder
                .primary_table()
                .map(|t| t.name.clone())
                .unwrap_or_default();
            return Err(QueryError::EmptyAssignments(table));
        }

        let mut sql = String::with_capacity(128);
        sql.push_str("UPDATE ");
        sql.push_str(&Self::build_table_list(&builder.tables));
        sql.push_str(&Self::build_join_clause(&builder.joins));
        sql.push_str(" SET ");
        sql.push_str(&assignments.join(", "));
        sql.push_str(&Self::build_where_clause(
            &builder.or_groups,
            &builder.conditions,
        ));
        sql.push_str(&Self::build_order_clause(&builder.order_by));
        sql.push_str(&Self::build_limit_clause(builder.limit.as_ref()));
        sql.push(';');
        Ok(sql)
    }

    /// `INSERT [IGNORE ]INTO <table> (<cols>) VALUES (<vals>)[, ...][ ON DUPLICATE KEY UPDATE ...];`
    pub fn build_insert(builder: &StatementBuilder) -> String {
        let table = builder
            .primary_table()
            .map(|t| quote_identifier(&t.name))
            .unwrap_or_default();
        let columns = builder
            .columns
            .iter()
            .map(|c| quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");
        let tuples = if builder.rows.is_empty() {
            "()".to_string()
        } else {
            builder
                .rows
                .iter()
                .map(|row| Self::build_tuple(row))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = String::with_capacity(128);
        sql.push_str("INSERT ");
        if builder.ignore {
            sql.push_str("IGNORE ");
        }
        sql.push_str("INTO ");
        sql.push_str(&table);
        sql.push_str(" (");
        sql.push_str(&columns);
        sql.push_str(") VALUES ");
        sql.push_str(&tuples);
        sql.push_str(&Self::build_on_duplicate_clause(&builder.on_duplicate));
        sql.push(';');
        sql
    }

    /// ``DELETE [`alias` ]FROM <table>[ `alias`]<joins><where>;``
    pub fn build_delete(builder: &StatementBuilder) -> String {
        let mut sql = String::with_capacity(96);
        sql.push_str("DELETE ");
        if let Some(alias) = builder.primary_table().and_then(|t| t.alias.as_deref()) {
            sql.push_str(&quote_identifier(alias));
            sql.push(' ');
        }
        sql.push_str("FROM ");
        sql.push_str(&Self::build_table_list(&builder.tables));
        sql.push_str(&Self::build_join_clause(&builder.joins));
        sql.push_str(&Self::build_where_clause(
            &builder.or_groups,
            &builder.conditions,
        ));
        sql.push(';');
        sql
    }

    /// Render one predicate without any leading keyword
    pub fn build_predicate(predicate: &Predicate) -> String {
        match predicate {
            Predicate::Compare {
                field,
                raw_field,
                operator,
                value,
            } => format!(
                "{} {} {}",
                Self::field_text(field, *raw_field),
                operator.to_sql(),
                escape_literal(value)
            ),
            Predicate::Match {
                field,
                raw_field,
                query,
                boolean_mode,
            } => format!(
                "MATCH({}) AGAINST({}{})",
                Self::field_text(field, *raw_field),
                escape_literal(query),
                if *boolean_mode { " IN BOOLEAN MODE" } else { "" }
            ),
        }
    }

    /// OR groups come first; the AND-list then continues with `AND` instead of `WHERE`
    pub fn build_where_clause(or_groups: &[Vec<Predicate>], conditions: &[Predicate]) -> String {
        let mut clause = String::new();

        if !or_groups.is_empty() {
            let groups = or_groups
                .iter()
                .map(|group| {
                    group
                        .iter()
                        .map(Self::build_predicate)
                        .collect::<Vec<_>>()
                        .join(" OR ")
                })
                .collect::<Vec<_>>();
            clause.push_str(" WHERE (");
            clause.push_str(&groups.join(") AND ("));
            clause.push(')');
        }

        if !conditions.is_empty() {
            clause.push_str(if or_groups.is_empty() { " WHERE " } else { " AND " });
            clause.push_str(
                &conditions
                    .iter()
                    .map(Self::build_predicate)
                    .collect::<Vec<_>>()
                    .join(" AND "),
            );
        }

        clause
    }

    pub fn build_table_list(tables: &[TableRef]) -> String {
        tables
            .iter()
            .map(|table| match &table.alias {
                Some(alias) => format!(
                    "{} {}",
                    quote_identifier(&table.name),
                    quote_identifier(alias)
                ),
                None => quote_identifier(&table.name),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Build JOIN clauses
    pub fn build_join_clause(joins: &[JoinClause]) -> String {
        joins
            .iter()
            .map(|join| {
                let mut fragment = format!(" {} {}", join.join_type.to_sql(), quote_identifier(&join.table));
                if let Some(alias) = &join.alias {
                    fragment.push(' ');
                    fragment.push_str(&quote_identifier(alias));
                }
                fragment.push_str(" ON ");
                fragment.push_str(&quote_identifier(&join.left_column));
                fragment.push_str(" = ");
                fragment.push_str(&quote_identifier(&join.right_column));
                if let Some(extra) = &join.extra_condition {
                    fragment.push_str(" AND ");
                    fragment.push_str(extra);
                }
                fragment
            })
            .collect()
    }

    /// Build GROUP BY clause
    pub fn build_group_by_clause(group_by: &[String]) -> String {
        if group_by.is_empty() {
            return String::new();
        }
        let columns = group_by
            .iter()
            .map(|c| quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");
        format!(" GROUP BY {}", columns)
    }

    /// Build HAVING clause
    pub fn build_having_clause(having: &[Predicate]) -> String {
        if having.is_empty() {
            return String::new();
        }
        let conditions = having
            .iter()
            .map(Self::build_predicate)
            .collect::<Vec<_>>()
            .join(" AND ");
        format!(" HAVING {}", conditions)
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(order_by: &[(String, SortOrder)]) -> String {
        if order_by.is_empty() {
            return String::new();
        }

        let order_items: Vec<String> = order_by
            .iter()
            .map(|(field, order)| format!("{} {}", field, order.to_sql()))
            .collect();

        format!(" ORDER BY {}", order_items.join(", "))
    }

    /// Build LIMIT clause
    pub fn build_limit_clause(limit: Option<&Pagination>) -> String {
        match limit {
            Some(pagination) => format!(" {}", pagination.to_sql()),
            None => String::new(),
        }
    }

    /// SET items that survive operator checks, in call order
    pub fn build_set_items(assignments: &[UpdateAssignment]) -> Vec<String> {
        assignments
            .iter()
            .filter_map(|a| a.operation.to_sql(&a.field))
            .collect()
    }

    pub fn build_on_duplicate_clause(fields: &[String]) -> String {
        if fields.is_empty() {
            return String::new();
        }
        let items = fields
            .iter()
            .map(|field| {
                let column = quote_identifier(field);
                format!("{} = VALUES({})", column, column)
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!(" ON DUPLICATE KEY UPDATE {}", items)
    }

    fn build_tuple(row: &[Value]) -> String {
        let values = row.iter().map(escape_literal).collect::<Vec<_>>().join(", ");
        format!("({})", values)
    }

    fn field_text(field: &str, raw: bool) -> String {
        if raw {
            field.to_string()
        } else {
            quote_identifier(field)
        }
    }
}
