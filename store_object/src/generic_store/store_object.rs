//! Generic store implementations
//!
//! Table access operations. Each call assembles its statement on a fresh
//! [`StatementBuilder`], checks the condition guard against the finished
//! statement and only then hands it to the executor.

use super::core::GenericStore;
use super::options::{InsertOptions, QueryOptions};
use crate::errors::StoreError;
use crate::pool::{Row, WriteResult};
use crate::query_builder::{Condition, StatementBuilder, UpdateAssignment};
use crate::traits::TableMetadata;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

impl<T: TableMetadata> GenericStore<T> {
    /// Insert one row
    pub async fn insert<R: Serialize>(
        &self,
        row: &R,
        options: &InsertOptions,
    ) -> Result<WriteResult, StoreError> {
        let row = to_row(row)?;
        let builder = StatementBuilder::new()
            .insert(T::table_name(), options.uses_ignore())
            .values(&row);
        let sql = with_on_duplicate(builder, options).build()?;

        crate::debug_log!("[{}] insert: {}", T::table_name(), sql);
        self.executor.query_write(&sql).await
    }

    /// Insert several rows in one statement
    pub async fn insert_bulk<R: Serialize>(
        &self,
        rows: &[R],
        options: &InsertOptions,
    ) -> Result<WriteResult, StoreError> {
        let rows = rows.iter().map(to_row).collect::<Result<Vec<_>, _>>()?;
        let builder = StatementBuilder::new()
            .insert(T::table_name(), options.uses_ignore())
            .array_values(&rows);
        let sql = with_on_duplicate(builder, options).build()?;

        crate::debug_log!("[{}] insert_bulk ({} rows): {}", T::table_name(), rows.len(), sql);
        self.executor.query_write(&sql).await
    }

    /// Read every matching row
    pub async fn get<R: DeserializeOwned>(
        &self,
        conditions: &[Condition],
        options: &QueryOptions,
    ) -> Result<Vec<R>, StoreError> {
        let sql = self.select_statement(conditions, options)?;

        crate::debug_log!("[{}] get: {}", T::table_name(), sql);
        let rows = self.executor.query(&sql).await?;
        rows.into_iter().map(|row| from_row(row, &sql)).collect()
    }

    /// Read the first matching row; no match is `None`
    pub async fn get_one<R: DeserializeOwned>(
        &self,
        conditions: &[Condition],
        options: &QueryOptions,
    ) -> Result<Option<R>, StoreError> {
        let sql = self.select_statement(conditions, options)?;

        crate::debug_log!("[{}] get_one: {}", T::table_name(), sql);
        let rows = self.executor.query(&sql).await?;
        rows.into_iter().next().map(|row| from_row(row, &sql)).transpose()
    }

    /// Overwrite columns of matching rows; immutable fields are never written
    pub async fn update<R: Serialize>(
        &self,
        conditions: &[Condition],
        row: &R,
        options: &QueryOptions,
    ) -> Result<WriteResult, StoreError> {
        let row = to_row(row)?;
        let conditions = merge_conditions(conditions, options);
        let builder = StatementBuilder::new()
            .update(T::table_name(), T::table_alias())
            .set_multiple(&row, T::immutable_fields());
        let builder = apply_write_options(apply_conditions(builder, &conditions), options);
        let sql = self.guarded(builder, &conditions, options)?;

        crate::debug_log!("[{}] update: {}", T::table_name(), sql);
        self.executor.query_write(&sql).await
    }

    /// Apply arithmetic and column-copy assignments to matching rows
    pub async fn update_maths(
        &self,
        conditions: &[Condition],
        assignments: &[UpdateAssignment],
        options: &QueryOptions,
    ) -> Result<WriteResult, StoreError> {
        let conditions = merge_conditions(conditions, options);
        let builder = StatementBuilder::new()
            .update(T::table_name(), T::table_alias())
            .set_math_multiple(assignments, T::immutable_fields());
        let builder = apply_write_options(apply_conditions(builder, &conditions), options);
        let sql = self.guarded(builder, &conditions, options)?;

        crate::debug_log!("[{}] update_maths: {}", T::table_name(), sql);
        self.executor.query_write(&sql).await
    }

    pub async fn delete(
        &self,
        conditions: &[Condition],
        options: &QueryOptions,
    ) -> Result<WriteResult, StoreError> {
        let conditions = merge_conditions(conditions, options);
        let mut builder = StatementBuilder::new().delete(T::table_name(), T::table_alias());
        for join in &options.joins {
            builder = builder.join(join.clone());
        }
        let builder = apply_conditions(builder, &conditions);
        let sql = self.guarded(builder, &conditions, options)?;

        crate::debug_log!("[{}] delete: {}", T::table_name(), sql);
        self.executor.query_write(&sql).await
    }

    /// `SELECT COUNT(*) AS count` over matching rows
    pub async fn count(
        &self,
        conditions: &[Condition],
        options: &QueryOptions,
    ) -> Result<i64, StoreError> {
        let conditions = merge_conditions(conditions, options);
        let mut builder = StatementBuilder::new()
            .select(T::table_name(), T::table_alias())
            .field("COUNT(*) AS count");
        for join in &options.joins {
            builder = builder.join(join.clone());
        }
        let builder = apply_conditions(builder, &conditions);
        let sql = self.guarded(builder, &conditions, options)?;

        crate::debug_log!("[{}] count: {}", T::table_name(), sql);
        let rows = self.executor.query(&sql).await?;
        let count = rows
            .first()
            .and_then(|row| row.get("count"))
            .ok_or_else(|| StoreError::decode(&sql, "missing `count` column"))?;

        let parsed = match count {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| StoreError::decode(&sql, format!("`count` is not an integer: {}", count)))
    }

    fn select_statement(
        &self,
        conditions: &[Condition],
        options: &QueryOptions,
    ) -> Result<String, StoreError> {
        let conditions = merge_conditions(conditions, options);
        let mut builder = StatementBuilder::new().select(T::table_name(), T::table_alias());

        for field in &options.fields {
            builder = builder.field(field.as_str());
        }
        for join in &options.joins {
            builder = builder.join(join.clone());
        }
        builder = apply_conditions(builder, &conditions);
        for (expression, order) in &options.order_by {
            builder = builder.order_by(expression.as_str(), *order);
        }
        for column in &options.group_by {
            builder = builder.group_by(column.as_str());
        }
        for condition in &options.having {
            builder = builder.having(condition);
        }
        if let Some(limit) = options.limit {
            builder = builder.limit(limit, options.offset.unwrap_or(0));
        }

        self.guarded(builder, &conditions, options)
    }

    /// Render the statement, refusing it when nothing constrains the rows
    fn guarded(
        &self,
        builder: StatementBuilder,
        conditions: &[Condition],
        options: &QueryOptions,
    ) -> Result<String, StoreError> {
        let sql = builder.build()?;
        let unconstrained = conditions.iter().all(Condition::is_noop);
        if unconstrained && !options.no_condition_allowed {
            tracing::warn!(table = T::table_name(), statement = %sql, "Refusing statement without filter condition");
            return Err(StoreError::missing_condition(T::table_name(), sql));
        }
        Ok(sql)
    }
}

fn merge_conditions(conditions: &[Condition], options: &QueryOptions) -> Vec<Condition> {
    conditions
        .iter()
        .chain(options.extra_conditions.iter())
        .cloned()
        .collect()
}

/// Route conditions onto the builder.
///
/// Disjunctive conditions form the OR-list unless there is only one of them,
/// in which case it joins the AND-list. Full-text conditions on the AND-list
/// render as MATCH ... AGAINST.
fn apply_conditions(mut builder: StatementBuilder, conditions: &[Condition]) -> StatementBuilder {
    let (disjunctive, conjunctive): (Vec<&Condition>, Vec<&Condition>) =
        conditions.iter().partition(|c| c.disjunctive);
    let lone_disjunctive = disjunctive.len() == 1;

    for condition in disjunctive {
        builder = if lone_disjunctive {
            and_condition(builder, condition)
        } else {
            builder.where_or(condition)
        };
    }
    for condition in conjunctive {
        builder = and_condition(builder, condition);
    }
    builder
}

fn and_condition(builder: StatementBuilder, condition: &Condition) -> StatementBuilder {
    if condition.is_full_text() {
        builder.where_match(condition)
    } else {
        builder.where_and(condition)
    }
}

fn apply_write_options(mut builder: StatementBuilder, options: &QueryOptions) -> StatementBuilder {
    for join in &options.joins {
        builder = builder.join(join.clone());
    }
    for (expression, order) in &options.order_by {
        builder = builder.order_by(expression.as_str(), *order);
    }
    if let Some(limit) = options.limit {
        builder = builder.update_limit(limit);
    }
    builder
}

fn with_on_duplicate(mut builder: StatementBuilder, options: &InsertOptions) -> StatementBuilder {
    for field in &options.on_duplicate {
        builder = builder.on_duplicate(field.as_str());
    }
    builder
}

fn to_row<R: Serialize>(row: &R) -> Result<Row, StoreError> {
    match serde_json::to_value(row)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::SerializationError(format!(
            "expected a JSON object for a table row, got {}",
            other
        ))),
    }
}

fn from_row<R: DeserializeOwned>(row: Row, sql: &str) -> Result<R, StoreError> {
    serde_json::from_value(Value::Object(row)).map_err(|e| StoreError::decode(sql, e))
}
