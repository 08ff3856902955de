//! Statement builder
//!
//! Accumulates typed clause fragments for one statement and renders them on
//! demand through [`SqlGenerator`]. A builder is a plain value: create one per
//! statement, chain the clause calls, then call [`StatementBuilder::build`].
//!
//! ```
//! use store_object::query_builder::{Condition, SortOrder, StatementBuilder};
//!
//! let sql = StatementBuilder::new()
//!     .select("post", Some("po"))
//!     .where_and(&Condition::eq("po.author", "jane"))
//!     .order_by("po.id", SortOrder::Desc)
//!     .limit(10, 0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM `post` `po` WHERE `po`.`author` = 'jane' ORDER BY po.id DESC LIMIT 0, 10;"
//! );
//! ```

use crate::errors::QueryError;
use crate::query_builder::condition::{Condition, QueryOperator};
use crate::query_builder::escape::normalize_value;
use crate::query_builder::join::JoinClause;
use crate::query_builder::ordering::SortOrder;
use crate::query_builder::pagination::Pagination;
use crate::query_builder::sql_generation::SqlGenerator;
use crate::query_builder::update::{UpdateAssignment, UpdateOperation};
use serde_json::{Map, Value};

/// Statement kind selected by the first command call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select,
    Update,
    Insert,
    Delete,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Select => "SELECT",
            Command::Update => "UPDATE",
            Command::Insert => "INSERT",
            Command::Delete => "DELETE",
        }
    }
}

/// Table named in FROM / UPDATE / INTO
#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

/// One rendered-on-demand WHERE / HAVING predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        field: String,
        raw_field: bool,
        operator: QueryOperator,
        value: Value,
    },
    Match {
        field: String,
        raw_field: bool,
        query: Value,
        boolean_mode: bool,
    },
}

impl Predicate {
    fn from_condition(condition: &Condition) -> Self {
        if condition.is_full_text() {
            Self::Match {
                field: condition.field.clone(),
                raw_field: condition.raw_field,
                query: condition.value.clone(),
                boolean_mode: condition.boolean_mode,
            }
        } else {
            Self::Compare {
                field: condition.field.clone(),
                raw_field: condition.raw_field,
                operator: condition.operator,
                value: condition.value.clone(),
            }
        }
    }
}

/// Builder for a single MySQL statement
#[derive(Debug, Clone, Default)]
pub struct StatementBuilder {
    pub(crate) command: Option<Command>,
    pub(crate) ignore: bool,
    pub(crate) tables: Vec<TableRef>,
    pub(crate) fields: Vec<String>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) conditions: Vec<Predicate>,
    pub(crate) or_groups: Vec<Vec<Predicate>>,
    pub(crate) group_by: Vec<String>,
    pub(crate) having: Vec<Predicate>,
    pub(crate) order_by: Vec<(String, SortOrder)>,
    pub(crate) limit: Option<Pagination>,
    pub(crate) assignments: Vec<UpdateAssignment>,
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Vec<Value>>,
    pub(crate) on_duplicate: Vec<String>,
    misuse: Option<QueryError>,
}

const READ_WRITE: &[Command] = &[Command::Select, Command::Update, Command::Delete];

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or extend the FROM list of) a SELECT statement
    pub fn select(mut self, table: &str, alias: Option<&str>) -> Self {
        match self.command {
            None | Some(Command::Select) => {
                self.command = Some(Command::Select);
                self.push_table(table, alias);
            }
            Some(current) => self.conflict(current, Command::Select),
        }
        self
    }

    pub fn update(mut self, table: &str, alias: Option<&str>) -> Self {
        if self.start(Command::Update) {
            self.push_table(table, alias);
        }
        self
    }

    /// Start an INSERT; `ignore` emits `INSERT IGNORE`
    pub fn insert(mut self, table: &str, ignore: bool) -> Self {
        if self.start(Command::Insert) {
            self.ignore = ignore;
            self.push_table(table, None);
        }
        self
    }

    pub fn delete(mut self, table: &str, alias: Option<&str>) -> Self {
        if self.start(Command::Delete) {
            self.push_table(table, alias);
        }
        self
    }

    /// Add a select-list expression (emitted verbatim)
    pub fn field(mut self, expression: impl Into<String>) -> Self {
        if self.allow("field", &[Command::Select]) {
            self.fields.push(expression.into());
        }
        self
    }

    pub fn join(mut self, join: JoinClause) -> Self {
        if self.allow("join", READ_WRITE) {
            self.joins.push(join);
        }
        self
    }

    /// Append a condition to the AND-list
    pub fn where_and(mut self, condition: &Condition) -> Self {
        if self.accept("where", condition, READ_WRITE) {
            self.conditions.push(Predicate::from_condition(condition));
        }
        self
    }

    /// Append a full-text MATCH ... AGAINST predicate to the AND-list
    pub fn where_match(mut self, condition: &Condition) -> Self {
        if self.accept("where_match", condition, READ_WRITE) {
            self.conditions.push(Predicate::Match {
                field: condition.field.clone(),
                raw_field: condition.raw_field,
                query: condition.value.clone(),
                boolean_mode: condition.boolean_mode,
            });
        }
        self
    }

    /// Append a condition to the OR-list, opening a new group when asked
    pub fn where_or(mut self, condition: &Condition) -> Self {
        if !self.accept("where_or", condition, READ_WRITE) {
            return self;
        }
        let predicate = Predicate::from_condition(condition);
        match self.or_groups.last_mut() {
            Some(group) if !condition.starts_new_or_group => group.push(predicate),
            _ => self.or_groups.push(vec![predicate]),
        }
        self
    }

    pub fn having(mut self, condition: &Condition) -> Self {
        if self.accept("having", condition, &[Command::Select]) {
            self.having.push(Predicate::from_condition(condition));
        }
        self
    }

    /// Add an ORDER BY item; the expression is emitted verbatim
    pub fn order_by(mut self, expression: impl Into<String>, order: SortOrder) -> Self {
        if self.allow("order_by", &[Command::Select, Command::Update]) {
            self.order_by.push((expression.into(), order));
        }
        self
    }

    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        if self.allow("group_by", &[Command::Select]) {
            self.group_by.push(column.into());
        }
        self
    }

    /// `LIMIT offset, limit` for reads; a later call replaces an earlier one
    pub fn limit(mut self, limit: u64, offset: u64) -> Self {
        if self.allow("limit", &[Command::Select]) {
            self.limit = Some(Pagination::page(limit, offset));
        }
        self
    }

    /// `LIMIT n` for updates; only the first call counts
    pub fn update_limit(mut self, limit: u64) -> Self {
        if self.allow("update_limit", &[Command::Update]) && self.limit.is_none() {
            self.limit = Some(Pagination::row_count(limit));
        }
        self
    }

    /// Add one value tuple, columns taken from the row's key order
    pub fn values(mut self, row: &Map<String, Value>) -> Self {
        if !self.allow("values", &[Command::Insert]) {
            return self;
        }
        if self.rows.is_empty() {
            self.columns = row.keys().cloned().collect();
        }
        let tuple = self.tuple_for(row);
        self.rows.push(tuple);
        self
    }

    /// Add several value tuples sharing one alphabetically sorted column list
    pub fn array_values(mut self, rows: &[Map<String, Value>]) -> Self {
        let Some(first) = rows.first() else {
            return self.values(&Map::new());
        };
        if !self.allow("array_values", &[Command::Insert]) {
            return self;
        }
        if self.rows.is_empty() {
            let mut columns: Vec<String> = first.keys().cloned().collect();
            columns.sort();
            self.columns = columns;
        }
        for row in rows {
            let tuple = self.tuple_for(row);
            self.rows.push(tuple);
        }
        self
    }

    /// `ON DUPLICATE KEY UPDATE field = VALUES(field)`
    pub fn on_duplicate(mut self, field: impl Into<String>) -> Self {
        if self.allow("on_duplicate", &[Command::Insert]) {
            self.on_duplicate.push(field.into());
        }
        self
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        if self.allow("set", &[Command::Update]) {
            self.assignments
                .push(UpdateAssignment::new(field, UpdateOperation::Set(value.into())));
        }
        self
    }

    /// Set every column of `row` except the protected ones; `""` becomes NULL
    pub fn set_multiple(mut self, row: &Map<String, Value>, protected: &[&str]) -> Self {
        if !self.allow("set_multiple", &[Command::Update]) {
            return self;
        }
        for (field, value) in row {
            if protected.contains(&field.as_str()) {
                continue;
            }
            self.assignments.push(UpdateAssignment::new(
                field.clone(),
                UpdateOperation::Set(normalize_value(value).clone()),
            ));
        }
        self
    }

    /// Apply arithmetic / column-copy assignments, skipping protected fields
    pub fn set_math_multiple(
        mut self,
        assignments: &[UpdateAssignment],
        protected: &[&str],
    ) -> Self {
        if !self.allow("set_math_multiple", &[Command::Update]) {
            return self;
        }
        self.assignments.extend(
            assignments
                .iter()
                .filter(|a| !protected.contains(&a.field.as_str()))
                .cloned(),
        );
        self
    }

    /// Render the statement. Pure: may be called any number of times.
    pub fn build(&self) -> Result<String, QueryError> {
        if let Some(misuse) = &self.misuse {
            return Err(misuse.clone());
        }
        match self.command {
            None => Err(QueryError::NoCommand("build")),
            Some(Command::Select) => Ok(SqlGenerator::build_select(self)),
            Some(Command::Update) => SqlGenerator::build_update(self),
            Some(Command::Insert) => Ok(SqlGenerator::build_insert(self)),
            Some(Command::Delete) => Ok(SqlGenerator::build_delete(self)),
        }
    }

    /// Clear every fragment, returning the builder to its pre-use state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn command(&self) -> Option<Command> {
        self.command
    }

    pub(crate) fn primary_table(&self) -> Option<&TableRef> {
        self.tables.first()
    }

    fn start(&mut self, requested: Command) -> bool {
        match self.command {
            None => {
                self.command = Some(requested);
                true
            }
            Some(current) => {
                self.conflict(current, requested);
                false
            }
        }
    }

    fn push_table(&mut self, table: &str, alias: Option<&str>) {
        self.tables.push(TableRef {
            name: table.to_string(),
            alias: alias.map(str::to_string),
        });
    }

    fn conflict(&mut self, current: Command, requested: Command) {
        self.record(QueryError::CommandConflict {
            current: current.name(),
            requested: requested.name(),
        });
    }

    /// Check the clause against the active command, recording misuse
    fn allow(&mut self, clause: &'static str, allowed: &[Command]) -> bool {
        match self.command {
            None => {
                self.record(QueryError::NoCommand(clause));
                false
            }
            Some(command) if !allowed.contains(&command) => {
                self.record(QueryError::InvalidClause {
                    clause,
                    command: command.name(),
                });
                false
            }
            Some(_) => true,
        }
    }

    /// No-op conditions are skipped; a value without a field is misuse
    fn accept(&mut self, clause: &'static str, condition: &Condition, allowed: &[Command]) -> bool {
        if condition.is_noop() {
            return false;
        }
        if condition.field.is_empty() {
            self.record(QueryError::EmptyField(clause));
            return false;
        }
        self.allow(clause, allowed)
    }

    // First misuse wins; later ones are usually fallout from it
    fn record(&mut self, error: QueryError) {
        if self.misuse.is_none() {
            self.misuse = Some(error);
        }
    }

    fn tuple_for(&self, row: &Map<String, Value>) -> Vec<Value> {
        self.columns
            .iter()
            .map(|column| {
                row.get(column)
                    .map(|value| normalize_value(value).clone())
                    .unwrap_or(Value::Null)
            })
            .collect()
    }
}
