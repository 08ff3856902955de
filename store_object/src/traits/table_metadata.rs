//! Table description consumed by the generic store

/// Static description of one table.
///
/// Implemented by zero-sized marker types, one per table:
///
/// ```
/// use store_object::TableMetadata;
///
/// pub struct KeywordTable;
///
/// impl TableMetadata for KeywordTable {
///     fn table_name() -> &'static str {
///         "keyword"
///     }
///
///     fn table_alias() -> Option<&'static str> {
///         Some("kw")
///     }
/// }
///
/// assert_eq!(KeywordTable::qualified("keyword"), "kw.keyword");
/// ```
pub trait TableMetadata: Send + Sync + 'static {
    /// The table name in the database
    fn table_name() -> &'static str;

    /// Alias used in FROM / UPDATE / DELETE and in qualified columns
    fn table_alias() -> Option<&'static str> {
        None
    }

    /// Columns never written by an UPDATE
    fn immutable_fields() -> &'static [&'static str] {
        &[]
    }

    /// Qualify a column with the table alias (or name when there is no alias)
    fn qualified(column: &str) -> String {
        format!("{}.{}", Self::table_alias().unwrap_or(Self::table_name()), column)
    }
}
