//! `SQLite` schema definitions for regform.

/// SQL statement to create the items table.
///
/// `AUTOINCREMENT` keeps `SQLite` from handing out the id of a deleted row
/// again, so identifiers only ever grow.
pub const CREATE_ITEMS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    value TEXT NOT NULL
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_ITEMS_TABLE, CREATE_METADATA_TABLE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.is_empty());
        }
    }

    #[test]
    fn test_create_items_table_contains_required_columns() {
        assert!(CREATE_ITEMS_TABLE.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
        assert!(CREATE_ITEMS_TABLE.contains("value TEXT NOT NULL"));
    }

    #[test]
    fn test_create_metadata_table_structure() {
        assert!(CREATE_METADATA_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_METADATA_TABLE.contains("value TEXT NOT NULL"));
    }
}
