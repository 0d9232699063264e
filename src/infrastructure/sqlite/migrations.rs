use rusqlite::Connection;

const EMPLOYEE_COLUMNS: [&str; 4] = ["position", "employee_id", "name", "photo_filename"];
const EMBEDDING_COLUMNS: [&str; 3] = ["position", "dimension", "vector"];

/// Creates the record list and the embedding matrix. Rows in both tables are
/// keyed by their position in the face table.
///
/// Tables left behind with a different column layout are dropped first and
/// recreated empty.
pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    if drop_mismatched_tables(conn)? {
        tracing::warn!("store tables had an unexpected layout, recreated them empty");
    }

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS employees (
            position INTEGER PRIMARY KEY,
            employee_id TEXT NOT NULL,
            name TEXT NOT NULL,
            photo_filename TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS embeddings (
            position INTEGER PRIMARY KEY,
            dimension INTEGER NOT NULL,
            vector BLOB NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_employees_employee_id ON employees(employee_id);
        "
    )
}

/// The two tables form one artifact, so a bad layout in either drops both.
fn drop_mismatched_tables(conn: &Connection) -> rusqlite::Result<bool> {
    let employees = table_columns(conn, "employees")?;
    let embeddings = table_columns(conn, "embeddings")?;
    if layout_ok(&employees, &EMPLOYEE_COLUMNS) && layout_ok(&embeddings, &EMBEDDING_COLUMNS) {
        return Ok(false);
    }
    conn.execute_batch("DROP TABLE IF EXISTS employees; DROP TABLE IF EXISTS embeddings;")?;
    Ok(true)
}

fn layout_ok(found: &[String], expected: &[&str]) -> bool {
    found.is_empty() || found.iter().map(String::as_str).eq(expected.iter().copied())
}

/// Column names in declaration order, empty when the table does not exist.
fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
    let columns = stmt
        .query_map([table], |r| r.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_tables_on_empty_database() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(table_columns(&conn, "employees").unwrap(), EMPLOYEE_COLUMNS);
        assert_eq!(table_columns(&conn, "embeddings").unwrap(), EMBEDDING_COLUMNS);
    }

    #[test]
    fn test_rerun_keeps_rows() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn.execute("INSERT INTO employees VALUES (0, 'E001', 'Alice', 'E001.jpg')", []).unwrap();
        run_migrations(&conn).unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM employees", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_foreign_layout_is_replaced() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE employees (x TEXT); CREATE TABLE embeddings (y BLOB);").unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(table_columns(&conn, "employees").unwrap(), EMPLOYEE_COLUMNS);
        assert_eq!(table_columns(&conn, "embeddings").unwrap(), EMBEDDING_COLUMNS);
    }
}
