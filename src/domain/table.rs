//! In-memory financial table loaded from an `fv` artifact.

/// Shape violations caught when a table is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("no columns to parse from file")]
    NoColumns,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Column names plus data rows. Every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FinancialTable {
    /// Build a table, rejecting a header with no named column or any row
    /// whose width differs from the header. Rows are numbered from 1 in
    /// errors.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        if columns.iter().all(|c| c.trim().is_empty()) {
            return Err(TableError::NoColumns);
        }
        let expected = columns.len();
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(TableError::RaggedRow {
                row: idx + 1,
                expected,
                found: row.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows, header excluded.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn new_accepts_uniform_rows() {
        let table = FinancialTable::new(
            strings(&["Metric", "Value"]),
            vec![strings(&["Revenue", "100"]), strings(&["EPS", "1.5"])],
        )
        .unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[1][0], "EPS");
    }

    #[test]
    fn new_accepts_header_only() {
        let table = FinancialTable::new(strings(&["Label", "AAPL"]), Vec::new()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.columns(), &["Label", "AAPL"]);
    }

    #[test]
    fn new_rejects_empty_header() {
        assert_eq!(
            FinancialTable::new(Vec::new(), Vec::new()),
            Err(TableError::NoColumns)
        );
        assert_eq!(
            FinancialTable::new(strings(&["", " "]), Vec::new()),
            Err(TableError::NoColumns)
        );
    }

    #[test]
    fn new_rejects_ragged_row() {
        let err = FinancialTable::new(
            strings(&["Metric", "Value"]),
            vec![strings(&["Revenue", "100"]), strings(&["EPS", "1.5", "extra"])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TableError::RaggedRow {
                row: 2,
                expected: 2,
                found: 3
            }
        );
    }
}
