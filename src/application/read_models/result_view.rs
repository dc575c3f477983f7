use serde::Serialize;

/// One Key/Value row of the result view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub key: String,
    pub value: String,
}

impl ResultRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Presentation-ready view of a resolved check result
///
/// Rows are already in display order; formatters only lay them out.
#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub result_name: String,
    pub rule_name: String,
    pub rows: Vec<ResultRow>,
}

impl ResultView {
    /// Value of the first row named `key`
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.key == key)
            .map(|row| row.value.as_str())
    }
}
