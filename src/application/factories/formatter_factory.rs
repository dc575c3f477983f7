use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ResultFormatter;

/// Factory for creating result formatters
///
/// Selects the formatter adapter for an [`OutputFormat`] so the CLI never
/// names adapter types.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use compliance_inspect::application::dto::OutputFormat;
    /// use compliance_inspect::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Table);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ResultFormatter> {
        match format {
            OutputFormat::Table => Box::new(TableFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Table => "📝 Rendering table output...",
            OutputFormat::Json => "📝 Rendering JSON output...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{ResultRow, ResultView};

    fn view() -> ResultView {
        ResultView {
            result_name: "res".to_string(),
            rule_name: "rule".to_string(),
            rows: vec![ResultRow::new("Status", "PASS")],
        }
    }

    #[test]
    fn test_create_table_formatter() {
        let formatter = FormatterFactory::create(OutputFormat::Table);
        let output = formatter.format(&view()).unwrap();
        assert!(output.starts_with('+'));
        assert!(output.contains("| Status | PASS  |"));
    }

    #[test]
    fn test_create_json_formatter() {
        let formatter = FormatterFactory::create(OutputFormat::Json);
        let output = formatter.format(&view()).unwrap();
        assert!(output.trim_start().starts_with('{'));
    }

    #[test]
    fn test_progress_message() {
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Table),
            "📝 Rendering table output..."
        );
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Json),
            "📝 Rendering JSON output..."
        );
    }
}
