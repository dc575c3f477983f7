use crate::application::read_models::ResultView;
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;

const KEY_HEADER: &str = "KEY";
const VALUE_HEADER: &str = "VALUE";

/// TableFormatter adapter rendering the view as a bordered Key/Value table
///
/// Multi-line values (fix objects) continue on the following lines with an
/// empty key cell; every row is closed by a separator line.
pub struct TableFormatter;

impl TableFormatter {
    pub fn new() -> Self {
        Self
    }

    fn separator(key_width: usize, value_width: usize) -> String {
        format!(
            "+{}+{}+\n",
            "-".repeat(key_width + 2),
            "-".repeat(value_width + 2)
        )
    }

    fn line(key: &str, value: &str, key_width: usize, value_width: usize) -> String {
        format!(
            "| {:<kw$} | {:<vw$} |\n",
            key,
            value,
            kw = key_width,
            vw = value_width
        )
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for TableFormatter {
    fn format(&self, view: &ResultView) -> Result<String> {
        let key_width = view
            .rows
            .iter()
            .map(|row| row.key.chars().count())
            .chain(std::iter::once(KEY_HEADER.len()))
            .max()
            .unwrap_or_default();
        let value_width = view
            .rows
            .iter()
            .flat_map(|row| row.value.lines())
            .map(|line| line.chars().count())
            .chain(std::iter::once(VALUE_HEADER.len()))
            .max()
            .unwrap_or_default();

        let separator = Self::separator(key_width, value_width);
        let header = Self::line(KEY_HEADER, VALUE_HEADER, key_width, value_width);
        let mut output = String::new();
        output.push_str(&separator);
        output.push_str(&header);
        output.push_str(&separator);

        for row in &view.rows {
            let mut lines = row.value.lines();
            let first = lines.next().unwrap_or_default();
            output.push_str(&Self::line(&row.key, first, key_width, value_width));
            for continuation in lines {
                output.push_str(&Self::line("", continuation, key_width, value_width));
            }
            output.push_str(&separator);
        }

        Ok(output)
    }
}
