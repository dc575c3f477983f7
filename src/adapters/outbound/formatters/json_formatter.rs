use crate::application::read_models::{ResultRow, ResultView};
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
struct JsonDocument<'a> {
    metadata: JsonMetadata<'a>,
    rows: &'a [ResultRow],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonMetadata<'a> {
    timestamp: String,
    tool: JsonTool,
    result_object_name: &'a str,
    rule_object_name: &'a str,
}

#[derive(Serialize)]
struct JsonTool {
    name: &'static str,
    version: &'static str,
}

/// JsonFormatter adapter emitting the rows with generation metadata
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format(&self, view: &ResultView) -> Result<String> {
        let document = JsonDocument {
            metadata: JsonMetadata {
                timestamp: Utc::now().to_rfc3339(),
                tool: JsonTool {
                    name: env!("CARGO_PKG_NAME"),
                    version: env!("CARGO_PKG_VERSION"),
                },
                result_object_name: &view.result_name,
                rule_object_name: &view.rule_name,
            },
            rows: &view.rows,
        };
        let mut json = serde_json::to_string_pretty(&document)?;
        json.push('\n');
        Ok(json)
    }
}
