use super::result_view::{ResultRow, ResultView};
use crate::application::dto::ViewResultResponse;
use crate::lineage::domain::{Resource, CONTROL_ANNOTATION_PREFIX};
use crate::shared::Result;
use anyhow::Context;

/// Builder for constructing a [`ResultView`] from a resolved lineage
pub struct ResultViewBuilder;

impl ResultViewBuilder {
    /// Lays out the rows of the view
    ///
    /// # Errors
    /// Returns a malformed-data error when a required field of the rule,
    /// the result or the remediation is missing or of the wrong type
    pub fn build(response: &ViewResultResponse) -> Result<ResultView> {
        let result = &response.lineage.result;
        let rule = &response.lineage.rule;
        let mut rows = vec![
            Self::required_row(rule, "title")?,
            Self::required_row(result, "status")?,
            Self::required_row(result, "severity")?,
            Self::required_row(rule, "description")?,
            Self::required_row(rule, "rationale")?,
        ];
        if let Some(instructions) = result.nested_str(&["instructions"])? {
            rows.push(ResultRow::new("Instructions", instructions));
        }

        rows.extend(Self::control_rows(rule)?);
        rows.extend(Self::fix_rows(rule)?);

        rows.push(ResultRow::new("Result Object Name", result.name()));
        rows.push(ResultRow::new("Rule Object Name", rule.name()));

        match &response.remediation {
            Some(remediation) => {
                let state = remediation.required_str(&["status", "applicationState"])?;
                rows.push(ResultRow::new("Remediation Created", "Yes"));
                rows.push(ResultRow::new("Remediation Name", remediation.name()));
                rows.push(ResultRow::new("Remediation Status", state));
            }
            None => rows.push(ResultRow::new("Remediation Created", "No")),
        }

        Ok(ResultView {
            result_name: result.name().to_string(),
            rule_name: rule.name().to_string(),
            rows,
        })
    }

    fn required_row(resource: &Resource, field: &str) -> Result<ResultRow> {
        let value = resource.required_str(&[field])?;
        Ok(ResultRow::new(title_case(field), value))
    }

    /// One row per `control.compliance.openshift.io/<benchmark>` annotation,
    /// sorted by benchmark
    fn control_rows(rule: &Resource) -> Result<Vec<ResultRow>> {
        let Some(annotations) = rule.annotations() else {
            return Ok(Vec::new());
        };

        let mut controls = Vec::new();
        for (key, value) in annotations {
            let Some(benchmark) = key.strip_prefix(CONTROL_ANNOTATION_PREFIX) else {
                continue;
            };
            let value = value.as_str().ok_or_else(|| {
                rule.malformed(
                    &["metadata", "annotations", key.as_str()],
                    "is not a string",
                )
            })?;
            controls.push((benchmark.to_string(), value.replace(';', ", ")));
        }
        controls.sort();

        Ok(controls
            .into_iter()
            .map(|(benchmark, value)| ResultRow::new(format!("{} Controls", benchmark), value))
            .collect())
    }

    fn fix_rows(rule: &Resource) -> Result<Vec<ResultRow>> {
        let fixes = match rule.nested_array(&["availableFixes"])? {
            Some(fixes) if !fixes.is_empty() => fixes,
            _ => return Ok(vec![ResultRow::new("Available Fix", "No")]),
        };

        let mut rows = vec![ResultRow::new("Available Fix", "Yes")];
        for (index, fix) in fixes.iter().enumerate() {
            let position = format!("[{}]", index);
            let path = ["availableFixes", position.as_str(), "fixObject"];
            let fix_object = match fix.get("fixObject") {
                Some(object) if object.is_object() => object,
                Some(_) => return Err(rule.malformed(&path, "is not an object").into()),
                None => return Err(rule.malformed(&path, "is missing").into()),
            };
            let yaml = serde_yaml_ng::to_string(fix_object).with_context(|| {
                format!("Failed to render fix {} of rule '{}'", index, rule.name())
            })?;
            rows.push(ResultRow::new("Fix Object", yaml));
        }
        Ok(rows)
    }
}

/// `severity` -> `Severity`
fn title_case(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
