//! Report parameters
//!
//! The parameter bag callers hand to [`crate::ReportAssembler::generate_full_report`].
//! Field names match the keys of the JSON params file.

use litforge_core::{missing_parameter_error, LitforgeResult, ReportMetadata, NOT_AVAILABLE};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_REPORT_TITLE: &str = "Research Report";
pub const DEFAULT_REPORT_AUTHOR: &str = "Research Team";
pub const DEFAULT_INSTITUTION: &str = "Academic Institution";
pub const DEFAULT_OUTPUT_FILE: &str = "academic_report.md";

/// Search settings quoted in the methodology section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default, deserialize_with = "scalar_text")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub start_year: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub end_year: Option<String>,
}

impl SearchParams {
    pub fn new(
        subject: impl Into<String>,
        start_year: impl ToString,
        end_year: impl ToString,
    ) -> Self {
        Self {
            subject: Some(subject.into()),
            start_year: Some(start_year.to_string()),
            end_year: Some(end_year.to_string()),
        }
    }

    pub fn subject_or_default(&self) -> &str {
        self.subject.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn start_year_or_default(&self) -> &str {
        self.start_year.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn end_year_or_default(&self) -> &str {
        self.end_year.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// Everything needed to generate a full report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportParams {
    pub research_question: Option<String>,
    pub key_findings: Option<String>,
    pub subject: Option<String>,
    pub context: Option<String>,
    pub objectives: Option<Vec<String>>,
    pub search_params: Option<SearchParams>,
    pub key_insights: Option<Vec<String>>,
    pub summary: Option<String>,
    pub recommendations: Option<Vec<String>>,

    pub title: Option<String>,
    pub author: Option<String>,
    pub institution: Option<String>,
    pub output_file: Option<String>,
}

/// Section inputs after every required parameter has been checked
#[derive(Debug, Clone, Copy)]
pub struct SectionInputs<'a> {
    pub research_question: &'a str,
    pub key_findings: &'a str,
    pub subject: &'a str,
    pub context: &'a str,
    pub objectives: &'a [String],
    pub search_params: &'a SearchParams,
    pub key_insights: &'a [String],
    pub summary: &'a str,
    pub recommendations: &'a [String],
}

impl ReportParams {
    /// Check that every section parameter is present.
    ///
    /// Fails on the first absent parameter in document order.
    pub fn section_inputs(&self) -> LitforgeResult<SectionInputs<'_>> {
        Ok(SectionInputs {
            research_question: required(&self.research_question, "research_question")?,
            key_findings: required(&self.key_findings, "key_findings")?,
            subject: required(&self.subject, "subject")?,
            context: required(&self.context, "context")?,
            objectives: required(&self.objectives, "objectives")?,
            search_params: self
                .search_params
                .as_ref()
                .ok_or_else(|| missing_parameter_error!("search_params", "report_params"))?,
            key_insights: required(&self.key_insights, "key_insights")?,
            summary: required(&self.summary, "summary")?,
            recommendations: required(&self.recommendations, "recommendations")?,
        })
    }

    /// Title-page metadata stamped with today's date
    pub fn metadata(&self) -> ReportMetadata {
        ReportMetadata::new(
            self.title.as_deref().unwrap_or(DEFAULT_REPORT_TITLE),
            self.author.as_deref().unwrap_or(DEFAULT_REPORT_AUTHOR),
            self.institution.as_deref().unwrap_or(DEFAULT_INSTITUTION),
        )
    }

    pub fn output_file_or_default(&self) -> &str {
        self.output_file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }
}

fn required<'a, T, U>(value: &'a Option<T>, name: &str) -> LitforgeResult<&'a U>
where
    T: std::ops::Deref<Target = U>,
    U: ?Sized,
{
    value
        .as_deref()
        .ok_or_else(|| missing_parameter_error!(name, "report_params"))
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> ReportParams {
        serde_json::from_value(json!({
            "research_question": "q",
            "key_findings": "f",
            "subject": "s",
            "context": "c",
            "objectives": ["o"],
            "search_params": {"subject": "s", "start_year": 2015, "end_year": "2024"},
            "key_insights": [],
            "summary": "sum",
            "recommendations": []
        }))
        .unwrap()
    }

    #[test]
    fn test_complete_params_resolve() {
        let params = complete();
        let inputs = params.section_inputs().unwrap();
        assert_eq!(inputs.research_question, "q");
        assert_eq!(inputs.objectives, ["o".to_string()]);
        assert_eq!(inputs.search_params.start_year_or_default(), "2015");
        assert_eq!(inputs.search_params.end_year_or_default(), "2024");
        assert!(inputs.key_insights.is_empty());
    }

    #[test]
    fn test_missing_parameter_is_named() {
        let mut params = complete();
        params.summary = None;
        let error = params.section_inputs().unwrap_err();
        assert_eq!(error.missing_parameter(), Some("summary"));

        let error = ReportParams::default().section_inputs().unwrap_err();
        assert_eq!(error.missing_parameter(), Some("research_question"));
    }

    #[test]
    fn test_search_params_default_to_not_available() {
        let search: SearchParams = serde_json::from_value(json!({"subject": null})).unwrap();
        assert_eq!(search.subject_or_default(), "N/A");
        assert_eq!(search.start_year_or_default(), "N/A");
        assert_eq!(search.end_year_or_default(), "N/A");
    }

    #[test]
    fn test_metadata_defaults() {
        let params = ReportParams::default();
        let metadata = params.metadata();
        assert_eq!(metadata.title, "Research Report");
        assert_eq!(metadata.author, "Research Team");
        assert_eq!(metadata.institution, "Academic Institution");
        assert!(!metadata.date.is_empty());
        assert_eq!(params.output_file_or_default(), "academic_report.md");
    }
}
