//! Core data type definitions
//!
//! Papers arrive from upstream collection as loosely-typed JSON. [`PaperRecord`]
//! accepts whatever shape they come in, and [`Paper`] is the fully-defaulted
//! value every report section is generated from.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::logging::LoggingConfig;

/// Year substituted for any missing or unparseable publication year
pub const DEFAULT_YEAR: i32 = 2020;

/// Year range reported for an empty paper collection
pub const FALLBACK_YEAR_RANGE: (i32, i32) = (2020, 2025);

/// Placeholder strings used when a paper field is absent
pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_ABSTRACT: &str = "No abstract available.";

const YEAR_SENTINELS: [&str; 4] = ["n/a", "na", "", "none"];

/// Paper as delivered by the upstream collection step
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaperRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub authors: Option<Vec<String>>,
    #[serde(default)]
    pub pub_year: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub venue: Option<String>,
    #[serde(default, rename = "abstract", deserialize_with = "lenient::string")]
    pub abstract_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub citation_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::score")]
    pub critic_rank: Option<f64>,
}

/// Publication year exactly as it was supplied
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PubYear {
    #[default]
    Missing,
    Integer(i64),
    Float(f64),
    Text(String),
    /// Booleans, arrays and objects, kept as their JSON text
    Other(String),
}

impl PubYear {
    /// Resolve to a calendar year, substituting [`DEFAULT_YEAR`] for anything unusable
    pub fn parse_year(&self) -> i32 {
        match self {
            PubYear::Missing | PubYear::Other(_) => DEFAULT_YEAR,
            PubYear::Integer(year) => i32::try_from(*year).unwrap_or(DEFAULT_YEAR),
            PubYear::Float(year) => {
                let truncated = year.trunc();
                if truncated.is_finite()
                    && truncated >= i32::MIN as f64
                    && truncated <= i32::MAX as f64
                {
                    truncated as i32
                } else {
                    DEFAULT_YEAR
                }
            }
            PubYear::Text(text) => {
                let trimmed = text.trim();
                if YEAR_SENTINELS.contains(&trimmed.to_lowercase().as_str()) {
                    return DEFAULT_YEAR;
                }
                trimmed.parse::<i32>().unwrap_or(DEFAULT_YEAR)
            }
        }
    }
}

impl From<Option<Value>> for PubYear {
    fn from(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => PubYear::Missing,
            Some(Value::Number(number)) => match number.as_i64() {
                Some(year) => PubYear::Integer(year),
                None => PubYear::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            Some(Value::String(text)) => PubYear::Text(text),
            Some(other) => PubYear::Other(other.to_string()),
        }
    }
}

impl From<i64> for PubYear {
    fn from(year: i64) -> Self {
        PubYear::Integer(year)
    }
}

impl From<i32> for PubYear {
    fn from(year: i32) -> Self {
        PubYear::Integer(year.into())
    }
}

impl From<f64> for PubYear {
    fn from(year: f64) -> Self {
        PubYear::Float(year)
    }
}

impl From<&str> for PubYear {
    fn from(text: &str) -> Self {
        PubYear::Text(text.to_string())
    }
}

impl fmt::Display for PubYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PubYear::Missing => f.write_str(NOT_AVAILABLE),
            PubYear::Integer(year) => write!(f, "{}", year),
            PubYear::Float(year) => write!(f, "{:?}", year),
            PubYear::Text(text) | PubYear::Other(text) => f.write_str(text),
        }
    }
}

/// Parse any JSON year value; never fails
pub fn parse_year(value: Option<&Value>) -> i32 {
    PubYear::from(value.cloned()).parse_year()
}

/// A paper with every field resolved to a concrete value
#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    pub title: String,
    /// Lower-cased, trimmed supplied title; empty when no title was supplied
    pub evaluation_key: String,
    pub authors: Vec<String>,
    pub pub_year: PubYear,
    pub venue: String,
    pub abstract_text: String,
    pub citation_count: u64,
    pub source: String,
    pub url: String,
    pub critic_rank: f64,
}

impl Default for Paper {
    fn default() -> Self {
        Self {
            title: UNTITLED.to_string(),
            evaluation_key: String::new(),
            authors: Vec::new(),
            pub_year: PubYear::Missing,
            venue: UNKNOWN.to_string(),
            abstract_text: NO_ABSTRACT.to_string(),
            citation_count: 0,
            source: UNKNOWN.to_string(),
            url: NOT_AVAILABLE.to_string(),
            critic_rank: 0.0,
        }
    }
}

impl From<PaperRecord> for Paper {
    fn from(record: PaperRecord) -> Self {
        let evaluation_key = record
            .title
            .as_deref()
            .map(|title| title.to_lowercase().trim().to_string())
            .unwrap_or_default();

        Self {
            title: record.title.unwrap_or_else(|| UNTITLED.to_string()),
            evaluation_key,
            authors: record.authors.unwrap_or_default(),
            pub_year: PubYear::from(record.pub_year),
            venue: record.venue.unwrap_or_else(|| UNKNOWN.to_string()),
            abstract_text: record
                .abstract_text
                .unwrap_or_else(|| NO_ABSTRACT.to_string()),
            citation_count: record.citation_count.unwrap_or(0),
            source: record.source.unwrap_or_else(|| UNKNOWN.to_string()),
            url: record.url.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            critic_rank: record.critic_rank.unwrap_or(0.0),
        }
    }
}

impl Paper {
    /// Create a paper with the given title and every other field defaulted
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            evaluation_key: title.to_lowercase().trim().to_string(),
            title,
            ..Self::default()
        }
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_year(mut self, year: impl Into<PubYear>) -> Self {
        self.pub_year = year.into();
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = text.into();
        self
    }

    pub fn with_citations(mut self, count: u64) -> Self {
        self.citation_count = count;
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.critic_rank = score;
        self
    }

    /// Publication year with defaults substituted
    pub fn year(&self) -> i32 {
        self.pub_year.parse_year()
    }

    /// Last whitespace-delimited token of the first author's name
    pub fn first_author_surname(&self) -> Option<&str> {
        self.authors
            .first()
            .and_then(|name| name.split_whitespace().last())
    }
}

/// Parse a JSON array of paper records into normalized papers
pub fn papers_from_json(json: &str) -> serde_json::Result<Vec<Paper>> {
    let records: Vec<PaperRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(Paper::from).collect())
}

/// Quality assessment produced by the upstream critic for one paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub rationale: String,
    /// Scores and other fields the critic attached, kept verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Evaluation {
    pub fn new(rationale: impl Into<String>) -> Self {
        Self {
            rationale: rationale.into(),
            extra: BTreeMap::new(),
        }
    }
}

/// Evaluations keyed by lower-cased, trimmed paper title
pub type EvaluationMap = HashMap<String, Evaluation>;

/// Title page information for a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub title: String,
    pub author: String,
    pub institution: String,
    /// Generation date, e.g. "January 13, 2026"
    pub date: String,
}

impl ReportMetadata {
    /// Build metadata stamped with today's local date
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        institution: impl Into<String>,
    ) -> Self {
        Self::with_date(title, author, institution, current_date())
    }

    pub fn with_date(
        title: impl Into<String>,
        author: impl Into<String>,
        institution: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            institution: institution.into(),
            date: date.into(),
        }
    }
}

/// Today's local date in report format
pub fn current_date() -> String {
    chrono::Local::now().format("%B %d, %Y").to_string()
}

/// Quality bracket of a paper's critic score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Exceptional,
    Excellent,
    Standard,
}

/// Litforge configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LitforgeConfig {
    pub report: ReportConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Minimum score for the exceptional tier
    pub exceptional_threshold: f64,
    /// Minimum score counted as high quality
    pub high_quality_threshold: f64,
    /// How many leading papers the abstract considers for its highlight count
    pub abstract_highlight_limit: usize,
    /// Number of papers discussed in the literature review
    pub literature_review_limit: usize,
    /// Authors listed per paper in the literature review
    pub review_author_limit: usize,
    /// Authors listed per reference
    pub reference_author_limit: usize,
    /// Abstract characters quoted in the literature review
    pub abstract_excerpt_chars: usize,
}

impl ReportConfig {
    pub fn is_high_quality(&self, score: f64) -> bool {
        score >= self.high_quality_threshold
    }

    pub fn is_exceptional(&self, score: f64) -> bool {
        score >= self.exceptional_threshold
    }

    pub fn tier(&self, score: f64) -> QualityTier {
        if self.is_exceptional(score) {
            QualityTier::Exceptional
        } else if self.is_high_quality(score) {
            QualityTier::Excellent
        } else {
            QualityTier::Standard
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output format (markdown, json, html)
    pub format: String,
    /// Output file; falls back to the report parameters when unset
    pub output_file: Option<String>,
}

mod lenient {
    //! Deserializers that turn type mismatches into absent values

    use super::*;

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        }
    }

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_text))
    }

    pub fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Array(items)) => Some(items.into_iter().filter_map(scalar_text).collect()),
            Some(Value::String(name)) => Some(vec![name]),
            _ => None,
        })
    }

    pub fn score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|score| score.is_finite()))
    }

    pub fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(number)) => number.as_u64().or_else(|| {
                number
                    .as_f64()
                    .filter(|count| count.is_finite() && *count >= 0.0)
                    .map(|count| count as u64)
            }),
            Some(Value::String(text)) => text.trim().parse::<u64>().ok(),
            _ => None,
        })
    }
}
