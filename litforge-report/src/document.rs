//! Report document type definitions
//!
//! This module defines the section kinds a report is made of and the
//! document that accumulates generated sections.

use litforge_core::ReportMetadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Report sections, declared in canonical document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Abstract,
    Introduction,
    LiteratureReview,
    Methodology,
    Findings,
    Discussion,
    Conclusion,
    Recommendations,
    References,
}

impl SectionKind {
    /// All sections in the order they appear in a report
    pub const ALL: [SectionKind; 9] = [
        SectionKind::Abstract,
        SectionKind::Introduction,
        SectionKind::LiteratureReview,
        SectionKind::Methodology,
        SectionKind::Findings,
        SectionKind::Discussion,
        SectionKind::Conclusion,
        SectionKind::Recommendations,
        SectionKind::References,
    ];

    /// Key the section is stored under
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::Abstract => "abstract",
            SectionKind::Introduction => "introduction",
            SectionKind::LiteratureReview => "literature_review",
            SectionKind::Methodology => "methodology",
            SectionKind::Findings => "findings",
            SectionKind::Discussion => "discussion",
            SectionKind::Conclusion => "conclusion",
            SectionKind::Recommendations => "recommendations",
            SectionKind::References => "references",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Generated report: optional title-page metadata plus the sections produced so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub metadata: Option<ReportMetadata>,
    sections: BTreeMap<SectionKind, String>,
}

impl ReportDocument {
    pub fn new(metadata: Option<ReportMetadata>) -> Self {
        Self {
            metadata,
            sections: BTreeMap::new(),
        }
    }

    /// Store a section, replacing any earlier version
    pub fn insert(&mut self, kind: SectionKind, content: String) {
        self.sections.insert(kind, content);
    }

    pub fn get(&self, kind: SectionKind) -> Option<&str> {
        self.sections.get(&kind).map(String::as_str)
    }

    pub fn contains(&self, kind: SectionKind) -> bool {
        self.sections.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Present sections in canonical order
    pub fn sections(&self) -> impl Iterator<Item = (SectionKind, &str)> {
        self.sections
            .iter()
            .map(|(kind, content)| (*kind, content.as_str()))
    }
}
