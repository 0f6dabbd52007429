//! Collection statistics
//!
//! Every figure quoted in a report comes from [`CollectionStats`], so a count
//! rendered in the abstract is the same count rendered in the findings table.

use litforge_core::{Paper, QualityTier, ReportConfig, FALLBACK_YEAR_RANGE};
use serde::Serialize;
use std::collections::HashSet;

/// Aggregates over a paper collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    pub total_papers: usize,
    /// Papers at or above the exceptional threshold
    pub exceptional: usize,
    /// High-quality papers below the exceptional threshold
    pub excellent: usize,
    /// Papers at or above the high-quality threshold
    pub high_quality: usize,
    /// High-quality papers among the leading abstract candidates
    pub highlighted: usize,
    pub distinct_venues: usize,
    pub year_range: (i32, i32),
    pub total_citations: u64,
}

impl CollectionStats {
    pub fn compute(papers: &[Paper], config: &ReportConfig) -> Self {
        let mut exceptional = 0;
        let mut excellent = 0;
        for paper in papers {
            match config.tier(paper.critic_rank) {
                QualityTier::Exceptional => exceptional += 1,
                QualityTier::Excellent => excellent += 1,
                QualityTier::Standard => {}
            }
        }
        let high_quality = exceptional + excellent;

        let highlighted = papers
            .iter()
            .filter(|p| config.is_high_quality(p.critic_rank))
            .take(config.abstract_highlight_limit)
            .count();

        let distinct_venues = papers
            .iter()
            .map(|p| p.venue.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_papers: papers.len(),
            exceptional,
            excellent,
            high_quality,
            highlighted,
            distinct_venues,
            year_range: year_range(papers),
            total_citations: papers.iter().map(|p| p.citation_count).sum(),
        }
    }

    pub fn start_year(&self) -> i32 {
        self.year_range.0
    }

    pub fn end_year(&self) -> i32 {
        self.year_range.1
    }
}

/// Earliest and latest publication year, defaults substituted.
///
/// An empty collection reports [`FALLBACK_YEAR_RANGE`]. Papers without a usable
/// year count as the default year, so a collection where every year is missing
/// reports `(2020, 2020)` rather than the fallback range.
pub fn year_range(papers: &[Paper]) -> (i32, i32) {
    let mut years = papers.iter().map(Paper::year);
    let Some(first) = years.next() else {
        return FALLBACK_YEAR_RANGE;
    };
    years.fold((first, first), |(min, max), year| {
        (min.min(year), max.max(year))
    })
}

/// The `limit` highest-scoring papers, ties kept in collection order
pub fn top_by_score(papers: &[Paper], limit: usize) -> Vec<&Paper> {
    let mut ranked: Vec<&Paper> = papers.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.critic_rank.total_cmp(&a.critic_rank));
    ranked.truncate(limit);
    ranked
}
