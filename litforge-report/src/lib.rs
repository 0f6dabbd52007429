//! Litforge Report Assembly Module
//!
//! Builds a structured academic report (abstract through references) from a
//! collection of previously collected and scored papers, and exports it.
//!
//! ```no_run
//! use litforge_report::{ReportAssembler, ReportExporter, ExportFormat};
//! use litforge_core::{EvaluationMap, Paper, ReportMetadata};
//!
//! let papers = vec![Paper::new("Attention Is All You Need").with_score(4.8)];
//! let mut assembler = ReportAssembler::new(papers, EvaluationMap::new())
//!     .with_metadata(ReportMetadata::new("Transformers", "R. Team", "Lab"));
//! assembler.generate_findings();
//! let markdown = ReportExporter::new()
//!     .render(assembler.document(), ExportFormat::Markdown)
//!     .unwrap();
//! ```

pub mod assembler;
pub mod document;
pub mod export;
pub mod params;
pub mod stats;

// Re-export main types and functions
pub use assembler::ReportAssembler;
pub use document::{ReportDocument, SectionKind};
pub use export::{ExportFormat, ReportExporter};
pub use params::{ReportParams, SearchParams, SectionInputs};
pub use stats::{top_by_score, year_range, CollectionStats};
