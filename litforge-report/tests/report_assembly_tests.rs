//! End-to-end tests for report assembly and export

use litforge_core::{papers_from_json, Evaluation, EvaluationMap, Paper, ReportMetadata};
use litforge_report::{
    CollectionStats, ExportFormat, ReportAssembler, ReportExporter, ReportParams, SearchParams,
    SectionKind,
};
use serde_json::json;
use tempfile::TempDir;

fn collection() -> Vec<Paper> {
    vec![
        Paper::new("Protein Folding at Scale")
            .with_authors(["Maria Chen", "Li Wei"])
            .with_year(2019)
            .with_venue("Nature")
            .with_citations(120)
            .with_score(4.8),
        Paper::new("Sparse Attention Revisited")
            .with_authors(["Tom Baker"])
            .with_year(2023)
            .with_venue("NeurIPS")
            .with_citations(30)
            .with_score(4.1),
        Paper::new("A Negative Result")
            .with_authors(["Ana Alvarez"])
            .with_year(2021)
            .with_venue("Nature")
            .with_citations(2)
            .with_score(2.5),
    ]
}

fn complete_params() -> ReportParams {
    ReportParams {
        research_question: Some("machine learning for biology".to_string()),
        key_findings: Some("Learned models now rival experiments.".to_string()),
        subject: Some("computational biology".to_string()),
        context: Some("Compute has become cheap.".to_string()),
        objectives: Some(vec!["Map the field".to_string(), "Find gaps".to_string()]),
        search_params: Some(SearchParams::new("protein folding", 2018, 2024)),
        key_insights: Some(vec!["Scale matters".to_string()]),
        summary: Some("The field is maturing.".to_string()),
        recommendations: Some(vec!["Share datasets".to_string()]),
        title: Some("ML in Biology".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_full_report_has_every_section_in_order() {
    let mut assembler = ReportAssembler::new(collection(), EvaluationMap::new());
    let document = assembler.generate_full_report(&complete_params()).unwrap();

    let kinds: Vec<SectionKind> = document.sections().map(|(kind, _)| kind).collect();
    assert_eq!(kinds, SectionKind::ALL.to_vec());

    let markdown = ReportExporter::new().render_markdown(document);
    let headings = [
        "# 1. INTRODUCTION",
        "# 2. LITERATURE REVIEW",
        "# 3. METHODOLOGY",
        "# 4. FINDINGS",
        "# 5. DISCUSSION",
        "# 6. CONCLUSION",
        "# 7. RECOMMENDATIONS",
        "# REFERENCES",
    ];
    let positions: Vec<usize> = headings
        .iter()
        .map(|heading| markdown.find(heading).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_statistics_agree_across_sections() {
    let papers = collection();
    let mut assembler = ReportAssembler::new(papers.clone(), EvaluationMap::new());
    let stats = CollectionStats::compute(&papers, assembler.config());
    assert_eq!(stats.total_papers, 3);
    assert_eq!(stats.exceptional, 1);
    assert_eq!(stats.high_quality, 2);
    assert_eq!(stats.distinct_venues, 2);
    assert_eq!(stats.year_range, (2019, 2023));

    let document = assembler.generate_full_report(&complete_params()).unwrap();

    let abstract_text = document.get(SectionKind::Abstract).unwrap();
    assert!(abstract_text.contains("A systematic review of 3 peer-reviewed publications"));
    assert!(abstract_text.contains("across 2 distinct research venues"));
    assert!(abstract_text.contains("Papers published between 2019 and 2023"));

    let findings = document.get(SectionKind::Findings).unwrap();
    assert!(findings.contains("| Total Papers | 3 |"));
    assert!(findings.contains("| Exceptional (≥4.5) | 1 |"));
    assert!(findings.contains("| High Quality (≥4.0) | 2 |"));
    assert!(findings.contains("| Year Range | 2019-2023 |"));
    assert!(findings.contains("| Total Citations | 152 |"));

    let methodology = document.get(SectionKind::Methodology).unwrap();
    assert!(methodology.contains("- Total papers retrieved: 3"));
    assert!(methodology.contains("classified as high-quality (2 papers)"));

    let introduction = document.get(SectionKind::Introduction).unwrap();
    assert!(introduction.contains("the 3 scholarly publications"));
    assert!(introduction.contains("publications from 2019 to 2023"));
}

#[test]
fn test_missing_parameter_leaves_document_untouched() {
    let mut assembler = ReportAssembler::new(collection(), EvaluationMap::new());
    assembler.generate_findings();
    let before = assembler.document().clone();

    let params = ReportParams {
        summary: None,
        ..complete_params()
    };
    let err = assembler.generate_full_report(&params).unwrap_err();

    assert_eq!(err.missing_parameter(), Some("summary"));
    assert_eq!(assembler.document(), &before);
    assert!(!assembler.document().contains(SectionKind::Abstract));
}

#[test]
fn test_first_missing_parameter_is_reported() {
    let mut assembler = ReportAssembler::new(collection(), EvaluationMap::new());
    let params = ReportParams {
        context: None,
        recommendations: None,
        ..complete_params()
    };

    let err = assembler.generate_full_report(&params).unwrap_err();
    assert_eq!(err.missing_parameter(), Some("context"));
}

#[test]
fn test_report_from_loosely_typed_json() {
    let papers = papers_from_json(
        &json!([
            {
                "title": "Graph Kernels",
                "authors": ["Sam Young"],
                "pub_year": "2017",
                "venue": "ICML",
                "abstract": "x".repeat(500),
                "citation_count": "12",
                "source": "arXiv",
                "url": "https://arxiv.org/abs/1",
                "critic_rank": "4.6"
            },
            {"title": "Untyped", "pub_year": "N/A", "critic_rank": null}
        ])
        .to_string(),
    )
    .unwrap();

    let mut evaluations = EvaluationMap::new();
    evaluations.insert(
        "graph kernels".to_string(),
        Evaluation::new("Strong theoretical grounding"),
    );

    let mut assembler = ReportAssembler::new(papers, evaluations);
    let review = assembler.generate_literature_review();

    assert!(review.contains("### 2.2.1 Graph Kernels"));
    assert!(review.contains("**Authors:** Sam Young (2017)"));
    assert!(review.contains(&format!("{}...\n\n", "x".repeat(400))));
    assert!(!review.contains(&"x".repeat(401)));
    assert!(review.contains("*Assessment: Strong theoretical grounding*"));
    assert!(review.contains("**Authors:** Unknown (N/A)"));

    let stats = assembler.stats();
    assert_eq!(stats.total_citations, 12);
    assert_eq!(stats.year_range, (2017, 2020));

    let references = assembler.generate_references();
    let young = references.find("1. Sam Young (2017). Graph Kernels.").unwrap();
    let untyped = references.find("2. Unknown (N/A). Untyped.").unwrap();
    assert!(young < untyped);
}

#[test]
fn test_tied_scores_keep_input_order() {
    let papers: Vec<Paper> = ["First", "Second", "Third"]
        .into_iter()
        .map(|title| Paper::new(title).with_score(4.0))
        .collect();
    let mut assembler = ReportAssembler::new(papers, EvaluationMap::new());
    let review = assembler.generate_literature_review();

    assert!(review.contains("### 2.2.1 First"));
    assert!(review.contains("### 2.2.2 Second"));
    assert!(review.contains("### 2.2.3 Third"));
}

#[test]
fn test_empty_collection_still_produces_report() {
    let mut assembler = ReportAssembler::new(Vec::<Paper>::new(), EvaluationMap::new());
    let document = assembler.generate_full_report(&complete_params()).unwrap();

    assert_eq!(document.len(), SectionKind::ALL.len());
    assert!(document
        .get(SectionKind::Findings)
        .unwrap()
        .contains("| Year Range | 2020-2025 |"));
    assert_eq!(
        document.get(SectionKind::References),
        Some("# REFERENCES\n\n")
    );
}

#[tokio::test]
async fn test_export_skips_sections_never_generated() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("partial.md");

    let mut assembler = ReportAssembler::new(collection(), EvaluationMap::new()).with_metadata(
        ReportMetadata::with_date("Partial", "A. Author", "Somewhere", "January 05, 2026"),
    );
    assembler.generate_findings();
    assembler.generate_references();

    let written = ReportExporter::new()
        .export(assembler.document(), ExportFormat::Markdown, &path)
        .await
        .unwrap();
    let content = std::fs::read_to_string(written).unwrap();

    assert!(content.starts_with("# Partial\n\n**Author:** A. Author\n\n"));
    assert!(content.contains("**Date:** January 05, 2026"));
    assert!(content.contains("# 4. FINDINGS"));
    assert!(content.contains("# REFERENCES"));
    assert!(!content.contains("INTRODUCTION"));
    assert!(!content.contains("This report presents"));
}
