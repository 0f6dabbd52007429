//! Report export functionality
//!
//! This module serializes a [`ReportDocument`] to Markdown, JSON or HTML and
//! writes it to disk.

use crate::document::ReportDocument;
use litforge_core::{current_date, ErrorContext, LitforgeError, LitforgeResult, UNKNOWN};
use pulldown_cmark::{html, Options, Parser};
use pulldown_cmark_escape::escape_html;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info};

const DEFAULT_TITLE: &str = "Research Report";

/// Export formats supported by the report exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Single Markdown document
    #[default]
    Markdown,
    /// Pretty-printed JSON of the document structure
    Json,
    /// Standalone HTML page
    Html,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = LitforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            "html" => Ok(ExportFormat::Html),
            other => Err(LitforgeError::Config {
                message: format!("Unsupported export format: {}", other),
                source: None,
                context: ErrorContext::new("report_export")
                    .with_operation("parse_format")
                    .with_suggestion("Use one of: markdown, json, html"),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        })
    }
}

/// Report exporter that handles different output formats
#[derive(Debug, Clone, Default)]
pub struct ReportExporter;

impl ReportExporter {
    pub fn new() -> Self {
        Self
    }

    /// Render a document to text in the given format
    pub fn render(
        &self,
        document: &ReportDocument,
        format: ExportFormat,
    ) -> LitforgeResult<String> {
        match format {
            ExportFormat::Markdown => Ok(self.render_markdown(document)),
            ExportFormat::Json => self.render_json(document),
            ExportFormat::Html => self.render_html(document),
        }
    }

    /// Render and write a document, creating parent directories as needed
    pub async fn export(
        &self,
        document: &ReportDocument,
        format: ExportFormat,
        output_path: impl AsRef<Path>,
    ) -> LitforgeResult<PathBuf> {
        let output_path = output_path.as_ref();
        info!("Exporting report as {} to: {:?}", format, output_path);

        let content = self.render(document, format)?;

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| export_error(output_path, "create_dir", e))?;
        }

        fs::write(output_path, content.as_bytes())
            .await
            .map_err(|e| export_error(output_path, "write_file", e))?;

        info!(
            "Successfully exported {} sections ({} bytes)",
            document.len(),
            content.len()
        );
        Ok(output_path.to_path_buf())
    }

    /// Title block followed by every present section in canonical order
    pub fn render_markdown(&self, document: &ReportDocument) -> String {
        let metadata = document.metadata.as_ref();
        let title = metadata.map_or(DEFAULT_TITLE, |m| m.title.as_str());
        let author = metadata.map_or(UNKNOWN, |m| m.author.as_str());
        let institution = metadata.map_or(UNKNOWN, |m| m.institution.as_str());
        let date = metadata.map_or_else(current_date, |m| m.date.clone());

        let mut content = format!("# {}\n\n", title);
        content.push_str(&format!("**Author:** {}\n\n", author));
        content.push_str(&format!("**Institution:** {}\n\n", institution));
        content.push_str(&format!("**Date:** {}\n\n", date));
        content.push_str("---\n\n");

        for (kind, section) in document.sections() {
            if section.is_empty() {
                continue;
            }
            debug!("Rendering section: {}", kind);
            content.push_str(section);
            content.push_str("\n\n");
        }

        content
    }

    fn render_json(&self, document: &ReportDocument) -> LitforgeResult<String> {
        serde_json::to_string_pretty(document).map_err(|e| LitforgeError::Export {
            message: format!("Failed to serialize report to JSON: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("report_export").with_operation("render_json"),
        })
    }

    fn render_html(&self, document: &ReportDocument) -> LitforgeResult<String> {
        let markdown = self.render_markdown(document);
        let mut body = String::new();
        html::push_html(&mut body, Parser::new_ext(&markdown, Options::ENABLE_TABLES));

        let title = document
            .metadata
            .as_ref()
            .map_or(DEFAULT_TITLE, |m| m.title.as_str());

        let mut escaped_title = String::with_capacity(title.len());
        escape_html(&mut escaped_title, title).map_err(|e| LitforgeError::Export {
            message: format!("Failed to escape report title: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("report_export").with_operation("render_html"),
        })?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <style>{}</style>
</head>
<body>
    <main class="container">
{}
    </main>
</body>
</html>
"#,
            escaped_title, STYLESHEET, body
        ))
    }
}

fn export_error(path: &Path, operation: &str, error: std::io::Error) -> LitforgeError {
    LitforgeError::Export {
        message: format!("Failed to write {}: {}", path.display(), error),
        source: Some(Box::new(error)),
        context: ErrorContext::new("report_export")
            .with_operation(operation)
            .with_metadata("path", &path.display().to_string())
            .with_suggestion("Check if the output directory is writable"),
    }
}

const STYLESHEET: &str = r#"
body {
    font-family: Georgia, 'Times New Roman', serif;
    line-height: 1.6;
    color: #222;
    margin: 0;
    background-color: #f5f5f5;
}
.container {
    max-width: 860px;
    margin: 0 auto;
    padding: 40px;
    background-color: white;
}
table {
    border-collapse: collapse;
}
th, td {
    border: 1px solid #ccc;
    padding: 4px 12px;
}
"#;
