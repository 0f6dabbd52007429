//! Litforge CLI - Command-line interface for Litforge
//!
//! Assembles an academic report from collected papers, critic evaluations and
//! report parameters stored as JSON files.

use clap::{Parser, Subcommand};
use litforge_core::{
    init_logging, log_operation_error, log_operation_start, log_operation_success,
    papers_from_json, ErrorContext, EvaluationMap, LitforgeConfig, LitforgeError,
    LitforgeResult, LoggingConfig, Paper,
};
use litforge_report::{
    CollectionStats, ExportFormat, ReportAssembler, ReportExporter, ReportParams,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "litforge")]
#[command(about = "Assemble academic literature reports from scored papers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a full report
    Generate {
        /// JSON array of collected papers
        #[arg(short, long)]
        papers: PathBuf,

        /// JSON object of critic evaluations keyed by lower-cased title
        #[arg(short, long)]
        evaluations: Option<PathBuf>,

        /// JSON object with the report parameters
        #[arg(long)]
        params: PathBuf,

        /// Output file (defaults to the params' output_file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (markdown, json, html)
        #[arg(short, long)]
        format: Option<String>,

        /// Print the report instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Print collection statistics as JSON
    Stats {
        /// JSON array of collected papers
        #[arg(short, long)]
        papers: PathBuf,
    },

    /// Manage configuration
    Config {
        /// Initialize default configuration
        #[arg(long)]
        init: bool,

        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Validate current configuration
        #[arg(long)]
        validate: bool,
    },
}

#[tokio::main]
async fn main() -> LitforgeResult<()> {
    let cli = Cli::parse();

    let config = config_for_command(&cli.command, cli.config.as_ref())?;

    let mut logging_config: LoggingConfig = config.logging.clone();
    if cli.verbose {
        logging_config.level = "debug".to_string();
        logging_config.filter_directives = vec![
            "litforge_core=debug".to_string(),
            "litforge_report=debug".to_string(),
        ];
    }

    init_logging(&logging_config).map_err(|e| LitforgeError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check logging configuration"),
    })?;

    info!("Starting Litforge CLI v{}", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Generate {
            papers,
            evaluations,
            params,
            output,
            format,
            stdout,
        } => {
            handle_generate(
                &papers,
                evaluations.as_deref(),
                &params,
                output,
                format,
                stdout,
                &config,
            )
            .await
        }
        Commands::Stats { papers } => handle_stats(&papers, &config).await,
        Commands::Config {
            init,
            show,
            validate,
        } => handle_config(cli.config, init, show, validate, &config),
    };

    if let Err(e) = &result {
        e.log();
    }
    result
}

/// `config --init` starts from defaults; its target may be missing or invalid.
fn config_for_command(
    command: &Commands,
    config_path: Option<&PathBuf>,
) -> LitforgeResult<LitforgeConfig> {
    match command {
        Commands::Config { init: true, .. } => Ok(LitforgeConfig::default()),
        _ => load_config(config_path),
    }
}

fn load_config(config_path: Option<&PathBuf>) -> LitforgeResult<LitforgeConfig> {
    if let Some(path) = config_path {
        return LitforgeConfig::from_file(path);
    }

    let default_paths = [
        dirs::config_dir().map(|d| d.join("litforge").join("config.toml")),
        LitforgeConfig::default_path(),
        Some(PathBuf::from("litforge.toml")),
    ];

    for path in default_paths.iter().flatten() {
        if path.exists() {
            return LitforgeConfig::from_file(path);
        }
    }

    Ok(LitforgeConfig::default())
}

async fn read_input(path: &Path, what: &str) -> LitforgeResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LitforgeError::InvalidInput {
            message: format!("Failed to read {} file {}: {}", what, path.display(), e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("cli")
                .with_operation("read_input")
                .with_metadata("path", &path.display().to_string()),
        })
}

fn invalid_json(path: &Path, what: &str, error: serde_json::Error) -> LitforgeError {
    LitforgeError::InvalidInput {
        message: format!("Malformed {} JSON in {}: {}", what, path.display(), error),
        source: Some(Box::new(error)),
        context: ErrorContext::new("cli")
            .with_operation("parse_input")
            .with_metadata("path", &path.display().to_string()),
    }
}

async fn load_papers(path: &Path) -> LitforgeResult<Vec<Paper>> {
    let json = read_input(path, "papers").await?;
    papers_from_json(&json).map_err(|e| invalid_json(path, "papers", e))
}

async fn load_evaluations(path: Option<&Path>) -> LitforgeResult<EvaluationMap> {
    let Some(path) = path else {
        return Ok(EvaluationMap::new());
    };
    let json = read_input(path, "evaluations").await?;
    serde_json::from_str(&json).map_err(|e| invalid_json(path, "evaluations", e))
}

async fn handle_generate(
    papers_path: &Path,
    evaluations_path: Option<&Path>,
    params_path: &Path,
    output: Option<PathBuf>,
    format: Option<String>,
    stdout: bool,
    config: &LitforgeConfig,
) -> LitforgeResult<()> {
    log_operation_start!("generate_report", papers = %papers_path.display());

    let papers = load_papers(papers_path).await?;
    let evaluations = load_evaluations(evaluations_path).await?;
    let params_json = read_input(params_path, "params").await?;
    let params: ReportParams =
        serde_json::from_str(&params_json).map_err(|e| invalid_json(params_path, "params", e))?;

    let format: ExportFormat = format
        .as_deref()
        .unwrap_or(config.export.format.as_str())
        .parse()?;

    let mut assembler = ReportAssembler::new(papers, evaluations)
        .with_config(config.report.clone())
        .with_metadata(params.metadata());

    let document = assembler.generate_full_report(&params).map_err(|e| {
        log_operation_error!("generate_report", e);
        e
    })?;

    let exporter = ReportExporter::new();
    if stdout {
        println!("{}", exporter.render(document, format)?);
        return Ok(());
    }

    let output_path = output
        .or_else(|| config.export.output_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(params.output_file_or_default()));

    let written = exporter.export(document, format, &output_path).await?;

    log_operation_success!(
        "generate_report",
        sections = document.len(),
        output = %written.display()
    );
    println!("Report exported: {}", written.display());
    Ok(())
}

async fn handle_stats(papers_path: &Path, config: &LitforgeConfig) -> LitforgeResult<()> {
    let papers = load_papers(papers_path).await?;
    let stats = CollectionStats::compute(&papers, &config.report);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn handle_config(
    config_path: Option<PathBuf>,
    init: bool,
    show: bool,
    validate: bool,
    config: &LitforgeConfig,
) -> LitforgeResult<()> {
    if init {
        let path = config_path
            .or_else(LitforgeConfig::default_path)
            .unwrap_or_else(|| PathBuf::from("litforge.toml"));
        LitforgeConfig::default().save_to_file(&path)?;
        println!("Configuration initialized at: {}", path.display());
    }

    if show {
        let rendered = toml::to_string_pretty(config).map_err(|e| LitforgeError::Config {
            message: format!("Failed to render configuration: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("cli").with_operation("show_config"),
        })?;
        println!("{}", rendered);
    }

    if validate {
        config.validate()?;
        println!("Configuration is valid");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_generate_arguments() {
        let cli = Cli::try_parse_from([
            "litforge",
            "--verbose",
            "generate",
            "--papers",
            "papers.json",
            "--params",
            "params.json",
            "--format",
            "html",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Generate {
                papers,
                evaluations,
                format,
                stdout,
                ..
            } => {
                assert_eq!(papers, PathBuf::from("papers.json"));
                assert!(evaluations.is_none());
                assert_eq!(format.as_deref(), Some("html"));
                assert!(!stdout);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_generate_requires_params() {
        assert!(Cli::try_parse_from(["litforge", "generate", "--papers", "p.json"]).is_err());
    }

    #[test]
    fn test_load_explicit_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("litforge.toml");
        std::fs::write(&path, "[report]\nhigh_quality_threshold = 3.5\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.report.high_quality_threshold, 3.5);
        assert_eq!(config.report.exceptional_threshold, 4.5);
    }

    fn init_at(path: &Path) -> LitforgeResult<()> {
        let cli = Cli::try_parse_from([
            "litforge",
            "--config",
            path.to_str().unwrap(),
            "config",
            "--init",
        ])
        .unwrap();

        let config = config_for_command(&cli.command, cli.config.as_ref())?;
        match cli.command {
            Commands::Config {
                init,
                show,
                validate,
            } => handle_config(cli.config, init, show, validate, &config),
            _ => panic!("expected config command"),
        }
    }

    #[test]
    fn test_config_init_creates_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fresh").join("litforge.toml");

        init_at(&path).unwrap();

        assert!(path.exists());
        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.report, LitforgeConfig::default().report);
    }

    #[test]
    fn test_config_init_resets_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("litforge.toml");
        std::fs::write(
            &path,
            "[report]\nexceptional_threshold = 4.0\nhigh_quality_threshold = 4.8\n",
        )
        .unwrap();
        assert!(load_config(Some(&path)).is_err());

        init_at(&path).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.report.exceptional_threshold, 4.5);
    }

    #[test]
    fn test_other_commands_still_require_readable_config() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("absent.toml");
        let command = Commands::Config {
            init: false,
            show: true,
            validate: false,
        };
        assert!(config_for_command(&command, Some(&missing)).is_err());
    }

    #[tokio::test]
    async fn test_generate_writes_markdown_report() {
        let temp_dir = TempDir::new().unwrap();
        let papers = temp_dir.path().join("papers.json");
        let params = temp_dir.path().join("params.json");
        let output = temp_dir.path().join("reports").join("report.md");

        std::fs::write(
            &papers,
            r#"[{"title": "Deep Nets", "authors": ["Ada Lovelace"], "pub_year": 2021, "venue": "NeurIPS", "critic_rank": 4.7}]"#,
        )
        .unwrap();
        std::fs::write(
            &params,
            r#"{
                "research_question": "Do larger networks generalize better?",
                "key_findings": "Scale helps",
                "subject": "neural networks",
                "context": "Deep learning has grown quickly",
                "objectives": ["Survey scaling results"],
                "search_params": {"subject": "neural networks", "start_year": 2020, "end_year": "2024"},
                "key_insights": ["Bigger models transfer better"],
                "summary": "Scaling works within limits",
                "recommendations": ["Report compute budgets"],
                "title": "Neural Networks Review"
            }"#,
        )
        .unwrap();

        handle_generate(
            &papers,
            None,
            &params,
            Some(output.clone()),
            None,
            false,
            &LitforgeConfig::default(),
        )
        .await
        .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("# Neural Networks Review\n\n"));
        assert!(content.contains("# REFERENCES"));
    }

    #[tokio::test]
    async fn test_generate_rejects_malformed_papers() {
        let temp_dir = TempDir::new().unwrap();
        let papers = temp_dir.path().join("papers.json");
        std::fs::write(&papers, "{not json").unwrap();

        let err = load_papers(&papers).await.unwrap_err();
        assert!(matches!(err, LitforgeError::InvalidInput { .. }));
    }
}
