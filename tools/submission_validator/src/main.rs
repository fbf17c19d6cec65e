use clap::{Parser, Subcommand};
use idea_core::audit::log::AuditLog;
use idea_core::audit::record::{emit_score_reconciled, now_utc_rfc3339, record_validation};
use idea_core::checks::quality::score_breakdown;
use idea_core::error::{CoreError, CoreResult};
use idea_core::submission::draft::{next_draft_stage, DraftRecord};
use idea_core::validator::reconcile::reconcile_scores;
use idea_core::{DraftStage, ExistingIdea, Submission, SubmissionValidator, ValidatorConfig};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "submission_validator")]
#[command(version)]
#[command(about = "Validate and score startup-idea submissions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a submission JSON file and print the result
    Validate {
        /// Path to the submission JSON object
        submission: PathBuf,
        /// Draft number (1, 2 or 3)
        #[arg(short, long, default_value_t = 1)]
        draft: u8,
        /// JSON array of previously accepted ideas
        #[arg(short, long)]
        corpus: Option<PathBuf>,
        /// Validator config JSON; IDEA_* environment variables override it
        #[arg(long)]
        config: Option<PathBuf>,
        /// Append the run to this hash-chained audit log
        #[arg(long)]
        audit_log: Option<PathBuf>,
        /// Externally generated overall score to compare against
        #[arg(long)]
        external_score: Option<i64>,
    },
    /// Print the quality score breakdown for a submission
    Score {
        submission: PathBuf,
        #[arg(short, long, default_value_t = 1)]
        draft: u8,
    },
    /// Print the next draft number for a user and project
    NextDraft {
        /// JSON array of stored draft records
        records: PathBuf,
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        project: String,
    },
}

fn load_json<T: DeserializeOwned>(path: &Path) -> CoreResult<T> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        CoreError::InvalidInput(format!("{}: {}", path.display(), e))
    })
}

fn load_config(path: Option<&Path>) -> CoreResult<ValidatorConfig> {
    let base = match path {
        Some(p) => ValidatorConfig::from_path(p)?,
        None => ValidatorConfig::default(),
    };
    base.with_env_overrides()
}

fn validate(
    submission_path: &Path,
    draft: u8,
    corpus_path: Option<&Path>,
    config_path: Option<&Path>,
    audit_path: Option<&Path>,
    external_score: Option<i64>,
) -> CoreResult<bool> {
    let draft = DraftStage::try_from(draft)?;
    let submission: Submission = load_json(submission_path)?;
    let corpus: Vec<ExistingIdea> = match corpus_path {
        Some(p) => load_json(p)?,
        None => Vec::new(),
    };
    let validator = SubmissionValidator::new(load_config(config_path)?)?;
    let report = validator.validate_with_trace(&submission, &corpus, draft);

    if let Some(path) = audit_path {
        let ts = now_utc_rfc3339();
        let mut audit = AuditLog::open_or_create(path)?;
        let run_id = record_validation(&mut audit, &submission, corpus.len(), &report, &ts)?;
        if external_score.is_some() {
            let reconciliation = reconcile_scores(report.result.quality_score, external_score);
            emit_score_reconciled(&mut audit, &run_id, &submission, &reconciliation, &ts)?;
        }
        info!(run_id = %run_id, path = %path.display(), "audit log updated");
    }

    let mut out = serde_json::to_value(&report.result)?;
    if external_score.is_some() {
        out["scoreReconciliation"] = serde_json::to_value(reconcile_scores(
            report.result.quality_score,
            external_score,
        ))?;
    }
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(report.result.passed)
}

fn score(submission_path: &Path, draft: u8) -> CoreResult<()> {
    let draft = DraftStage::try_from(draft)?;
    let submission: Submission = load_json(submission_path)?;
    let breakdown = score_breakdown(&submission, draft);
    let mut out = serde_json::to_value(&breakdown)?;
    out["total"] = serde_json::json!(breakdown.total());
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn next_draft(records_path: &Path, user: &str, project: &str) -> CoreResult<()> {
    let records: Vec<DraftRecord> = load_json(records_path)?;
    let stage = next_draft_stage(&records, user, project)?;
    println!("{}", stage);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate {
            submission,
            draft,
            corpus,
            config,
            audit_log,
            external_score,
        } => validate(
            &submission,
            draft,
            corpus.as_deref(),
            config.as_deref(),
            audit_log.as_deref(),
            external_score,
        ),
        Commands::Score { submission, draft } => score(&submission, draft).map(|_| true),
        Commands::NextDraft {
            records,
            user,
            project,
        } => next_draft(&records, &user, &project).map(|_| true),
    };

    match result {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{}", e);
            eprintln!("submission_validator error: {}", e);
            std::process::exit(2);
        }
    }
}
