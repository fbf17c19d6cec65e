use idea_core::audit::log::AuditLog;
use idea_core::audit::record::{now_utc_rfc3339, record_validation};
use idea_core::error::CoreResult;
use idea_core::validator::{tags, ValidationResult};
use idea_core::{DraftStage, ExistingIdea, Submission, SubmissionValidator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DUPLICATE_IDEA: &str = "Our service pairs retired engineers with rural schools so that \
    students can build working robots during weekly after school clubs while volunteers mentor \
    them remotely through video sessions covering design coding wiring testing and final \
    presentations to their proud parents";

struct Scenario {
    id: &'static str,
    draft: DraftStage,
    submission: Submission,
    corpus: Vec<ExistingIdea>,
    expect: fn(&ValidationResult) -> bool,
}

fn detailed_final() -> CoreResult<Submission> {
    Ok(serde_json::from_str(include_str!("fixtures/detailed_final.json"))?)
}

fn scenarios() -> CoreResult<Vec<Scenario>> {
    let detailed = detailed_final()?;

    let missing = Submission {
        customer_profile: Some(
            "Busy single parents aged 25-40 balancing work and childcare".to_string(),
        ),
        product_idea: Some(
            "A mobile app that schedules grocery delivery automatically based on household \
             consumption patterns sensed via smart fridge integration"
                .to_string(),
        ),
        pain_points: Some(String::new()),
        alternatives: Some(String::new()),
        ..Default::default()
    };

    let promotional = Submission {
        product_idea: Some("BUY NOW!!! LIMITED TIME DISCOUNT www.example.com".to_string()),
        ..detailed.clone()
    };

    let original = Submission {
        product_idea: Some(DUPLICATE_IDEA.to_string()),
        ..detailed.clone()
    };
    let near_copy = Submission {
        user_name: "ben".to_string(),
        project_name: "robot-clubs".to_string(),
        product_idea: Some(
            DUPLICATE_IDEA
                .replace("retired", "former")
                .replace("weekly", "monthly"),
        ),
        ..detailed.clone()
    };
    let mut seed = ExistingIdea::from(&original);
    seed.id = Some("seed-1".to_string());

    Ok(vec![
        Scenario {
            id: "SCN.MISSING_REQUIRED_FIELDS",
            draft: DraftStage::First,
            submission: missing,
            corpus: vec![],
            expect: |r| {
                !r.passed
                    && r.errors
                        .contains(&"REQUIRED_FIELD_MISSING: pain_points".to_string())
                    && r.errors
                        .contains(&"REQUIRED_FIELD_MISSING: alternatives".to_string())
            },
        },
        Scenario {
            id: "SCN.PROMOTIONAL_CONTENT",
            draft: DraftStage::First,
            submission: promotional,
            corpus: vec![],
            expect: |r| {
                !r.passed
                    && r.errors
                        .contains(&"SPAM: Contains promotional/marketing content".to_string())
            },
        },
        Scenario {
            id: "SCN.NEAR_DUPLICATE_FINAL",
            draft: DraftStage::Final,
            submission: near_copy,
            corpus: vec![seed],
            expect: |r| !r.passed && r.has_error_tag(tags::DUPLICATE),
        },
        Scenario {
            id: "SCN.DETAILED_FINAL",
            draft: DraftStage::Final,
            submission: detailed,
            corpus: vec![],
            expect: |r| r.passed && r.quality_score >= 80,
        },
    ])
}

fn main() {
    // Runs every built-in scenario twice, checks the expected verdict and that
    // both runs serialize to identical bytes, and records each run in a
    // throwaway audit log whose chain is verified at the end.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let validator = SubmissionValidator::with_defaults().expect("validator with default config");
    let scenarios = scenarios().expect("embedded scenarios");

    let tmp = tempfile::tempdir().expect("tempdir");
    let mut audit = AuditLog::open_or_create(tmp.path().join("audit_log.ndjson"))
        .expect("open audit log");
    let ts = now_utc_rfc3339();

    let mut any_fail = false;
    for sc in &scenarios {
        let first = validator.validate_with_trace(&sc.submission, &sc.corpus, sc.draft);
        let second = validator.validate_with_trace(&sc.submission, &sc.corpus, sc.draft);

        let a = serde_json::to_vec(&first.result).expect("serialize result");
        let b = serde_json::to_vec(&second.result).expect("serialize result");
        let stable = a == b;
        let expected = (sc.expect)(&first.result);

        record_validation(&mut audit, &sc.submission, sc.corpus.len(), &first, &ts)
            .expect("record validation");

        let outcome = if stable && expected { "PASS" } else { "FAIL" };
        println!(
            "SCENARIO {} {} passed={} score={} errors={}",
            sc.id,
            outcome,
            first.result.passed,
            first.result.quality_score,
            first.result.errors.len()
        );
        if !stable {
            warn!(scenario = sc.id, "validation output differs between runs");
        }
        if outcome == "FAIL" {
            any_fail = true;
        }
    }

    match audit.verify_chain() {
        Ok(()) => println!("AUDIT_CHAIN PASS"),
        Err(e) => {
            println!("AUDIT_CHAIN FAIL {}", e);
            any_fail = true;
        }
    }
    info!(scenarios = scenarios.len(), failed = any_fail, "scenario run complete");

    if any_fail {
        std::process::exit(1);
    }
}
