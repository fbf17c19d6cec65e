use crate::error::{CoreError, CoreResult};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const SPAM_TABLE_VERSION: &str = "spam_patterns_v1";
pub const PRIVACY_TABLE_VERSION: &str = "privacy_patterns_v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternTable {
    pub table_version: String,
    pub rules: Vec<PatternRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRule {
    pub rule_id: String,
    pub pattern: String,
    #[serde(default)]
    pub case_insensitive: bool,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule_id: String,
    pub reason: String,
    regex: Regex,
}

impl CompiledRule {
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// An ordered rule list; the first matching rule wins.
#[derive(Debug, Clone)]
pub struct CompiledTable {
    pub table_version: String,
    rules: Vec<CompiledRule>,
}

impl CompiledTable {
    pub fn first_match(&self, text: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.is_match(text))
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }
}

pub fn compile_table(json: &str, expected_version: &str) -> CoreResult<CompiledTable> {
    let table: PatternTable = serde_json::from_str(json)
        .map_err(|e| CoreError::PatternTable(format!("{}: {}", expected_version, e)))?;
    if table.table_version != expected_version {
        return Err(CoreError::PatternTable(format!(
            "expected table {} but found {}",
            expected_version, table.table_version
        )));
    }
    if table.rules.is_empty() {
        return Err(CoreError::PatternTable(format!(
            "table {} has no rules",
            expected_version
        )));
    }

    let mut rules = Vec::with_capacity(table.rules.len());
    for rule in table.rules {
        let regex = RegexBuilder::new(&rule.pattern)
            .case_insensitive(rule.case_insensitive)
            .build()
            .map_err(|e| {
                CoreError::PatternTable(format!("rule {} does not compile: {}", rule.rule_id, e))
            })?;
        rules.push(CompiledRule {
            rule_id: rule.rule_id,
            reason: rule.reason,
            regex,
        });
    }
    Ok(CompiledTable {
        table_version: table.table_version,
        rules,
    })
}

fn cached(
    cell: &'static OnceLock<Result<CompiledTable, String>>,
    json: &str,
    version: &str,
) -> CoreResult<&'static CompiledTable> {
    cell.get_or_init(|| compile_table(json, version).map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| CoreError::PatternTable(e.clone()))
}

/// Embedded promotional-content patterns, compiled once per process.
pub fn spam_table() -> CoreResult<&'static CompiledTable> {
    static TABLE: OnceLock<Result<CompiledTable, String>> = OnceLock::new();
    cached(&TABLE, include_str!("spam_patterns_v1.json"), SPAM_TABLE_VERSION)
}

/// Embedded personal-information patterns, compiled once per process.
pub fn privacy_table() -> CoreResult<&'static CompiledTable> {
    static TABLE: OnceLock<Result<CompiledTable, String>> = OnceLock::new();
    cached(
        &TABLE,
        include_str!("privacy_patterns_v1.json"),
        PRIVACY_TABLE_VERSION,
    )
}
