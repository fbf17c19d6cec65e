use crate::error::{CoreError, CoreResult};
use crate::submission::draft::DraftStage;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

pub const ENV_MIN_QUALITY_DRAFT_1: &str = "IDEA_MIN_QUALITY_DRAFT_1";
pub const ENV_MIN_QUALITY_DRAFT_2: &str = "IDEA_MIN_QUALITY_DRAFT_2";
pub const ENV_MIN_QUALITY_DRAFT_3: &str = "IDEA_MIN_QUALITY_DRAFT_3";
pub const ENV_BORDERLINE_MARGIN: &str = "IDEA_BORDERLINE_MARGIN";
pub const ENV_MAX_CATEGORIES: &str = "IDEA_MAX_CATEGORIES";

/// Minimum quality score a draft must reach to pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StageThresholds {
    pub draft_1: u8,
    pub draft_2: u8,
    pub draft_3: u8,
}

impl Default for StageThresholds {
    fn default() -> Self {
        StageThresholds {
            draft_1: 25,
            draft_2: 35,
            draft_3: 45,
        }
    }
}

impl StageThresholds {
    pub fn for_stage(&self, stage: DraftStage) -> u8 {
        match stage {
            DraftStage::First => self.draft_1,
            DraftStage::Second => self.draft_2,
            DraftStage::Final => self.draft_3,
        }
    }
}

/// Tunable validation policy. Heuristic constants (spam ratios, duplicate
/// threshold, word-count bounds) are fixed in their modules and not listed here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidatorConfig {
    pub min_quality: StageThresholds,
    /// Scores below `minimum + borderline_margin` pass with a warning.
    pub borderline_margin: u8,
    /// More categories than this draws a warning.
    pub max_categories: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            min_quality: StageThresholds::default(),
            borderline_margin: 15,
            max_categories: 5,
        }
    }
}

impl ValidatorConfig {
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let cfg: ValidatorConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        info!("loaded validator config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Applies `IDEA_*` environment overrides on top of `self`.
    pub fn with_env_overrides(self) -> CoreResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        override_value(&lookup, ENV_MIN_QUALITY_DRAFT_1, &mut self.min_quality.draft_1)?;
        override_value(&lookup, ENV_MIN_QUALITY_DRAFT_2, &mut self.min_quality.draft_2)?;
        override_value(&lookup, ENV_MIN_QUALITY_DRAFT_3, &mut self.min_quality.draft_3)?;
        override_value(&lookup, ENV_BORDERLINE_MARGIN, &mut self.borderline_margin)?;
        override_value(&lookup, ENV_MAX_CATEGORIES, &mut self.max_categories)?;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> CoreResult<()> {
        for stage in DraftStage::ALL {
            let min = self.min_quality.for_stage(stage);
            if min > 100 {
                return Err(CoreError::InvalidConfig(format!(
                    "minimum quality for draft {} is {} (must be 0..=100)",
                    stage, min
                )));
            }
        }
        if self.borderline_margin > 100 {
            return Err(CoreError::InvalidConfig(format!(
                "borderline_margin is {} (must be 0..=100)",
                self.borderline_margin
            )));
        }
        Ok(())
    }
}

fn override_value<F, T>(lookup: &F, key: &str, slot: &mut T) -> CoreResult<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            debug!("{key} not set, keeping {slot}");
            Ok(())
        }
        Some(raw) => {
            let parsed = raw
                .trim()
                .parse::<T>()
                .map_err(|e| CoreError::InvalidConfig(format!("invalid {key} value {raw:?}: {e}")))?;
            info!("{key} overrides {slot} with {parsed}");
            *slot = parsed;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_stage_policy() {
        let cfg = ValidatorConfig::default();
        assert_eq!(cfg.min_quality.for_stage(DraftStage::First), 25);
        assert_eq!(cfg.min_quality.for_stage(DraftStage::Second), 35);
        assert_eq!(cfg.min_quality.for_stage(DraftStage::Final), 45);
        assert_eq!(cfg.borderline_margin, 15);
        assert_eq!(cfg.max_categories, 5);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ValidatorConfig::from_json_str(r#"{"borderline_margin": 10}"#).unwrap();
        assert_eq!(cfg.borderline_margin, 10);
        assert_eq!(cfg.min_quality, StageThresholds::default());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let json = r#"{"min_quality": {"draft_1": 10, "draft_2": 20, "draft_3": 120}}"#;
        assert!(matches!(
            ValidatorConfig::from_json_str(json),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn overrides_apply_and_bad_values_fail() {
        let env: HashMap<&str, &str> =
            [(ENV_MIN_QUALITY_DRAFT_3, "60"), (ENV_MAX_CATEGORIES, " 4 ")].into();
        let cfg = ValidatorConfig::default()
            .with_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(cfg.min_quality.draft_3, 60);
        assert_eq!(cfg.max_categories, 4);
        assert_eq!(cfg.min_quality.draft_1, 25);

        let err = ValidatorConfig::default()
            .with_overrides(|k| (k == ENV_BORDERLINE_MARGIN).then(|| "lots".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_BORDERLINE_MARGIN));
    }
}
