use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Additive power bonus for the home side.
pub const HOME_ADVANTAGE: f64 = 5.0;
/// Symmetric cap on the form differential fed into the home power.
pub const FORM_BONUS_CAP: f64 = 5.0;
/// Goals shared out between the two sides before rounding.
pub const GOAL_SCALE: f64 = 3.0;
/// Largest accepted `goal_scale` magnitude; keeps rounded scores well inside `i64`.
pub const MAX_GOAL_SCALE: f64 = i32::MAX as f64;

pub const ENV_HOME_ADVANTAGE: &str = "PREDICTOR_HOME_ADVANTAGE";
pub const ENV_FORM_BONUS_CAP: &str = "PREDICTOR_FORM_BONUS_CAP";
pub const ENV_GOAL_SCALE: &str = "PREDICTOR_GOAL_SCALE";
pub const ENV_ROUNDING: &str = "PREDICTOR_ROUNDING";

/// How `x.5` quotients are resolved when normalizing onto the goal scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Banker's rounding: 0.5 -> 0, 1.5 -> 2, 2.5 -> 2.
    #[default]
    HalfEven,
    /// 0.5 -> 1, 2.5 -> 3, -0.5 -> -1.
    HalfAwayFromZero,
}

impl RoundingMode {
    pub fn round(self, v: f64) -> f64 {
        match self {
            RoundingMode::HalfEven => v.round_ties_even(),
            RoundingMode::HalfAwayFromZero => v.round(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoundingMode::HalfEven => "half_even",
            RoundingMode::HalfAwayFromZero => "half_away_from_zero",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().replace('-', "_").as_str() {
            "half_even" | "even" | "bankers" => Some(RoundingMode::HalfEven),
            "half_away_from_zero" | "half_up" | "away" => Some(RoundingMode::HalfAwayFromZero),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    pub home_advantage: f64,
    pub form_bonus_cap: f64,
    pub goal_scale: f64,
    pub rounding: RoundingMode,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            home_advantage: HOME_ADVANTAGE,
            form_bonus_cap: FORM_BONUS_CAP,
            goal_scale: GOAL_SCALE,
            rounding: RoundingMode::HalfEven,
        }
    }
}

impl ModelParams {
    pub fn validate(&self) -> Result<()> {
        let numbers = [
            ("home_advantage", self.home_advantage),
            ("form_bonus_cap", self.form_bonus_cap),
            ("goal_scale", self.goal_scale),
        ];
        for (name, value) in numbers {
            if !value.is_finite() {
                bail!("{name} must be finite, got {value}");
            }
        }
        if self.goal_scale.abs() > MAX_GOAL_SCALE {
            bail!(
                "goal_scale must be within +/-{MAX_GOAL_SCALE}, got {}",
                self.goal_scale
            );
        }
        if self.form_bonus_cap < 0.0 {
            bail!(
                "form_bonus_cap must not be negative, got {}",
                self.form_bonus_cap
            );
        }
        Ok(())
    }

    /// Applies `PREDICTOR_*` overrides read through `lookup`.
    ///
    /// Blank values are skipped and reported in `warnings`; values that fail to
    /// parse are errors.
    pub fn apply_overrides<F>(mut self, lookup: F, warnings: &mut Vec<String>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let numbers: [(&str, &mut f64); 3] = [
            (ENV_HOME_ADVANTAGE, &mut self.home_advantage),
            (ENV_FORM_BONUS_CAP, &mut self.form_bonus_cap),
            (ENV_GOAL_SCALE, &mut self.goal_scale),
        ];
        for (key, slot) in numbers {
            let Some(raw) = lookup(key) else { continue };
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                warnings.push(format!("{key} is set but empty; keeping {slot}"));
                continue;
            }
            *slot = trimmed
                .parse::<f64>()
                .with_context(|| format!("{key} must be a number, got {raw:?}"))?;
        }

        if let Some(raw) = lookup(ENV_ROUNDING) {
            if raw.trim().is_empty() {
                warnings.push(format!(
                    "{ENV_ROUNDING} is set but empty; keeping {}",
                    self.rounding.as_str()
                ));
            } else {
                self.rounding = RoundingMode::parse(&raw).with_context(|| {
                    format!("{ENV_ROUNDING} must be half_even or half_away_from_zero, got {raw:?}")
                })?;
            }
        }

        self.validate()?;
        Ok(self)
    }
}

pub fn load_params_file(path: &Path) -> Result<ModelParams> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read model params {}", path.display()))?;
    let params: ModelParams = serde_json::from_str(&raw)
        .with_context(|| format!("invalid model params json in {}", path.display()))?;
    params.validate()?;
    Ok(params)
}

/// Defaults, then the optional params file, then the environment.
pub fn resolve_params(file: Option<&Path>, warnings: &mut Vec<String>) -> Result<ModelParams> {
    resolve_params_with(file, |key| std::env::var(key).ok(), warnings)
}

pub fn resolve_params_with<F>(
    file: Option<&Path>,
    lookup: F,
    warnings: &mut Vec<String>,
) -> Result<ModelParams>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match file {
        Some(path) => load_params_file(path)?,
        None => ModelParams::default(),
    };
    base.apply_overrides(lookup, warnings)
}
