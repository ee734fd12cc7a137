use serde::Serialize;
use thiserror::Error;

use crate::model_params::ModelParams;
use crate::state::{MatchOutcome, MatchRecord, Prediction, RequiredField, Side, TeamId, TeamSide};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    #[error("match {index}: {side} team is missing required field `{field}`")]
    MissingField {
        index: usize,
        side: Side,
        field: RequiredField,
    },
    #[error("match {index}: tie-break overflows a home score of {home_score}")]
    ScoreOverflow { index: usize, home_score: i64 },
}

pub type Result<T> = std::result::Result<T, PredictError>;

/// Every intermediate value behind one predicted scoreline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub gd_bonus: f64,
    pub home_power: f64,
    pub away_power: f64,
    pub total_power: f64,
    // Normalized shares before rounding; both 0 when total power is 0.
    pub home_raw: f64,
    pub away_raw: f64,
    pub degenerate: bool,
    pub tie_break: bool,
    pub prediction: Prediction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PredictionSummary {
    pub matches: usize,
    pub home_wins: usize,
    pub away_wins: usize,
    pub draws: usize,
    pub total_goals: i64,
}

pub fn predict_match(record: &MatchRecord, params: &ModelParams) -> Result<Prediction> {
    explain_at(0, record, params).map(|b| b.prediction)
}

pub fn explain_match(record: &MatchRecord, params: &ModelParams) -> Result<ScoreBreakdown> {
    explain_at(0, record, params)
}

/// Predicts every record in order. The first record that fails (a missing
/// required field, or a score the tie-break cannot represent) fails the whole batch.
pub fn predict_matches(records: &[MatchRecord], params: &ModelParams) -> Result<Vec<Prediction>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| explain_at(index, record, params).map(|b| b.prediction))
        .collect()
}

pub fn explain_matches(
    records: &[MatchRecord],
    params: &ModelParams,
) -> Result<Vec<ScoreBreakdown>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| explain_at(index, record, params))
        .collect()
}

pub fn summarize(predictions: &[Prediction]) -> PredictionSummary {
    let mut out = PredictionSummary {
        matches: predictions.len(),
        ..PredictionSummary::default()
    };
    for p in predictions {
        match p.outcome() {
            MatchOutcome::Win => out.home_wins += 1,
            MatchOutcome::Loss => out.away_wins += 1,
            MatchOutcome::Draw => out.draws += 1,
        }
        out.total_goals = out
            .total_goals
            .saturating_add(p.home_score)
            .saturating_add(p.away_score);
    }
    out
}

fn explain_at(index: usize, record: &MatchRecord, params: &ModelParams) -> Result<ScoreBreakdown> {
    let (home_id, s_home) = required(&record.home_team, Side::Home, index)?;
    let (away_id, s_away) = required(&record.away_team, Side::Away, index)?;

    let g_home = record.home_team.gd.unwrap_or(0.0);
    let g_away = record.away_team.gd.unwrap_or(0.0);

    let cap = params.form_bonus_cap;
    let gd_bonus = clamp(g_home - g_away, -cap, cap);

    // Form and home advantage only ever move the home side.
    let home_power = s_home + gd_bonus + params.home_advantage;
    let away_power = s_away;
    let total_power = home_power + away_power;

    let degenerate = total_power == 0.0;
    let (home_raw, away_raw) = if degenerate {
        (0.0, 0.0)
    } else {
        (
            params.goal_scale * home_power / total_power,
            params.goal_scale * away_power / total_power,
        )
    };

    // `as` saturates, and maps NaN to 0.
    let mut home_score = params.rounding.round(home_raw) as i64;
    let away_score = params.rounding.round(away_raw) as i64;

    let tie_break = home_score == away_score;
    if tie_break {
        home_score = home_score
            .checked_add(1)
            .ok_or(PredictError::ScoreOverflow { index, home_score })?;
    }

    Ok(ScoreBreakdown {
        gd_bonus,
        home_power,
        away_power,
        total_power,
        home_raw,
        away_raw,
        degenerate,
        tie_break,
        prediction: Prediction {
            home_team_id: home_id.clone(),
            away_team_id: away_id.clone(),
            home_score,
            away_score,
        },
    })
}

fn required(team: &TeamSide, side: Side, index: usize) -> Result<(&TeamId, f64)> {
    let missing = |field| PredictError::MissingField { index, side, field };
    let id = team.id.as_ref().ok_or_else(|| missing(RequiredField::Id))?;
    let strength = team.strength.ok_or_else(|| missing(RequiredField::Strength))?;
    Ok((id, strength))
}

fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}
