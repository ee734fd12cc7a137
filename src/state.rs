use std::fmt;

use serde::{Deserialize, Serialize};

/// Team identifier as supplied by the caller.
///
/// The league backend sends integer database ids; string ids are accepted too.
/// Whatever arrives is echoed back unchanged in the prediction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamId {
    Num(i64),
    Text(String),
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamId::Num(id) => write!(f, "{id}"),
            TeamId::Text(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for TeamId {
    fn from(id: i64) -> Self {
        TeamId::Num(id)
    }
}

// Lets bare integer literals (`TeamSide::new(1, ..)`) resolve, since they default to i32.
impl From<i32> for TeamId {
    fn from(id: i32) -> Self {
        TeamId::Num(i64::from(id))
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        TeamId::Text(id.to_string())
    }
}

/// One side of a fixture as it arrives on the wire.
///
/// `id` and `strength` are mandatory for a prediction but kept optional here so
/// the predictor can report exactly which one is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSide {
    #[serde(default)]
    pub id: Option<TeamId>,
    #[serde(default)]
    pub strength: Option<f64>,
    // Recent goal difference; absent means no form signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TeamSide {
    pub fn new(id: impl Into<TeamId>, strength: f64) -> Self {
        Self {
            id: Some(id.into()),
            strength: Some(strength),
            gd: None,
            name: None,
        }
    }

    pub fn with_gd(mut self, gd: f64) -> Self {
        self.gd = Some(gd);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(default)]
    pub home_team: TeamSide,
    #[serde(default)]
    pub away_team: TeamSide,
}

impl MatchRecord {
    pub fn new(home_team: TeamSide, away_team: TeamSide) -> Self {
        Self {
            home_team,
            away_team,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Id,
    Strength,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredField::Id => write!(f, "id"),
            RequiredField::Strength => write!(f, "strength"),
        }
    }
}

/// Predicted scoreline for one fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_score: i64,
    pub away_score: i64,
}

impl Prediction {
    pub fn outcome(&self) -> MatchOutcome {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

/// Result label from the home side's point of view, as stored by the league backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchOutcome::Win => "win",
            MatchOutcome::Draw => "draw",
            MatchOutcome::Loss => "loss",
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_id_keeps_wire_shape() {
        let num: TeamId = serde_json::from_str("7").unwrap();
        let text: TeamId = serde_json::from_str("\"ARS\"").unwrap();
        assert_eq!(num, TeamId::Num(7));
        assert_eq!(text, TeamId::Text("ARS".to_string()));
        assert_eq!(serde_json::to_string(&num).unwrap(), "7");
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"ARS\"");
    }

    #[test]
    fn outcome_follows_home_perspective() {
        let mut p = Prediction {
            home_team_id: TeamId::Num(1),
            away_team_id: TeamId::Num(2),
            home_score: 2,
            away_score: 1,
        };
        assert_eq!(p.outcome(), MatchOutcome::Win);
        p.home_score = 0;
        assert_eq!(p.outcome(), MatchOutcome::Loss);
        p.away_score = 0;
        assert_eq!(p.outcome().as_str(), "draw");
    }
}
