use std::io::{Read, Write};

use anyhow::{Context, Result};

use crate::state::{MatchRecord, Prediction};

/// Decodes a JSON array of match records.
///
/// Empty input and `null` are an empty batch. Anything else that is not an
/// array of `{home_team, away_team}` objects is rejected before it can reach
/// the predictor.
pub fn parse_match_records_json(raw: &str) -> Result<Vec<MatchRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid match records json")
}

pub fn read_match_records<R: Read>(mut reader: R) -> Result<Vec<MatchRecord>> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .context("read match records")?;
    parse_match_records_json(&raw)
}

pub fn encode_predictions_json(predictions: &[Prediction], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(predictions)
    } else {
        serde_json::to_string(predictions)
    };
    json.context("serialize predictions")
}

pub fn write_predictions<W: Write>(
    mut writer: W,
    predictions: &[Prediction],
    pretty: bool,
) -> Result<()> {
    let json = encode_predictions_json(predictions, pretty)?;
    writeln!(writer, "{json}").context("write predictions")?;
    writer.flush().context("flush predictions")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TeamId;

    #[test]
    fn blank_and_null_are_empty() {
        assert!(parse_match_records_json("").unwrap().is_empty());
        assert!(parse_match_records_json("  \n").unwrap().is_empty());
        assert!(parse_match_records_json("null").unwrap().is_empty());
        assert!(parse_match_records_json("[]").unwrap().is_empty());
    }

    #[test]
    fn optional_form_and_name_are_lenient() {
        let raw = r#"[{"home_team": {"id": 1, "name": "Arsenal", "strength": 78, "gd": null},
                      "away_team": {"id": 2, "strength": 75.5}}]"#;
        let rows = parse_match_records_json(raw).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].home_team.name.as_deref(), Some("Arsenal"));
        assert_eq!(rows[0].home_team.gd, None);
        assert_eq!(rows[0].away_team.strength, Some(75.5));
    }

    #[test]
    fn missing_strength_still_decodes() {
        // Reported by the predictor as a missing field, not here.
        let rows = parse_match_records_json(r#"[{"home_team": {"id": 1}, "away_team": {"id": 2, "strength": 1}}]"#)
            .unwrap();
        assert_eq!(rows[0].home_team.strength, None);
    }

    #[test]
    fn wrong_shapes_are_malformed() {
        assert!(parse_match_records_json("{").is_err());
        assert!(parse_match_records_json(r#"{"home_team": {}}"#).is_err());
        assert!(parse_match_records_json("[1, 2]").is_err());
        let err = parse_match_records_json(
            r#"[{"home_team": {"id": 1, "strength": "ten"}, "away_team": {"id": 2, "strength": 1}}]"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("invalid match records json"));
    }

    #[test]
    fn compact_output_is_one_line() {
        let preds = vec![Prediction {
            home_team_id: TeamId::Num(1),
            away_team_id: TeamId::Text("CHE".to_string()),
            home_score: 2,
            away_score: 1,
        }];
        let mut out = Vec::new();
        write_predictions(&mut out, &preds, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[{\"home_team_id\":1,\"away_team_id\":\"CHE\",\"home_score\":2,\"away_score\":1}]\n"
        );
    }
}
