use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use score_predictor::match_feed::parse_match_records_json;
use score_predictor::model_params::resolve_params;
use score_predictor::score_model::explain_matches;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/matches.json"));

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let records = parse_match_records_json(&raw)?;

    let mut warnings = Vec::new();
    let params = resolve_params(None, &mut warnings)?;
    for warning in &warnings {
        eprintln!("[WARN] {warning}");
    }

    // Prints the arithmetic only; meant for eyeballing parameter changes by hand.
    println!(
        "Params: home_adv={} form_cap={} scale={} rounding={}",
        params.home_advantage,
        params.form_bonus_cap,
        params.goal_scale,
        params.rounding.as_str()
    );
    for (idx, (record, b)) in records
        .iter()
        .zip(explain_matches(&records, &params)?)
        .enumerate()
    {
        let p = &b.prediction;
        let home_name = record.home_team.name.as_deref().unwrap_or("-");
        let away_name = record.away_team.name.as_deref().unwrap_or("-");
        println!();
        println!(
            "#{idx} {} ({home_name}) vs {} ({away_name})",
            p.home_team_id, p.away_team_id
        );
        println!("  gd bonus:    {:+.2}", b.gd_bonus);
        println!(
            "  power:       home {:.2} / away {:.2} / total {:.2}",
            b.home_power, b.away_power, b.total_power
        );
        if b.degenerate {
            println!("  shares:      total power is zero, 0-0 before tie-break");
        } else {
            println!(
                "  shares:      home {:.3} / away {:.3}",
                b.home_raw, b.away_raw
            );
        }
        println!(
            "  predicted:   {}-{} ({}{})",
            p.home_score,
            p.away_score,
            p.outcome(),
            if b.tie_break { ", tie-break" } else { "" }
        );
    }

    Ok(())
}
