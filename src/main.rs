use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};

use score_predictor::match_feed::{read_match_records, write_predictions};
use score_predictor::model_params::resolve_params;
use score_predictor::score_model::{predict_matches, summarize};

const USAGE: &str = "usage: score_predictor [--input PATH] [--output PATH] [--params PATH] [--pretty]

Reads a JSON array of matches (stdin by default) and writes the predicted
scorelines as a JSON array (stdout by default).";

#[derive(Debug, Default)]
struct Cli {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    params: Option<PathBuf>,
    pretty: bool,
    help: bool,
}

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = parse_args(std::env::args().skip(1))?;
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }

    let mut warnings = Vec::new();
    let params = resolve_params(cli.params.as_deref(), &mut warnings)?;
    for warning in &warnings {
        eprintln!("[WARN] {warning}");
    }

    let records = match &cli.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            read_match_records(file)?
        }
        None => read_match_records(io::stdin().lock())?,
    };

    // All-or-nothing: nothing is written unless every match predicts.
    let predictions = predict_matches(&records, &params)?;

    match &cli.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
            let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
            write_predictions(BufWriter::new(file), &predictions, cli.pretty)?;
        }
        None => write_predictions(io::stdout().lock(), &predictions, cli.pretty)?,
    }

    if !quiet() {
        let s = summarize(&predictions);
        eprintln!(
            "[INFO] Predicted {} matches ({} home wins, {} away wins, {} goals, rounding {})",
            s.matches,
            s.home_wins,
            s.away_wins,
            s.total_goals,
            params.rounding.as_str()
        );
    }
    Ok(())
}

fn quiet() -> bool {
    quiet_flag(std::env::var("PREDICTOR_QUIET").ok().as_deref())
}

fn quiet_flag(raw: Option<&str>) -> bool {
    raw.map(|val| matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn parse_args<I>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = String>,
{
    let mut cli = Cli::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--pretty" {
            cli.pretty = true;
            continue;
        }
        if arg == "-h" || arg == "--help" {
            cli.help = true;
            continue;
        }

        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
            None => (arg.clone(), None),
        };
        let slot = match flag.as_str() {
            "--input" => &mut cli.input,
            "--output" => &mut cli.output,
            "--params" => &mut cli.params,
            _ => bail!("unknown argument {arg:?}\n\n{USAGE}"),
        };
        let value = match inline {
            Some(value) => value,
            None => args
                .next()
                .with_context(|| format!("{flag} needs a path"))?,
        };
        let trimmed = value.trim();
        if trimmed.is_empty() {
            bail!("{flag} needs a path");
        }
        *slot = Some(PathBuf::from(trimmed));
    }
    Ok(cli)
}
