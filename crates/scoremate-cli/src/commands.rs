use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use scoremate_scoring::{
    BallProcessor, InningsSummary, ReplayEngine, Scoreboard, ScoreboardValidator, ScoringRules,
};
use scoremate_sdk::{BallEvent, InMemoryScorer, LogEntry, NewMatch, RosterChange};
use serde_json::json;
use tracing::debug;

use crate::cli::*;
use crate::render;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Score(args) => cmd_score(args, format),
        Command::Replay(args) => cmd_replay(args, format),
        Command::Validate(args) => cmd_validate(args, format),
        Command::Summary(args) => cmd_summary(args, format),
    }
}

fn cmd_score(args: ScoreArgs, format: OutputFormat) -> anyhow::Result<()> {
    let request = read_match(&args.input.match_file)?;
    let entries = read_balls(&args.input.balls)?;
    let mut scorer = InMemoryScorer::in_memory();
    if let Some(rules) = read_rules(args.input.rules.as_deref())? {
        scorer = scorer.with_rules(rules);
    }

    let info = scorer.create_match(request)?;
    let mut warnings = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let receipt = scorer
            .record(&info.id, entry)
            .with_context(|| format!("entry {} of {}", index + 1, entries.len()))?;
        if args.show_balls && matches!(format, OutputFormat::Text) {
            render::print_ball(&receipt);
        }
        warnings.extend(receipt.warnings.into_iter().map(|w| (receipt.record.seq, w)));
    }

    let board = scorer.scoreboard(&info.id)?;
    let summary = scorer.summary(&info.id)?;
    let audit = scorer.audit(&info.id)?;
    if let Some(out) = &args.out {
        let json = serde_json::to_string_pretty(&board)?;
        fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
    }

    match format {
        OutputFormat::Json => {
            let warnings: Vec<_> = warnings
                .iter()
                .map(|(seq, w)| json!({ "ball": seq, "warning": w }))
                .collect();
            let output = json!({
                "matchId": info.id,
                "scoreboard": board,
                "summary": summary,
                "warnings": warnings,
                "audit": {
                    "balls": audit.balls,
                    "chainError": audit.chain_error,
                    "violations": audit.validation.violations.len(),
                    "replayConverges": audit.replay_converges,
                },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            if args.show_balls {
                println!();
            }
            render::print_scoreboard(&board, &summary);
            if !warnings.is_empty() {
                println!();
                for (seq, warning) in &warnings {
                    render::print_warning(*seq, warning);
                }
            }
            println!();
            render::print_audit(&audit);
            if let Some(out) = &args.out {
                println!("Scoreboard written to {}", out.display().to_string().bold());
            }
        }
    }
    Ok(())
}

fn cmd_replay(args: ReplayArgs, format: OutputFormat) -> anyhow::Result<()> {
    let persisted = read_scoreboard(&args.scoreboard)?;
    let mut info = read_match(&args.input.match_file)?.into_match_info();
    if let Some(id) = persisted.match_id {
        info.id = id;
    }
    let events = read_balls(&args.input.balls)?;
    let rules = read_rules(args.input.rules.as_deref())?
        .unwrap_or_else(|| ScoringRules::for_match(&info));
    let processor = BallProcessor::new(rules);

    let result = ReplayEngine::replay_from_match(&processor, &info, &events)?;
    let converges = ReplayEngine::verify_convergence(&processor, &info, &events, &persisted)?;
    let replayed = InningsSummary::from_scoreboard(&result.scoreboard, Some(info.overs));
    let saved = InningsSummary::from_scoreboard(&persisted, Some(info.overs));

    match format {
        OutputFormat::Json => {
            let output = json!({
                "appliedEvents": result.applied_events,
                "converges": converges,
                "replayed": replayed,
                "saved": saved,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("Replayed {} log entries", result.applied_events.to_string().bold());
            println!("  replayed: {}", replayed.headline());
            println!("  saved:    {}", saved.headline());
            for (seq, warning) in &result.warnings {
                render::print_warning(*seq, warning);
            }
            if converges {
                println!("{} Saved scoreboard matches the ball log", "✓".green().bold());
            }
        }
    }
    if !converges {
        bail!("saved scoreboard does not match a replay of the ball log");
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let board = read_scoreboard(&args.scoreboard)?;
    let report = ScoreboardValidator::validate(&board);
    match format {
        OutputFormat::Json => {
            let violations: Vec<_> = report
                .violations
                .iter()
                .map(|v| json!({ "kind": format!("{:?}", v.kind), "description": v.description }))
                .collect();
            let output = json!({ "valid": report.is_valid(), "violations": violations });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => render::print_report(&report),
    }
    if !report.is_valid() {
        bail!("{} invariant violation(s)", report.violations.len());
    }
    Ok(())
}

fn cmd_summary(args: SummaryArgs, format: OutputFormat) -> anyhow::Result<()> {
    let board = read_scoreboard(&args.scoreboard)?;
    let summary = InningsSummary::from_scoreboard(&board, args.overs);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => render::print_scoreboard(&board, &summary),
    }
    Ok(())
}

fn read_match(path: &Path) -> anyhow::Result<NewMatch> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing match {}", path.display()))
}

fn read_scoreboard(path: &Path) -> anyhow::Result<Scoreboard> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing scoreboard {}", path.display()))
}

fn read_rules(path: Option<&Path>) -> anyhow::Result<Option<ScoringRules>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rules = ScoringRules::from_toml_str(&text)?;
    debug!(?rules, "scoring rules loaded");
    Ok(Some(rules))
}

fn read_balls(path: &Path) -> anyhow::Result<Vec<LogEntry>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_ball_lines(&text).with_context(|| format!("parsing balls {}", path.display()))
}

/// One JSON ball per line, or a roster change tagged with `kind`. Blank
/// lines and `#` comments are skipped.
fn parse_ball_lines(text: &str) -> anyhow::Result<Vec<LogEntry>> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| parse_entry(line).with_context(|| format!("line {number}")))
        .collect()
}

fn parse_entry(line: &str) -> anyhow::Result<LogEntry> {
    let value: serde_json::Value = serde_json::from_str(line)?;
    if value.get("kind").is_some() {
        Ok(serde_json::from_value::<RosterChange>(value)?.into())
    } else {
        Ok(serde_json::from_value::<BallEvent>(value)?.into())
    }
}
