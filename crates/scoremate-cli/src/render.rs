//! Plain-text scorecard rendering.

use colored::Colorize;
use scoremate_scoring::{InningsSummary, Scoreboard, ValidationReport};
use scoremate_sdk::{BallReceipt, LogEntry, MatchAudit};

pub fn print_scoreboard(board: &Scoreboard, summary: &InningsSummary) {
    println!("{}", summary.headline().bold());
    if let Some(bowling) = &board.bowling_team {
        println!("  Bowling: {}", bowling.cyan());
    }

    println!();
    let header = format!(
        "  {:<20} {:>4} {:>4} {:>3} {:>3} {:>7}",
        "Batsman", "R", "B", "4s", "6s", "SR"
    );
    println!("{}", header.dimmed());
    for (index, bat) in board.all_batsmen().iter().enumerate() {
        let marker = if index == board.striker_index() {
            "*"
        } else {
            " "
        };
        let status = match (&bat.dismissal, bat.is_out) {
            (Some(how), true) => how.to_string().red().to_string(),
            (None, true) => "out".red().to_string(),
            _ => "not out".green().to_string(),
        };
        println!(
            "{marker} {:<20} {:>4} {:>4} {:>3} {:>3} {:>7.2}  {status}",
            bat.name, bat.runs, bat.balls, bat.fours, bat.sixes, bat.strike_rate
        );
    }

    println!();
    let header = format!(
        "  {:<20} {:>5} {:>3} {:>4} {:>3} {:>6}",
        "Bowler", "O", "M", "R", "W", "Econ"
    );
    println!("{}", header.dimmed());
    for (index, bowl) in board.all_bowlers().iter().enumerate() {
        let marker = if index == board.bowler_index() {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {:<20} {:>5} {:>3} {:>4} {:>3} {:>6.2}",
            bowl.name, bowl.overs, bowl.maidens, bowl.runs, bowl.wickets, bowl.economy_rate
        );
    }

    let e = &board.extras;
    println!();
    println!(
        "  Extras: {} (b {}, lb {}, w {}, nb {}, p {})",
        e.total.to_string().bold(),
        e.byes,
        e.leg_byes,
        e.wides,
        e.no_balls,
        e.penalties
    );

    if !board.fall_of_wickets.is_empty() {
        let fow: Vec<String> = board
            .fall_of_wickets
            .iter()
            .map(|f| format!("{}-{} ({}, {} ov)", f.wicket, f.runs, f.batsman, f.over))
            .collect();
        println!("  Fall of wickets: {}", fow.join(", "));
    }
    if let Some(result) = &board.result {
        println!("  Result: {}", result.yellow().bold());
    }
}

pub fn print_ball(receipt: &BallReceipt) {
    let record = &receipt.record;
    let board = &receipt.scoreboard;
    let seq = format!("#{}", record.seq).yellow();
    let position = record.position.to_string();
    let Some(event) = record.ball() else {
        if let LogEntry::Roster(change) = &record.entry {
            println!("{seq} {position:>5}  {}", change.to_string().cyan());
        }
        return;
    };
    let mut line = format!(
        "{seq} {position:>5}  {:<7} {}",
        event.ball_type.to_string(),
        event.runs
    );
    if event.is_wicket {
        line.push_str(&format!(" {}", "W".red().bold()));
    }
    println!(
        "{line}  => {}/{}  {}",
        board.score,
        board.wickets,
        record.short_hash().dimmed()
    );
    if let Some(commentary) = &event.commentary {
        println!("        {}", commentary.italic());
    }
}

pub fn print_warning(seq: u64, warning: &impl std::fmt::Display) {
    println!("  {} ball {seq}: {warning}", "warning:".yellow().bold());
}

pub fn print_report(report: &ValidationReport) {
    if report.is_valid() {
        println!("{} Scoreboard invariants hold", "✓".green().bold());
        return;
    }
    println!(
        "{} {} violation(s)",
        "✗".red().bold(),
        report.violations.len()
    );
    for violation in &report.violations {
        println!(
            "  {} {}",
            format!("{:?}:", violation.kind).red(),
            violation.description
        );
    }
}

pub fn print_audit(audit: &MatchAudit) {
    let mark = |ok: bool| {
        if ok {
            "valid".green()
        } else {
            "FAILED".red().bold()
        }
    };
    println!("Audit over {} ball(s)", audit.balls.to_string().bold());
    match &audit.chain_error {
        None => println!("  Hash chain: {}", mark(true)),
        Some(reason) => println!("  Hash chain: {} ({reason})", mark(false)),
    }
    println!("  Invariants: {}", mark(audit.validation.is_valid()));
    println!("  Replay: {}", mark(audit.replay_converges));
}
