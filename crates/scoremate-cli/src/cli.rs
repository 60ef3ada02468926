use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "scoremate",
    about = "ScoreMate: ball-by-ball cricket scoring",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score a match from a ball-by-ball file
    Score(ScoreArgs),
    /// Replay a ball file and check it against a saved scoreboard
    Replay(ReplayArgs),
    /// Check a saved scoreboard's invariants
    Validate(ValidateArgs),
    /// Summarize a saved scoreboard
    Summary(SummaryArgs),
}

/// Inputs shared by commands that play a match from scratch.
#[derive(Args)]
pub struct MatchInput {
    /// Match request JSON (teams, toss, overs, opening players)
    #[arg(short, long = "match")]
    pub match_file: PathBuf,
    /// Ball events, one JSON object per line
    #[arg(short, long)]
    pub balls: PathBuf,
    /// Scoring rules TOML; defaults come from the match settings
    #[arg(short, long)]
    pub rules: Option<PathBuf>,
}

#[derive(Args)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub input: MatchInput,
    /// Write the final scoreboard JSON here
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Print every ball as it is recorded
    #[arg(long)]
    pub show_balls: bool,
}

#[derive(Args)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub input: MatchInput,
    /// Saved scoreboard JSON to compare with
    #[arg(short, long)]
    pub scoreboard: PathBuf,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Scoreboard JSON
    pub scoreboard: PathBuf,
}

#[derive(Args)]
pub struct SummaryArgs {
    /// Scoreboard JSON
    pub scoreboard: PathBuf,
    /// Overs per innings, for balls remaining and chase figures
    #[arg(long)]
    pub overs: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_score() {
        let cli = Cli::try_parse_from([
            "scoremate", "score", "--match", "m.json", "--balls", "b.jsonl",
        ])
        .unwrap();
        if let Command::Score(args) = cli.command {
            assert_eq!(args.input.match_file, PathBuf::from("m.json"));
            assert_eq!(args.input.balls, PathBuf::from("b.jsonl"));
            assert!(args.input.rules.is_none());
            assert!(!args.show_balls);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_score_with_rules_and_out() {
        let cli = Cli::try_parse_from([
            "scoremate", "score", "-m", "m.json", "-b", "b.jsonl", "-r", "rules.toml", "-o",
            "final.json", "--show-balls",
        ])
        .unwrap();
        if let Command::Score(args) = cli.command {
            assert_eq!(args.input.rules, Some(PathBuf::from("rules.toml")));
            assert_eq!(args.out, Some(PathBuf::from("final.json")));
            assert!(args.show_balls);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn score_requires_inputs() {
        assert!(Cli::try_parse_from(["scoremate", "score", "--match", "m.json"]).is_err());
    }

    #[test]
    fn parse_replay() {
        let cli = Cli::try_parse_from([
            "scoremate", "replay", "-m", "m.json", "-b", "b.jsonl", "-s", "board.json",
        ])
        .unwrap();
        if let Command::Replay(args) = cli.command {
            assert_eq!(args.scoreboard, PathBuf::from("board.json"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_validate() {
        let cli = Cli::try_parse_from(["scoremate", "validate", "board.json"]).unwrap();
        assert!(matches!(cli.command, Command::Validate(_)));
    }

    #[test]
    fn parse_summary_with_overs() {
        let cli =
            Cli::try_parse_from(["scoremate", "summary", "board.json", "--overs", "20"]).unwrap();
        if let Command::Summary(args) = cli.command {
            assert_eq!(args.overs, Some(20));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["scoremate", "--verbose", "validate", "b.json"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli =
            Cli::try_parse_from(["scoremate", "validate", "b.json", "--format", "json"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
