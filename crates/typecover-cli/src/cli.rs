//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Typecover - Defensive type coverage analysis and teammate recommendations.
#[derive(Debug, Parser)]
#[command(name = "typecover")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TYPECOVER_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the defensive profile of an entity or a type set
    Analyze(AnalyzeArgs),

    /// Score a team after weakness cancellation
    Team(TeamArgs),

    /// Compare two entities side by side
    Compare(CompareArgs),

    /// Recommend teammates covering an entity's weaknesses
    Recommend(RecommendArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Entity name or id
    #[arg(required_unless_present = "types", conflicts_with = "types")]
    pub name: Option<String>,

    /// Comma-separated defensive types (e.g. water,ground)
    #[arg(short, long, value_delimiter = ',')]
    pub types: Vec<String>,
}

/// Arguments for the team command.
#[derive(Debug, Parser)]
pub struct TeamArgs {
    /// Member names or ids
    #[arg(required = true, num_args = 1..=6)]
    pub members: Vec<String>,
}

/// Arguments for the compare command.
#[derive(Debug, Parser)]
pub struct CompareArgs {
    /// Left-hand entity
    pub left: String,

    /// Right-hand entity
    pub right: String,
}

/// Arguments for the recommend command.
#[derive(Debug, Parser)]
pub struct RecommendArgs {
    /// Reference entity name or id
    pub name: String,

    /// Maximum number of recommendations
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Shuffle seed for reproducible results
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Skip the stat-diversity pass
    #[arg(long)]
    pub no_diversity: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_by_name() {
        let cli = Cli::parse_from(["typecover", "analyze", "charizard"]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.name.as_deref(), Some("charizard"));
                assert!(args.types.is_empty());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_by_types() {
        let cli = Cli::parse_from(["typecover", "analyze", "--types", "water,ground"]);
        match cli.command {
            Command::Analyze(args) => {
                assert!(args.name.is_none());
                assert_eq!(args.types, vec!["water", "ground"]);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_requires_input() {
        assert!(Cli::try_parse_from(["typecover", "analyze"]).is_err());
    }

    #[test]
    fn test_recommend_with_global_flags() {
        let cli = Cli::parse_from([
            "typecover",
            "recommend",
            "pikachu",
            "--limit",
            "3",
            "--seed",
            "42",
            "--format",
            "json",
            "--no-color",
        ]);
        assert!(cli.no_color);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Recommend(args) => {
                assert_eq!(args.name, "pikachu");
                assert_eq!(args.limit, Some(3));
                assert_eq!(args.seed, Some(42));
                assert!(!args.no_diversity);
            }
            _ => panic!("Expected Recommend command"),
        }
    }

    #[test]
    fn test_team_members() {
        let cli = Cli::parse_from(["typecover", "team", "charizard", "blastoise", "venusaur"]);
        match cli.command {
            Command::Team(args) => assert_eq!(args.members.len(), 3),
            _ => panic!("Expected Team command"),
        }
        assert!(Cli::try_parse_from(["typecover", "team"]).is_err());
    }
}
