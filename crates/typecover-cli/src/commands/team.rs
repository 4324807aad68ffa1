//! Team command implementation.

use crate::cli::TeamArgs;
use crate::error::Result;
use crate::output::Formatter;
use typecover_catalog::Catalog;
use typecover_recommender::Analyzer;

/// Execute the team command.
pub async fn execute_team<C: Catalog>(
    args: TeamArgs,
    analyzer: &Analyzer<C>,
    formatter: &Formatter,
) -> Result<()> {
    let members: Vec<String> = args.members.iter().map(|m| m.to_lowercase()).collect();
    let report = analyzer.analyze_team(&members).await?;
    println!("{}", formatter.format_team(&report)?);
    Ok(())
}
