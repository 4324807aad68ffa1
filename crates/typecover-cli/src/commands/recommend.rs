//! Recommend command implementation.

use crate::cli::RecommendArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use futures::StreamExt;
use std::io::Write;
use std::sync::Arc;
use typecover_catalog::Catalog;
use typecover_recommender::{Recommender, RecommenderConfig};

/// Execute the recommend command.
///
/// Candidates are printed as soon as the search yields them.
pub async fn execute_recommend<C: Catalog + 'static>(
    args: RecommendArgs,
    catalog: Arc<C>,
    config: RecommenderConfig,
    formatter: &Formatter,
) -> Result<()> {
    let config = apply_overrides(config, &args)?;
    let recommender = Recommender::new(catalog, config)?;

    let name = args.name.to_lowercase();
    let mut stream = recommender.recommend(&name).await?;

    if let Some(header) = formatter.recommendation_header(&name) {
        println!("{}", header);
    }

    let mut stdout = std::io::stdout();
    let mut count = 0;
    while let Some(candidate) = stream.next().await {
        count += 1;
        writeln!(stdout, "{}", formatter.format_candidate(count, &candidate)?)?;
        stdout.flush()?;
    }

    if let Some(footer) = formatter.recommendation_footer(count) {
        println!("{}", footer);
    }
    Ok(())
}

fn apply_overrides(mut config: RecommenderConfig, args: &RecommendArgs) -> Result<RecommenderConfig> {
    if let Some(limit) = args.limit {
        if limit == 0 {
            return Err(CliError::InvalidInput("--limit must be at least 1".to_string()));
        }
        config.max_results = limit;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_diversity {
        config.diversity_pass = false;
    }
    Ok(config)
}
