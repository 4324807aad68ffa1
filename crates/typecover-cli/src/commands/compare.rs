//! Compare command implementation.

use crate::cli::CompareArgs;
use crate::error::Result;
use crate::output::Formatter;
use typecover_catalog::Catalog;
use typecover_recommender::Analyzer;

/// Execute the compare command.
pub async fn execute_compare<C: Catalog>(
    args: CompareArgs,
    analyzer: &Analyzer<C>,
    formatter: &Formatter,
) -> Result<()> {
    let comparison = analyzer
        .compare(&args.left.to_lowercase(), &args.right.to_lowercase())
        .await?;
    println!("{}", formatter.format_comparison(&comparison)?);
    Ok(())
}
