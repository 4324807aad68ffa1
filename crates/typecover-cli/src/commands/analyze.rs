//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use typecover_catalog::Catalog;
use typecover_recommender::Analyzer;

/// Execute the analyze command.
pub async fn execute_analyze<C: Catalog>(
    args: AnalyzeArgs,
    analyzer: &Analyzer<C>,
    formatter: &Formatter,
) -> Result<()> {
    let profile = match args.name {
        Some(name) => analyzer.analyze(&name.to_lowercase()).await?,
        None => {
            let types = normalize_types(&args.types)?;
            analyzer.analyze_types(&types).await?
        }
    };

    println!("{}", formatter.format_profile(&profile)?);
    Ok(())
}

/// Lowercase, trim and check a user-supplied type list
fn normalize_types(raw: &[String]) -> Result<Vec<String>> {
    let types: Vec<String> = raw
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    if types.is_empty() || types.len() > 2 {
        return Err(CliError::InvalidInput(
            "Expected one or two types, e.g. --types water,ground".to_string(),
        ));
    }
    if types.len() == 2 && types[0] == types[1] {
        return Err(CliError::InvalidInput(format!(
            "Type '{}' given twice",
            types[0]
        )));
    }
    Ok(types)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_types() {
        assert_eq!(
            normalize_types(&owned(&[" Water", "GROUND "])).unwrap(),
            vec!["water", "ground"]
        );
    }

    #[test]
    fn test_rejects_bad_type_lists() {
        assert!(normalize_types(&owned(&[])).is_err());
        assert!(normalize_types(&owned(&["", " "])).is_err());
        assert!(normalize_types(&owned(&["fire", "water", "grass"])).is_err());
        assert!(normalize_types(&owned(&["fire", "Fire"])).is_err());
    }
}
