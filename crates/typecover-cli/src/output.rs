//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use typecover_domain::{Candidate, MultiplierMap};
use typecover_recommender::{Comparison, EntityProfile, TeamReport};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a single defensive profile.
    pub fn format_profile(&self, profile: &EntityProfile) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(profile)?),
            OutputFormat::Table => Ok(self.profile_table(profile)),
        }
    }

    /// Format a team report.
    pub fn format_team(&self, report: &TeamReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(report)?);
        }

        let mut builder = Builder::default();
        builder.push_record(["Member", "Types", "Weaknesses", "Score"]);
        for member in &report.members {
            builder.push_record([
                member.name.clone(),
                member.types.join("/"),
                join_or_dash(&member.weaknesses),
                format!("{:.2}", member.score()),
            ]);
        }

        let mut out = self.table(builder);
        out.push('\n');
        out.push_str(&self.multiplier_table(&report.net));
        out.push('\n');
        out.push_str(&format!("Team score: {}\n", self.score(report.score())));
        if report.uncovered.is_empty() {
            out.push_str(&self.success("No uncovered weaknesses"));
        } else {
            out.push_str(&self.warning(&format!(
                "Uncovered weaknesses: {}",
                report.uncovered.join(", ")
            )));
        }
        Ok(out)
    }

    /// Format a side-by-side comparison.
    pub fn format_comparison(&self, comparison: &Comparison) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(comparison)?);
        }

        let left = &comparison.left;
        let right = &comparison.right;
        let mut builder = Builder::default();
        builder.push_record(["", left.name.as_str(), right.name.as_str()]);
        builder.push_record(["Types".to_string(), left.types.join("/"), right.types.join("/")]);
        builder.push_record([
            "Score".to_string(),
            format!("{:.2}", left.score()),
            format!("{:.2}", right.score()),
        ]);
        builder.push_record([
            "Weaknesses".to_string(),
            join_or_dash(&left.weaknesses),
            join_or_dash(&right.weaknesses),
        ]);
        builder.push_record([
            "Immunities".to_string(),
            join_or_dash(&left.immunities),
            join_or_dash(&right.immunities),
        ]);
        builder.push_record([
            "Covers other's weaknesses".to_string(),
            join_or_dash(&comparison.left_covers_right),
            join_or_dash(&comparison.right_covers_left),
        ]);

        let verdict = if comparison.score_delta.abs() < 1e-9 {
            self.info("Both score the same")
        } else {
            let (better, worse) = if comparison.score_delta > 0.0 {
                (left, right)
            } else {
                (right, left)
            };
            self.info(&format!(
                "{} outscores {} by {:.2}",
                better.name,
                worse.name,
                comparison.score_delta.abs()
            ))
        };
        Ok(format!("{}\n{}", self.table(builder), verdict))
    }

    /// Heading printed before a recommendation stream.
    pub fn recommendation_header(&self, reference: &str) -> Option<String> {
        match self.format {
            OutputFormat::Json => None,
            OutputFormat::Table => Some(self.info(&format!("Recommendations for {}", reference))),
        }
    }

    /// Format one streamed recommendation.
    ///
    /// JSON output is one compact object per line so results can be piped
    /// while the search is still running.
    pub fn format_candidate(&self, rank: usize, candidate: &Candidate) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string(candidate)?);
        }

        let mut line = format!(
            "{}. {} [{}] {} {}",
            rank,
            self.colorize(&candidate.name, "cyan"),
            candidate.types.join("/"),
            self.score(candidate.score),
            self.colorize(&format!("({})", candidate.pass.as_str()), "magenta"),
        );
        if !candidate.newly_covered.is_empty() {
            line.push_str(&format!("\n   covers: {}", candidate.newly_covered.join(", ")));
        }
        if !candidate.immune_to.is_empty() {
            line.push_str(&format!("\n   immune to: {}", candidate.immune_to.join(", ")));
        }
        line.push_str(&format!(
            "\n   own weaknesses: {}, defensive score {:.2}",
            candidate.weakness_count, candidate.individual_score
        ));
        Ok(line)
    }

    /// Footer printed after a recommendation stream.
    pub fn recommendation_footer(&self, count: usize) -> Option<String> {
        match self.format {
            OutputFormat::Json => None,
            OutputFormat::Table if count == 0 => {
                Some(self.warning("No candidates close any coverage gap."))
            }
            OutputFormat::Table => Some(self.success(&format!("{} recommendation(s)", count))),
        }
    }

    fn profile_table(&self, profile: &EntityProfile) -> String {
        let mut out = format!(
            "{} [{}]\n",
            self.colorize(&profile.name, "cyan"),
            profile.types.join("/")
        );
        if let Some(stats) = &profile.stats {
            out.push_str(&format!(
                "HP {} / Atk {} / Def {} / SpA {} / SpD {} / Spe {} (total {})\n",
                stats.hp,
                stats.attack,
                stats.defense,
                stats.special_attack,
                stats.special_defense,
                stats.speed,
                stats.total()
            ));
        }
        out.push_str(&self.multiplier_table(&profile.multipliers));
        out.push('\n');

        let breakdown = &profile.breakdown;
        out.push_str(&format!(
            "Defense {:.2} / Weakness {:.2} -> score {}",
            breakdown.defense,
            breakdown.weakness,
            self.score(breakdown.score)
        ));
        if !breakdown.avoided_common.is_empty() {
            out.push_str(&format!(
                "\nAvoids common attackers: {}",
                breakdown.avoided_common.join(", ")
            ));
        }
        out
    }

    fn multiplier_table(&self, map: &MultiplierMap) -> String {
        if map.is_empty() {
            return self.colorize("No weaknesses or resistances.", "yellow");
        }

        let mut entries: Vec<(&str, f64)> = map.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let mut builder = Builder::default();
        builder.push_record(["Attacking type", "Multiplier"]);
        for (attacking, multiplier) in entries {
            builder.push_record([attacking.to_string(), self.multiplier(multiplier)]);
        }
        self.table(builder)
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn multiplier(&self, value: f64) -> String {
        let text = format!("{}x", value);
        let color = if value == 0.0 {
            "blue"
        } else if value < 1.0 {
            "green"
        } else {
            "red"
        };
        self.colorize(&text, color)
    }

    fn score(&self, score: f64) -> String {
        let text = format!("{:.2}", score);
        let color = if score >= 7.0 {
            "green"
        } else if score >= 4.0 {
            "yellow"
        } else {
            "red"
        };
        self.colorize(&text, color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
