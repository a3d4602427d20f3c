//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use factline_domain::{Claim, ClaimStatus, Source};
use factline_pipeline::{PipelineSummary, VerificationReport};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const MAX_CELL_CHARS: usize = 80;

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

    /// Format extracted claims.
    pub fn format_claims(&self, claims: &[Claim]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(claims)?),
            OutputFormat::Table => Ok(self.format_claims_table(claims)),
        }
    }

    /// Format a verification report.
    pub fn format_report(&self, report: &VerificationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_report_table(report)),
        }
    }

    /// Format an evidence set.
    pub fn format_sources(&self, sources: &[Source]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(sources)?),
            OutputFormat::Table => Ok(self.format_sources_table(sources)),
        }
    }

    fn format_claims_table(&self, claims: &[Claim]) -> String {
        if claims.is_empty() {
            return self.colorize("No claims found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Span", "Claim", "Search Query"]);

        for claim in claims {
            builder.push_record([
                claim.id.to_string(),
                format!("{}..{}", claim.start, claim.end),
                truncate(&claim.claim_text, MAX_CELL_CHARS),
                truncate(&claim.search_query, MAX_CELL_CHARS),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn format_report_table(&self, report: &VerificationReport) -> String {
        if report.claims.is_empty() {
            return self.colorize("No claims found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Status", "Confidence", "Claim", "Explanation", "Sources"]);

        for claim in &report.claims {
            let confidence = claim
                .confidence
                .map(|c| format!("{}%", c.value()))
                .unwrap_or_else(|| "-".to_string());
            builder.push_record([
                claim.id.to_string(),
                self.status_label(claim.status),
                confidence,
                truncate(&claim.claim_text, MAX_CELL_CHARS),
                truncate(claim.explanation.as_deref().unwrap_or(""), MAX_CELL_CHARS),
                claim.sources.len().to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut output = table.to_string();
        for claim in &report.claims {
            if let Some(fix) = &claim.suggested_fix {
                output.push('\n');
                output.push_str(&self.info(&format!("Claim {} suggested fix: {}", claim.id, fix)));
            }
        }
        for failure in &report.failures {
            output.push('\n');
            output.push_str(&self.warning(&format!(
                "Claim {} {} failed: {}",
                failure.claim_id, failure.stage, failure.reason
            )));
        }
        output.push('\n');
        output.push_str(&self.summary_line(&report.summary));
        output
    }

    fn format_sources_table(&self, sources: &[Source]) -> String {
        if sources.is_empty() {
            return self.colorize("No sources found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Title", "URL", "Excerpt"]);

        for source in sources {
            builder.push_record([
                source.source_number.to_string(),
                truncate(source.title.as_deref().unwrap_or(""), 40),
                source.url.clone(),
                truncate(&source.source_text, MAX_CELL_CHARS),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// One-line status tally.
    pub fn summary_line(&self, summary: &PipelineSummary) -> String {
        let mut parts = vec![format!("{} claim(s)", summary.total)];
        for status in ClaimStatus::TERMINAL {
            let count = summary.count(status);
            if count > 0 {
                parts.push(format!("{} {}", count, self.status_label(status)));
            }
        }
        if summary.not_yet_verified > 0 {
            parts.push(format!(
                "{} {}",
                summary.not_yet_verified,
                self.status_label(ClaimStatus::NotYetVerified)
            ));
        }
        parts.join(", ")
    }

    /// Status name, colored by verdict.
    pub fn status_label(&self, status: ClaimStatus) -> String {
        let color = match status {
            ClaimStatus::Supported => "green",
            ClaimStatus::Contradicted => "red",
            ClaimStatus::Debated => "yellow",
            ClaimStatus::InsufficientInformation | ClaimStatus::NotYetVerified => "dimmed",
        };
        self.colorize(status.as_str(), color)
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
            "dimmed" => text.dimmed().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Shorten `text` to at most `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}
