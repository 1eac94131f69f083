//! Console output formatter for council results

use colored::{ColoredString, Colorize};
use council_application::CouncilOutcome;
use council_domain::{
    AnalysisResult, ConsistencyAlert, OutputFormat, ParseOutcome, PolishReport, Severity,
};

/// Formats council results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render an outcome in the requested format
    pub fn render(outcome: &CouncilOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(outcome),
            OutputFormat::Verdict => Self::format_verdict(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    /// Format the complete outcome
    pub fn format(outcome: &CouncilOutcome) -> String {
        match outcome {
            CouncilOutcome::Flow(alert) => Self::format_alert(alert.as_ref()),
            CouncilOutcome::Doubt(analysis) => {
                let mut output = Self::header("Structural Doubt");
                output.push('\n');
                output.push_str(&Self::format_analysis(analysis));
                output.push_str(&Self::footer());
                output
            }
            CouncilOutcome::Polish(report) => Self::format_report(report),
        }
    }

    /// Format as JSON
    pub fn format_json(outcome: &CouncilOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Concise output: the verdict for Polish, the bare result otherwise
    pub fn format_verdict(outcome: &CouncilOutcome) -> String {
        match outcome {
            CouncilOutcome::Flow(None) => "OK\n".to_string(),
            CouncilOutcome::Flow(Some(alert)) => format!(
                "{} {}\n",
                format!("[{}/{}]", alert.kind, alert.severity).bold(),
                alert.message
            ),
            CouncilOutcome::Doubt(analysis) => format!("{}\n", analysis.analysis.trim_end()),
            CouncilOutcome::Polish(report) => {
                format!("{}\n", report.synthesis.verdict.trim_end())
            }
        }
    }

    /// A Flow result: the alert, or a quiet all-clear
    pub fn format_alert(alert: Option<&ConsistencyAlert>) -> String {
        let Some(alert) = alert else {
            return format!("{} {}\n", "v".green(), "No inconsistencies found".green());
        };

        let mut output = format!(
            "{} {} {}\n",
            "!".bold(),
            Self::severity_label(alert.severity),
            format!("({})", alert.kind).dimmed()
        );
        output.push_str(&Self::indent(&alert.message, "  "));
        output.push('\n');
        if let Some(suggestion) = &alert.suggestion {
            output.push_str(&format!("\n  {} {}\n", "Suggestion:".cyan().bold(), suggestion));
        }
        output
    }

    /// One backend's critique
    pub fn format_analysis(analysis: &AnalysisResult) -> String {
        let mut output = format!(
            "\n{}\n{}\n",
            format!("── {} · {} ──", analysis.focus.display_name(), analysis.source_label)
                .yellow()
                .bold(),
            analysis.analysis.trim_end()
        );

        if !analysis.suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".cyan().bold()));
            for suggestion in &analysis.suggestions {
                output.push_str(&format!("  * {}\n", suggestion));
            }
        }
        output
    }

    /// A full Polish report: three critiques then the synthesis
    pub fn format_report(report: &PolishReport) -> String {
        let mut output = Self::header("Editorial Council");
        output.push('\n');

        output.push_str(&Self::section_header("Critiques"));
        for analysis in report.analyses() {
            output.push_str(&Self::format_analysis(analysis));
        }

        output.push_str(&Self::section_header("Synthesis"));
        let synthesis = &report.synthesis;
        for (title, text) in [
            ("Consensus:".green().bold(), &synthesis.consensus),
            ("Divergence:".yellow().bold(), &synthesis.divergence),
        ] {
            if !text.trim().is_empty() {
                output.push_str(&format!("\n{}\n{}\n", title, Self::indent(text, "  ")));
            }
        }
        output.push_str(&format!(
            "\n{}\n{}\n",
            "Verdict:".cyan().bold(),
            Self::indent(&synthesis.verdict, "  ")
        ));

        if let ParseOutcome::Degraded { reason } = &report.synthesis_outcome {
            output.push_str(&format!(
                "\n{}\n",
                format!("(synthesis was not structured: {})", reason).dimmed()
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    fn severity_label(severity: Severity) -> ColoredString {
        let label = severity.as_str().to_uppercase();
        match severity {
            Severity::High => label.red().bold(),
            Severity::Medium => label.yellow().bold(),
            Severity::Low => label.normal(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
