//! What the results panel shows, and its plain-text rendering.

use crate::domain::{AnalysisResult, AnalysisStatus, ExplainMode, Finding};

pub const FIXED_CODE_NOTE: &str =
    "Note: ⚠ Fixed code can make mistakes. Please review it before use.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputView {
    #[default]
    Empty,
    Loading(ExplainMode),
    /// Input rejected before any request was made.
    Validation(String),
    Result(AnalysisResult),
}

impl OutputView {
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Result(result) => Some(result),
            _ => None,
        }
    }

    /// Text copied by "copy output" and printed by the CLI.
    pub fn render_plain_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Loading(ExplainMode::Analyze) => "Analyzing...".to_string(),
            Self::Loading(ExplainMode::FullFix) => "Generating full fix...".to_string(),
            Self::Validation(message) => message.clone(),
            Self::Result(result) => render_result(result),
        }
    }
}

fn line_label(finding: &Finding) -> String {
    finding
        .line
        .map(|line| line.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn render_result(result: &AnalysisResult) -> String {
    let message = result.message.as_deref().unwrap_or_default();
    let mut out = String::new();

    match result.status {
        AnalysisStatus::IssuesFound => {
            out.push_str("⚠ Issues Found\n");
            out.push_str("Line | Issue | Details");
            for finding in &result.findings {
                out.push_str(&format!(
                    "\n{} | {} | {}",
                    line_label(finding),
                    finding.issue,
                    finding.detail
                ));
            }
        }
        AnalysisStatus::Clean => {
            let mut blocks: Vec<String> = Vec::new();
            if let Some(intro) = result.intro.as_deref().filter(|i| !i.trim().is_empty()) {
                blocks.push(intro.trim().to_string());
            }
            for finding in &result.findings {
                let mut card = format!("Line {}", line_label(finding));
                if !finding.issue.is_empty() {
                    card.push_str(&format!("\n  {}", finding.issue));
                }
                if !finding.detail.is_empty() {
                    card.push_str(&format!("\n  {}", finding.detail));
                }
                blocks.push(card);
            }
            out.push_str(&blocks.join("\n\n"));
        }
        AnalysisStatus::LanguageMismatch => {
            out.push_str("⚠ Language Mismatch\n");
            out.push_str(message);
        }
        AnalysisStatus::FixNotAllowed => {
            out.push_str("⛔ Full Fix Not Allowed\n");
            out.push_str(message);
        }
        AnalysisStatus::Fixed => {
            out.push_str(FIXED_CODE_NOTE);
            out.push_str("\n⚙ Fixed Code\n");
            out.push_str(result.corrected_code.as_deref().unwrap_or_default());
        }
        AnalysisStatus::MissingCorrection | AnalysisStatus::NetworkError => {
            out.push_str(message);
            if let Some(raw) = &result.raw {
                out.push('\n');
                out.push_str(raw);
            }
        }
    }

    out
}
