//! Analysis results returned by the remote `/explain` endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const EMPTY_CODE_MESSAGE: &str = "⚠ Please enter some code to analyze.";
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection Error";
pub const FIX_ERROR_MESSAGE: &str = "Error generating full fix.";
pub const FIX_DISABLED_MESSAGE: &str =
    "Full Fix is only available after an analysis reports errors for the current code.";
pub const MISSING_CORRECTION_MESSAGE: &str = "❌ No corrected code returned.";

/// Which kind of request produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplainMode {
    Analyze,
    FullFix,
}

impl ExplainMode {
    /// Value of the `mode` field in the request body, if any.
    pub fn wire_value(self) -> Option<&'static str> {
        match self {
            Self::Analyze => None,
            Self::FullFix => Some("full_fix"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Clean,
    IssuesFound,
    LanguageMismatch,
    FixNotAllowed,
    Fixed,
    MissingCorrection,
    NetworkError,
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clean => write!(f, "clean"),
            Self::IssuesFound => write!(f, "issues-found"),
            Self::LanguageMismatch => write!(f, "language-mismatch"),
            Self::FixNotAllowed => write!(f, "fix-not-allowed"),
            Self::Fixed => write!(f, "fixed"),
            Self::MissingCorrection => write!(f, "missing-correction"),
            Self::NetworkError => write!(f, "network-error"),
        }
    }
}

/// One per-line item. Issues use `{line, issue, detail}`, explanation cards use
/// `{line, code, description}`; both land in the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Finding {
    #[serde(default, deserialize_with = "lenient_line")]
    pub line: Option<u32>,
    #[serde(default, alias = "code")]
    pub issue: String,
    #[serde(default, alias = "description")]
    pub detail: String,
}

fn lenient_line<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Decoded body of an `/explain` response. Every field is optional because the
/// server relays model output more or less verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExplainReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub analysis: Option<Vec<Finding>>,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default)]
    pub corrected_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detected: Option<String>,
    #[serde(default)]
    pub selected: Option<String>,
}

/// Outcome of one analysis or full-fix request, held in session state only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: AnalysisStatus,
    pub findings: Vec<Finding>,
    pub intro: Option<String>,
    pub corrected_code: Option<String>,
    pub message: Option<String>,
    /// Languages reported on a mismatch as (detected, selected).
    pub mismatch: Option<(String, String)>,
    /// Pretty-printed reply kept when the server answered with something unrecognized.
    pub raw: Option<String>,
}

impl AnalysisResult {
    fn with_status(status: AnalysisStatus) -> Self {
        Self {
            status,
            findings: Vec::new(),
            intro: None,
            corrected_code: None,
            message: None,
            mismatch: None,
            raw: None,
        }
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::with_status(AnalysisStatus::NetworkError)
        }
    }

    pub fn fix_not_allowed(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::with_status(AnalysisStatus::FixNotAllowed)
        }
    }

    pub fn missing_correction() -> Self {
        Self {
            message: Some(MISSING_CORRECTION_MESSAGE.to_string()),
            ..Self::with_status(AnalysisStatus::MissingCorrection)
        }
    }

    /// Result used when a request fails before a reply could be decoded.
    pub fn transport_failure(mode: ExplainMode) -> Self {
        match mode {
            ExplainMode::Analyze => Self::network_error(CONNECTION_ERROR_MESSAGE),
            ExplainMode::FullFix => Self::network_error(FIX_ERROR_MESSAGE),
        }
    }

    /// Whether this outcome allows a full fix to be requested next.
    pub fn enables_full_fix(&self) -> bool {
        self.status == AnalysisStatus::IssuesFound
    }

    pub fn from_reply(mode: ExplainMode, reply: ExplainReply) -> Self {
        match mode {
            ExplainMode::Analyze => Self::from_analysis_reply(reply),
            ExplainMode::FullFix => Self::from_fix_reply(reply),
        }
    }

    fn mismatch(reply: ExplainReply) -> Self {
        let mismatch = match (reply.detected, reply.selected) {
            (Some(detected), Some(selected)) => Some((detected, selected)),
            _ => None,
        };
        Self {
            message: reply.message,
            mismatch,
            ..Self::with_status(AnalysisStatus::LanguageMismatch)
        }
    }

    fn unrecognized(reply: &ExplainReply, message: &str) -> Self {
        Self {
            raw: serde_json::to_string_pretty(reply).ok(),
            ..Self::network_error(message)
        }
    }

    fn from_analysis_reply(reply: ExplainReply) -> Self {
        match reply.status.as_deref() {
            Some("language_mismatch") => Self::mismatch(reply),
            Some("error") => match reply.analysis {
                Some(findings) => Self {
                    findings,
                    ..Self::with_status(AnalysisStatus::IssuesFound)
                },
                None => Self::network_error(CONNECTION_ERROR_MESSAGE),
            },
            Some("success") => Self {
                findings: reply.analysis.unwrap_or_default(),
                intro: reply.intro,
                ..Self::with_status(AnalysisStatus::Clean)
            },
            _ => Self::unrecognized(&reply, CONNECTION_ERROR_MESSAGE),
        }
    }

    fn from_fix_reply(reply: ExplainReply) -> Self {
        match reply.status.as_deref() {
            Some("full_fix_not_allowed") => Self::fix_not_allowed(
                reply
                    .message
                    .unwrap_or_else(|| "Full Fix is only allowed when errors exist.".into()),
            ),
            Some("language_mismatch") => Self::mismatch(reply),
            _ if reply
                .corrected_code
                .as_deref()
                .is_some_and(|code| !code.is_empty()) =>
            {
                Self {
                    corrected_code: reply.corrected_code,
                    findings: reply.analysis.unwrap_or_default(),
                    ..Self::with_status(AnalysisStatus::Fixed)
                }
            }
            Some("error") => Self::network_error(FIX_ERROR_MESSAGE),
            _ => Self::missing_correction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(json: &str) -> ExplainReply {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn error_status_with_findings_is_issues_found() {
        let result = AnalysisResult::from_reply(
            ExplainMode::Analyze,
            reply(r#"{"status":"error","analysis":[{"line":1,"issue":"Missing expression","detail":"`=` needs a value"}]}"#),
        );
        assert_eq!(result.status, AnalysisStatus::IssuesFound);
        assert!(result.enables_full_fix());
        assert_eq!(result.findings[0].line, Some(1));
        assert_eq!(result.findings[0].issue, "Missing expression");
    }

    #[test]
    fn server_failure_envelope_maps_to_network_error() {
        let result = AnalysisResult::from_reply(
            ExplainMode::Analyze,
            reply(r#"{"status":"error","message":"AI analysis failed."}"#),
        );
        assert_eq!(result.status, AnalysisStatus::NetworkError);
        assert_eq!(result.message.as_deref(), Some(CONNECTION_ERROR_MESSAGE));
        assert!(!result.enables_full_fix());
    }

    #[test]
    fn success_reply_keeps_intro_and_cards_in_order() {
        let result = AnalysisResult::from_reply(
            ExplainMode::Analyze,
            reply(
                r##"{"status":"success","intro":"Looks good.","analysis":[
                    {"line":"2","code":"int x = 1;","description":"Declares x"},
                    {"line":1,"code":"#include <cstdio>","description":"Header"}]}"##,
            ),
        );
        assert_eq!(result.status, AnalysisStatus::Clean);
        assert_eq!(result.intro.as_deref(), Some("Looks good."));
        let lines: Vec<_> = result.findings.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![Some(2), Some(1)]);
        assert_eq!(result.findings[0].issue, "int x = 1;");
        assert_eq!(result.findings[0].detail, "Declares x");
    }

    #[test]
    fn mismatch_keeps_server_message_and_languages() {
        let result = AnalysisResult::from_reply(
            ExplainMode::Analyze,
            reply(r#"{"status":"language_mismatch","detected":"Python","selected":"C++","message":"wrong"}"#),
        );
        assert_eq!(result.status, AnalysisStatus::LanguageMismatch);
        assert_eq!(result.message.as_deref(), Some("wrong"));
        assert_eq!(result.mismatch, Some(("Python".into(), "C++".into())));
    }

    #[test]
    fn unknown_status_keeps_raw_reply() {
        let result =
            AnalysisResult::from_reply(ExplainMode::Analyze, reply(r#"{"status":"weird"}"#));
        assert_eq!(result.status, AnalysisStatus::NetworkError);
        assert!(result.raw.as_deref().unwrap().contains("weird"));
    }

    #[test]
    fn fix_reply_outcomes_are_distinct() {
        let not_allowed = AnalysisResult::from_reply(
            ExplainMode::FullFix,
            reply(r#"{"status":"full_fix_not_allowed","message":"no errors"}"#),
        );
        assert_eq!(not_allowed.status, AnalysisStatus::FixNotAllowed);

        let mismatch = AnalysisResult::from_reply(
            ExplainMode::FullFix,
            reply(r#"{"status":"language_mismatch","message":"wrong"}"#),
        );
        assert_eq!(mismatch.status, AnalysisStatus::LanguageMismatch);

        let fixed = AnalysisResult::from_reply(
            ExplainMode::FullFix,
            reply(r#"{"status":"error","corrected_code":"int x = 0;"}"#),
        );
        assert_eq!(fixed.status, AnalysisStatus::Fixed);
        assert_eq!(fixed.corrected_code.as_deref(), Some("int x = 0;"));

        let missing =
            AnalysisResult::from_reply(ExplainMode::FullFix, reply(r#"{"status":"success"}"#));
        assert_eq!(missing.status, AnalysisStatus::MissingCorrection);

        let failed = AnalysisResult::from_reply(
            ExplainMode::FullFix,
            reply(r#"{"status":"error","message":"AI full fix failed."}"#),
        );
        assert_eq!(failed.status, AnalysisStatus::NetworkError);
        assert_eq!(failed.message.as_deref(), Some(FIX_ERROR_MESSAGE));
    }

    #[test]
    fn non_numeric_line_is_dropped() {
        let finding: Finding =
            serde_json::from_str(r#"{"line":"3-5","issue":"x","detail":"y"}"#).unwrap();
        assert_eq!(finding.line, None);
    }
}
