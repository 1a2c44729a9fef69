//! Lifecycle of analysis and full-fix requests for one editor session.

use super::analysis::AnalysisResult;
use super::error::SessionError;

/// Identifier correlating a request with its completion.
pub type RequestId = u64;

/// Whether a full fix may be requested for the displayed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixGate {
    #[default]
    Disabled,
    Enabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Idle {
        fix_gate: FixGate,
    },
    Pending {
        request: RequestId,
        /// The buffer changed after the request went out; its result cannot
        /// enable the full fix.
        buffer_changed: bool,
    },
    FixPending {
        request: RequestId,
    },
}

impl Default for AnalysisPhase {
    fn default() -> Self {
        Self::Idle {
            fix_gate: FixGate::Disabled,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    phase: AnalysisPhase,
    last_request: RequestId,
}

impl AnalysisSession {
    pub fn phase(&self) -> AnalysisPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.phase, AnalysisPhase::Idle { .. })
    }

    pub fn full_fix_enabled(&self) -> bool {
        matches!(
            self.phase,
            AnalysisPhase::Idle {
                fix_gate: FixGate::Enabled
            }
        )
    }

    fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }

    /// Start an analysis request for non-empty code.
    pub fn begin_analysis(&mut self, code: &str) -> Result<RequestId, SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        if code.trim().is_empty() {
            self.phase = AnalysisPhase::default();
            return Err(SessionError::EmptyCode);
        }
        let request = self.next_request();
        self.phase = AnalysisPhase::Pending {
            request,
            buffer_changed: false,
        };
        Ok(request)
    }

    /// Start a full-fix request. Only legal while idle with the gate enabled.
    pub fn begin_full_fix(&mut self) -> Result<RequestId, SessionError> {
        match self.phase {
            AnalysisPhase::Pending { .. } | AnalysisPhase::FixPending { .. } => {
                Err(SessionError::Busy)
            }
            AnalysisPhase::Idle {
                fix_gate: FixGate::Disabled,
            } => Err(SessionError::FullFixDisabled),
            AnalysisPhase::Idle {
                fix_gate: FixGate::Enabled,
            } => {
                let request = self.next_request();
                self.phase = AnalysisPhase::FixPending { request };
                Ok(request)
            }
        }
    }

    /// Apply the result of an in-flight request and return to idle.
    pub fn complete(
        &mut self,
        request: RequestId,
        result: &AnalysisResult,
    ) -> Result<(), SessionError> {
        match self.phase {
            AnalysisPhase::Pending {
                request: expected,
                buffer_changed,
            } if expected == request => {
                let fix_gate = if result.enables_full_fix() && !buffer_changed {
                    FixGate::Enabled
                } else {
                    FixGate::Disabled
                };
                self.phase = AnalysisPhase::Idle { fix_gate };
                Ok(())
            }
            AnalysisPhase::FixPending { request: expected } if expected == request => {
                self.phase = AnalysisPhase::default();
                Ok(())
            }
            AnalysisPhase::Pending { request: expected, .. }
            | AnalysisPhase::FixPending { request: expected } => {
                Err(SessionError::StaleResponse {
                    expected: Some(expected),
                    got: request,
                })
            }
            AnalysisPhase::Idle { .. } => Err(SessionError::StaleResponse {
                expected: None,
                got: request,
            }),
        }
    }

    /// The buffer or its language changed: whatever was analyzed is no longer
    /// what is displayed.
    pub fn invalidate(&mut self) {
        match &mut self.phase {
            AnalysisPhase::Idle { fix_gate } => *fix_gate = FixGate::Disabled,
            AnalysisPhase::Pending { buffer_changed, .. } => *buffer_changed = true,
            AnalysisPhase::FixPending { .. } => {}
        }
    }
}
