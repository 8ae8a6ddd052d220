//! Stage capability
//!
//! A stage inspects a request and either decides it or defers to the next
//! stage in the chain.

use crate::auth::{AuthenticationResult, CredentialRequest};

/// What a single stage concluded about a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Final answer; evaluation stops here.
    Decided(AuthenticationResult),
    /// Not applicable; run the next stage.
    Continue,
}

/// One check in the validation chain.
pub trait Stage: Send + Sync {
    /// Short identifier used in logs and assembly errors.
    fn name(&self) -> &'static str;

    fn attempt(&self, request: &CredentialRequest) -> StageOutcome;

    /// True only for stages that never return [`StageOutcome::Continue`].
    /// The chain requires its last stage to be terminal.
    fn is_terminal(&self) -> bool {
        false
    }
}
