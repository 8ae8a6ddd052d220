//! Validation chain
//!
//! Evaluates an ordered list of stages until one decides. Assembly rejects
//! any list that could finish without a decision.

use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;

use crate::auth::{
    AuthenticationResult, BannedRegistry, CredentialRequest, CredentialVerifier, TokenCache,
    TokenIssuer,
};
use crate::chain::stage::{Stage, StageOutcome};
use crate::chain::stages::{BannedCheck, CacheCheck, CredentialCheck, FailureFallback};
use crate::error::AssemblyError;
use crate::middleware::logging::{log_decision, log_request};

/// Ordered, immutable pipeline of stages.
///
/// Holds no mutable state of its own, so one instance can serve any number
/// of threads as long as its collaborators allow concurrent reads.
pub struct ValidationChain {
    stages: Vec<Box<dyn Stage>>,
}

impl ValidationChain {
    /// Assembles a chain from an explicit stage list.
    ///
    /// The list must be non-empty, end in a terminal stage, and contain no
    /// other terminal stage.
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Result<Self, AssemblyError> {
        let last = stages.last().ok_or(AssemblyError::EmptyChain)?;
        if !last.is_terminal() {
            return Err(AssemblyError::UnterminatedChain {
                last_stage: last.name(),
            });
        }

        if let Some((position, stage)) = stages[..stages.len() - 1]
            .iter()
            .enumerate()
            .find(|(_, stage)| stage.is_terminal())
        {
            return Err(AssemblyError::UnreachableStage {
                terminal_stage: stage.name(),
                position,
            });
        }

        let chain = Self { stages };
        info!("Validation chain assembled: {:?}", chain.stage_names());
        Ok(chain)
    }

    /// Standard order: banned, cache, credentials, fallback.
    pub fn standard(
        registry: Arc<dyn BannedRegistry>,
        cache: Arc<dyn TokenCache>,
        verifier: Arc<dyn CredentialVerifier>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Result<Self, AssemblyError> {
        Self::new(vec![
            Box::new(BannedCheck::new(registry)),
            Box::new(CacheCheck::new(cache)),
            Box::new(CredentialCheck::new(verifier, issuer)),
            Box::new(FailureFallback),
        ])
    }

    /// Runs the stages in order and returns the first decision.
    pub fn evaluate(&self, request: &CredentialRequest) -> AuthenticationResult {
        log_request(request.username());

        for stage in &self.stages {
            match stage.attempt(request) {
                StageOutcome::Decided(result) => {
                    log_decision(stage.name(), &result);
                    return result;
                }
                StageOutcome::Continue => {
                    debug!("Stage {} deferred for {}", stage.name(), request.username());
                }
            }
        }

        // Only reachable when a stage claims to be terminal but defers.
        warn!(
            "No stage decided for {}; terminal stage {} deferred",
            request.username(),
            self.stages.last().map_or("<none>", |s| s.name())
        );
        AuthenticationResult::rejected(request.username())
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl fmt::Debug for ValidationChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationChain")
            .field("stages", &self.stage_names())
            .finish()
    }
}
