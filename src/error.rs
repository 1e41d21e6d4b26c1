// Copyright 2026 Hypermesh Foundation. All rights reserved.
// NFT Tokenomics Simulation Suite - Engine Errors

use crate::conservation::ConservationError;
use crate::input::InputError;
use crate::params::ParameterError;
use crate::split::SplitError;

/// Every way a run can fail. Callers fix their records or parameters and
/// run again; nothing is retried internally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    #[error("revenue split failed: {0}")]
    Split(#[from] SplitError),

    #[error("ledger does not balance: {0}")]
    Conservation(#[from] ConservationError),
}

impl EngineError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_invalid_parameters(&self) -> bool {
        matches!(self, Self::InvalidParameters(_))
    }
}
