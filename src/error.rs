//! Error types for the processing chain.

use thiserror::Error;

use crate::common::Real;

/// Result type for radar-toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unsupported waveform requests degrade to empty signals instead of
/// failing; everything listed here is a genuine contract violation with
/// no recovery path.
#[derive(Debug, Error)]
pub enum Error {
    /// The spectral transform only accepts power-of-two lengths.
    #[error("signal length {len} is not a power of two")]
    NonPowerOfTwoLength { len: usize },

    /// CFAR needs at least one training cell on each side.
    #[error("CFAR requires at least one training cell")]
    NoTrainingCells,

    /// The false alarm probability must lie strictly between 0 and 1.
    #[error("false alarm probability {pfa} is outside (0, 1)")]
    FalseAlarmOutOfRange { pfa: Real },

    /// A range-Doppler map needs at least one pulse.
    #[error("pulse train is empty")]
    EmptyPulseTrain,

    /// A persisted line did not parse as `<real>,<imag>`.
    #[error("malformed sample on line {line}")]
    MalformedSample { line: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
