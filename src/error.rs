//! Error types for AC IR codec operations.

use crate::types::ProtocolVariant;
use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, AcIrError>;

/// Error types for the IR remote codec.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcIrError {
    /// Requested setpoint is not in the variant's supported set
    #[error("unsupported temperature {celsius} for {variant:?}")]
    UnsupportedTemperature {
        /// Rejected setpoint in degrees Celsius (0 requests power-off)
        celsius: i16,
        /// Wire encoding the request was made against
        variant: ProtocolVariant,
    },
}
