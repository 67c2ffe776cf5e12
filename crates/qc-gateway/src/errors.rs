//! Gateway-local errors beyond the five client precondition strings named
//! in spec §4.7 (the `No File` sentinel from `ListFiles` is the fifth —
//! see spec §8 property 7). A malformed client message (spec §7) gets a
//! structured response instead of silently failing a field access.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("MalformedRequestError")]
    MalformedRequest,
    #[error("InvalidPositionError")]
    InvalidPosition,
}

impl GatewayError {
    pub fn wire_message(&self) -> &'static str {
        match self {
            GatewayError::MalformedRequest => "MalformedRequestError",
            GatewayError::InvalidPosition => "InvalidPositionError",
        }
    }
}
