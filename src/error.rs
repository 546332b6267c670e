//! The frame-fatal error taxonomy.
//!
//! Every variant here ends a frame. `Revert` is the only one that is not
//! "the frame blew up" in the traditional sense — it is the explicit REVERT
//! opcode, which carries return data and refunds unused gas to the caller.

use thiserror::Error;

/// A frame-fatal condition raised by an opcode handler or by the frame
/// executor itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvmError {
    #[error("stack underflow")]
    StackUnderflow,

    #[error("stack overflow")]
    StackOverflow,

    #[error("out of gas")]
    OutOfGas,

    #[error("invalid jump destination")]
    InvalidJump,

    #[error("invalid opcode 0x{0:02x}")]
    InvalidOpcode(u8),

    #[error("state-mutating opcode used in a static context")]
    StaticViolation,

    /// Explicit REVERT. The return data is carried by the frame's
    /// `RunState::returndata`, not here — this variant just marks that the
    /// frame ended via REVERT rather than falling off the end of the code.
    #[error("execution reverted")]
    Revert,
}

impl EvmError {
    /// Whether this error consumes all remaining gas in the frame.
    /// Every variant except `Revert` does.
    pub fn consumes_all_gas(&self) -> bool {
        !matches!(self, EvmError::Revert)
    }
}
