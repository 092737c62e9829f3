//! Error type returned by the motor driver.

use thiserror::Error;

/// Errors surfaced by [`MotorDriver`](crate::MotorDriver) verbs.
///
/// `E` is the error type of the injected pin writer. The first failing write
/// aborts the verb; fields cached before the failure are not rolled back.
#[derive(Debug, Error)]
pub enum MotorError<E> {
    /// The pin writer rejected a write.
    #[error("failed to write pin `{pin}`")]
    PinWrite {
        /// Pin that was being written. Empty when the wiring leaves the pin unset.
        pin: String,
        /// Failure reported by the pin writer.
        #[source]
        source: E,
    },
}

impl<E> MotorError<E> {
    /// Pin involved in the failed write.
    pub fn pin(&self) -> &str {
        match self {
            MotorError::PinWrite { pin, .. } => pin,
        }
    }

    /// The pin writer's own error.
    pub fn into_source(self) -> E {
        match self {
            MotorError::PinWrite { source, .. } => source,
        }
    }
}
