#![warn(missing_docs)]
#![doc = "GPIO motor driver for pindrive."]
#![doc = ""]
#![doc = "[`MotorDriver`] turns high-level verbs (on, off, speed, forward, ...) into"]
#![doc = "digital and PWM writes on an injected [`PinWriter`](pindrive_core::PinWriter)."]

pub mod error;
pub mod motor;
pub mod pins;

#[cfg(test)]
mod test_helper;

pub use error::MotorError;
pub use motor::{Direction, MAX_SPEED, Mode, MotorDriver, ParseDirectionError};
pub use pins::{MotorPins, PinRole};
