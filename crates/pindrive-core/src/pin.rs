//! Pin-level capabilities.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Logic level of a digital output.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    /// Logic 0.
    #[default]
    Low,
    /// Logic 1.
    High,
}

impl Level {
    /// The level as the `0`/`1` byte written on the wire.
    pub const fn as_u8(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }

    /// Returns `true` for [`Level::High`].
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Capability to drive named output pins, either as plain digital outputs or
/// as PWM channels with an 8-bit duty value.
///
/// Pins are addressed by the adaptor's own naming scheme (a header number, a
/// GPIO line name, ...); drivers pass the identifiers through untouched.
pub trait PinWriter {
    /// Hardware/IO failure reported by the adaptor.
    type Error;

    /// Drive `pin` to `level`.
    fn digital_write(&mut self, pin: &str, level: Level) -> Result<(), Self::Error>;

    /// Set the PWM duty of `pin`, `0` being fully off and `255` fully on.
    fn pwm_write(&mut self, pin: &str, value: u8) -> Result<(), Self::Error>;
}

impl<W: PinWriter + ?Sized> PinWriter for &mut W {
    type Error = W::Error;

    fn digital_write(&mut self, pin: &str, level: Level) -> Result<(), Self::Error> {
        (**self).digital_write(pin, level)
    }

    fn pwm_write(&mut self, pin: &str, value: u8) -> Result<(), Self::Error> {
        (**self).pwm_write(pin, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        writes: Vec<(String, u8)>,
    }

    impl PinWriter for Recorder {
        type Error = core::convert::Infallible;

        fn digital_write(&mut self, pin: &str, level: Level) -> Result<(), Self::Error> {
            self.writes.push((pin.to_string(), level.into()));
            Ok(())
        }

        fn pwm_write(&mut self, pin: &str, value: u8) -> Result<(), Self::Error> {
            self.writes.push((pin.to_string(), value));
            Ok(())
        }
    }

    #[test]
    fn test_level_conversions() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert_eq!(u8::from(Level::High), 1);
        assert_eq!(Level::Low.as_u8(), 0);
        assert_eq!(Level::default(), Level::Low);
        assert!(Level::High.is_high());
        assert_eq!(format!("{}", Level::High), "1");
    }

    #[test]
    fn test_writer_through_mut_reference() {
        let mut recorder = Recorder { writes: Vec::new() };
        {
            let mut borrowed = &mut recorder;
            borrowed.digital_write("7", Level::High).unwrap();
            borrowed.pwm_write("3", 128).unwrap();
        }
        assert_eq!(
            recorder.writes,
            vec![("7".to_string(), 1), ("3".to_string(), 128)]
        );
    }
}
