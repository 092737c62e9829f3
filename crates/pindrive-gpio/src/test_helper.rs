//! Fake pin writer used by the driver tests.

use pindrive_core::{Level, PinWriter};
use thiserror::Error;

/// A single write issued to [`FakePins`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Digital(String, Level),
    Pwm(String, u8),
}

impl Write {
    pub fn digital(pin: &str, level: Level) -> Self {
        Write::Digital(pin.to_string(), level)
    }

    pub fn pwm(pin: &str, value: u8) -> Self {
        Write::Pwm(pin.to_string(), value)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("injected fault on pin `{0}`")]
pub struct InjectedFault(pub String);

/// Records every write attempt, including ones it fails.
#[derive(Debug, Default)]
pub struct FakePins {
    pub writes: Vec<Write>,
    fail_on: Option<String>,
}

impl FakePins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write to `pin` fails with [`InjectedFault`].
    pub fn failing_on(pin: &str) -> Self {
        Self {
            writes: Vec::new(),
            fail_on: Some(pin.to_string()),
        }
    }

    fn check(&self, pin: &str) -> Result<(), InjectedFault> {
        match &self.fail_on {
            Some(bad) if bad == pin => Err(InjectedFault(pin.to_string())),
            _ => Ok(()),
        }
    }
}

impl PinWriter for FakePins {
    type Error = InjectedFault;

    fn digital_write(&mut self, pin: &str, level: Level) -> Result<(), Self::Error> {
        self.writes.push(Write::digital(pin, level));
        self.check(pin)
    }

    fn pwm_write(&mut self, pin: &str, value: u8) -> Result<(), Self::Error> {
        self.writes.push(Write::pwm(pin, value));
        self.check(pin)
    }
}
