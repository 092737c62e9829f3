use parking_lot::RwLock;
use pindrive_core::{Adaptor, Level, PinWriter};
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error;
use tracing::{debug, info};

/// Last value driven onto a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOutput {
    Digital(Level),
    Pwm(u8),
}

#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub outputs: BTreeMap<String, PinOutput>,
    pub writes: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("pin `{0}` is not exported by this board")]
    UnknownPin(String),
}

/// In-memory pin bank standing in for real hardware.
///
/// Clones share the same pin table, so a clone handed to a driver can be
/// inspected through any other clone.
#[derive(Debug, Clone)]
pub struct SimulatedBoard {
    name: String,
    exported: Option<Vec<String>>,
    state: Arc<RwLock<BoardState>>,
}

impl SimulatedBoard {
    /// A board accepting writes to any pin.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exported: None,
            state: Arc::default(),
        }
    }

    /// Only the listed pins accept writes; others fail with [`BoardError::UnknownPin`].
    pub fn with_exported<I, S>(mut self, pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exported = Some(pins.into_iter().map(Into::into).collect());
        self
    }

    pub fn snapshot(&self) -> BoardState {
        (*self.state.read()).clone()
    }

    fn output(&mut self, pin: &str, output: PinOutput) -> Result<(), BoardError> {
        if let Some(exported) = &self.exported {
            if !exported.iter().any(|p| p == pin) {
                return Err(BoardError::UnknownPin(pin.to_string()));
            }
        }
        debug!(board = %self.name, pin, ?output, "pin write");
        let mut g = self.state.write();
        g.outputs.insert(pin.to_string(), output);
        g.writes += 1;
        Ok(())
    }
}

impl PinWriter for SimulatedBoard {
    type Error = BoardError;

    fn digital_write(&mut self, pin: &str, level: Level) -> Result<(), Self::Error> {
        self.output(pin, PinOutput::Digital(level))
    }

    fn pwm_write(&mut self, pin: &str, value: u8) -> Result<(), Self::Error> {
        self.output(pin, PinOutput::Pwm(value))
    }
}

impl Adaptor for SimulatedBoard {
    type Error = BoardError;

    fn name(&self) -> &str {
        &self.name
    }

    fn connect(&mut self) -> Result<(), Self::Error> {
        info!(board = %self.name, "connected");
        Ok(())
    }

    /// Drives every pin written so far back to low / zero duty.
    fn finalize(&mut self) -> Result<(), Self::Error> {
        let mut g = self.state.write();
        for output in g.outputs.values_mut() {
            *output = match *output {
                PinOutput::Digital(_) => PinOutput::Digital(Level::Low),
                PinOutput::Pwm(_) => PinOutput::Pwm(0),
            };
        }
        info!(board = %self.name, pins = g.outputs.len(), "finalized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_pin_table() {
        let board = SimulatedBoard::new("sim");
        let mut writer = board.clone();
        writer.digital_write("7", Level::High).unwrap();
        writer.pwm_write("3", 42).unwrap();

        let state = board.snapshot();
        assert_eq!(state.writes, 2);
        assert_eq!(state.outputs.get("7"), Some(&PinOutput::Digital(Level::High)));
        assert_eq!(state.outputs.get("3"), Some(&PinOutput::Pwm(42)));
    }

    #[test]
    fn test_unexported_pin_is_rejected() {
        let mut board = SimulatedBoard::new("sim").with_exported(["3"]);
        assert!(board.pwm_write("3", 1).is_ok());
        assert_eq!(
            board.digital_write("4", Level::High),
            Err(BoardError::UnknownPin("4".to_string()))
        );
        assert_eq!(board.snapshot().writes, 1);
    }

    #[test]
    fn test_finalize_drives_outputs_low() {
        let mut board = SimulatedBoard::new("sim");
        board.connect().unwrap();
        board.digital_write("7", Level::High).unwrap();
        board.pwm_write("3", 200).unwrap();
        board.finalize().unwrap();

        let state = board.snapshot();
        assert_eq!(state.outputs.get("7"), Some(&PinOutput::Digital(Level::Low)));
        assert_eq!(state.outputs.get("3"), Some(&PinOutput::Pwm(0)));
        assert_eq!(board.name(), "sim");
    }
}
