//! Motor driver over digital and PWM pins.
//!
//! The driver works in one of two modes. In [`Mode::Digital`] the motor is
//! either on or off, driven through a single switch level. In
//! [`Mode::Analog`] it is driven by a PWM duty value on the speed pin. Calling
//! [`MotorDriver::speed`] (directly or through `max`, `forward`, ...) moves
//! the driver into analog mode for good.

use core::fmt;
use core::str::FromStr;

use pindrive_core::{Driver, Level, PinWriter};
use thiserror::Error;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MotorError;
use crate::pins::{MotorPins, PinRole};

/// Full-scale PWM duty.
pub const MAX_SPEED: u8 = 255;

/// How the motor is being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// On/off through a single switch level.
    #[default]
    Digital,
    /// PWM duty on the speed pin.
    Analog,
}

/// Rotation direction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Forward rotation.
    #[default]
    Forward,
    /// Backward rotation.
    Backward,
    /// Neither input driven; the motor coasts.
    None,
}

impl Direction {
    /// Levels of the (forward, backward) H-bridge inputs for this direction.
    pub const fn bridge_levels(self) -> (Level, Level) {
        match self {
            Direction::Forward => (Level::High, Level::Low),
            Direction::Backward => (Level::Low, Level::High),
            Direction::None => (Level::Low, Level::Low),
        }
    }

    /// Level of a single direction pin: high only for forward.
    pub const fn pin_level(self) -> Level {
        match self {
            Direction::Forward => Level::High,
            Direction::Backward | Direction::None => Level::Low,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::None => "none",
        };
        f.write_str(name)
    }
}

/// Returned when a string names no [`Direction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction `{0}` (expected forward, backward or none)")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Direction::Forward),
            "backward" => Ok(Direction::Backward),
            "none" => Ok(Direction::None),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// A DC motor wired to digital and/or PWM outputs of a [`PinWriter`].
pub struct MotorDriver<W> {
    name: String,
    connection: W,
    pins: MotorPins,
    mode: Mode,
    state: Level,
    speed: u8,
    direction: Direction,
}

impl<W: PinWriter> MotorDriver<W> {
    /// Create a driver named `name` issuing its writes through `connection`.
    ///
    /// The driver starts in digital mode, switched off, facing forward. No
    /// pin is touched until the first verb is called.
    pub fn new(connection: W, name: impl Into<String>, pins: MotorPins) -> Self {
        Self {
            name: name.into(),
            connection,
            pins,
            mode: Mode::Digital,
            state: Level::Low,
            speed: 0,
            direction: Direction::Forward,
        }
    }

    /// Turn the motor off, or drop it to zero speed in analog mode.
    pub fn off(&mut self) -> Result<(), MotorError<W::Error>> {
        match self.mode {
            Mode::Digital => self.change_state(Level::Low),
            Mode::Analog => self.speed(0),
        }
    }

    /// Turn the motor on.
    ///
    /// In analog mode the last speed is re-applied, or full speed if the
    /// motor was stopped.
    pub fn on(&mut self) -> Result<(), MotorError<W::Error>> {
        match self.mode {
            Mode::Digital => self.change_state(Level::High),
            Mode::Analog => {
                if self.speed == 0 {
                    self.speed = MAX_SPEED;
                }
                self.speed(self.speed)
            }
        }
    }

    /// Same as [`MotorDriver::off`].
    pub fn min(&mut self) -> Result<(), MotorError<W::Error>> {
        self.off()
    }

    /// Run at full speed.
    pub fn max(&mut self) -> Result<(), MotorError<W::Error>> {
        self.speed(MAX_SPEED)
    }

    /// Whether the motor is on in its current mode.
    pub fn is_on(&self) -> bool {
        match self.mode {
            Mode::Digital => self.state.is_high(),
            Mode::Analog => self.speed > 0,
        }
    }

    /// Whether the motor is off in its current mode.
    pub fn is_off(&self) -> bool {
        !self.is_on()
    }

    /// Switch off if on, on if off.
    pub fn toggle(&mut self) -> Result<(), MotorError<W::Error>> {
        if self.is_on() { self.off() } else { self.on() }
    }

    /// Set the PWM duty of the speed pin. Moves the driver into analog mode.
    pub fn speed(&mut self, value: u8) -> Result<(), MotorError<W::Error>> {
        self.mode = Mode::Analog;
        self.speed = value;
        self.write_pwm(PinRole::Speed, value)
    }

    /// Face forward, then run at `speed`.
    pub fn forward(&mut self, speed: u8) -> Result<(), MotorError<W::Error>> {
        self.set_direction(Direction::Forward)?;
        self.speed(speed)
    }

    /// Face backward, then run at `speed`.
    pub fn backward(&mut self, speed: u8) -> Result<(), MotorError<W::Error>> {
        self.set_direction(Direction::Backward)?;
        self.speed(speed)
    }

    /// Set the rotation direction.
    ///
    /// With a direction pin, that pin goes high for forward and low
    /// otherwise. Without one, the forward and backward inputs receive the
    /// H-bridge pattern of [`Direction::bridge_levels`], forward input first.
    pub fn set_direction(&mut self, direction: Direction) -> Result<(), MotorError<W::Error>> {
        self.direction = direction;
        if self.pins.has(PinRole::Direction) {
            return self.write_digital(PinRole::Direction, direction.pin_level());
        }

        let (forward, backward) = direction.bridge_levels();
        self.write_digital(PinRole::Forward, forward)?;
        self.write_digital(PinRole::Backward, backward)
    }

    /// Operating mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// On/off level, authoritative in digital mode.
    pub fn state(&self) -> Level {
        self.state
    }

    /// Cached PWM duty, authoritative in analog mode.
    pub fn current_speed(&self) -> u8 {
        self.speed
    }

    /// Last direction set, whether or not the hardware accepted it.
    pub fn current_direction(&self) -> Direction {
        self.direction
    }

    /// Pin assignments.
    pub fn pins(&self) -> &MotorPins {
        &self.pins
    }

    /// Mutable access to the pin writer.
    pub fn connection_mut(&mut self) -> &mut W {
        &mut self.connection
    }

    /// Give the pin writer back.
    pub fn into_connection(self) -> W {
        self.connection
    }

    // On H-bridge wiring, switching on drives direction `None` while
    // switching off restores the stored direction and seeds the speed pin
    // with full duty.
    fn change_state(&mut self, state: Level) -> Result<(), MotorError<W::Error>> {
        self.state = state;
        self.speed = match state {
            Level::High => 0,
            Level::Low => MAX_SPEED,
        };

        if !self.pins.has(PinRole::Forward) {
            return self.write_digital(PinRole::Speed, state);
        }

        match state {
            Level::Low => {
                self.set_direction(self.direction)?;
                if self.pins.has(PinRole::Speed) {
                    self.speed(self.speed)?;
                }
                Ok(())
            }
            Level::High => self.set_direction(Direction::None),
        }
    }

    fn write_digital(&mut self, role: PinRole, level: Level) -> Result<(), MotorError<W::Error>> {
        // Unset pins go out as the empty identifier; the adaptor decides.
        let pin = self.pins.get(role).unwrap_or("");
        debug!(motor = %self.name, %role, pin, %level, "digital write");
        self.connection
            .digital_write(pin, level)
            .map_err(|source| MotorError::PinWrite {
                pin: pin.to_string(),
                source,
            })
    }

    fn write_pwm(&mut self, role: PinRole, value: u8) -> Result<(), MotorError<W::Error>> {
        let pin = self.pins.get(role).unwrap_or("");
        debug!(motor = %self.name, %role, pin, value, "pwm write");
        self.connection
            .pwm_write(pin, value)
            .map_err(|source| MotorError::PinWrite {
                pin: pin.to_string(),
                source,
            })
    }
}

impl<W: PinWriter> Driver for MotorDriver<W> {
    type Connection = W;
    type Error = MotorError<W::Error>;

    fn name(&self) -> &str {
        &self.name
    }

    fn connection(&self) -> &W {
        &self.connection
    }

    fn start(&mut self) -> Result<(), Self::Error> {
        debug!(motor = %self.name, "start");
        Ok(())
    }

    fn halt(&mut self) -> Result<(), Self::Error> {
        debug!(motor = %self.name, "halt");
        Ok(())
    }
}

impl<W> fmt::Debug for MotorDriver<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotorDriver")
            .field("name", &self.name)
            .field("pins", &self.pins)
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("speed", &self.speed)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}
