//! Wiring description of a motor.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The job a pin does in the motor's wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinRole {
    /// PWM speed pin, doubling as the on/off pin for simple switch wiring.
    Speed,
    /// Dedicated on/off switch pin.
    Switch,
    /// Single direction pin (high = forward).
    Direction,
    /// H-bridge forward input.
    Forward,
    /// H-bridge backward input.
    Backward,
}

impl PinRole {
    /// All roles, in wiring-description order.
    pub const ALL: [PinRole; 5] = [
        PinRole::Speed,
        PinRole::Switch,
        PinRole::Direction,
        PinRole::Forward,
        PinRole::Backward,
    ];
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PinRole::Speed => "speed",
            PinRole::Switch => "switch",
            PinRole::Direction => "direction",
            PinRole::Forward => "forward",
            PinRole::Backward => "backward",
        };
        f.write_str(name)
    }
}

/// Pin assignments of a motor. Unset pins are `None`.
///
/// Which pins are present selects the wiring the driver assumes:
/// * a `direction` pin: one pin carries the direction,
/// * otherwise `forward`/`backward`: H-bridge style, two complementary inputs,
/// * no `forward` pin at all: the `speed` pin is a plain on/off switch in
///   digital mode.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotorPins {
    /// PWM speed pin.
    pub speed: Option<String>,
    /// On/off switch pin. Carried for wiring descriptions; the driver never writes it.
    pub switch: Option<String>,
    /// Single direction pin.
    pub direction: Option<String>,
    /// H-bridge forward input.
    pub forward: Option<String>,
    /// H-bridge backward input.
    pub backward: Option<String>,
}

impl MotorPins {
    /// A pin set with nothing assigned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the speed pin.
    pub fn with_speed(mut self, pin: impl Into<String>) -> Self {
        self.speed = Some(pin.into());
        self
    }

    /// Assign the switch pin.
    pub fn with_switch(mut self, pin: impl Into<String>) -> Self {
        self.switch = Some(pin.into());
        self
    }

    /// Assign the single direction pin.
    pub fn with_direction(mut self, pin: impl Into<String>) -> Self {
        self.direction = Some(pin.into());
        self
    }

    /// Assign both H-bridge inputs.
    pub fn with_bridge(mut self, forward: impl Into<String>, backward: impl Into<String>) -> Self {
        self.forward = Some(forward.into());
        self.backward = Some(backward.into());
        self
    }

    /// Pin assigned to `role`, if any.
    pub fn get(&self, role: PinRole) -> Option<&str> {
        let pin = match role {
            PinRole::Speed => &self.speed,
            PinRole::Switch => &self.switch,
            PinRole::Direction => &self.direction,
            PinRole::Forward => &self.forward,
            PinRole::Backward => &self.backward,
        };
        pin.as_deref()
    }

    /// Returns `true` if `role` has a pin assigned.
    pub fn has(&self, role: PinRole) -> bool {
        self.get(role).is_some()
    }

    /// Every assigned pin with its role.
    pub fn assigned(&self) -> impl Iterator<Item = (PinRole, &str)> {
        PinRole::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|pin| (role, pin)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_assigns_roles() {
        let pins = MotorPins::new()
            .with_speed("3")
            .with_switch("4")
            .with_bridge("11", "12");
        assert_eq!(pins.get(PinRole::Speed), Some("3"));
        assert_eq!(pins.get(PinRole::Switch), Some("4"));
        assert_eq!(pins.get(PinRole::Forward), Some("11"));
        assert_eq!(pins.get(PinRole::Backward), Some("12"));
        assert!(!pins.has(PinRole::Direction));
        assert!(pins.has(PinRole::Switch));
    }

    #[test]
    fn test_assigned_pins() {
        let pins = MotorPins::new().with_direction("5").with_speed("3");
        let assigned: Vec<_> = pins.assigned().collect();
        assert_eq!(assigned, vec![(PinRole::Speed, "3"), (PinRole::Direction, "5")]);
        assert_eq!(MotorPins::new().assigned().count(), 0);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(PinRole::Backward.to_string(), "backward");
        assert_eq!(PinRole::Speed.to_string(), "speed");
    }
}
