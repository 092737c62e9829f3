use pindrive_core::PinWriter;
use pindrive_gpio::{Direction, MotorDriver, MotorError, ParseDirectionError};
use std::{fmt, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::info;

/// One motor verb, as written in the run sequence (`"forward 200"`,
/// `"speed=40"`, `"toggle"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    On,
    Off,
    Toggle,
    Min,
    Max,
    Speed(u8),
    Forward(u8),
    Backward(u8),
    Direction(Direction),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(String),
    #[error("`{0}` takes no argument")]
    UnexpectedArgument(String),
    #[error("invalid speed `{0}` (expected 0-255)")]
    InvalidSpeed(String),
    #[error(transparent)]
    Direction(#[from] ParseDirectionError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('=', " ");
        let mut parts = normalized.split_whitespace();
        let verb = parts.next().ok_or(ParseCommandError::Empty)?.to_ascii_lowercase();
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(ParseCommandError::UnexpectedArgument(s.trim().to_string()));
        }

        let speed = |arg: Option<&str>| -> Result<u8, ParseCommandError> {
            let arg = arg.ok_or_else(|| ParseCommandError::MissingArgument(verb.clone()))?;
            arg.parse()
                .map_err(|_| ParseCommandError::InvalidSpeed(arg.to_string()))
        };

        let command = match verb.as_str() {
            "speed" => Command::Speed(speed(arg)?),
            "forward" => Command::Forward(speed(arg)?),
            "backward" => Command::Backward(speed(arg)?),
            "direction" => {
                let arg = arg.ok_or_else(|| ParseCommandError::MissingArgument(verb.clone()))?;
                Command::Direction(arg.parse()?)
            }
            "on" | "off" | "toggle" | "min" | "max" if arg.is_some() => {
                return Err(ParseCommandError::UnexpectedArgument(verb.clone()));
            }
            "on" => Command::On,
            "off" => Command::Off,
            "toggle" => Command::Toggle,
            "min" => Command::Min,
            "max" => Command::Max,
            _ => return Err(ParseCommandError::Unknown(verb.clone())),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::On => write!(f, "on"),
            Command::Off => write!(f, "off"),
            Command::Toggle => write!(f, "toggle"),
            Command::Min => write!(f, "min"),
            Command::Max => write!(f, "max"),
            Command::Speed(v) => write!(f, "speed {}", v),
            Command::Forward(v) => write!(f, "forward {}", v),
            Command::Backward(v) => write!(f, "backward {}", v),
            Command::Direction(d) => write!(f, "direction {}", d),
        }
    }
}

impl Command {
    pub fn apply<W: PinWriter>(&self, motor: &mut MotorDriver<W>) -> Result<(), MotorError<W::Error>> {
        match *self {
            Command::On => motor.on(),
            Command::Off => motor.off(),
            Command::Toggle => motor.toggle(),
            Command::Min => motor.min(),
            Command::Max => motor.max(),
            Command::Speed(v) => motor.speed(v),
            Command::Forward(v) => motor.forward(v),
            Command::Backward(v) => motor.backward(v),
            Command::Direction(d) => motor.set_direction(d),
        }
    }
}

/// Parse every entry, naming the first bad one.
pub fn parse_sequence(entries: &[String]) -> anyhow::Result<Vec<Command>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry
                .parse::<Command>()
                .map_err(|e| anyhow::anyhow!("sequence entry {} (`{}`): {}", i, entry, e))
        })
        .collect()
}

/// Apply `commands` one per `step`, stopping at the first failure.
pub async fn run<W: PinWriter>(
    motor: &mut MotorDriver<W>,
    commands: &[Command],
    step: Duration,
) -> Result<(), MotorError<W::Error>> {
    let mut tick = tokio::time::interval(step.max(Duration::from_millis(1)));
    for (i, command) in commands.iter().enumerate() {
        tick.tick().await;
        info!(step = i, %command, "applying command");
        command.apply(motor)?;
        info!(
            on = motor.is_on(),
            mode = ?motor.mode(),
            speed = motor.current_speed(),
            direction = %motor.current_direction(),
            "motor status"
        );
    }
    Ok(())
}
