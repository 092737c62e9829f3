mod board;    // simulated pin bank the demo motor is wired to
mod config;   // settings loaded from `config/default.toml` + env
mod sequence; // text commands and the timed runner

use anyhow::Context;
use board::SimulatedBoard;
use pindrive_core::{Adaptor, Driver};
use pindrive_gpio::MotorDriver;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let settings = config::load_config().context("failed to load configuration")?;
    let commands = sequence::parse_sequence(&settings.run.sequence)?;
    info!(
        motor = %settings.motor.name,
        commands = commands.len(),
        step_ms = settings.run.step_ms,
        "pindrive demo started"
    );

    let exported: Vec<String> = settings
        .motor
        .pins
        .assigned()
        .map(|(_, pin)| pin.to_string())
        .collect();
    let mut board = SimulatedBoard::new("simulated-board").with_exported(exported);
    board.connect()?;

    let mut motor = MotorDriver::new(board.clone(), settings.motor.name, settings.motor.pins);
    motor.start()?;

    let step = Duration::from_millis(settings.run.step_ms);
    let outcome = sequence::run(&mut motor, &commands, step).await;
    if let Err(e) = &outcome {
        error!("Sequence aborted: {:?}", e);
    }

    motor.halt()?;
    info!(
        motor = motor.name(),
        on = motor.is_on(),
        mode = ?motor.mode(),
        speed = motor.current_speed(),
        direction = %motor.current_direction(),
        "final motor status"
    );
    for (pin, output) in &board.snapshot().outputs {
        info!(pin = %pin, ?output, "final pin output");
    }

    board.finalize()?;
    outcome.context("motor command failed")
}
