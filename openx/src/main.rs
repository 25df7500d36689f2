use std::{process::ExitCode, thread, time::Duration};

use actuator::{GpioExpander, Lamp, LampError, SharedExpander};

#[cfg(all(feature = "simulator", not(feature = "raspberry")))]
use board_simulator::BoardOpenX;

#[cfg(feature = "raspberry")]
use board_raspberry::BoardOpenX;

#[cfg(not(any(feature = "simulator", feature = "raspberry")))]
compile_error!("enable the `simulator` or the `raspberry` feature");

mod config;

fn main() -> ExitCode {
    let mut board = BoardOpenX::new();

    let Some(mut gpio_expander) = board.gpio_expander.take() else {
        log::error!("GPIO expander not available");
        return ExitCode::FAILURE;
    };
    if let Err(e) = gpio_expander.init() {
        log::error!("Failed to initialize GPIO expander: {:?}", e);
        return ExitCode::FAILURE;
    }
    let expander = SharedExpander::new(gpio_expander);

    let mut plant_lamp = match expander.lamp(config::PLANT_LAMP_PIN) {
        Ok(lamp) => lamp,
        Err(e) => {
            log::error!("Failed to wire plant lamp: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let hold = Duration::from_millis(config::BENCH_HOLD_MS);
    match bench_check(&mut plant_lamp, hold) {
        Ok(()) => {
            log::info!("Plant lamp bench check passed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Plant lamp bench check failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Light the lamp, hold it, switch it back off
fn bench_check<E: GpioExpander>(
    lamp: &mut Lamp<E>,
    hold: Duration,
) -> Result<(), LampError<E::Error>> {
    lamp.on()?;
    log::info!("Plant lamp on (pin {})", lamp.pin());
    thread::sleep(hold);

    lamp.off()?;
    log::info!("Plant lamp off (pin {})", lamp.pin());
    Ok(())
}
