use color_eyre::{eyre::eyre, Result};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use quadpad::config::InputConfig;
use quadpad::pad::{Button, Gamepad, GilrsBackend, Slot};

fn main() -> Result<()> {
    setup()?;

    let config = InputConfig::ensure_default().unwrap_or_else(|e| {
        warn!("Falling back to default input config: {}", e);
        InputConfig::default()
    });

    let mut backend =
        GilrsBackend::new().map_err(|e| eyre!("Failed to start input backend: {}", e))?;
    let mut pad = Gamepad::new(Slot::One);

    info!(
        "Polling slot {:?} every {}ms (rumble {})",
        pad.slot(),
        config.poll_interval_ms,
        if config.rumble_enabled { "on" } else { "off" }
    );

    let mut was_connected = false;
    loop {
        let connected = pad.poll(&mut backend);

        if connected != was_connected {
            if connected {
                info!("Controller connected on slot {:?}", pad.slot());
            } else {
                info!("Controller disconnected from slot {:?}", pad.slot());
                pad.clear();
            }
            was_connected = connected;
        }

        if connected && pad.state_changed() {
            debug!(
                "sticks L=({:.3}, {:.3}) R=({:.3}, {:.3}) triggers L={:.3} R={:.3} buttons={:#06x}",
                pad.left_stick().x(),
                pad.left_stick().y(),
                pad.right_stick().x(),
                pad.right_stick().y(),
                pad.left_trigger(),
                pad.right_trigger(),
                pad.state().buttons
            );
        }

        for button in Button::ALL {
            if pad.was_button_pressed(button) {
                info!("Pressed {:?}", button);
            }
            if pad.was_button_released(button) {
                info!("Released {:?}", button);
            }
        }

        if config.rumble_enabled {
            if pad.was_button_pressed(Button::A) {
                pad.set_rumble(&mut backend, 1.0, 0.5);
            }
            if pad.was_button_released(Button::A) {
                pad.set_rumble(&mut backend, 0.0, 0.0);
            }
        }

        thread::sleep(Duration::from_millis(config.poll_interval_ms));
    }
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
