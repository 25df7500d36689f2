use linux_embedded_hal::I2cdev;
use log::LevelFilter;
use mcp23017::{Address, Mcp23017};
use simple_logger::SimpleLogger;

/// I2C bus the expander hat is wired to
pub const I2C_BUS: &str = "/dev/i2c-1";

/// Address of the lamp GPIO expander (A0, A1, A2 strapped low)
pub const GPIO_EXPANDER_ADDRESS: u8 = 0b010_0000;

// GPIO expander type
pub type GpioExpander = Mcp23017<I2cdev>;

pub struct BoardOpenX {
    pub gpio_expander: Option<GpioExpander>,
}

impl BoardOpenX {
    pub fn new() -> Self {
        init_logging();

        // Initialize I2C bus of the GPIO expander
        let gpio_expander = match I2cdev::new(I2C_BUS) {
            Ok(i2c) => Some(Mcp23017::new(i2c, Address::from(GPIO_EXPANDER_ADDRESS))),
            Err(e) => {
                log::error!("Failed to open {}: {}", I2C_BUS, e);
                None
            }
        };

        Self { gpio_expander }
    }
}

/// Log to stdout, `RUST_LOG` overrides the default level
pub fn init_logging() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .ok();
}
