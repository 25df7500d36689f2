use log::LevelFilter;
use mcp23017::{Address, Mcp23017};
use simple_logger::SimpleLogger;

pub mod bus;

pub use bus::{FakeI2c, FakeI2cError};

/// Address of the lamp GPIO expander (A0, A1, A2 strapped low)
pub const GPIO_EXPANDER_ADDRESS: u8 = 0b010_0000;

// GPIO expander type
pub type GpioExpander = Mcp23017<FakeI2c>;

// Board specific implementations
pub struct BoardOpenX {
    pub gpio_expander: Option<GpioExpander>,
}

impl BoardOpenX {
    pub fn new() -> Self {
        init_logging();

        let i2c = FakeI2c::new(GPIO_EXPANDER_ADDRESS);
        log::info!("Simulated MCP23017 at 0x{:02X}", GPIO_EXPANDER_ADDRESS);

        Self {
            gpio_expander: Some(Mcp23017::new(i2c, Address::from(GPIO_EXPANDER_ADDRESS))),
        }
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
