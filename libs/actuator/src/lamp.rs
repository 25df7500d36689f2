use crate::{GpioExpander, LampError, SharedExpander};

/// On/off lamp driven by one pin of a shared GPIO expander
///
/// `state` caches the last level the expander accepted for this pin, it is never
/// read back from hardware.
pub struct Lamp<E> {
    pin: u8,
    expander: SharedExpander<E>,
    state: bool,
}

impl<E: GpioExpander> Lamp<E> {
    /// Bind a lamp to `pin` and force it off
    ///
    /// The pin is driven low and configured as an output before this returns.
    pub fn new(pin: u8, expander: &SharedExpander<E>) -> Result<Self, LampError<E::Error>> {
        if pin >= E::PIN_COUNT {
            log::error!(
                "Lamp pin {} out of range (expander has {} pins)",
                pin,
                E::PIN_COUNT
            );
            return Err(LampError::InvalidPin {
                pin,
                pin_count: E::PIN_COUNT,
            });
        }

        let mut lamp = Self {
            pin,
            expander: expander.clone(),
            state: false,
        };
        lamp.init()?;
        log::info!("Lamp wired on expander pin {}", pin);
        Ok(lamp)
    }

    fn init(&mut self) -> Result<(), LampError<E::Error>> {
        let pin = self.pin;
        // Latch low before switching direction so the pin never drives a stale level
        self.expander
            .transaction(|device| {
                device.pin_set_level(pin, false)?;
                device.pin_into_output(pin)
            })
            .map_err(|e| {
                log::error!("Failed to set pin {} as output: {}", pin, e);
                LampError::from(e)
            })?;
        self.state = false;
        Ok(())
    }

    /// Drive the pin high and remember the lamp as lit
    pub fn on(&mut self) -> Result<(), LampError<E::Error>> {
        self.write(true)
    }

    /// Drive the pin low and remember the lamp as dark
    pub fn off(&mut self) -> Result<(), LampError<E::Error>> {
        self.write(false)
    }

    /// Flip the lamp based on the cached state
    pub fn toggle(&mut self) -> Result<(), LampError<E::Error>> {
        self.write(!self.state)
    }

    pub fn is_on(&self) -> bool {
        self.state
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    fn write(&mut self, on: bool) -> Result<(), LampError<E::Error>> {
        let pin = self.pin;
        let level = if on { "on" } else { "off" };
        self.expander
            .transaction(|device| device.pin_set_level(pin, on))
            .map_err(|e| {
                log::error!("Failed to switch lamp on pin {} {}: {}", pin, level, e);
                LampError::from(e)
            })?;

        if self.state != on {
            log::debug!("Lamp on pin {} switched {}", pin, level);
        }
        self.state = on;
        Ok(())
    }
}
