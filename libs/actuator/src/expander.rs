use core::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard};

use embedded_hal::i2c::I2c;
use mcp23017::{Mcp23017, Mcp23017Error};

use crate::{DriverFault, Lamp, LampError};

/// Pin-level capability a lamp needs from a GPIO expander driver
pub trait GpioExpander {
    type Error: Debug;

    /// Number of addressable pins, valid identifiers are `0..PIN_COUNT`
    const PIN_COUNT: u8;

    /// Configure a pin as a push-pull output
    fn pin_into_output(&mut self, pin: u8) -> Result<(), Self::Error>;

    /// Drive an output pin high (`true`) or low (`false`)
    fn pin_set_level(&mut self, pin: u8, high: bool) -> Result<(), Self::Error>;
}

impl<I2C: I2c> GpioExpander for Mcp23017<I2C> {
    type Error = Mcp23017Error<I2C::Error>;

    const PIN_COUNT: u8 = mcp23017::PIN_COUNT;

    fn pin_into_output(&mut self, pin: u8) -> Result<(), Self::Error> {
        self.set_pin_mode(pin, false)
    }

    fn pin_set_level(&mut self, pin: u8, high: bool) -> Result<(), Self::Error> {
        self.set_output_pin(pin, high)
    }
}

/// Handle to one expander driver shared by every lamp wired to it
///
/// Cloning the handle never duplicates the driver: all clones reach the same
/// device, and each bus transaction sequence runs under the device lock.
pub struct SharedExpander<E> {
    device: Arc<Mutex<E>>,
}

impl<E> Clone for SharedExpander<E> {
    fn clone(&self) -> Self {
        Self {
            device: Arc::clone(&self.device),
        }
    }
}

impl<E: GpioExpander> SharedExpander<E> {
    pub fn new(device: E) -> SharedExpander<E> {
        SharedExpander {
            device: Arc::new(Mutex::new(device)),
        }
    }

    /// Wire a lamp to one of the expander pins
    pub fn lamp(&self, pin: u8) -> Result<Lamp<E>, LampError<E::Error>> {
        Lamp::new(pin, self)
    }

    /// Exclusive access to the driver, released when the guard is dropped
    pub fn lock(&self) -> Result<MutexGuard<'_, E>, DriverFault<E::Error>> {
        self.device.lock().map_err(|_| DriverFault::Poisoned)
    }

    /// True if both handles reach the same driver instance
    pub fn same_device(&self, other: &SharedExpander<E>) -> bool {
        Arc::ptr_eq(&self.device, &other.device)
    }

    /// Run a sequence of driver calls as one critical section
    pub(crate) fn transaction<T>(
        &self,
        f: impl FnOnce(&mut E) -> Result<T, E::Error>,
    ) -> Result<T, DriverFault<E::Error>> {
        let mut device = self.lock()?;
        f(&mut *device).map_err(DriverFault::Bus)
    }
}
