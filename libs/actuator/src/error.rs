use core::fmt::Debug;

use thiserror::Error;

/// Why the shared expander driver could not be used
#[derive(Debug, Error)]
pub enum DriverFault<E: Debug> {
    /// The bus transaction with the expander failed
    #[error("bus transaction failed: {0:?}")]
    Bus(E),

    /// A previous holder of the expander lock panicked mid-transaction
    #[error("expander lock poisoned")]
    Poisoned,
}

/// Errors reported by a [`crate::Lamp`]
#[derive(Debug, Error)]
pub enum LampError<E: Debug> {
    /// Pin identifier outside the expander's addressable range
    #[error("pin {pin} is not addressable on a {pin_count}-pin expander")]
    InvalidPin { pin: u8, pin_count: u8 },

    #[error("expander driver unavailable: {0}")]
    DriverUnavailable(DriverFault<E>),
}

impl<E: Debug> From<DriverFault<E>> for LampError<E> {
    fn from(fault: DriverFault<E>) -> Self {
        LampError::DriverUnavailable(fault)
    }
}
