//! On/off actuators driven through the pins of a shared GPIO expander.
//!
//! An expander is wrapped once in a [`SharedExpander`]; every [`Lamp`] bound to it
//! holds a handle to that same driver and addresses its own pin.

mod error;
mod expander;
mod lamp;

pub use error::{DriverFault, LampError};
pub use expander::{GpioExpander, SharedExpander};
pub use lamp::Lamp;
