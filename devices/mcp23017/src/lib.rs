#![no_std]

use bitfield::bitfield;
use embedded_hal::digital::PinState;
use embedded_hal::i2c::I2c;

/// Number of GPIO pins on the expander (two 8-bit banks)
pub const PIN_COUNT: u8 = 16;

/// MCP23017 I2C GPIO expander driver
///
/// The MCP23017 is a 16-bit I2C GPIO expander split in two 8-bit banks (A and B).
/// Pins 0-7 map to GPA0-GPA7 and pins 8-15 to GPB0-GPB7.
/// The driver assumes the power-on register layout (IOCON.BANK = 0), where the
/// A and B registers of a pair are adjacent and can be accessed in a single
/// sequential transaction.
pub struct Mcp23017<I2C> {
    i2c: I2C,
    address: u8,
}

/// I2C device address
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Address(u8);

impl From<u8> for Address {
    fn from(a: u8) -> Self {
        Address(a)
    }
}

impl Default for Address {
    fn default() -> Self {
        Address(0b010_0000)
    }
}

impl Address {
    /// Build the address from the levels of the A0, A1 and A2 strap pins
    pub fn from_pin_states(a0: PinState, a1: PinState, a2: PinState) -> Self {
        let bit = |state: PinState, shift: u8| ((state == PinState::High) as u8) << shift;
        Address(0b010_0000 | bit(a2, 2) | bit(a1, 1) | bit(a0, 0))
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

/// One of the two 8-bit ports of the expander
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Bank {
    /// Pins 0-7
    A = 0,
    /// Pins 8-15
    B = 1,
}

impl Bank {
    /// Bank of a pin, `None` if the pin does not exist
    pub fn of(pin: u8) -> Option<Bank> {
        match pin / 8 {
            0 => Some(Bank::A),
            1 => Some(Bank::B),
            _ => None,
        }
    }
}

/// MCP23017 register addresses (bank A side, the bank B register follows)
#[derive(Debug, Clone, Copy)]
#[repr(u8)]
pub enum Register {
    /// I/O direction register - 1 = input, 0 = output
    Iodir = 0x00,
    /// Input polarity register - invert the polarity of input pins
    Ipol = 0x02,
    /// Pull-up register - enable the 100k pull-up of input pins
    Gppu = 0x0C,
    /// Port register - read the state of GPIO pins
    Gpio = 0x12,
    /// Output latch register - set the state of GPIO pins configured as outputs
    Olat = 0x14,
}

impl Register {
    /// Register address for the given bank
    pub fn addr(self, bank: Bank) -> u8 {
        self as u8 + bank as u8
    }
}

bitfield! {
    /// GPIO pin state bitfield, bank A in the low byte
    #[derive(Clone, Copy, PartialEq)]
    pub struct GpioPins(u16);
    impl Debug;

    pub a0, set_a0: 0;
    pub a1, set_a1: 1;
    pub a2, set_a2: 2;
    pub a3, set_a3: 3;
    pub a4, set_a4: 4;
    pub a5, set_a5: 5;
    pub a6, set_a6: 6;
    pub a7, set_a7: 7;
    pub b0, set_b0: 8;
    pub b1, set_b1: 9;
    pub b2, set_b2: 10;
    pub b3, set_b3: 11;
    pub b4, set_b4: 12;
    pub b5, set_b5: 13;
    pub b6, set_b6: 14;
    pub b7, set_b7: 15;
}

impl GpioPins {
    /// Create a new GpioPins with all pins set to 0
    pub fn new() -> Self {
        GpioPins(0)
    }

    pub fn from_u16(value: u16) -> Self {
        GpioPins(value)
    }

    /// Combine the two bank bytes
    pub fn from_banks(a: u8, b: u8) -> Self {
        GpioPins(u16::from_le_bytes([a, b]))
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Raw byte of one bank
    pub fn bank(&self, bank: Bank) -> u8 {
        self.0.to_le_bytes()[bank as usize]
    }

    /// Set a specific pin, indices above 15 are ignored
    pub fn set_pin(&mut self, pin: u8, value: bool) {
        if pin < PIN_COUNT {
            if value {
                self.0 |= 1 << pin;
            } else {
                self.0 &= !(1 << pin);
            }
        }
    }

    /// Get a specific pin, indices above 15 read as low
    pub fn get_pin(&self, pin: u8) -> bool {
        if pin < PIN_COUNT {
            (self.0 & (1 << pin)) != 0
        } else {
            false
        }
    }
}

impl Default for GpioPins {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub enum Mcp23017Error<E> {
    /// I2C communication error
    I2c(E),
    /// Invalid pin number (must be 0-15)
    InvalidPin,
}

impl<I2C, E> Mcp23017<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Create a new MCP23017 instance
    ///
    /// # Arguments
    /// * `i2c` - I2C peripheral
    /// * `address` - I2C address of the MCP23017 (0x20-0x27)
    pub fn new(i2c: I2C, address: Address) -> Self {
        Self {
            i2c,
            address: address.0,
        }
    }

    /// Initialize the MCP23017 with its power-on configuration
    /// All pins are configured as inputs with normal polarity, output latches low
    pub fn init(&mut self) -> Result<(), Mcp23017Error<E>> {
        self.write_pair(Register::Iodir, GpioPins::from_u16(0xFFFF))?;
        self.write_pair(Register::Ipol, GpioPins::new())?;
        self.write_pair(Register::Olat, GpioPins::new())?;
        Ok(())
    }

    /// Release the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read the port registers of both banks
    pub fn read_inputs(&mut self) -> Result<GpioPins, Mcp23017Error<E>> {
        self.read_pair(Register::Gpio)
    }

    /// Write the output latches of both banks
    pub fn write_outputs(&mut self, outputs: GpioPins) -> Result<(), Mcp23017Error<E>> {
        self.write_pair(Register::Olat, outputs)
    }

    /// Read the output latches of both banks
    pub fn read_outputs(&mut self) -> Result<GpioPins, Mcp23017Error<E>> {
        self.read_pair(Register::Olat)
    }

    /// Set the direction registers (1 = input, 0 = output)
    pub fn set_configuration(&mut self, config: GpioPins) -> Result<(), Mcp23017Error<E>> {
        self.write_pair(Register::Iodir, config)
    }

    pub fn get_configuration(&mut self) -> Result<GpioPins, Mcp23017Error<E>> {
        self.read_pair(Register::Iodir)
    }

    /// Set the polarity inversion registers (1 = inverted, 0 = normal)
    pub fn set_polarity_inversion(&mut self, inversion: GpioPins) -> Result<(), Mcp23017Error<E>> {
        self.write_pair(Register::Ipol, inversion)
    }

    pub fn get_polarity_inversion(&mut self) -> Result<GpioPins, Mcp23017Error<E>> {
        self.read_pair(Register::Ipol)
    }

    /// Enable (1) or disable (0) the input pull-ups
    pub fn set_pull_ups(&mut self, pull_ups: GpioPins) -> Result<(), Mcp23017Error<E>> {
        self.write_pair(Register::Gppu, pull_ups)
    }

    /// Configure a specific pin as input or output
    pub fn set_pin_mode(&mut self, pin: u8, is_input: bool) -> Result<(), Mcp23017Error<E>> {
        self.modify_pin(Register::Iodir, pin, |_| is_input)
    }

    /// Set a specific output pin high or low
    pub fn set_output_pin(&mut self, pin: u8, value: bool) -> Result<(), Mcp23017Error<E>> {
        self.modify_pin(Register::Olat, pin, |_| value)
    }

    /// Toggle a specific output pin
    pub fn toggle_output_pin(&mut self, pin: u8) -> Result<(), Mcp23017Error<E>> {
        self.modify_pin(Register::Olat, pin, |current| !current)
    }

    /// Enable or disable the pull-up of a specific pin
    pub fn set_pull_up(&mut self, pin: u8, enabled: bool) -> Result<(), Mcp23017Error<E>> {
        self.modify_pin(Register::Gppu, pin, |_| enabled)
    }

    /// Read a specific input pin
    pub fn read_input_pin(&mut self, pin: u8) -> Result<bool, Mcp23017Error<E>> {
        let bank = Bank::of(pin).ok_or(Mcp23017Error::InvalidPin)?;
        let value = self.read_register(Register::Gpio.addr(bank))?;
        Ok(value & (1 << (pin % 8)) != 0)
    }

    /// Read-modify-write one bit, only the pin's bank register is accessed
    fn modify_pin(
        &mut self,
        register: Register,
        pin: u8,
        f: impl FnOnce(bool) -> bool,
    ) -> Result<(), Mcp23017Error<E>> {
        let bank = Bank::of(pin).ok_or(Mcp23017Error::InvalidPin)?;
        let addr = register.addr(bank);
        let mask = 1 << (pin % 8);

        let current = self.read_register(addr)?;
        let value = if f(current & mask != 0) {
            current | mask
        } else {
            current & !mask
        };
        self.write_register(addr, value)
    }

    /// Read both registers of an A/B pair
    fn read_pair(&mut self, register: Register) -> Result<GpioPins, Mcp23017Error<E>> {
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register.addr(Bank::A)], &mut buffer)
            .map_err(Mcp23017Error::I2c)?;
        Ok(GpioPins::from_banks(buffer[0], buffer[1]))
    }

    /// Write both registers of an A/B pair
    fn write_pair(&mut self, register: Register, pins: GpioPins) -> Result<(), Mcp23017Error<E>> {
        self.i2c
            .write(
                self.address,
                &[register.addr(Bank::A), pins.bank(Bank::A), pins.bank(Bank::B)],
            )
            .map_err(Mcp23017Error::I2c)
    }

    fn read_register(&mut self, addr: u8) -> Result<u8, Mcp23017Error<E>> {
        let mut buffer = [0u8; 1];
        self.i2c
            .write_read(self.address, &[addr], &mut buffer)
            .map_err(Mcp23017Error::I2c)?;
        Ok(buffer[0])
    }

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Mcp23017Error<E>> {
        self.i2c
            .write(self.address, &[addr, value])
            .map_err(Mcp23017Error::I2c)
    }
}
