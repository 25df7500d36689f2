use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use log::trace;

/// IODIRA..OLATB in the IOCON.BANK = 0 layout
const REGISTER_COUNT: usize = 0x16;

const IODIR: usize = 0x00;
const IPOL: usize = 0x02;
const GPIO: usize = 0x12;
const OLAT: usize = 0x14;

struct Registers {
    bytes: [u8; REGISTER_COUNT],
    /// Levels applied on the pins from outside, per bank
    external: [u8; 2],
    pointer: usize,
}

impl Registers {
    fn power_on() -> Self {
        let mut bytes = [0u8; REGISTER_COUNT];
        bytes[IODIR] = 0xFF;
        bytes[IODIR + 1] = 0xFF;
        Self {
            bytes,
            external: [0; 2],
            pointer: 0,
        }
    }

    fn read(&self, reg: usize) -> u8 {
        match reg {
            GPIO | 0x13 => {
                let bank = reg - GPIO;
                let inputs = self.bytes[IODIR + bank];
                let sensed = (self.external[bank] ^ self.bytes[IPOL + bank]) & inputs;
                sensed | (self.bytes[OLAT + bank] & !inputs)
            }
            _ => self.bytes[reg],
        }
    }

    fn write(&mut self, reg: usize, value: u8) {
        match reg {
            // Writing the port modifies the output latch
            GPIO | 0x13 => self.bytes[reg - GPIO + OLAT] = value,
            _ => self.bytes[reg] = value,
        }
    }

    fn advance(&mut self) {
        self.pointer = (self.pointer + 1) % REGISTER_COUNT;
    }
}

/// Simulated I2C bus with one MCP23017 attached
///
/// Clones share the same chip, so a clone kept aside can observe what the
/// driver wrote.
#[derive(Clone)]
pub struct FakeI2c {
    address: u8,
    registers: Arc<Mutex<Registers>>,
}

impl FakeI2c {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            registers: Arc::new(Mutex::new(Registers::power_on())),
        }
    }

    fn registers(&self) -> MutexGuard<'_, Registers> {
        self.registers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Output latches, bank A in the low byte
    pub fn output_latch(&self) -> u16 {
        let registers = self.registers();
        u16::from_le_bytes([registers.bytes[OLAT], registers.bytes[OLAT + 1]])
    }

    /// Direction registers (1 = input), bank A in the low byte
    pub fn direction(&self) -> u16 {
        let registers = self.registers();
        u16::from_le_bytes([registers.bytes[IODIR], registers.bytes[IODIR + 1]])
    }

    /// Drive the pins from outside, only visible on pins configured as inputs
    pub fn set_external_levels(&self, levels: u16) {
        self.registers().external = levels.to_le_bytes();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeI2cError {
    /// Nothing answers at this address
    NoAcknowledge(u8),
    /// Register pointer beyond OLATB
    InvalidRegister(u8),
}

impl std::fmt::Display for FakeI2cError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FakeI2cError::NoAcknowledge(addr) => write!(f, "no device at address 0x{:02X}", addr),
            FakeI2cError::InvalidRegister(reg) => write!(f, "invalid register 0x{:02X}", reg),
        }
    }
}

impl std::error::Error for FakeI2cError {}

impl embedded_hal::i2c::Error for FakeI2cError {
    fn kind(&self) -> ErrorKind {
        match self {
            FakeI2cError::NoAcknowledge(_) => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            FakeI2cError::InvalidRegister(_) => ErrorKind::Other,
        }
    }
}

impl ErrorType for FakeI2c {
    type Error = FakeI2cError;
}

impl I2c for FakeI2c {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(FakeI2cError::NoAcknowledge(address));
        }

        let mut registers = self.registers();
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    let Some((&reg, data)) = bytes.split_first() else {
                        continue;
                    };
                    if reg as usize >= REGISTER_COUNT {
                        return Err(FakeI2cError::InvalidRegister(reg));
                    }
                    registers.pointer = reg as usize;
                    for &value in data {
                        let reg = registers.pointer;
                        trace!("mcp23017@0x{:02X} reg 0x{:02X} <- 0b{:08b}", address, reg, value);
                        registers.write(reg, value);
                        registers.advance();
                    }
                }
                Operation::Read(buffer) => {
                    for value in buffer.iter_mut() {
                        *value = registers.read(registers.pointer);
                        registers.advance();
                    }
                }
            }
        }
        Ok(())
    }
}
