use embedded_hal::digital::PinState;
use embedded_hal::i2c::{ErrorKind, I2c};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use mcp23017::{Address, GpioPins, Mcp23017, Mcp23017Error};

#[test]
fn init_restores_power_on_state() {
    let expectations = [
        I2cTransaction::write(0x20, vec![0x00, 0xFF, 0xFF]),
        I2cTransaction::write(0x20, vec![0x02, 0x00, 0x00]),
        I2cTransaction::write(0x20, vec![0x14, 0x00, 0x00]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut mcp = Mcp23017::new(&mut i2c, Address::default());
    assert!(mcp.init().is_ok());

    i2c.done();
}

#[test]
fn read_inputs_of_both_banks() {
    let expectations = [
        I2cTransaction::write_read(0x20, vec![0x12], vec![0b1100_0011, 0b0000_0001]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut mcp = Mcp23017::new(&mut i2c, Address::from(0x20));

    //bank A is the low byte
    let result = mcp.read_inputs();
    assert!(result.is_ok());
    assert_eq!(result.unwrap().as_u16(), 0b0000_0001_1100_0011);

    i2c.done();
}

#[test]
fn write_outputs_of_both_banks() {
    let expectations = [
        I2cTransaction::write(0x27, vec![0x14, 0b0011_0011, 0b1000_0000]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut mcp = Mcp23017::new(&mut i2c, Address::from(0x27));

    let result = mcp.write_outputs(GpioPins::from_banks(0b0011_0011, 0b1000_0000));
    assert!(result.is_ok());

    i2c.done();
}

#[test]
fn set_output_pin_touches_only_its_bank() {
    let expectations = [
        // pin 3 is GPA3
        I2cTransaction::write_read(0x20, vec![0x14], vec![0b0000_0001]),
        I2cTransaction::write(0x20, vec![0x14, 0b0000_1001]),
        // pin 11 is GPB3
        I2cTransaction::write_read(0x20, vec![0x15], vec![0b1111_1111]),
        I2cTransaction::write(0x20, vec![0x15, 0b1111_0111]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut mcp = Mcp23017::new(&mut i2c, Address::default());
    assert!(mcp.set_output_pin(3, true).is_ok());
    assert!(mcp.set_output_pin(11, false).is_ok());

    i2c.done();
}

#[test]
fn set_pin_mode_output() {
    let expectations = [
        I2cTransaction::write_read(0x20, vec![0x01], vec![0xFF]),
        I2cTransaction::write(0x20, vec![0x01, 0b1111_1011]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut mcp = Mcp23017::new(&mut i2c, Address::default());
    assert!(mcp.set_pin_mode(10, false).is_ok());

    i2c.done();
}

#[test]
fn toggle_output_pin() {
    let expectations = [
        I2cTransaction::write_read(0x20, vec![0x14], vec![0b1000_0000]),
        I2cTransaction::write(0x20, vec![0x14, 0b0000_0000]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut mcp = Mcp23017::new(&mut i2c, Address::default());
    assert!(mcp.toggle_output_pin(7).is_ok());

    i2c.done();
}

#[test]
fn read_input_pin() {
    let expectations = [
        I2cTransaction::write_read(0x20, vec![0x13], vec![0b0100_0000]),
        I2cTransaction::write_read(0x20, vec![0x13], vec![0b0100_0000]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut mcp = Mcp23017::new(&mut i2c, Address::default());
    assert!(mcp.read_input_pin(14).unwrap());
    assert!(!mcp.read_input_pin(15).unwrap());

    i2c.done();
}

#[test]
fn invalid_pin_does_not_touch_the_bus() {
    let mut i2c = I2cMock::new(&[]);

    let mut mcp = Mcp23017::new(&mut i2c, Address::default());
    assert!(matches!(mcp.set_output_pin(16, true), Err(Mcp23017Error::InvalidPin)));
    assert!(matches!(mcp.set_pin_mode(20, false), Err(Mcp23017Error::InvalidPin)));
    assert!(matches!(mcp.read_input_pin(255), Err(Mcp23017Error::InvalidPin)));

    i2c.done();
}

#[test]
fn bus_error_is_reported() {
    let expectations = [
        I2cTransaction::write_read(0x20, vec![0x14], vec![0x00]).with_error(ErrorKind::Other),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut mcp = Mcp23017::new(&mut i2c, Address::default());
    assert!(matches!(
        mcp.set_output_pin(0, true),
        Err(Mcp23017Error::I2c(ErrorKind::Other))
    ));

    i2c.done();
}

#[test]
fn set_addr_from_strap_pins() {
    let expectations = [
        I2cTransaction::write_read(0x25, vec![0x14], vec![0x00, 0x00]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut mcp = Mcp23017::new(
        &mut i2c,
        Address::from_pin_states(PinState::High, PinState::Low, PinState::High),
    );
    assert_eq!(mcp.read_outputs().unwrap(), GpioPins::new());

    i2c.done();
}

#[test]
fn configure_polarity_of_both_banks() {
    let expectations = [
        I2cTransaction::write(0x20, vec![0x02, 0b0000_0001, 0b1000_0000]),
        I2cTransaction::write_read(0x20, vec![0x02], vec![0b0000_0001, 0b1000_0000]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut mcp = Mcp23017::new(&mut i2c, Address::default());
    assert!(mcp.set_polarity_inversion(GpioPins::from_u16(0x8001)).is_ok());
    assert_eq!(mcp.get_polarity_inversion().unwrap().as_u16(), 0x8001);

    i2c.done();
}

#[test]
fn configure_pull_ups() {
    let expectations = [
        I2cTransaction::write(0x20, vec![0x0C, 0xFF, 0x00]),
        // pin 9 is GPB1
        I2cTransaction::write_read(0x20, vec![0x0D], vec![0b0000_0000]),
        I2cTransaction::write(0x20, vec![0x0D, 0b0000_0010]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut mcp = Mcp23017::new(&mut i2c, Address::default());
    assert!(mcp.set_pull_ups(GpioPins::from_banks(0xFF, 0x00)).is_ok());
    assert!(mcp.set_pull_up(9, true).is_ok());
    assert!(matches!(mcp.set_pull_up(16, true), Err(Mcp23017Error::InvalidPin)));

    i2c.done();
}

#[test]
fn release_returns_the_bus() {
    let expectations = [
        I2cTransaction::write(0x20, vec![0x14, 0x01, 0x00]),
        I2cTransaction::write(0x20, vec![0x14, 0x00, 0x00]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut mcp = Mcp23017::new(i2c.clone(), Address::default());
    assert!(mcp.write_outputs(GpioPins::from_u16(0x0001)).is_ok());

    //the released bus keeps talking to the same chip
    let mut bus = mcp.release();
    assert!(bus.write(0x20, &[0x14, 0x00, 0x00]).is_ok());

    i2c.done();
}
