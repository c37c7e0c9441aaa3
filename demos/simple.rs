use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use uf_bmp280::{Bmp280, Config, I2cBus, Oversampling, Register, I2C_ADDRESS_PRIMARY};

const ADDR: u8 = I2C_ADDRESS_PRIMARY;

fn main() {
    let trim = vec![
        0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, 0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B, 0x8C,
        0x00, 0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17,
    ];
    let expectations = [
        I2cTransaction::write_read(ADDR, vec![Register::CTRL_MEAS.addr()], vec![0x00]),
        I2cTransaction::write(ADDR, vec![Register::CTRL_MEAS.addr(), 0x24]),
        I2cTransaction::write_read(ADDR, vec![Register::CALIB00.addr()], trim),
        I2cTransaction::write_read(ADDR, vec![Register::CTRL_MEAS.addr()], vec![0x24]),
        I2cTransaction::write(ADDR, vec![Register::CTRL_MEAS.addr(), 0x25]),
        I2cTransaction::write_read(ADDR, vec![Register::CTRL_MEAS.addr()], vec![0x25]),
        I2cTransaction::write_read(ADDR, vec![Register::CTRL_MEAS.addr()], vec![0x24]),
        I2cTransaction::write_read(ADDR, vec![Register::TEMP_MSB.addr()], vec![0x7E, 0xED, 0x00]),
        I2cTransaction::write_read(ADDR, vec![Register::PRESS_MSB.addr()], vec![0x65, 0x5A, 0xC0]),
    ];

    let mut i2c = I2cMock::new(&expectations);
    let config = Config::new()
        .with_temp_oversampling(Oversampling::X1)
        .with_pres_oversampling(Oversampling::X1)
        .with_poll_limit(100);
    let mut bmp = Bmp280::initialize(I2cBus::new(i2c.clone(), ADDR), &config).unwrap();
    bmp.configure().unwrap();
    let mut bmp = bmp.calibrate().unwrap();
    let measurement = bmp.acquire().unwrap();
    i2c.done();
    println!(
        "Done: {:.2} °C, {:.2} Pa",
        measurement.temperature, measurement.pressure
    );
}
