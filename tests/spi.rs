use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use uf_bmp280::{Bmp280, Bus, Config, Mode, SpiBus, DEVICE_ID};

fn read(addr: u8, data: Vec<u8>) -> Vec<SpiTransaction<u8>> {
    vec![
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![addr | 0x80]),
        SpiTransaction::read_vec(data),
        SpiTransaction::transaction_end(),
    ]
}

fn write(addr: u8, value: u8) -> Vec<SpiTransaction<u8>> {
    vec![
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![addr & 0x7F, value]),
        SpiTransaction::transaction_end(),
    ]
}

#[test]
fn test_spi_read_sets_read_bit() {
    let expectations = read(0xD0, vec![DEVICE_ID]);

    let mut spi = SpiMock::new(&expectations);
    let mut bmp = Bmp280::initialize(SpiBus::new(spi.clone()), &Config::new()).unwrap();

    assert_eq!(bmp.get_id().unwrap().chip_id, DEVICE_ID);
    spi.done();
}

#[test]
fn test_spi_write_clears_read_bit() {
    let mut expectations = read(0xF4, vec![0x24]);
    expectations.extend(write(0xF4, 0x27));

    let mut spi = SpiMock::new(&expectations);
    let mut bmp = Bmp280::initialize(SpiBus::new(spi.clone()), &Config::new()).unwrap();

    bmp.write_mode(Mode::Normal).unwrap();
    spi.done();
}

#[test]
fn test_spi_burst_read() {
    let expectations = read(0xFA, vec![0x7E, 0xED, 0x00]);

    let mut spi = SpiMock::new(&expectations);
    let mut bmp = Bmp280::initialize(SpiBus::new(spi.clone()), &Config::new()).unwrap();

    assert_eq!(bmp.read_temp_adc().unwrap(), 519888);
    spi.done();
}

#[test]
fn test_spi_multi_byte_write_is_one_frame() {
    let expectations = [
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0x74, 0x27, 0x75, 0xA0]),
        SpiTransaction::transaction_end(),
    ];

    let mut spi = SpiMock::new(&expectations);
    let mut bus = SpiBus::new(spi.clone());

    bus.write(0xF4, &[0x27, 0xA0]).unwrap();
    spi.done();
}

#[test]
fn test_spi_long_write_is_split_into_frames() {
    let data: Vec<u8> = (0..10).collect();
    let first: Vec<u8> = (0..8u8).flat_map(|i| [0x08 + i, i]).collect();
    let second: Vec<u8> = (8..10u8).flat_map(|i| [0x08 + i, i]).collect();
    let expectations = [
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(first),
        SpiTransaction::transaction_end(),
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(second),
        SpiTransaction::transaction_end(),
    ];

    let mut spi = SpiMock::new(&expectations);
    let mut bus = SpiBus::new(spi.clone());

    bus.write(0x88, &data).unwrap();
    spi.done();
}
