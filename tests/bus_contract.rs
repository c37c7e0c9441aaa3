use uf_bmp280::{Bmp280, Bus, BusError, Config, Error, Mode, Register, DEVICE_ID};

/// Register file standing in for a device. A forced trigger keeps reporting
/// forced mode for `busy_polls` reads of ctrl_meas before dropping to sleep.
struct FakeDevice {
    regs: [u8; 256],
    busy_polls: usize,
    remaining: usize,
    mode_reads: usize,
    adc_reads: usize,
    mode_reads_before_adc: Option<usize>,
}

impl FakeDevice {
    fn new(busy_polls: usize) -> Self {
        let mut regs = [0u8; 256];
        let trim = [
            0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, 0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B,
            0x8C, 0x00, 0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17,
        ];
        regs[0x88..0x88 + 24].copy_from_slice(&trim);
        regs[0xD0] = DEVICE_ID;
        regs[0xF4] = 0x24;
        regs[0xF7..0xFD].copy_from_slice(&[0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00]);

        Self {
            regs,
            busy_polls,
            remaining: 0,
            mode_reads: 0,
            adc_reads: 0,
            mode_reads_before_adc: None,
        }
    }
}

impl Bus for FakeDevice {
    type Error = ();

    fn initialize(&mut self) -> Result<(), BusError<()>> {
        Ok(())
    }

    fn deinitialize(&mut self) -> Result<(), BusError<()>> {
        Ok(())
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError<()>> {
        for (offset, value) in data.iter().enumerate() {
            let reg = address as usize + offset;
            self.regs[reg] = *value;
            if reg == 0xF4 && Mode::from_bits(*value) == Mode::Forced {
                self.remaining = self.busy_polls;
            }
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), BusError<()>> {
        if address == 0xF4 {
            self.mode_reads += 1;
            if self.remaining > 0 {
                self.remaining -= 1;
            } else {
                self.regs[0xF4] &= !0x03;
            }
        }
        if address == 0xFA || address == 0xF7 {
            self.adc_reads += 1;
            self.mode_reads_before_adc.get_or_insert(self.mode_reads);
        }
        let start = address as usize;
        buf.copy_from_slice(&self.regs[start..start + buf.len()]);
        Ok(())
    }
}

/// Provides reads only.
struct ReadOnly;

impl Bus for ReadOnly {
    type Error = ();

    fn initialize(&mut self) -> Result<(), BusError<()>> {
        Ok(())
    }

    fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), BusError<()>> {
        buf.fill(0);
        Ok(())
    }
}

/// Provides nothing at all.
struct Absent;

impl Bus for Absent {
    type Error = ();
}

/// Fails every transfer.
struct Broken;

impl Bus for Broken {
    type Error = u8;

    fn initialize(&mut self) -> Result<(), BusError<u8>> {
        Err(BusError::Transport(7))
    }
}

#[test]
fn test_poll_stops_after_device_reports_sleep() {
    for busy_polls in [0, 1, 4, 25] {
        let mut device = FakeDevice::new(busy_polls);
        let mut bmp = Bmp280::initialize(&mut device, &Config::new())
            .unwrap()
            .calibrate()
            .unwrap();

        let temp = bmp.acquire_temperature().unwrap();
        assert!((temp - 25.08).abs() < 0.001);
        drop(bmp);

        // one read-modify-write read before the trigger, then N busy reads and
        // the read that reports sleep
        assert_eq!(device.mode_reads_before_adc, Some(1 + busy_polls + 1));
        assert_eq!(device.mode_reads, 1 + busy_polls + 1);
        assert_eq!(device.adc_reads, 1);
    }
}

#[test]
fn test_acquire_over_register_file() {
    let mut device = FakeDevice::new(2);
    let mut bmp = Bmp280::initialize(&mut device, &Config::new())
        .unwrap()
        .calibrate()
        .unwrap();

    let measurement = bmp.acquire().unwrap();
    assert!((measurement.temperature - 25.08).abs() < 0.001);
    assert!((measurement.pressure - 100_653.25).abs() < 0.05);
    assert_eq!(bmp.read_mode().unwrap(), Mode::Sleep);
}

#[test]
fn test_poll_limit_counts_busy_reads() {
    let mut device = FakeDevice::new(3);
    let config = Config::new().with_poll_limit(3);
    let mut bmp = Bmp280::initialize(&mut device, &config)
        .unwrap()
        .calibrate()
        .unwrap();
    assert_eq!(bmp.acquire_temperature(), Err(Error::Timeout));

    let mut device = FakeDevice::new(3);
    let config = Config::new().with_poll_limit(4);
    let mut bmp = Bmp280::initialize(&mut device, &config)
        .unwrap()
        .calibrate()
        .unwrap();
    assert!(bmp.acquire_temperature().is_ok());
}

#[test]
fn test_missing_initialize_yields_no_handle() {
    assert!(matches!(
        Bmp280::initialize(Absent, &Config::new()),
        Err(Error::NullHandler)
    ));
}

#[test]
fn test_failed_initialize_reports_transport_error() {
    assert!(matches!(
        Bmp280::initialize(Broken, &Config::new()),
        Err(Error::BusFailure(7))
    ));
}

#[test]
fn test_missing_write_is_null_handler() {
    let mut bmp = Bmp280::initialize(ReadOnly, &Config::new()).unwrap();

    assert_eq!(bmp.get_id().unwrap().chip_id, 0);
    assert_eq!(bmp.write_mode(Mode::Forced), Err(Error::NullHandler));
    assert_eq!(bmp.soft_reset(), Err(Error::NullHandler));

    let mut bmp = bmp.calibrate().unwrap();
    assert_eq!(bmp.acquire_temperature(), Err(Error::NullHandler));
}

#[test]
fn test_missing_deinitialize_is_null_handler() {
    let bmp = Bmp280::initialize(ReadOnly, &Config::new()).unwrap();
    assert!(matches!(bmp.deinitialize(), Err(Error::NullHandler)));
}

#[test]
fn test_non_blocking_poll() {
    let mut device = FakeDevice::new(1);
    let mut bmp = Bmp280::initialize(&mut device, &Config::new()).unwrap();

    bmp.write_mode(Mode::Forced).unwrap();
    assert!(matches!(bmp.poll_conversion(), Err(nb::Error::WouldBlock)));
    assert!(bmp.poll_conversion().is_ok());
    let adc = bmp.read_temp_adc().unwrap();
    assert_eq!(adc, 519888);
}

#[test]
fn test_calib_words_match_register_map() {
    let mut device = FakeDevice::new(0);
    let mut bmp = Bmp280::initialize(&mut device, &Config::new()).unwrap();

    assert_eq!(Register::calib(11).addr(), 0x9E);
    assert_eq!(bmp.get_calib(0).unwrap().calibration_data, 27504);
    assert_eq!(bmp.get_calib(11).unwrap().as_signed(), 6000);
}
