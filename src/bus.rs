use embedded_hal::i2c::I2c;
use embedded_hal::spi::{Operation, SpiDevice};

/// Failure reported by a [`Bus`] implementation.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BusError<E> {
    /// The implementation does not provide this operation.
    Unsupported,
    /// Transport level failure
    Transport(E),
}

impl<E> From<E> for BusError<E> {
    fn from(err: E) -> Self {
        BusError::Transport(err)
    }
}

/// Register level transport used by the driver.
///
/// Every method has a default body returning [`BusError::Unsupported`], so an
/// implementation only provides the operations its transport supports. The
/// driver reports a missing operation as [`crate::Error::NullHandler`].
///
/// Any user context (file descriptors, peripheral handles ...) lives in the
/// implementing type itself.
pub trait Bus {
    type Error;

    /// Called once when the device handle is created.
    fn initialize(&mut self) -> Result<(), BusError<Self::Error>> {
        Err(BusError::Unsupported)
    }

    /// Called once when the device handle is torn down.
    fn deinitialize(&mut self) -> Result<(), BusError<Self::Error>> {
        Err(BusError::Unsupported)
    }

    /// Writes `data` to consecutive registers starting at `address`.
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError<Self::Error>> {
        let _ = (address, data);
        Err(BusError::Unsupported)
    }

    /// Fills `buf` from consecutive registers starting at `address`.
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), BusError<Self::Error>> {
        let _ = (address, buf);
        Err(BusError::Unsupported)
    }
}

impl<B: Bus + ?Sized> Bus for &mut B {
    type Error = B::Error;

    fn initialize(&mut self) -> Result<(), BusError<Self::Error>> {
        B::initialize(self)
    }

    fn deinitialize(&mut self) -> Result<(), BusError<Self::Error>> {
        B::deinitialize(self)
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError<Self::Error>> {
        B::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), BusError<Self::Error>> {
        B::read(self, address, buf)
    }
}

/// I2C slave address with SDO tied to GND.
pub const I2C_ADDRESS_PRIMARY: u8 = 0x76;
/// I2C slave address with SDO tied to VDDIO.
pub const I2C_ADDRESS_SECONDARY: u8 = 0x77;

/// [`Bus`] over an `embedded-hal` I2C peripheral.
pub struct I2cBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cBus<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, I2CError> Bus for I2cBus<I2C>
where
    I2C: I2c<Error = I2CError>,
{
    type Error = I2CError;

    fn initialize(&mut self) -> Result<(), BusError<Self::Error>> {
        Ok(())
    }

    fn deinitialize(&mut self) -> Result<(), BusError<Self::Error>> {
        Ok(())
    }

    // The device does not auto-increment on writes, every byte goes out as
    // its own register/value pair.
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError<Self::Error>> {
        for (offset, value) in data.iter().enumerate() {
            let reg = address.wrapping_add(offset as u8);
            self.i2c.write(self.address, &[reg, *value])?;
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), BusError<Self::Error>> {
        self.i2c.write_read(self.address, &[address], buf)?;
        Ok(())
    }
}

/// Register writes packed into a single SPI frame.
const SPI_WRITE_PAIRS: usize = 8;

/// [`Bus`] over an `embedded-hal` SPI device (4-wire, mode 0 or 3).
///
/// Bit 7 of the control byte selects read (1) or write (0).
pub struct SpiBus<SPI> {
    spi: SPI,
}

impl<SPI> SpiBus<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, SPIError> Bus for SpiBus<SPI>
where
    SPI: SpiDevice<Error = SPIError>,
{
    type Error = SPIError;

    fn initialize(&mut self) -> Result<(), BusError<Self::Error>> {
        Ok(())
    }

    fn deinitialize(&mut self) -> Result<(), BusError<Self::Error>> {
        Ok(())
    }

    // Control byte / data byte pairs share one chip select frame, split every
    // `SPI_WRITE_PAIRS` registers.
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError<Self::Error>> {
        for (index, chunk) in data.chunks(SPI_WRITE_PAIRS).enumerate() {
            let first = address.wrapping_add((index * SPI_WRITE_PAIRS) as u8);
            let mut frame = [0u8; 2 * SPI_WRITE_PAIRS];
            for (offset, value) in chunk.iter().enumerate() {
                frame[2 * offset] = first.wrapping_add(offset as u8) & 0x7F;
                frame[2 * offset + 1] = *value;
            }
            self.spi.write(&frame[..2 * chunk.len()])?;
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), BusError<Self::Error>> {
        self.spi
            .transaction(&mut [Operation::Write(&[address | 0x80]), Operation::Read(buf)])?;
        Ok(())
    }
}
