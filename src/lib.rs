//!
//! BMP280 embedded-hal driver crate
//!
//! A platform agnostic driver for the BMP280 barometric pressure & temperature sensor.
//! The transport is pluggable through the [`Bus`] trait; adapters for
//! [embedded-hal] I2C ([`I2cBus`]) and SPI ([`SpiBus`]) devices are included.
//!
//! Readings are taken in forced mode: the driver triggers a single conversion,
//! polls until the device is back in sleep mode, reads the raw ADC registers and
//! compensates them with the factory trim coefficients using the integer
//! formulas of the datasheet.
//!
//! ```ignore
//! let bus = I2cBus::new(i2c, I2C_ADDRESS_PRIMARY);
//! let mut bmp = Bmp280::initialize(bus, &Config::new())?.calibrate()?;
//! let Measurement { temperature, pressure } = bmp.acquire()?;
//! ```
//!
//! [embedded-hal]: https://docs.rs/embedded-hal

#![no_std]

#[macro_use]
mod fmt;

mod bus;
mod calibration;
pub mod codec;
pub mod compensation;
mod config;
mod device;
mod register;

pub use bus::{Bus, BusError, I2cBus, SpiBus, I2C_ADDRESS_PRIMARY, I2C_ADDRESS_SECONDARY};
pub use calibration::TrimData;
pub use config::{Config, Filter, Mode, Oversampling, Standby};
pub use device::{
    Bmp280, Calibrated, Error, Measurement, Uncalibrated, DEVICE_ID, SOFT_RESET,
};
pub use register::{Register, CALIB_LEN, CALIB_WORDS};
