use crate::bus::{Bus, BusError};
use crate::calibration::TrimData;
use crate::codec::{
    decode_calib, decode_config, decode_ctrl_meas, decode_id, decode_press, decode_press_adc,
    decode_press_x, decode_reset, decode_status, decode_temp, decode_temp_adc, decode_temp_x,
    encode_config, encode_ctrl_meas, encode_reset, merge, CalibReg, ConfigReg, CtrlMeasReg,
    IdReg, PressReg, PressXReg, ResetReg, StatusReg, TempReg, TempXReg, CONFIG_MASK, MODE_MASK,
};
use crate::compensation::{compensate_pressure, compensate_temperature};
use crate::config::{Config, Mode};
use crate::register::{Register, CALIB_WORDS};
use core::marker::PhantomData;

/// Value of the `id` register.
pub const DEVICE_ID: u8 = 0x75;

/// Writing this to the `reset` register triggers a power-on reset.
pub const SOFT_RESET: u8 = 0xB6;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Uncalibrated;
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Calibrated;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Eq, PartialEq)]
pub enum Error<BusErr> {
    /// Bus transport error
    BusFailure(BusErr),
    /// The bus implementation does not provide a required operation.
    NullHandler,
    /// The conversion did not finish within [`Config::poll_limit`] mode reads.
    Timeout,
    /// The trim data yields a zero divisor in pressure compensation.
    CompensationFault,
    /// An argument is outside its valid range.
    InvalidArgument,
}

impl<BusErr> From<BusError<BusErr>> for Error<BusErr> {
    fn from(err: BusError<BusErr>) -> Self {
        match err {
            BusError::Unsupported => Error::NullHandler,
            BusError::Transport(err) => Error::BusFailure(err),
        }
    }
}

/// Temperature and pressure taken from the same forced conversion.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// °C
    pub temperature: f32,
    /// Pa
    pub pressure: f32,
}

/// BMP280 device handle.
///
/// Not internally synchronized: share it between contexts only behind a
/// mutex or similar.
pub struct Bmp280<B, S> {
    bus: B,
    config: Config,
    trim: TrimData,
    _state: PhantomData<S>,
}

impl<B, E> Bmp280<B, Uncalibrated>
where
    B: Bus<Error = E>,
{
    /// Initializes the bus and returns a handle ready for register access.
    ///
    /// No handle exists when the bus fails to come up.
    pub fn initialize(mut bus: B, config: &Config) -> Result<Self, Error<E>> {
        bus.initialize()?;
        trace!("bus initialized");

        Ok(Self {
            bus,
            config: *config,
            trim: TrimData::default(),
            _state: PhantomData,
        })
    }

    /// Reads the factory trim block. Required before any compensated reading.
    pub fn calibrate(mut self) -> Result<Bmp280<B, Calibrated>, Error<E>> {
        self.trim = TrimData::load(&mut self.bus)?;
        Ok(self.into_state())
    }

    /// Uses trim coefficients obtained elsewhere, e.g. persisted from an earlier
    /// [`Self::calibrate`] on the same part.
    pub fn with_trim(mut self, trim: TrimData) -> Bmp280<B, Calibrated> {
        self.trim = trim;
        self.into_state()
    }
}

impl<B, E> Bmp280<B, Calibrated>
where
    B: Bus<Error = E>,
{
    pub fn trim_data(&self) -> &TrimData {
        &self.trim
    }

    /// Triggers a forced conversion and returns the compensated temperature in °C.
    ///
    /// Blocks until the device reports sleep again, see [`Config::poll_limit`].
    pub fn acquire_temperature(&mut self) -> Result<f32, Error<E>> {
        self.write_mode(Mode::Forced)?;
        self.wait_for_conversion()?;

        let adc_t = self.read_temp_adc()?;
        let centi = compensate_temperature(&mut self.trim, adc_t);
        Ok(centi as f32 / 100.0)
    }

    /// Triggers a forced conversion and returns the compensated pressure in Pa.
    ///
    /// The temperature of the same conversion is compensated first to refresh
    /// `t_fine`.
    pub fn acquire_pressure(&mut self) -> Result<f32, Error<E>> {
        Ok(self.acquire()?.pressure)
    }

    /// Temperature and pressure of a single forced conversion.
    pub fn acquire(&mut self) -> Result<Measurement, Error<E>> {
        let temperature = self.acquire_temperature()?;

        let adc_p = self.read_press_adc()?;
        let q24_8 = compensate_pressure(&self.trim, adc_p).ok_or_else(|| {
            warn!("pressure compensation divisor is zero, trim data invalid");
            Error::CompensationFault
        })?;

        Ok(Measurement {
            temperature,
            pressure: q24_8 as f32 / 256.0,
        })
    }
}

impl<B, E, S> Bmp280<B, S>
where
    B: Bus<Error = E>,
{
    /// Deinitializes the bus and hands it back.
    pub fn deinitialize(mut self) -> Result<B, Error<E>> {
        self.bus.deinitialize()?;
        trace!("bus deinitialized");
        Ok(self.bus)
    }

    /// Returns the bus without deinitializing it.
    pub fn release(self) -> B {
        self.bus
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Output scale factor from the configuration, for the caller to apply.
    pub fn scale(&self) -> f32 {
        self.config.scale
    }

    /// Writes the oversampling, filter and standby presets that are set in the
    /// configuration. Presets left as `None` are not touched.
    pub fn configure(&mut self) -> Result<(), Error<E>> {
        let config = self.config;

        if config.temp_oversampling.is_some() || config.pres_oversampling.is_some() {
            let mut ctrl_meas = self.get_ctrl_meas()?;
            if let Some(osrs) = config.temp_oversampling {
                ctrl_meas.osrs_t = osrs as u8;
            }
            if let Some(osrs) = config.pres_oversampling {
                ctrl_meas.osrs_p = osrs as u8;
            }
            self.set_ctrl_meas(&ctrl_meas)?;
        }

        if config.filter.is_some() || config.standby.is_some() {
            let mut reg = self.get_config()?;
            if let Some(filter) = config.filter {
                reg.filter = filter as u8;
            }
            if let Some(standby) = config.standby {
                reg.t_sb = standby as u8;
            }
            self.set_config(&reg)?;
        }

        Ok(())
    }

    /// Current power mode as reported by `ctrl_meas`.
    pub fn read_mode(&mut self) -> Result<Mode, Error<E>> {
        Ok(Mode::from_bits(self.get_ctrl_meas()?.mode))
    }

    /// Sets the power mode, keeping the oversampling settings.
    pub fn write_mode(&mut self, mode: Mode) -> Result<(), Error<E>> {
        let bits = u8::from(mode);
        self.modify_reg(Register::CTRL_MEAS, bits, MODE_MASK)?;
        trace!("mode set to {=u8}", bits);
        Ok(())
    }

    /// Single, non-blocking step of the conversion wait.
    ///
    /// Completes once the device is back in sleep mode after a forced conversion.
    pub fn poll_conversion(&mut self) -> nb::Result<(), Error<E>> {
        match self.read_mode()? {
            Mode::Sleep => Ok(()),
            _ => Err(nb::Error::WouldBlock),
        }
    }

    fn wait_for_conversion(&mut self) -> Result<(), Error<E>> {
        let mut pending: u32 = 0;
        loop {
            match self.poll_conversion() {
                Ok(()) => return Ok(()),
                Err(nb::Error::Other(err)) => return Err(err),
                Err(nb::Error::WouldBlock) => {
                    pending = pending.saturating_add(1);
                    if let Some(limit) = self.config.poll_limit {
                        if pending >= limit {
                            warn!("conversion still running after {=u32} polls", pending);
                            return Err(Error::Timeout);
                        }
                    }
                }
            }
        }
    }

    /// True while a conversion is running.
    pub fn is_measuring(&mut self) -> Result<bool, Error<E>> {
        Ok(self.get_status()?.measuring != 0)
    }

    /// Issues a power-on reset. The trim data survives, it lives in NVM.
    pub fn soft_reset(&mut self) -> Result<(), Error<E>> {
        self.set_reset(&ResetReg { reset: SOFT_RESET })
    }

    /// Calibration word `num`, 0 (`dig_T1`) to 11 (`dig_P9`).
    pub fn get_calib(&mut self, num: u8) -> Result<CalibReg, Error<E>> {
        if num >= CALIB_WORDS {
            return Err(Error::InvalidArgument);
        }
        let mut bytes = [0u8; 2];
        self.read_many(Register::calib(num), &mut bytes)?;
        Ok(decode_calib(bytes))
    }

    /// Chip id, [`DEVICE_ID`] for a genuine part.
    pub fn get_id(&mut self) -> Result<IdReg, Error<E>> {
        Ok(decode_id(self.read_reg(Register::ID)?))
    }

    pub fn get_reset(&mut self) -> Result<ResetReg, Error<E>> {
        Ok(decode_reset(self.read_reg(Register::RESET)?))
    }

    /// The whole byte is the reset field, so it is written without a prior read.
    pub fn set_reset(&mut self, reg: &ResetReg) -> Result<(), Error<E>> {
        self.write_reg(Register::RESET, encode_reset(reg))
    }

    pub fn get_status(&mut self) -> Result<StatusReg, Error<E>> {
        Ok(decode_status(self.read_reg(Register::STATUS)?))
    }

    pub fn get_ctrl_meas(&mut self) -> Result<CtrlMeasReg, Error<E>> {
        Ok(decode_ctrl_meas(self.read_reg(Register::CTRL_MEAS)?))
    }

    /// All eight bits belong to [`CtrlMeasReg`], so no prior read is needed.
    pub fn set_ctrl_meas(&mut self, reg: &CtrlMeasReg) -> Result<(), Error<E>> {
        self.write_reg(Register::CTRL_MEAS, encode_ctrl_meas(reg))
    }

    pub fn get_config(&mut self) -> Result<ConfigReg, Error<E>> {
        Ok(decode_config(self.read_reg(Register::CONFIG)?))
    }

    pub fn set_config(&mut self, reg: &ConfigReg) -> Result<(), Error<E>> {
        self.modify_reg(Register::CONFIG, encode_config(reg), CONFIG_MASK)
    }

    pub fn get_pressure(&mut self) -> Result<PressReg, Error<E>> {
        let mut bytes = [0u8; 2];
        self.read_many(Register::PRESS_MSB, &mut bytes)?;
        Ok(decode_press(bytes))
    }

    pub fn get_pressure_x(&mut self) -> Result<PressXReg, Error<E>> {
        Ok(decode_press_x(self.read_reg(Register::PRESS_XLSB)?))
    }

    pub fn get_temperature(&mut self) -> Result<TempReg, Error<E>> {
        let mut bytes = [0u8; 2];
        self.read_many(Register::TEMP_MSB, &mut bytes)?;
        Ok(decode_temp(bytes))
    }

    pub fn get_temperature_x(&mut self) -> Result<TempXReg, Error<E>> {
        Ok(decode_temp_x(self.read_reg(Register::TEMP_XLSB)?))
    }

    /// Raw 20 bit temperature ADC count, read in one burst.
    pub fn read_temp_adc(&mut self) -> Result<i32, Error<E>> {
        let mut bytes = [0u8; 3];
        self.read_many(Register::TEMP_MSB, &mut bytes)?;
        Ok(decode_temp_adc(bytes))
    }

    /// Raw 20 bit pressure ADC count, read in one burst.
    pub fn read_press_adc(&mut self) -> Result<i32, Error<E>> {
        let mut bytes = [0u8; 3];
        self.read_many(Register::PRESS_MSB, &mut bytes)?;
        Ok(decode_press_adc(bytes))
    }

    fn modify_reg(&mut self, reg: Register, bits: u8, mask: u8) -> Result<(), Error<E>> {
        let current = self.read_reg(reg)?;
        self.write_reg(reg, merge(current, bits, mask))
    }

    fn write_reg(&mut self, reg: Register, value: u8) -> Result<(), Error<E>> {
        self.bus.write(reg.addr(), &[value])?;
        Ok(())
    }

    fn read_reg(&mut self, reg: Register) -> Result<u8, Error<E>> {
        let mut buffer: [u8; 1] = [0];
        self.bus.read(reg.addr(), &mut buffer)?;
        Ok(buffer[0])
    }

    fn read_many(&mut self, start: Register, buf: &mut [u8]) -> Result<(), Error<E>> {
        self.bus.read(start.addr(), buf)?;
        Ok(())
    }

    fn into_state<T>(self) -> Bmp280<B, T> {
        Bmp280 {
            bus: self.bus,
            config: self.config,
            trim: self.trim,
            _state: PhantomData,
        }
    }
}
