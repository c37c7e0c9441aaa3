/// Power mode, `mode[1:0]` of `ctrl_meas`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum Mode {
    /// No conversions.
    #[default]
    Sleep = 0b00,
    /// One conversion, then the device falls back to [`Mode::Sleep`].
    Forced = 0b01,
    /// Continuous conversions separated by the configured standby time.
    Normal = 0b11,
}

impl Mode {
    /// Decodes the two mode bits. `0b10` is a second encoding of forced mode.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b00 => Self::Sleep,
            0b11 => Self::Normal,
            _ => Self::Forced,
        }
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        mode as u8
    }
}

/// Oversampling selector, used for both `osrs_t` and `osrs_p`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Oversampling {
    /// Measurement skipped, the ADC register keeps `0x80000`.
    Skipped = 0b000,
    /// 16 bit resolution
    #[default]
    X1 = 0b001,
    X2 = 0b010,
    X4 = 0b011,
    X8 = 0b100,
    /// 20 bit resolution
    X16 = 0b101,
}

/// IIR filter coefficient, `filter[2:0]` of `config`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum Filter {
    #[default]
    Off = 0,
    X2 = 1,
    X4 = 2,
    X8 = 3,
    X16 = 4,
}

/// Inactive duration in normal mode, `t_sb[2:0]` of `config`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum Standby {
    #[default]
    Ms0_5 = 0,
    Ms62_5 = 1,
    Ms125 = 2,
    Ms250 = 3,
    Ms500 = 4,
    Ms1000 = 5,
    Ms10 = 6,
    Ms20 = 7,
}

/// Static driver configuration.
///
/// `scale` is carried for the caller and never applied by the driver itself.
/// The register presets are only written by [`crate::Bmp280::configure`] and
/// fields left as `None` keep whatever the device currently holds.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub scale: f32,
    pub temp_oversampling: Option<Oversampling>,
    pub pres_oversampling: Option<Oversampling>,
    pub filter: Option<Filter>,
    pub standby: Option<Standby>,
    /// Maximum number of mode reads that may still report a running
    /// conversion before an acquisition fails with [`crate::Error::Timeout`].
    /// `None` polls until the device reports sleep.
    pub poll_limit: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            scale: 1.0,
            temp_oversampling: None,
            pres_oversampling: None,
            filter: None,
            standby: None,
            poll_limit: None,
        }
    }

    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub const fn with_temp_oversampling(mut self, osrs: Oversampling) -> Self {
        self.temp_oversampling = Some(osrs);
        self
    }

    pub const fn with_pres_oversampling(mut self, osrs: Oversampling) -> Self {
        self.pres_oversampling = Some(osrs);
        self
    }

    pub const fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub const fn with_standby(mut self, standby: Standby) -> Self {
        self.standby = Some(standby);
        self
    }

    /// Bound the conversion poll. Conversion time grows with oversampling, so
    /// pick the limit together with how long one bus read takes.
    pub const fn with_poll_limit(mut self, limit: u32) -> Self {
        self.poll_limit = Some(limit);
        self
    }
}
