/// BMP280 register map.
///
/// Multi byte reads auto-increment from the given address, so the pressure and
/// temperature ADC values are fetched with a single burst from their MSB register.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Register(u8);

impl Register {
    /// First calibration word (`dig_T1` LSB). The trim block spans 24 bytes.
    pub const CALIB00: Self = Self(0x88);
    pub const ID: Self = Self(0xD0);
    pub const RESET: Self = Self(0xE0);
    /// bit 3 `measuring`, bit 0 `im_update`
    pub const STATUS: Self = Self(0xF3);
    pub const CTRL_MEAS: Self = Self(0xF4);
    pub const CONFIG: Self = Self(0xF5);
    pub const PRESS_MSB: Self = Self(0xF7);
    pub const PRESS_LSB: Self = Self(0xF8);
    pub const PRESS_XLSB: Self = Self(0xF9);
    pub const TEMP_MSB: Self = Self(0xFA);
    pub const TEMP_LSB: Self = Self(0xFB);
    pub const TEMP_XLSB: Self = Self(0xFC);

    /// Address of calibration word `num` (0 = `dig_T1`, 11 = `dig_P9`).
    pub const fn calib(num: u8) -> Self {
        Self(Self::CALIB00.0.wrapping_add(num.wrapping_mul(2)))
    }

    pub const fn addr(self) -> u8 {
        self.0
    }
}

/// Size of the factory trim block starting at [`Register::CALIB00`].
pub const CALIB_LEN: usize = 24;

/// Number of 16 bit calibration words in the trim block.
pub const CALIB_WORDS: u8 = 12;
