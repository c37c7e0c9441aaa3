//! Register codec.
//!
//! Pure pack/unpack functions between raw bus bytes and typed register values.
//! Fields are masked to their bit width when encoding, so out of range values
//! are truncated the same way the silicon would truncate them.
//!
//! Byte order is per register: calibration words are little-endian, the ADC
//! registers are big-endian with the MSB at the lower address.

/// One 16 bit word of the factory trim block.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CalibReg {
    pub calibration_data: u16,
}

impl CalibReg {
    /// Reinterprets the word for the signed coefficients (`dig_T2`, `dig_P2` ...).
    pub const fn as_signed(self) -> i16 {
        self.calibration_data as i16
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct IdReg {
    pub chip_id: u8,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResetReg {
    pub reset: u8,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StatusReg {
    /// 1 while a conversion is running
    pub measuring: u8,
    /// 1 while NVM data is copied to the image registers
    pub im_update: u8,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CtrlMeasReg {
    pub osrs_t: u8,
    pub osrs_p: u8,
    pub mode: u8,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConfigReg {
    pub t_sb: u8,
    pub filter: u8,
    pub spi3w_en: u8,
}

/// `press_msb`/`press_lsb`, the upper 16 bits of the pressure ADC value.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PressReg {
    pub press: u16,
}

/// `press_xlsb[7:4]`, the lowest nibble of the pressure ADC value.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PressXReg {
    pub press_x: u8,
}

/// `temp_msb`/`temp_lsb`, the upper 16 bits of the temperature ADC value.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TempReg {
    pub temp: u16,
}

/// `temp_xlsb[7:4]`, the lowest nibble of the temperature ADC value.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TempXReg {
    pub temp_x: u8,
}

/// `mode[1:0]` of `ctrl_meas`.
pub const MODE_MASK: u8 = 0x03;
/// Bits of `config` owned by [`ConfigReg`]. Bit 1 is reserved.
pub const CONFIG_MASK: u8 = (0x07 << 5) | (0x07 << 2) | 0x01;

/// Read-modify-write merge: keeps every bit of `current` outside `mask`.
pub const fn merge(current: u8, bits: u8, mask: u8) -> u8 {
    (current & !mask) | (bits & mask)
}

pub fn decode_calib(bytes: [u8; 2]) -> CalibReg {
    CalibReg {
        calibration_data: u16::from_le_bytes(bytes),
    }
}

pub fn encode_calib(reg: &CalibReg) -> [u8; 2] {
    reg.calibration_data.to_le_bytes()
}

pub fn decode_id(byte: u8) -> IdReg {
    IdReg { chip_id: byte }
}

pub fn encode_id(reg: &IdReg) -> u8 {
    reg.chip_id
}

pub fn decode_reset(byte: u8) -> ResetReg {
    ResetReg { reset: byte }
}

pub fn encode_reset(reg: &ResetReg) -> u8 {
    reg.reset
}

pub fn decode_status(byte: u8) -> StatusReg {
    StatusReg {
        measuring: (byte >> 3) & 0x01,
        im_update: byte & 0x01,
    }
}

pub fn encode_status(reg: &StatusReg) -> u8 {
    ((reg.measuring & 0x01) << 3) | (reg.im_update & 0x01)
}

pub fn decode_ctrl_meas(byte: u8) -> CtrlMeasReg {
    CtrlMeasReg {
        osrs_t: (byte >> 5) & 0x07,
        osrs_p: (byte >> 2) & 0x07,
        mode: byte & 0x03,
    }
}

pub fn encode_ctrl_meas(reg: &CtrlMeasReg) -> u8 {
    ((reg.osrs_t & 0x07) << 5) | ((reg.osrs_p & 0x07) << 2) | (reg.mode & 0x03)
}

pub fn decode_config(byte: u8) -> ConfigReg {
    ConfigReg {
        t_sb: (byte >> 5) & 0x07,
        filter: (byte >> 2) & 0x07,
        spi3w_en: byte & 0x01,
    }
}

pub fn encode_config(reg: &ConfigReg) -> u8 {
    ((reg.t_sb & 0x07) << 5) | ((reg.filter & 0x07) << 2) | (reg.spi3w_en & 0x01)
}

pub fn decode_press(bytes: [u8; 2]) -> PressReg {
    PressReg {
        press: u16::from_be_bytes(bytes),
    }
}

pub fn encode_press(reg: &PressReg) -> [u8; 2] {
    reg.press.to_be_bytes()
}

pub fn decode_press_x(byte: u8) -> PressXReg {
    PressXReg {
        press_x: (byte >> 4) & 0x0F,
    }
}

pub fn encode_press_x(reg: &PressXReg) -> u8 {
    (reg.press_x & 0x0F) << 4
}

pub fn decode_temp(bytes: [u8; 2]) -> TempReg {
    TempReg {
        temp: u16::from_be_bytes(bytes),
    }
}

pub fn encode_temp(reg: &TempReg) -> [u8; 2] {
    reg.temp.to_be_bytes()
}

pub fn decode_temp_x(byte: u8) -> TempXReg {
    TempXReg {
        temp_x: (byte >> 4) & 0x0F,
    }
}

pub fn encode_temp_x(reg: &TempXReg) -> u8 {
    (reg.temp_x & 0x0F) << 4
}

/// Joins a 16 bit MSB/LSB pair and its XLSB nibble into the 20 bit ADC count.
pub fn adc_value(high: u16, xlsb: u8) -> i32 {
    ((high as i32) << 4) | (xlsb & 0x0F) as i32
}

/// Decodes a `MSB, LSB, XLSB` burst into the 20 bit pressure ADC count.
pub fn decode_press_adc(bytes: [u8; 3]) -> i32 {
    let high = decode_press([bytes[0], bytes[1]]);
    let low = decode_press_x(bytes[2]);
    adc_value(high.press, low.press_x)
}

/// Decodes a `MSB, LSB, XLSB` burst into the 20 bit temperature ADC count.
pub fn decode_temp_adc(bytes: [u8; 3]) -> i32 {
    let high = decode_temp([bytes[0], bytes[1]]);
    let low = decode_temp_x(bytes[2]);
    adc_value(high.temp, low.temp_x)
}
