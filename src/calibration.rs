use crate::bus::Bus;
use crate::codec::decode_calib;
use crate::device::Error;
use crate::register::{Register, CALIB_LEN};

/// Factory trim coefficients (`dig_T1..dig_T3`, `dig_P1..dig_P9`) and the
/// running `t_fine` shared by the two compensation steps.
///
/// The coefficients are programmed into NVM at the factory and never change,
/// so one read per power cycle is enough.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TrimData {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,
    pub p1: u16,
    pub p2: i16,
    pub p3: i16,
    pub p4: i16,
    pub p5: i16,
    pub p6: i16,
    pub p7: i16,
    pub p8: i16,
    pub p9: i16,
    /// Fine resolution temperature from the last temperature compensation.
    /// Pressure compensation is only meaningful right after the temperature
    /// of the same sample was compensated.
    pub t_fine: i32,
}

impl TrimData {
    /// Reads the 24 byte trim block in one burst. The bytes are taken as-is, a
    /// missing device that returns garbage is not detected here.
    pub fn load<B: Bus>(bus: &mut B) -> Result<Self, Error<B::Error>> {
        let mut bytes = [0u8; CALIB_LEN];
        bus.read(Register::CALIB00.addr(), &mut bytes)?;
        let trim = Self::from_bytes(&bytes);
        debug!("trim data loaded: T1={=u16} P1={=u16}", trim.t1, trim.p1);
        Ok(trim)
    }

    pub fn from_bytes(bytes: &[u8; CALIB_LEN]) -> Self {
        let word = |num: usize| decode_calib([bytes[2 * num], bytes[2 * num + 1]]);

        Self {
            t1: word(0).calibration_data,
            t2: word(1).as_signed(),
            t3: word(2).as_signed(),
            p1: word(3).calibration_data,
            p2: word(4).as_signed(),
            p3: word(5).as_signed(),
            p4: word(6).as_signed(),
            p5: word(7).as_signed(),
            p6: word(8).as_signed(),
            p7: word(9).as_signed(),
            p8: word(10).as_signed(),
            p9: word(11).as_signed(),
            t_fine: 0,
        }
    }
}
