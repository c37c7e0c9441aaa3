//! Fixed-point compensation formulas from the BMP280 datasheet (section 3.11.3
//! and appendix 8.2, 64 bit pressure variant).
//!
//! The integer sequence must be kept bit exact. All intermediates use
//! wrapping fixed-width arithmetic and arithmetic right shifts.

use crate::calibration::TrimData;

/// Compensates a 20 bit temperature ADC count.
///
/// Returns hundredths of a degree Celsius (`5123` = 51.23 °C) and updates
/// `trim.t_fine` for the pressure step.
pub fn compensate_temperature(trim: &mut TrimData, adc_t: i32) -> i32 {
    let t1 = i32::from(trim.t1);
    let t2 = i32::from(trim.t2);
    let t3 = i32::from(trim.t3);

    let var1 = ((adc_t >> 3).wrapping_sub(t1 << 1)).wrapping_mul(t2) >> 11;
    let delta = (adc_t >> 4).wrapping_sub(t1);
    let var2 = (delta.wrapping_mul(delta) >> 12).wrapping_mul(t3) >> 14;

    trim.t_fine = var1.wrapping_add(var2);
    trim.t_fine.wrapping_mul(5).wrapping_add(128) >> 8
}

/// Compensates a 20 bit pressure ADC count using the `t_fine` left behind by
/// [`compensate_temperature`].
///
/// Returns pascal in Q24.8 (`24674867` = 24674867 / 256 = 96386.2 Pa), or
/// `None` when the calibration produces a zero divisor.
pub fn compensate_pressure(trim: &TrimData, adc_p: i32) -> Option<i64> {
    let p1 = i64::from(trim.p1);
    let p2 = i64::from(trim.p2);
    let p3 = i64::from(trim.p3);
    let p4 = i64::from(trim.p4);
    let p5 = i64::from(trim.p5);
    let p6 = i64::from(trim.p6);
    let p7 = i64::from(trim.p7);
    let p8 = i64::from(trim.p8);
    let p9 = i64::from(trim.p9);

    let mut var1 = i64::from(trim.t_fine) - 128_000;
    let mut var2 = var1.wrapping_mul(var1).wrapping_mul(p6);
    var2 = var2.wrapping_add(var1.wrapping_mul(p5) << 17);
    var2 = var2.wrapping_add(p4 << 35);
    var1 = (var1.wrapping_mul(var1).wrapping_mul(p3) >> 8).wrapping_add(var1.wrapping_mul(p2) << 12);
    var1 = ((1i64 << 47).wrapping_add(var1)).wrapping_mul(p1) >> 33;

    if var1 == 0 {
        return None;
    }

    let mut p = 1_048_576 - i64::from(adc_p);
    p = ((p << 31).wrapping_sub(var2)).wrapping_mul(3125).wrapping_div(var1);
    var1 = p9.wrapping_mul(p >> 13).wrapping_mul(p >> 13) >> 25;
    var2 = p8.wrapping_mul(p) >> 19;

    Some((p.wrapping_add(var1).wrapping_add(var2) >> 8).wrapping_add(p7 << 4))
}
