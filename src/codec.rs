/*!
    conversions between physical quantities and plate wire encodings

    everything here is pure computation, plates are only reached through [crate::plate]
*/

use bilge::prelude::*;
use packbytes::{FromBytes, ToBytes};

use crate::{
    Error, Result,
    command::{CalibrationWord, StepperHead, DcHead, TriggerHead, SignedSteps},
    };


/// keep 3 decimals, dropping the rest instead of rounding
pub fn truncate3(value: f64) -> f64 {
    (value * 1000.).floor() / 1000.
}

/// join a big-endian word
pub fn word(high: u8, low: u8) -> u16 {
    u16::from_be_bytes([high, low])
}


// analog scaling

/// DAQC ADC reference voltage
pub const DAQC_REFERENCE: f64 = 4.096;
/// DAQC ADC resolution
pub const DAQC_STEPS: f64 = 1024.;
/// DAQC pwm/dac full scale voltage
pub const DAQC_DAC_REFERENCE: f64 = 4.095;
/// DAQC pwm/dac highest value
pub const DAQC_DAC_MAX: u16 = 1023;
/// DAQC2 ADC span, centered on zero
pub const DAQC2_SPAN: f64 = 24.;
/// DAQC2 ADC resolution
pub const DAQC2_STEPS: f64 = 65536.;

/// DAQC ADC raw count to volts
pub fn daqc_adc(raw: u16) -> f64 {
    truncate3(f64::from(raw) * DAQC_REFERENCE / DAQC_STEPS)
}
/// DAQC2 ADC raw count to volts, corrected with the channel calibration
pub fn daqc2_adc(raw: u16, scale: f64, offset: f64) -> f64 {
    let volts = f64::from(raw) * DAQC2_SPAN / DAQC2_STEPS - DAQC2_SPAN / 2.;
    truncate3(volts * scale + offset)
}
/// DAQC dac output volts to its 10 bit pwm value
pub fn daqc_dac_value(volts: f64) -> u16 {
    ((volts * f64::from(DAQC_DAC_MAX) / DAQC_DAC_REFERENCE).round() as u16).min(DAQC_DAC_MAX)
}
/// DAQC pwm value read back to volts
pub fn daqc_dac_volts(raw: u16) -> f64 {
    truncate3(f64::from(raw) * DAQC_DAC_REFERENCE / f64::from(DAQC_DAC_MAX))
}
/// duty cycle in percent to a 10 bit pwm value
pub fn duty_value(percent: f64) -> u16 {
    ((percent * 1023. / 100.).round() as u16).min(1023)
}
/// 10 bit pwm value to duty cycle in percent
pub fn duty_percent(raw: u16) -> f64 {
    truncate3(f64::from(raw) * 100. / 1023.)
}


// calibration constants

const MANTISSA_SCALE: f64 = (1u32 << 23) as f64;
const MANTISSA_SIGN: u32 = 1 << 23;
const EXPONENT_BIAS: i32 = 64;

/// lowest and highest decimal exponent a calibration constant can hold
pub const CALIBRATION_EXPONENTS: core::ops::RangeInclusive<i32> = -64 ..= 63;

/// decode a calibration constant from its 4 flash bytes
pub fn decode_calibration(bytes: [u8; 4]) -> f64 {
    let word = CalibrationWord::from_be_bytes(bytes);
    let raw = word.mantissa().value();
    let fraction = if raw & MANTISSA_SIGN != 0 {
        f64::from(raw as i32 - (1 << 24))
    } else {
        f64::from(raw)
    } / MANTISSA_SCALE;
    let exponent = f64::from(i32::from(word.exponent().value()) - EXPONENT_BIAS);
    let magnitude = 10f64.powf(exponent + fraction);
    if word.negative() {-magnitude} else {magnitude}
}

/**
    encode a value into the calibration flash format

    the decimal exponent is the floor of the value's log, so the stored fraction is always in `[0, 1)`. Zero is stored as the smallest representable magnitude.
*/
pub fn encode_calibration(value: f64) -> Result<[u8; 4]> {
    if !value.is_finite()
        {return Err(Error::Calibration("value is not finite"))}
    let mut word = CalibrationWord::from(0u32);
    if value == 0. {
        word.set_mantissa(u24::new(MANTISSA_SIGN));
        return Ok(word.to_be_bytes());
    }
    let log = value.abs().log10();
    let exponent = log.floor() as i32;
    if !CALIBRATION_EXPONENTS.contains(&exponent)
        {return Err(Error::Calibration("value out of representable magnitude"))}
    let fraction = ((log - f64::from(exponent)) * MANTISSA_SCALE).round() as u32;
    word.set_mantissa(u24::new(fraction.min(MANTISSA_SIGN - 1)));
    word.set_exponent(u7::new((exponent + EXPONENT_BIAS) as u8));
    word.set_negative(value < 0.);
    Ok(word.to_be_bytes())
}


// motors

/// highest stepper rate in steps per second
pub const STEPPER_RATE_MAX: u16 = 2000;
/// highest DC motor scaled speed
pub const DC_SPEED_MAX: u16 = 1023;
/// highest acceleration time in seconds, for both motor kinds
pub const ACCELERATION_MAX: f64 = 10.;
/// largest signed step count
pub const STEPS_SIGNED_MAX: i32 = 16383;

/// motor rotation sense
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// stepper microstepping
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Resolution {
    #[default]
    Full = 0,
    Half = 1,
    Quarter = 2,
    Eighth = 3,
}
impl Resolution {
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Full),
            1 => Some(Self::Half),
            2 => Some(Self::Quarter),
            3 => Some(Self::Eighth),
            _ => None,
        }
    }
}

fn ramp_increment(value: f64, acceleration: f64, maximum: f64) -> u16 {
    // no ramp at all when acceleration is 0
    if acceleration == 0.
        {return 0}
    (1024. * value / (acceleration * maximum)).round().min(f64::from(u16::MAX)) as u16
}
/// per step rate change making a stepper reach `rate` in `acceleration` seconds
pub fn stepper_increment(rate: u16, acceleration: f64) -> u16 {
    ramp_increment(f64::from(rate), acceleration, f64::from(STEPPER_RATE_MAX))
}
/// per step speed change making a DC motor reach `speed` (scaled) in `acceleration` seconds
pub fn dc_increment(speed: u16, acceleration: f64) -> u16 {
    ramp_increment(f64::from(speed), acceleration, f64::from(DC_SPEED_MAX))
}

/// parameter bytes of a stepper rate setting
pub fn stepper_head(direction: Direction, resolution: Resolution, rate: u16) -> [u8; 2] {
    let mut head = StepperHead::from(0u8);
    head.set_rate_high(u3::new(((rate >> 8) & 0x7) as u8));
    head.set_resolution(u2::new(resolution as u8));
    head.set_reverse(direction == Direction::CounterClockwise);
    [u8::from(head), (rate & 0xFF) as u8]
}

/// signed step count as sign and magnitude bytes, `None` beyond ±16383
pub fn signed_steps(steps: i32) -> Option<[u8; 2]> {
    if steps.unsigned_abs() > STEPS_SIGNED_MAX.unsigned_abs()
        {return None}
    let mut packed = SignedSteps::from(0u16);
    packed.set_magnitude(u15::new(steps.unsigned_abs() as u16));
    packed.set_negative(steps < 0);
    Some(packed.to_be_bytes())
}
/// unsigned step count as plain high and low bytes
pub fn unsigned_steps(steps: u16) -> [u8; 2] {
    steps.to_be_bytes()
}

/**
    DC motor speed in percent to the driver value

    motors 3 and 4 have a different output stage and only take 5/8 of the full scale
*/
pub fn dc_speed(motor: u8, percent: u8) -> u16 {
    let value = (f64::from(percent) * f64::from(DC_SPEED_MAX) / 100.).round();
    match motor {
        3 | 4 => (value * 5. / 8.).round() as u16,
        _ => value as u16,
    }
}
/// parameter bytes of a DC motor speed setting
pub fn dc_head(direction: Direction, speed: u16) -> [u8; 2] {
    let mut head = DcHead::from(0u8);
    head.set_speed_high(u2::new(((speed >> 8) & 0x3) as u8));
    head.set_reverse(direction == Direction::CounterClockwise);
    [u8::from(head), (speed & 0xFF) as u8]
}


// oscilloscope

/// sample rates selectable by sweep index
pub const SWEEP_RATES: [u32; 13] = [
    100, 200, 500,
    1_000, 2_000, 5_000,
    10_000, 20_000, 50_000,
    100_000, 200_000, 500_000,
    1_000_000,
    ];
/// highest trigger level
pub const TRIGGER_LEVEL_MAX: u16 = 4095;

/// trigger parameter bytes, channel is 1 or 2
pub fn trigger(channel: u8, normal: bool, falling: bool, level: u16) -> [u8; 2] {
    let mut head = TriggerHead::from(0u8);
    head.set_channel(u1::new(channel.saturating_sub(1) & 1));
    head.set_normal(normal);
    head.set_falling(falling);
    head.set_level_high(u4::new(((level >> 8) & 0xF) as u8));
    [u8::from(head), (level & 0xFF) as u8]
}
