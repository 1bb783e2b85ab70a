/*!
    thermocouple conversions

    NIST ITS-90 polynomials for type K and J thermocouples, and the cold junction sensor model of the THERMO plate
*/

use crate::codec::truncate3;


/// thermocouple alloy
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Kind {
    #[default]
    K,
    J,
}

/// display unit of temperatures
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Scale {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}
impl Scale {
    /// convert a temperature in celsius to this scale
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Scale::Celsius => celsius,
            Scale::Fahrenheit => celsius * 9. / 5. + 32.,
            Scale::Kelvin => celsius + 273.15,
        }
    }
}

/// voltage to temperature coefficients, for a thermocouple below 0 °C
const K_INVERSE_NEGATIVE: [f64; 10] = [
    0., 2.5173462e1, -1.1662878, -1.0833638, -8.9773540e-1,
    -3.7342377e-1, -8.6632643e-2, -1.0450598e-2, -5.1920577e-4, 0.,
    ];
const K_INVERSE_LOW: [f64; 10] = [
    0., 2.508355e1, 7.860106e-2, -2.503131e-1, 8.315270e-2,
    -1.228034e-2, 9.804036e-4, -4.413030e-5, 1.057734e-6, -1.052755e-8,
    ];
const K_INVERSE_HIGH: [f64; 10] = [
    -1.318058e2, 4.830222e1, -1.646031, 5.464731e-2, -9.650715e-4,
    8.802193e-6, -3.110810e-8, 0., 0., 0.,
    ];
/// millivolts separating the low and high ranges of type K
const K_RANGE_SPLIT: f64 = 20.644;

const J_INVERSE_NEGATIVE: [f64; 10] = [
    0., 1.9528268e1, -1.2286185, -1.0752178, -5.9086933e-1,
    -1.7256713e-1, -2.8131513e-2, -2.3963370e-3, -8.3823321e-5, 0.,
    ];
const J_INVERSE_LOW: [f64; 10] = [
    0., 1.978425e1, -2.001204e-1, 1.036969e-2, -2.549687e-4,
    3.585153e-6, -5.344285e-8, 5.099890e-10, 0., 0.,
    ];
const J_INVERSE_HIGH: [f64; 10] = [
    -3.11358187e3, 3.00543684e2, -9.94773230, 1.70276630e-1, -1.43033468e-3,
    4.73886084e-6, 0., 0., 0., 0.,
    ];
const J_RANGE_SPLIT: f64 = 42.919;

/// temperature to voltage coefficients, used around the cold junction
const K_FORWARD: [f64; 10] = [
    -1.7600413686e-2, 3.8921204975e-2, 1.8558770032e-5, -9.9457592874e-8, 3.1840945719e-10,
    -5.6072844889e-13, 5.6075059059e-16, -3.2020720003e-19, 9.7151147152e-23, -1.2104721275e-26,
    ];
const J_FORWARD: [f64; 9] = [
    0., 5.0381187815e-2, 3.0475836930e-5, -8.5681065720e-8, 1.3228195295e-10,
    -1.7052958337e-13, 2.0948090697e-16, -1.2538395336e-19, 1.5631725697e-23,
    ];

/// evaluate `sum(coefficients[i] * x^i)`
fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0., |acc, c| acc * x + c)
}

impl Kind {
    /// thermocouple voltage in millivolts for a junction temperature
    pub fn millivolts(self, celsius: f64) -> f64 {
        match self {
            Kind::K => polynomial(&K_FORWARD, celsius),
            Kind::J => polynomial(&J_FORWARD, celsius),
        }
    }
    /// junction temperature for a thermocouple voltage in millivolts
    pub fn celsius(self, millivolts: f64) -> f64 {
        let (negative, low, high, split) = match self {
            Kind::K => (&K_INVERSE_NEGATIVE, &K_INVERSE_LOW, &K_INVERSE_HIGH, K_RANGE_SPLIT),
            Kind::J => (&J_INVERSE_NEGATIVE, &J_INVERSE_LOW, &J_INVERSE_HIGH, J_RANGE_SPLIT),
        };
        let coefficients = if millivolts < 0. {negative}
            else if millivolts <= split {low}
            else {high};
        polynomial(coefficients, millivolts)
    }
}


/// full scale of the thermocouple ADC, in volts
pub const ADC_REFERENCE: f64 = 2.4;
/// full scale of the cold junction ADC, in millivolts
pub const COLD_REFERENCE: f64 = 2400.;
const ADC_STEPS: f64 = 65535.;

// cold junction sensor transfer curve: a*T² + b*T + c = V around 30 °C
const COLD_A: f64 = -0.00347;
const COLD_B: f64 = -10.888;
const COLD_C: f64 = 1777.3;
const COLD_CENTER: f64 = 30.;

/// cold junction sensor voltage in millivolts
pub fn cold_millivolts(raw: u16) -> f64 {
    f64::from(raw) * COLD_REFERENCE / ADC_STEPS
}
/// cold junction temperature in celsius from its ADC count
pub fn cold_celsius(raw: u16) -> f64 {
    let c = COLD_C - cold_millivolts(raw);
    (-COLD_B - (COLD_B * COLD_B - 4. * COLD_A * c).sqrt()) / (2. * COLD_A) + COLD_CENTER
}

/// calibrated voltage across a thermocouple in millivolts, before cold junction compensation
pub fn hot_millivolts(raw: u16, scale: f64, offset: f64, bias: f64) -> f64 {
    ((f64::from(raw) * ADC_REFERENCE / ADC_STEPS) - offset) / scale * 1000. - bias * 1000.
}

/// temperature of the plate internal sensors: a signed count of 1/16 °C
pub fn internal_celsius(raw: u16) -> f64 {
    f64::from(raw as i16) / 16.
}

/// thermocouple calibration of one channel
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChannelCalibration {
    pub scale: f64,
    pub offset: f64,
    pub bias: f64,
}

/// hot junction temperature in celsius from a thermocouple and cold junction reading
pub fn thermocouple_celsius(kind: Kind, thermocouple: u16, cold: u16, calibration: ChannelCalibration) -> f64 {
    let reference = kind.millivolts(cold_celsius(cold));
    let measured = hot_millivolts(thermocouple, calibration.scale, calibration.offset, calibration.bias);
    kind.celsius(measured + reference)
}

/// final displayed value: converted to the scale and truncated to 3 decimals
pub fn display(scale: Scale, celsius: f64) -> f64 {
    truncate3(scale.from_celsius(celsius))
}
