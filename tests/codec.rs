use rand::Rng;
use packbytes::{FromBytes, ToBytes};

use plateio::{
    Error,
    codec::{self, Direction, Resolution},
    command::{Frame, Reply, SignedSteps, BUFFER_SIZE},
    thermocouple::{self, Kind, Scale},
    };


#[test]
fn calibration_round_trip() {
    let mut rng = rand::rng();
    for exponent in codec::CALIBRATION_EXPONENTS {
        for sign in [1., -1.] {
            for _ in 0 .. 8 {
                let mantissa: f64 = rng.random_range(1. .. 10.);
                let value = sign * mantissa * 10f64.powi(exponent);
                let decoded = codec::decode_calibration(codec::encode_calibration(value).unwrap());
                let error = ((decoded - value) / value).abs();
                assert!(error < 1e-6, "{} decoded as {}", value, decoded);
            }
        }
    }
}

#[test]
fn calibration_edges() {
    // zero lands on the smallest representable magnitude
    let zero = codec::decode_calibration(codec::encode_calibration(0.).unwrap());
    assert!(zero.abs() < 1e-60);

    assert_eq!(codec::decode_calibration(codec::encode_calibration(1.).unwrap()), 1.);
    assert_eq!(codec::encode_calibration(1.).unwrap(), [0x40, 0, 0, 0]);
    assert_eq!(codec::encode_calibration(-1.).unwrap(), [0xC0, 0, 0, 0]);

    assert!(matches!(codec::encode_calibration(1e70), Err(Error::Calibration(_))));
    assert!(matches!(codec::encode_calibration(1e-65), Err(Error::Calibration(_))));
    assert!(matches!(codec::encode_calibration(f64::NAN), Err(Error::Calibration(_))));
    assert!(matches!(codec::encode_calibration(f64::INFINITY), Err(Error::Calibration(_))));
}

#[test]
fn negative_fraction() {
    // fraction -0.5 with exponent 0: 10^-0.5
    let bytes = [0x40, 0xC0, 0x00, 0x00];
    let value = codec::decode_calibration(bytes);
    assert!((value - 10f64.powf(-0.5)).abs() < 1e-9);
}

#[test]
fn analog_scaling() {
    assert_eq!(codec::daqc_adc(0x1000), 16.384);
    assert_eq!(codec::daqc_adc(0), 0.);
    assert_eq!(codec::daqc2_adc(0x8000, 1., 0.), 0.);
    assert_eq!(codec::daqc2_adc(0xFFFF, 1., 0.), 11.999);
    assert_eq!(codec::daqc2_adc(0, 1., 0.), -12.);
    assert_eq!(codec::daqc2_adc(0x8000, 2., 0.5), 0.5);

    assert_eq!(codec::daqc_dac_value(2.), 500);
    assert_eq!(codec::daqc_dac_value(4.095), 1023);
    assert_eq!(codec::daqc_dac_volts(1023), 4.094);
    assert_eq!(codec::duty_value(50.), 512);
    assert_eq!(codec::duty_percent(512), 50.048);
    assert_eq!(codec::truncate3(1.23456), 1.234);
    assert_eq!(codec::truncate3(-1.23456), -1.235);
}

#[test]
fn ramp_increments() {
    for rate in 1 ..= codec::STEPPER_RATE_MAX {
        assert_eq!(codec::stepper_increment(rate, 0.), 0);
    }
    for speed in 0 ..= codec::DC_SPEED_MAX {
        assert_eq!(codec::dc_increment(speed, 0.), 0);
    }
    assert_eq!(codec::stepper_increment(1000, 2.), 256);
    assert_eq!(codec::dc_increment(1023, 10.), 102);
}

#[test]
fn stepper_encoding() {
    assert_eq!(codec::stepper_head(Direction::Clockwise, Resolution::Full, 100), [0x00, 100]);
    assert_eq!(codec::stepper_head(Direction::CounterClockwise, Resolution::Eighth, 2000), [0x80 | 0x30 | 0x07, 0xD0]);
    assert_eq!(codec::stepper_head(Direction::Clockwise, Resolution::Half, 300), [0x10 | 0x01, 44]);

    assert_eq!(codec::signed_steps(1000), Some([0x03, 0xE8]));
    assert_eq!(codec::signed_steps(-1000), Some([0x83, 0xE8]));
    assert_eq!(codec::signed_steps(16383), Some([0x3F, 0xFF]));
    assert_eq!(codec::signed_steps(16384), None);
    assert_eq!(codec::signed_steps(-16383), Some([0xBF, 0xFF]));
    assert_eq!(codec::signed_steps(i32::MIN), None);
    assert_eq!(codec::unsigned_steps(40000), [0x9C, 0x40]);
}

#[test]
fn dc_encoding() {
    assert_eq!(codec::dc_speed(1, 100), 1023);
    assert_eq!(codec::dc_speed(1, 50), 512);
    assert_eq!(codec::dc_speed(3, 50), 320);
    assert_eq!(codec::dc_speed(4, 100), 639);
    assert_eq!(codec::dc_head(Direction::CounterClockwise, 1023), [0x83, 0xFF]);
    assert_eq!(codec::dc_head(Direction::Clockwise, 512), [0x02, 0x00]);
}

#[test]
fn trigger_encoding() {
    assert_eq!(codec::trigger(1, false, false, 0), [0, 0]);
    assert_eq!(codec::trigger(2, false, false, 0), [128, 0]);
    assert_eq!(codec::trigger(1, true, false, 0), [64, 0]);
    assert_eq!(codec::trigger(1, false, true, 0), [32, 0]);
    assert_eq!(codec::trigger(2, true, true, 4095), [128 + 64 + 32 + 15, 0xFF]);
    assert_eq!(codec::trigger(1, false, false, 0x234), [2, 0x34]);
}

#[test]
fn thermocouple_sanity() {
    // cold junction sensor near 25 °C
    let cold = 50016;
    let ambient = thermocouple::cold_celsius(cold);
    assert!((ambient - 25.).abs() < 0.1, "cold junction at {}", ambient);

    let neutral = thermocouple::ChannelCalibration {scale: 1., offset: 0., bias: 0.};
    for kind in [Kind::K, Kind::J] {
        // no voltage across the thermocouple, both junctions at the same temperature
        let hot = thermocouple::thermocouple_celsius(kind, 0, cold, neutral);
        assert!((hot - ambient).abs() < 1.5, "{:?} read {} at {}", kind, hot, ambient);
    }
    // positive voltage means a hotter junction
    let hot = thermocouple::thermocouple_celsius(Kind::K, 100, cold, neutral);
    assert!(hot > ambient + 50.);

    assert_eq!(thermocouple::internal_celsius(0x8000), -2048.);
    assert_eq!(thermocouple::internal_celsius(0x0190), 25.);
    assert_eq!(thermocouple::display(Scale::Fahrenheit, 100.), 212.);
    assert_eq!(thermocouple::display(Scale::Kelvin, 0.), 273.15);
}

#[test]
fn inverse_ranges() {
    // NIST reference points
    assert!((Kind::K.celsius(4.096) - 100.).abs() < 0.1);
    assert!((Kind::K.celsius(41.276) - 1000.).abs() < 0.1);
    assert!((Kind::K.celsius(-3.554) + 100.).abs() < 0.1);
    assert!((Kind::J.celsius(5.269) - 100.).abs() < 0.1);
    assert!((Kind::J.celsius(57.953) - 1000.).abs() < 0.1);
}

#[test]
fn reply_lengths() {
    assert_eq!(Reply::None.request(), 0);
    assert_eq!(Reply::Fixed(16).request(), 16);
    assert_eq!(Reply::Fixed(BUFFER_SIZE + 1).request(), BUFFER_SIZE as i32);
    assert_eq!(Reply::Terminated.request(), -1);

    let frame = Frame::new(34, 0xA2, 1, 0, Reply::Fixed(BUFFER_SIZE * 2), true);
    assert_eq!(frame.params, [1, 0]);
    assert_eq!(frame.reply_len(), BUFFER_SIZE);
    assert_eq!(Frame {reply: Reply::None, ..frame}.reply_len(), 0);
    assert_eq!(Frame {reply: Reply::Terminated, ..frame}.reply_len(), BUFFER_SIZE);
}

#[test]
fn bitfield_byte_order() {
    let steps = SignedSteps::from_be_bytes([0x83, 0xE8]);
    assert!(steps.negative());
    assert_eq!(steps.magnitude().value(), 1000);
    assert_eq!(steps.to_le_bytes(), [0xE8, 0x83]);
    assert_eq!(SignedSteps::from_le_bytes([0xE8, 0x83]), steps);
}
