use bilge::prelude::*;
use packbytes::{FromBytes, ToBytes, ByteArray};

use crate::{Error, Result, bitfield_bytes};


/// size of the response buffer exchanged with the control channel
pub const BUFFER_SIZE: usize = 4096;

/// one request to a plate, built, submitted and dropped for each call
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// bus address, plate base + slot
    pub address: u8,
    /// command selector understood by the plate firmware
    pub opcode: u8,
    /// the two parameter bytes following the opcode
    pub params: [u8; 2],
    /// amount of data expected back
    pub reply: Reply,
    /// wait for the plate to acknowledge receipt
    pub ack: bool,
}
/// expected response length of a frame
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// nothing to read back
    None,
    /// exactly this number of bytes
    Fixed(usize),
    /// read until the plate terminates the reply, at most [BUFFER_SIZE] bytes
    Terminated,
}
impl Frame {
    pub fn new(address: u8, opcode: u8, p1: u8, p2: u8, reply: Reply, ack: bool) -> Self {
        Self {address, opcode, params: [p1, p2], reply, ack}
    }
    /// number of reply bytes the transport should hand back
    pub fn reply_len(&self) -> usize {
        match self.reply {
            Reply::None => 0,
            Reply::Fixed(size) => size.min(BUFFER_SIZE),
            Reply::Terminated => BUFFER_SIZE,
        }
    }
}
impl Reply {
    /// length request as the kernel module expects it: 0 none, n fixed, negative terminated
    pub fn request(self) -> i32 {
        match self {
            Reply::None => 0,
            Reply::Fixed(size) => i32::try_from(size.min(BUFFER_SIZE)).unwrap_or(BUFFER_SIZE as i32),
            Reply::Terminated => -1,
        }
    }
}


/**
    decode a fixed size big-endian value from the start of a reply

    the reply must hold at least the packed size of `T`, a shorter reply is a decoding failure rather than a partial result
*/
pub fn decode<T: FromBytes>(reply: &[u8]) -> Result<T> {
    let mut dst = T::Bytes::zeroed();
    let size = T::Bytes::SIZE;
    if reply.len() < size {
        return Err(Error::Truncated {expected: size, received: reply.len()});
    }
    dst.as_mut().copy_from_slice(&reply[.. size]);
    Ok(T::from_be_bytes(dst))
}

/// a thermocouple plate measurement: the thermocouple ADC followed by the cold junction ADC
#[derive(Copy, Clone, FromBytes, ToBytes, Debug, Default, PartialEq)]
pub struct ThermoSample {
    pub thermocouple: u16,
    pub cold: u16,
}
/// one oscilloscope time step when both channels are captured
#[derive(Copy, Clone, FromBytes, ToBytes, Debug, Default, PartialEq)]
pub struct SamplePair {
    pub first: u16,
    pub second: u16,
}


/// first parameter byte of stepper configuration commands
#[bitsize(8)]
#[derive(Copy, Clone, FromBits, DebugBits, PartialEq)]
pub struct StepperHead {
    /// bits 8 to 10 of the step rate
    pub rate_high: u3,
    _gap: u1,
    /// microstepping resolution, full step to eighth step
    pub resolution: u2,
    _spare: u1,
    /// counter clockwise rotation
    pub reverse: bool,
}

/// first parameter byte of DC motor speed commands
#[bitsize(8)]
#[derive(Copy, Clone, FromBits, DebugBits, PartialEq)]
pub struct DcHead {
    /// bits 8 and 9 of the scaled speed
    pub speed_high: u2,
    _gap: u5,
    /// counter clockwise rotation
    pub reverse: bool,
}

/// first parameter byte of the oscilloscope trigger command
#[bitsize(8)]
#[derive(Copy, Clone, FromBits, DebugBits, PartialEq)]
pub struct TriggerHead {
    /// bits 8 to 11 of the trigger level
    pub level_high: u4,
    _gap: u1,
    /// trigger on falling edge instead of rising
    pub falling: bool,
    /// normal triggering instead of auto
    pub normal: bool,
    /// 0 for channel 1, 1 for channel 2
    pub channel: u1,
}

/// signed step count as sent to stepper motors: sign then magnitude
#[bitsize(16)]
#[derive(Copy, Clone, FromBits, DebugBits, PartialEq)]
pub struct SignedSteps {
    pub magnitude: u15,
    pub negative: bool,
}
bitfield_bytes!(SignedSteps);

/**
    calibration constant as stored in plate flash

    the represented value is `sign * 10^(exponent - 64 + mantissa / 2^23)` with the mantissa taken as a 24 bit two's complement fraction
*/
#[bitsize(32)]
#[derive(Copy, Clone, FromBits, DebugBits, PartialEq)]
pub struct CalibrationWord {
    pub mantissa: u24,
    pub exponent: u7,
    pub negative: bool,
}
bitfield_bytes!(CalibrationWord);


/// implement the packbytes traits for a bilge bitfield through its underlying integer
#[macro_export]
macro_rules! bitfield_bytes {
    ($t:ty) => {

        impl packbytes::ToBytes for $t {
            type Bytes = [u8; core::mem::size_of::<$t>()];

            fn to_le_bytes(self) -> Self::Bytes {
                <$t as bilge::Bitsized>::ArbitraryInt::from(self).to_le_bytes()
            }
            fn to_be_bytes(self) -> Self::Bytes {
                <$t as bilge::Bitsized>::ArbitraryInt::from(self).to_be_bytes()
            }
        }
        impl packbytes::FromBytes for $t {
            type Bytes = [u8; core::mem::size_of::<$t>()];

            fn from_le_bytes(bytes: Self::Bytes) -> Self {
                <$t>::from(<$t as bilge::Bitsized>::ArbitraryInt::from_le_bytes(bytes))
            }
            fn from_be_bytes(bytes: Self::Bytes) -> Self {
                <$t>::from(<$t as bilge::Bitsized>::ArbitraryInt::from_be_bytes(bytes))
            }
        }
    };
}
