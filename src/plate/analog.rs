use crate::{
    board::{BoardType, Operation},
    codec::{self, truncate3, word},
    opcodes,
    transport::Transport,
    };
use super::{Plate, Result, operand};


/// number of calibrated channels
pub const CALIBRATED_CHANNELS: usize = 8;
/// flash pointer of the bias constant, after the scale and offset of every channel
pub const CALIBRATION_BIAS: u8 = 64;

/**
    calibration constants of a DAQC2 or THERMO plate

    they are stored in plate flash as 4-byte constants, channel `i` scale at `8*i`, its offset at `8*i + 4` and the common bias at [CALIBRATION_BIAS]
*/
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Calibration {
    pub scale: [f64; CALIBRATED_CHANNELS],
    pub offset: [f64; CALIBRATED_CHANNELS],
    pub bias: f64,
}
impl Default for Calibration {
    /// no correction
    fn default() -> Self {
        Self {
            scale: [1.; CALIBRATED_CHANNELS],
            offset: [0.; CALIBRATED_CHANNELS],
            bias: 0.,
        }
    }
}
impl Calibration {
    /// flash pointers of a channel scale and offset
    pub fn pointers(channel: usize) -> (u8, u8) {
        let base = (8 * channel) as u8;
        (base, base + 4)
    }
    /// flash image of these constants, in pointer order
    pub fn to_flash(&self) -> Result<Vec<u8>> {
        let mut image = Vec::with_capacity(usize::from(CALIBRATION_BIAS) + 4);
        for channel in 0 .. CALIBRATED_CHANNELS {
            image.extend_from_slice(&codec::encode_calibration(self.scale[channel])?);
            image.extend_from_slice(&codec::encode_calibration(self.offset[channel])?);
        }
        image.extend_from_slice(&codec::encode_calibration(self.bias)?);
        Ok(image)
    }
}

/// waveforms of the DAQC2 function generator
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine = 1,
    Triangle = 2,
    Square = 3,
    SawtoothRising = 4,
    SawtoothFalling = 5,
    Noise = 6,
    Sinc = 7,
}

/// highest DAC output voltage
pub const DAC_MAX: f64 = 4.095;


impl<T: Transport> Plate<T> {
    /// read one byte of calibration flash
    pub fn cal_get_byte(&mut self, pointer: u8) -> Result<u8> {
        self.admit(Operation::Calibration)?;
        self.query_byte(opcodes::CALIBRATION, opcodes::CALIBRATION_GET, pointer)
    }
    /// append one byte to calibration flash
    pub fn cal_put_byte(&mut self, data: u8) -> Result<()> {
        self.admit(Operation::Calibration)?;
        self.send(opcodes::CALIBRATION, opcodes::CALIBRATION_PUT, data)
    }
    /// erase the calibration flash block, following writes start at its beginning
    pub fn cal_erase_block(&mut self) -> Result<()> {
        self.admit(Operation::Calibration)?;
        self.send(opcodes::CALIBRATION, opcodes::CALIBRATION_ERASE, 0)
    }

    fn cal_constant(&mut self, pointer: u8) -> Result<f64> {
        let mut bytes = [0; 4];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.cal_get_byte(pointer + i as u8)?;
        }
        Ok(codec::decode_calibration(bytes))
    }
    fn read_calibration(&mut self) -> Result<Calibration> {
        let mut calibration = Calibration::default();
        for channel in 0 .. CALIBRATED_CHANNELS {
            let (scale, offset) = Calibration::pointers(channel);
            calibration.scale[channel] = self.cal_constant(scale)?;
            calibration.offset[channel] = self.cal_constant(offset)?;
        }
        calibration.bias = self.cal_constant(CALIBRATION_BIAS)?;
        Ok(calibration)
    }
    /// calibration constants, read from flash on first use
    pub fn calibration(&mut self) -> Result<&Calibration> {
        self.admit(Operation::Calibration)?;
        let calibration = match self.calibration.take() {
            Some(calibration) => calibration,
            None => self.read_calibration()?,
        };
        Ok(self.calibration.insert(calibration))
    }
    /// replace the calibration flash content with the given constants
    pub fn write_calibration(&mut self, calibration: Calibration) -> Result<()> {
        self.admit(Operation::Calibration)?;
        let image = calibration.to_flash()?;
        self.calibration = None;
        self.cal_erase_block()?;
        for byte in image {
            self.cal_put_byte(byte)?;
        }
        self.calibration = Some(calibration);
        Ok(())
    }

    /// scale a raw ADC count of the given channel to volts
    fn adc_volts(&mut self, channel: u8, raw: u16) -> Result<f64> {
        match self.board {
            BoardType::Daqc2 => {
                let (scale, offset) = match usize::from(channel) {
                    channel if channel < CALIBRATED_CHANNELS => {
                        let calibration = self.calibration()?;
                        (calibration.scale[channel], calibration.offset[channel])
                    },
                    _ => (1., 0.),
                };
                Ok(codec::daqc2_adc(raw, scale, offset))
            },
            _ => Ok(codec::daqc_adc(raw)),
        }
    }
    /// voltage on an ADC channel, 0 to 7, channel 8 being the plate supply
    pub fn adc(&mut self, channel: u8) -> Result<f64> {
        self.admit(Operation::Adc)?;
        operand(channel <= 8, "ADC channel must be 0 to 8")?;
        if self.board == BoardType::Daqc2 {
            self.calibration()?;
        }
        let raw = self.query_word(opcodes::ADC, channel, 0)?;
        self.adc_volts(channel, raw)
    }
    /// voltage on ADC channels 0 to 7
    pub fn adc_all(&mut self) -> Result<[f64; 8]> {
        self.admit(Operation::Adc)?;
        if self.board == BoardType::Daqc2 {
            self.calibration()?;
        }
        let reply = self.query(opcodes::ADC_ALL, 0, 0, 16)?;
        let mut volts = [0.; 8];
        for (channel, value) in volts.iter_mut().enumerate() {
            let raw = word(reply[2*channel], reply[2*channel + 1]);
            *value = self.adc_volts(channel as u8, raw)?;
        }
        Ok(volts)
    }

    /// set an analog output, channels 0 to 1 on DAQC and 0 to 3 on DAQC2
    pub fn set_dac(&mut self, channel: u8, volts: f64) -> Result<()> {
        self.admit(Operation::Dac)?;
        operand((0. ..= DAC_MAX).contains(&volts), "DAC voltage must be 0 to 4.095")?;
        match self.board {
            BoardType::Daqc => {
                operand(channel <= 1, "DAC channel must be 0 or 1")?;
                let [high, low] = codec::daqc_dac_value(volts).to_be_bytes();
                self.send(opcodes::DAQC_PWM_SET + channel, high, low)
            },
            _ => {
                operand(channel <= 3, "DAC channel must be 0 to 3")?;
                let [high, low] = ((volts * 1000.).round() as u16).to_be_bytes();
                self.send(opcodes::DAQC2_DAC_SET, (channel << 4) | (high & 0xF), low)
            },
        }
    }
    /// current voltage of an analog output
    pub fn dac(&mut self, channel: u8) -> Result<f64> {
        self.admit(Operation::Dac)?;
        match self.board {
            BoardType::Daqc => {
                operand(channel <= 1, "DAC channel must be 0 or 1")?;
                let raw = self.query_word(opcodes::DAQC_PWM_GET + channel, 0, 0)?;
                Ok(codec::daqc_dac_volts(raw))
            },
            _ => {
                operand(channel <= 3, "DAC channel must be 0 to 3")?;
                let millivolts = self.query_word(opcodes::DAQC2_DAC_GET, channel, 0)?;
                Ok(truncate3(f64::from(millivolts) / 1000.))
            },
        }
    }

    /// set a pwm output duty cycle in percent, channels 0 and 1
    pub fn set_pwm(&mut self, channel: u8, duty: f64) -> Result<()> {
        self.admit(Operation::Pwm)?;
        operand(channel <= 1, "PWM channel must be 0 or 1")?;
        operand((0. ..= 100.).contains(&duty), "PWM duty cycle must be 0 to 100")?;
        let [high, low] = codec::duty_value(duty).to_be_bytes();
        match self.board {
            BoardType::Daqc => self.send(opcodes::DAQC_PWM_SET + channel, high, low),
            _ => self.send(opcodes::DAQC2_PWM_SET, (channel << 4) | high, low),
        }
    }
    /// current duty cycle of a pwm output in percent
    pub fn pwm(&mut self, channel: u8) -> Result<f64> {
        self.admit(Operation::Pwm)?;
        operand(channel <= 1, "PWM channel must be 0 or 1")?;
        let raw = match self.board {
            BoardType::Daqc => self.query_word(opcodes::DAQC_PWM_GET + channel, 0, 0)?,
            _ => self.query_word(opcodes::DAQC2_PWM_GET, channel, 0)?,
        };
        Ok(codec::duty_percent(raw))
    }

    /// frequency measured on the DAQC2 counter input, in Hz
    pub fn frequency(&mut self) -> Result<u16> {
        self.admit(Operation::Frequency)?;
        self.query_word(opcodes::DAQC2_FREQUENCY, 0, 0)
    }

    fn fg_channel(channel: u8) -> Result<()> {
        operand((1 ..= 2).contains(&channel), "function generator channel must be 1 or 2")
    }
    pub fn fg_on(&mut self, channel: u8) -> Result<()> {
        self.admit(Operation::FunctionGenerator)?;
        Self::fg_channel(channel)?;
        self.send(opcodes::FG_ON, channel, 0)
    }
    pub fn fg_off(&mut self, channel: u8) -> Result<()> {
        self.admit(Operation::FunctionGenerator)?;
        Self::fg_channel(channel)?;
        self.send(opcodes::FG_OFF, channel, 0)
    }
    /// output frequency of a function generator channel, 10 Hz to 10 kHz
    pub fn fg_frequency(&mut self, channel: u8, frequency: u16) -> Result<()> {
        self.admit(Operation::FunctionGenerator)?;
        Self::fg_channel(channel)?;
        operand((10 ..= 10_000).contains(&frequency), "function generator frequency must be 10 to 10000")?;
        let [high, low] = frequency.to_be_bytes();
        self.send(opcodes::FG_FREQUENCY, ((channel - 1) << 7) | high, low)
    }
    pub fn fg_type(&mut self, channel: u8, waveform: Waveform) -> Result<()> {
        self.admit(Operation::FunctionGenerator)?;
        Self::fg_channel(channel)?;
        self.send(opcodes::FG_TYPE, channel, waveform as u8)
    }
    /// output amplitude of a function generator channel, from 1 (lowest) to 4 (full)
    pub fn fg_level(&mut self, channel: u8, level: u8) -> Result<()> {
        self.admit(Operation::FunctionGenerator)?;
        Self::fg_channel(channel)?;
        operand((1 ..= 4).contains(&level), "function generator level must be 1 to 4")?;
        self.send(opcodes::FG_LEVEL, channel, level)
    }
}
