use crate::{
    board::Operation,
    codec::truncate3,
    command::{self, ThermoSample},
    opcodes,
    thermocouple::{self, Kind, Scale, ChannelCalibration},
    transport::Transport,
    };
use super::{Plate, Result, operand};


/// channels of a THERMO plate: 8 thermocouple inputs then 4 internal sensors
pub const TEMPERATURE_CHANNELS: usize = 12;
pub const THERMOCOUPLE_CHANNELS: usize = 8;

/// per channel settings of a THERMO plate, kept on the host side
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct ThermoSetup {
    pub scales: [Scale; TEMPERATURE_CHANNELS],
    pub kinds: [Kind; THERMOCOUPLE_CHANNELS],
}


fn temperature_index(channel: u8) -> Result<usize> {
    operand((1 ..= TEMPERATURE_CHANNELS).contains(&usize::from(channel)), "temperature channel must be 1 to 12")?;
    Ok(usize::from(channel) - 1)
}
fn thermocouple_index(channel: u8) -> Result<usize> {
    operand((1 ..= THERMOCOUPLE_CHANNELS).contains(&usize::from(channel)), "thermocouple channel must be 1 to 8")?;
    Ok(usize::from(channel) - 1)
}

impl<T: Transport> Plate<T> {
    fn thermo_mut(&mut self) -> &mut ThermoSetup {
        self.thermo.get_or_insert_with(ThermoSetup::default)
    }
    fn thermo_sample(&mut self, index: usize) -> Result<ThermoSample> {
        command::decode(&self.query(opcodes::TEMPERATURE, index as u8, 0, 4)?)
    }
    fn channel_calibration(&mut self, index: usize) -> Result<ChannelCalibration> {
        let calibration = self.calibration()?;
        Ok(ChannelCalibration {
            scale: calibration.scale[index],
            offset: calibration.offset[index],
            bias: calibration.bias,
        })
    }

    /// display scale of a channel, 1 to 12
    pub fn set_scale(&mut self, channel: u8, scale: Scale) -> Result<()> {
        self.admit(Operation::Temperature)?;
        let index = temperature_index(channel)?;
        self.thermo_mut().scales[index] = scale;
        Ok(())
    }
    pub fn scale(&mut self, channel: u8) -> Result<Scale> {
        self.admit(Operation::Temperature)?;
        let index = temperature_index(channel)?;
        Ok(self.thermo_mut().scales[index])
    }
    /// thermocouple type wired to a channel, 1 to 8
    pub fn set_thermocouple(&mut self, channel: u8, kind: Kind) -> Result<()> {
        self.admit(Operation::Temperature)?;
        let index = thermocouple_index(channel)?;
        self.thermo_mut().kinds[index] = kind;
        Ok(())
    }
    pub fn thermocouple(&mut self, channel: u8) -> Result<Kind> {
        self.admit(Operation::Temperature)?;
        let index = thermocouple_index(channel)?;
        Ok(self.thermo_mut().kinds[index])
    }

    /**
        temperature of a channel in its display scale

        channels 1 to 8 are thermocouples compensated with the cold junction, channels 9 to 12 are the plate internal sensors
    */
    pub fn temperature(&mut self, channel: u8) -> Result<f64> {
        self.admit(Operation::Temperature)?;
        let index = temperature_index(channel)?;
        let celsius = if index >= THERMOCOUPLE_CHANNELS {
            let sample = self.thermo_sample(index)?;
            thermocouple::internal_celsius(sample.thermocouple)
        } else {
            let calibration = self.channel_calibration(index)?;
            let sample = self.thermo_sample(index)?;
            let kind = self.thermo_mut().kinds[index];
            thermocouple::thermocouple_celsius(kind, sample.thermocouple, sample.cold, calibration)
        };
        let scale = self.thermo_mut().scales[index];
        Ok(thermocouple::display(scale, celsius))
    }
    /// cold junction temperature measured along a thermocouple channel, in its display scale
    pub fn cold_junction(&mut self, channel: u8) -> Result<f64> {
        self.admit(Operation::Temperature)?;
        let index = thermocouple_index(channel)?;
        let sample = self.thermo_sample(index)?;
        let scale = self.thermo_mut().scales[index];
        Ok(thermocouple::display(scale, thermocouple::cold_celsius(sample.cold)))
    }
    /// calibrated voltage across a thermocouple in millivolts, without cold junction compensation
    pub fn raw_voltage(&mut self, channel: u8) -> Result<f64> {
        self.admit(Operation::Temperature)?;
        let index = thermocouple_index(channel)?;
        let calibration = self.channel_calibration(index)?;
        let sample = self.thermo_sample(index)?;
        Ok(truncate3(thermocouple::hot_millivolts(
            sample.thermocouple,
            calibration.scale,
            calibration.offset,
            calibration.bias,
            )))
    }

    /// mains frequency the plate filters out, 50 or 60 Hz
    pub fn set_line_frequency(&mut self, hertz: u8) -> Result<()> {
        self.admit(Operation::Temperature)?;
        operand(hertz == 50 || hertz == 60, "line frequency must be 50 or 60")?;
        self.send(opcodes::LINE_FREQUENCY, hertz, 0)
    }
    /// average successive measurements on the plate
    pub fn set_smoothing(&mut self) -> Result<()> {
        self.admit(Operation::Temperature)?;
        self.send(opcodes::SMOOTH_SET, 0, 0)
    }
    pub fn clear_smoothing(&mut self) -> Result<()> {
        self.admit(Operation::Temperature)?;
        self.send(opcodes::SMOOTH_CLEAR, 0, 0)
    }
}
