use core::str::FromStr;

use crate::{
    board::{BoardType, Operation},
    codec::truncate3,
    opcodes,
    transport::Transport,
    };
use super::{Plate, Error, Result, operand};


/// edge triggering a digital input interrupt
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Edge {
    Falling,
    Rising,
    Both,
}

/// colors of the DAQC2 led
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Off = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}
impl Color {
    /// color from the low 3 bits of a led state byte
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x7 {
            0 => Color::Off,
            1 => Color::Red,
            2 => Color::Green,
            3 => Color::Yellow,
            4 => Color::Blue,
            5 => Color::Magenta,
            6 => Color::Cyan,
            _ => Color::White,
        }
    }
}

/// function of a TINKER pin
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PinMode {
    Din = 0,
    Dout = 1,
    Button = 2,
    Pwm = 3,
    /// ultrasonic range finder on a pin pair
    Range = 4,
    Temp = 5,
    Servo = 6,
    RgbLed = 7,
    Motion = 8,
}
impl PinMode {
    /// modes needing the extended pwm driver, only wired to the first 6 pins
    pub fn needs_driver(self) -> bool {
        matches!(self, PinMode::Pwm)
    }
}
impl FromStr for PinMode {
    type Err = Error;
    fn from_str(name: &str) -> Result<Self> {
        Ok(match name {
            "din" => PinMode::Din,
            "dout" => PinMode::Dout,
            "button" => PinMode::Button,
            "pwm" | "led" => PinMode::Pwm,
            "range" => PinMode::Range,
            "temp" => PinMode::Temp,
            "servo" => PinMode::Servo,
            "rgbled" => PinMode::RgbLed,
            "motion" => PinMode::Motion,
            _ => return Err(Error::Operand("unknown pin mode")),
        })
    }
}

/// distance unit of the range finder
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Unit {
    Centimeters,
    Inches,
}
impl Unit {
    /// echo time in microseconds per unit of distance
    fn echo_time(self) -> f64 {
        match self {
            Unit::Centimeters => 58.,
            Unit::Inches => 148.,
        }
    }
}

/// index of a TINKER pin pair given as two digits (12, 34, 56 or 78)
pub fn pair_index(pair: u8) -> Option<u8> {
    match pair {
        12 | 34 | 56 | 78 => Some((pair >> 1) / 10),
        _ => None,
    }
}


impl<T: Transport> Plate<T> {
    /// relay number as sent to the plate
    fn relay_index(&self, relay: u8) -> Result<u8> {
        match self.board {
            BoardType::Relay => {
                operand((1 ..= 7).contains(&relay), "relay must be 1 to 7")?;
                Ok(relay)
            },
            BoardType::Tinker => {
                operand((1 ..= 2).contains(&relay), "relay must be 1 or 2")?;
                Ok(relay - 1)
            },
            board => Err(Error::Unsupported {board, operation: Operation::Relay}),
        }
    }
    pub fn relay_on(&mut self, relay: u8) -> Result<()> {
        self.admit(Operation::Relay)?;
        let index = self.relay_index(relay)?;
        self.send(opcodes::RELAY_ON, index, 0)
    }
    pub fn relay_off(&mut self, relay: u8) -> Result<()> {
        self.admit(Operation::Relay)?;
        let index = self.relay_index(relay)?;
        self.send(opcodes::RELAY_OFF, index, 0)
    }
    pub fn relay_toggle(&mut self, relay: u8) -> Result<()> {
        self.admit(Operation::Relay)?;
        let index = self.relay_index(relay)?;
        self.send(opcodes::RELAY_TOGGLE, index, 0)
    }
    /// set all relays at once from a bit mask, relay 1 in bit 0
    pub fn relay_all(&mut self, relays: u8) -> Result<()> {
        self.admit(Operation::Relay)?;
        match self.board {
            BoardType::Tinker => operand(relays <= 0b11, "relay mask must be 0 to 3")?,
            _ => operand(relays <= 0x7F, "relay mask must be 0 to 127")?,
        }
        self.send(opcodes::RELAY_ALL, relays, 0)
    }
    /// whether the given relay is closed
    pub fn relay_state(&mut self, relay: u8) -> Result<bool> {
        self.admit(Operation::Relay)?;
        let index = self.relay_index(relay)?;
        match self.board {
            BoardType::Tinker => Ok(self.query_byte(opcodes::RELAY_STATE, index, 0)? != 0),
            _ => Ok((self.query_byte(opcodes::RELAY_STATE, 0, 0)? >> (index - 1)) & 1 != 0),
        }
    }

    /// opcode and bit index of a digital output bit command
    fn dout_target(&self, bit: u8, opcode: u8, tinker: u8) -> Result<(u8, u8)> {
        match self.board {
            BoardType::Daqc => {
                operand(bit <= 6, "output bit must be 0 to 6")?;
                Ok((opcode, bit))
            },
            BoardType::Daqc2 => {
                operand(bit <= 7, "output bit must be 0 to 7")?;
                Ok((opcode, bit))
            },
            BoardType::Tinker => {
                operand((1 ..= 8).contains(&bit), "output bit must be 1 to 8")?;
                Ok((tinker, bit - 1))
            },
            board => Err(Error::Unsupported {board, operation: Operation::DigitalOutput}),
        }
    }
    pub fn set_dout(&mut self, bit: u8) -> Result<()> {
        self.admit(Operation::DigitalOutput)?;
        let (opcode, bit) = self.dout_target(bit, opcodes::DOUT_SET, opcodes::TINKER_DOUT_SET)?;
        self.send(opcode, bit, 0)
    }
    pub fn clear_dout(&mut self, bit: u8) -> Result<()> {
        self.admit(Operation::DigitalOutput)?;
        let (opcode, bit) = self.dout_target(bit, opcodes::DOUT_CLEAR, opcodes::TINKER_DOUT_CLEAR)?;
        self.send(opcode, bit, 0)
    }
    pub fn toggle_dout(&mut self, bit: u8) -> Result<()> {
        self.admit(Operation::DigitalOutput)?;
        let (opcode, bit) = self.dout_target(bit, opcodes::DOUT_TOGGLE, opcodes::TINKER_DOUT_TOGGLE)?;
        self.send(opcode, bit, 0)
    }
    /// set the whole output port
    pub fn dout_all(&mut self, value: u8) -> Result<()> {
        self.admit(Operation::DigitalOutputAll)?;
        if self.board == BoardType::Daqc {
            operand(value <= 0x7F, "DAQC outputs must be 0 to 127")?;
        }
        self.send(opcodes::DOUT_ALL, value, 0)
    }
    pub fn dout_state(&mut self) -> Result<u8> {
        self.admit(Operation::DigitalOutputAll)?;
        self.query_byte(opcodes::DOUT_STATE, 0, 0)
    }

    /// state of a digital input, bits are 1 to 8 on TINKER and 0 to 7 otherwise
    pub fn din_bit(&mut self, bit: u8) -> Result<bool> {
        self.admit(Operation::DigitalInput)?;
        let bit = match self.board {
            BoardType::Tinker => {
                operand((1 ..= 8).contains(&bit), "input bit must be 1 to 8")?;
                bit - 1
            },
            _ => {
                operand(bit <= 7, "input bit must be 0 to 7")?;
                bit
            },
        };
        Ok(self.query_byte(opcodes::DIN_BIT, bit, 0)? != 0)
    }
    pub fn din_all(&mut self) -> Result<u8> {
        self.admit(Operation::DigitalInput)?;
        self.query_byte(opcodes::DIN_ALL, 0, 0)
    }
    pub fn enable_din_interrupt(&mut self, bit: u8, edge: Edge) -> Result<()> {
        self.admit(Operation::DigitalInputInterrupt)?;
        operand(bit <= 7, "input bit must be 0 to 7")?;
        let opcode = match edge {
            Edge::Falling => opcodes::DIN_INTERRUPT_FALLING,
            Edge::Rising => opcodes::DIN_INTERRUPT_RISING,
            Edge::Both => opcodes::DIN_INTERRUPT_BOTH,
        };
        self.send(opcode, bit, 0)
    }
    pub fn disable_din_interrupt(&mut self, bit: u8) -> Result<()> {
        self.admit(Operation::DigitalInputInterrupt)?;
        operand(bit <= 7, "input bit must be 0 to 7")?;
        self.send(opcodes::DIN_INTERRUPT_DISABLE, bit, 0)
    }

    /**
        configure a TINKER pin

        `channel` is the pin number 1 to 8, or for [PinMode::Range] a pin pair written 12, 34, 56 or 78
    */
    pub fn set_mode(&mut self, channel: u8, mode: PinMode) -> Result<()> {
        self.admit(Operation::PinMode)?;
        let index = match mode {
            PinMode::Range => pair_index(channel)
                .ok_or(Error::Operand("range channel pair must be 12, 34, 56 or 78"))?,
            _ => {
                operand((1 ..= 8).contains(&channel), "channel must be 1 to 8")?;
                channel - 1
            },
        };
        operand(!(mode.needs_driver() && index >= 6), "this channel cannot support this mode")?;
        self.send(opcodes::TINKER_MODE, index, mode as u8)
    }
    /// same as [Self::set_mode] with the mode given by name, such as `"din"` or `"servo"`
    pub fn set_mode_named(&mut self, channel: u8, mode: &str) -> Result<()> {
        self.admit(Operation::PinMode)?;
        self.set_mode(channel, mode.parse()?)
    }
    /// move a servo on a TINKER pin to an angle in degrees
    pub fn set_servo(&mut self, channel: u8, angle: f64) -> Result<()> {
        self.admit(Operation::Servo)?;
        operand((1 ..= 8).contains(&channel), "channel must be 1 to 8")?;
        operand((0. ..= 180.).contains(&angle), "servo angle must be 0 to 180")?;
        self.send(opcodes::TINKER_SERVO, channel - 1, angle.round() as u8)
    }
    /// distance measured by a range finder on a TINKER pin pair
    pub fn range(&mut self, pair: u8, unit: Unit) -> Result<f64> {
        self.admit(Operation::Range)?;
        let index = pair_index(pair)
            .ok_or(Error::Operand("range channel pair must be 12, 34, 56 or 78"))?;
        let echo = self.query_word(opcodes::TINKER_RANGE, index, 0)?;
        Ok(truncate3(f64::from(echo) / unit.echo_time()))
    }

    pub fn set_led(&mut self) -> Result<()> {
        self.admit(Operation::Led)?;
        self.send(opcodes::LED_SET, 0, 0)
    }
    pub fn clear_led(&mut self) -> Result<()> {
        self.admit(Operation::Led)?;
        self.send(opcodes::LED_CLEAR, 0, 0)
    }
    pub fn toggle_led(&mut self) -> Result<()> {
        self.admit(Operation::Led)?;
        self.send(opcodes::LED_TOGGLE, 0, 0)
    }
    pub fn led(&mut self) -> Result<bool> {
        self.admit(Operation::Led)?;
        Ok(self.query_byte(opcodes::LED_GET, 0, 0)? != 0)
    }
    pub fn set_led_color(&mut self, color: Color) -> Result<()> {
        self.admit(Operation::LedColor)?;
        self.send(opcodes::LED_SET, color as u8, 0)
    }
    pub fn clear_led_color(&mut self, color: Color) -> Result<()> {
        self.admit(Operation::LedColor)?;
        self.send(opcodes::LED_CLEAR, color as u8, 0)
    }
    pub fn toggle_led_color(&mut self, color: Color) -> Result<()> {
        self.admit(Operation::LedColor)?;
        self.send(opcodes::LED_TOGGLE, color as u8, 0)
    }
    pub fn led_color(&mut self) -> Result<Color> {
        self.admit(Operation::LedColor)?;
        Ok(Color::from_bits(self.query_byte(opcodes::LED_GET, 0, 0)?))
    }

    /// whether the DAQC switch is closed
    pub fn switch_state(&mut self) -> Result<bool> {
        self.admit(Operation::Switch)?;
        Ok(self.query_byte(opcodes::SWITCH_STATE, 0, 0)? != 0)
    }
    pub fn enable_switch_interrupt(&mut self) -> Result<()> {
        self.admit(Operation::Switch)?;
        self.send(opcodes::SWITCH_INTERRUPT_ENABLE, 0, 0)
    }
    pub fn disable_switch_interrupt(&mut self) -> Result<()> {
        self.admit(Operation::Switch)?;
        self.send(opcodes::SWITCH_INTERRUPT_DISABLE, 0, 0)
    }
    pub fn enable_switch_power(&mut self) -> Result<()> {
        self.admit(Operation::Switch)?;
        self.send(opcodes::SWITCH_POWER_ENABLE, 0, 0)
    }
    pub fn disable_switch_power(&mut self) -> Result<()> {
        self.admit(Operation::Switch)?;
        self.send(opcodes::SWITCH_POWER_DISABLE, 0, 0)
    }
}
