/*!
    plate types and their capabilities

    the set of plate types is closed, each type has a fixed base bus address and a fixed set of supported operations given by [BoardType::supports]
*/

/// the six kinds of plates that can be stacked
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoardType {
    /// digital I/O and ADC plate
    Daqc,
    /// stepper and DC motor controller
    Motor,
    /// seven relays
    Relay,
    /// data acquisition plate with oscilloscope and function generator
    Daqc2,
    /// thermocouple reader
    Thermo,
    /// prototyping plate
    Tinker,
}

/// highest slot number a plate can be jumpered to
pub const MAX_SLOT: u8 = 7;

impl BoardType {
    pub const ALL: [BoardType; 6] = [
        BoardType::Daqc,
        BoardType::Motor,
        BoardType::Relay,
        BoardType::Daqc2,
        BoardType::Thermo,
        BoardType::Tinker,
        ];

    /// bus address of slot 0 for this plate type
    pub const fn base(self) -> u8 {
        match self {
            BoardType::Daqc => 8,
            BoardType::Motor => 16,
            BoardType::Relay => 24,
            BoardType::Daqc2 => 32,
            BoardType::Thermo => 40,
            BoardType::Tinker => 48,
        }
    }
    /// whether the transport must wait for hardware acknowledgment of commands
    pub const fn uses_ack(self) -> bool {
        matches!(self, BoardType::Daqc2 | BoardType::Thermo | BoardType::Tinker)
    }
    /// plate type from its base address, used as numeric plate id
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            8 => Some(BoardType::Daqc),
            16 => Some(BoardType::Motor),
            24 => Some(BoardType::Relay),
            32 => Some(BoardType::Daqc2),
            40 => Some(BoardType::Thermo),
            48 => Some(BoardType::Tinker),
            _ => None,
        }
    }
    /// bus address of the given slot, `None` if the slot cannot exist
    pub fn address(self, slot: u8) -> Option<u8> {
        if slot > MAX_SLOT
            {return None}
        Some(self.base() + slot)
    }

    /**
        capability table

        tells whether a plate of this type implements the given operation. Operations are rejected before reaching the bus when this returns false.
    */
    pub const fn supports(self, operation: Operation) -> bool {
        use BoardType::*;
        match operation {
            Operation::Identify
            | Operation::Reset
                => true,
            Operation::InterruptControl
                => matches!(self, Daqc | Daqc2 | Motor | Thermo),
            Operation::InterruptFlags
                => matches!(self, Daqc | Daqc2 | Thermo),
            Operation::MotorInterruptFlags
                => matches!(self, Motor),
            Operation::Led
                => matches!(self, Daqc | Motor | Relay | Thermo | Tinker),
            Operation::LedColor
                => matches!(self, Daqc2),
            Operation::Relay
                => matches!(self, Relay | Tinker),
            Operation::DigitalOutput
                => matches!(self, Daqc | Daqc2 | Tinker),
            Operation::DigitalOutputAll
                => matches!(self, Daqc | Daqc2),
            Operation::DigitalInput
                => matches!(self, Daqc | Daqc2 | Tinker),
            Operation::DigitalInputInterrupt
                => matches!(self, Daqc | Daqc2),
            Operation::PinMode
            | Operation::Servo
            | Operation::Range
                => matches!(self, Tinker),
            Operation::Switch
                => matches!(self, Daqc),
            Operation::Calibration
                => matches!(self, Daqc2 | Thermo),
            Operation::Adc
            | Operation::Dac
            | Operation::Pwm
                => matches!(self, Daqc | Daqc2),
            Operation::Frequency
            | Operation::FunctionGenerator
            | Operation::Oscilloscope
                => matches!(self, Daqc2),
            Operation::Stepper
            | Operation::DcMotor
            | Operation::MotorSensor
                => matches!(self, Motor),
            Operation::Temperature
                => matches!(self, Thermo),
        }
    }
}

/// families of plate operations, as checked by the capability table
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// address, identity string, revisions
    Identify,
    Reset,
    /// plate level interrupt enable and disable
    InterruptControl,
    InterruptFlags,
    /// the two interrupt flag banks of motor plates
    MotorInterruptFlags,
    /// single color led
    Led,
    /// multicolor led
    LedColor,
    Relay,
    /// single digital output bits
    DigitalOutput,
    /// whole digital output port
    DigitalOutputAll,
    DigitalInput,
    DigitalInputInterrupt,
    PinMode,
    Switch,
    /// calibration flash memory
    Calibration,
    Adc,
    Dac,
    Pwm,
    Frequency,
    FunctionGenerator,
    Oscilloscope,
    Stepper,
    DcMotor,
    MotorSensor,
    Temperature,
    Servo,
    Range,
}

impl Operation {
    pub const ALL: [Operation; 27] = [
        Operation::Identify,
        Operation::Reset,
        Operation::InterruptControl,
        Operation::InterruptFlags,
        Operation::MotorInterruptFlags,
        Operation::Led,
        Operation::LedColor,
        Operation::Relay,
        Operation::DigitalOutput,
        Operation::DigitalOutputAll,
        Operation::DigitalInput,
        Operation::DigitalInputInterrupt,
        Operation::PinMode,
        Operation::Switch,
        Operation::Calibration,
        Operation::Adc,
        Operation::Dac,
        Operation::Pwm,
        Operation::Frequency,
        Operation::FunctionGenerator,
        Operation::Oscilloscope,
        Operation::Stepper,
        Operation::DcMotor,
        Operation::MotorSensor,
        Operation::Temperature,
        Operation::Servo,
        Operation::Range,
        ];
}
