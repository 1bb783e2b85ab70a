/*!
    opcodes understood by plate firmwares

    each constant is the one-byte command selector sent after the plate address. The same byte can mean different things on different plate types, so constants are grouped by the plates that interpret them.

    Commands addressing one of several motors are given as the opcode of the first motor, the motor index is added to it.
*/

// common to every plate

/// echo the plate bus address
pub const ADDRESS: u8 = 0x00;
/// plate identification string, terminated by the plate
pub const IDENTITY: u8 = 0x01;
/// hardware revision byte
pub const HARDWARE_REVISION: u8 = 0x02;
/// firmware revision byte
pub const FIRMWARE_REVISION: u8 = 0x03;
pub const INTERRUPT_ENABLE: u8 = 0x04;
pub const INTERRUPT_DISABLE: u8 = 0x05;
/// interrupt flags, or first flag bank on motor plates
pub const INTERRUPT_FLAGS: u8 = 0x06;
/// second flag bank of motor plates
pub const INTERRUPT_FLAGS_HIGH: u8 = 0x07;
pub const RESET: u8 = 0x0F;

pub const LED_SET: u8 = 0x60;
pub const LED_CLEAR: u8 = 0x61;
pub const LED_TOGGLE: u8 = 0x62;
pub const LED_GET: u8 = 0x63;

/// calibration flash access, first parameter selects erase (0), write (1) or read (2)
pub const CALIBRATION: u8 = 0xFD;
pub const CALIBRATION_ERASE: u8 = 0;
pub const CALIBRATION_PUT: u8 = 1;
pub const CALIBRATION_GET: u8 = 2;

// relays on RELAY and TINKER

pub const RELAY_ON: u8 = 0x10;
pub const RELAY_OFF: u8 = 0x11;
pub const RELAY_TOGGLE: u8 = 0x12;
pub const RELAY_ALL: u8 = 0x13;
pub const RELAY_STATE: u8 = 0x14;

// digital outputs on DAQC and DAQC2

pub const DOUT_SET: u8 = 0x10;
pub const DOUT_CLEAR: u8 = 0x11;
pub const DOUT_TOGGLE: u8 = 0x12;
pub const DOUT_ALL: u8 = 0x13;
pub const DOUT_STATE: u8 = 0x14;

// digital inputs on DAQC, DAQC2 and TINKER

pub const DIN_BIT: u8 = 0x20;
pub const DIN_INTERRUPT_FALLING: u8 = 0x21;
pub const DIN_INTERRUPT_RISING: u8 = 0x22;
pub const DIN_INTERRUPT_BOTH: u8 = 0x23;
pub const DIN_INTERRUPT_DISABLE: u8 = 0x24;
pub const DIN_ALL: u8 = 0x25;

// TINKER specific

pub const TINKER_DOUT_SET: u8 = 0x26;
pub const TINKER_DOUT_CLEAR: u8 = 0x27;
pub const TINKER_DOUT_TOGGLE: u8 = 0x28;
/// pin mode, parameters are channel index and mode number
pub const TINKER_MODE: u8 = 0x90;
pub const TINKER_SERVO: u8 = 0x92;
/// ultrasonic range finder echo time in microseconds
pub const TINKER_RANGE: u8 = 0x94;

// analog on DAQC and DAQC2

pub const ADC: u8 = 0x30;
pub const ADC_ALL: u8 = 0x31;
/// DAQC pwm/dac output, channel added
pub const DAQC_PWM_SET: u8 = 0x40;
/// DAQC pwm/dac readback, channel added
pub const DAQC_PWM_GET: u8 = 0x42;
pub const DAQC2_DAC_SET: u8 = 0x40;
pub const DAQC2_DAC_GET: u8 = 0x41;
pub const DAQC2_PWM_SET: u8 = 0x42;
pub const DAQC2_PWM_GET: u8 = 0x43;
pub const DAQC2_FREQUENCY: u8 = 0xC0;

// DAQC switch

pub const SWITCH_STATE: u8 = 0x50;
pub const SWITCH_INTERRUPT_ENABLE: u8 = 0x51;
pub const SWITCH_INTERRUPT_DISABLE: u8 = 0x52;
pub const SWITCH_POWER_ENABLE: u8 = 0x53;
pub const SWITCH_POWER_DISABLE: u8 = 0x54;

// DAQC2 oscilloscope

pub const SCOPE_STOP: u8 = 0xA0;
pub const SCOPE_START: u8 = 0xA1;
pub const SCOPE_CHANNELS: u8 = 0xA2;
pub const SCOPE_SWEEP: u8 = 0xA3;
pub const SCOPE_TRACES: u8 = 0xA4;
pub const SCOPE_RUN: u8 = 0xA5;
pub const SCOPE_TRIGGER: u8 = 0xA6;
pub const SCOPE_TRIGGER_NOW: u8 = 0xA7;

// DAQC2 function generator

pub const FG_ON: u8 = 0xA8;
pub const FG_OFF: u8 = 0xA9;
pub const FG_FREQUENCY: u8 = 0xAA;
pub const FG_TYPE: u8 = 0xAB;
pub const FG_LEVEL: u8 = 0xAC;

// MOTOR steppers, motor index 0 or 1 added

pub const STEPPER_CONFIG: u8 = 0x10;
pub const STEPPER_ACCELERATION: u8 = 0x12;
pub const STEPPER_DIRECTION: u8 = 0x14;
pub const STEPPER_RATE: u8 = 0x16;
pub const STEPPER_MOVE: u8 = 0x18;
pub const STEPPER_MOVE_UNSIGNED: u8 = 0x1A;
pub const STEPPER_JOG: u8 = 0x1C;
pub const STEPPER_STOP: u8 = 0x1E;
pub const STEPPER_OFF: u8 = 0x20;
pub const STEPPER_ENABLE: u8 = 0x22;
pub const STEPPER_DISABLE: u8 = 0x23;
pub const STEPPER_STOP_INTERRUPT_ENABLE: u8 = 0x24;
pub const STEPPER_STOP_INTERRUPT_DISABLE: u8 = 0x26;
pub const STEPPER_STEADY_INTERRUPT_ENABLE: u8 = 0x28;
pub const STEPPER_STEADY_INTERRUPT_DISABLE: u8 = 0x2A;

// MOTOR DC motors, motor index 0 to 3 added

pub const DC_CONFIG: u8 = 0x30;
pub const DC_ACCELERATION: u8 = 0x34;
pub const DC_SPEED: u8 = 0x38;
pub const DC_DIRECTION: u8 = 0x3C;
pub const DC_START: u8 = 0x40;
pub const DC_STOP: u8 = 0x44;
pub const DC_STOP_INTERRUPT_ENABLE: u8 = 0x48;
pub const DC_STOP_INTERRUPT_DISABLE: u8 = 0x4C;
pub const DC_STEADY_INTERRUPT_ENABLE: u8 = 0x50;
pub const DC_STEADY_INTERRUPT_DISABLE: u8 = 0x54;

// MOTOR sensors

pub const SENSORS: u8 = 0x70;
pub const SENSOR_INTERRUPT_ENABLE: u8 = 0x71;
pub const SENSOR_INTERRUPT_DISABLE: u8 = 0x72;
/// coarse tachometer count, sensor index added
pub const TACH_COARSE: u8 = 0x74;
/// fine tachometer count, sensor index added
pub const TACH_FINE: u8 = 0x78;

// THERMO

/// thermocouple and cold junction ADC words for one channel
pub const TEMPERATURE: u8 = 0x70;
pub const LINE_FREQUENCY: u8 = 0x71;
pub const SMOOTH_SET: u8 = 0x72;
pub const SMOOTH_CLEAR: u8 = 0x73;
