use crate::{
    board::Operation,
    codec::{self, Direction, Resolution},
    opcodes,
    transport::Transport,
    };
use super::{Plate, Error, Result, operand};


/// last settings sent to a stepper motor
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Stepper {
    pub direction: Direction,
    pub resolution: Resolution,
    /// steps per second
    pub rate: u16,
    /// seconds to reach the rate
    pub acceleration: f64,
}

/// last settings sent to a DC motor
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct DcMotor {
    pub direction: Direction,
    /// driver value, 0 to [codec::DC_SPEED_MAX]
    pub speed: u16,
    /// seconds to reach the speed
    pub acceleration: f64,
}

/// motor settings of a MOTOR plate
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct MotorSetup {
    pub steppers: [Stepper; 2],
    pub dc: [DcMotor; 4],
}


fn stepper_index(motor: u8) -> Result<u8> {
    operand((1 ..= 2).contains(&motor), "stepper motor must be 1 or 2")?;
    Ok(motor - 1)
}
fn dc_index(motor: u8) -> Result<u8> {
    operand((1 ..= 4).contains(&motor), "DC motor must be 1 to 4")?;
    Ok(motor - 1)
}
fn sensor_index(sensor: u8) -> Result<u8> {
    operand((1 ..= 4).contains(&sensor), "sensor must be 1 to 4")?;
    Ok(sensor - 1)
}
fn acceleration(seconds: f64) -> Result<()> {
    operand((0. ..= codec::ACCELERATION_MAX).contains(&seconds), "acceleration must be 0 to 10 seconds")
}

impl<T: Transport> Plate<T> {
    /// motor settings, if any was sent
    pub fn motors(&self) -> Option<&MotorSetup> {
        self.motors.as_ref()
    }
    fn motors_mut(&mut self) -> &mut MotorSetup {
        self.motors.get_or_insert_with(MotorSetup::default)
    }

    /**
        configure a stepper motor

        sends the rate settings then the ramp increment. An acceleration of 0 disables the ramp.
    */
    pub fn stepper_config(&mut self, motor: u8, direction: Direction, resolution: Resolution, rate: u16, seconds: f64) -> Result<()> {
        self.admit(Operation::Stepper)?;
        let index = stepper_index(motor)?;
        operand((1 ..= codec::STEPPER_RATE_MAX).contains(&rate), "stepper rate must be 1 to 2000")?;
        acceleration(seconds)?;

        let [head, low] = codec::stepper_head(direction, resolution, rate);
        self.send(opcodes::STEPPER_CONFIG + index, head, low)?;
        let [high, low] = codec::stepper_increment(rate, seconds).to_be_bytes();
        self.send(opcodes::STEPPER_ACCELERATION + index, high, low)?;

        self.motors_mut().steppers[usize::from(index)] = Stepper {direction, resolution, rate, acceleration: seconds};
        Ok(())
    }
    pub fn stepper_direction(&mut self, motor: u8, direction: Direction) -> Result<()> {
        self.admit(Operation::Stepper)?;
        let index = stepper_index(motor)?;
        self.send(opcodes::STEPPER_DIRECTION + index, direction as u8, 0)?;
        self.motors_mut().steppers[usize::from(index)].direction = direction;
        Ok(())
    }
    /// change the step rate and resolution, keeping the direction
    pub fn stepper_rate(&mut self, motor: u8, rate: u16, resolution: Resolution) -> Result<()> {
        self.admit(Operation::Stepper)?;
        let index = stepper_index(motor)?;
        operand((1 ..= codec::STEPPER_RATE_MAX).contains(&rate), "stepper rate must be 1 to 2000")?;
        let direction = self.motors_mut().steppers[usize::from(index)].direction;
        let [head, low] = codec::stepper_head(direction, resolution, rate);
        self.send(opcodes::STEPPER_RATE + index, head, low)?;
        let stepper = &mut self.motors_mut().steppers[usize::from(index)];
        stepper.rate = rate;
        stepper.resolution = resolution;
        Ok(())
    }
    /// change the ramp time, relative to the last configured rate
    pub fn stepper_acceleration(&mut self, motor: u8, seconds: f64) -> Result<()> {
        self.admit(Operation::Stepper)?;
        let index = stepper_index(motor)?;
        acceleration(seconds)?;
        let rate = self.motors_mut().steppers[usize::from(index)].rate;
        let [high, low] = codec::stepper_increment(rate, seconds).to_be_bytes();
        self.send(opcodes::STEPPER_ACCELERATION + index, high, low)?;
        self.motors_mut().steppers[usize::from(index)].acceleration = seconds;
        Ok(())
    }
    /// move by a signed number of steps, negative steps go backwards
    pub fn stepper_move(&mut self, motor: u8, steps: i32) -> Result<()> {
        self.admit(Operation::Stepper)?;
        let index = stepper_index(motor)?;
        let [high, low] = codec::signed_steps(steps)
            .ok_or(Error::Operand("signed step count must be within ±16383"))?;
        self.send(opcodes::STEPPER_MOVE + index, high, low)
    }
    /// move by a number of steps in the configured direction
    pub fn stepper_move_unsigned(&mut self, motor: u8, steps: u16) -> Result<()> {
        self.admit(Operation::Stepper)?;
        let index = stepper_index(motor)?;
        let [high, low] = codec::unsigned_steps(steps);
        self.send(opcodes::STEPPER_MOVE_UNSIGNED + index, high, low)
    }
    /// run continuously until stopped
    pub fn stepper_jog(&mut self, motor: u8) -> Result<()> {
        self.admit(Operation::Stepper)?;
        let index = stepper_index(motor)?;
        self.send(opcodes::STEPPER_JOG + index, 0, 0)
    }
    /// decelerate to a stop, the motor stays energized
    pub fn stepper_stop(&mut self, motor: u8) -> Result<()> {
        self.admit(Operation::Stepper)?;
        let index = stepper_index(motor)?;
        self.send(opcodes::STEPPER_STOP + index, 0, 0)
    }
    /// stop immediately and release the coils
    pub fn stepper_off(&mut self, motor: u8) -> Result<()> {
        self.admit(Operation::Stepper)?;
        let index = stepper_index(motor)?;
        self.send(opcodes::STEPPER_OFF + index, 0, 0)
    }
    /// power the stepper drivers of the plate
    pub fn stepper_enable(&mut self) -> Result<()> {
        self.admit(Operation::Stepper)?;
        self.send(opcodes::STEPPER_ENABLE, 0, 0)
    }
    pub fn stepper_disable(&mut self) -> Result<()> {
        self.admit(Operation::Stepper)?;
        self.send(opcodes::STEPPER_DISABLE, 0, 0)
    }
    pub fn enable_stepper_stop_interrupt(&mut self, motor: u8) -> Result<()> {
        self.admit(Operation::Stepper)?;
        let index = stepper_index(motor)?;
        self.send(opcodes::STEPPER_STOP_INTERRUPT_ENABLE + index, 0, 0)
    }
    pub fn disable_stepper_stop_interrupt(&mut self, motor: u8) -> Result<()> {
        self.admit(Operation::Stepper)?;
        let index = stepper_index(motor)?;
        self.send(opcodes::STEPPER_STOP_INTERRUPT_DISABLE + index, 0, 0)
    }
    /// interrupt when the motor reaches its rate
    pub fn enable_stepper_steady_interrupt(&mut self, motor: u8) -> Result<()> {
        self.admit(Operation::Stepper)?;
        let index = stepper_index(motor)?;
        self.send(opcodes::STEPPER_STEADY_INTERRUPT_ENABLE + index, 0, 0)
    }
    pub fn disable_stepper_steady_interrupt(&mut self, motor: u8) -> Result<()> {
        self.admit(Operation::Stepper)?;
        let index = stepper_index(motor)?;
        self.send(opcodes::STEPPER_STEADY_INTERRUPT_DISABLE + index, 0, 0)
    }

    /**
        configure a DC motor, speed in percent of full scale

        motors 3 and 4 have their speed scaled down to 5/8, see [codec::dc_speed]
    */
    pub fn dc_config(&mut self, motor: u8, direction: Direction, percent: u8, seconds: f64) -> Result<()> {
        self.admit(Operation::DcMotor)?;
        let index = dc_index(motor)?;
        operand(percent <= 100, "DC motor speed must be 0 to 100")?;
        acceleration(seconds)?;

        let speed = codec::dc_speed(motor, percent);
        let [head, low] = codec::dc_head(direction, speed);
        self.send(opcodes::DC_CONFIG + index, head, low)?;
        let [high, low] = codec::dc_increment(speed, seconds).to_be_bytes();
        self.send(opcodes::DC_ACCELERATION + index, high, low)?;

        self.motors_mut().dc[usize::from(index)] = DcMotor {direction, speed, acceleration: seconds};
        Ok(())
    }
    pub fn dc_speed(&mut self, motor: u8, percent: u8) -> Result<()> {
        self.admit(Operation::DcMotor)?;
        let index = dc_index(motor)?;
        operand(percent <= 100, "DC motor speed must be 0 to 100")?;
        let speed = codec::dc_speed(motor, percent);
        let [high, low] = speed.to_be_bytes();
        self.send(opcodes::DC_SPEED + index, high, low)?;
        self.motors_mut().dc[usize::from(index)].speed = speed;
        Ok(())
    }
    pub fn dc_direction(&mut self, motor: u8, direction: Direction) -> Result<()> {
        self.admit(Operation::DcMotor)?;
        let index = dc_index(motor)?;
        self.send(opcodes::DC_DIRECTION + index, direction as u8, 0)?;
        self.motors_mut().dc[usize::from(index)].direction = direction;
        Ok(())
    }
    /// change the ramp time, relative to the last configured speed
    pub fn dc_acceleration(&mut self, motor: u8, seconds: f64) -> Result<()> {
        self.admit(Operation::DcMotor)?;
        let index = dc_index(motor)?;
        acceleration(seconds)?;
        let speed = self.motors_mut().dc[usize::from(index)].speed;
        let [high, low] = codec::dc_increment(speed, seconds).to_be_bytes();
        self.send(opcodes::DC_ACCELERATION + index, high, low)?;
        self.motors_mut().dc[usize::from(index)].acceleration = seconds;
        Ok(())
    }
    pub fn dc_start(&mut self, motor: u8) -> Result<()> {
        self.admit(Operation::DcMotor)?;
        let index = dc_index(motor)?;
        self.send(opcodes::DC_START + index, 0, 0)
    }
    pub fn dc_stop(&mut self, motor: u8) -> Result<()> {
        self.admit(Operation::DcMotor)?;
        let index = dc_index(motor)?;
        self.send(opcodes::DC_STOP + index, 0, 0)
    }
    pub fn enable_dc_stop_interrupt(&mut self, motor: u8) -> Result<()> {
        self.admit(Operation::DcMotor)?;
        let index = dc_index(motor)?;
        self.send(opcodes::DC_STOP_INTERRUPT_ENABLE + index, 0, 0)
    }
    pub fn disable_dc_stop_interrupt(&mut self, motor: u8) -> Result<()> {
        self.admit(Operation::DcMotor)?;
        let index = dc_index(motor)?;
        self.send(opcodes::DC_STOP_INTERRUPT_DISABLE + index, 0, 0)
    }
    pub fn enable_dc_steady_interrupt(&mut self, motor: u8) -> Result<()> {
        self.admit(Operation::DcMotor)?;
        let index = dc_index(motor)?;
        self.send(opcodes::DC_STEADY_INTERRUPT_ENABLE + index, 0, 0)
    }
    pub fn disable_dc_steady_interrupt(&mut self, motor: u8) -> Result<()> {
        self.admit(Operation::DcMotor)?;
        let index = dc_index(motor)?;
        self.send(opcodes::DC_STEADY_INTERRUPT_DISABLE + index, 0, 0)
    }

    /// state of the 4 sensor inputs, sensor 1 in bit 0
    pub fn sensors(&mut self) -> Result<u8> {
        self.admit(Operation::MotorSensor)?;
        self.query_byte(opcodes::SENSORS, 0, 0)
    }
    pub fn enable_sensor_interrupt(&mut self, sensor: u8) -> Result<()> {
        self.admit(Operation::MotorSensor)?;
        let index = sensor_index(sensor)?;
        self.send(opcodes::SENSOR_INTERRUPT_ENABLE, index, 0)
    }
    pub fn disable_sensor_interrupt(&mut self, sensor: u8) -> Result<()> {
        self.admit(Operation::MotorSensor)?;
        let index = sensor_index(sensor)?;
        self.send(opcodes::SENSOR_INTERRUPT_DISABLE, index, 0)
    }
    /// tachometer count of a sensor input over the long window
    pub fn tach_coarse(&mut self, sensor: u8) -> Result<u16> {
        self.admit(Operation::MotorSensor)?;
        let index = sensor_index(sensor)?;
        self.query_word(opcodes::TACH_COARSE + index, 0, 0)
    }
    /// tachometer count of a sensor input over the short window
    pub fn tach_fine(&mut self, sensor: u8) -> Result<u16> {
        self.admit(Operation::MotorSensor)?;
        let index = sensor_index(sensor)?;
        self.query_word(opcodes::TACH_FINE + index, 0, 0)
    }
}
