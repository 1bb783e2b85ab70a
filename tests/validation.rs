use plateio::{
    BoardType, Operation, Plate, Error,
    codec::{Direction, Resolution},
    plate::{Color, Edge, PinMode, Trigger, Unit, Waveform},
    sim::Stack,
    thermocouple::{Kind, Scale},
    transport::Transport,
    };


fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// run some operations of the given family, collecting their results
fn attempt<T: Transport>(plate: &mut Plate<T>, operation: Operation) -> Vec<plateio::Result<()>> {
    fn drop_value<V>(result: plateio::Result<V>) -> plateio::Result<()> {
        result.map(|_| ())
    }
    match operation {
        Operation::Identify => vec![drop_value(plate.identity()), drop_value(plate.address())],
        Operation::Reset => vec![plate.reset()],
        Operation::InterruptControl => vec![plate.interrupt_enable(), plate.interrupt_disable()],
        Operation::InterruptFlags => vec![drop_value(plate.interrupt_flags())],
        Operation::MotorInterruptFlags => vec![drop_value(plate.motor_interrupt_flags(0))],
        Operation::Led => vec![plate.set_led(), plate.toggle_led(), drop_value(plate.led())],
        Operation::LedColor => vec![plate.set_led_color(Color::Cyan), drop_value(plate.led_color())],
        Operation::Relay => vec![plate.relay_on(1), plate.relay_off(1), drop_value(plate.relay_state(1))],
        Operation::DigitalOutput => vec![plate.set_dout(1), plate.clear_dout(1), plate.toggle_dout(1)],
        Operation::DigitalOutputAll => vec![plate.dout_all(3), drop_value(plate.dout_state())],
        Operation::DigitalInput => vec![drop_value(plate.din_bit(1)), drop_value(plate.din_all())],
        Operation::DigitalInputInterrupt => vec![plate.enable_din_interrupt(1, Edge::Both), plate.disable_din_interrupt(1)],
        Operation::PinMode => vec![plate.set_mode(1, PinMode::Dout)],
        Operation::Switch => vec![drop_value(plate.switch_state()), plate.enable_switch_power()],
        Operation::Calibration => vec![drop_value(plate.cal_get_byte(0))],
        Operation::Adc => vec![drop_value(plate.adc(0)), drop_value(plate.adc_all())],
        Operation::Dac => vec![plate.set_dac(0, 1.), drop_value(plate.dac(0))],
        Operation::Pwm => vec![plate.set_pwm(0, 50.), drop_value(plate.pwm(0))],
        Operation::Frequency => vec![drop_value(plate.frequency())],
        Operation::FunctionGenerator => vec![plate.fg_on(1), plate.fg_type(1, Waveform::Sine)],
        Operation::Oscilloscope => vec![plate.start_scope(), plate.set_scope_trigger(Trigger::default())],
        Operation::Stepper => vec![plate.stepper_config(1, Direction::Clockwise, Resolution::Half, 100, 1.), plate.stepper_jog(1)],
        Operation::DcMotor => vec![plate.dc_config(1, Direction::CounterClockwise, 50, 1.), plate.dc_start(1)],
        Operation::MotorSensor => vec![drop_value(plate.sensors()), drop_value(plate.tach_fine(1))],
        Operation::Temperature => vec![drop_value(plate.temperature(1)), plate.set_scale(1, Scale::Kelvin)],
        Operation::Servo => vec![plate.set_servo(1, 90.)],
        Operation::Range => vec![drop_value(plate.range(12, Unit::Centimeters))],
    }
}

#[test]
fn unsupported_operations_stay_local() {
    init();
    for board in BoardType::ALL {
        for operation in Operation::ALL {
            let mut stack = Stack::new().with(board, 0);
            let mut plate = Plate::open(&mut stack, board, 0);
            let results = attempt(&mut plate, operation);

            if board.supports(operation) {
                for result in results {
                    assert!(
                        ! matches!(result, Err(Error::Unsupported {..})),
                        "{:?} on {:?} gave {:?}", operation, board, result);
                }
            }
            else {
                for result in results {
                    assert_eq!(result, Err(Error::Unsupported {board, operation}), "{:?} on {:?}", operation, board);
                }
                // only the address confirmation went on the bus
                assert_eq!(plate.transport().frames().len(), 1, "{:?} on {:?}", operation, board);
            }
        }
    }
}

#[test]
fn operand_ranges() {
    init();
    let mut stack = Stack::new()
        .with(BoardType::Relay, 0)
        .with(BoardType::Tinker, 0)
        .with(BoardType::Daqc, 0)
        .with(BoardType::Daqc2, 0)
        .with(BoardType::Motor, 0)
        .with(BoardType::Thermo, 0);

    fn rejected(result: plateio::Result<impl core::fmt::Debug>) {
        assert!(matches!(result, Err(Error::Operand(_))), "got {:?}", result);
    }

    {
        let mut relay = Plate::open(&mut stack, BoardType::Relay, 0);
        rejected(relay.relay_on(0));
        rejected(relay.relay_on(8));
        rejected(relay.relay_all(128));
    }
    {
        let mut tinker = Plate::open(&mut stack, BoardType::Tinker, 0);
        rejected(tinker.relay_on(3));
        rejected(tinker.relay_all(4));
        rejected(tinker.set_dout(0));
        rejected(tinker.set_dout(9));
        rejected(tinker.set_mode(7, PinMode::Pwm));
        rejected(tinker.set_mode(13, PinMode::Range));
        rejected(tinker.set_mode_named(1, "laser"));
        rejected(tinker.set_servo(1, 181.));
    }
    {
        let mut daqc = Plate::open(&mut stack, BoardType::Daqc, 0);
        rejected(daqc.set_dout(7));
        rejected(daqc.dout_all(128));
        rejected(daqc.adc(9));
        rejected(daqc.set_dac(2, 1.));
        rejected(daqc.set_dac(0, 4.2));
        rejected(daqc.set_pwm(0, 101.));
    }
    {
        let mut daqc2 = Plate::open(&mut stack, BoardType::Daqc2, 0);
        rejected(daqc2.set_dout(8));
        rejected(daqc2.set_dac(4, 1.));
        rejected(daqc2.set_scope_sweep(13));
        rejected(daqc2.set_scope_trigger(Trigger {channel: 3, ..Trigger::default()}));
        rejected(daqc2.set_scope_trigger(Trigger {level: 4096, ..Trigger::default()}));
        rejected(daqc2.fg_frequency(1, 9));
        rejected(daqc2.fg_frequency(1, 10_001));
        rejected(daqc2.fg_level(2, 5));
        rejected(daqc2.fg_on(3));
    }
    {
        let mut motor = Plate::open(&mut stack, BoardType::Motor, 0);
        rejected(motor.stepper_config(3, Direction::Clockwise, Resolution::Full, 100, 0.));
        rejected(motor.stepper_config(1, Direction::Clockwise, Resolution::Full, 0, 0.));
        rejected(motor.stepper_config(1, Direction::Clockwise, Resolution::Full, 2001, 0.));
        rejected(motor.stepper_config(1, Direction::Clockwise, Resolution::Full, 100, 10.5));
        rejected(motor.stepper_move(1, 16384));
        rejected(motor.stepper_move(1, -16384));
        rejected(motor.stepper_move(1, i32::MIN));
        rejected(motor.stepper_move(1, i32::MAX));
        rejected(motor.dc_config(5, Direction::Clockwise, 10, 0.));
        rejected(motor.dc_config(1, Direction::Clockwise, 101, 0.));
        rejected(motor.tach_coarse(0));
    }
    {
        let mut thermo = Plate::open(&mut stack, BoardType::Thermo, 0);
        rejected(thermo.temperature(0));
        rejected(thermo.temperature(13));
        rejected(thermo.set_thermocouple(9, Kind::J));
        rejected(thermo.cold_junction(9));
        rejected(thermo.set_line_frequency(55));
    }

    // only the 6 address confirmations reached the bus
    assert_eq!(stack.frames().len(), 6);
}
