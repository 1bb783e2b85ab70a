//! tests on a real plate stack, expecting a DAQC2, a RELAY and a THERMO plate at slot 0

use std::time::Duration;
use serial_test::serial;

use plateio::{
    BoardType, Plate, Error,
    plate::Color,
    thermocouple::Scale,
    transport::Device,
    };


fn test<F>(board: BoardType, test: F)
where F: FnOnce(&mut Plate<Device>)
{
    let _ = env_logger::builder().is_test(true).try_init();
    let mut plate = Plate::open(Device::default(), board, 0);
    assert!(plate.is_valid(), "no {:?} plate answered at slot 0", board);
    test(&mut plate);
}


#[test]
#[serial]
fn identification() {
    for board in [BoardType::Daqc2, BoardType::Relay, BoardType::Thermo] {
        test(board, |plate| {
            let identity = plate.identity().unwrap();
            assert!(identity.starts_with("Pi-Plate"), "identity {:?}", identity);
            assert_eq!(plate.address().unwrap(), 0);
            plate.firmware_revision().unwrap();
            plate.hardware_revision().unwrap();
        });
    }
}

#[test]
#[serial]
fn absent_slot() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut plate = Plate::open(Device::default(), BoardType::Motor, 7);
    assert!(! plate.is_valid());
    assert_eq!(plate.reset(), Err(Error::Unconfirmed));
}

#[test]
#[serial]
fn relays() {
    test(BoardType::Relay, |plate| {
        plate.relay_all(0).unwrap();
        for relay in 1 ..= 7 {
            plate.relay_on(relay).unwrap();
            assert!(plate.relay_state(relay).unwrap());
            std::thread::sleep(Duration::from_millis(50));
            plate.relay_off(relay).unwrap();
            assert!(! plate.relay_state(relay).unwrap());
        }
    });
}

#[test]
#[serial]
fn daqc2_loopback() {
    test(BoardType::Daqc2, |plate| {
        plate.set_led_color(Color::Green).unwrap();
        assert_eq!(plate.led_color().unwrap(), Color::Green);
        plate.set_led_color(Color::Off).unwrap();

        // power supply monitor
        let supply = plate.adc(8).unwrap();
        assert!((4.5 .. 5.5).contains(&supply), "supply at {} V", supply);

        plate.set_dac(0, 2.5).unwrap();
        assert_eq!(plate.dac(0).unwrap(), 2.5);
        plate.set_dac(0, 0.).unwrap();
    });
}

#[test]
#[serial]
fn daqc2_scope() {
    test(BoardType::Daqc2, |plate| {
        plate.start_scope().unwrap();
        plate.set_scope_channels(true, true).unwrap();
        plate.run_scope().unwrap();
        plate.trigger_scope_now().unwrap();
        std::thread::sleep(Duration::from_millis(100));
        let scope = plate.read_scope_traces().unwrap();
        assert_eq!(scope.traces[0].len(), scope.traces[1].len());
        plate.stop_scope().unwrap();
    });
}

#[test]
#[serial]
fn thermo_internal() {
    test(BoardType::Thermo, |plate| {
        plate.set_scale(9, Scale::Celsius).unwrap();
        let board = plate.temperature(9).unwrap();
        assert!((0. .. 70.).contains(&board), "plate sensor at {} °C", board);
        let cold = plate.cold_junction(1).unwrap();
        assert!((0. .. 70.).contains(&cold), "cold junction at {} °C", cold);
    });
}
