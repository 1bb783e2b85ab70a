/*!
    userspace driver for stackable Pi-Plates

    Plates are stacked on one control channel and told apart by their bus address: the base address of their type plus the slot selected by jumpers. Open a [Plate] per plate over a [transport::Transport], either the kernel module character device ([transport::Device]) or the in-memory [sim::Stack].

    ```no_run
    use plateio::{Plate, BoardType, transport::Device};

    let mut daqc = Plate::open(Device::default(), BoardType::Daqc, 0);
    if daqc.is_valid() {
        println!("{}: {} V", daqc.identity()?, daqc.adc(0)?);
    }
    # Ok::<(), plateio::Error>(())
    ```
*/

pub mod command;
pub mod opcodes;
pub mod board;
pub mod codec;
pub mod thermocouple;
pub mod transport;
pub mod sim;
pub mod plate;

pub use board::{BoardType, Operation};
pub use plate::{Plate, Error, Result};
