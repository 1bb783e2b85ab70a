/*!
    plate sessions

    A [Plate] is one plate of the stack whose bus address was confirmed when it was opened. Every operation is checked locally before anything is sent:

    - the session must be valid, this is decided once in [Plate::open] and never changes
    - the plate type must support the operation, see [BoardType::supports]
    - operands must be within the range accepted by this plate type

    A rejected operation returns an error without any bus exchange. Plate specific state (calibration constants, oscilloscope traces, motor and thermocouple settings) is created on first use and lives as long as the session.
*/

/// opening, identification, reset and interrupts
mod system;
/// relays, digital I/O, leds, switch and prototyping plate pins
mod digital;
/// calibration flash, ADC, DAC, PWM, frequency and function generator
mod analog;
/// DAQC2 oscilloscope
mod scope;
/// stepper and DC motors
mod motion;
/// thermocouple temperatures
mod thermo;


pub use digital::*;
pub use analog::*;
pub use scope::*;
pub use motion::*;
pub use thermo::*;


use log::*;
use thiserror::Error;

use crate::{
    board::{BoardType, Operation},
    command::{Frame, Reply},
    transport::Transport,
    };


/// error regarding plate communication
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("plate address was not confirmed, the session is unusable")]
    Unconfirmed,
    #[error("unknown plate id {0}")]
    UnknownBoard(u8),
    #[error("no response from plate")]
    NoResponse,
    #[error("{operation:?} is not supported by {board:?} plates")]
    Unsupported {board: BoardType, operation: Operation},
    #[error("operand out of range: {0}")]
    Operand(&'static str),
    #[error("reply too short: expected {expected} bytes, received {received}")]
    Truncated {expected: usize, received: usize},
    #[error("cannot encode calibration constant: {0}")]
    Calibration(&'static str),
}
pub type Result<T> = core::result::Result<T, Error>;


/// one plate of the stack
pub struct Plate<T> {
    transport: T,
    board: BoardType,
    slot: u8,
    /// bus address, base of the plate type + slot
    address: u8,
    valid: bool,
    ack: bool,

    calibration: Option<Calibration>,
    scope: Option<Scope>,
    motors: Option<MotorSetup>,
    thermo: Option<ThermoSetup>,
}

impl<T: Transport> Plate<T> {
    /// plate type
    pub fn board(&self) -> BoardType {self.board}
    /// slot number the plate was opened with
    pub fn slot(&self) -> u8 {self.slot}
    /// bus address commands are sent to
    pub fn bus_address(&self) -> u8 {self.address}
    /// whether the plate confirmed its address when opened
    pub fn is_valid(&self) -> bool {self.valid}
    /// whether commands wait for hardware acknowledgment
    pub fn uses_ack(&self) -> bool {self.ack}
    /// the underlying transport
    pub fn transport(&mut self) -> &mut T {&mut self.transport}
    /// give back the transport, dropping all plate state
    pub fn into_transport(self) -> T {self.transport}

    /// check the session is usable for the given operation
    fn admit(&self, operation: Operation) -> Result<()> {
        if !self.valid {
            warn!("{:?} rejected on unconfirmed {:?} plate at slot {}", operation, self.board, self.slot);
            return Err(Error::Unconfirmed);
        }
        if !self.board.supports(operation) {
            return Err(Error::Unsupported {board: self.board, operation});
        }
        Ok(())
    }

    fn exchange(&mut self, opcode: u8, params: [u8; 2], reply: Reply) -> Result<Vec<u8>> {
        let [p1, p2] = params;
        let frame = Frame::new(self.address, opcode, p1, p2, reply, self.ack);
        debug!("send {:?}", frame);
        self.transport.submit(&frame)
    }
    /// command without reply
    fn send(&mut self, opcode: u8, p1: u8, p2: u8) -> Result<()> {
        self.exchange(opcode, [p1, p2], Reply::None)?;
        Ok(())
    }
    /// command with a fixed size reply, shorter replies are rejected
    fn query(&mut self, opcode: u8, p1: u8, p2: u8, size: usize) -> Result<Vec<u8>> {
        let reply = self.exchange(opcode, [p1, p2], Reply::Fixed(size))?;
        if reply.len() < size {
            return Err(Error::Truncated {expected: size, received: reply.len()});
        }
        Ok(reply)
    }
    fn query_byte(&mut self, opcode: u8, p1: u8, p2: u8) -> Result<u8> {
        Ok(self.query(opcode, p1, p2, 1)?[0])
    }
    fn query_word(&mut self, opcode: u8, p1: u8, p2: u8) -> Result<u16> {
        crate::command::decode(&self.query(opcode, p1, p2, 2)?)
    }
}

/// reject an operand unless the condition holds
fn operand(condition: bool, what: &'static str) -> Result<()> {
    if condition {Ok(())}
    else {Err(Error::Operand(what))}
}
