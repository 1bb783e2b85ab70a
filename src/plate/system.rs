use log::*;

use crate::{
    board::{BoardType, Operation},
    command::Reply,
    opcodes,
    transport::Transport,
    };
use super::{Plate, Error, Result, operand};


impl<T: Transport> Plate<T> {
    /**
        open the plate of the given type jumpered to the given slot

        the plate is asked for its address and the session is only valid if it echoes the expected bus address. An out of range slot gives an invalid session without any bus exchange. Check [Plate::is_valid] before use, every operation of an invalid session fails with [Error::Unconfirmed].
    */
    pub fn open(transport: T, board: BoardType, slot: u8) -> Self {
        let mut plate = Self {
            transport,
            board,
            slot,
            address: board.base().wrapping_add(slot),
            valid: false,
            ack: board.uses_ack(),
            calibration: None,
            scope: None,
            motors: None,
            thermo: None,
        };
        let Some(address) = board.address(slot) else {
            debug!("no slot {} for {:?} plates", slot, board);
            return plate;
        };
        plate.valid = match plate.exchange(opcodes::ADDRESS, [0, 0], Reply::Fixed(1)) {
            Ok(reply) => match reply.first() {
                Some(&echo) if echo == address => true,
                echo => {
                    debug!("{:?} plate at slot {} answered address {:?}, expected {}", board, slot, echo, address);
                    false
                },
            },
            Err(error) => {
                debug!("{:?} plate at slot {} did not answer: {}", board, slot, error);
                false
            },
        };
        plate
    }
    /// open a plate from its numeric id (the base address of its type: 8, 16, 24, 32, 40, 48)
    pub fn open_id(transport: T, id: u8, slot: u8) -> Result<Self> {
        let board = BoardType::from_id(id).ok_or(Error::UnknownBoard(id))?;
        Ok(Self::open(transport, board, slot))
    }

    /// slot number reported by the plate
    pub fn address(&mut self) -> Result<u8> {
        self.admit(Operation::Identify)?;
        let echo = self.query_byte(opcodes::ADDRESS, 0, 0)?;
        Ok(echo.wrapping_sub(self.board.base()))
    }
    /// identification string of the plate
    pub fn identity(&mut self) -> Result<String> {
        self.admit(Operation::Identify)?;
        let reply = self.exchange(opcodes::IDENTITY, [0, 0], Reply::Terminated)?;
        let end = reply.iter().position(|&b| b == 0).unwrap_or(reply.len());
        Ok(String::from_utf8_lossy(&reply[.. end]).into_owned())
    }
    pub fn hardware_revision(&mut self) -> Result<u8> {
        self.admit(Operation::Identify)?;
        self.query_byte(opcodes::HARDWARE_REVISION, 0, 0)
    }
    pub fn firmware_revision(&mut self) -> Result<u8> {
        self.admit(Operation::Identify)?;
        self.query_byte(opcodes::FIRMWARE_REVISION, 0, 0)
    }
    /// return the plate to its power-up state
    pub fn reset(&mut self) -> Result<()> {
        self.admit(Operation::Reset)?;
        self.send(opcodes::RESET, 0, 0)
    }

    /// let the plate drive the stack interrupt line
    pub fn interrupt_enable(&mut self) -> Result<()> {
        self.admit(Operation::InterruptControl)?;
        self.send(opcodes::INTERRUPT_ENABLE, 0, 0)
    }
    pub fn interrupt_disable(&mut self) -> Result<()> {
        self.admit(Operation::InterruptControl)?;
        self.send(opcodes::INTERRUPT_DISABLE, 0, 0)
    }
    /// pending interrupt sources, reading clears them
    pub fn interrupt_flags(&mut self) -> Result<u8> {
        self.admit(Operation::InterruptFlags)?;
        self.query_byte(opcodes::INTERRUPT_FLAGS, 0, 0)
    }
    /// pending interrupt sources of a motor plate, bank 0 or 1
    pub fn motor_interrupt_flags(&mut self, bank: u8) -> Result<u8> {
        self.admit(Operation::MotorInterruptFlags)?;
        operand(bank <= 1, "interrupt flag bank must be 0 or 1")?;
        let opcode = if bank == 0 {opcodes::INTERRUPT_FLAGS} else {opcodes::INTERRUPT_FLAGS_HIGH};
        self.query_byte(opcode, 0, 0)
    }
    /// state of the interrupt line shared by the whole stack, regardless of this session validity
    pub fn interrupt_pending(&mut self) -> bool {
        self.transport.poll_interrupt()
    }
}
