/*!
    in-memory plate stack

    [Stack] implements [Transport] without any hardware: plates answer their address, identification, revisions and calibration flash like real ones, every other query returns zeros unless a reply was scripted for its opcode. Every submitted frame is recorded so tests can check what went on the bus.
*/

use std::collections::HashMap;
use log::*;

use crate::{
    Error, Result,
    board::BoardType,
    command::{Frame, Reply},
    opcodes,
    plate::Calibration,
    transport::Transport,
    };


/// size of the simulated calibration flash
pub const FLASH_SIZE: usize = 256;

/// one simulated plate
#[derive(Clone, Debug)]
pub struct SimPlate {
    pub board: BoardType,
    pub identity: String,
    pub hardware_revision: u8,
    pub firmware_revision: u8,
    pub flash: [u8; FLASH_SIZE],
    write_pointer: usize,
    /// replies returned for the given opcodes instead of zeros
    replies: HashMap<u8, Vec<u8>>,
    /// address byte answered instead of the real one
    pub echo: Option<u8>,
    /// cut every reply to this length
    pub truncate: Option<usize>,
    /// answer nothing at all
    pub silent: bool,
}
impl SimPlate {
    /// a plate with neutral calibration constants in flash
    pub fn new(board: BoardType) -> Self {
        let mut flash = [0xFF; FLASH_SIZE];
        if let Ok(image) = Calibration::default().to_flash() {
            flash[.. image.len()].copy_from_slice(&image);
        }
        Self {
            board,
            identity: format!("Pi-Plate {}", format!("{:?}", board).to_uppercase()),
            hardware_revision: 1,
            firmware_revision: 1,
            flash,
            write_pointer: 0,
            replies: HashMap::new(),
            echo: None,
            truncate: None,
            silent: false,
        }
    }
    /// answer the given bytes to every query with this opcode
    pub fn script(&mut self, opcode: u8, reply: impl Into<Vec<u8>>) -> &mut Self {
        self.replies.insert(opcode, reply.into());
        self
    }

    fn answer(&mut self, address: u8, frame: &Frame) -> Vec<u8> {
        let [p1, p2] = frame.params;
        match frame.opcode {
            opcodes::ADDRESS => vec![self.echo.unwrap_or(address)],
            opcodes::IDENTITY => {
                let mut reply = self.identity.clone().into_bytes();
                reply.push(0);
                reply
            },
            opcodes::HARDWARE_REVISION => vec![self.hardware_revision],
            opcodes::FIRMWARE_REVISION => vec![self.firmware_revision],
            opcodes::CALIBRATION => match p1 {
                opcodes::CALIBRATION_ERASE => {
                    self.flash = [0xFF; FLASH_SIZE];
                    self.write_pointer = 0;
                    Vec::new()
                },
                opcodes::CALIBRATION_PUT => {
                    if let Some(cell) = self.flash.get_mut(self.write_pointer) {
                        *cell = p2;
                        self.write_pointer += 1;
                    }
                    Vec::new()
                },
                _ => vec![self.flash[usize::from(p2)]],
            },
            opcode => match self.replies.get(&opcode) {
                Some(reply) => reply.clone(),
                None => vec![0; frame.reply_len()],
            },
        }
    }
}

/// a simulated stack of plates sharing one interrupt line
#[derive(Clone, Debug, Default)]
pub struct Stack {
    plates: HashMap<u8, SimPlate>,
    frames: Vec<Frame>,
    /// state of the interrupt line
    pub interrupt: bool,
}
impl Stack {
    pub fn new() -> Self {
        Self::default()
    }
    /// put a plate at the given slot, replacing any plate already answering this address
    pub fn insert(&mut self, board: BoardType, slot: u8) -> &mut SimPlate {
        let address = board.base().wrapping_add(slot);
        let plate = self.plates.entry(address).or_insert_with(|| SimPlate::new(board));
        *plate = SimPlate::new(board);
        plate
    }
    /// builder form of [Self::insert]
    pub fn with(mut self, board: BoardType, slot: u8) -> Self {
        self.insert(board, slot);
        self
    }
    /// the plate at the given slot, if one was inserted there
    pub fn plate(&mut self, board: BoardType, slot: u8) -> Option<&mut SimPlate> {
        self.plates.get_mut(&board.base().wrapping_add(slot))
    }
    /// every frame submitted so far, oldest first
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
    /// forget recorded frames
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Transport for Stack {
    fn submit(&mut self, frame: &Frame) -> Result<Vec<u8>> {
        self.frames.push(*frame);
        let Some(plate) = self.plates.get_mut(&frame.address)
            else {
                debug!("no simulated plate at address {}", frame.address);
                return Err(Error::NoResponse)
            };
        if plate.silent
            {return Err(Error::NoResponse)}

        let mut reply = plate.answer(frame.address, frame);
        if frame.reply == Reply::None
            {reply.clear()}
        if let Some(limit) = plate.truncate
            {reply.truncate(limit)}
        trace!("simulated reply {:02x?}", reply);
        Ok(reply)
    }
    fn poll_interrupt(&mut self) -> bool {
        self.interrupt
    }
}
