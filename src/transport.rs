/*!
    single point of contact with the plate control channel

    a [Transport] performs one blocking request/response exchange per [Frame]. The [Device] implementation talks to the kernel module through its character device, opening and closing it for every command.
*/

use crate::{
    Result,
    command::Frame,
    };


/// blocking request/response primitive shared by all plates of a stack
pub trait Transport {
    /**
        submit one command and wait for its completion

        returns the reply bytes (empty when the frame expects none). Any failure, whether the channel could not be reached or the plate declined the command, is reported as [crate::Error::NoResponse].
    */
    fn submit(&mut self, frame: &Frame) -> Result<Vec<u8>>;
    /// state of the stack-wide interrupt line
    fn poll_interrupt(&mut self) -> bool;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn submit(&mut self, frame: &Frame) -> Result<Vec<u8>> {
        (**self).submit(frame)
    }
    fn poll_interrupt(&mut self) -> bool {
        (**self).poll_interrupt()
    }
}


#[cfg(feature = "device")]
pub use device::*;

#[cfg(feature = "device")]
mod device {
    use std::{
        fs::File,
        os::fd::AsRawFd,
        path::{Path, PathBuf},
        };
    use log::*;

    use crate::{
        Error, Result,
        command::{Frame, BUFFER_SIZE},
        };
    use super::Transport;


    /// control channel created by the plate kernel module
    pub const DEFAULT_PATH: &str = "/dev/PiPlates";

    /// ioctl magic number of the plate kernel module
    const MAGIC: u8 = b'p';

    const fn ioc(direction: libc::c_ulong, number: u8, size: usize) -> libc::c_ulong {
        (direction << 30)
        | ((size as libc::c_ulong) << 16)
        | ((MAGIC as libc::c_ulong) << 8)
        | number as libc::c_ulong
    }
    /// submit a [Message], `_IOWR('p', 1, usize)`
    pub const SEND_COMMAND: libc::c_ulong = ioc(3, 1, core::mem::size_of::<usize>());
    /// query the interrupt line, `_IO('p', 2)`
    pub const GET_INTERRUPT: libc::c_ulong = ioc(0, 2, 0);

    /// structured command exchanged with the kernel module
    #[repr(C)]
    pub struct Message {
        pub addr: u8,
        pub cmd: u8,
        pub p1: u8,
        pub p2: u8,
        /// 0 for no reply, n for exactly n bytes, negative for a terminated reply
        pub bytes_to_return: i32,
        pub use_ack: bool,
        /// set by the kernel module when the plate answered
        pub state: bool,
        pub reply: [u8; BUFFER_SIZE],
    }
    impl Message {
        fn new(frame: &Frame) -> Self {
            Self {
                addr: frame.address,
                cmd: frame.opcode,
                p1: frame.params[0],
                p2: frame.params[1],
                bytes_to_return: frame.reply.request(),
                use_ack: frame.ack,
                state: false,
                reply: [0; BUFFER_SIZE],
            }
        }
    }

    /// transport through the plate character device
    #[derive(Clone, Debug)]
    pub struct Device {
        path: PathBuf,
    }
    impl Device {
        /// use the control channel at the given path, it is only opened when commands are sent
        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {path: path.as_ref().to_path_buf()}
        }
        pub fn path(&self) -> &Path {&self.path}

        fn open(&self) -> Result<File> {
            File::open(&self.path).map_err(|error| {
                debug!("cannot open {}: {}", self.path.display(), error);
                Error::NoResponse
                })
        }
    }
    impl Default for Device {
        fn default() -> Self {
            Self::new(DEFAULT_PATH)
        }
    }

    impl Transport for Device {
        fn submit(&mut self, frame: &Frame) -> Result<Vec<u8>> {
            let file = self.open()?;
            let mut message = Message::new(frame);
            // SAFETY: the message is a repr(C) value matching the kernel module layout, and outlives the call
            let status = unsafe {libc::ioctl(file.as_raw_fd(), SEND_COMMAND as _, &mut message as *mut Message)};

            if status < 0 {
                debug!("ioctl failed for {:?}: {}", frame, std::io::Error::last_os_error());
                return Err(Error::NoResponse);
            }
            if !message.state {
                debug!("plate declined {:?}", frame);
                return Err(Error::NoResponse);
            }
            let reply = message.reply[.. frame.reply_len()].to_vec();
            trace!("reply {:02x?}", reply);
            Ok(reply)
        }
        fn poll_interrupt(&mut self) -> bool {
            let Ok(file) = self.open()
                else {return false};
            // SAFETY: this request takes no argument
            let status = unsafe {libc::ioctl(file.as_raw_fd(), GET_INTERRUPT as _)};
            status > 0
        }
    }
}
