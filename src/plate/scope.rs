use crate::{
    board::Operation,
    codec,
    command::{self, SamplePair},
    opcodes,
    transport::Transport,
    };
use super::{Plate, Result, operand};


/// samples per channel in one capture
pub const TRACE_LENGTH: usize = 1024;
/// captured samples of one channel, raw 12 bit counts
pub type Trace = heapless::Vec<u16, TRACE_LENGTH>;
/// sweep index selected when the oscilloscope is started
pub const DEFAULT_SWEEP: u8 = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TriggerMode {
    /// free running when no trigger condition happens
    #[default]
    Auto,
    /// capture only on trigger condition
    Normal,
}
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TriggerEdge {
    #[default]
    Rising,
    Falling,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Trigger {
    /// 1 or 2
    pub channel: u8,
    pub mode: TriggerMode,
    pub edge: TriggerEdge,
    /// 0 to [codec::TRIGGER_LEVEL_MAX]
    pub level: u16,
}
impl Default for Trigger {
    fn default() -> Self {
        Self {
            channel: 1,
            mode: TriggerMode::Auto,
            edge: TriggerEdge::Rising,
            level: 2048,
        }
    }
}

/// oscilloscope settings and last captured traces of a DAQC2 plate
#[derive(Clone, Debug, PartialEq)]
pub struct Scope {
    /// enabled channels, channel 1 first
    pub channels: [bool; 2],
    /// index in [codec::SWEEP_RATES]
    pub sweep: u8,
    pub trigger: Trigger,
    pub traces: [Trace; 2],
}
impl Default for Scope {
    fn default() -> Self {
        Self {
            channels: [true, false],
            sweep: DEFAULT_SWEEP,
            trigger: Trigger::default(),
            traces: [Trace::new(), Trace::new()],
        }
    }
}
impl Scope {
    /// number of enabled channels
    pub fn active(&self) -> usize {
        self.channels.iter().filter(|&&enabled| enabled).count()
    }
    /// sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        codec::SWEEP_RATES[usize::from(self.sweep)]
    }
}


impl<T: Transport> Plate<T> {
    fn scope_mut(&mut self) -> &mut Scope {
        self.scope.get_or_insert_with(Scope::default)
    }
    /// current oscilloscope settings and traces, if it was ever used
    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    /// start the oscilloscope, resetting its settings to channel 1 at the default sweep
    pub fn start_scope(&mut self) -> Result<()> {
        self.admit(Operation::Oscilloscope)?;
        self.send(opcodes::SCOPE_START, 0, 0)?;
        self.scope = Some(Scope::default());
        Ok(())
    }
    /// stop the oscilloscope, settings and traces are kept
    pub fn stop_scope(&mut self) -> Result<()> {
        self.admit(Operation::Oscilloscope)?;
        self.send(opcodes::SCOPE_STOP, 0, 0)
    }
    /// enable or disable each channel, a capture needs at least one of them
    pub fn set_scope_channels(&mut self, first: bool, second: bool) -> Result<()> {
        self.admit(Operation::Oscilloscope)?;
        self.send(opcodes::SCOPE_CHANNELS, u8::from(first), u8::from(second))?;
        self.scope_mut().channels = [first, second];
        Ok(())
    }
    /**
        select the sample rate by its index in [codec::SWEEP_RATES]

        the highest rate is only meant for a single channel, this is left to the caller
    */
    pub fn set_scope_sweep(&mut self, sweep: u8) -> Result<()> {
        self.admit(Operation::Oscilloscope)?;
        operand(usize::from(sweep) < codec::SWEEP_RATES.len(), "sweep index must be 0 to 12")?;
        self.send(opcodes::SCOPE_SWEEP, sweep, 0)?;
        self.scope_mut().sweep = sweep;
        Ok(())
    }
    pub fn set_scope_trigger(&mut self, trigger: Trigger) -> Result<()> {
        self.admit(Operation::Oscilloscope)?;
        operand((1 ..= 2).contains(&trigger.channel), "trigger channel must be 1 or 2")?;
        operand(trigger.level <= codec::TRIGGER_LEVEL_MAX, "trigger level must be 0 to 4095")?;
        let [option, low] = codec::trigger(
            trigger.channel,
            trigger.mode == TriggerMode::Normal,
            trigger.edge == TriggerEdge::Falling,
            trigger.level,
            );
        self.send(opcodes::SCOPE_TRIGGER, option, low)?;
        self.scope_mut().trigger = trigger;
        Ok(())
    }
    /// force a capture without waiting for the trigger condition
    pub fn trigger_scope_now(&mut self) -> Result<()> {
        self.admit(Operation::Oscilloscope)?;
        self.send(opcodes::SCOPE_TRIGGER_NOW, 0, 0)
    }
    /// arm a capture
    pub fn run_scope(&mut self) -> Result<()> {
        self.admit(Operation::Oscilloscope)?;
        self.send(opcodes::SCOPE_RUN, 0, 0)
    }
    /**
        fetch the last capture into the traces of the enabled channels

        the plate sends [TRACE_LENGTH] big-endian samples per enabled channel, interleaved when both are enabled. Traces of disabled channels are emptied.
    */
    pub fn read_scope_traces(&mut self) -> Result<&Scope> {
        self.admit(Operation::Oscilloscope)?;
        let channels = self.scope_mut().channels;
        let active = self.scope_mut().active();
        operand(active > 0, "no oscilloscope channel enabled")?;
        let size = 2 * TRACE_LENGTH * active;
        let reply = self.query(opcodes::SCOPE_TRACES, 0, 0, size)?;

        let mut traces = [Trace::new(), Trace::new()];
        match channels {
            [true, true] => {
                let pairs = reply.chunks_exact(4)
                    .take(TRACE_LENGTH)
                    .map(command::decode::<SamplePair>)
                    .collect::<Result<Vec<_>>>()?;
                traces[0] = pairs.iter().map(|pair| pair.first).collect();
                traces[1] = pairs.iter().map(|pair| pair.second).collect();
            },
            _ => {
                let channel = if channels[0] {0} else {1};
                traces[channel] = reply.chunks_exact(2)
                    .take(TRACE_LENGTH)
                    .map(|sample| codec::word(sample[0], sample[1]))
                    .collect();
            },
        }
        let scope = self.scope_mut();
        scope.traces = traces;
        Ok(scope)
    }
}
