//! Vocabulary shared by both sides of the block engine
use std::{collections::BTreeMap, fmt};

/// Opaque block identity.  Ids grow with creation order and the graph renders
/// in id order, so a block may read anything created before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub(crate) u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a block takes its audio from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalSource {
    /// the raw instrument feed from the audio device
    Instrument,
    Block(BlockId),
}

/// A block input that is either a fixed number or another block's output
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control {
    Fixed(f32),
    Signal(SignalSource),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockState {
    Stopped,
    /// computing samples, not connected to the outputs
    Playing,
    /// computing and summed into the device outputs
    Routed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlockParam {
    Value,
    Freq,
    Phase,
    Mul,
    Add,
    Delay,
    Feedback,
    Shift,
    Spread,
    Q,
    Drive,
    Slope,
    Depth,
    /// wet share of a wet/dry output
    Balance,
    Time,
    Size,
    Gain { voice: usize, out: usize },
}

/// A primitive block as seen by the render thread
pub trait Node: Send {
    /// number of output channels this block produces
    fn channels(&self) -> usize {
        1
    }
    /// Fill `out` (one buffer per channel, already sized) for this period
    fn render(&mut self, signals: &Signals, out: &mut [Vec<f32>]);
    fn set(&mut self, param: BlockParam, value: f32);
    fn set_input(&mut self, _source: SignalSource, _fadetime: f32) {}
}

pub enum BlockCommand {
    Create { id: BlockId, node: Box<dyn Node> },
    Play(BlockId),
    Out { id: BlockId, chnl: usize },
    Stop(BlockId),
    Set { id: BlockId, param: BlockParam, value: f32 },
    SetInput { id: BlockId, source: SignalSource, fadetime: f32 },
    Destroy(BlockId),
}

impl BlockCommand {
    pub fn block_id(&self) -> BlockId {
        match self {
            BlockCommand::Create { id, .. }
            | BlockCommand::Out { id, .. }
            | BlockCommand::Set { id, .. }
            | BlockCommand::SetInput { id, .. } => *id,
            BlockCommand::Play(id) | BlockCommand::Stop(id) | BlockCommand::Destroy(id) => *id,
        }
    }
}

impl fmt::Debug for BlockCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BlockCommand::Create { id, node } => {
                write!(f, "Create({}, {} chnl)", id, node.channels())
            }
            BlockCommand::Play(id) => write!(f, "Play({})", id),
            BlockCommand::Out { id, chnl } => write!(f, "Out({}, {})", id, chnl),
            BlockCommand::Stop(id) => write!(f, "Stop({})", id),
            BlockCommand::Set { id, param, value } => {
                write!(f, "Set({}, {:?}, {})", id, param, value)
            }
            BlockCommand::SetInput {
                id,
                source,
                fadetime,
            } => write!(f, "SetInput({}, {:?}, {})", id, source, fadetime),
            BlockCommand::Destroy(id) => write!(f, "Destroy({})", id),
        }
    }
}

/// What a block can read while it renders: the instrument input and the
/// current buffers of every other block
pub struct Signals<'a> {
    instrument: &'a [f32],
    blocks: &'a BTreeMap<BlockId, Vec<Vec<f32>>>,
    silence: &'a [f32],
}

impl<'a> Signals<'a> {
    pub fn new(
        instrument: &'a [f32],
        blocks: &'a BTreeMap<BlockId, Vec<Vec<f32>>>,
        silence: &'a [f32],
    ) -> Signals<'a> {
        Signals {
            instrument,
            blocks,
            silence,
        }
    }

    pub fn frames(&self) -> usize {
        self.instrument.len()
    }

    /// First channel of a source, or silence if the block is gone
    pub fn channel(&self, source: SignalSource) -> &'a [f32] {
        match source {
            SignalSource::Instrument => self.instrument,
            SignalSource::Block(id) => match self.blocks.get(&id).and_then(|b| b.first()) {
                Some(buf) if buf.len() == self.instrument.len() => buf.as_slice(),
                _ => &self.silence[..self.instrument.len().min(self.silence.len())],
            },
        }
    }

    pub fn control(&self, control: Control) -> ControlSignal<'a> {
        match control {
            Control::Fixed(v) => ControlSignal::Fixed(v),
            Control::Signal(source) => ControlSignal::Varying(self.channel(source)),
        }
    }
}

pub enum ControlSignal<'a> {
    Fixed(f32),
    Varying(&'a [f32]),
}

impl<'a> ControlSignal<'a> {
    pub fn at(&self, i: usize) -> f32 {
        match self {
            ControlSignal::Fixed(v) => *v,
            ControlSignal::Varying(buf) => buf.get(i).copied().unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod test_block {
    use super::*;

    #[test]
    fn missing_block_reads_silence() {
        let input = [0.5; 4];
        let silence = [0.0; 16];
        let mut blocks = BTreeMap::new();
        blocks.insert(BlockId(1), vec![vec![0.25; 4]]);
        let signals = Signals::new(&input, &blocks, &silence);
        assert_eq!(signals.frames(), 4);
        assert_eq!(signals.channel(SignalSource::Instrument), &input);
        assert_eq!(signals.channel(SignalSource::Block(BlockId(1))), &[0.25; 4]);
        assert_eq!(signals.channel(SignalSource::Block(BlockId(9))), &[0.0; 4]);
    }

    #[test]
    fn controls() {
        let input = [0.5; 2];
        let silence = [0.0; 2];
        let blocks = BTreeMap::new();
        let signals = Signals::new(&input, &blocks, &silence);
        assert_eq!(signals.control(Control::Fixed(3.0)).at(1), 3.0);
        let varying = signals.control(Control::Signal(SignalSource::Instrument));
        assert_eq!(varying.at(0), 0.5);
        assert_eq!(varying.at(7), 0.0);
    }

    #[test]
    fn command_ids() {
        let cmd = BlockCommand::Out {
            id: BlockId(3),
            chnl: 0,
        };
        assert_eq!(cmd.block_id(), BlockId(3));
        assert_eq!(format!("{:?}", cmd), "Out(#3, 0)");
    }
}
