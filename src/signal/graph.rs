//! Render side of the block engine
//!
//! Owned by the audio thread.  Each period it applies every batch the control
//! side has flushed, renders the active blocks in creation order and sums the
//! routed ones into the device outputs.
use std::{collections::BTreeMap, sync::mpsc};

use super::block::{BlockCommand, BlockId, BlockState, Node, Signals};

struct Slot {
    node: Box<dyn Node>,
    state: BlockState,
    chnl: usize,
}

pub struct SignalGraph {
    batch_rx: mpsc::Receiver<Vec<BlockCommand>>,
    slots: BTreeMap<BlockId, Slot>,
    buffers: BTreeMap<BlockId, Vec<Vec<f32>>>,
    order: Vec<BlockId>,
    outputs: Vec<Vec<f32>>,
    silence: Vec<f32>,
    frames: usize,
}

impl SignalGraph {
    pub(crate) fn new(batch_rx: mpsc::Receiver<Vec<BlockCommand>>) -> SignalGraph {
        SignalGraph {
            batch_rx,
            slots: BTreeMap::new(),
            buffers: BTreeMap::new(),
            order: vec![],
            outputs: vec![vec![]],
            silence: vec![],
            frames: 0,
        }
    }

    /// Number of device outputs the graph mixes into (at least one)
    pub fn set_output_channels(&mut self, count: usize) {
        self.outputs = vec![vec![0.0; self.frames]; count.max(1)];
    }

    pub fn output_channels(&self) -> usize {
        self.outputs.len()
    }

    /// Mixed output of the last period for one device channel
    pub fn output(&self, chnl: usize) -> &[f32] {
        match self.outputs.get(chnl) {
            Some(buf) => buf.as_slice(),
            None => &[],
        }
    }

    /// First channel a block rendered last period, empty if it is gone
    pub fn block_output(&self, id: BlockId) -> &[f32] {
        match self.buffers.get(&id).and_then(|buf| buf.first()) {
            Some(chan) => chan.as_slice(),
            None => &[],
        }
    }

    pub fn block_count(&self) -> usize {
        self.slots.len()
    }

    pub fn block_state(&self, id: BlockId) -> Option<BlockState> {
        self.slots.get(&id).map(|slot| slot.state)
    }

    pub fn routed_blocks(&self) -> Vec<BlockId> {
        self.order
            .iter()
            .filter(|id| self.block_state(**id) == Some(BlockState::Routed))
            .copied()
            .collect()
    }

    /// Apply every batch waiting in the channel, returns how many were applied
    pub fn apply_pending(&mut self) -> usize {
        let mut batches = 0;
        while let Ok(batch) = self.batch_rx.try_recv() {
            for cmd in batch {
                self.apply(cmd);
            }
            batches += 1;
        }
        batches
    }

    fn apply(&mut self, cmd: BlockCommand) {
        match cmd {
            BlockCommand::Create { id, node } => {
                let channels = node.channels().max(1);
                self.buffers.insert(id, vec![vec![0.0; self.frames]; channels]);
                self.slots.insert(
                    id,
                    Slot {
                        node,
                        state: BlockState::Stopped,
                        chnl: 0,
                    },
                );
                if let Err(pos) = self.order.binary_search(&id) {
                    self.order.insert(pos, id);
                }
            }
            BlockCommand::Play(id) => {
                if let Some(slot) = self.slots.get_mut(&id) {
                    if slot.state == BlockState::Stopped {
                        slot.state = BlockState::Playing;
                    }
                }
            }
            BlockCommand::Out { id, chnl } => {
                if let Some(slot) = self.slots.get_mut(&id) {
                    slot.state = BlockState::Routed;
                    slot.chnl = chnl;
                }
            }
            BlockCommand::Stop(id) => {
                if let Some(slot) = self.slots.get_mut(&id) {
                    slot.state = BlockState::Stopped;
                }
                // anything reading a stopped block hears silence
                if let Some(buf) = self.buffers.get_mut(&id) {
                    for chan in buf.iter_mut() {
                        chan.fill(0.0);
                    }
                }
            }
            BlockCommand::Set { id, param, value } => {
                if let Some(slot) = self.slots.get_mut(&id) {
                    slot.node.set(param, value);
                }
            }
            BlockCommand::SetInput {
                id,
                source,
                fadetime,
            } => {
                if let Some(slot) = self.slots.get_mut(&id) {
                    slot.node.set_input(source, fadetime);
                }
            }
            BlockCommand::Destroy(id) => {
                self.slots.remove(&id);
                self.buffers.remove(&id);
                if let Ok(pos) = self.order.binary_search(&id) {
                    self.order.remove(pos);
                }
            }
        }
    }

    fn resize(&mut self, frames: usize) {
        self.frames = frames;
        self.silence = vec![0.0; frames];
        for out in self.outputs.iter_mut() {
            out.resize(frames, 0.0);
        }
        for buf in self.buffers.values_mut() {
            for chan in buf.iter_mut() {
                chan.resize(frames, 0.0);
            }
        }
    }

    /// Render one period of audio from the instrument input
    pub fn process(&mut self, input: &[f32]) {
        self.apply_pending();
        if input.len() != self.frames {
            self.resize(input.len());
        }
        for out in self.outputs.iter_mut() {
            out.fill(0.0);
        }
        let num_outs = self.outputs.len();

        for k in 0..self.order.len() {
            let id = self.order[k];
            let slot = match self.slots.get_mut(&id) {
                Some(slot) => slot,
                None => continue,
            };
            if slot.state == BlockState::Stopped {
                continue;
            }
            // lift this block's buffer out so it can read everyone else's
            let mut buf = match self.buffers.get_mut(&id) {
                Some(buf) => std::mem::take(buf),
                None => continue,
            };
            {
                let signals = Signals::new(input, &self.buffers, &self.silence);
                slot.node.render(&signals, &mut buf);
            }
            if slot.state == BlockState::Routed {
                for (c, chan) in buf.iter().enumerate() {
                    let out = &mut self.outputs[(slot.chnl + c) % num_outs];
                    for (o, s) in out.iter_mut().zip(chan.iter()) {
                        *o += *s;
                    }
                }
            }
            if let Some(slot_buf) = self.buffers.get_mut(&id) {
                *slot_buf = buf;
            }
        }
    }
}

#[cfg(test)]
mod test_signal_graph {
    use super::*;
    use crate::signal::{
        block::SignalSource, fader::InputFader, oscillator::Sig, server::BlockServer,
    };

    #[test]
    fn stopped_graph_is_silent() {
        let (server, mut graph) = BlockServer::open(48_000.0);
        let _sig = server.create(Sig::new(0.5, 1.0));
        server.flush().unwrap();
        graph.process(&[1.0; 8]);
        assert_eq!(graph.block_count(), 1);
        assert_eq!(graph.output(0), &[0.0; 8]);
    }

    #[test]
    fn routed_block_is_heard() {
        let (server, mut graph) = BlockServer::open(48_000.0);
        let mut clean = server.create(InputFader::new(SignalSource::Instrument, 48_000.0));
        clean.out(0);
        server.flush().unwrap();
        graph.process(&[0.3; 16]);
        assert_eq!(graph.output(0), &[0.3; 16]);
        assert_eq!(graph.routed_blocks(), vec![clean.id()]);
        clean.stop();
        server.flush().unwrap();
        graph.process(&[0.3; 16]);
        assert_eq!(graph.output(0), &[0.0; 16]);
        assert_eq!(graph.block_state(clean.id()), Some(BlockState::Stopped));
    }

    #[test]
    fn playing_block_feeds_routed_block() {
        let (server, mut graph) = BlockServer::open(48_000.0);
        let mut level = server.create(Sig::new(0.25, 2.0));
        let mut reader = server.create(InputFader::new(level.source(), 48_000.0));
        level.play();
        reader.out(0);
        server.flush().unwrap();
        graph.process(&[0.0; 4]);
        assert_eq!(graph.output(0), &[0.5; 4]);
        assert_eq!(graph.block_output(level.id()), &[0.5; 4]);
        // stopping the source silences the reader but leaves it routed
        level.stop();
        server.flush().unwrap();
        graph.process(&[0.0; 4]);
        assert_eq!(graph.output(0), &[0.0; 4]);
        assert_eq!(graph.block_state(reader.id()), Some(BlockState::Routed));
    }

    #[test]
    fn extra_channels_wrap() {
        let (server, mut graph) = BlockServer::open(48_000.0);
        graph.set_output_channels(2);
        let mut a = server.create(Sig::new(0.25, 1.0));
        let mut b = server.create(Sig::new(0.5, 1.0));
        a.out(1);
        b.out(2);
        server.flush().unwrap();
        graph.process(&[0.0; 4]);
        assert_eq!(graph.output_channels(), 2);
        assert_eq!(graph.output(0), &[0.5; 4]);
        assert_eq!(graph.output(1), &[0.25; 4]);
        assert_eq!(graph.output(5), &[] as &[f32]);
    }

    #[test]
    fn destroyed_blocks_leave() {
        let (server, mut graph) = BlockServer::open(48_000.0);
        let sig = server.create(Sig::new(0.5, 1.0));
        server.flush().unwrap();
        assert_eq!(graph.apply_pending(), 1);
        let id = sig.id();
        drop(sig);
        server.flush().unwrap();
        graph.process(&[0.0; 4]);
        assert_eq!(graph.block_state(id), None);
        assert_eq!(graph.block_count(), 0);
    }
}
