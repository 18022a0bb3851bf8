//! Control side of the block engine: handle creation and command batching
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    sync::mpsc,
};

use log::error;

use super::{
    block::{BlockCommand, BlockId, BlockParam, BlockState, Node, SignalSource},
    graph::SignalGraph,
};
use crate::common::box_error::BoxError;

type Outbox = Rc<RefCell<Vec<BlockCommand>>>;

/// Queue a command.  False if the outbox was busy and the command was lost.
fn post(outbox: &Outbox, cmd: BlockCommand) -> bool {
    match outbox.try_borrow_mut() {
        Ok(mut queue) => {
            queue.push(cmd);
            true
        }
        Err(_) => {
            error!("outbox busy, dropped {:?}", cmd);
            false
        }
    }
}

/// Owner's reference to one primitive block on the render side.
///
/// Handles are not `Clone`: a block belongs to exactly one effect unit and is
/// destroyed when that unit drops its handle.
pub struct BlockHandle {
    id: BlockId,
    state: BlockState,
    outbox: Outbox,
}

impl BlockHandle {
    pub fn id(&self) -> BlockId {
        self.id
    }
    /// This block's output as an input for another block
    pub fn source(&self) -> SignalSource {
        SignalSource::Block(self.id)
    }
    pub fn state(&self) -> BlockState {
        self.state
    }
    pub fn is_active(&self) -> bool {
        self.state != BlockState::Stopped
    }
    /// Start computing without being heard.  A routed block stays routed.
    /// The recorded state only moves once the command is queued.
    pub fn play(&mut self) {
        if self.state == BlockState::Stopped && post(&self.outbox, BlockCommand::Play(self.id)) {
            self.state = BlockState::Playing;
        }
    }
    /// Compute and sum into the outputs starting at `chnl`
    pub fn out(&mut self, chnl: usize) {
        if self.state != BlockState::Routed && post(&self.outbox, BlockCommand::Out { id: self.id, chnl }) {
            self.state = BlockState::Routed;
        }
    }
    pub fn stop(&mut self) {
        if self.state != BlockState::Stopped && post(&self.outbox, BlockCommand::Stop(self.id)) {
            self.state = BlockState::Stopped;
        }
    }
    pub fn set(&mut self, param: BlockParam, value: f32) {
        post(
            &self.outbox,
            BlockCommand::Set {
                id: self.id,
                param,
                value,
            },
        );
    }
    pub fn set_input(&mut self, source: SignalSource, fadetime: f32) {
        post(
            &self.outbox,
            BlockCommand::SetInput {
                id: self.id,
                source,
                fadetime,
            },
        );
    }
}

impl Drop for BlockHandle {
    fn drop(&mut self) {
        post(&self.outbox, BlockCommand::Destroy(self.id));
    }
}

/// Hands out block handles and ships their queued commands to the graph
pub struct BlockServer {
    sample_rate: f32,
    next_id: Cell<u32>,
    outbox: Outbox,
    batch_tx: mpsc::Sender<Vec<BlockCommand>>,
}

impl BlockServer {
    /// Make a connected server/graph pair.  The graph goes to the audio thread.
    pub fn open(sample_rate: f32) -> (BlockServer, SignalGraph) {
        let (batch_tx, batch_rx) = mpsc::channel();
        let server = BlockServer {
            sample_rate,
            next_id: Cell::new(1),
            outbox: Rc::new(RefCell::new(Vec::new())),
            batch_tx,
        };
        (server, SignalGraph::new(batch_rx))
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn create<N: Node + 'static>(&self, node: N) -> BlockHandle {
        let id = BlockId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        post(
            &self.outbox,
            BlockCommand::Create {
                id,
                node: Box::new(node),
            },
        );
        BlockHandle {
            id,
            state: BlockState::Stopped,
            outbox: self.outbox.clone(),
        }
    }

    /// Number of commands waiting for the next flush
    pub fn pending(&self) -> usize {
        self.outbox.borrow().len()
    }

    /// Pull the queued commands without sending them
    pub fn take_pending(&self) -> Vec<BlockCommand> {
        std::mem::take(&mut *self.outbox.borrow_mut())
    }

    /// Send everything queued so far to the graph as one batch
    pub fn flush(&self) -> Result<usize, BoxError> {
        let batch = self.take_pending();
        let count = batch.len();
        if count > 0 {
            self.batch_tx
                .send(batch)
                .map_err(|_| "signal graph has shut down")?;
        }
        Ok(count)
    }
}
