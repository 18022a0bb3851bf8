use crate::signal::{
    block::{BlockId, SignalSource},
    server::BlockHandle,
};

/// Wiring of one composite effect over primitive blocks.
///
/// `chain` lists every block the effect owns in the order they have to be
/// started, modulation sources before the blocks that read them.  The last
/// block is the one that gets routed to the outputs.  `EffectUnit` drives the
/// lifecycle through the default methods and only calls `apply` for knobs.
pub trait Pedal {
    fn chain(&mut self) -> Vec<&mut BlockHandle>;

    /// Block carrying this effect's output
    fn output(&self) -> BlockId;

    /// Write a knob value through to every block that depends on it
    fn apply(&mut self, name: &str, value: f32);

    fn output_channels(&self) -> usize {
        1
    }

    fn play(&mut self) {
        for block in self.chain() {
            block.play();
        }
    }

    fn out(&mut self, chnl: usize) {
        let mut chain = self.chain();
        if let Some(last) = chain.pop() {
            for block in chain {
                block.play();
            }
            last.out(chnl);
        }
    }

    fn stop(&mut self) {
        for block in self.chain().into_iter().rev() {
            block.stop();
        }
    }

    /// The first block of every chain is the input fader
    fn set_input(&mut self, source: SignalSource, fadetime: f32) {
        if let Some(fader) = self.chain().into_iter().next() {
            fader.set_input(source, fadetime);
        }
    }
}
