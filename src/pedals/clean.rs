//! The passthrough unit used for bypass
use super::pedal::Pedal;
use crate::signal::{
    block::{BlockId, SignalSource},
    fader::InputFader,
    server::{BlockHandle, BlockServer},
};

pub struct Clean {
    fader: BlockHandle,
}

impl Clean {
    pub fn new(server: &BlockServer, input: SignalSource) -> Clean {
        Clean {
            fader: server.create(InputFader::new(input, server.sample_rate())),
        }
    }
}

impl Pedal for Clean {
    fn chain(&mut self) -> Vec<&mut BlockHandle> {
        vec![&mut self.fader]
    }
    fn output(&self) -> BlockId {
        self.fader.id()
    }
    fn apply(&mut self, _name: &str, _value: f32) {}
}

#[cfg(test)]
mod test_clean {
    use super::*;

    #[test]
    fn passes_the_instrument() {
        let (server, mut graph) = BlockServer::open(48_000.0);
        let mut clean = Clean::new(&server, SignalSource::Instrument);
        clean.out(0);
        server.flush().unwrap();
        graph.process(&[0.2, 0.3, 0.4]);
        assert_eq!(graph.output(0), &[0.2, 0.3, 0.4]);
        assert_eq!(graph.routed_blocks(), vec![clean.output()]);
    }
}
