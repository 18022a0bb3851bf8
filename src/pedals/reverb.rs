//! Reverb: a room of adjustable size and decay time under the dry signal
use super::{
    controls::{setting_value, PedalSetting, SettingUnit},
    pedal::Pedal,
};
use crate::signal::{
    block::{BlockId, BlockParam, SignalSource},
    fader::InputFader,
    reverb::{self, MAX_SIZE, MIN_SIZE},
    server::{BlockHandle, BlockServer},
};

pub const REVTIME: f32 = 1.8;
pub const ROOM_SIZE: f32 = 1.2;
pub const BAL: f32 = 0.5;

pub fn settings() -> Vec<PedalSetting> {
    vec![
        PedalSetting::new(SettingUnit::Seconds, "revtime", REVTIME, 0.0, 20.0, 0.1).above(),
        PedalSetting::new(SettingUnit::Linear, "room_size", ROOM_SIZE, MIN_SIZE, MAX_SIZE, 0.05),
        PedalSetting::new(SettingUnit::Linear, "bal", BAL, 0.0, 1.0, 0.05),
    ]
}

pub struct Reverb {
    fader: BlockHandle,
    room: BlockHandle,
}

impl Reverb {
    pub fn new(server: &BlockServer, input: SignalSource, revtime: f32, room_size: f32, bal: f32) -> Reverb {
        let sr = server.sample_rate();
        let fader = server.create(InputFader::new(input, sr));
        let room = server.create(reverb::Reverb::new(fader.source(), revtime, room_size, bal, sr));
        Reverb { fader, room }
    }
    pub fn from_settings(server: &BlockServer, input: SignalSource, settings: &[PedalSetting]) -> Reverb {
        Self::new(
            server,
            input,
            setting_value(settings, "revtime", REVTIME),
            setting_value(settings, "room_size", ROOM_SIZE),
            setting_value(settings, "bal", BAL),
        )
    }
}

impl Pedal for Reverb {
    fn chain(&mut self) -> Vec<&mut BlockHandle> {
        vec![&mut self.fader, &mut self.room]
    }
    fn output(&self) -> BlockId {
        self.room.id()
    }
    fn apply(&mut self, name: &str, value: f32) {
        match name {
            "revtime" => self.room.set(BlockParam::Time, value),
            "room_size" => self.room.set(BlockParam::Size, value),
            "bal" => self.room.set(BlockParam::Balance, value),
            _ => (),
        }
    }
}

#[cfg(test)]
mod test_reverb_pedal {
    use super::*;
    use crate::signal::block::BlockCommand;

    #[test]
    fn tail_outlasts_the_note() {
        let (server, mut graph) = BlockServer::open(48_000.0);
        let mut reverb = Reverb::from_settings(&server, SignalSource::Instrument, &settings());
        reverb.out(0);
        server.flush().unwrap();
        for _ in 0..50 {
            graph.process(&[0.3; 256]);
        }
        for _ in 0..10 {
            graph.process(&[0.0; 256]);
        }
        assert!(graph.output(0).iter().any(|s| s.abs() > 1e-4));
    }

    #[test]
    fn knobs_reach_the_block() {
        let (server, _graph) = BlockServer::open(48_000.0);
        let mut reverb = Reverb::from_settings(&server, SignalSource::Instrument, &settings());
        server.take_pending();
        reverb.apply("revtime", 4.0);
        reverb.apply("room_size", 2.0);
        let cmds = server.take_pending();
        assert_eq!(cmds.len(), 2);
        assert!(matches!(cmds[0], BlockCommand::Set { param: BlockParam::Time, value, .. } if value == 4.0));
        assert!(matches!(cmds[1], BlockCommand::Set { param: BlockParam::Size, value, .. } if value == 2.0));
    }
}
