use sfx_pedal::{
    common::{config::PedalConfig, pedal_error::PedalError},
    control::{
        context::ProcessContext,
        pedal_controller::{PedalController, PedalMode},
        poll_loop::PollLoop,
    },
    hw_control::pedal_io::{PedalIo, SwitchLevels},
    pedals::{
        effect_bank::{default_passthrough, EffectBank, UnitConfig},
        effect_unit::{EffectKind, UnitState},
    },
    signal::{
        block::{BlockCommand, BlockId, SignalSource},
        graph::SignalGraph,
        server::BlockServer,
    },
};

const IDLE: SwitchLevels = SwitchLevels {
    toggle: false,
    cycle: false,
};
const A: SwitchLevels = SwitchLevels {
    toggle: true,
    cycle: false,
};
const B: SwitchLevels = SwitchLevels {
    toggle: false,
    cycle: true,
};
const AB: SwitchLevels = SwitchLevels {
    toggle: true,
    cycle: true,
};

fn three_units() -> Vec<UnitConfig> {
    vec![
        UnitConfig::new(EffectKind::Flanger),
        UnitConfig::new(EffectKind::Vibrato),
        UnitConfig::new(EffectKind::Tremolo),
    ]
}

fn setup() -> (BlockServer, SignalGraph, EffectBank) {
    let (server, graph) = BlockServer::open(48_000.0);
    let mut bank =
        EffectBank::build(&server, SignalSource::Instrument, &three_units(), &default_passthrough()).unwrap();
    bank.activate_passthrough();
    (server, graph, bank)
}

/// Press and release, keeping every command the two ticks queue
fn press(ctl: &mut PedalController, bank: &mut EffectBank, server: &BlockServer, levels: SwitchLevels) -> Vec<BlockCommand> {
    let mut sent = vec![];
    for step in [levels, IDLE] {
        ctl.tick(bank, step);
        sent.extend(server.take_pending());
        assert!(bank.routed_count() <= 1);
    }
    sent
}

fn count(cmds: &[BlockCommand], id: BlockId) -> (usize, usize) {
    let outs = cmds
        .iter()
        .filter(|c| matches!(c, BlockCommand::Out { id: o, .. } if *o == id))
        .count();
    let stops = cmds
        .iter()
        .filter(|c| matches!(c, BlockCommand::Stop(s) if *s == id))
        .count();
    (outs, stops)
}

#[test]
fn toggle_cycle_cycle_toggle() {
    let (server, _graph, mut bank) = setup();
    server.take_pending();
    let mut ctl = PedalController::new();
    let third = bank.unit(2).unwrap().output_block_id();

    let mut leds = vec![];
    let mut all = vec![];
    for levels in [A, B, B, A] {
        all.extend(press(&mut ctl, &mut bank, &server, levels));
        leds.push(ctl.led_lit());
    }

    assert_eq!(ctl.mode(), PedalMode::Bypass);
    assert_eq!(bank.index(), 2);
    // four flips from unlit
    assert_eq!(leds, vec![true, false, true, false]);
    assert_eq!(count(&all, third), (1, 1));
    assert_eq!(bank.passthrough().state(), UnitState::Routed);
    assert_eq!(bank.routed_count(), 1);
}

#[test]
fn simultaneous_presses_toggle_first() {
    let (server, _graph, mut bank) = setup();
    let mut ctl = PedalController::new();
    press(&mut ctl, &mut bank, &server, AB);
    assert_eq!(ctl.mode(), PedalMode::EffectSelected);
    assert_eq!(bank.index(), 1);
    assert_eq!(bank.unit(1).unwrap().state(), UnitState::Routed);
    assert_eq!(bank.routed_count(), 1);
}

#[test]
fn out_of_range_depth_aborts_build() {
    let (server, _graph) = BlockServer::open(48_000.0);
    let configs = vec![
        UnitConfig::new(EffectKind::Flanger),
        UnitConfig::new(EffectKind::Tremolo).with_param("depth", 1.5),
    ];
    let boom = EffectBank::build(&server, SignalSource::Instrument, &configs, &default_passthrough());
    match boom {
        Err(e) => {
            assert!(matches!(e, PedalError::Configuration { .. }));
            assert!(e.is_fatal());
        }
        Ok(_) => panic!("bank should not build"),
    }
    assert_eq!(server.pending(), 0);
}

#[test]
fn reroute_keeps_parameters() {
    let (server, _graph, mut bank) = setup();
    bank.set_parameter(0, "feedback", 0.8).unwrap();
    bank.activate(0).unwrap();
    let before = bank.as_json();
    bank.activate_passthrough();
    bank.activate(0).unwrap();
    assert_eq!(bank.unit(0).unwrap().state(), UnitState::Routed);
    assert_eq!(bank.as_json()["units"][0]["settings"], before["units"][0]["settings"]);
    assert_eq!(bank.unit(0).unwrap().get_parameter("feedback").unwrap(), 0.8);
    server.take_pending();
}

#[test]
fn bad_live_parameter_keeps_the_sound() {
    let (server, _graph, mut bank) = setup();
    bank.activate(2).unwrap();
    server.take_pending();
    let err = bank.set_parameter(2, "depth", 3.0).unwrap_err();
    assert!(!err.is_fatal());
    assert_eq!(server.pending(), 0);
    assert_eq!(bank.unit(2).unwrap().get_parameter("depth").unwrap(), 1.0);
    assert_eq!(bank.unit(2).unwrap().state(), UnitState::Routed);
}

/// Switch levels from a script, LED writes recorded
struct ScriptedIo {
    script: Vec<SwitchLevels>,
    leds: Vec<bool>,
}

impl PedalIo for ScriptedIo {
    fn read_switches(&mut self) -> SwitchLevels {
        if self.script.is_empty() {
            IDLE
        } else {
            self.script.remove(0)
        }
    }
    fn set_led(&mut self, lit: bool) {
        self.leds.push(lit);
    }
}

#[test]
fn poll_loop_end_to_end() {
    let (server, mut graph) = BlockServer::open(48_000.0);
    graph.set_output_channels(2);
    let ctx = ProcessContext::new(PedalConfig::default(), server);
    let bank =
        EffectBank::build(&ctx.server, SignalSource::Instrument, &three_units(), &default_passthrough()).unwrap();
    let io = ScriptedIo {
        script: vec![IDLE, A, IDLE, B, IDLE],
        leds: vec![],
    };
    let mut poll = PollLoop::new(ctx, bank, io);

    poll.tick().unwrap();
    graph.process(&[0.25; 64]);
    // clean passthrough is the instrument untouched
    assert_eq!(graph.output(0), &[0.25; 64]);

    for _ in 0..4 {
        poll.tick().unwrap();
        graph.process(&[0.25; 64]);
        assert_eq!(graph.routed_blocks().len(), 1);
    }
    assert_eq!(poll.bank().index(), 1);
    assert_eq!(
        graph.routed_blocks(),
        vec![poll.bank().unit(1).unwrap().output_block_id()]
    );
    assert!(!poll.controller().led_lit());
}
