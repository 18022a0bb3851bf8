//! Fixed period loop: read the switches, run the controller, show the LED,
//! ship the tick's block commands to the audio thread, sleep
use std::thread::sleep;

use log::{debug, info};

use super::{context::ProcessContext, pedal_controller::PedalController};
use crate::{common::box_error::BoxError, hw_control::pedal_io::PedalIo, pedals::effect_bank::EffectBank};

pub struct PollLoop<IO: PedalIo> {
    ctx: ProcessContext,
    bank: EffectBank,
    io: IO,
    controller: PedalController,
    ticks: u64,
}

impl<IO: PedalIo> PollLoop<IO> {
    /// Takes ownership of the bank and routes its passthrough, which is the
    /// controller's starting state
    pub fn new(ctx: ProcessContext, mut bank: EffectBank, io: IO) -> PollLoop<IO> {
        bank.activate_passthrough();
        PollLoop {
            ctx,
            bank,
            io,
            controller: PedalController::new(),
            ticks: 0,
        }
    }

    pub fn controller(&self) -> &PedalController {
        &self.controller
    }
    pub fn bank(&self) -> &EffectBank {
        &self.bank
    }
    pub fn bank_mut(&mut self) -> &mut EffectBank {
        &mut self.bank
    }
    pub fn context(&self) -> &ProcessContext {
        &self.ctx
    }
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick(&mut self) -> Result<(), BoxError> {
        let levels = self.io.read_switches();
        if self.controller.tick(&mut self.bank, levels) {
            debug!("tick {}: {:?}", self.ticks, levels);
        }
        self.io.set_led(self.controller.led_lit());
        let sent = self.ctx.server.flush()?;
        if sent > 0 {
            debug!("tick {}: sent {} block commands", self.ticks, sent);
        }
        self.ticks += 1;
        Ok(())
    }

    /// Runs until the audio side goes away
    pub fn run(&mut self) -> Result<(), BoxError> {
        info!(
            "poll loop running every {} ms",
            self.ctx.config.poll_interval.as_millis()
        );
        loop {
            self.tick()?;
            sleep(self.ctx.config.poll_interval);
        }
    }
}
