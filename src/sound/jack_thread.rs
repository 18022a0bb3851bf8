//! Jack client carrying the signal graph
//!
//! One input port from the instrument, one output port per device channel
//! the bank needs.  The graph renders inside jack's process callback.
use log::{debug, info, warn};

use crate::{
    common::{config::PedalConfig, pedal_error::PedalError},
    signal::graph::SignalGraph,
};

pub type ActiveAudio = jack::AsyncClient<Notifications, PedalProcess>;

pub struct AudioDevice {
    client: jack::Client,
    input: jack::Port<jack::AudioIn>,
    outputs: Vec<jack::Port<jack::AudioOut>>,
    capture_port: String,
    playback_prefix: String,
}

impl AudioDevice {
    pub fn open(config: &PedalConfig, out_channels: usize) -> Result<AudioDevice, PedalError> {
        let (client, status) = jack::Client::new(&config.client_name, jack::ClientOptions::NO_START_SERVER)
            .map_err(|e| PedalError::device("jack client", e))?;
        debug!("jack client status: {:?}", status);
        let input = client
            .register_port("in_1", jack::AudioIn::default())
            .map_err(|e| PedalError::device("jack input port", e))?;
        let mut outputs = vec![];
        for n in 1..=out_channels.max(1) {
            outputs.push(
                client
                    .register_port(&format!("out_{}", n), jack::AudioOut::default())
                    .map_err(|e| PedalError::device("jack output port", e))?,
            );
        }
        info!(
            "jack client {} at {} Hz, {} outputs",
            client.name(),
            client.sample_rate(),
            outputs.len()
        );
        Ok(AudioDevice {
            client,
            input,
            outputs,
            capture_port: config.capture_port.clone(),
            playback_prefix: config.playback_prefix.clone(),
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.client.sample_rate() as f32
    }

    pub fn output_channels(&self) -> usize {
        self.outputs.len()
    }

    /// Hand the graph to jack and wire the ports to the system
    pub fn start(self, graph: SignalGraph) -> Result<ActiveAudio, PedalError> {
        let in_name = self.input.name().map_err(|e| PedalError::device("jack input port", e))?;
        let mut out_names = vec![];
        for port in &self.outputs {
            out_names.push(port.name().map_err(|e| PedalError::device("jack output port", e))?);
        }
        let process = PedalProcess {
            input: self.input,
            outputs: self.outputs,
            graph,
        };
        let active_client = self
            .client
            .activate_async(Notifications, process)
            .map_err(|e| PedalError::device("jack activation", e))?;

        active_client
            .as_client()
            .connect_ports_by_name(&self.capture_port, &in_name)
            .map_err(|e| PedalError::device(&self.capture_port, e))?;
        for (n, name) in out_names.iter().enumerate() {
            let playback = format!("{}{}", self.playback_prefix, n + 1);
            if let Err(e) = active_client.as_client().connect_ports_by_name(name, &playback) {
                warn!("not connecting {} to {}: {}", name, playback, e);
            }
        }
        Ok(active_client)
    }
}

pub struct PedalProcess {
    input: jack::Port<jack::AudioIn>,
    outputs: Vec<jack::Port<jack::AudioOut>>,
    graph: SignalGraph,
}

impl jack::ProcessHandler for PedalProcess {
    fn process(&mut self, _: &jack::Client, ps: &jack::ProcessScope) -> jack::Control {
        self.graph.process(self.input.as_slice(ps));
        for (chnl, port) in self.outputs.iter_mut().enumerate() {
            let out = port.as_mut_slice(ps);
            let rendered = self.graph.output(chnl);
            if rendered.len() == out.len() {
                out.copy_from_slice(rendered);
            } else {
                out.fill(0.0);
            }
        }
        jack::Control::Continue
    }
}

pub struct Notifications;

impl jack::NotificationHandler for Notifications {
    fn thread_init(&self, _: &jack::Client) {
        debug!("JACK: thread init");
    }

    fn sample_rate(&mut self, _: &jack::Client, srate: jack::Frames) -> jack::Control {
        info!("JACK: sample rate changed to {}", srate);
        jack::Control::Continue
    }

    fn xrun(&mut self, _: &jack::Client) -> jack::Control {
        debug!("JACK: xrun occurred");
        jack::Control::Continue
    }
}
