use clap::Parser;
use log::{error, info};
use sfx_pedal::{common::box_error::BoxError, sound::client};

/// Two footswitch effects pedal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// json settings file in the working directory
    #[arg(short, long, default_value = "settings.json")]
    settings: String,
}

fn main() -> Result<(), BoxError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("starting sfx_pedal with {}", args.settings);

    let res = client::run(&args.settings);
    if let Err(e) = &res {
        error!("pedal stopped: {}", e);
    }
    res
}
