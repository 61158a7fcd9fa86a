use std::env;
use std::process::ExitCode;
use auction_house::config::Config;
use auction_house::domain::{handle, AuctionSystem};
use auction_house::script::{read_commands, ScriptError};
use log::{info, warn};

// Replays a command script against a fresh auction system, one JSON result per line.
fn run(script: &str, config: &Config) -> Result<(), ScriptError> {
    let commands = read_commands(script)?;
    let mut system = AuctionSystem::from_config(config);

    info!("Replaying {} commands from {}", commands.len(), script);

    for (index, command) in commands.into_iter().enumerate() {
        match handle(command, &mut system) {
            Ok(success) => println!("{}", serde_json::to_string(&success)?),
            Err(err) => warn!("Command {} rejected: {}", index + 1, err),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(script) = args.first() else {
        eprintln!("usage: auction-house <script.jsonl> [config.json]");
        return ExitCode::from(2);
    };

    let config = match args.get(1).map(Config::load) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
        None => Config::default(),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    match run(script, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
