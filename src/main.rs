use bb84::config::{parse_n_bits_arg, parse_seed_arg};
use bb84::{ProtocolConfig, ProtocolRunner};
use log::{error, info};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match demonstrate_protocol() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("BB84 demo failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn demonstrate_protocol() -> bb84::Result<()> {
    let mut config = ProtocolConfig::from_env()?;
    let mut args = env::args().skip(1);
    if let Some(raw) = args.next() {
        config = config.with_n_bits(parse_n_bits_arg(&raw)?);
    }
    if let Some(raw) = args.next() {
        config = config.with_seed(parse_seed_arg(&raw)?);
    }
    let runner = ProtocolRunner::new(config);
    info!("Running BB84 with {:?}", runner.config());

    let outcome = runner.run()?;

    println!("{}", outcome);
    println!("Key fingerprint (SHA-256): {}", outcome.key().fingerprint());
    println!("\nThis key can now be used for symmetric encryption of messages.");
    Ok(())
}
