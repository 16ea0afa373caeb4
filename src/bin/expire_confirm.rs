use std::process::ExitCode;

use clap::Parser;
use lib::{
    cli::Args,
    jobs::expire_confirm::run,
    settings::get_settings,
    solarnet::client::SolarNetClient,
    telemetry::init_tracing,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Missing or malformed arguments exit here, before any network call
    let args = Args::parse();
    let settings = get_settings()?;
    init_tracing(&settings.log_level, std::io::stderr);
    let client = SolarNetClient::new(&settings, args.credentials())?;
    let status = run(&args, &client, &mut std::io::stdout()).await?;
    Ok(ExitCode::from(status))
}
