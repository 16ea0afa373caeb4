use lib::{
    cli::Args,
    settings::{Settings, DEFAULT_EXPIRE_CONFIRM_PATH},
    solarnet::client::SolarNetClient,
    telemetry::init_tracing,
};
use once_cell::sync::Lazy;
use wiremock::MockServer;

// Set TEST_LOG to see the JSON log lines
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_tracing("info", std::io::stdout);
    } else {
        init_tracing("info", std::io::sink);
    };
});

pub fn settings_for(server: &MockServer) -> Settings {
    Settings {
        api_url: server.uri(),
        expire_confirm_path: DEFAULT_EXPIRE_CONFIRM_PATH.to_string(),
        log_level: "info".to_string(),
    }
}

pub fn spawn_client(server: &MockServer, args: &Args) -> SolarNetClient {
    Lazy::force(&TRACING);
    SolarNetClient::new(&settings_for(server), args.credentials())
        .expect("Failed to build client")
}

pub fn args_from(pairs: &[(&str, &str)]) -> Vec<String> {
    let mut argv = vec!["expire_confirm".to_string()];
    for (flag, value) in pairs {
        argv.push(flag.to_string());
        argv.push(value.to_string());
    }
    argv
}
