use strum_macros::Display as EnumToString;
use tracing::subscriber::set_global_default;
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

#[derive(Debug, EnumToString, PartialEq, Eq)]
#[strum(serialize_all = "kebab_case")]
pub enum TraceType {
    ExpireConfirm,
    ExpireConfirmFailed,
    SolarNetRequest,
    SolarNetResponse,
}

/// Creates a tracing subscriber and sets it as the global default.
///
/// Events are written as JSON lines to `sink`. The binary passes stderr so that
/// stdout only carries the command's own output.
pub fn init_tracing<Sink>(log_level: &str, sink: Sink)
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    // Filter out any events that are below `log_level`.
    let env_filter = EnvFilter::new(log_level);

    let subscriber = Registry::default()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(sink));

    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}

pub fn info(trace_type: &TraceType, message: &str) {
    tracing::info!(r#type = trace_type.to_string().as_str(), message);
}

pub fn error(trace_type: &TraceType, message: &str, error: Option<Box<dyn std::error::Error>>) {
    match error {
        Some(err) => tracing::error!(
            r#type = trace_type.to_string().as_str(),
            "Message: '{}'. Original error: {:?}",
            message,
            err
        ),
        None => tracing::error!(r#type = trace_type.to_string().as_str(), message),
    };
}
