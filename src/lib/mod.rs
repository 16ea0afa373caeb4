pub mod cli;
pub mod jobs;
pub mod models;
pub mod settings;
pub mod solarnet;
pub mod telemetry;
