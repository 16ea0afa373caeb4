//! Command-line argument definitions.

use clap::Parser;

use crate::models::{expire_query::ExpireQuery, local_datetime::LocalDateTime};
use crate::solarnet::auth::Credentials;

/// API Query Tool
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Node ID (non-empty string)
    #[arg(long)]
    pub node: String,

    /// Comma-separated list of source IDs
    #[arg(long)]
    pub sourceids: String,

    /// Start date in format YYYY-MM-DDTHH:MM:SS
    #[arg(long)]
    pub startdate: LocalDateTime,

    /// End date in format YYYY-MM-DDTHH:MM:SS
    #[arg(long)]
    pub enddate: LocalDateTime,

    /// API token
    #[arg(long)]
    pub token: String,

    /// API secret
    #[arg(long)]
    pub secret: String,
}

impl Args {
    /// Echo of the parsed arguments, credentials left out.
    pub fn summary(&self) -> String {
        format!(
            "Node: {}, Source IDs: {}, Start Date: {}, End Date: {}",
            self.node, self.sourceids, self.startdate, self.enddate
        )
    }

    pub fn query(&self) -> ExpireQuery {
        ExpireQuery::new(&self.node, &self.sourceids, self.startdate, self.enddate)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.token, &self.secret)
    }
}
