use crate::models::local_datetime::LocalDateTime;

// SolarNetwork aggregation key for raw (unaggregated) datum
pub const DEFAULT_AGGREGATION_KEY: &str = "0";

/// Criteria for the datum records whose expiration is being confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpireQuery {
    pub aggregation_key: String,
    pub node_ids: String,
    // Comma separated, passed through as given
    pub source_ids: String,
    pub local_start_date: LocalDateTime,
    pub local_end_date: LocalDateTime,
}

impl ExpireQuery {
    pub fn new(
        node_ids: &str,
        source_ids: &str,
        local_start_date: LocalDateTime,
        local_end_date: LocalDateTime,
    ) -> ExpireQuery {
        ExpireQuery {
            aggregation_key: DEFAULT_AGGREGATION_KEY.to_string(),
            node_ids: node_ids.to_string(),
            source_ids: source_ids.to_string(),
            local_start_date,
            local_end_date,
        }
    }

    /// Query string for the expire confirm call. Keys are in sorted order.
    pub fn to_param_string(&self) -> String {
        format!(
            "aggregationKey={}&localEndDate={}&localStartDate={}&nodeIds={}&sourceIds={}",
            self.aggregation_key,
            self.local_end_date.iso_format(),
            self.local_start_date.iso_format(),
            self.node_ids,
            self.source_ids
        )
    }
}
