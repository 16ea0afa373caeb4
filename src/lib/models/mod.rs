pub mod expire_query;
pub mod local_datetime;
