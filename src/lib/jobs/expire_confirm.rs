use std::io::{self, Write};

use crate::{
    cli::Args,
    models::expire_query::ExpireQuery,
    solarnet::client::{ApiResponse, ClientError, ExpireConfirm},
    telemetry::{error, info, TraceType},
};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

pub async fn confirm_expiration(
    client: &(impl ExpireConfirm + Sync),
    query: &ExpireQuery,
) -> Result<ApiResponse, ClientError> {
    let params = query.to_param_string();
    info(
        &TraceType::ExpireConfirm,
        &format!("Confirming expiration with params {}", params),
    );
    client.expire_confirm(&params).await
}

/// Echoes the arguments, makes the call and reports the outcome to `out`.
/// Returns the process exit status.
pub async fn run<W: Write>(
    args: &Args,
    client: &(impl ExpireConfirm + Sync),
    out: &mut W,
) -> io::Result<u8> {
    writeln!(out, "{}", args.summary())?;
    match confirm_expiration(client, &args.query()).await {
        Ok(response) => {
            info(&TraceType::ExpireConfirm, "Expiration confirmed.");
            writeln!(out, "{}", response)?;
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            writeln!(out, "Error occurred: {}", e)?;
            error(
                &TraceType::ExpireConfirmFailed,
                "Could not confirm expiration.",
                Some(Box::new(e)),
            );
            Ok(EXIT_FAILURE)
        }
    }
}
