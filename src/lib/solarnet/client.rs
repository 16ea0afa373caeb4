use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use time::OffsetDateTime;

use crate::settings::Settings;
use crate::solarnet::auth::{canonical_query, sign, Credentials, RequestToSign, DATE_HEADER};
use crate::telemetry::{info, TraceType};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid SolarNetwork URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Could not format request date: {0}")]
    Date(#[from] time::error::Format),
}

/// A successful SolarNetwork response, kept as the raw body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

// Every SolarNetwork JSON response is wrapped in this envelope
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    message: Option<String>,
    code: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpireConfirm {
    /// Confirm expiration of the datum matched by `params`, a query string.
    async fn expire_confirm(&self, params: &str) -> Result<ApiResponse, ClientError>;
}

pub struct SolarNetClient {
    client: reqwest::Client,
    expire_confirm_endpoint: Url,
    credentials: Credentials,
}

impl SolarNetClient {
    pub fn new(settings: &Settings, credentials: Credentials) -> Result<SolarNetClient, ClientError> {
        let url = settings.expire_confirm_url();
        let expire_confirm_endpoint = Url::parse(&url).map_err(|e| ClientError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        if expire_confirm_endpoint.host_str().is_none() {
            return Err(ClientError::InvalidUrl {
                url,
                reason: "missing host".to_string(),
            });
        }
        Ok(SolarNetClient {
            client: Client::new(),
            expire_confirm_endpoint,
            credentials,
        })
    }

    pub fn expire_confirm_endpoint(&self) -> &Url {
        &self.expire_confirm_endpoint
    }
}

// The Host header reqwest sends: the port only appears when it is not the scheme default
fn host_header(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

fn response_outcome(status: StatusCode, body: String) -> Result<ApiResponse, ClientError> {
    let envelope = serde_json::from_str::<Envelope>(&body).ok();
    let unsuccessful = matches!(envelope, Some(Envelope { success: false, .. }));
    if status.is_success() && !unsuccessful {
        return Ok(ApiResponse {
            status: status.as_u16(),
            body,
        });
    }
    let message = match envelope {
        Some(Envelope {
            message: Some(message),
            ..
        }) => message,
        Some(Envelope {
            code: Some(code), ..
        }) => format!("SolarNetwork error code {}", code),
        _ if !body.trim().is_empty() => body,
        _ => status.to_string(),
    };
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ExpireConfirm for SolarNetClient {
    async fn expire_confirm(&self, params: &str) -> Result<ApiResponse, ClientError> {
        let mut url = self.expire_confirm_endpoint.clone();
        // Encoded the same way as the signed canonical query, so `+` and `%` survive decoding
        url.set_query(Some(&canonical_query(params)));
        let host = host_header(&url);
        let signed = sign(
            &self.credentials,
            &RequestToSign {
                method: "POST",
                path: url.path(),
                query: params,
                host: &host,
                date: OffsetDateTime::now_utc(),
                body: b"",
            },
        )?;
        info(
            &TraceType::SolarNetRequest,
            &format!("POST {}", self.expire_confirm_endpoint),
        );
        let resp = self
            .client
            .post(url)
            .header(DATE_HEADER, signed.date)
            .header("Authorization", signed.authorization)
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        info(
            &TraceType::SolarNetResponse,
            &format!("SolarNetwork responded with {}", status),
        );
        response_outcome(status, body)
    }
}
