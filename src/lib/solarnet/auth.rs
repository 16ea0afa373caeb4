//! SNWS2 request signing.
//!
//! SolarNetwork authenticates token requests with an HMAC-SHA256 signature over a
//! canonical form of the request, keyed by a daily key derived from the token secret.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};
use time::{macros::format_description, OffsetDateTime, UtcOffset};

type HmacSha256 = Hmac<Sha256>;

pub const AUTH_SCHEME: &str = "SNWS2";
pub const DATE_HEADER: &str = "x-sn-date";
const SIGNING_ALGORITHM: &str = "SNWS2-HMAC-SHA256";
const SIGNING_KEY_REQUEST: &[u8] = b"snws2_request";
const SIGNED_HEADERS: &str = "host;x-sn-date";

#[derive(Debug)]
pub struct Credentials {
    pub token: String,
    secret: Secret<String>,
}

impl Credentials {
    pub fn new(token: &str, secret: &str) -> Credentials {
        Credentials {
            token: token.to_string(),
            secret: Secret::new(secret.to_string()),
        }
    }
}

pub struct RequestToSign<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub query: &'a str,
    // Host header value, including the port when it is not the scheme default
    pub host: &'a str,
    pub date: OffsetDateTime,
    pub body: &'a [u8],
}

#[derive(Debug, PartialEq, Eq)]
pub struct SignedHeaders {
    pub date: String,
    pub authorization: String,
}

pub fn sign(
    credentials: &Credentials,
    request: &RequestToSign,
) -> Result<SignedHeaders, time::error::Format> {
    let date = request.date.to_offset(UtcOffset::UTC);
    let date_header = http_date(date)?;
    let canonical = canonical_request(request, &date_header);
    let to_sign = string_to_sign(&canonical, date);
    let key = signing_key(credentials.secret.expose_secret(), date);
    let signature = hex::encode(hmac_sha256(&key, to_sign.as_bytes()));
    Ok(SignedHeaders {
        date: date_header,
        authorization: format!(
            "{} Credential={},SignedHeaders={},Signature={}",
            AUTH_SCHEME, credentials.token, SIGNED_HEADERS, signature
        ),
    })
}

/// `Tue, 25 Apr 2017 14:30:00 GMT`
pub fn http_date(date: OffsetDateTime) -> Result<String, time::error::Format> {
    date.to_offset(UtcOffset::UTC).format(format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    ))
}

fn compact_date(date: OffsetDateTime) -> String {
    format!("{:04}{:02}{:02}", date.year(), u8::from(date.month()), date.day())
}

fn compact_timestamp(date: OffsetDateTime) -> String {
    format!(
        "{}T{:02}{:02}{:02}Z",
        compact_date(date),
        date.hour(),
        date.minute(),
        date.second()
    )
}

pub fn canonical_query(query: &str) -> String {
    let mut pairs: Vec<(String, String)> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (
                urlencoding::encode(key).into_owned(),
                urlencoding::encode(value).into_owned(),
            )
        })
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<String>>()
        .join("&")
}

fn canonical_request(request: &RequestToSign, date_header: &str) -> String {
    format!(
        "{}\n{}\n{}\nhost:{}\n{}:{}\n{}\n{}",
        request.method,
        request.path,
        canonical_query(request.query),
        request.host,
        DATE_HEADER,
        date_header,
        SIGNED_HEADERS,
        hex::encode(Sha256::digest(request.body))
    )
}

fn string_to_sign(canonical_request: &str, date: OffsetDateTime) -> String {
    format!(
        "{}\n{}\n{}",
        SIGNING_ALGORITHM,
        compact_timestamp(date),
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    )
}

fn signing_key(secret: &str, date: OffsetDateTime) -> Vec<u8> {
    let date_key = hmac_sha256(
        format!("{}{}", AUTH_SCHEME, secret).as_bytes(),
        compact_date(date).as_bytes(),
    );
    hmac_sha256(&date_key, SIGNING_KEY_REQUEST)
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    // Intentional expect. HMAC accepts keys of any length.
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
