use clap::Parser;
use lib::{
    cli::Args,
    jobs::expire_confirm::{run, EXIT_FAILURE, EXIT_SUCCESS},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::{
    matchers::{any, header_exists, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use crate::utils::{args_from, spawn_client};

const VALID: [(&str, &str); 6] = [
    ("--node", "123"),
    ("--sourceids", "A,B"),
    ("--startdate", "2024-01-01T00:00:00"),
    ("--enddate", "2024-01-02T00:00:00"),
    ("--token", "tok"),
    ("--secret", "sec"),
];
const ECHO: &str =
    "Node: 123, Source IDs: A,B, Start Date: 2024-01-01 00:00:00, End Date: 2024-01-02 00:00:00";

#[tokio::test]
async fn test_expire_confirm_success_prints_raw_response() {
    // SETUP
    let mock_solarnet = MockServer::start().await;
    let response_body = r#"{"success":true,"data":{"jobId":"d1c0a1","jobState":"Queued","datumCount":42}}"#;
    Mock::given(method("POST"))
        .and(path("/solaruser/api/v1/sec/expire/datum-delete/confirm"))
        .and(query_param("aggregationKey", "0"))
        .and(query_param("localEndDate", "2024-01-02T00:00:00"))
        .and(query_param("localStartDate", "2024-01-01T00:00:00"))
        .and(query_param("nodeIds", "123"))
        .and(query_param("sourceIds", "A,B"))
        .and(header_exists("authorization"))
        .and(header_exists("x-sn-date"))
        .respond_with(ResponseTemplate::new(200).set_body_string(response_body))
        .expect(1)
        .mount(&mock_solarnet)
        .await;
    let args = Args::parse_from(args_from(&VALID));
    let client = spawn_client(&mock_solarnet, &args);

    // GO
    let mut out = Vec::new();
    let status = run(&args, &client, &mut out).await.expect("Failed to write output");

    // ASSERT
    assert_eq!(status, EXIT_SUCCESS);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{}\n{}\n", ECHO, response_body)
    );
}

#[tokio::test]
async fn test_expire_confirm_rejected_by_solarnet() {
    let mock_solarnet = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "code": "SEC.00403",
            "message": "Access denied"
        })))
        .expect(1)
        .mount(&mock_solarnet)
        .await;
    let args = Args::parse_from(args_from(&VALID));
    let client = spawn_client(&mock_solarnet, &args);

    let mut out = Vec::new();
    let status = run(&args, &client, &mut out).await.expect("Failed to write output");

    assert_eq!(status, EXIT_FAILURE);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{}\nError occurred: Access denied\n", ECHO)
    );
}

#[tokio::test]
async fn test_expire_confirm_unsuccessful_envelope_is_a_failure() {
    let mock_solarnet = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "No datum matched"
        })))
        .expect(1)
        .mount(&mock_solarnet)
        .await;
    let args = Args::parse_from(args_from(&VALID));
    let client = spawn_client(&mock_solarnet, &args);

    let mut out = Vec::new();
    let status = run(&args, &client, &mut out).await.expect("Failed to write output");

    assert_eq!(status, EXIT_FAILURE);
    assert!(String::from_utf8(out)
        .unwrap()
        .ends_with("Error occurred: No datum matched\n"));
}

#[tokio::test]
async fn test_invalid_arguments_never_reach_solarnet() {
    let mock_solarnet = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_solarnet)
        .await;

    for missing in 0..VALID.len() {
        let pairs: Vec<(&str, &str)> = VALID
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != missing)
            .map(|(_, pair)| *pair)
            .collect();
        let err = Args::try_parse_from(args_from(&pairs)).err().unwrap();
        assert_ne!(err.exit_code(), 0);
    }

    let mut bad_date = VALID;
    bad_date[2] = ("--startdate", "2024-13-40");
    let err = Args::try_parse_from(args_from(&bad_date)).err().unwrap();
    assert_ne!(err.exit_code(), 0);
    assert!(err.to_string().contains("2024-13-40"));
}
