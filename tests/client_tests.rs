//! Wire-level client behavior against a mock server.

use std::time::{Duration, Instant};

use jhttp::{CancellationToken, Client, ClientConfig, ClientError, Cookie, FormData, Param, Payload};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with_retry(retry: u32) -> Client {
    Client::new(ClientConfig::builder().retry(retry).build())
}

#[tokio::test]
async fn always_failing_endpoint_consumes_retry_plus_one_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_with_retry(2);
    let err = client
        .get(&format!("{}/flaky", server.uri()), Payload::default(), &[])
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    server.verify().await;
}

#[tokio::test]
async fn zero_retry_means_exactly_one_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_retry(0);
    let err = client
        .get(&server.uri(), Payload::default(), &[])
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    server.verify().await;
}

#[tokio::test]
async fn success_on_second_attempt_stops_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = client_with_retry(5);
    let response = client
        .get(&server.uri(), Payload::default(), &[])
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.text(), "ok");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn only_200_counts_as_success() {
    for status in [201u16, 404, 500] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_with_retry(0)
            .get(&server.uri(), Payload::default(), &[])
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(status));
        server.verify().await;
    }
}

#[tokio::test]
async fn last_applied_header_value_reaches_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("x-api-key", "v2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(
        ClientConfig::builder()
            .header("X-Api-Key", "v1")
            .header("X-Api-Key", "v2")
            .build(),
    );
    client
        .get(&server.uri(), Payload::default(), &[])
        .await
        .unwrap();

    server.verify().await;
}

#[tokio::test]
async fn cookies_are_sent_on_http_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("cookie", "session=abc; theme=dark"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = Client::new(ClientConfig::default());
    client.set_cookies(vec![Cookie::new("session", "abc"), Cookie::new("theme", "dark")]);
    client
        .get(&server.uri(), Payload::default(), &[])
        .await
        .unwrap();

    server.verify().await;
}

#[tokio::test]
async fn query_params_are_joined_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("k1", "v1"))
        .and(query_param("k2", "v2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_with_retry(0)
        .get(
            &server.uri(),
            Payload::default(),
            &[Param::new("k1", "v1"), Param::new("k2", "v2")],
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("k1=v1&k2=v2"));
}

#[tokio::test]
async fn zero_params_still_append_a_bare_question_mark() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client_with_retry(0)
        .get(&server.uri(), Payload::default(), &[])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some(""));
}

#[tokio::test]
async fn post_sends_string_payload_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client_with_retry(0)
        .post(&server.uri(), Payload::from("plain text"), &[])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].body, b"plain text");
}

#[tokio::test]
async fn post_sends_json_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let payload = Payload::json(&serde_json::json!({"item": "widget", "quantity": 5})).unwrap();
    client_with_retry(0)
        .post(&server.uri(), payload, &[])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["item"], "widget");
}

#[tokio::test]
async fn form_payload_forces_its_boundary_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let form = FormData::new().text("name", "widget");
    let content_type = form.content_type();
    client_with_retry(0)
        .post(&server.uri(), form.into(), &[])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let sent = requests[0].headers.get("content-type").unwrap();
    assert_eq!(sent.to_str().unwrap(), content_type);
    assert!(content_type.starts_with("multipart/form-data; boundary="));
}

#[tokio::test]
async fn configured_content_type_overrides_the_form_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = Client::new(
        ClientConfig::builder()
            .header("Content-Type", "application/json")
            .build(),
    );
    client
        .post(&server.uri(), FormData::new().text("a", "1").into(), &[])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let sent = requests[0].headers.get("content-type").unwrap();
    assert_eq!(sent.to_str().unwrap(), "application/json");
}

#[tokio::test]
async fn two_failures_then_success_takes_at_least_two_delays() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_with_retry(2);
    let start = Instant::now();
    let response = client
        .get(&server.uri(), Payload::default(), &[])
        .await
        .unwrap();

    assert!(response.is_success());
    assert!(start.elapsed() >= Duration::from_millis(1000));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn cancellation_aborts_each_attempt_but_not_the_retry_loop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    token.cancel();
    let client = Client::new(
        ClientConfig::builder()
            .cancel_token(token)
            .retry(1)
            .build(),
    );

    let start = Instant::now();
    let err = client
        .get(&server.uri(), Payload::default(), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Cancelled));
    // One fixed delay ran between the two cancelled attempts.
    assert!(start.elapsed() >= Duration::from_millis(500));
    server.verify().await;
}

#[tokio::test]
async fn timeout_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
        .expect(2)
        .mount(&server)
        .await;

    let client = Client::new(
        ClientConfig::builder()
            .timeout(Duration::from_millis(50))
            .retry(1)
            .build(),
    );
    let err = client
        .get(&server.uri(), Payload::default(), &[])
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    server.verify().await;
}
