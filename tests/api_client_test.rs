use anyhow::Result;
use docgen_client::{ApiClient, ClientConfig, ClientError, DocumentApi, UploadFile};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument::WithSubscriber;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Counts ERROR events seen while a future runs.
#[derive(Clone, Default)]
struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn client_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig::default().with_base_url(server.url("/api"));
    ApiClient::new(&config).expect("client should build")
}

#[tokio::test]
async fn test_list_templates_returns_body_unchanged() -> Result<()> {
    let server = MockServer::start();
    let body = json!({"data": [{"id": 1, "name": "通知"}, {"id": 2, "name": "请示"}]});

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/templates")
            .header("content-type", "application/json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body.clone());
    });

    let client = client_for(&server);
    let result = client.list_templates().await?;

    mock.assert();
    assert_eq!(result, body);
    Ok(())
}

#[tokio::test]
async fn test_generate_document_posts_exact_json() -> Result<()> {
    let server = MockServer::start();
    let payload = json!({"templateId": "t1", "fields": {"name": "Bob"}});

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/generate")
            .header("content-type", "application/json")
            .json_body(json!({"templateId": "t1", "fields": {"name": "Bob"}}));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"fileUrl": "/out/1.docx"}));
    });

    let client = client_for(&server);
    let result = client.generate_document(&payload).await?;

    mock.assert();
    assert_eq!(result, json!({"fileUrl": "/out/1.docx"}));
    Ok(())
}

#[tokio::test]
async fn test_upload_sends_single_file_field() -> Result<()> {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/upload")
            .body_contains("name=\"file\"; filename=\"notes.txt\"")
            .body_contains("meeting at nine")
            .matches(|req| {
                let multipart = req
                    .headers
                    .as_ref()
                    .map(|headers| {
                        headers.iter().any(|(name, value)| {
                            name.eq_ignore_ascii_case("content-type")
                                && value.starts_with("multipart/form-data; boundary=")
                        })
                    })
                    .unwrap_or(false);
                let fields = req
                    .body
                    .as_ref()
                    .map(|body| String::from_utf8_lossy(body).matches("name=\"").count())
                    .unwrap_or(0);
                multipart && fields == 1
            });
        then.status(200)
            .json_body(json!({"success": true, "content": "meeting at nine"}));
    });

    let client = client_for(&server);
    let file = UploadFile::new("notes.txt", "meeting at nine");
    let result = client.upload_file(file).await?;

    mock.assert();
    assert_eq!(result["success"], json!(true));
    Ok(())
}

#[tokio::test]
async fn test_template_preview_uses_id_in_path() -> Result<()> {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/template-preview/notice-01");
        then.status(200)
            .json_body(json!({"success": true, "preview": "<p>通知</p>"}));
    });

    let client = client_for(&server);
    let result = client.template_preview("notice-01").await?;

    mock.assert();
    assert_eq!(result["preview"], json!("<p>通知</p>"));
    Ok(())
}

#[tokio::test]
async fn test_template_preview_rejection_propagates() -> Result<()> {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/template-preview/no-such-template");
        then.status(404).json_body(json!({"error": "模板不存在"}));
    });

    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());

    let client = client_for(&server);
    let err = client
        .template_preview("no-such-template")
        .with_subscriber(subscriber)
        .await
        .unwrap_err();

    mock.assert();
    assert!(matches!(err, ClientError::RequestFailed { .. }));
    assert_eq!(err.status(), Some(404));
    assert!(err.response_body().unwrap_or_default().contains("模板不存在"));
    assert_eq!(counter.count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_download_returns_raw_bytes() -> Result<()> {
    let server = MockServer::start();
    // Looks like JSON on purpose: the client must not parse it.
    let payload: Vec<u8> = b"{\"not\": \"parsed\"}\xff\x00".to_vec();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/download/report.pdf")
            .header("accept", "application/octet-stream, */*");
        then.status(200)
            .header("content-type", "application/pdf")
            .header("content-disposition", "attachment; filename=\"report.pdf\"")
            .body(payload.clone());
    });

    let client = client_for(&server);
    let blob = client.download_document("report.pdf").await?;

    mock.assert();
    assert_eq!(blob.data, payload);
    assert_eq!(blob.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(blob.suggested_name.as_deref(), Some("report.pdf"));
    Ok(())
}

#[tokio::test]
async fn test_supplementary_endpoints() -> Result<()> {
    let server = MockServer::start();

    let fields = server.mock(|when, then| {
        when.method(GET).path("/api/document-fields/notice");
        then.status(200)
            .json_body(json!({"data": [{"field_name": "title"}]}));
    });
    let title = server.mock(|when, then| {
        when.method(POST)
            .path("/api/generate-title")
            .json_body(json!({"content": "关于召开会议的通知"}));
        then.status(200).json_body(json!({"success": true, "title": "会议通知"}));
    });
    let content = server.mock(|when, then| {
        when.method(POST)
            .path("/api/generate-content")
            .json_body(json!({"topic": "会议"}));
        then.status(200).json_body(json!({"success": true, "content": "..."}));
    });

    let client = client_for(&server);
    let result = client.document_fields("notice").await?;
    assert_eq!(result["data"][0]["field_name"], json!("title"));
    let result = client
        .generate_title(&json!({"content": "关于召开会议的通知"}))
        .await?;
    assert_eq!(result["title"], json!("会议通知"));
    let result = client.generate_content(&json!({"topic": "会议"})).await?;
    assert_eq!(result["success"], json!(true));

    fields.assert();
    title.assert();
    content.assert();
    Ok(())
}

#[tokio::test]
async fn test_extra_headers_are_sent() -> Result<()> {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/templates")
            .header("x-client", "docgen")
            .header("content-type", "application/json");
        then.status(200).json_body(json!({"data": []}));
    });

    let config = ClientConfig::default()
        .with_base_url(server.url("/api"))
        .with_header("X-Client", "docgen");
    let client = ApiClient::new(&config)?;
    client.list_templates().await?;

    mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_non_json_body_is_returned_as_text() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/templates");
        then.status(200).body("maintenance");
    });

    let client = client_for(&server);
    let result = client.list_templates().await?;

    assert_eq!(result, json!("maintenance"));
    Ok(())
}

#[tokio::test]
async fn test_server_error_logged_once() -> Result<()> {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/generate");
        then.status(500).json_body(json!({"success": false, "message": "文档生成失败"}));
    });

    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());

    let client = client_for(&server);
    let err = client
        .generate_document(&json!({"content": "x"}))
        .with_subscriber(subscriber)
        .await
        .unwrap_err();

    mock.assert();
    assert_eq!(err.status(), Some(500));
    assert_eq!(counter.count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_network_failure_logged_once() -> Result<()> {
    // Nothing listens on the discard port.
    let config = ClientConfig::default().with_base_url("http://127.0.0.1:9/api");
    let client = ApiClient::new(&config)?;

    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());

    let err = client
        .download_document("report.pdf")
        .with_subscriber(subscriber)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::RequestFailed { .. }));
    assert_eq!(err.status(), None);
    assert_eq!(counter.count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_timeout_is_a_request_failure() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/templates");
        then.status(200)
            .delay(Duration::from_millis(1500))
            .json_body(json!({"data": []}));
    });

    let config = ClientConfig::default()
        .with_base_url(server.url("/api"))
        .with_timeout_ms(200);
    let client = ApiClient::new(&config)?;

    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());

    let err = client
        .list_templates()
        .with_subscriber(subscriber)
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(counter.count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_response_key_order_is_preserved() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/api/generate");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"zeta":1,"alpha":2,"middle":{"y":true,"b":null}}"#);
    });

    let client = client_for(&server);
    let result = client.generate_document(&json!({"templateId": "t1"})).await?;

    assert_eq!(
        serde_json::to_string(&result)?,
        r#"{"zeta":1,"alpha":2,"middle":{"y":true,"b":null}}"#
    );
    Ok(())
}
