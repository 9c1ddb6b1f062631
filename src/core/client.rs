use crate::core::download::read_blob;
use crate::core::endpoints::{endpoint_url, parse_base_url};
use crate::core::interceptor::intercept;
use crate::domain::model::{DocumentBlob, HttpMethod, Operation, UploadFile};
use crate::domain::ports::{ConfigProvider, DocumentApi};
use crate::utils::error::{ClientError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

/// Multipart field the backend reads uploads from.
pub const UPLOAD_FIELD: &str = "file";

const DOWNLOAD_ACCEPT: &str = "application/octet-stream, */*";

/// HTTP client for the document backend. Configuration is fixed at construction.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let base_url = parse_base_url(config.base_url())?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in config.extra_headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ClientError::InvalidConfigValueError {
                    field: "headers".to_string(),
                    value: name.clone(),
                    reason: format!("Invalid header name: {}", e),
                }
            })?;
            let header_value =
                HeaderValue::from_str(&value).map_err(|e| ClientError::InvalidConfigValueError {
                    field: format!("headers.{}", name),
                    value: value.clone(),
                    reason: format!("Invalid header value: {}", e),
                })?;
            headers.insert(header_name, header_value);
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(ClientError::ClientBuildError)?;

        tracing::debug!(
            "API client ready: base_url={}, timeout={:?}",
            base_url,
            config.timeout()
        );

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url_for(&self, operation: &Operation) -> Result<Url> {
        endpoint_url(&self.base_url, operation)
    }

    fn request(&self, operation: &Operation) -> Result<RequestBuilder> {
        let url = self.url_for(operation)?;
        let method = match operation.method() {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        tracing::debug!("Making API request: {} {}", method, url);
        Ok(self.http.request(method, url))
    }

    async fn get_json(&self, operation: Operation) -> Result<Value> {
        let request = self.request(&operation)?;
        intercept(operation, request, read_json).await
    }

    async fn post_json(&self, operation: Operation, data: &Value) -> Result<Value> {
        let request = self.request(&operation)?.json(data);
        intercept(operation, request, read_json).await
    }
}

/// The body as the server sent it: JSON when it parses, the raw text otherwise,
/// `null` when empty.
async fn read_json(response: Response) -> reqwest::Result<Value> {
    let text = response.text().await?;
    Ok(body_to_value(text))
}

fn body_to_value(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait::async_trait]
impl DocumentApi for ApiClient {
    async fn list_templates(&self) -> Result<Value> {
        self.get_json(Operation::ListTemplates).await
    }

    async fn generate_document(&self, data: &Value) -> Result<Value> {
        self.post_json(Operation::GenerateDocument, data).await
    }

    async fn upload_file(&self, file: UploadFile) -> Result<Value> {
        let operation = Operation::UploadFile;
        let request = self.request(&operation)?;

        let UploadFile {
            file_name,
            mime_type,
            content,
        } = file;
        tracing::debug!("Uploading {} ({} bytes)", file_name, content.len());

        let part = Part::bytes(content).file_name(file_name);
        let part = match mime_type {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| ClientError::InvalidConfigValueError {
                    field: "mime_type".to_string(),
                    value: mime.clone(),
                    reason: format!("Invalid MIME type: {}", e),
                })?,
            None => part,
        };

        let request = request.multipart(Form::new().part(UPLOAD_FIELD, part));
        intercept(operation, request, read_json).await
    }

    async fn template_preview(&self, template_id: &str) -> Result<Value> {
        self.get_json(Operation::TemplatePreview {
            template_id: template_id.to_string(),
        })
        .await
    }

    async fn download_document(&self, filename: &str) -> Result<DocumentBlob> {
        let operation = Operation::DownloadDocument {
            filename: filename.to_string(),
        };
        let request = self.request(&operation)?.header(ACCEPT, DOWNLOAD_ACCEPT);
        intercept(operation, request, read_blob).await
    }

    async fn document_fields(&self, type_id: &str) -> Result<Value> {
        self.get_json(Operation::DocumentFields {
            type_id: type_id.to_string(),
        })
        .await
    }

    async fn generate_title(&self, payload: &Value) -> Result<Value> {
        self.post_json(Operation::GenerateTitle, payload).await
    }

    async fn generate_content(&self, payload: &Value) -> Result<Value> {
        self.post_json(Operation::GenerateContent, payload).await
    }
}
