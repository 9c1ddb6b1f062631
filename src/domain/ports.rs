use crate::domain::model::{DocumentBlob, UploadFile};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Duration;
    /// Extra headers sent with every request, on top of `Content-Type: application/json`.
    fn extra_headers(&self) -> Vec<(String, String)>;
}

/// The document backend as seen by callers. JSON results are the server body, unmodified.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list_templates(&self) -> Result<Value>;
    async fn generate_document(&self, data: &Value) -> Result<Value>;
    async fn upload_file(&self, file: UploadFile) -> Result<Value>;
    async fn template_preview(&self, template_id: &str) -> Result<Value>;
    async fn download_document(&self, filename: &str) -> Result<DocumentBlob>;

    async fn document_fields(&self, type_id: &str) -> Result<Value>;
    async fn generate_title(&self, payload: &Value) -> Result<Value>;
    async fn generate_content(&self, payload: &Value) -> Result<Value>;
}
