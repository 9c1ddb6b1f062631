use crate::config::cli::Command;
use crate::domain::model::UploadFile;
use crate::domain::ports::DocumentApi;
use crate::utils::error::{ClientError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Json(Value),
    Saved { path: PathBuf, bytes: usize },
}

pub async fn run_command<A: DocumentApi + ?Sized>(api: &A, command: &Command) -> Result<CommandOutput> {
    match command {
        Command::Templates => api.list_templates().await.map(CommandOutput::Json),
        Command::Generate { payload } => {
            let data = parse_payload(payload).await?;
            api.generate_document(&data).await.map(CommandOutput::Json)
        }
        Command::Upload { path } => {
            let file = UploadFile::from_path(path).await?;
            api.upload_file(file).await.map(CommandOutput::Json)
        }
        Command::Preview { template_id } => {
            api.template_preview(template_id).await.map(CommandOutput::Json)
        }
        Command::Download { filename, output } => {
            let blob = api.download_document(filename).await?;
            let path = output
                .clone()
                .unwrap_or_else(|| default_output_path(filename, blob.suggested_name.as_deref()));
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, &blob.data).await?;
            tracing::debug!("Saved {} bytes to {}", blob.len(), path.display());
            Ok(CommandOutput::Saved {
                path,
                bytes: blob.len(),
            })
        }
        Command::Fields { type_id } => api.document_fields(type_id).await.map(CommandOutput::Json),
        Command::Title { payload } => {
            let data = parse_payload(payload).await?;
            api.generate_title(&data).await.map(CommandOutput::Json)
        }
        Command::Content { payload } => {
            let data = parse_payload(payload).await?;
            api.generate_content(&data).await.map(CommandOutput::Json)
        }
    }
}

/// Bare file name to save a download under when no output path is given.
/// Directory parts of the requested name are dropped, so the file always lands
/// in the working directory.
pub fn default_output_path(filename: &str, suggested_name: Option<&str>) -> PathBuf {
    [Some(filename), suggested_name]
        .into_iter()
        .flatten()
        .find_map(|name| Path::new(name).file_name())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("download"))
}

/// Inline JSON, or `@path` to read it from a file.
pub async fn parse_payload(raw: &str) -> Result<Value> {
    let text = match raw.strip_prefix('@') {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => raw.to_string(),
    };
    if text.trim().is_empty() {
        return Err(ClientError::MissingConfigError {
            field: "payload".to_string(),
        });
    }
    Ok(serde_json::from_str(&text)?)
}
