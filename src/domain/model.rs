use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A logical backend call. Parameterized endpoints carry their path parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListTemplates,
    GenerateDocument,
    UploadFile,
    TemplatePreview { template_id: String },
    DownloadDocument { filename: String },
    DocumentFields { type_id: String },
    GenerateTitle,
    GenerateContent,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListTemplates => "list_templates",
            Operation::GenerateDocument => "generate_document",
            Operation::UploadFile => "upload_file",
            Operation::TemplatePreview { .. } => "template_preview",
            Operation::DownloadDocument { .. } => "download_document",
            Operation::DocumentFields { .. } => "document_fields",
            Operation::GenerateTitle => "generate_title",
            Operation::GenerateContent => "generate_content",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Operation::ListTemplates
            | Operation::TemplatePreview { .. }
            | Operation::DownloadDocument { .. }
            | Operation::DocumentFields { .. } => HttpMethod::Get,
            Operation::GenerateDocument
            | Operation::UploadFile
            | Operation::GenerateTitle
            | Operation::GenerateContent => HttpMethod::Post,
        }
    }

    /// Path segments below the base path. Parameters are passed through as-is.
    pub fn path_segments(&self) -> Vec<&str> {
        match self {
            Operation::ListTemplates => vec!["templates"],
            Operation::GenerateDocument => vec!["generate"],
            Operation::UploadFile => vec!["upload"],
            Operation::TemplatePreview { template_id } => vec!["template-preview", template_id.as_str()],
            Operation::DownloadDocument { filename } => vec!["download", filename.as_str()],
            Operation::DocumentFields { type_id } => vec!["document-fields", type_id.as_str()],
            Operation::GenerateTitle => vec!["generate-title"],
            Operation::GenerateContent => vec!["generate-content"],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// File content sent as the `file` field of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub content: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_mime_type(&file_name).map(str::to_string);
        Self {
            file_name,
            mime_type,
            content: content.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub async fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self::new(file_name, content))
    }
}

fn guess_mime_type(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())?
        .to_ascii_lowercase();

    match extension.as_str() {
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "doc" => Some("application/msword"),
        "pdf" => Some("application/pdf"),
        "txt" => Some("text/plain"),
        "md" => Some("text/markdown"),
        _ => None,
    }
}

/// Raw download payload. The body is kept as bytes and never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentBlob {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
    /// File name suggested by the server's `Content-Disposition` header.
    pub suggested_name: Option<String>,
}

impl DocumentBlob {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
