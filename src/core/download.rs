use crate::domain::model::DocumentBlob;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::Response;

/// Reads a download response as raw bytes.
pub async fn read_blob(response: Response) -> reqwest::Result<DocumentBlob> {
    let headers = response.headers();
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let suggested_name = headers
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(filename_from_disposition);

    let data = response.bytes().await?.to_vec();
    tracing::debug!("Downloaded {} bytes", data.len());

    Ok(DocumentBlob {
        data,
        content_type,
        suggested_name,
    })
}

/// Extracts the file name from a `Content-Disposition` value.
/// `filename*=UTF-8''...` wins over a plain `filename=`.
pub fn filename_from_disposition(value: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in split_params(value) {
        let Some((key, raw)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                extended = raw
                    .trim()
                    .split_once("''")
                    .and_then(|(_charset, encoded)| urlencoding::decode(encoded).ok())
                    .map(|name| name.into_owned());
            }
            "filename" => {
                plain = Some(unquote(raw.trim()));
            }
            _ => {}
        }
    }

    extended.or(plain).filter(|name| !name.is_empty())
}

/// Splits header parameters on `;`, leaving quoted strings intact.
fn split_params(value: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;

    for (i, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => {
                params.push(value[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(value[start..].trim());
    params
}

fn unquote(raw: &str) -> String {
    match raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => raw.to_string(),
    }
}
