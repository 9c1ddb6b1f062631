use crate::domain::model::Operation;
use crate::utils::error::{ClientError, Result};
use url::Url;

/// Parses the configured base URL. It must be able to carry path segments.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url).map_err(|e| ClientError::InvalidConfigValueError {
        field: "base_url".to_string(),
        value: base_url.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: "URL cannot carry a path".to_string(),
        });
    }

    Ok(url)
}

/// Appends the operation's path below the base path.
///
/// Path parameters become one percent-encoded segment each; their content is
/// not checked here, the server decides whether it is acceptable. `.` and `..`
/// are the exception: a URL cannot carry them as a segment, so they are refused
/// instead of silently resolving to another endpoint.
pub fn endpoint_url(base: &Url, operation: &Operation) -> Result<Url> {
    let segments = operation.path_segments();
    if let Some(dot) = segments.iter().skip(1).find(|s| is_dot_segment(s)) {
        return Err(ClientError::InvalidConfigValueError {
            field: format!("{} path parameter", operation),
            value: dot.to_string(),
            reason: "Dot segments cannot be sent as a path parameter".to_string(),
        });
    }

    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);

    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| ClientError::InvalidConfigValueError {
                field: "base_url".to_string(),
                value: base.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?;
        path.pop_if_empty();
        path.extend(segments);
    }

    Ok(url)
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}
