//! Failure logging composed around every transport call.
//!
//! A request goes through [`intercept`]: send, reject non-2xx answers, read
//! the body. Whatever fails along the way is logged once here and handed back
//! to the caller as [`ClientError::RequestFailed`].

use crate::domain::model::Operation;
use crate::utils::error::{ClientError, Result};
use reqwest::{RequestBuilder, Response};
use std::future::Future;

pub async fn intercept<T, F, Fut>(
    operation: Operation,
    request: RequestBuilder,
    read_body: F,
) -> Result<T>
where
    F: FnOnce(Response) -> Fut,
    Fut: Future<Output = reqwest::Result<T>>,
{
    match exchange(request, read_body).await {
        Ok(value) => Ok(value),
        Err((source, body)) => Err(reject(operation, source, body)),
    }
}

/// Logs a failure and turns it into the caller-facing error.
pub fn reject(operation: Operation, source: reqwest::Error, body: Option<String>) -> ClientError {
    tracing::error!(
        operation = %operation,
        status = source.status().map(|s| s.as_u16()),
        url = source.url().map(|u| u.as_str()),
        "API request failed: {}",
        source
    );
    ClientError::request_failed(operation, source, body)
}

async fn exchange<T, F, Fut>(
    request: RequestBuilder,
    read_body: F,
) -> std::result::Result<T, (reqwest::Error, Option<String>)>
where
    F: FnOnce(Response) -> Fut,
    Fut: Future<Output = reqwest::Result<T>>,
{
    let response = request.send().await.map_err(|e| (e, None))?;
    tracing::debug!("API response status: {}", response.status());

    let status_error = response.error_for_status_ref().err();
    if let Some(e) = status_error {
        let body = response.text().await.ok().filter(|b| !b.is_empty());
        return Err((e, body));
    }

    read_body(response).await.map_err(|e| (e, None))
}
