//! Cloudflare client error types

use packflow_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudflareError {
    #[error("Cloudflare API error ({code}): {message}")]
    ApiError { code: i32, message: String },

    #[error("Cloudflare API returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudflareError>;

impl From<CloudflareError> for CloudError {
    fn from(err: CloudflareError) -> Self {
        match err {
            CloudflareError::AuthenticationFailed(msg) => CloudError::AuthenticationFailed(msg),
            CloudflareError::HttpStatus {
                status: 401 | 403,
                message,
            } => CloudError::AuthenticationFailed(message),
            CloudflareError::HttpStatus {
                status: 404,
                message,
            } => CloudError::ResourceNotFound(message),
            CloudflareError::HttpStatus {
                status: 409,
                message,
            } => CloudError::ResourceAlreadyExists(message),
            CloudflareError::HttpStatus {
                status: 429,
                message,
            } => CloudError::RateLimited(message),
            CloudflareError::Request(e) if e.is_timeout() => CloudError::Timeout(e.to_string()),
            CloudflareError::Request(e) => CloudError::Http(e.to_string()),
            CloudflareError::JsonError(e) => CloudError::Json(e),
            other => CloudError::ApiError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err: CloudError = CloudflareError::HttpStatus {
            status: 403,
            message: "forbidden".to_string(),
        }
        .into();
        assert!(matches!(err, CloudError::AuthenticationFailed(_)));

        let err: CloudError = CloudflareError::HttpStatus {
            status: 409,
            message: "exists".to_string(),
        }
        .into();
        assert!(matches!(err, CloudError::ResourceAlreadyExists(_)));

        let err: CloudError = CloudflareError::HttpStatus {
            status: 429,
            message: "slow down".to_string(),
        }
        .into();
        assert!(matches!(err, CloudError::RateLimited(_)));

        let err: CloudError = CloudflareError::ApiError {
            code: 10000,
            message: "bad".to_string(),
        }
        .into();
        assert!(matches!(err, CloudError::ApiError(msg) if msg.contains("10000")));
    }
}
