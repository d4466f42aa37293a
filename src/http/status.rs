//! Classification of non-OK HTTP responses into user-facing errors.

use reqwest::{Response, StatusCode};

/// A request that came back with a non-success status.
#[derive(Debug, PartialEq, Eq)]
pub enum HttpStatusError {
    /// HTTP 429, or 403 with the rate limit exhausted
    RateLimitExceeded(u16),
    /// HTTP 401
    AuthenticationFailed(u16),
    /// HTTP 404
    NotFound(u16),
    /// HTTP 403 for any other reason
    Forbidden(u16),
    /// Other 4xx
    ClientError(u16),
    /// 5xx
    ServerError(u16),
}

impl std::fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpStatusError::RateLimitExceeded(status) => write!(
                f,
                "HTTP error! Status: {}. GitHub API rate limit exceeded, try again later or set GITHUB_TOKEN environment variable.",
                status
            ),
            HttpStatusError::AuthenticationFailed(status) => write!(
                f,
                "HTTP error! Status: {}. Authentication failed, check your GITHUB_TOKEN.",
                status
            ),
            HttpStatusError::NotFound(status) => {
                write!(f, "HTTP error! Status: {}. Not found.", status)
            }
            HttpStatusError::Forbidden(status) => write!(
                f,
                "HTTP error! Status: {}. Access forbidden, you may need authentication.",
                status
            ),
            HttpStatusError::ClientError(status) | HttpStatusError::ServerError(status) => {
                write!(f, "HTTP error! Status: {}", status)
            }
        }
    }
}

impl std::error::Error for HttpStatusError {}

/// Maps a status (and the rate limit header, for 403) to an error.
/// Returns `None` for success statuses.
pub fn classify_status(
    status: StatusCode,
    rate_limit_remaining: Option<&str>,
) -> Option<HttpStatusError> {
    if status.is_success() {
        return None;
    }

    let code = status.as_u16();
    let error = match status {
        StatusCode::UNAUTHORIZED => HttpStatusError::AuthenticationFailed(code),
        StatusCode::FORBIDDEN if rate_limit_remaining == Some("0") => {
            HttpStatusError::RateLimitExceeded(code)
        }
        StatusCode::FORBIDDEN => HttpStatusError::Forbidden(code),
        StatusCode::TOO_MANY_REQUESTS => HttpStatusError::RateLimitExceeded(code),
        StatusCode::NOT_FOUND => HttpStatusError::NotFound(code),
        s if s.is_client_error() => HttpStatusError::ClientError(code),
        _ => HttpStatusError::ServerError(code),
    };

    Some(error)
}

/// Passes successful responses through and turns the rest into an
/// [`HttpStatusError`].
pub fn check_response(response: Response) -> Result<Response, HttpStatusError> {
    let remaining = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok());

    match classify_status(response.status(), remaining) {
        None => Ok(response),
        Some(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_with(status: usize, headers: &[(&'static str, &'static str)]) -> Response {
        let mut server = mockito::Server::new_async().await;
        let mut mock = server.mock("GET", "/").with_status(status);
        for (name, value) in headers {
            mock = mock.with_header(*name, *value);
        }
        let _m = mock.create_async().await;

        reqwest::Client::new()
            .get(server.url())
            .send()
            .await
            .unwrap()
    }

    #[test]
    fn test_http_status_error_display() {
        let err = HttpStatusError::RateLimitExceeded(429);
        assert!(err.to_string().contains("rate limit"));
        assert!(err.to_string().contains("GITHUB_TOKEN"));

        let err = HttpStatusError::AuthenticationFailed(401);
        assert!(err.to_string().contains("Authentication"));

        let err = HttpStatusError::NotFound(404);
        assert!(err.to_string().contains("Not found"));

        let err = HttpStatusError::ServerError(502);
        assert_eq!(err.to_string(), "HTTP error! Status: 502");
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(StatusCode::OK, None), None);
        assert_eq!(
            classify_status(StatusCode::UNAUTHORIZED, None),
            Some(HttpStatusError::AuthenticationFailed(401))
        );
        assert_eq!(
            classify_status(StatusCode::FORBIDDEN, None),
            Some(HttpStatusError::Forbidden(403))
        );
        assert_eq!(
            classify_status(StatusCode::FORBIDDEN, Some("0")),
            Some(HttpStatusError::RateLimitExceeded(403))
        );
        assert_eq!(
            classify_status(StatusCode::BAD_REQUEST, None),
            Some(HttpStatusError::ClientError(400))
        );
        assert_eq!(
            classify_status(StatusCode::SERVICE_UNAVAILABLE, None),
            Some(HttpStatusError::ServerError(503))
        );
    }

    #[tokio::test]
    async fn test_check_response_ok() {
        let response = response_with(200, &[]).await;
        assert!(check_response(response).is_ok());
    }

    #[tokio::test]
    async fn test_check_response_not_found() {
        let response = response_with(404, &[]).await;
        assert_eq!(
            check_response(response).unwrap_err(),
            HttpStatusError::NotFound(404)
        );
    }

    #[tokio::test]
    async fn test_check_response_rate_limited() {
        let response = response_with(403, &[("x-ratelimit-remaining", "0")]).await;
        assert_eq!(
            check_response(response).unwrap_err(),
            HttpStatusError::RateLimitExceeded(403)
        );
    }

    #[tokio::test]
    async fn test_check_response_too_many_requests() {
        let response = response_with(429, &[]).await;
        assert_eq!(
            check_response(response).unwrap_err(),
            HttpStatusError::RateLimitExceeded(429)
        );
    }
}
