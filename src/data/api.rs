//! HTTP access to the `/api/Loans` collection.
//!
//! `LoanApi` returns the raw status and body of each call; deciding what a
//! status *means* is the bridge's job. Only transport-level failures (DNS,
//! refused connection, timeout, unreadable body) come back as `ApiError`.

use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Loan, is_dot_segment};

/// Where the loan service lives when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://api:8080/api/Loans";

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("'{0}' cannot be sent as a path segment")]
    DotSegment(String),
    #[error("{0}")]
    Transport(String),
}

/// One method per endpoint of the loan service.
pub trait LoanApi {
    /// `POST /api/Loans`
    fn create(&self, loan: &Loan) -> Result<ApiReply, ApiError>;
    /// `GET /api/Loans/borrower/{name}`
    fn find_by_borrower(&self, borrower_name: &str) -> Result<ApiReply, ApiError>;
    /// `GET /api/Loans/{id}`
    fn find_by_id(&self, loan_id: &str) -> Result<ApiReply, ApiError>;
    /// `GET /api/Loans`
    fn list_all(&self) -> Result<ApiReply, ApiError>;
    /// `DELETE /api/Loans/{id}`
    fn delete_by_id(&self, loan_id: &str) -> Result<ApiReply, ApiError>;
}

/// Blocking reqwest client bound to a base collection URL.
pub struct HttpLoanApi {
    client: Client,
    base: Url,
}

impl HttpLoanApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: "expected an http(s) URL".to_string(),
            });
        }
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append path segments to the base URL, percent-encoding each one so a
    /// value containing `/` or spaces stays a single segment.
    ///
    /// `.` and `..` are refused: URL normalisation drops them, which would
    /// retarget the request at the parent route.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        if let Some(dot) = segments.iter().find(|s| is_dot_segment(s)) {
            return Err(ApiError::DotSegment(dot.to_string()));
        }
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn send(&self, request: RequestBuilder, method: &str, url: &Url) -> Result<ApiReply, ApiError> {
        debug!(method, %url, "sending loan API request");

        let resp = request.send().map_err(|e| {
            let message = describe(&e);
            debug!(method, %url, error = %message, "loan API request failed");
            ApiError::Transport(message)
        })?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| ApiError::Transport(format!("Failed to read response body: {}", describe(&e))))?;

        debug!(method, %url, status, "loan API responded");
        Ok(ApiReply { status, body })
    }
}

impl LoanApi for HttpLoanApi {
    fn create(&self, loan: &Loan) -> Result<ApiReply, ApiError> {
        let url = self.endpoint(&[])?;
        self.send(self.client.post(url.clone()).json(loan), "POST", &url)
    }

    fn find_by_borrower(&self, borrower_name: &str) -> Result<ApiReply, ApiError> {
        let url = self.endpoint(&["borrower", borrower_name])?;
        self.send(self.client.get(url.clone()), "GET", &url)
    }

    fn find_by_id(&self, loan_id: &str) -> Result<ApiReply, ApiError> {
        let url = self.endpoint(&[loan_id])?;
        self.send(self.client.get(url.clone()), "GET", &url)
    }

    fn list_all(&self) -> Result<ApiReply, ApiError> {
        let url = self.endpoint(&[])?;
        self.send(self.client.get(url.clone()), "GET", &url)
    }

    fn delete_by_id(&self, loan_id: &str) -> Result<ApiReply, ApiError> {
        let url = self.endpoint(&[loan_id])?;
        self.send(self.client.delete(url.clone()), "DELETE", &url)
    }
}

/// reqwest's top-level message hides the cause ("error sending request");
/// walk the source chain so refused connections and DNS failures are visible.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
