use std::error::Error;
use std::fmt;

use reqwest::StatusCode;

use crate::domain::validation::RequestError;

/// Every way a round trip to the solver service can end without a route plan.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced an HTTP response (connect, timeout, TLS...).
    Request(reqwest::Error),
    /// The service answered with something other than 200.
    Http { status: StatusCode, body: String },
    /// A 200 whose body is not a JSON object.
    InvalidJson,
    /// The service answered but found no feasible plan.
    Infeasible { summary: String },
    InvalidRequest(RequestError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request(e) => write!(f, "Request failed: {}", e),
            ApiError::Http { status, body } => {
                write!(f, "HTTP error: {}\nResponse body: {}", status.as_u16(), body)
            }
            ApiError::InvalidJson => write!(f, "Failed to parse JSON response"),
            ApiError::Infeasible { summary } => write!(f, "Solve failed: {}", summary),
            ApiError::InvalidRequest(e) => write!(f, "Invalid request: {}", e),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Request(e) => Some(e),
            ApiError::InvalidRequest(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Request(e)
    }
}

impl From<RequestError> for ApiError {
    fn from(e: RequestError) -> Self {
        ApiError::InvalidRequest(e)
    }
}
