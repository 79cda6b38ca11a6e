use serde::Serialize;

pub mod contact;

/// Envelope of a successful response.
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub message: &'static str,
    pub data: T,
}

/// Envelope of a failed response.
#[derive(Debug, Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ApiFieldError>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiFieldError {
    pub field: &'static str,
    pub message: &'static str,
}
