//! Invocation responses handed back to the host.

/// Status codes carried by a [`Response`].
pub mod status {
    pub const OK: i32 = 200;
    pub const ERROR: i32 = 500;
}

/// Outcome of one invocation: success with an optional payload, or failure
/// with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: i32,
    pub message: String,
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// Create a successful response.
    pub fn success(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: status::OK,
            message: String::new(),
            payload,
        }
    }

    /// Create an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: status::ERROR,
            message: message.into(),
            payload: None,
        }
    }

    /// Check if the response is successful.
    pub fn is_success(&self) -> bool {
        self.status == status::OK
    }

    /// Payload bytes, empty when there are none.
    pub fn payload_bytes(&self) -> &[u8] {
        self.payload.as_deref().unwrap_or_default()
    }
}
