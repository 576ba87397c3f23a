use thiserror::Error;

/// The one failure the widget knows about: the upstream lookup did not
/// produce a payload. Transport errors, non-2xx statuses and unknown
/// locations all land here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("upstream request failed{}: {reason}", status_suffix(.status))]
    RequestFailed {
        status: Option<u16>,
        reason: String,
    },
}

impl LookupError {
    pub fn transport(reason: impl Into<String>) -> Self {
        LookupError::RequestFailed {
            status: None,
            reason: reason.into(),
        }
    }

    pub fn status(status: u16, reason: impl Into<String>) -> Self {
        LookupError::RequestFailed {
            status: Some(status),
            reason: reason.into(),
        }
    }

    /// HTTP status of the failed response, if one was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            LookupError::RequestFailed { status, .. } => *status,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" with status {s}")).unwrap_or_default()
}

/// Rejections raised before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("location must not be empty")]
    EmptyLocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_includes_status_when_present() {
        let err = LookupError::status(404, "city not found");
        assert_eq!(err.to_string(), "upstream request failed with status 404: city not found");
        assert_eq!(err.http_status(), Some(404));
    }

    #[test]
    fn transport_failure_has_no_status() {
        let err = LookupError::transport("connection refused");
        assert_eq!(err.to_string(), "upstream request failed: connection refused");
        assert_eq!(err.http_status(), None);
    }
}
