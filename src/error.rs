//! Error types for the Coolify provider.

use thiserror::Error;

use crate::schema::Diagnostic;

/// Errors that can occur while reconciling a resource against Coolify.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Local pre-flight validation failed; no remote call was made.
    #[error("{summary}: {detail}")]
    Validation {
        /// Attribute path the error is scoped to.
        attribute: String,
        /// Short summary, e.g. "Missing required field".
        summary: String,
        /// Human-readable explanation naming the field and discriminant.
        detail: String,
    },

    /// The remote system could not be reached or the exchange failed mid-flight.
    #[error("Error calling Coolify API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote system answered with a status code the operation did not expect.
    #[error("Unexpected HTTP status code {operation}: received {status}. Details: {body}")]
    RemoteStatus {
        /// What was being attempted, e.g. "creating Redis database".
        operation: String,
        /// HTTP status code returned.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The record no longer exists remotely.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The remote response did not have the expected shape.
    #[error("Unexpected response shape: {0}")]
    Conversion(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration error occurred.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested resource type is unknown.
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// Invalid request from the host, such as a malformed import id.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Operation not implemented for this kind.
    #[error("Unimplemented: {0}")]
    Unimplemented(String),
}

impl ProviderError {
    /// Build a field-scoped validation error.
    pub fn validation(
        attribute: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::Validation {
            attribute: attribute.into(),
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Build a remote status error for the given operation.
    pub fn remote_status(operation: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::RemoteStatus {
            operation: operation.into(),
            status,
            body: body.into(),
        }
    }

    /// Get the error message as a string.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { detail, .. } => detail,
            Self::Transport(_err) => "transport error (see Debug output)",
            Self::RemoteStatus { body, .. } => body,
            Self::NotFound(msg) => msg,
            Self::Conversion(msg) => msg,
            Self::Serialization(_err) => "serialization error (see Debug output)",
            Self::Configuration(msg) => msg,
            Self::UnknownResource(msg) => msg,
            Self::InvalidRequest(msg) => msg,
            Self::Unimplemented(msg) => msg,
        }
    }

    /// Whether this error is the drift signal raised by a read on a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Convert into a host-visible diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Validation {
                attribute,
                summary,
                detail,
            } => Diagnostic::error(summary.clone())
                .with_detail(detail.clone())
                .with_attribute(attribute.clone()),
            Self::RemoteStatus {
                operation,
                status,
                body,
            } => Diagnostic::error(format!("Unexpected HTTP status code {}", operation))
                .with_detail(format!("Received {}. Details: {}", status, body)),
            Self::Transport(err) => {
                Diagnostic::error("Error calling Coolify API").with_detail(err.to_string())
            },
            other => Diagnostic::error(other.to_string()),
        }
    }
}

impl From<ProviderError> for Diagnostic {
    fn from(err: ProviderError) -> Self {
        err.to_diagnostic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DiagnosticSeverity;

    #[test]
    fn test_error_display() {
        let err = ProviderError::NotFound("db-123".to_string());
        assert_eq!(format!("{}", err), "Resource not found: db-123");

        let err = ProviderError::Conversion("unknown database_type foo".to_string());
        assert_eq!(
            format!("{}", err),
            "Unexpected response shape: unknown database_type foo"
        );

        let err = ProviderError::UnknownResource("coolify_widget".to_string());
        assert_eq!(format!("{}", err), "Unknown resource type: coolify_widget");
    }

    #[test]
    fn test_remote_status_display() {
        let err = ProviderError::remote_status("creating Redis database", 422, "{\"message\":\"bad\"}");
        assert_eq!(
            format!("{}", err),
            "Unexpected HTTP status code creating Redis database: received 422. Details: {\"message\":\"bad\"}"
        );
        assert_eq!(err.message(), "{\"message\":\"bad\"}");
    }

    #[test]
    fn test_validation_diagnostic_is_field_scoped() {
        let err = ProviderError::validation(
            "docker_registry_image_name",
            "Missing required field",
            "docker_registry_image_name is required for source_type dockerimage",
        );
        let diag = err.to_diagnostic();
        assert_eq!(diag.severity, DiagnosticSeverity::Error);
        assert_eq!(diag.summary, "Missing required field");
        assert_eq!(diag.attribute.as_deref(), Some("docker_registry_image_name"));
        assert!(diag.detail.unwrap().contains("dockerimage"));
    }

    #[test]
    fn test_message_method() {
        let err = ProviderError::Configuration("no token".to_string());
        assert_eq!(err.message(), "no token");

        let err = ProviderError::InvalidRequest("bad import id".to_string());
        assert_eq!(err.message(), "bad import id");
        assert!(!err.is_not_found());
        assert!(ProviderError::NotFound("x".into()).is_not_found());
    }

    #[test]
    fn test_generic_diagnostic_uses_display() {
        let diag: Diagnostic = ProviderError::Unimplemented("import".to_string()).into();
        assert_eq!(diag.summary, "Unimplemented: import");
        assert!(diag.attribute.is_none());
    }
}
