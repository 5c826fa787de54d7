//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`VacHubError`]
//! via `#[from]` when crossing a port boundary.

use std::error::Error as StdError;

/// Top-level error returned across port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum VacHubError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("duplicate entity")]
    Duplicate(#[from] DuplicateError),

    #[error("unsupported service")]
    UnsupportedService(#[from] UnsupportedServiceError),

    /// The device-client collaborator failed to accept a command.
    #[error("device client error")]
    Client(#[source] Box<dyn StdError + Send + Sync>),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("serial must not be empty")]
    EmptySerial,

    #[error("entity key must not be empty")]
    EmptyKey,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("value {value} is outside the range [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("invalid service data: {0}")]
    InvalidData(String),
}

/// A lookup by identifier returned nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// An entity with the same unique id is already registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("entity {unique_id} is already registered")]
pub struct DuplicateError {
    pub unique_id: String,
}

/// The targeted entity does not implement the requested service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{platform} entities do not support `{service}`")]
pub struct UnsupportedServiceError {
    pub platform: &'static str,
    pub service: String,
}

impl VacHubError {
    /// Wrap a device-client failure.
    pub fn client(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Client(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_with_from() {
        let err: VacHubError = ValidationError::EmptySerial.into();
        assert!(matches!(
            err,
            VacHubError::Validation(ValidationError::EmptySerial)
        ));
    }

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Entity",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Entity abc not found");
    }

    #[test]
    fn should_display_out_of_range_bounds() {
        let err = ValidationError::OutOfRange {
            value: 11.0,
            min: 0.0,
            max: 10.0,
        };
        assert_eq!(err.to_string(), "value 11 is outside the range [0, 10]");
    }

    #[test]
    fn should_display_unsupported_service() {
        let err = UnsupportedServiceError {
            platform: "sensor",
            service: "turn_on".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "sensor entities do not support `turn_on`"
        );
    }

    #[test]
    fn should_keep_client_error_as_source() {
        let io = std::io::Error::other("socket closed");
        let err = VacHubError::client(io);
        let source = StdError::source(&err).unwrap();
        assert_eq!(source.to_string(), "socket closed");
    }
}
