//! Deebot integration error types.

use vachub_domain::error::{
    NotFoundError, UnsupportedServiceError, VacHubError, ValidationError,
};
use vachub_domain::id::EntityId;

/// Errors specific to the Deebot integration.
#[derive(Debug, thiserror::Error)]
pub enum DeebotError {
    /// No entity with this id was registered by the integration.
    #[error("entity {0} is not managed by the deebot integration")]
    UnknownEntity(EntityId),

    /// The service name is not one the integration knows about.
    #[error("unknown service `{0}`")]
    UnknownService(String),

    /// The service data did not match the expected shape.
    #[error("invalid data for service `{service}`")]
    InvalidData {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// `refresh` was called with a category no bot event maps to.
    #[error("unknown refresh category `{0}`")]
    UnknownRefreshCategory(String),

    /// A domain-level error (validation, duplicate, client failure).
    #[error("domain error")]
    Domain(#[source] VacHubError),
}

impl DeebotError {
    /// Convert into the matching [`VacHubError`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> VacHubError {
        match self {
            Self::UnknownEntity(id) => NotFoundError {
                entity: "Entity",
                id: id.to_string(),
            }
            .into(),
            Self::UnknownService(service) => UnsupportedServiceError {
                platform: "deebot",
                service,
            }
            .into(),
            Self::InvalidData { service, source } => {
                ValidationError::InvalidData(format!("{service}: {source}")).into()
            }
            Self::UnknownRefreshCategory(category) => {
                ValidationError::InvalidData(format!("unknown refresh category `{category}`"))
                    .into()
            }
            Self::Domain(err) => err,
        }
    }
}

impl From<DeebotError> for VacHubError {
    fn from(err: DeebotError) -> Self {
        err.into_domain()
    }
}

impl From<VacHubError> for DeebotError {
    fn from(err: VacHubError) -> Self {
        Self::Domain(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_unknown_entity_to_not_found() {
        let err: VacHubError = DeebotError::UnknownEntity(EntityId::new()).into();
        assert!(matches!(err, VacHubError::NotFound(_)));
    }

    #[test]
    fn should_convert_unknown_service_to_unsupported_service() {
        let err: VacHubError = DeebotError::UnknownService("toggle".to_string()).into();
        match err {
            VacHubError::UnsupportedService(inner) => assert_eq!(inner.service, "toggle"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn should_convert_invalid_data_to_validation_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{bad").unwrap_err();
        let err: VacHubError = DeebotError::InvalidData {
            service: "set_value",
            source: json_err,
        }
        .into();
        assert!(matches!(
            err,
            VacHubError::Validation(ValidationError::InvalidData(_))
        ));
    }

    #[test]
    fn should_convert_domain_error_back_to_domain() {
        let deebot_err = DeebotError::Domain(ValidationError::EmptySerial.into());
        let back: VacHubError = deebot_err.into();
        assert!(matches!(
            back,
            VacHubError::Validation(ValidationError::EmptySerial)
        ));
    }

    #[test]
    fn should_display_unknown_refresh_category() {
        let err = DeebotError::UnknownRefreshCategory("map".to_string());
        assert_eq!(err.to_string(), "unknown refresh category `map`");
    }
}
