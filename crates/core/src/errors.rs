use thiserror::Error;

use crate::{domain::product::ProductId, flows::WizardTransitionError};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("product id `{0}` appears more than once in the catalog")]
    DuplicateProductId(ProductId),
    #[error(transparent)]
    WizardTransition(#[from] WizardTransitionError),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("catalog failure: {0}")]
    Catalog(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

/// Failure families a storefront surface reports to its caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    ConfigValidation,
    CatalogLoad,
    WizardTransition,
}

impl ErrorClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConfigValidation => "config_validation",
            Self::CatalogLoad => "catalog_load",
            Self::WizardTransition => "wizard_transition",
        }
    }

    /// Process exit code used by the CLI for this class.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::ConfigValidation => 2,
            Self::CatalogLoad => 3,
            Self::WizardTransition => 5,
        }
    }
}

/// An [`ApplicationError`] tagged with the request it belongs to.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{} [{correlation_id}]: {detail}", .class.as_str())]
pub struct InterfaceError {
    pub class: ErrorClass,
    pub detail: String,
    pub correlation_id: String,
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self.class {
            ErrorClass::ConfigValidation => "The storefront configuration is invalid.",
            ErrorClass::CatalogLoad => "The product catalog could not be loaded.",
            ErrorClass::WizardTransition => "That step is not available in the quote request yet.",
        }
    }
}

impl ApplicationError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Domain(DomainError::WizardTransition(_)) => ErrorClass::WizardTransition,
            // Duplicate ids and negative prices only come from catalog data.
            Self::Domain(_) | Self::Catalog(_) => ErrorClass::CatalogLoad,
            Self::Configuration(_) => ErrorClass::ConfigValidation,
        }
    }

    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        InterfaceError {
            class: self.class(),
            detail: self.to_string(),
            correlation_id: correlation_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::product::ProductId;
    use crate::errors::{ApplicationError, DomainError, ErrorClass};
    use crate::flows::{WizardEvent, WizardState, WizardTransitionError};

    #[test]
    fn duplicate_id_is_a_catalog_load_failure() {
        let interface =
            ApplicationError::from(DomainError::DuplicateProductId(ProductId::from("f1")))
                .into_interface("req-1");

        assert_eq!(interface.class, ErrorClass::CatalogLoad);
        assert_eq!(interface.correlation_id, "req-1");
        assert!(interface.detail.contains("`f1`"));
        assert_eq!(interface.class.exit_code(), 3);
    }

    #[test]
    fn rejected_wizard_transition_keeps_its_own_class() {
        let error = DomainError::from(WizardTransitionError::InvalidTransition {
            state: WizardState::Cart,
            event: WizardEvent::ConfirmLens,
        });
        assert!(matches!(error, DomainError::WizardTransition(_)));

        let interface = ApplicationError::from(error).into_interface("req-2");
        assert_eq!(interface.class.as_str(), "wizard_transition");
        assert_eq!(interface.class.exit_code(), 5);
    }

    #[test]
    fn configuration_error_renders_class_and_correlation_id() {
        let interface = ApplicationError::Configuration("shortlist_limit out of range".to_owned())
            .into_interface("req-4");

        assert_eq!(interface.class, ErrorClass::ConfigValidation);
        assert_eq!(
            interface.to_string(),
            "config_validation [req-4]: configuration failure: shortlist_limit out of range"
        );
        assert_eq!(interface.user_message(), "The storefront configuration is invalid.");
    }
}
