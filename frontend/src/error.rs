use thiserror::Error;

use crate::services::ApiError;

/// Rejections of the vaccine and pet registration forms
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("No pet selected")]
    NoPetSelected,

    #[error("Vaccine name is required")]
    MissingVaccineName,

    #[error("Application date is required")]
    MissingApplicationDate,

    #[error("Owner name must have at least 3 characters")]
    OwnerNameTooShort,

    #[error("Pet name is required")]
    MissingPetName,

    #[error(transparent)]
    Api(#[from] ApiError),
}
