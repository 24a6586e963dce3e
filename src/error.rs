use thiserror::Error as ThisError;

use crate::zigbee::EndpointId;

#[derive(ThisError, Debug)]
pub enum ProfileError {
    #[error("Device binding failed: {0}")]
    BindFailed(String),

    #[error("Reporting configuration failed: {0}")]
    ConfigureReportingFailed(String),

    #[error("Endpoint not found on device: {0}")]
    EndpointNotFound(EndpointId),

    #[error("Duplicate endpoint id in endpoint map: {0}")]
    DuplicateEndpoint(EndpointId),

    #[error("Profile already registered for model: {0}")]
    DuplicateModel(String),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProfileError>;
