use thiserror::Error;

/// The bundled OpenAPI description of this service's HTTP surface.
static OPENAPI_SOURCE: &str = include_str!("../openapi.yaml");

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("invalid bundled OpenAPI document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("OpenAPI document does not serialize to JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The service's own API contract, parsed once at startup and re-serialized
/// per request in either format. Carries no request state.
#[derive(Debug, Clone)]
pub struct ApiSpec {
    document: serde_yaml::Value,
}

impl ApiSpec {
    pub fn load() -> Result<Self, SpecError> {
        let document = serde_yaml::from_str(OPENAPI_SOURCE)?;
        Ok(Self { document })
    }

    pub fn to_yaml(&self) -> Result<String, SpecError> {
        Ok(serde_yaml::to_string(&self.document)?)
    }

    pub fn to_json(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }
}
