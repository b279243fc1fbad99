use civitas_config::config;
use civitas_result::Result;
use rocket::serde::json::Json;
use schemars::JsonSchema;
use serde::Serialize;

/// # Server Configuration
#[derive(Serialize, JsonSchema, Debug)]
pub struct ServiceInfo {
    /// Civitas API version
    pub civitas: String,
    /// URL of the reverse geocoding collaborator in use
    pub geocoding: String,
}

/// # Query Node
///
/// Fetch the configuration of this Civitas instance.
#[openapi(tag = "Core")]
#[get("/")]
pub async fn root() -> Result<Json<ServiceInfo>> {
    let config = config().await;

    Ok(Json(ServiceInfo {
        civitas: env!("CARGO_PKG_VERSION").to_string(),
        geocoding: config.api.geocoding.nominatim,
    }))
}
