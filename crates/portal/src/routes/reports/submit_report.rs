use civitas_database::{Database, Report};
use civitas_models::v0;
use civitas_result::{create_error, Result};
use rocket::serde::json::Json;
use rocket::State;
use validator::Validate;

use crate::util::capability::Capability;
use crate::util::geocoding;

/// # Submit Report
///
/// Submit a new infrastructure report. The report starts out Pending.
#[openapi(tag = "Reports")]
#[post("/", data = "<data>")]
pub async fn submit_report(
    db: &State<Database>,
    capability: Capability,
    data: Json<v0::DataCreateReport>,
) -> Result<Json<v0::Report>> {
    let data = data.into_inner();
    data.validate().map_err(|error| {
        create_error!(FailedValidation {
            error: error.to_string()
        })
    })?;

    // Resolve a display address, falling back to the raw coordinates
    // if the geocoding collaborator has no answer
    let address = match &data.address {
        Some(address) => address.clone(),
        None => geocoding::reverse_geocode(data.lat, data.lng)
            .await
            .unwrap_or_else(|| geocoding::format_coordinates(data.lat, data.lng)),
    };

    let report = Report::create(db, data, address).await?;
    Ok(Json(report.into_v0(capability.admin)))
}
