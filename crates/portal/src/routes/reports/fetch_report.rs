use civitas_database::{Database, Report};
use civitas_models::v0;
use civitas_result::Result;
use rocket::serde::json::Json;
use rocket::State;

use crate::util::capability::Capability;

/// # Fetch Report
///
/// Fetch a single report by its id.
#[openapi(tag = "Reports")]
#[get("/<id>")]
pub async fn fetch_report(
    db: &State<Database>,
    capability: Capability,
    id: String,
) -> Result<Json<v0::Report>> {
    let report = Report::fetch(db, &id).await?;
    Ok(Json(report.into_v0(capability.admin)))
}
