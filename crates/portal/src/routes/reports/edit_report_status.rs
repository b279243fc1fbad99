use civitas_database::{Database, Report};
use civitas_models::v0;
use civitas_result::{create_error, Result};
use rocket::serde::json::Json;
use rocket::State;

use crate::util::capability::Capability;

/// # Edit Report Status
///
/// Transition a report to a new status. Rejecting a report requires a
/// rejection reason of at least 10 characters.
#[openapi(tag = "Reports")]
#[patch("/<id>/status", data = "<data>")]
pub async fn edit_report_status(
    db: &State<Database>,
    capability: Capability,
    id: String,
    data: Json<v0::DataEditStatus>,
) -> Result<Json<v0::Report>> {
    // Must hold the admin capability for this route
    if !capability.admin {
        return Err(create_error!(NotPrivileged));
    }

    let data = data.into_inner();

    let mut report = Report::fetch(db, &id).await?;
    report
        .update_status(db, data.status, data.rejection_reason)
        .await?;

    Ok(Json(report.into_v0(true)))
}
