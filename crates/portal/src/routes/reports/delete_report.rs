use civitas_database::{Database, Report};
use civitas_models::v0;
use civitas_result::{create_error, Result};
use log::info;
use rocket::serde::json::Json;
use rocket::State;

use crate::util::capability::Capability;

/// # Delete Report
///
/// Permanently remove a report. Requires a justification of at least
/// 10 characters, which is written to the audit log and persisted
/// nowhere else.
#[openapi(tag = "Reports")]
#[delete("/<id>", data = "<data>")]
pub async fn delete_report(
    db: &State<Database>,
    capability: Capability,
    id: String,
    data: Json<v0::DataDeleteReport>,
) -> Result<()> {
    // Must hold the admin capability for this route
    if !capability.admin {
        return Err(create_error!(NotPrivileged));
    }

    let data = data.into_inner();

    let report = Report::fetch(db, &id).await?;
    report.delete(db, &data.justification).await?;

    // Audit trail for irreversible removal
    info!(
        "Report {} removed by administrator: {}",
        id, data.justification
    );

    Ok(())
}
