use civitas_database::{Database, Report};
use civitas_models::v0;
use civitas_result::{create_error, Result};
use rocket::serde::json::Json;
use rocket::State;

use crate::util::capability::Capability;

/// # Edit Report Category
///
/// Assign a different category to a report.
#[openapi(tag = "Reports")]
#[patch("/<id>/category", data = "<data>")]
pub async fn edit_report_category(
    db: &State<Database>,
    capability: Capability,
    id: String,
    data: Json<v0::DataEditCategory>,
) -> Result<Json<v0::Report>> {
    // Must hold the admin capability for this route
    if !capability.admin {
        return Err(create_error!(NotPrivileged));
    }

    let data = data.into_inner();

    let mut report = Report::fetch(db, &id).await?;
    report.update_category(db, data.category).await?;

    Ok(Json(report.into_v0(true)))
}
