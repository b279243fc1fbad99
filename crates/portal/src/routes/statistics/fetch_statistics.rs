use civitas_database::{Database, Report};
use civitas_models::v0;
use civitas_result::Result;
use rocket::serde::json::Json;
use rocket::State;

/// # Fetch Statistics
///
/// Count reports by status. Counts are computed from current database
/// state on every call and always reconcile with the report listing.
#[openapi(tag = "Statistics")]
#[get("/")]
pub async fn fetch_statistics(db: &State<Database>) -> Result<Json<v0::ReportStatistics>> {
    Ok(Json(Report::statistics(db).await?))
}
