use std::str::FromStr;

use civitas_database::{Database, Report};
use civitas_models::v0::{self, Category, ReportStatusString};
use civitas_result::{create_error, Result};
use rocket::serde::json::Json;
use rocket::State;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::util::capability::Capability;

/// # Query Parameters
#[derive(Deserialize, JsonSchema, FromForm)]
pub struct OptionsFetchReports {
    /// Status to include in the search
    ///
    /// The sentinel value "Todos" is equivalent to no filter.
    status: Option<String>,

    /// Category to include in the search
    ///
    /// The sentinel value "Todas" is equivalent to no filter.
    category: Option<String>,
}

/// # Fetch Reports
///
/// Fetch all reports matching the given filters, most recent first.
#[openapi(tag = "Reports")]
#[get("/?<options..>")]
pub async fn fetch_reports(
    db: &State<Database>,
    capability: Capability,
    options: OptionsFetchReports,
) -> Result<Json<Vec<v0::Report>>> {
    let status = match options.status.as_deref() {
        None | Some("Todos") | Some("All") => None,
        Some(value) => Some(ReportStatusString::from_str(value).map_err(|_| {
            create_error!(FailedValidation {
                error: format!("unknown status: {value}")
            })
        })?),
    };

    let category = match options.category.as_deref() {
        None | Some("Todas") | Some("All") => None,
        Some(value) => Some(Category::from_str(value).map_err(|_| {
            create_error!(FailedValidation {
                error: format!("unknown category: {value}")
            })
        })?),
    };

    let reports = Report::query(db, status, category).await?;
    Ok(Json(
        reports
            .into_iter()
            .map(|report| report.into_v0(capability.admin))
            .collect(),
    ))
}
