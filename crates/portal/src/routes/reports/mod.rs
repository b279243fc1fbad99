use rocket::Route;
use rocket_okapi::okapi::openapi3::OpenApi;

mod delete_report;
mod edit_report_category;
mod edit_report_status;
mod fetch_report;
mod fetch_reports;
mod submit_report;

pub fn routes() -> (Vec<Route>, OpenApi) {
    openapi_get_routes_spec![
        submit_report::submit_report,
        fetch_reports::fetch_reports,
        fetch_report::fetch_report,
        edit_report_status::edit_report_status,
        edit_report_category::edit_report_category,
        delete_report::delete_report,
    ]
}
