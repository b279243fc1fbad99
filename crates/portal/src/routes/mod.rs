use rocket::{Build, Rocket};
use rocket_okapi::settings::OpenApiSettings;

mod reports;
mod root;
mod statistics;

pub fn mount(mut rocket: Rocket<Build>) -> Rocket<Build> {
    let settings = OpenApiSettings::default();

    mount_endpoints_and_merged_docs! {
        rocket, "/".to_owned(), settings,
        "" => openapi_get_routes_spec![root::root],
        "/reports" => reports::routes(),
        "/statistics" => statistics::routes()
    };

    rocket
}
