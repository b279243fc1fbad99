#[macro_use]
extern crate rocket;
#[macro_use]
extern crate rocket_okapi;
#[macro_use]
extern crate lazy_static;

pub mod routes;
pub mod util;

use civitas_database::DatabaseInfo;
use log::info;
use rocket_cors::AllowedOrigins;
use std::str::FromStr;

#[launch]
async fn rocket() -> _ {
    civitas_config::setup_logging();

    info!(
        "Starting Civitas server [version {}].",
        env!("CARGO_PKG_VERSION")
    );

    let cors = rocket_cors::CorsOptions {
        allowed_origins: AllowedOrigins::All,
        allowed_methods: ["Get", "Post", "Delete", "Options", "Head", "Patch"]
            .iter()
            .map(|s| FromStr::from_str(s).unwrap())
            .collect(),
        ..Default::default()
    }
    .to_cors()
    .expect("Failed to create CORS.");

    // Setup database
    let db = DatabaseInfo::Auto.connect().await.unwrap();

    // Configure Rocket
    let rocket = rocket::build();
    routes::mount(rocket)
        .mount("/", rocket_cors::catch_all_options_routes())
        .mount(
            "/swagger/",
            rocket_okapi::swagger_ui::make_swagger_ui(&rocket_okapi::swagger_ui::SwaggerUIConfig {
                url: "../openapi.json".to_owned(),
                ..Default::default()
            }),
        )
        .manage(db)
        .manage(cors.clone())
        .attach(cors)
}
