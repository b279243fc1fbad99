use cached::proc_macro::cached;
use config::{Config, File, FileFormat};
use futures_locks::RwLock;
use once_cell::sync::Lazy;
use serde::Deserialize;

static CONFIG_BUILDER: Lazy<RwLock<Config>> = Lazy::new(|| {
    RwLock::new({
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../Civitas.toml"),
            FileFormat::Toml,
        ));

        if std::path::Path::new("Civitas.toml").exists() {
            builder = builder.add_source(File::new("Civitas.toml", FileFormat::Toml));
        }

        builder.build().unwrap()
    })
});

#[derive(Deserialize, Debug, Clone)]
pub struct Database {
    pub mongodb: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiSecurity {
    pub admin_token: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiGeocoding {
    pub nominatim: String,
    pub user_agent: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Api {
    pub security: ApiSecurity,
    pub geocoding: ApiGeocoding,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FilesLimits {
    pub min_file_size: usize,
    pub photo_size: usize,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Files {
    pub storage_path: String,
    pub limit: FilesLimits,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub database: Database,
    pub api: Api,
    pub files: Files,
}

pub async fn init() {
    println!(
        ":: Civitas Configuration ::\n\x1b[32m{:?}\x1b[0m",
        config().await
    );
}

pub async fn read() -> Config {
    CONFIG_BUILDER.read().await.clone()
}

#[cached(time = 30)]
pub async fn config() -> Settings {
    read().await.try_deserialize::<Settings>().unwrap()
}

/// Configure logging and common Rust variables
pub fn setup_logging() {
    dotenv::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    if std::env::var("ROCKET_ADDRESS").is_err() {
        std::env::set_var("ROCKET_ADDRESS", "0.0.0.0");
    }

    pretty_env_logger::init();
}

#[cfg(test)]
mod tests {
    use crate::init;

    #[async_std::test]
    async fn it_works() {
        init().await;
    }
}
