use std::time::Duration;

use civitas_config::config;
use log::warn;
use reqwest::Client;
use serde::Deserialize;

lazy_static! {
    static ref CLIENT: Client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .expect("reqwest Client");
}

/// Successful reverse lookup
#[derive(Deserialize)]
struct ReverseResponse {
    display_name: String,
}

/// Resolve a display address for the given coordinates
///
/// Returns None when the collaborator is unreachable or has no answer;
/// callers are expected to fall back to [`format_coordinates`]. Lookups
/// are never retried.
pub async fn reverse_geocode(lat: f64, lng: f64) -> Option<String> {
    let config = config().await;

    let response = CLIENT
        .get(format!("{}/reverse", config.api.geocoding.nominatim))
        .header("user-agent", config.api.geocoding.user_agent)
        .query(&[
            ("format", "json".to_string()),
            ("lat", lat.to_string()),
            ("lon", lng.to_string()),
        ])
        .send()
        .await;

    match response {
        Ok(response) => response
            .json::<ReverseResponse>()
            .await
            .map(|reverse| reverse.display_name)
            .ok(),
        Err(error) => {
            warn!("Reverse geocoding failed: {error}");
            None
        }
    }
}

/// Fallback display address when geocoding is unavailable
pub fn format_coordinates(lat: f64, lng: f64) -> String {
    format!("{lat:.5}, {lng:.5}")
}

#[cfg(test)]
mod tests {
    use super::format_coordinates;

    #[test]
    fn coordinates_format_to_five_decimals() {
        assert_eq!(
            format_coordinates(4.60971, -74.08175),
            "4.60971, -74.08175"
        );
        assert_eq!(format_coordinates(0.0, 0.0), "0.00000, 0.00000");
    }
}
