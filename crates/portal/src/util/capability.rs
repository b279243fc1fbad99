use civitas_config::config;
use rocket::request::{FromRequest, Outcome, Request};

/// Capabilities resolved for the current request
///
/// Authorization is entirely a boundary concern: the core only ever
/// sees the resolved flag, never tokens.
pub struct Capability {
    /// Whether the caller may mutate reports and read contact emails
    pub admin: bool,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Capability {
    type Error = std::convert::Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let config = config().await;
        let token = config.api.security.admin_token;

        // An empty configured token grants the capability to nobody
        let admin = !token.is_empty()
            && request
                .headers()
                .get_one("x-admin-token")
                .map_or(false, |candidate| candidate == token);

        Outcome::Success(Capability { admin })
    }
}

impl<'r> rocket_okapi::request::OpenApiFromRequest<'r> for Capability {
    fn from_request_input(
        _gen: &mut rocket_okapi::gen::OpenApiGenerator,
        _name: String,
        _required: bool,
    ) -> rocket_okapi::Result<rocket_okapi::request::RequestHeaderInput> {
        Ok(rocket_okapi::request::RequestHeaderInput::None)
    }
}
