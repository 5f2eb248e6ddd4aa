use actix_web::cookie::{time::Duration, Cookie, SameSite};

use crate::{entities::user::SessionUser, settings::AppConfig};

pub const AUTH_COOKIE: &str = "authToken";
pub const USER_INFO_COOKIE: &str = "userInfo";

/// Builds the two session cookies: the bearer token (HTTP-only) and the
/// URL-encoded user-info JSON that the UI may read.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    secure: bool,
    max_age: Duration,
}

impl SessionCookies {
    pub fn new(secure: bool, max_age_hours: i64) -> Self {
        SessionCookies {
            secure,
            max_age: Duration::hours(max_age_hours),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.secure_cookies(), config.session_max_age_hours)
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    fn build(&self, name: &'static str, value: String, http_only: bool, max_age: Duration) -> Cookie<'static> {
        Cookie::build(name, value)
            .path("/")
            .http_only(http_only)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .max_age(max_age)
            .finish()
    }

    pub fn login(&self, token: &str, user: &SessionUser) -> Result<[Cookie<'static>; 2], serde_json::Error> {
        let info = encode_user_info(user)?;

        Ok([
            self.build(AUTH_COOKIE, token.to_string(), true, self.max_age),
            self.build(USER_INFO_COOKIE, info, false, self.max_age),
        ])
    }

    /// Empty values with a zero max-age make the browser drop both cookies.
    pub fn logout(&self) -> [Cookie<'static>; 2] {
        [
            self.build(AUTH_COOKIE, String::new(), true, Duration::ZERO),
            self.build(USER_INFO_COOKIE, String::new(), false, Duration::ZERO),
        ]
    }
}

pub fn encode_user_info(user: &SessionUser) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(user)?;
    Ok(urlencoding::encode(&json).into_owned())
}

pub fn decode_user_info(value: &str) -> Option<SessionUser> {
    let json = urlencoding::decode(value).ok()?;
    serde_json::from_str(&json).ok()
}
