use validator::Validate;

use crate::entities::session::Session;
use crate::entities::user::{LoginResponse, LoginUser, NewUser, NewUserResponse, SessionUser};
use crate::errors::ProxyError;
use crate::repositories::backend::BackendApi;

/// Outcome of a successful login: what goes into the cookies and what the
/// UI receives.
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub user: SessionUser,
    pub response: LoginResponse,
}

pub struct AuthHandler<B>
where
    B: BackendApi,
{
    pub backend: B,
}

impl<B> AuthHandler<B>
where
    B: BackendApi,
{
    pub fn new(backend: B) -> Self {
        AuthHandler { backend }
    }

    /// Forwards credentials and picks the landing page from the user's role.
    pub async fn login(&self, request: LoginUser) -> Result<LoginOutcome, ProxyError> {
        request.validate()?;

        let reply = self.backend.login(&request.to_backend()).await?;
        let (token, user) = reply.into_session();

        tracing::info!(role = %user.rol, "User logged in successfully");

        let response = LoginResponse {
            redirect_to: user.landing_page().to_string(),
        };

        Ok(LoginOutcome { token, user, response })
    }

    /// Registers a backend user on behalf of the logged-in administrator.
    pub async fn register_user(&self, session: &Session, request: NewUser) -> Result<NewUserResponse, ProxyError> {
        request.validate()?;

        let user = request.to_backend().ok_or_else(ProxyError::incomplete)?;
        self.backend.register_user(session, &user).await?;

        tracing::info!("User registered");
        Ok(NewUserResponse { success: true })
    }
}
