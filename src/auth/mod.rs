pub mod jwt;
pub mod users;

use serde::Serialize;

use crate::config::AuthConfig;
use crate::error::{AppError, Result};
pub use jwt::{Claims, TokenIssuer};
pub use users::{LoginRequest, PublicUser, SignupRequest, UserStore};

#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// `None` when token issuance is disabled
    pub token: Option<String>,
    pub user: PublicUser,
}

/// Accounts plus token issuance. With auth disabled, accounts still work but
/// no tokens are issued and protected routes answer 501.
pub struct AuthService {
    users: UserStore,
    tokens: Option<TokenIssuer>,
}

impl AuthService {
    pub fn new(config: &AuthConfig) -> Self {
        let tokens = config
            .enabled
            .then(|| TokenIssuer::new(&config.jwt_secret, config.token_ttl_days));

        if tokens.is_none() {
            tracing::warn!("Auth disabled: protected routes will answer 501");
        }

        Self {
            users: UserStore::new(config.bcrypt_cost),
            tokens,
        }
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn is_enabled(&self) -> bool {
        self.tokens.is_some()
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<AuthSession> {
        let user = self.users.signup(request).await?;
        self.session_for(user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthSession> {
        let user = self.users.login(request).await?;
        self.session_for(user)
    }

    fn session_for(&self, user: PublicUser) -> Result<AuthSession> {
        let token = match &self.tokens {
            Some(issuer) => Some(issuer.issue(&user)?),
            None => None,
        };
        Ok(AuthSession { token, user })
    }

    /// Resolves the `Authorization` header of a request to verified claims
    pub fn authenticate(&self, header: Option<&str>) -> Result<Claims> {
        let issuer = self.tokens.as_ref().ok_or(AppError::AuthUnavailable)?;
        let token = header
            .and_then(jwt::bearer_token)
            .ok_or_else(|| AppError::unauthorized("Missing token"))?;
        issuer.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn service(enabled: bool) -> AuthService {
        let mut config = Config::default().auth;
        config.enabled = enabled;
        config.bcrypt_cost = 4;
        AuthService::new(&config)
    }

    fn signup_request(email: &str) -> SignupRequest {
        SignupRequest {
            username: Some("lin".to_string()),
            email: Some(email.to_string()),
            password: Some("hunter2".to_string()),
        }
    }

    #[tokio::test]
    async fn test_signup_and_login_tokens_share_user_id() {
        let auth = service(true);

        let signed_up = auth.signup(signup_request("lin@example.com")).await.unwrap();
        let logged_in = auth
            .login(LoginRequest {
                email: Some("LIN@example.com".to_string()),
                password: Some("hunter2".to_string()),
            })
            .await
            .unwrap();

        let header = |session: &AuthSession| format!("Bearer {}", session.token.clone().unwrap());
        let a = auth.authenticate(Some(&header(&signed_up))).unwrap();
        let b = auth.authenticate(Some(&header(&logged_in))).unwrap();
        assert_eq!(a.user_id, signed_up.user.id);
        assert_eq!(a.user_id, b.user_id);
    }

    #[tokio::test]
    async fn test_authenticate_errors() {
        let auth = service(true);
        assert_eq!(
            auth.authenticate(None).unwrap_err().to_string(),
            "Missing token"
        );
        assert_eq!(
            auth.authenticate(Some("Bearer not-a-jwt")).unwrap_err().to_string(),
            "Invalid token"
        );
    }

    #[tokio::test]
    async fn test_disabled_auth_issues_no_tokens() {
        let auth = service(false);
        assert!(!auth.is_enabled());

        let session = auth.signup(signup_request("off@example.com")).await.unwrap();
        assert!(session.token.is_none());

        let err = auth.authenticate(Some("Bearer anything")).unwrap_err();
        assert!(matches!(err, AppError::AuthUnavailable));
    }
}
