use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, Result};

pub const DEMO_USER_ID: &str = "user-demo";
pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_EMAIL: &str = "demo@demo.com";
pub const DEMO_PASSWORD: &str = "demo123";

#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

async fn hash_password(password: String, cost: u32) -> Result<String> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

async fn verify_password(password: String, hash: String) -> Result<bool> {
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(valid)
}

/// In-memory user accounts, keyed by case-insensitive email
pub struct UserStore {
    users: RwLock<Vec<User>>,
    bcrypt_cost: u32,
}

impl UserStore {
    pub fn new(bcrypt_cost: u32) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            bcrypt_cost,
        }
    }

    pub async fn seed_demo_user(&self) -> Result<()> {
        if self.find_by_email(DEMO_EMAIL).await.is_some() {
            return Ok(());
        }

        let password_hash = hash_password(DEMO_PASSWORD.to_string(), self.bcrypt_cost).await?;
        self.users.write().await.push(User {
            id: DEMO_USER_ID.to_string(),
            username: DEMO_USERNAME.to_string(),
            email: DEMO_EMAIL.to_string(),
            password_hash,
        });

        tracing::info!(email = DEMO_EMAIL, "Seeded demo user");
        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<PublicUser> {
        let (username, email, password) = match (
            non_empty(request.username),
            non_empty(request.email),
            non_empty(request.password),
        ) {
            (Some(u), Some(e), Some(p)) => (u, e, p),
            _ => return Err(AppError::validation("All fields are required")),
        };

        if self.find_by_email(&email).await.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(password, self.bcrypt_cost).await?;

        let mut users = self.users.write().await;
        // Another signup may have claimed the email while hashing
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let user = User {
            id: format!("user-{}", Uuid::new_v4()),
            username,
            email,
            password_hash,
        };
        let public = user.public();
        users.push(user);

        tracing::info!(user_id = %public.id, username = %public.username, "User signed up");
        Ok(public)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<PublicUser> {
        let (email, password) = match (non_empty(request.email), non_empty(request.password)) {
            (Some(e), Some(p)) => (e, p),
            _ => return Err(AppError::validation("Email and password required")),
        };

        let invalid = || AppError::unauthorized("Invalid credentials");
        let user = self.find_by_email(&email).await.ok_or_else(invalid)?;

        if !verify_password(password, user.password_hash.clone()).await? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(invalid());
        }

        Ok(user.public())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(username: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let store = UserStore::new(4);
        let created = store.signup(signup("ada", "Ada@Example.com", "pw")).await.unwrap();
        assert!(created.id.starts_with("user-"));

        let logged_in = store.login(login("ada@example.com", "pw")).await.unwrap();
        assert_eq!(logged_in, created);

        let stored = store.find_by_email("ada@example.com").await.unwrap();
        assert_ne!(stored.password_hash, "pw");
    }

    #[tokio::test]
    async fn test_signup_requires_all_fields() {
        let store = UserStore::new(4);
        let mut request = signup("ada", "ada@example.com", "pw");
        request.password = Some(String::new());

        let err = store.signup(request).await.unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");
    }

    #[tokio::test]
    async fn test_duplicate_email_case_insensitive() {
        let store = UserStore::new(4);
        store.signup(signup("ada", "ada@example.com", "pw")).await.unwrap();

        let err = store
            .signup(signup("other", "ADA@example.com", "pw2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_login_failures() {
        let store = UserStore::new(4);
        store.signup(signup("ada", "ada@example.com", "pw")).await.unwrap();

        let err = store.login(login("ada@example.com", "wrong")).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");

        let err = store.login(login("nobody@example.com", "pw")).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");

        let err = store.login(LoginRequest::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Email and password required");
    }

    #[tokio::test]
    async fn test_demo_user_seeded_once() {
        let store = UserStore::new(4);
        store.seed_demo_user().await.unwrap();
        store.seed_demo_user().await.unwrap();

        let user = store.login(login(DEMO_EMAIL, DEMO_PASSWORD)).await.unwrap();
        assert_eq!(user.id, DEMO_USER_ID);
        assert_eq!(store.users.read().await.len(), 1);
    }
}
