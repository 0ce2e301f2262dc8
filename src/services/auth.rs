use std::sync::Arc;

use crate::auth::{hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest, TokenKeys};
use crate::error::AppError;
use crate::models::{NewUser, PublicUser, User};
use crate::store::Store;

/// Registration and login.
///
/// Callers are expected to have run `validate()` on the request payloads.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    keys: TokenKeys,
    bcrypt_cost: u32,
    // Verified against when the email is unknown, so both login failures
    // cost one bcrypt verification.
    dummy_hash: Arc<str>,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, keys: TokenKeys, bcrypt_cost: u32) -> Result<Self, AppError> {
        let dummy_hash = hash_password("taskboard-dummy-password", bcrypt_cost)?;
        Ok(Self {
            store,
            keys,
            bcrypt_cost,
            dummy_hash: dummy_hash.into(),
        })
    }

    pub fn keys(&self) -> &TokenKeys {
        &self.keys
    }

    /// Creates an account and signs the caller in.
    ///
    /// Fails with `AppError::Conflict` if the email is already registered.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&request.email);
        let name = request
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let password = request.password;
        let cost = self.bcrypt_cost;
        let password_hash = run_blocking(move || hash_password(&password, cost)).await?;

        let user = User::new(NewUser {
            email,
            password_hash,
            name,
        });

        let user = match self.store.insert_user(user).await? {
            Some(user) => user,
            None => {
                log::warn!("Registration rejected: email already in use");
                return Err(AppError::Conflict("User already exists".into()));
            }
        };

        log::info!("Registered user {}", user.id);
        self.respond(&user)
    }

    /// Checks credentials and issues a fresh token.
    ///
    /// Unknown emails and wrong passwords both yield
    /// `AppError::InvalidCredentials`.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&request.email);
        let user = self.store.find_user_by_email(&email).await?;

        let hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.to_string(),
        };
        let password = request.password;
        let matches = run_blocking(move || verify_password(&password, &hash)).await?;

        match user {
            Some(user) if matches => {
                log::info!("User {} logged in", user.id);
                self.respond(&user)
            }
            _ => {
                log::warn!("Failed login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn respond(&self, user: &User) -> Result<AuthResponse, AppError> {
        Ok(AuthResponse {
            token: self.keys.generate(user.id)?,
            user: PublicUser::from(user),
        })
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Runs bcrypt work off the async executor.
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Blocking task failed: {}", e)))?
}
