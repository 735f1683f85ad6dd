use serde::{Deserialize, Serialize};

use crate::auth;
use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::database::UserRepository;
use crate::error::ApiError;
use crate::validation::Violations;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// The user shape exposed over the API. `token` is only present in the login
/// response.
#[derive(Debug, Serialize)]
pub struct UserBody {
    pub username: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl From<&User> for UserBody {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone(),
            token: None,
        }
    }
}

/// Registration, login and session lifecycle
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    pub async fn new() -> Result<Self, ApiError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self {
            users: UserRepository::new(pool),
        })
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<UserBody, ApiError> {
        registration_rules(&req)?;

        let username = req.username.as_deref().unwrap_or_default().trim();
        let name = req.name.as_deref().unwrap_or_default().trim();
        let password = req.password.as_deref().unwrap_or_default();

        if self.users.find_by_username(username).await?.is_some() {
            return Err(ApiError::validation_message(
                "username",
                "username already registered",
            ));
        }

        let user = self
            .users
            .insert(username, &auth::hash_password(password), name)
            .await?;
        Ok(UserBody::from(&user))
    }

    /// Unknown username and wrong password are reported identically
    pub async fn login(&self, req: LoginRequest) -> Result<UserBody, ApiError> {
        login_rules(&req)?;

        let username = req.username.as_deref().unwrap_or_default().trim();
        let password = req.password.as_deref().unwrap_or_default();

        let user = self
            .users
            .find_by_username(username)
            .await?
            .filter(|user| auth::verify_password(password, &user.password))
            .ok_or_else(|| ApiError::unauthorized("username or password wrong"))?;

        let token = auth::generate_token();
        self.users.set_token(user.id, Some(&token)).await?;

        let mut body = UserBody::from(&user);
        body.token = Some(token);
        Ok(body)
    }

    /// Clear the stored session token so the credential stops resolving
    pub async fn logout(&self, user: &User) -> Result<(), ApiError> {
        self.users.set_token(user.id, None).await?;
        Ok(())
    }
}

fn registration_rules(req: &RegisterRequest) -> Result<(), ApiError> {
    let mut v = Violations::new();
    v.require("username", req.username.as_deref());
    v.max_length("username", req.username.as_deref(), 100);
    v.require("password", req.password.as_deref());
    v.max_length("password", req.password.as_deref(), 100);
    v.require("name", req.name.as_deref());
    v.max_length("name", req.name.as_deref(), 100);
    v.finish()
}

fn login_rules(req: &LoginRequest) -> Result<(), ApiError> {
    let mut v = Violations::new();
    v.require("username", req.username.as_deref());
    v.require("password", req.password.as_deref());
    v.finish()
}
