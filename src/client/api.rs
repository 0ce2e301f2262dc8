use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use super::ClientError;
use crate::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::models::{NewTask, PublicUser, Task, TaskChanges};

/// Typed access to the HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    user: Option<PublicUser>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            user: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The account signed in through [`register`](Self::register) or
    /// [`login`](Self::login).
    pub fn user(&self) -> Option<&PublicUser> {
        self.user.as_ref()
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
    }

    fn remember(&mut self, auth: &AuthResponse) {
        self.token = Some(auth.token.clone());
        self.user = Some(auth.user.clone());
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_ref().ok_or(ClientError::NotAuthenticated)?;
        Ok(builder.bearer_auth(token))
    }

    /// Registers an account and keeps the returned token and user.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthResponse, ClientError> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.map(str::to_string),
        };
        let response = self.http.post(self.url("/auth/register")).json(&body).send().await?;
        let auth: AuthResponse = decode(response).await?;
        self.remember(&auth);
        Ok(auth)
    }

    /// Logs in and keeps the returned token and user.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(self.url("/auth/login")).json(&body).send().await?;
        let auth: AuthResponse = decode(response).await?;
        self.remember(&auth);
        Ok(auth)
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let request = self.authorized(self.http.get(self.url("/tasks")))?;
        decode(request.send().await?).await
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<Task, ClientError> {
        let request = self.authorized(self.http.post(self.url("/tasks")))?;
        decode(request.json(task).send().await?).await
    }

    pub async fn update_task(&self, id: Uuid, changes: &TaskChanges) -> Result<Task, ClientError> {
        let request = self.authorized(self.http.put(self.url(&format!("/tasks/{}", id))))?;
        decode(request.json(changes).send().await?).await
    }

    pub async fn delete_task(&self, id: Uuid) -> Result<(), ClientError> {
        let request = self.authorized(self.http.delete(self.url(&format!("/tasks/{}", id))))?;
        check(request.send().await?).await.map(|_| ())
    }
}

/// Turns a non-success response into `ClientError::Api`.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or_else(|_| {
            if text.is_empty() {
                status.canonical_reason().unwrap_or("Request failed").to_string()
            } else {
                text
            }
        });

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = check(response).await?;
    Ok(response.json::<T>().await?)
}
