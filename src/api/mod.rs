use crate::models::{Brevet, Member};
use crate::storage::load_token;
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Remote failure. Callers do not branch on the variant for user-facing text;
/// the detail is for console diagnostics.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request failed ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn decode(e: impl std::fmt::Display) -> Self {
        Self::Decode(e.to_string())
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        // Deployments inject `window.ENV.API_URL`; `api_url` is accepted for older index.html files.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                return Self::from_url(&url_str);
                            }
                        }
                    }
                }
            }
        }

        Self::from_url(DEFAULT_API_URL)
    }

    pub(crate) fn from_url(url: &str) -> Self {
        Self {
            api_url: url.trim().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of `PUT /api/brevetsUser/{id}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct UpdateBrevetRequest {
    pub title: String,
    pub doi: String,
    pub author: String,
    pub id_user: String,
}

/// The three calls the edit form makes. Implemented by [`ApiClient`]; tests substitute fakes.
pub(crate) trait PatentApi {
    async fn list_members(&self) -> ApiResult<Vec<Member>>;

    async fn get_brevet(&self, id: &str) -> ApiResult<Brevet>;

    async fn update_brevet(&self, id: &str, body: &UpdateBrevetRequest) -> ApiResult<()>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn load_from_storage() -> Self {
        Self {
            base_url: EnvConfig::new().api_url,
            token: load_token(),
        }
    }

    pub(crate) fn get_auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn brevet_path(id: &str) -> String {
        format!("/api/brevets/{}", urlencoding::encode(id))
    }

    pub(crate) fn brevet_update_path(id: &str) -> String {
        format!("/api/brevetsUser/{}", urlencoding::encode(id))
    }

    fn build(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = reqwest::Client::new().request(method, self.url(path));
        if let Some(header) = self.get_auth_header() {
            req = req.header("Authorization", header);
        }
        req
    }

    async fn execute(req: RequestBuilder) -> ApiResult<Response> {
        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::Status { status, body })
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let res = Self::execute(self.build(Method::GET, path)).await?;
        res.json().await.map_err(ApiError::decode)
    }

    /// Listing for the patent dashboard.
    pub async fn list_brevets(&self) -> ApiResult<Vec<Brevet>> {
        self.get_json("/api/brevets").await
    }
}

impl PatentApi for ApiClient {
    async fn list_members(&self) -> ApiResult<Vec<Member>> {
        self.get_json("/api/members").await
    }

    async fn get_brevet(&self, id: &str) -> ApiResult<Brevet> {
        self.get_json(&Self::brevet_path(id)).await
    }

    async fn update_brevet(&self, id: &str, body: &UpdateBrevetRequest) -> ApiResult<()> {
        // Response body is not part of the contract.
        Self::execute(self.build(Method::PUT, &Self::brevet_update_path(id)).json(body)).await?;
        Ok(())
    }
}

#[cfg(test)]
impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }
}
