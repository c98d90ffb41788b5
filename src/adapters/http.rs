use crate::domain::model::{
    AuthBody, AuthReply, Event, EventComment, EventDetail, EventDetailBody, EventLikeRequest,
    FavoriteEvent, LoginRequest, NewEvent, RegisterRequest, SocialAuthRequest, Venue,
};
use crate::domain::ports::TokenStore;
use crate::utils::error::{ClientError, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// Storage key the bearer token lives under.
pub const TOKEN_KEY: &str = "access_token";

/// Client for the events/venues backend.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        // 確保 join 時保留原本的路徑前綴
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| ClientError::InvalidConfigValueError {
            field: "api.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        Ok(Self {
            base_url,
            client: Client::new(),
            tokens,
        })
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::ConfigError {
                message: format!("Cannot build URL for '{}': {}", path, e),
            })
    }

    /// Adds the stored bearer token, if there is one.
    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        match self.tokens.get(TOKEN_KEY)? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => {
                tracing::warn!("No stored access token, sending request without Authorization");
                Ok(builder)
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let detail = Self::error_detail(response).await;
            return Err(ClientError::HttpError { status, detail });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn expect_success(response: Response) -> Result<()> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if status.is_success() {
            Ok(())
        } else {
            let detail = Self::error_detail(response).await;
            Err(ClientError::HttpError { status, detail })
        }
    }

    async fn error_detail(response: Response) -> String {
        let text = response.text().await.unwrap_or_default();
        serde_json::from_str::<AuthBody>(&text)
            .ok()
            .and_then(|body| body.detail_text())
            .unwrap_or(text)
    }

    async fn auth_reply(response: Response) -> Result<AuthReply> {
        let status = response.status();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            AuthBody::default()
        } else {
            serde_json::from_str(&text)?
        };
        Ok(AuthReply {
            ok: status.is_success(),
            status,
            body,
        })
    }

    // Auth

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthReply> {
        let url = self.url("auth/token")?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).form(request).send().await?;
        Self::auth_reply(response).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthReply> {
        let url = self.url("auth")?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(request).send().await?;
        Self::auth_reply(response).await
    }

    pub async fn social_auth_google(&self, request: &SocialAuthRequest) -> Result<AuthReply> {
        let url = self.url("social_auth/google")?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(request).send().await?;
        Self::auth_reply(response).await
    }

    // Events

    pub async fn get_events(&self) -> Result<Vec<Event>> {
        self.get_json("events/all").await
    }

    pub async fn get_event(&self, event_id: i64) -> Result<EventDetail> {
        let body: EventDetailBody = self.get_json(&format!("events/{}", event_id)).await?;
        Ok(body.into())
    }

    pub async fn get_event_comments(&self, event_id: i64) -> Result<Vec<EventComment>> {
        self.get_json(&format!("events/{}/comment", event_id)).await
    }

    pub async fn get_event_comment(&self, comment_id: i64) -> Result<EventComment> {
        self.get_json(&format!("events/comment/{}", comment_id))
            .await
    }

    pub async fn get_favorite_events(&self) -> Result<Vec<FavoriteEvent>> {
        let url = self.url("events/favorites")?;
        tracing::debug!("GET {}", url);
        let response = self.authorized(self.client.get(url))?.send().await?;
        Self::decode(response).await
    }

    pub async fn create_event(&self, event: &NewEvent) -> Result<()> {
        let url = self.url("events")?;
        tracing::debug!("POST {}", url);
        let response = self
            .authorized(self.client.post(url))?
            .json(event)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    pub async fn like_event(&self, event_id: i64) -> Result<()> {
        let url = self.url("events/like")?;
        tracing::debug!("POST {}", url);
        let response = self
            .authorized(self.client.post(url))?
            .json(&EventLikeRequest { event: event_id })
            .send()
            .await?;
        Self::expect_success(response).await
    }

    // Venues

    pub async fn get_venues(&self) -> Result<Vec<Venue>> {
        self.get_json("venues/all").await
    }

    pub async fn get_venue(&self, venue_id: i64) -> Result<Venue> {
        self.get_json(&format!("venues/{}", venue_id)).await
    }
}
