use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::error::{LoaderError, Result};
use crate::loader::PageRequest;
use crate::models::{FeedResponse, FollowStatus, OwnProfile};

/// REST operations the loader depends on
#[async_trait]
pub trait FeedApi: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<FeedResponse>;

    async fn follow_status(&self, profile_id: Uuid) -> Result<bool>;

    async fn follow(&self, profile_id: Uuid) -> Result<()>;

    async fn unfollow(&self, profile_id: Uuid) -> Result<()>;

    async fn current_user(&self) -> Result<OwnProfile>;
}

/// Where the API lives and who is calling it
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// API root including the `/api` prefix, e.g. `http://localhost:3000/api`
    pub base_url: String,
    /// Bearer token obtained from login or signup
    pub token: String,
}

/// `FeedApi` over HTTP with reqwest
#[derive(Clone)]
pub struct HttpFeedApi {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpFeedApi {
    pub fn new(config: LoaderConfig) -> Result<Self> {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: LoaderConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(LoaderError::InvalidBaseUrl(config.base_url));
        }
        Ok(Self {
            client,
            base_url,
            token: config.token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.token)
    }

    async fn json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T> {
        let response = Self::checked(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn checked(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or(body);

        Err(LoaderError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl FeedApi for HttpFeedApi {
    async fn fetch_page(&self, request: &PageRequest) -> Result<FeedResponse> {
        let page = request.page.to_string();
        let builder = if request.interests.is_empty() {
            self.client
                .get(self.url("/feed"))
                .query(&[("page", page.as_str())])
        } else {
            self.client
                .get(self.url("/feed/filter"))
                .query(&[("page", page.as_str()), ("interests", request.interests.as_str())])
        };

        debug!(page = request.page, interests = %request.interests, "fetching feed page");
        Self::json(self.authorized(builder)).await
    }

    async fn follow_status(&self, profile_id: Uuid) -> Result<bool> {
        let builder = self
            .client
            .get(self.url(&format!("/profile/{}/follow", profile_id)));
        let status: FollowStatus = Self::json(self.authorized(builder)).await?;
        Ok(status.is_following)
    }

    async fn follow(&self, profile_id: Uuid) -> Result<()> {
        let builder = self
            .client
            .post(self.url(&format!("/profile/{}/follow", profile_id)));
        Self::checked(self.authorized(builder).send().await?).await?;
        Ok(())
    }

    async fn unfollow(&self, profile_id: Uuid) -> Result<()> {
        let builder = self
            .client
            .delete(self.url(&format!("/profile/{}/follow", profile_id)));
        Self::checked(self.authorized(builder).send().await?).await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<OwnProfile> {
        let builder = self.client.get(self.url("/profile/me"));
        Self::json(self.authorized(builder)).await
    }
}
