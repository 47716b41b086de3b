use tracing::{info, warn};
use uuid::Uuid;

use crate::api::FeedApi;
use crate::enrich::with_follow_status;
use crate::loader::{FeedLoader, PageRequest};
use crate::models::OwnProfile;

const LOAD_FAILED: &str = "Failed to load profiles";

/// One user's feed view: a [`FeedLoader`] driven against a [`FeedApi`].
pub struct FeedSession<A: FeedApi> {
    api: A,
    loader: FeedLoader,
    current_user: Option<OwnProfile>,
}

impl<A: FeedApi> FeedSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            loader: FeedLoader::new(),
            current_user: None,
        }
    }

    pub fn loader(&self) -> &FeedLoader {
        &self.loader
    }

    pub fn current_user(&self) -> Option<&OwnProfile> {
        self.current_user.as_ref()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Load the signed-in user and the first unfiltered page.
    pub async fn open(&mut self) {
        match self.api.current_user().await {
            Ok(user) => self.current_user = Some(user),
            Err(e) => warn!("could not load current user: {}", e),
        }
        self.submit_filter("").await;
    }

    pub async fn submit_filter(&mut self, interests: &str) {
        if let Some(request) = self.loader.set_filter(interests) {
            self.run(request).await;
        }
    }

    pub async fn last_item_visible(&mut self) {
        if let Some(request) = self.loader.last_item_visible() {
            self.run(request).await;
        }
    }

    pub async fn follow(&mut self, profile_id: Uuid) {
        match self.api.follow(profile_id).await {
            Ok(()) => {
                self.loader.set_following(profile_id, true);
                self.loader.set_notice("Successfully followed user");
            }
            Err(e) => {
                warn!(profile_id = %profile_id, "follow failed: {}", e);
                self.loader.set_notice("Failed to follow user");
            }
        }
    }

    pub async fn unfollow(&mut self, profile_id: Uuid) {
        match self.api.unfollow(profile_id).await {
            Ok(()) => {
                self.loader.set_following(profile_id, false);
                self.loader.set_notice("Successfully unfollowed user");
            }
            Err(e) => {
                warn!(profile_id = %profile_id, "unfollow failed: {}", e);
                self.loader.set_notice("Failed to unfollow user");
            }
        }
    }

    async fn run(&mut self, request: PageRequest) {
        match self.api.fetch_page(&request).await {
            Ok(response) => {
                let profiles = with_follow_status(&self.api, response.profiles).await;
                let page = request.page;
                if self.loader.page_loaded(request, profiles, response.pagination) {
                    info!(
                        page,
                        loaded = self.loader.profiles().len(),
                        has_more = self.loader.has_more(),
                        "feed page applied"
                    );
                }
            }
            Err(e) => {
                warn!(page = request.page, "feed page failed: {}", e);
                self.loader.page_failed(request, LOAD_FAILED);
            }
        }
    }
}
