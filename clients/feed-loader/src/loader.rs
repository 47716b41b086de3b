use uuid::Uuid;

use crate::models::{FeedProfile, Pagination};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    /// Nothing requested yet
    Idle,
    /// First page of the current filter in flight; the list is empty
    Loading { page: u32 },
    Ready,
    /// A follow-up page in flight; the list keeps what was loaded so far
    LoadingMore { page: u32 },
    /// Last fetch failed; the list is unchanged
    Error,
}

impl LoaderState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoaderState::Loading { .. } | LoaderState::LoadingMore { .. })
    }
}

/// A page fetch the caller should perform.
///
/// Only the request most recently handed out is accepted back by
/// [`FeedLoader::page_loaded`] / [`FeedLoader::page_failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    /// Trimmed interest filter; empty means the unfiltered feed
    pub interests: String,
    generation: u64,
}

/// Incremental feed state: accumulated profiles, paging and the active filter.
#[derive(Debug, Clone)]
pub struct FeedLoader {
    state: LoaderState,
    profiles: Vec<FeedProfile>,
    page: u32,
    loaded_page: u32,
    has_more: bool,
    interests: String,
    notice: Option<String>,
    generation: u64,
}

impl Default for FeedLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedLoader {
    pub fn new() -> Self {
        Self {
            state: LoaderState::Idle,
            profiles: Vec::new(),
            page: 0,
            loaded_page: 0,
            has_more: true,
            interests: String::new(),
            notice: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    pub fn profiles(&self) -> &[FeedProfile] {
        &self.profiles
    }

    /// Page of the most recent request (0 before the first one)
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn interests(&self) -> &str {
        &self.interests
    }

    /// Transient user-facing message from the last failure or action
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Submit the interest filter. Clears the list and restarts at page 1.
    ///
    /// Re-submitting the active filter is a no-op unless nothing has been
    /// loaded yet or the last fetch failed.
    pub fn set_filter(&mut self, raw: &str) -> Option<PageRequest> {
        let interests = raw.trim();
        let unchanged = interests == self.interests;
        if unchanged && !matches!(self.state, LoaderState::Idle | LoaderState::Error) {
            return None;
        }

        self.generation += 1;
        self.interests = interests.to_string();
        self.profiles.clear();
        self.page = 1;
        self.loaded_page = 0;
        self.has_more = true;
        self.notice = None;
        self.state = LoaderState::Loading { page: 1 };
        Some(self.request(1))
    }

    /// The last rendered profile became visible.
    ///
    /// Issues the next page only from `Ready` with more pages left. From
    /// `Error` it re-issues the page that failed.
    pub fn last_item_visible(&mut self) -> Option<PageRequest> {
        if !self.has_more {
            return None;
        }

        match self.state {
            LoaderState::Ready | LoaderState::Error => {
                let next = self.loaded_page + 1;
                self.page = next;
                self.state = if next == 1 {
                    LoaderState::Loading { page: 1 }
                } else {
                    LoaderState::LoadingMore { page: next }
                };
                Some(self.request(next))
            }
            LoaderState::Idle | LoaderState::Loading { .. } | LoaderState::LoadingMore { .. } => {
                None
            }
        }
    }

    /// Apply an enriched page. Returns false if `request` is stale.
    pub fn page_loaded(
        &mut self,
        request: PageRequest,
        profiles: Vec<FeedProfile>,
        pagination: Pagination,
    ) -> bool {
        if !self.is_current(&request) {
            return false;
        }

        match self.state {
            LoaderState::Loading { .. } => self.profiles = profiles,
            _ => self.profiles.extend(profiles),
        }
        self.loaded_page = request.page;
        self.has_more = pagination.has_more();
        self.notice = None;
        self.state = LoaderState::Ready;
        true
    }

    /// Record a failed fetch. Returns false if `request` is stale.
    pub fn page_failed(&mut self, request: PageRequest, message: impl Into<String>) -> bool {
        if !self.is_current(&request) {
            return false;
        }

        self.notice = Some(message.into());
        self.state = LoaderState::Error;
        true
    }

    /// Update the follow flag of one accumulated profile.
    pub fn set_following(&mut self, profile_id: Uuid, following: bool) -> bool {
        match self.profiles.iter_mut().find(|p| p.id == profile_id) {
            Some(profile) => {
                profile.is_following = following;
                true
            }
            None => false,
        }
    }

    fn request(&self, page: u32) -> PageRequest {
        PageRequest {
            page,
            interests: self.interests.clone(),
            generation: self.generation,
        }
    }

    fn is_current(&self, request: &PageRequest) -> bool {
        let in_flight = match self.state {
            LoaderState::Loading { page } | LoaderState::LoadingMore { page } => page,
            _ => return false,
        };
        request.generation == self.generation && request.page == in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(n: u32) -> FeedProfile {
        FeedProfile {
            id: Uuid::new_v4(),
            name: format!("user {}", n),
            bio: None,
            headline: None,
            photo_url: None,
            interests: vec![],
            is_following: false,
        }
    }

    fn profiles(n: u32) -> Vec<FeedProfile> {
        (0..n).map(profile).collect()
    }

    fn pagination(current_page: u32, pages: u32) -> Pagination {
        Pagination {
            total: u64::from(pages) * 10,
            pages,
            current_page,
            per_page: 10,
        }
    }

    /// Load `pages` full pages of the unfiltered feed out of `total_pages`
    fn loaded(pages: u32, total_pages: u32) -> FeedLoader {
        let mut loader = FeedLoader::new();
        let req = loader.set_filter("").unwrap();
        assert!(loader.page_loaded(req, profiles(10), pagination(1, total_pages)));
        for page in 2..=pages {
            let req = loader.last_item_visible().unwrap();
            assert_eq!(req.page, page);
            assert!(loader.page_loaded(req, profiles(10), pagination(page, total_pages)));
        }
        loader
    }

    #[test]
    fn test_initial_load() {
        let mut loader = FeedLoader::new();
        assert_eq!(loader.state(), LoaderState::Idle);
        assert!(loader.last_item_visible().is_none());

        let req = loader.set_filter("").unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.interests, "");
        assert_eq!(loader.state(), LoaderState::Loading { page: 1 });

        assert!(loader.page_loaded(req, profiles(10), pagination(1, 2)));
        assert_eq!(loader.state(), LoaderState::Ready);
        assert_eq!(loader.profiles().len(), 10);
        assert!(loader.has_more());
    }

    #[test]
    fn test_pages_accumulate_until_last() {
        let mut loader = loaded(3, 3);
        assert_eq!(loader.profiles().len(), 30);
        assert_eq!(loader.page(), 3);
        assert!(!loader.has_more());
        assert!(loader.last_item_visible().is_none());
    }

    #[test]
    fn test_filter_change_resets_accumulation() {
        let mut loader = loaded(3, 5);
        assert_eq!(loader.profiles().len(), 30);

        let req = loader.set_filter(" music ").unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.interests, "music");
        assert!(loader.profiles().is_empty());
        assert_eq!(loader.page(), 1);
        assert_eq!(loader.state(), LoaderState::Loading { page: 1 });

        // hasMore comes from the new response alone
        assert!(loader.page_loaded(req, profiles(4), pagination(1, 1)));
        assert_eq!(loader.profiles().len(), 4);
        assert!(!loader.has_more());
    }

    #[test]
    fn test_one_request_per_visibility_event() {
        let mut loader = loaded(1, 3);

        let first = loader.last_item_visible();
        assert_eq!(first.as_ref().map(|r| r.page), Some(2));
        // still in flight: further events issue nothing
        assert!(loader.last_item_visible().is_none());
        assert!(loader.last_item_visible().is_none());
        assert_eq!(loader.state(), LoaderState::LoadingMore { page: 2 });
    }

    #[test]
    fn test_same_filter_resubmitted_is_noop() {
        let mut loader = loaded(2, 3);
        assert!(loader.set_filter("").is_none());
        assert!(loader.set_filter("   ").is_none());
        assert_eq!(loader.profiles().len(), 20);
    }

    #[test]
    fn test_failure_keeps_list_and_retries_same_page() {
        let mut loader = loaded(2, 4);
        let req = loader.last_item_visible().unwrap();
        assert_eq!(req.page, 3);

        assert!(loader.page_failed(req, "Failed to load profiles"));
        assert_eq!(loader.state(), LoaderState::Error);
        assert_eq!(loader.profiles().len(), 20);
        assert!(loader.has_more());
        assert_eq!(loader.notice(), Some("Failed to load profiles"));

        let retry = loader.last_item_visible().unwrap();
        assert_eq!(retry.page, 3);
        assert!(loader.page_loaded(retry, profiles(10), pagination(3, 4)));
        assert_eq!(loader.profiles().len(), 30);
        assert!(loader.notice().is_none());
    }

    #[test]
    fn test_first_page_failure_retries_page_one() {
        let mut loader = FeedLoader::new();
        let req = loader.set_filter("art").unwrap();
        assert!(loader.page_failed(req, "boom"));

        let retry = loader.last_item_visible().unwrap();
        assert_eq!(retry.page, 1);
        assert_eq!(loader.state(), LoaderState::Loading { page: 1 });

        // resubmitting the same filter from Error also retries
        let mut loader = FeedLoader::new();
        let req = loader.set_filter("art").unwrap();
        loader.page_failed(req, "boom");
        assert!(loader.set_filter("art").is_some());
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut loader = loaded(1, 3);
        let stale = loader.last_item_visible().unwrap();

        let fresh = loader.set_filter("music").unwrap();
        assert!(!loader.page_loaded(stale.clone(), profiles(10), pagination(2, 3)));
        assert!(!loader.page_failed(stale, "late failure"));
        assert!(loader.profiles().is_empty());
        assert!(loader.notice().is_none());

        assert!(loader.page_loaded(fresh, profiles(2), pagination(1, 1)));
        assert_eq!(loader.profiles().len(), 2);
    }

    #[test]
    fn test_set_following() {
        let mut loader = FeedLoader::new();
        let req = loader.set_filter("").unwrap();
        let page = profiles(3);
        let target = page[1].id;
        loader.page_loaded(req, page, pagination(1, 1));

        assert!(loader.set_following(target, true));
        assert!(loader.profiles()[1].is_following);
        assert!(!loader.profiles()[0].is_following);
        assert!(!loader.set_following(Uuid::new_v4(), true));
    }
}
