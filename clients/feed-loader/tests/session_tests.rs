use async_trait::async_trait;
use feed_loader::{
    FeedApi, FeedProfile, FeedResponse, FeedSession, LoaderError, LoaderState, OwnProfile,
    PageRequest, Pagination, Result,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// In-process stand-in for the REST API with a fixed user population.
struct FakeApi {
    users: Vec<FeedProfile>,
    per_page: u32,
    following: Mutex<HashSet<Uuid>>,
    broken_status: HashSet<Uuid>,
    fail_fetch: AtomicBool,
    fail_current_user: bool,
    requests: Mutex<Vec<(u32, String)>>,
}

impl FakeApi {
    fn new(users: Vec<FeedProfile>) -> Self {
        Self {
            users,
            per_page: 10,
            following: Mutex::new(HashSet::new()),
            broken_status: HashSet::new(),
            fail_fetch: AtomicBool::new(false),
            fail_current_user: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<(u32, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedApi for FakeApi {
    async fn fetch_page(&self, request: &PageRequest) -> Result<FeedResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((request.page, request.interests.clone()));

        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(LoaderError::Status {
                status: 500,
                message: "Error fetching profiles".into(),
            });
        }

        let wanted: Vec<&str> = request
            .interests
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let matching: Vec<FeedProfile> = self
            .users
            .iter()
            .filter(|u| {
                wanted.is_empty() || u.interests.iter().any(|i| wanted.contains(&i.as_str()))
            })
            .cloned()
            .collect();

        let total = matching.len() as u32;
        let pages = (total + self.per_page - 1) / self.per_page;
        let start = ((request.page - 1) * self.per_page) as usize;
        let profiles = matching
            .into_iter()
            .skip(start)
            .take(self.per_page as usize)
            .collect();

        Ok(FeedResponse {
            profiles,
            pagination: Pagination {
                total: u64::from(total),
                pages,
                current_page: request.page,
                per_page: self.per_page,
            },
        })
    }

    async fn follow_status(&self, profile_id: Uuid) -> Result<bool> {
        if self.broken_status.contains(&profile_id) {
            return Err(LoaderError::Status {
                status: 500,
                message: "Error checking relationship status".into(),
            });
        }
        Ok(self.following.lock().unwrap().contains(&profile_id))
    }

    async fn follow(&self, profile_id: Uuid) -> Result<()> {
        if !self.users.iter().any(|u| u.id == profile_id) {
            return Err(LoaderError::Status {
                status: 404,
                message: "User not found".into(),
            });
        }
        self.following.lock().unwrap().insert(profile_id);
        Ok(())
    }

    async fn unfollow(&self, profile_id: Uuid) -> Result<()> {
        self.following.lock().unwrap().remove(&profile_id);
        Ok(())
    }

    async fn current_user(&self) -> Result<OwnProfile> {
        if self.fail_current_user {
            return Err(LoaderError::Status {
                status: 401,
                message: "Invalid or expired token".into(),
            });
        }
        Ok(OwnProfile {
            id: Uuid::new_v4(),
            email: "me@example.com".into(),
            name: "Me".into(),
            headline: None,
            photo_url: None,
            interests: vec![],
        })
    }
}

fn population(n: usize, interests: &[&str]) -> Vec<FeedProfile> {
    (0..n)
        .map(|i| FeedProfile {
            id: Uuid::new_v4(),
            name: format!("{} {}", interests.join("/"), i),
            bio: None,
            headline: None,
            photo_url: None,
            interests: interests.iter().map(|s| s.to_string()).collect(),
            is_following: false,
        })
        .collect()
}

#[tokio::test]
async fn test_open_loads_user_and_first_page() {
    let mut session = FeedSession::new(FakeApi::new(population(25, &["art"])));
    session.open().await;

    assert_eq!(session.current_user().map(|u| u.name.as_str()), Some("Me"));
    assert_eq!(session.loader().state(), LoaderState::Ready);
    assert_eq!(session.loader().profiles().len(), 10);
    assert!(session.loader().has_more());
    assert_eq!(session.api().requests(), vec![(1, String::new())]);
}

#[tokio::test]
async fn test_scrolling_stops_when_no_more_pages() {
    let mut session = FeedSession::new(FakeApi::new(population(25, &["art"])));
    session.open().await;

    session.last_item_visible().await;
    session.last_item_visible().await;
    assert_eq!(session.loader().profiles().len(), 25);
    assert!(!session.loader().has_more());

    session.last_item_visible().await;
    assert_eq!(session.api().requests().len(), 3);
}

#[tokio::test]
async fn test_filter_change_after_three_pages() {
    let mut users = population(20, &["art"]);
    users.extend(population(12, &["music"]));
    let mut session = FeedSession::new(FakeApi::new(users));
    session.open().await;
    session.last_item_visible().await;
    session.last_item_visible().await;
    assert_eq!(session.loader().profiles().len(), 30);
    assert!(session.loader().has_more());

    session.submit_filter("music").await;

    let requests = session.api().requests();
    assert_eq!(requests.last(), Some(&(1, "music".to_string())));
    let loader = session.loader();
    assert_eq!(loader.interests(), "music");
    assert_eq!(loader.page(), 1);
    assert_eq!(loader.profiles().len(), 10);
    assert!(loader
        .profiles()
        .iter()
        .all(|p| p.interests.contains(&"music".to_string())));
    // 12 music users, 10 per page
    assert!(loader.has_more());

    session.last_item_visible().await;
    assert_eq!(session.loader().profiles().len(), 12);
    assert!(!session.loader().has_more());
}

#[tokio::test]
async fn test_enrichment_degrades_single_failures() {
    let users = population(3, &["art"]);
    let followed = users[0].id;
    let broken = users[1].id;

    let mut api = FakeApi::new(users);
    api.following.lock().unwrap().insert(followed);
    api.following.lock().unwrap().insert(broken);
    api.broken_status.insert(broken);

    let mut session = FeedSession::new(api);
    session.open().await;

    let profiles = session.loader().profiles();
    assert_eq!(profiles.len(), 3);
    assert!(profiles[0].is_following);
    assert!(!profiles[1].is_following);
    assert!(!profiles[2].is_following);
}

#[tokio::test]
async fn test_failed_page_keeps_list_and_next_visibility_retries() {
    let mut session = FeedSession::new(FakeApi::new(population(25, &["art"])));
    session.open().await;

    session.api().fail_fetch.store(true, Ordering::SeqCst);
    session.last_item_visible().await;
    assert_eq!(session.loader().state(), LoaderState::Error);
    assert_eq!(session.loader().profiles().len(), 10);
    assert_eq!(session.loader().notice(), Some("Failed to load profiles"));

    session.api().fail_fetch.store(false, Ordering::SeqCst);
    session.last_item_visible().await;
    assert_eq!(session.loader().state(), LoaderState::Ready);
    assert_eq!(session.loader().profiles().len(), 20);

    let pages: Vec<u32> = session.api().requests().iter().map(|(p, _)| *p).collect();
    assert_eq!(pages, vec![1, 2, 2]);
}

#[tokio::test]
async fn test_follow_toggle_updates_list() {
    let users = population(2, &["art"]);
    let target = users[1].id;
    let mut session = FeedSession::new(FakeApi::new(users));
    session.open().await;

    session.follow(target).await;
    let flagged: Vec<bool> = session.loader().profiles().iter().map(|p| p.is_following).collect();
    assert_eq!(flagged, vec![false, true]);
    assert_eq!(session.loader().notice(), Some("Successfully followed user"));

    session.unfollow(target).await;
    assert!(session.loader().profiles().iter().all(|p| !p.is_following));

    session.follow(Uuid::new_v4()).await;
    assert_eq!(session.loader().notice(), Some("Failed to follow user"));
    assert!(session.loader().profiles().iter().all(|p| !p.is_following));
}

#[test]
fn test_current_user_failure_is_not_fatal() {
    let mut api = FakeApi::new(population(1, &["art"]));
    api.fail_current_user = true;
    let mut session = FeedSession::new(api);

    tokio_test::block_on(session.open());

    assert!(session.current_user().is_none());
    assert_eq!(session.loader().profiles().len(), 1);
    assert_eq!(session.loader().state(), LoaderState::Ready);
}
