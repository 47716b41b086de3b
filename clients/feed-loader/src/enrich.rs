use futures::future::join_all;
use tracing::warn;

use crate::api::FeedApi;
use crate::models::FeedProfile;

/// Resolve `is_following` for every profile concurrently.
///
/// Lookups are independent: one that fails leaves that profile as
/// "not following" and does not affect the rest. Output order matches input.
pub async fn with_follow_status<A>(api: &A, profiles: Vec<FeedProfile>) -> Vec<FeedProfile>
where
    A: FeedApi + ?Sized,
{
    let lookups = profiles.into_iter().map(|mut profile| async move {
        profile.is_following = match api.follow_status(profile.id).await {
            Ok(following) => following,
            Err(e) => {
                warn!(profile_id = %profile.id, "follow status lookup failed: {}", e);
                false
            }
        };
        profile
    });

    join_all(lookups).await
}
