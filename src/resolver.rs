use crate::{error::Result, extract::PostId};

/// Look up the media attached to a post.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MediaResolver: Send + Sync {
    /// Media URLs in the order the platform reports them.
    ///
    /// A post without media is `Ok` with an empty list, not an error.
    async fn resolve(&self, id: PostId) -> Result<Vec<String>>;
}
