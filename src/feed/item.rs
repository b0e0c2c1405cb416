use url::Url;
use uuid::Uuid;

/// A single feed entry as seen by application code.
///
/// Immutable after construction; equality is structural. `description` and
/// `location` are optional, `url` points at the item's image resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

impl FeedItem {
    pub fn new(
        id: Uuid,
        description: Option<String>,
        location: Option<String>,
        url: Url,
    ) -> Self {
        Self {
            id,
            description,
            location,
            url,
        }
    }
}
