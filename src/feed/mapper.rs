use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use super::item::FeedItem;
use super::remote::LoadError;

const OK_200: u16 = 200;

/// Wire-format variant of [`FeedItem`], decoded straight from the endpoint
/// JSON. Kept separate from the domain type so the API contract can evolve
/// without touching callers (the wire field is `image`, the domain field is
/// `url`).
#[derive(Debug, Deserialize)]
pub(crate) struct RemoteFeedItem {
    pub id: Uuid,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub image: Url,
}

impl From<RemoteFeedItem> for FeedItem {
    fn from(remote: RemoteFeedItem) -> Self {
        FeedItem::new(remote.id, remote.description, remote.location, remote.image)
    }
}

#[derive(Debug, Deserialize)]
struct Root {
    items: Vec<RemoteFeedItem>,
}

/// Map a raw HTTP response onto the list of remote feed items.
///
/// Valid only for status 200 with a body of the shape
/// `{"items":[{id, description?, location?, image}]}` where every `id`
/// parses as a UUID and every `image` as a URL. Everything else is
/// [`LoadError::InvalidData`]. Pure and deterministic.
pub(crate) fn map(body: &[u8], status: u16) -> Result<Vec<RemoteFeedItem>, LoadError> {
    if status != OK_200 {
        return Err(LoadError::InvalidData);
    }

    let root: Root = serde_json::from_slice(body).map_err(|_| LoadError::InvalidData)?;
    Ok(root.items)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn items_json(items: &[serde_json::Value]) -> Vec<u8> {
        serde_json::to_vec(&json!({ "items": items })).unwrap()
    }

    #[test]
    fn map_rejects_non_200_status_codes() {
        let body = items_json(&[]);

        for status in [199, 201, 300, 400, 500] {
            let result = map(&body, status);
            assert!(
                matches!(result, Err(LoadError::InvalidData)),
                "expected invalid data for status {status}"
            );
        }
    }

    #[test]
    fn map_rejects_unparseable_body_on_200() {
        let result = map(b"invalid json", 200);
        assert!(matches!(result, Err(LoadError::InvalidData)));
    }

    #[test]
    fn map_rejects_wrong_shape_on_200() {
        let body = serde_json::to_vec(&json!({ "entries": [] })).unwrap();
        let result = map(&body, 200);
        assert!(matches!(result, Err(LoadError::InvalidData)));
    }

    #[test]
    fn map_rejects_item_with_invalid_id() {
        let body = items_json(&[json!({
            "id": "not-a-uuid",
            "image": "http://img.example.com/1.png",
        })]);
        let result = map(&body, 200);
        assert!(matches!(result, Err(LoadError::InvalidData)));
    }

    #[test]
    fn map_rejects_item_with_missing_image() {
        let body = items_json(&[json!({
            "id": "2c8d4a11-32f1-4f7f-8b5d-3f4d5dc1a001",
        })]);
        let result = map(&body, 200);
        assert!(matches!(result, Err(LoadError::InvalidData)));
    }

    #[test]
    fn map_delivers_no_items_on_200_with_empty_list() {
        let items = map(&items_json(&[]), 200).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn map_delivers_items_on_200_with_json_items() {
        let body = items_json(&[
            json!({
                "id": "2c8d4a11-32f1-4f7f-8b5d-3f4d5dc1a001",
                "image": "http://img.example.com/1.png",
            }),
            json!({
                "id": "7f1b9c02-aa40-4e54-9c5e-0d9a6f2b4c22",
                "description": "a description",
                "location": "a location",
                "image": "http://img.example.com/2.png",
            }),
        ]);

        let items: Vec<FeedItem> = map(&body, 200)
            .unwrap()
            .into_iter()
            .map(FeedItem::from)
            .collect();

        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].id.to_string(),
            "2c8d4a11-32f1-4f7f-8b5d-3f4d5dc1a001"
        );
        assert_eq!(items[0].description, None);
        assert_eq!(items[0].location, None);
        assert_eq!(items[0].url.as_str(), "http://img.example.com/1.png");
        assert_eq!(items[1].description.as_deref(), Some("a description"));
        assert_eq!(items[1].location.as_deref(), Some("a location"));
    }

    #[test]
    fn map_treats_explicit_null_optionals_as_absent() {
        let body = items_json(&[json!({
            "id": "2c8d4a11-32f1-4f7f-8b5d-3f4d5dc1a001",
            "description": null,
            "location": null,
            "image": "http://img.example.com/1.png",
        })]);

        let items = map(&body, 200).unwrap();
        assert_eq!(items[0].description, None);
        assert_eq!(items[0].location, None);
    }
}
