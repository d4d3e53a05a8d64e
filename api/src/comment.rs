use serde::{Deserialize, Serialize};

use crate::geometry::ClientMeta;

/// A user, as referenced by comments and versions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub handle: String,

    /// URL of the user's profile image.
    pub img_url: String,
}

/// A comment or a reply left on a file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,

    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_meta: Option<ClientMeta>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_key: Option<String>,

    /// Set on replies, the id of the comment replied to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// UTC ISO 8601.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// UTC ISO 8601, set once the comment was resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,

    /// The number shown next to top-level comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
}

/// The API has sent this both as a number and as a string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Number(i64),
    String(String),
}

/// Body of `POST files/:key/comments`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateComment {
    pub message: String,
    pub client_meta: ClientMeta,
}

/// Body of `GET files/:key/comments`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentsResponse {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Body of a successful `POST files/:key/comments`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub comment: Comment,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::*;
    use crate::geometry::{FrameOffset, Vector};

    #[test]
    fn decodes_a_reply() {
        let comment: Comment = serde_json::from_value(json!({
            "id": "7",
            "message": "+1",
            "file_key": "abc123",
            "parent_id": "6",
            "user": {"handle": "ada", "img_url": "https://example.com/ada.png"},
            "created_at": "2018-07-03T09:05:44Z",
            "resolved_at": null,
            "client_meta": {"x": 12.5, "y": 40}
        }))
        .expect("must parse");

        assert_eq!(Some("6"), comment.parent_id.as_deref());
        assert_eq!(None, comment.resolved_at);
        assert_eq!(None, comment.order_id);
        assert_eq!("ada", comment.user.expect("must have a user").handle);
        assert_eq!(
            Some(ClientMeta::Vector(Vector { x: 12.5, y: 40.0 })),
            comment.client_meta
        );
    }

    #[rstest]
    #[case::number(json!(3), OrderId::Number(3))]
    #[case::string(json!("3"), OrderId::String("3".to_string()))]
    fn order_id(#[case] value: Value, #[case] expected: OrderId) {
        let comment: Comment =
            serde_json::from_value(json!({"id": "1", "message": "m", "order_id": value}))
                .expect("must parse");

        assert_eq!(Some(expected), comment.order_id);
    }

    #[test]
    fn create_comment_body() {
        let body = CreateComment {
            message: "Looks good".to_string(),
            client_meta: FrameOffset {
                node_id: "1:2".to_string(),
                node_offset: Vector { x: 5.0, y: 6.0 },
            }
            .into(),
        };

        assert_eq!(
            json!({
                "message": "Looks good",
                "client_meta": {"node_id": "1:2", "node_offset": {"x": 5.0, "y": 6.0}}
            }),
            serde_json::to_value(&body).expect("must serialize")
        );
    }
}
