use serde::{Deserialize, Serialize};

use crate::comment::User;

/// A saved version of a file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub id: String,

    /// UTC ISO 8601.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Body of `GET files/:key/versions`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionsResponse {
    #[serde(default)]
    pub versions: Vec<Version>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn autosaves_have_no_label() {
        let resp: VersionsResponse = serde_json::from_value(json!({
            "versions": [
                {
                    "id": "2",
                    "created_at": "2018-07-04T10:00:00Z",
                    "label": "Handoff",
                    "description": "Ready for review",
                    "user": {"handle": "ada", "img_url": ""}
                },
                {"id": "1", "created_at": "2018-07-03T09:05:44Z", "label": null, "description": null}
            ]
        }))
        .expect("must parse");

        assert_eq!(
            vec![Some("Handoff"), None],
            resp.versions
                .iter()
                .map(|v| v.label.as_deref())
                .collect::<Vec<_>>()
        );
        assert_eq!(None, resp.versions[1].user);
    }
}
