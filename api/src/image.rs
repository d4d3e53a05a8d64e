use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `GET images/:key`: one rendered image URL per requested node.
///
/// A node that could not be rendered maps to `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    #[serde(default)]
    pub images: BTreeMap<String, Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl Image {
    /// Rendered URLs, skipping nodes that failed to render.
    pub fn urls(&self) -> impl Iterator<Item = (&str, &str)> {
        self.images
            .iter()
            .filter_map(|(id, url)| Some((id.as_str(), url.as_deref()?)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn failed_renders_are_null() {
        let image: Image = serde_json::from_value(json!({
            "err": null,
            "images": {
                "1:2": "https://example.com/1-2.png",
                "1:3": null
            }
        }))
        .expect("must parse");

        assert_eq!(None, image.err);
        assert_eq!(2, image.images.len());
        assert_eq!(
            vec![("1:2", "https://example.com/1-2.png")],
            image.urls().collect::<Vec<_>>()
        );
    }
}
