use serde::{Deserialize, Serialize};

/// A project of a team.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// A file as listed in a project, without its content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub key: String,

    #[serde(default)]
    pub last_modified: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub thumbnail_url: String,
}

/// Body of `GET teams/:team/projects`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectsResponse {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Body of `GET projects/:project/files`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesResponse {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub files: Vec<FileMeta>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn project_files() {
        let resp: FilesResponse = serde_json::from_value(json!({
            "name": "Marketing",
            "files": [
                {
                    "key": "abc123",
                    "name": "Landing page",
                    "thumbnail_url": "https://example.com/thumb.png",
                    "last_modified": "2018-07-03T09:05:44Z"
                },
                {"key": "def456"}
            ]
        }))
        .expect("must parse");

        assert_eq!(Some("Marketing"), resp.name.as_deref());
        assert_eq!(
            FileMeta {
                key: "abc123".to_string(),
                last_modified: "2018-07-03T09:05:44Z".to_string(),
                name: "Landing page".to_string(),
                thumbnail_url: "https://example.com/thumb.png".to_string(),
            },
            resp.files[0]
        );
        assert_eq!("", resp.files[1].name);
    }

    #[test]
    fn team_projects() {
        let resp: ProjectsResponse =
            serde_json::from_value(json!({"projects": [{"id": "42", "name": "Design system"}]}))
                .expect("must parse");

        assert_eq!(None, resp.name);
        assert_eq!(
            vec![Project {
                id: "42".to_string(),
                name: "Design system".to_string()
            }],
            resp.projects
        );
    }
}
