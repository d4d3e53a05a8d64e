use bytes::Bytes;
use figma_api::{
    comment::{Comment, CommentResponse, CommentsResponse, CreateComment},
    image::Image,
    project::{FileMeta, FilesResponse, Project, ProjectsResponse},
    version::{Version, VersionsResponse},
    Decoder, File,
};
use reqwest::{header::HeaderValue, StatusCode};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{Error, FileOptions, ImageOptions};

pub const DEFAULT_BASE_URL: &str = "https://api.figma.com/v1/";

const TOKEN_HEADER: &str = "X-Figma-Token";

/// A client for the Figma REST API, authenticated with a personal access
/// token.
///
/// Requests are sent one at a time as they're called, there is no caching,
/// retrying or pagination. Cloning is cheap and shares the connection pool.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    token: HeaderValue,
    http_client: ClientWithMiddleware,
    decoder: Decoder,
}

pub struct ClientBuilder {
    token: String,
    base_url: Option<Url>,
    http_client: Option<reqwest::Client>,
    decoder: Decoder,
}

impl ClientBuilder {
    /// Talk to a different API root, a test server for example.
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Use a preconfigured [reqwest::Client], for timeouts or proxies.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Decode file bodies with this decoder, for example one with a depth
    /// limit.
    pub fn decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let mut base_url = match self.base_url {
            Some(base_url) => base_url,
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| Error::InvalidBaseUrl(e.to_string()))?,
        };
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        // Endpoints are appended as path segments, so the base has to be a
        // directory.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let mut token = HeaderValue::from_str(&self.token)?;
        token.set_sensitive(true);

        let http_client =
            reqwest_middleware::ClientBuilder::new(self.http_client.unwrap_or_default())
                .with(figma_tracing::propagate::reqwest::tracing_middleware())
                .build();

        Ok(Client {
            base_url,
            token,
            http_client,
            decoder: self.decoder,
        })
    }
}

impl Client {
    /// A client talking to [DEFAULT_BASE_URL].
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        Self::builder(token).build()
    }

    pub fn builder(token: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            token: token.into(),
            base_url: None,
            http_client: None,
            decoder: Decoder::default(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[instrument(skip_all, err, fields(team.id = team_id))]
    pub async fn get_projects_for_team(&self, team_id: &str) -> Result<Vec<Project>, Error> {
        let url = self.url(&["teams", team_id, "projects"], Vec::new());
        let resp: ProjectsResponse = self.get_json(url).await?;
        Ok(resp.projects)
    }

    #[instrument(skip_all, err, fields(project.id = project_id))]
    pub async fn get_files_for_project(&self, project_id: &str) -> Result<Vec<FileMeta>, Error> {
        let url = self.url(&["projects", project_id, "files"], Vec::new());
        let resp: FilesResponse = self.get_json(url).await?;
        Ok(resp.files)
    }

    /// Fetches and decodes the current version of a file.
    #[instrument(skip_all, err, fields(file.key = file_key))]
    pub async fn get_file(&self, file_key: &str) -> Result<File, Error> {
        self.get_file_with_options(file_key, &FileOptions::default())
            .await
    }

    #[instrument(skip_all, err, fields(file.key = file_key, file.version = ?options.version))]
    pub async fn get_file_with_options(
        &self,
        file_key: &str,
        options: &FileOptions,
    ) -> Result<File, Error> {
        let url = self.url(&["files", file_key], options.query_pairs());
        let body = self.get(url.clone()).await?;

        let file = self
            .decoder
            .decode_file(&body)
            .map_err(|source| Error::Decode { url, source })?;
        debug!(file.name = %file.name, "decoded file");

        Ok(file)
    }

    /// Returns the undecoded body of a `GET files/:key` request.
    #[instrument(skip_all, err, fields(file.key = file_key))]
    pub async fn get_file_bytes(
        &self,
        file_key: &str,
        options: &FileOptions,
    ) -> Result<Bytes, Error> {
        let url = self.url(&["files", file_key], options.query_pairs());
        self.get(url).await
    }

    /// Renders nodes of a file, returning one image URL per node.
    #[instrument(skip_all, err, fields(file.key = file_key, image.ids = options.ids.len()))]
    pub async fn get_image(&self, file_key: &str, options: &ImageOptions) -> Result<Image, Error> {
        let url = self.url(&["images", file_key], options.query_pairs());
        let image: Image = self.get_json(url).await?;

        if let Some(err) = &image.err {
            warn!(err = %err, "some images failed to render");
        }

        Ok(image)
    }

    #[instrument(skip_all, err, fields(file.key = file_key))]
    pub async fn get_file_versions(&self, file_key: &str) -> Result<Vec<Version>, Error> {
        let url = self.url(&["files", file_key, "versions"], Vec::new());
        let resp: VersionsResponse = self.get_json(url).await?;
        Ok(resp.versions)
    }

    #[instrument(skip_all, err, fields(file.key = file_key))]
    pub async fn get_file_comments(&self, file_key: &str) -> Result<Vec<Comment>, Error> {
        let url = self.url(&["files", file_key, "comments"], Vec::new());
        let resp: CommentsResponse = self.get_json(url).await?;
        Ok(resp.comments)
    }

    /// Posts a comment and returns it as stored by the API.
    #[instrument(skip_all, err, fields(file.key = file_key))]
    pub async fn create_file_comment(
        &self,
        file_key: &str,
        comment: &CreateComment,
    ) -> Result<Comment, Error> {
        let url = self.url(&["files", file_key, "comments"], Vec::new());
        let req = self.http_client.post(url.clone()).json(comment);
        let body = self.send(req, &url).await?;

        let resp: CommentResponse = decode_json(&url, &body)?;
        Ok(resp.comment)
    }

    /// Builds the URL of an endpoint. Each segment is percent-encoded on its
    /// own, so ids can't break out of their path segment.
    fn url(&self, segments: &[&str], query: Vec<(&'static str, String)>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    async fn get(&self, url: Url) -> Result<Bytes, Error> {
        let req = self.http_client.get(url.clone());
        self.send(req, &url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let body = self.get(url.clone()).await?;
        decode_json(&url, &body)
    }

    /// Sends a request with the token attached and returns the body of a 200
    /// response. Every other status is an [Error::Api].
    async fn send(&self, req: RequestBuilder, url: &Url) -> Result<Bytes, Error> {
        let resp = req.header(TOKEN_HEADER, self.token.clone()).send().await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        if status != StatusCode::OK {
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!(url = %url, status = %status, "request failed");
            return Err(Error::Api {
                url: url.clone(),
                status,
                body,
            });
        }

        debug!(url = %url, body.len = body.len(), "received response");
        Ok(body)
    }
}

fn decode_json<T: DeserializeOwned>(url: &Url, body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|source| {
        warn!(url = %url, err = %source, "unable to decode response");
        Error::Json {
            url: url.clone(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn client(base_url: &str) -> Client {
        Client::builder("token")
            .base_url(Url::parse(base_url).expect("valid url"))
            .build()
            .expect("must build")
    }

    #[rstest]
    #[case::default(DEFAULT_BASE_URL, &["files", "abc"], "https://api.figma.com/v1/files/abc")]
    #[case::no_trailing_slash("http://127.0.0.1:1234/v1", &["files", "abc"], "http://127.0.0.1:1234/v1/files/abc")]
    #[case::root("http://127.0.0.1:1234/", &["teams", "1", "projects"], "http://127.0.0.1:1234/teams/1/projects")]
    #[case::escaped(DEFAULT_BASE_URL, &["files", "a/b?c"], "https://api.figma.com/v1/files/a%2Fb%3Fc")]
    fn endpoint_urls(#[case] base_url: &str, #[case] segments: &[&str], #[case] expected: &str) {
        assert_eq!(expected, client(base_url).url(segments, Vec::new()).as_str());
    }

    #[test]
    fn query_is_appended() {
        let url = client(DEFAULT_BASE_URL).url(
            &["files", "abc"],
            FileOptions {
                version: Some("7".to_string()),
                geometry_paths: true,
            }
            .query_pairs(),
        );

        assert_eq!(
            "https://api.figma.com/v1/files/abc?version=7&geometry=paths",
            url.as_str()
        );
    }

    #[test]
    fn rejects_bad_base_url() {
        let err = Client::builder("token")
            .base_url(Url::parse("mailto:someone@example.com").expect("valid url"))
            .build()
            .err()
            .expect("must fail");

        assert!(matches!(err, Error::InvalidBaseUrl(_)));
    }

    #[test]
    fn rejects_bad_token() {
        let err = Client::new("line\nbreak").err().expect("must fail");
        assert!(matches!(err, Error::InvalidToken(_)));
    }
}
