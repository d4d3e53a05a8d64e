use std::io::Write;

use figma_api::{comment::CreateComment, geometry, Decoder};
use figma_client::{Client, FileOptions, ImageOptions};
use tracing::{debug, info};

pub mod args;
mod errors;
mod render;

use args::{Args, Command};
pub use errors::Error;

impl Args {
    pub fn decoder(&self) -> Decoder {
        match self.max_depth {
            Some(max_depth) => Decoder::with_max_depth(max_depth),
            None => Decoder::default(),
        }
    }

    fn client(&self) -> Result<Client, Error> {
        let token = self.token.as_deref().ok_or(Error::MissingToken)?;
        Ok(Client::builder(token)
            .base_url(self.base_url.clone())
            .decoder(self.decoder())
            .build()?)
    }
}

/// Runs the given command, writing its output to `out`.
pub async fn run<W: Write>(args: Args, out: &mut W) -> Result<(), Error> {
    let decoder = args.decoder();
    // Only commands that talk to the API need the token.
    let client = args.client();

    match args.command {
        Command::Decode { path, nodes } => {
            let buf = std::fs::read(&path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), len = buf.len(), "read input");

            if nodes {
                let nodes = decoder
                    .decode_node_sequence(&buf)
                    .map_err(|source| Error::Decode { path, source })?;
                render::tree(out, &nodes)?;
            } else {
                let file = decoder
                    .decode_file(&buf)
                    .map_err(|source| Error::Decode { path, source })?;
                render::file(out, &file)?;
            }
        }
        Command::Projects { team_id } => {
            let projects = client?.get_projects_for_team(&team_id).await?;
            render::rows(out, projects.iter().map(|p| [&p.id, &p.name]))?;
        }
        Command::Files { project_id } => {
            let files = client?.get_files_for_project(&project_id).await?;
            render::rows(
                out,
                files.iter().map(|f| [&f.key, &f.name, &f.last_modified]),
            )?;
        }
        Command::File {
            key,
            version,
            geometry_paths,
            raw,
        } => {
            let options = FileOptions {
                version,
                geometry_paths,
            };
            if raw {
                let body = client?.get_file_bytes(&key, &options).await?;
                out.write_all(&body)?;
            } else {
                let file = client?.get_file_with_options(&key, &options).await?;
                render::file(out, &file)?;
            }
        }
        Command::Images {
            key,
            ids,
            scale,
            format,
            svg_include_id,
            version,
        } => {
            let options = ImageOptions {
                scale,
                format: format.map(Into::into),
                svg_include_id,
                version,
                ..ImageOptions::new(ids)
            };
            let image = client?.get_image(&key, &options).await?;
            render::rows(
                out,
                image.images.iter().map(|(id, url)| {
                    [id.as_str(), url.as_deref().unwrap_or("(failed)")]
                }),
            )?;
        }
        Command::Versions { key } => {
            let versions = client?.get_file_versions(&key).await?;
            serde_json::to_writer_pretty(&mut *out, &versions)?;
            writeln!(out)?;
        }
        Command::Comments { key } => {
            let comments = client?.get_file_comments(&key).await?;
            serde_json::to_writer_pretty(&mut *out, &comments)?;
            writeln!(out)?;
        }
        Command::Comment {
            key,
            message,
            node_id,
            x,
            y,
        } => {
            let offset = geometry::Vector { x, y };
            let client_meta = match node_id {
                Some(node_id) => geometry::FrameOffset {
                    node_id,
                    node_offset: offset,
                }
                .into(),
                None => offset.into(),
            };
            let comment = client?
                .create_file_comment(
                    &key,
                    &CreateComment {
                        message,
                        client_meta,
                    },
                )
                .await?;
            info!(comment.id = %comment.id, "posted comment");
            writeln!(out, "{}", comment.id)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn testdata(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../api/testdata")
            .join(name)
    }

    async fn run_args(args: &[&str]) -> Result<String, Error> {
        let args = Args::try_parse_from(std::iter::once("figma").chain(args.iter().copied()))
            .expect("valid arguments");
        let mut out = Vec::new();
        run(args, &mut out).await?;
        Ok(String::from_utf8(out).expect("must be utf-8"))
    }

    #[tokio::test]
    async fn decode_file_offline() {
        let path = testdata("file.json");
        let out = run_args(&["decode", path.to_str().expect("utf-8 path")])
            .await
            .expect("must succeed");

        assert!(out.contains("\n    RECTANGLE 72:2 \"Hero\"\n"), "{out}");
    }

    #[tokio::test]
    async fn decode_nodes_offline() {
        let path = testdata("nodes.json");
        let out = run_args(&["decode", "--nodes", path.to_str().expect("utf-8 path")])
            .await
            .expect("must succeed");

        assert_eq!(
            "FRAME 1:1 \"Header\" (hidden)",
            out.lines().next().expect("must have output")
        );
        assert!(out.contains("\nSECTION 9:1 \"Section\"\n"), "{out}");
    }

    #[tokio::test]
    async fn decode_with_max_depth() {
        let path = testdata("file.json");
        let err = run_args(&["--max-depth", "1", "decode", path.to_str().expect("utf-8 path")])
            .await
            .expect_err("must fail");

        assert!(
            matches!(
                err,
                Error::Decode {
                    source: figma_api::DecodeError::TooDeep { max_depth: 1 },
                    ..
                }
            ),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn decode_missing_file() {
        let err = run_args(&["decode", "/nonexistent/file.json"])
            .await
            .expect_err("must fail");

        assert!(matches!(err, Error::Read { .. }), "unexpected error: {err}");
    }

    #[rstest]
    #[case::projects(&["projects", "1"])]
    #[case::file(&["file", "abc"])]
    #[tokio::test]
    async fn remote_commands_need_a_token(#[case] args: &[&str]) {
        // FIGMA_TOKEN from the environment would be picked up otherwise.
        let mut parsed = Args::try_parse_from(std::iter::once("figma").chain(args.iter().copied()))
            .expect("valid arguments");
        parsed.token = None;

        let err = run(parsed, &mut Vec::new()).await.expect_err("must fail");
        assert!(matches!(err, Error::MissingToken), "unexpected error: {err}");
    }

    #[test]
    fn parses_image_args() {
        let args = Args::try_parse_from([
            "figma", "--token", "t", "images", "abc", "1:2", "1:3", "--format", "svg", "--scale", "2",
        ])
        .expect("valid arguments");

        let Command::Images {
            ids, format, scale, ..
        } = args.command
        else {
            panic!("expected the images command");
        };
        assert_eq!(vec!["1:2", "1:3"], ids);
        assert_eq!(Some(args::Format::Svg), format);
        assert_eq!(Some(2.0), scale);
    }
}
