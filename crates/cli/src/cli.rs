// crates/cli/src/cli.rs

use anyhow::Context;
use clap::{builder::ValueHint, Args, Parser, Subcommand};
use domain::{InMemoryRepository, Settings};
use forms::DefaultFormFactory;
use serde_json::{json, Value as Json};
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use tracing::{debug, error, info};
use view::{
    ParamValue, RedirectOnPublishDispatcher, RequestParameters, Route, ViewPipeline, ViewRequest,
    ViewResult,
};

pub type Result<T> = anyhow::Result<T>;

/// Build a content form view against a fixture repository and print it.
#[tracing::instrument(skip_all)]
pub fn start() -> ExitCode {
    let cli = Cli::parse();

    let (route, args) = match cli.command {
        Commands::Create(args) => (Route::ContentCreate, args),
        Commands::Edit(args) => (Route::ContentEdit, args),
    };

    match run(route, args) {
        Ok(output) => {
            println!("{output}");
            info!("view printed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to build view: {:#}", e);
            let status = e
                .downcast_ref::<view::Error>()
                .map(|v| v.to_status().as_u16())
                .unwrap_or(500);
            println!("{}", json!({ "error": format!("{e:#}"), "status": status }));
            ExitCode::FAILURE
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "repoforms", version, about = "Content form view builder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the content create view
    Create(RequestArgs),
    /// Build the content draft edit view
    Edit(RequestArgs),
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Repository fixture (TOML)
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub fixture: PathBuf,

    /// Settings file (or set REPOFORMS_SETTINGS)
    #[arg(long, value_name = "FILE", env = "REPOFORMS_SETTINGS", value_hint = ValueHint::FilePath)]
    pub settings: Option<PathBuf>,

    /// Request attribute, repeatable: `--param contentId=52`
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, ParamValue)>,

    /// Submitted form input as JSON
    #[arg(long, value_name = "JSON")]
    pub input: Option<String>,
}

/// `KEY=VALUE`. `{...}` is read as JSON, anything else stays a string;
/// integer attributes accept numeric strings, identifiers keep their digits.
fn parse_param(s: &str) -> std::result::Result<(String, ParamValue), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }

    let value = if value.trim_start().starts_with('{') {
        let json: Json =
            serde_json::from_str(value).map_err(|e| format!("invalid JSON for '{key}': {e}"))?;
        ParamValue::Json(json)
    } else {
        ParamValue::Str(value.to_string())
    };

    Ok((key.to_string(), value))
}

#[tracing::instrument(skip_all, fields(route = ?route))]
fn run(route: Route, args: RequestArgs) -> Result<String> {
    let repository = InMemoryRepository::from_path(&args.fixture)
        .with_context(|| format!("loading fixture {}", args.fixture.display()))?;

    let settings = match &args.settings {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("loading settings {}", path.display()))?,
        None => Settings::default(),
    };

    let input = match &args.input {
        Some(raw) => serde_json::from_str(raw).context("parsing --input")?,
        None => Json::Null,
    };

    let attributes: RequestParameters = args.params.into_iter().collect();
    debug!(count = attributes.len(), "request attributes");

    let dispatcher = RedirectOnPublishDispatcher::new(settings.actions.publish_redirect.clone());
    let pipeline = ViewPipeline::new(
        Arc::new(repository),
        Arc::new(DefaultFormFactory::default()),
        Arc::new(dispatcher),
        &settings,
    );

    let result: ViewResult = pipeline.build(route, &ViewRequest::new(attributes, input))?;

    Ok(serde_json::to_string_pretty(&result.to_json())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE: &str = r#"
[[languages]]
id = 2
language_code = "eng-GB"
name = "English"

[[locations]]
id = 2
content_id = 1
path_string = "/1/2/"

[[content_types]]
id = 16
identifier = "article"
main_language_code = "eng-GB"

[[content_types]]
id = 17
identifier = "123"
main_language_code = "eng-GB"
"#;

    fn fixture_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        file
    }

    fn args(fixture: PathBuf, params: &[&str], input: Option<&str>) -> RequestArgs {
        RequestArgs {
            fixture,
            settings: None,
            params: params.iter().map(|p| parse_param(p).unwrap()).collect(),
            input: input.map(str::to_string),
        }
    }

    #[test]
    fn params_are_strings_usable_as_integers() {
        let (k, v) = parse_param("parentLocationId=2").unwrap();
        assert_eq!(k, "parentLocationId");
        assert_eq!(v.as_int(), Some(2));

        let (_, v) = parse_param("contentTypeIdentifier=123").unwrap();
        assert_eq!(v.as_str(), Some("123"));

        let (_, v) = parse_param("languageCode=eng-GB").unwrap();
        assert_eq!(v.as_str(), Some("eng-GB"));

        let (_, v) = parse_param("title=a=b").unwrap();
        assert_eq!(v.as_str(), Some("a=b"));

        let (_, v) = parse_param(r#"params={"sidebar":true}"#).unwrap();
        assert!(matches!(v, ParamValue::Json(Json::Object(_))));
    }

    #[test]
    fn malformed_params_are_rejected() {
        assert!(parse_param("languageCode").is_err());
        assert!(parse_param("=x").is_err());
        assert!(parse_param("params={oops").is_err());
    }

    #[test]
    fn cli_parses_repeated_params() {
        let cli = Cli::try_parse_from([
            "repoforms",
            "create",
            "--fixture",
            "repo.toml",
            "--param",
            "languageCode=eng-GB",
            "--param",
            "parentLocationId=2",
        ])
        .unwrap();
        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.params.len(), 2);
        assert!(args.input.is_none());
    }

    #[test]
    fn create_prints_view_json() {
        let file = fixture_file();
        let out = run(
            Route::ContentCreate,
            args(
                file.path().to_path_buf(),
                &[
                    "languageCode=eng-GB",
                    "parentLocationId=2",
                    "contentTypeIdentifier=article",
                ],
                None,
            ),
        )
        .unwrap();
        let value: Json = serde_json::from_str(&out).unwrap();
        assert_eq!(value["kind"], json!("content_create"));
        assert_eq!(value["template"], json!("content/create.hbs"));
    }

    #[test]
    fn publish_prints_redirect() {
        let file = fixture_file();
        let out = run(
            Route::ContentCreate,
            args(
                file.path().to_path_buf(),
                &[
                    "languageCode=eng-GB",
                    "parentLocationId=2",
                    "contentTypeIdentifier=article",
                ],
                Some(r#"{"_action":"publish"}"#),
            ),
        )
        .unwrap();
        let value: Json = serde_json::from_str(&out).unwrap();
        assert_eq!(value["kind"], json!("success"));
        assert_eq!(value["response"]["headers"]["location"], json!("/view/content/2"));
    }

    #[test]
    fn view_errors_keep_their_type() {
        let file = fixture_file();
        let err = run(
            Route::ContentCreate,
            args(file.path().to_path_buf(), &["languageCode=eng-GB"], None),
        )
        .unwrap_err();
        let status = err.downcast_ref::<view::Error>().map(|e| e.to_status().as_u16());
        assert_eq!(status, Some(400));
    }

    #[test]
    fn numeric_content_type_identifier_resolves() {
        let file = fixture_file();
        let out = run(
            Route::ContentCreate,
            args(
                file.path().to_path_buf(),
                &[
                    "languageCode=eng-GB",
                    "parentLocationId=2",
                    "contentTypeIdentifier=123",
                ],
                None,
            ),
        )
        .unwrap();
        let value: Json = serde_json::from_str(&out).unwrap();
        assert_eq!(value["parameters"]["contentType"]["id"], json!(17));
    }
}
