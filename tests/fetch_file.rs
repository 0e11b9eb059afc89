use std::fs;

use async_trait::async_trait;
use kariki_core::source::{
    DataSource, FetchError, FetchResult, FileTransport, Resolution, SourceConfig, Transport,
};
use kariki_core::{Document, FailureKind};
use serde::Deserialize;
use serde_json::json;
use tempfile::tempdir;
use url::Url;

fn source_in(dir: &std::path::Path) -> DataSource {
    DataSource::new(SourceConfig::v0().with_base_dir(dir).unwrap()).unwrap()
}

#[tokio::test]
async fn reads_db_json_next_to_base_dir() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("db.json"), r#"{"posts": [], "title": "Kariki"}"#).unwrap();

    let source = source_in(dir.path());
    assert!(source.location().path().ends_with("/db.json"));

    let doc = source.fetch_database().await.ok().expect("document");
    assert_eq!(doc.as_value(), &json!({ "posts": [], "title": "Kariki" }));
}

#[tokio::test]
async fn file_reads_never_build_an_http_client() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("db.json"), "{}").unwrap();

    let source = source_in(dir.path());
    assert!(source.fetch_database().await.is_success());
    assert!(source.fetch_database().await.is_success());
    assert!(!source.transport().http().has_client());
}

#[tokio::test]
async fn missing_file_is_transport_failure() {
    let dir = tempdir().unwrap();
    let source = source_in(dir.path());

    let result = source.fetch_database().await;
    let err = result.failure().unwrap();
    assert_eq!(err.kind(), FailureKind::Transport);
    match err {
        FetchError::Io { source, .. } => {
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
        }
        other => panic!("expected io failure, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_file_is_parse_failure() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("db.json"), "not json at all").unwrap();

    let source = source_in(dir.path());

    assert_eq!(
        source.fetch_database().await.failure().map(FetchError::kind),
        Some(FailureKind::Parse)
    );
    assert!(source.fetch_database_unchecked().await.unwrap_err().is_parse());
}

#[tokio::test]
async fn each_call_sees_current_file_state() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.json");
    let source = source_in(dir.path());

    fs::write(&path, r#"{"version": 1}"#).unwrap();
    let first = source.fetch_database().await.ok().unwrap();

    fs::write(&path, r#"{"version": 2}"#).unwrap();
    let second = source.fetch_database().await.ok().unwrap();

    assert_eq!(first.pointer("/version"), Some(&json!(1)));
    assert_eq!(second.pointer("/version"), Some(&json!(2)));

    fs::remove_file(&path).unwrap();
    assert!(source.fetch_database().await.is_failure());
}

#[tokio::test]
async fn root_absolute_resolves_at_filesystem_root() {
    let dir = tempdir().unwrap();
    let config = SourceConfig::v0()
        .with_base_dir(dir.path())
        .unwrap()
        .with_resolution(Resolution::RootAbsolute);

    let location = config.resolve().unwrap();
    assert_eq!(location.path(), "/db.json");
}

#[test]
fn relative_base_dir_is_rejected() {
    let err = SourceConfig::v0()
        .with_base_dir(std::path::Path::new("relative/dir"))
        .unwrap_err();
    assert!(matches!(err, FetchError::InvalidBase(_)));
}

#[test]
fn default_config_resolves_in_working_directory() {
    let location = SourceConfig::default().resolve().unwrap();
    let expected = Url::from_file_path(std::env::current_dir().unwrap().join("db.json")).unwrap();
    assert_eq!(location, expected);
}

#[test]
fn config_round_trips_through_json_with_defaults() {
    let config: SourceConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, SourceConfig::v0());
    assert_eq!(config, SourceConfig::default());

    let with_policy: SourceConfig = serde_json::from_value(json!({
        "base": "https://example.com/app/",
        "resolution": "root_absolute",
        "timeout_ms": 2500
    }))
    .unwrap();
    assert_eq!(with_policy.resolution, Resolution::RootAbsolute);
    assert_eq!(
        with_policy.resolve().unwrap().as_str(),
        "https://example.com/db.json"
    );
    assert_eq!(with_policy.timeout(), Some(std::time::Duration::from_millis(2500)));
}

#[test]
fn resource_name_cannot_be_redirected() {
    let err = serde_json::from_value::<SourceConfig>(json!({ "resource": "../../etc/passwd" }));
    assert!(err.is_err());

    let dir = tempdir().unwrap();
    for resolution in [Resolution::ModuleRelative, Resolution::RootAbsolute] {
        let location = SourceConfig::v0()
            .with_base_dir(dir.path())
            .unwrap()
            .with_resolution(resolution)
            .resolve()
            .unwrap();
        assert!(location.path().ends_with("/db.json"), "{location}");
    }
}

#[test]
fn oversized_timeout_saturates() {
    let config = SourceConfig::v0().with_timeout(std::time::Duration::MAX);
    assert_eq!(config.timeout_ms, Some(u64::MAX));

    let config = SourceConfig::v0().with_timeout(std::time::Duration::from_secs(3));
    assert_eq!(config.timeout_ms, Some(3000));
}

#[tokio::test]
async fn file_transport_reads_raw_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.json");
    fs::write(&path, b"{}").unwrap();

    let body = FileTransport
        .read(&Url::from_file_path(&path).unwrap())
        .await
        .unwrap();
    assert_eq!(body, b"{}");
}

/// Serves a fixed body without touching the network or disk.
struct MemoryTransport(&'static [u8]);

#[async_trait]
impl Transport for MemoryTransport {
    async fn read(&self, _location: &Url) -> Result<Vec<u8>, FetchError> {
        Ok(self.0.to_vec())
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct Post {
    title: String,
    published: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Db {
    posts: Vec<Post>,
}

#[tokio::test]
async fn custom_transport_and_caller_supplied_schema() {
    let base = Url::parse("memory://kariki/").unwrap();
    let source = DataSource::with_transport(
        SourceConfig::v0().with_base(base),
        MemoryTransport(br#"{"posts":[{"title":"Hello","published":"2024-01-15"}]}"#),
    )
    .unwrap();

    let doc = match source.fetch_database().await {
        FetchResult::Success(doc) => doc,
        FetchResult::Failure(err) => panic!("unexpected failure: {err}"),
    };

    let db: Db = doc.decode().unwrap();
    assert_eq!(
        db.posts,
        vec![Post {
            title: "Hello".into(),
            published: "2024-01-15".into()
        }]
    );

    // Decoding against the wrong shape fails without panicking.
    assert!(doc.decode::<Vec<Post>>().is_err());
}

#[test]
fn fetch_result_converts_to_and_from_result() {
    let ok: FetchResult = Ok::<_, FetchError>(Document::new(json!(true))).into();
    assert!(ok.is_success());
    assert_eq!(ok.document().map(Document::as_value), Some(&json!(true)));
    assert!(ok.into_result().is_ok());

    let failed = FetchResult::Failure(FetchError::UnsupportedScheme("gopher".into()));
    assert!(failed.is_failure());
    assert!(failed.document().is_none());
    assert!(failed.into_result().is_err());
}
