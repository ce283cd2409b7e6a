#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

#[allow(dead_code)]
pub const SEARCH_PATH: &str = "/api/v1/store/google";

fn config_dir() -> &'static Path {
    static CONFIG_DIR: OnceLock<TempDir> = OnceLock::new();
    CONFIG_DIR
        .get_or_init(|| tempfile::tempdir().expect("failed to create config dir for tests"))
        .path()
}

/// A `routefind` command isolated from the user's config and environment.
///
/// The config path points at a file that does not exist, so defaults apply
/// and only the env vars set by the test matter.
#[allow(dead_code)]
pub fn routefind_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("routefind"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("ROUTEFIND_CONFIG", config_dir().join("config.toml"));
    cmd.env_remove("ROUTEFIND_API_KEY");
    cmd.env_remove("SCRAPINGBEE_API_KEY");
    cmd.env_remove("ROUTEFIND_SEARCH_ENDPOINT");
    cmd.env_remove("COLORFGBG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// `routefind_cmd` pointed at `server` with an API key set.
#[allow(dead_code)]
pub fn routefind_against(server: &MockServer) -> Command {
    let mut cmd = routefind_cmd();
    cmd.env("ROUTEFIND_SEARCH_ENDPOINT", format!("{}{SEARCH_PATH}", server.uri()));
    cmd.env("ROUTEFIND_API_KEY", "test-key");
    cmd
}

/// Provider body with one organic result per URL.
#[allow(dead_code)]
pub fn provider_body(urls: &[&str]) -> Value {
    let results: Vec<Value> = urls
        .iter()
        .enumerate()
        .map(|(i, url)| {
            json!({
                "url": url,
                "title": format!("Result {}", i + 1),
                "description": "Snippet",
            })
        })
        .collect();
    json!({ "organic_results": results, "meta_data": { "number_of_results": urls.len() } })
}

/// Mount a search endpoint answering with `status` and `body`.
#[allow(dead_code)]
pub async fn mount_search(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}
