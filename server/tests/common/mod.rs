//! Shared harness: boots the router on an ephemeral port over temp files.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use landing_content::MemoryCache;
use landing_server::config::{Environment, ServerConfig};
use landing_server::router::create_router;
use landing_server::state::AppState;
use tempfile::TempDir;

pub const ADMIN_TOKEN: &str = "test-token";

pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    pub dir: TempDir,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// Start with a development config tweaked by `configure`.
    pub async fn start_with(configure: impl FnOnce(&mut ServerConfig)) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let mut config = ServerConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            content_path: dir.path().join("landing-page.json"),
            ab_tests_path: dir.path().join("ab-tests.json"),
            environment: Environment::Development,
            admin_tokens: vec![ADMIN_TOKEN.to_string()],
            ..Default::default()
        };
        configure(&mut config);

        let cache = Arc::new(MemoryCache::new(16, Duration::from_secs(60)));
        let state = AppState::new(config, cache);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let app = create_router(state);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            addr,
            client: reqwest::Client::new(),
            dir,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}/api/landing-page{path}", self.addr)
    }

    pub fn content_file(&self) -> PathBuf {
        self.dir.path().join("landing-page.json")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.expect("GET")
    }

    pub async fn admin_get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .bearer_auth(ADMIN_TOKEN)
            .send()
            .await
            .expect("GET")
    }

    pub async fn admin_put(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .bearer_auth(ADMIN_TOKEN)
            .json(&body)
            .send()
            .await
            .expect("PUT")
    }

    pub async fn admin_post(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(ADMIN_TOKEN)
            .json(&body)
            .send()
            .await
            .expect("POST")
    }

    pub async fn admin_delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .bearer_auth(ADMIN_TOKEN)
            .send()
            .await
            .expect("DELETE")
    }
}

pub async fn json(resp: reqwest::Response) -> serde_json::Value {
    resp.json().await.expect("JSON body")
}
