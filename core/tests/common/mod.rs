//! Shared setup for tests that talk to a live mock server.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use posts_core::{ClientConfig, PostContent, PostsApi};
use tracing_subscriber::EnvFilter;

/// Route client logs to the test writer. Safe to call from every test.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("posts_core=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

/// Serve `app` on a random local port from a background thread and return
/// its base URL. The listener is bound before returning, so requests made
/// right away queue until the runtime starts accepting.
pub fn spawn_app(app: axum::Router) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, app).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// `PostsApi` against a fresh mock server holding `seed` posts.
pub fn posts_api(seed: u64) -> PostsApi {
    init_tracing();
    let base_url = spawn_app(mock_server::app_with_posts(mock_server::seed_posts(seed)));
    PostsApi::with_config(ClientConfig::new(&base_url))
}

/// Parametrized post payloads, keyed by test case name.
pub struct TestData(HashMap<String, Vec<PostContent>>);

impl TestData {
    pub fn load() -> Self {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/basic_tests.json");
        let raw = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("reading {}: {e}", path.display()));
        Self(serde_json::from_str(&raw).unwrap())
    }

    pub fn cases(&self, name: &str) -> &[PostContent] {
        self.0
            .get(name)
            .unwrap_or_else(|| panic!("no test data named {name}"))
    }
}
