// tests/common/mod.rs

use std::sync::Arc;

use question_pdf_api::{config::Config, routes, services::SimulatedEngine, state::AppState};
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub data_dir: TempDir,
}

/// Helper function to spawn the app on a random port for testing.
/// Each app gets its own temporary data directory and an instant simulated engine.
#[allow(dead_code)]
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|config| config).await
}

pub async fn spawn_app_with(configure: impl FnOnce(Config) -> Config) -> TestApp {
    let data_dir = tempfile::tempdir().expect("Failed to create temp data dir");
    let config = configure(Config::default().with_data_dir(data_dir.path()));

    let state = AppState::from_config(config)
        .await
        .expect("Failed to build app state")
        .with_engine(Arc::new(SimulatedEngine::instant()));

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { address, data_dir }
}

#[allow(dead_code)]
pub fn pdf_form(filename: &str, contents: &[u8]) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(contents.to_vec())
        .file_name(filename.to_string())
        .mime_str("application/pdf")
        .unwrap();
    reqwest::multipart::Form::new().part("file", part)
}
