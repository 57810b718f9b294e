use movierama::{
    build_router,
    config::Config,
    models::users::User,
    services::jwt::generate_token_pair,
    AppState,
};
use reqwest::{Client, RequestBuilder, redirect::Policy};
use tokio::net::TcpListener;

use crate::common::database::TestDb;

/// HTTP test application wrapper
///
/// Manages an Axum server running on a random port for HTTP testing.
/// Each test gets its own server and its own in-memory database, so tests
/// run in parallel without sharing data.
pub struct TestApp {
    /// Server base URL (e.g., "http://127.0.0.1:54321")
    pub address: String,
    /// HTTP client for making requests
    pub client: Client,
    /// Application config
    pub config: Config,
    /// Database behind the server, for seeding and assertions
    pub db: TestDb,
}

impl TestApp {
    /// Create a new HTTP test app with server on random port
    ///
    /// # How it works:
    /// 1. Opens a fresh in-memory database with migrations applied
    /// 2. Builds the full application router
    /// 3. Binds to port 0 (OS assigns random available port)
    /// 4. Starts server in background task
    /// 5. Creates reqwest client configured for testing
    ///
    /// # Example
    /// ```rust
    /// #[tokio::test]
    /// async fn test_health_endpoint() {
    ///     let app = TestApp::new().await;
    ///
    ///     let response = app.client
    ///         .get(&app.url("/api/health"))
    ///         .send()
    ///         .await
    ///         .unwrap();
    ///
    ///     assert_eq!(response.status(), 200);
    /// }
    /// ```
    pub async fn new() -> Self {
        let db = TestDb::new().await;

        let mut config = Config::default();
        config.jwt.secret = "test-secret-key-for-testing".to_string().into();

        let app = build_router(AppState::new(db.pool.clone(), config.clone()));

        // Bind to random port (port 0 tells OS to assign available port)
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        // Start server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            address,
            client,
            config,
            db,
        }
    }

    /// Get the full URL for an API endpoint
    ///
    /// # Example
    /// ```rust
    /// let url = app.url("/api/movies");
    /// // Returns: "http://127.0.0.1:54321/api/movies"
    /// ```
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Access token for `user`, signed with this app's secret.
    pub fn access_token(&self, user: &User) -> String {
        generate_token_pair(user.id, &self.config.jwt)
            .expect("Failed to generate token")
            .access
    }

    /// Refresh token for `user`, signed with this app's secret.
    pub fn refresh_token(&self, user: &User) -> String {
        generate_token_pair(user.id, &self.config.jwt)
            .expect("Failed to generate token")
            .refresh
    }

    /// Starts a request to `path` authenticated as `user`.
    pub fn authed(&self, method: reqwest::Method, path: &str, user: &User) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(self.access_token(user))
    }
}
