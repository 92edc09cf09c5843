//! Common test utilities.

use tokio::net::TcpListener;

use studio_rs::{Config, StudioServer};

/// Test server wrapper.
pub struct TestServer {
    pub base_url: String,
    pub admin_email: String,
    pub admin_key: String,
}

impl TestServer {
    /// Creates and starts a test server on a random port.
    pub async fn start() -> Self {
        // Find an available port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = Config {
            host: "127.0.0.1".to_string(),
            port,
            ..Config::default()
        };

        let admin_email = config.accounts[0].email.clone();
        let admin_key = config.accounts[0].key.clone();
        let base_url = format!("http://127.0.0.1:{}", port);

        let server = StudioServer::new(config);

        // Start server in background
        tokio::spawn(async move {
            server.run().await.unwrap();
        });

        // Wait for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            base_url,
            admin_email,
            admin_key,
        }
    }

    /// Returns the full URL for a path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Signs in as the bootstrap admin and returns a bearer token.
    pub async fn admin_token(&self, client: &reqwest::Client) -> String {
        let response = client
            .post(self.url("/api/admin/sessions"))
            .json(&serde_json::json!({
                "email": self.admin_email,
                "key": self.admin_key,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);

        let body: serde_json::Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    /// Creates a class and returns its id.
    pub async fn create_class(
        &self,
        client: &reqwest::Client,
        token: &str,
        title: &str,
        hours_from_now: i64,
        capacity: u32,
    ) -> String {
        let starts_at = chrono::Utc::now() + chrono::Duration::hours(hours_from_now);
        let response = client
            .post(self.url("/api/admin/classes"))
            .bearer_auth(token)
            .json(&serde_json::json!({
                "title": title,
                "discipline": "yoga",
                "description": "Breath-led practice.",
                "instructor": "Mara",
                "room": "Garden room",
                "startsAt": starts_at,
                "durationMinutes": 60,
                "capacity": capacity,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);

        let body: serde_json::Value = response.json().await.unwrap();
        body["id"].as_str().unwrap().to_string()
    }
}

/// A client that does not follow redirects, for asserting on 303 responses.
pub fn manual_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
