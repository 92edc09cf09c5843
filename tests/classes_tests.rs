//! Class schedule and pagination tests.

mod common;

use common::{manual_redirect_client, TestServer};

#[tokio::test]
async fn test_service_info() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["service"], "studio-rs");
}

#[tokio::test]
async fn test_create_and_get_class() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await;

    let id = server
        .create_class(&client, &token, "Morning Flow", 24, 12)
        .await;

    let response = client
        .get(server.url(&format!("/api/classes/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Morning Flow");
    assert_eq!(body["discipline"], "yoga");
    assert_eq!(body["capacity"], 12);
}

#[tokio::test]
async fn test_create_class_requires_auth() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/api/admin/classes"))
        .json(&serde_json::json!({
            "title": "Rogue class",
            "discipline": "yoga",
            "instructor": "Nobody",
            "room": "Nowhere",
            "startsAt": chrono::Utc::now(),
            "durationMinutes": 60,
            "capacity": 10,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_unknown_class_is_404() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url(&format!("/api/classes/{}", uuid::Uuid::new_v4())))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "ClassNotFound");
}

#[tokio::test]
async fn test_empty_schedule_still_has_one_page() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client.get(server.url("/api/classes")).send().await.unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["totalItems"], 0);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["hasPrevious"], false);
    assert_eq!(body["hasNext"], false);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_schedule_pagination_end_to_end() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await;

    for i in 0..47 {
        server
            .create_class(&client, &token, &format!("Class {}", i), i + 1, 10)
            .await;
    }

    // First page: full, soonest class first.
    let response = client.get(server.url("/api/classes")).send().await.unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["totalItems"], 47);
    assert_eq!(body["totalPages"], 5);
    assert_eq!(body["items"].as_array().unwrap().len(), 10);
    assert_eq!(body["items"][0]["title"], "Class 0");
    assert_eq!(body["hasPrevious"], false);
    assert_eq!(body["hasNext"], true);

    // Last page: partial, next link absent.
    let response = client
        .get(server.url("/api/classes?page=5"))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["page"], 5);
    assert_eq!(body["items"].as_array().unwrap().len(), 7);
    assert_eq!(body["hasPrevious"], true);
    assert_eq!(body["hasNext"], false);
    assert_eq!(body["links"]["prev"], "/api/classes?page=4");
    assert!(body["links"]["next"].is_null());

    // Requesting past the last page redirects to it.
    let manual = manual_redirect_client();
    let response = manual
        .get(server.url("/api/classes?page=6"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/api/classes?page=5"
    );
}

#[tokio::test]
async fn test_page_parameter_is_canonicalized() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await;

    for i in 0..12 {
        server
            .create_class(&client, &token, &format!("Class {}", i), i + 1, 10)
            .await;
    }

    let manual = manual_redirect_client();
    for (request, canonical) in [
        ("/api/classes?page=0", "/api/classes?page=1"),
        ("/api/classes?page=junk", "/api/classes?page=1"),
        ("/api/classes?page=02", "/api/classes?page=2"),
        ("/api/classes?page=0&per_page=5", "/api/classes?page=1&per_page=5"),
    ] {
        let response = manual.get(server.url(request)).send().await.unwrap();
        assert_eq!(response.status(), 303, "{} should redirect", request);
        assert_eq!(response.headers().get("location").unwrap(), canonical);
    }

    // A canonical page is served directly, with self links echoing the
    // full query.
    let response = manual
        .get(server.url("/api/classes?page=2&per_page=5"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["page"], 2);
    assert_eq!(body["perPage"], 5);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["links"]["self"], "/api/classes?page=2&per_page=5");
}

#[tokio::test]
async fn test_update_and_delete_class() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await;

    let id = server
        .create_class(&client, &token, "Evening Stretch", 6, 8)
        .await;

    let response = client
        .put(server.url(&format!("/api/admin/classes/{}", id)))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "title": "Evening Stretch & Restore",
            "discipline": "pilates",
            "description": "Slow and deep.",
            "instructor": "Iris",
            "room": "Loft",
            "startsAt": chrono::Utc::now() + chrono::Duration::hours(7),
            "durationMinutes": 75,
            "capacity": 10,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Evening Stretch & Restore");
    assert_eq!(body["discipline"], "pilates");

    let response = client
        .delete(server.url(&format!("/api/admin/classes/{}", id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let response = client
        .get(server.url(&format!("/api/classes/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}
