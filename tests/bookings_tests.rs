//! Booking tests.

mod common;

use common::TestServer;

async fn book(
    server: &TestServer,
    client: &reqwest::Client,
    class_id: &str,
    name: &str,
    spots: u32,
) -> reqwest::Response {
    client
        .post(server.url(&format!("/api/classes/{}/bookings", class_id)))
        .json(&serde_json::json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "spots": spots,
        }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_booking() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await;
    let class_id = server.create_class(&client, &token, "Yin", 24, 12).await;

    let response = book(&server, &client, &class_id, "Ana", 2).await;
    assert_eq!(response.status(), 201);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["classId"], class_id);
    assert_eq!(body["spots"], 2);
    assert_eq!(body["status"], "confirmed");
}

#[tokio::test]
async fn test_full_class_rejects_bookings() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await;
    let class_id = server.create_class(&client, &token, "Small", 24, 2).await;

    assert_eq!(book(&server, &client, &class_id, "Ana", 2).await.status(), 201);

    let response = book(&server, &client, &class_id, "Ben", 1).await;
    assert_eq!(response.status(), 409);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "ClassFull");
}

#[tokio::test]
async fn test_past_class_rejects_bookings() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await;
    let class_id = server.create_class(&client, &token, "Gone", -1, 12).await;

    let response = book(&server, &client, &class_id, "Ana", 1).await;
    assert_eq!(response.status(), 409);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "ClassInPast");
}

#[tokio::test]
async fn test_booking_validation() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await;
    let class_id = server.create_class(&client, &token, "Yin", 24, 12).await;

    let response = client
        .post(server.url(&format!("/api/classes/{}/bookings", class_id)))
        .json(&serde_json::json!({
            "name": "Ana",
            "email": "not-an-email",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "InvalidEmail");
}

#[tokio::test]
async fn test_cancel_booking_frees_spots() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await;
    let class_id = server.create_class(&client, &token, "Tiny", 24, 1).await;

    let response = book(&server, &client, &class_id, "Ana", 1).await;
    assert_eq!(response.status(), 201);
    let booking: serde_json::Value = response.json().await.unwrap();
    let booking_id = booking["id"].as_str().unwrap();

    assert_eq!(book(&server, &client, &class_id, "Ben", 1).await.status(), 409);

    // Cancel, which frees the spot.
    let response = client
        .delete(server.url(&format!("/api/admin/bookings/{}", booking_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "cancelled");

    // Cancelling twice is a conflict.
    let response = client
        .delete(server.url(&format!("/api/admin/bookings/{}", booking_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    assert_eq!(book(&server, &client, &class_id, "Ben", 1).await.status(), 201);
}

#[tokio::test]
async fn test_admin_listing_preserves_filters_across_pages() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await;
    let class_id = server.create_class(&client, &token, "Big", 24, 50).await;

    for i in 0..7 {
        let response = book(&server, &client, &class_id, &format!("Guest{}", i), 1).await;
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(server.url("/api/admin/bookings?status=confirmed&per_page=5"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["totalItems"], 7);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
    // The status filter survives page navigation verbatim.
    assert_eq!(
        body["links"]["next"],
        "/api/admin/bookings?page=2&per_page=5&status=confirmed"
    );

    let response = client
        .get(server.url("/api/admin/bookings?page=2&per_page=5&status=confirmed"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["hasNext"], false);
}

#[tokio::test]
async fn test_unknown_status_filter_is_rejected() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let token = server.admin_token(&client).await;

    let response = client
        .get(server.url("/api/admin/bookings?status=waitlisted"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "InvalidQueryParameterValue");
}

#[tokio::test]
async fn test_booking_listing_requires_auth() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/api/admin/bookings"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}
