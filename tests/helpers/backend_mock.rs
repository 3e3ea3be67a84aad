//! Mock backend API server for testing
//!
//! This module provides a mock HTTP server that simulates the Varta
//! backend REST API. It uses wiremock to create configurable mock
//! responses in the backend's envelope shapes.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Mock backend API server
pub struct BackendMockServer {
    pub server: MockServer,
}

impl BackendMockServer {
    /// Start a new mock backend
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL for the API client, with the trailing slash the real
    /// deployment uses
    pub fn api_base_url(&self) -> String {
        format!("{}/api/", self.server.uri())
    }

    /// Base URL for the geocoding client
    pub fn geocode_base_url(&self) -> String {
        format!("{}/geo", self.server.uri())
    }

    /// Mount a 200 response with an arbitrary JSON body
    pub async fn mock_json(&self, http_method: &str, api_path: &str, body: Value) {
        Mock::given(method(http_method))
            .and(path(format!("/api/{}", api_path)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount an HTTP error response with the backend's message field
    pub async fn mock_error(&self, http_method: &str, api_path: &str, status: u16, message: &str) {
        Mock::given(method(http_method))
            .and(path(format!("/api/{}", api_path)))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(json!({ "message": message, "error": true, "data": null })),
            )
            .mount(&self.server)
            .await;
    }

    /// Mount a successful login response
    pub async fn mock_login(&self, token: &str, user: Value) {
        self.mock_json(
            "POST",
            "auth/login",
            json!({
                "message": "Login successful",
                "error": false,
                "data": { "token": token, "user": user }
            }),
        )
        .await;
    }

    /// Mount a published feed page, optionally requiring a district
    /// query parameter
    pub async fn mock_feed(&self, district: Option<&str>, articles: Value) {
        let body = json!({
            "message": "News fetched",
            "error": false,
            "data": { "articles": articles, "page": 1, "limit": 10 }
        });

        let mut mock = Mock::given(method("GET")).and(path("/api/public/news"));
        if let Some(district) = district {
            mock = mock.and(query_param("district", district));
        }
        mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a Nominatim-style reverse geocoding response
    pub async fn mock_geocode(&self, address: Value) {
        Mock::given(method("GET"))
            .and(path("/geo/reverse"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "address": address })),
            )
            .mount(&self.server)
            .await;
    }

    /// Mount a failing reverse geocoding response
    pub async fn mock_geocode_failure(&self) {
        Mock::given(method("GET"))
            .and(path("/geo/reverse"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the backend received for a path
    pub async fn request_count(&self, api_path: &str) -> usize {
        let expected = format!("/api/{}", api_path);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == expected)
            .count()
    }
}
