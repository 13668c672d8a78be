/// Common test utilities for integration tests
///
/// Builds the full router over an in-memory store so the HTTP surface can be
/// exercised without PostgreSQL:
/// - Two users with signed bearer tokens
/// - Request helpers that return status and parsed JSON body

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use taskboard_shared::auth::jwt::{create_token, Claims};
use taskboard_shared::store::MemoryStore;
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// A user known to the test context
pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

impl TestUser {
    fn new() -> Self {
        let id = Uuid::new_v4();
        let token = create_token(&Claims::new(id), JWT_SECRET).expect("token");
        Self { id, token }
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Test context containing the app and two independent users
pub struct TestContext {
    pub app: axum::Router,
    pub alice: TestUser,
    pub bob: TestUser,
}

impl TestContext {
    pub fn new() -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "postgresql://unused".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: JWT_SECRET.to_string(),
            },
        };

        let state = AppState::new(Arc::new(MemoryStore::new()), config);

        Self {
            app: build_router(state),
            alice: TestUser::new(),
            bob: TestUser::new(),
        }
    }

    /// Sends a request and returns the status with the JSON body (`Null` if empty)
    pub async fn send(&self, method: &str, uri: &str, auth: Option<&TestUser>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = auth {
            builder = builder.header("authorization", user.auth_header());
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, user: &TestUser) -> (StatusCode, Value) {
        self.send("GET", uri, Some(user), None).await
    }

    pub async fn post(&self, uri: &str, user: &TestUser, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(user), Some(body)).await
    }

    pub async fn put(&self, uri: &str, user: &TestUser, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(user), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, user: &TestUser) -> (StatusCode, Value) {
        self.send("PATCH", uri, Some(user), None).await
    }

    pub async fn delete(&self, uri: &str, user: &TestUser) -> (StatusCode, Value) {
        self.send("DELETE", uri, Some(user), None).await
    }

    /// Creates a project for `user` and returns its id
    pub async fn create_project(&self, user: &TestUser, name: &str) -> String {
        let (status, body) = self
            .post(
                "/api/projects",
                user,
                serde_json::json!({ "name": name, "eta": "2030-01-01" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Creates a task under `project_id` and returns its id
    pub async fn create_task(&self, user: &TestUser, project_id: &str, body: Value) -> String {
        let mut body = body;
        body["project"] = Value::String(project_id.to_string());
        let (status, body) = self.post("/api/tasks", user, body).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Creates a todo under `task_id` and returns its id
    pub async fn create_todo(&self, user: &TestUser, task_id: &str, body: Value) -> String {
        let mut body = body;
        body["task"] = Value::String(task_id.to_string());
        let (status, body) = self.post("/api/todos", user, body).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }
}
