//! Shared harness for API integration tests.
//!
//! Builds the full axum application against a throwaway SQLite database
//! and drives it with `tower::ServiceExt::oneshot`, no listening socket.

// Each test binary only uses a subset of the helpers
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use admin_server::auth::JwtConfig;
use admin_server::db::DbService;
use admin_server::db::repository::{CategoryRepository, ProductRepository};
use admin_server::{
    AuthMode, AuthProvider, Config, JwtService, ServerState, SyncLevelPolicy, api,
};
use shared::models::{CategoryCreate, ProductCreate};

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    // Dropping the TempDir deletes the database
    _work_dir: TempDir,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-key-0123456789abcdef".to_string(),
        expiration_minutes: 60,
        issuer: "admin-server".to_string(),
        audience: "admin-clients".to_string(),
    }
}

/// Fixture-auth app with the default sync policy
pub async fn spawn_app() -> TestApp {
    spawn_app_with(AuthMode::Fixture, SyncLevelPolicy::Preserve).await
}

pub async fn spawn_app_with(auth_mode: AuthMode, sync_level_policy: SyncLevelPolicy) -> TestApp {
    let work_dir = tempfile::tempdir().expect("Failed to create temp work dir");

    let config = Config {
        work_dir: work_dir.path().to_string_lossy().into_owned(),
        http_port: 0,
        jwt: test_jwt_config(),
        environment: "development".to_string(),
        auth_mode,
        sync_level_policy,
    };
    config
        .ensure_work_dir_structure()
        .expect("Failed to create work dir structure");

    let db_path = config.database_dir().join("backoffice.db");
    let db = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("Failed to open test database");

    let jwt = JwtService::with_config(config.jwt.clone());
    let auth =
        AuthProvider::from_mode(auth_mode, jwt, false).expect("Failed to build auth provider");

    let state = ServerState::new(config, db.pool, auth);
    let app = api::build_app(state.clone());

    TestApp {
        app,
        state,
        _work_dir: work_dir,
    }
}

impl TestApp {
    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.state.db.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.state.db.clone())
    }

    /// Bearer token minted with the app's JWT config
    pub fn token_for(&self, id: &str, username: &str, role: &str) -> String {
        JwtService::with_config(test_jwt_config())
            .generate_token(id, username, role)
            .expect("Failed to generate token")
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, None, Some(body)).await
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::POST, uri, None, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, None, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None, None).await
    }

    /// Seed a category directly through the repository
    pub async fn seed_category(&self, create: CategoryCreate) -> shared::models::Category {
        self.categories()
            .create(create)
            .await
            .expect("Failed to seed category")
    }

    /// Seed a product directly through the repository
    pub async fn seed_product(&self, create: ProductCreate) -> shared::models::Product {
        self.products()
            .create(create)
            .await
            .expect("Failed to seed product")
    }
}

/// Minimal category payload with sensible menu defaults
pub fn category(name: &str) -> CategoryCreate {
    CategoryCreate {
        name: name.to_string(),
        slug: None,
        description: format!("{name} category"),
        image: None,
        is_active: Some(true),
        sort_order: Some(0),
        menu_order: Some(0),
        show_in_menu: Some(true),
        menu_level: Some(0),
        parent_id: None,
    }
}

/// Names of the `data` array entries, in response order
pub fn data_names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data is not an array")
        .iter()
        .map(|c| c["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
