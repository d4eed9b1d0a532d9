//! Category API 模块
//!
//! 分类的后台管理接口，全部需要认证，创建需要 admin。

mod handler;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .merge(
            Router::new()
                .route("/", post(handler::create))
                .route_layer(from_fn(require_admin)),
        )
}
