//! Menu API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/menu/items | GET | 菜单分类列表 | showAll=true 时需要 |
//! | /api/menu/tree | GET | 嵌套菜单树 | showAll=true 时需要 |
//! | /api/menu/reorder | PUT | 批量重排序 | admin |
//! | /api/menu/sync | POST | 从商品目录同步菜单 | admin |
//! | /api/menu/items/{id} | PUT | 更新菜单分类 | admin |
//! | /api/menu/items/{id} | DELETE | 删除菜单分类 | admin |
//! | /api/menu/items/{id}/visibility | PUT | 切换菜单可见性 | admin |

mod handler;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    let mutations = Router::new()
        .route("/reorder", put(handler::reorder))
        .route("/sync", post(handler::sync))
        .route(
            "/items/{id}",
            put(handler::update_item).delete(handler::delete_item),
        )
        .route("/items/{id}/visibility", put(handler::toggle_visibility))
        .route_layer(from_fn(require_admin));

    Router::new()
        .route("/items", get(handler::list_items))
        .route("/tree", get(handler::tree))
        .merge(mutations)
}
