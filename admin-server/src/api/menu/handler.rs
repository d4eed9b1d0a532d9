//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use http::HeaderMap;
use serde::Deserialize;
use validator::Validate;

use crate::auth::{AuthProvider, CurrentUser};
use crate::core::ServerState;
use crate::db::repository::CategoryRepository;
use crate::menu;
use crate::utils::{AppError, AppResult, ok, ok_empty, ok_with_message};
use shared::ApiResponse;
use shared::models::{
    Category, CategoryUpdate, MenuTreeNode, ReorderRequest, SyncSummary, ToggleVisibility,
};

/// Query string for the menu listing endpoints
///
/// `showAll=true` 包含隐藏和停用的分类，需要认证。任何其他值
/// (包括缺失) 都走公共的过滤视图。
///
/// `Query` 提取的是百分号解码后的值，所以 `showAll=%74rue` 在这里
/// 等同于 `showAll=true`；认证判定必须用同一个解码后的视角。
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    #[serde(rename = "showAll")]
    show_all: Option<String>,
}

impl MenuQuery {
    fn show_all(&self) -> bool {
        self.show_all.as_deref() == Some("true")
    }

    /// 后台编辑视图要求有效身份；公共视图不触碰凭证。
    fn authorize(&self, auth: &AuthProvider, headers: &HeaderMap) -> Result<bool, AppError> {
        if !self.show_all() {
            return Ok(false);
        }
        let auth_header = headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());
        auth.authenticate(auth_header).inspect_err(|e| {
            tracing::warn!(
                target: "security",
                error = %e,
                "Menu admin view authentication failed"
            );
        })?;
        Ok(true)
    }
}

/// GET /api/menu/items - 菜单分类扁平列表
///
/// 按 menu_order, menu_level, name 排序。公共视图只返回
/// show_in_menu 且 is_active 的分类。
pub async fn list_items(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let show_all = query.authorize(&state.auth, &headers)?;
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.list_menu(show_all).await?;
    Ok(ok(categories))
}

/// GET /api/menu/tree - 嵌套菜单树
///
/// 与 /items 相同的过滤规则，但按 parent_id 组装成树。
/// 父节点被过滤掉的分类提升为根节点。
pub async fn tree(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<ApiResponse<Vec<MenuTreeNode>>>> {
    let show_all = query.authorize(&state.auth, &headers)?;
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.list_menu(show_all).await?;
    Ok(ok(menu::build_tree(categories)))
}

/// PUT /api/menu/reorder - 批量重排序
///
/// 整批验证通过后在单个事务中应用，任何一项失败则全部回滚。
pub async fn reorder(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ReorderRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    payload.validate()?;

    let repo = CategoryRepository::new(state.db.clone());
    repo.reorder(&payload.items).await?;

    tracing::info!(
        user = %user.username,
        count = payload.items.len(),
        "Menu reordered"
    );
    Ok(ok_empty("Menu order updated successfully"))
}

/// POST /api/menu/sync - 从商品目录同步菜单
///
/// 幂等操作：将所有启用分类拉入菜单并重建 menu_order。
pub async fn sync(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<SyncSummary>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let total = repo
        .sync_from_catalog(state.config.sync_level_policy)
        .await?;

    tracing::info!(
        user = %user.username,
        total_categories = total,
        policy = %state.config.sync_level_policy,
        "Menu synced from catalog"
    );

    let summary = SyncSummary {
        total_categories: total,
        synced_at: Utc::now(),
    };
    Ok(ok_with_message(
        summary,
        format!("Menu synced: {} categories updated", total),
    ))
}

/// PUT /api/menu/items/:id - 更新菜单分类
pub async fn update_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<ApiResponse<Category>>> {
    payload.validate()?;

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.update(&id, payload).await?;
    Ok(ok(category))
}

/// DELETE /api/menu/items/:id - 删除菜单分类
///
/// 有商品关联的分类拒绝删除，子分类重新挂到被删分类的父节点。
pub async fn delete_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = CategoryRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_empty("Category deleted successfully"))
}

/// PUT /api/menu/items/:id/visibility - 切换菜单可见性
pub async fn toggle_visibility(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ToggleVisibility>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = CategoryRepository::new(state.db.clone());
    repo.toggle_visibility(&id, payload.show_in_menu).await?;
    Ok(ok_empty(if payload.show_in_menu {
        "Category is now visible in menu"
    } else {
        "Category is now hidden from menu"
    }))
}
