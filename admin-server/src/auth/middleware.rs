//! 认证中间件
//!
//! 为请求认证和授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;

/// 认证中间件 - 要求调用者携带有效身份
///
/// 身份解析交给 [`AuthProvider`](crate::auth::AuthProvider)；验证成功后
/// 将 [`CurrentUser`] 注入请求扩展 (`req.extensions_mut().insert(user)`)。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (健康检查等)
/// - `GET /api/menu/items` 与 `GET /api/menu/tree` (站点导航的公开
///   读取路径)。这两个端点的 `showAll=true` 后台视图由 handler 自己
///   认证：中间件看到的是原始查询串，而 handler 拿到的是百分号解码
///   后的值，判定必须落在解码后的一侧。
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match state.auth.authenticate(auth_header) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(
                target: "security",
                error = %e,
                uri = %req.uri(),
                "Authentication failed"
            );
            Err(e)
        }
    }
}

/// 公开 API 路径判定
///
/// 只按方法和路径判定。`showAll=true` 的后台编辑视图在 handler 里走
/// 解码后的查询参数认证，这里不解析查询串。
fn is_public_api_route(method: &http::Method, path: &str) -> bool {
    method == http::Method::GET && (path == "/api/menu/items" || path == "/api/menu/tree")
}

/// 管理员中间件 - 要求管理员角色
///
/// 检查 `CurrentUser.role == "admin"`，用于菜单的所有写路径。
///
/// # 错误
///
/// 非管理员返回 403 Forbidden
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        tracing::warn!(
            target: "security",
            user_id = %user.id,
            username = %user.username,
            user_role = %user.role,
            "Admin role required"
        );
        return Err(AppError::forbidden("Admin role required"));
    }

    Ok(next.run(req).await)
}
