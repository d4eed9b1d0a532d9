//! 认证授权模块
//!
//! 提供身份解析、JWT 服务和中间件：
//! - [`AuthProvider`] - 身份来源 (JWT 或固定夹具)
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] / [`require_admin`] - 中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod provider;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
pub use provider::{AuthMode, AuthProvider};
