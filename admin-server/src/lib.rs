//! Back-Office Admin Server - 后台菜单与分类管理服务
//!
//! # 架构概述
//!
//! 本模块是后台管理服务的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SQLite 存储，分类和商品仓库
//! - **菜单引擎** (`menu`): 排序批次验证、菜单树组装、目录同步策略
//! - **认证** (`auth`): JWT 身份解析与管理员授权
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! admin-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、中间件
//! ├── menu/          # 菜单领域逻辑
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志、slug
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod menu;
pub mod utils;

// Re-export 公共类型
pub use auth::{AuthMode, AuthProvider, CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use menu::SyncLevelPolicy;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv, 工作目录, 日志)
///
/// 返回加载后的配置。日志写入 `<work_dir>/logs/`，
/// 级别由 RUST_LOG 控制，默认 info。
pub fn setup_environment() -> Result<Config, Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_dir = config.log_dir().to_string_lossy().into_owned();
    init_logger_with_file(None, Some(&log_dir));

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ___       __          _
   /   | ____/ /___ ___  (_)___
  / /| |/ __  / __ `__ \/ / __ \
 / ___ / /_/ / / / / / / / / / /
/_/  |_\__,_/_/ /_/ /_/_/_/ /_/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
