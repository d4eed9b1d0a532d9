use std::path::PathBuf;

use crate::auth::{AuthMode, JwtConfig};
use crate::menu::SyncLevelPolicy;

/// 服务器配置 - 后台服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/backoffice/admin | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | AUTH_MODE | jwt | 身份来源: jwt \| fixture |
/// | MENU_SYNC_LEVELS | preserve | 同步时的层级策略: preserve \| flatten |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/backoffice HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 身份来源
    pub auth_mode: AuthMode,
    /// 菜单同步对 menu_level 的处理策略
    pub sync_level_policy: SyncLevelPolicy,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值。无法解析的枚举值回退到安全默认
    /// 并记录警告 (auth 回退到 jwt，而不是 fixture)。
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/backoffice/admin".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            auth_mode: parse_env_or_default("AUTH_MODE"),
            sync_level_policy: parse_env_or_default("MENU_SYNC_LEVELS"),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录 (work_dir/logs)
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 解析环境变量中的枚举值，失败时回退到 Default 并记录警告
fn parse_env_or_default<T>(var: &str) -> T
where
    T: std::str::FromStr<Err = String> + Default,
{
    match std::env::var(var) {
        Ok(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid {var}: {e}, falling back to default");
                T::default()
            }
        },
        Err(_) => T::default(),
    }
}
