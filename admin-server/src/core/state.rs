use sqlx::SqlitePool;

use crate::auth::AuthProvider;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// 服务器状态 - 持有所有共享服务的引用
///
/// ServerState 是后台服务的核心数据结构，在所有请求处理函数之间共享。
/// 连接池和 AuthProvider 内部都是 Arc，Clone 成本极低。
///
/// # 组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | SqlitePool | SQLite 连接池 |
/// | auth | AuthProvider | 身份来源 (JWT 或夹具) |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub db: SqlitePool,
    /// 身份来源
    pub auth: AuthProvider,
}

impl ServerState {
    /// 创建服务器状态 (手动构造，测试常用)
    pub fn new(config: Config, db: SqlitePool, auth: AuthProvider) -> Self {
        Self { config, db, auth }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/backoffice.db, 含迁移)
    /// 3. AuthProvider (fixture 模式在生产环境直接拒绝)
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("backoffice.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let jwt_service = crate::auth::JwtService::with_config(config.jwt.clone());
        let auth = AuthProvider::from_mode(config.auth_mode, jwt_service, config.is_production())?;

        Ok(Self::new(config.clone(), db_service.pool, auth))
    }
}
