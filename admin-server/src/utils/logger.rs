//! Logging Infrastructure
//!
//! tracing 初始化：控制台输出，可选按天滚动的文件输出。
//! 过滤规则来自 `RUST_LOG`，未设置时回退到传入的级别 (默认 info)。

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize console-only logging
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize logging with optional daily-rolling file output
///
/// The file writer is only attached when `log_dir` exists; a missing
/// directory degrades to console output instead of failing startup.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("info")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_dir.map(Path::new).filter(|dir| dir.exists()) {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "admin-server");
            builder.with_writer(file_appender).init();
        }
        None => builder.init(),
    }
}
