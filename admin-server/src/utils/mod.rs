//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型
//! - [`AppResult`] - Result 别名
//! - 日志、slug 等工具

pub mod error;
pub mod logger;
pub mod slug;

pub use error::{AppError, AppResult, ok, ok_empty, ok_with_message};
pub use logger::{init_logger, init_logger_with_file};
pub use slug::slugify;
