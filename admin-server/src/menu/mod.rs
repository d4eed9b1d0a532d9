//! 菜单领域逻辑
//!
//! 纯逻辑模块，不做任何 I/O：
//!
//! - [`tree`] - 邻接表构建、嵌套树、环检测
//! - [`reorder`] - 重排序批次校验
//! - [`sync`] - 同步策略 (层级压平 vs 保留)
//!
//! 持久化由 `db::repository` 负责，HTTP 由 `api::menu` 负责。

pub mod reorder;
pub mod sync;
pub mod tree;

pub use reorder::validate_batch;
pub use sync::SyncLevelPolicy;
pub use tree::{build_tree, parent_map, would_create_cycle};

use thiserror::Error;

use crate::utils::AppError;

/// Menu domain errors
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Reorder batch is empty")]
    EmptyBatch,

    #[error("Duplicate id in reorder batch: {0}")]
    DuplicateId(String),

    #[error("Category {0} not found")]
    UnknownCategory(String),

    #[error("Parent category {0} not found")]
    UnknownParent(String),

    #[error("Category {0} cannot be its own ancestor")]
    Cycle(String),
}

impl From<MenuError> for AppError {
    fn from(e: MenuError) -> Self {
        match e {
            // Unknown target id rejects the whole batch with 404 so the
            // client refetches canonical state
            MenuError::UnknownCategory(id) => AppError::not_found(format!("Category {id}")),
            other => AppError::validation(other.to_string()),
        }
    }
}
