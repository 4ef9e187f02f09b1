//! Repository trait for click analytics rows.

use crate::domain::entities::NewClick;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the append-only clicks table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends one click row. Rows are never updated or deleted.
    async fn insert(&self, new_click: NewClick) -> Result<(), AppError>;
}
