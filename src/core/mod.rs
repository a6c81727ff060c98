/// Submission validation and field reconciliation
pub mod normalizer;
/// Storage port and its `SeaORM` implementation
pub mod repository;

pub use normalizer::{Rejection, normalize};
pub use repository::{BudgetRequestRepository, SeaOrmBudgetRequestRepository, StorageError};
