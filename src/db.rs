pub mod document_store;
pub use document_store::{DocumentStore, WriteBatch, WriteOp};
pub mod memory_store;
pub use memory_store::MemoryDocumentStore;
pub mod pg_store;
pub use pg_store::PgDocumentStore;
pub mod sales_repo;
pub use sales_repo::SalesRepository;
pub mod goals_repo;
pub use goals_repo::GoalRepository;
pub mod rewards_repo;
pub use rewards_repo::RewardConfigRepository;
