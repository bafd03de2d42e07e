pub mod database;
pub mod mock;

pub use database::{count_by_email_pipeline, ItemRepository, MongoItemRepository};
pub use mock::MockItemRepository;
