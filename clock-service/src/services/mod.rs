pub mod database;
pub mod mock;

pub use database::{ClockRepository, MongoClockRepository};
pub use mock::MockClockRepository;
