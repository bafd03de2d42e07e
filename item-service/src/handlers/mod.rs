pub mod health;
pub mod items;

pub use health::{health_check, readiness_check};
pub use items::{
    count_by_email, create_item, delete_item, filter_items, retrieve_item, update_item,
};
