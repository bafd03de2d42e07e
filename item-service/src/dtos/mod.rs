pub mod items;

pub use items::{DeleteResponse, ItemFilterParams, ItemRequest, ItemResponse};
