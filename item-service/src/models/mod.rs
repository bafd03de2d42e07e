pub mod item;

pub use item::{EmailCount, Item, ItemFields, ItemFilter};
