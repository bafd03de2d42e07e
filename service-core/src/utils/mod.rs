pub mod object_id;
pub mod validation;

pub use object_id::{parse_object_id, serialize_object_id};
pub use validation::{ValidatedJson, ValidatedQuery};
