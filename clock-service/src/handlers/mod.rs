pub mod clock_records;
pub mod health;

pub use clock_records::{
    create_clock_record, delete_clock_record, filter_clock_records, retrieve_clock_record,
    update_clock_record,
};
pub use health::{health_check, readiness_check};
