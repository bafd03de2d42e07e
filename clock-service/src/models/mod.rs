pub mod clock_record;

pub use clock_record::{ClockFilter, ClockPatch, ClockRecord};
