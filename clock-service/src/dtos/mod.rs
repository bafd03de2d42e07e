pub mod clock_records;

pub use clock_records::{
    ClockFilterParams, ClockRecordPatchRequest, ClockRecordRequest, ClockRecordResponse,
    DeleteResponse, UpdateClockRecordResponse,
};
