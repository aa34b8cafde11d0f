pub mod frequency;
pub mod lead_time;
pub mod release;
pub mod report;

pub mod util;
