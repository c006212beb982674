//! Simulation domain models.
//!
//! # Domain Mappings
//!
//! | cloudlet-sched | Cloud simulation | Operating system |
//! |----------------|------------------|------------------|
//! | Job | Cloudlet | Process |
//! | ExecutionUnit | Virtual machine | CPU core |
//! | Timeline | Finished cloudlet list | Gantt chart |

mod job;
mod timeline;
mod unit;

pub use job::Job;
pub use timeline::{Slice, Timeline, TimelineEntry};
pub use unit::ExecutionUnit;
