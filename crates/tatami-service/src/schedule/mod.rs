pub mod resolution;
pub mod service;
pub mod week;

pub use resolution::{ResolvedOccurrence, resolve_date};
pub use service::{CreateSlot, DaySchedule, ScheduleService, WindowPatch};
