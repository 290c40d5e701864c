//! Schedule domain logic: the recurrence-resolution engine and the
//! orchestration service built on the storage seams.

pub mod error;
pub mod schedule;
