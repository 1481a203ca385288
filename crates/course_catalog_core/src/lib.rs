pub mod catalog;
pub mod domain;
pub mod ports;
pub mod rating;

#[cfg(test)]
mod test_store;

pub use domain::{Chapter, Course, RankedCourse, SortMode};
pub use ports::{CourseStore, PortError, PortResult};
