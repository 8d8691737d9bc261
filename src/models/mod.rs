pub mod persona;
pub mod schedule;
