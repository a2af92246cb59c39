pub mod booking;
pub mod scheduling;
