pub mod appointment;
pub mod fitness_center;
pub mod member;
pub mod service;
pub mod trainer;
