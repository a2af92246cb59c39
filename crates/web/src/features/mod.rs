pub mod appointments;
pub mod fitness_centers;
pub mod members;
pub mod services;
pub mod trainers;
