mod appointment;
mod availability_window;
mod fitness_center;
mod member;
mod service;
mod trainer;

pub use appointment::{Appointment, BookedSlot, truncate_to_minute};
pub use availability_window::AvailabilityWindow;
pub use fitness_center::FitnessCenter;
pub use member::Member;
pub use service::Service;
pub use trainer::{Trainer, TrainerProfile, TrainerService};
