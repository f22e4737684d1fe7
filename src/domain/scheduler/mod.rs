pub mod assignment;
pub mod scheduler;
