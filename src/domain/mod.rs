pub mod request;
pub mod resource;
pub mod scheduler;
pub mod simulator;
pub mod utils;
