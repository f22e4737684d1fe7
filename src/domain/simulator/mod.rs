pub mod clock;
pub mod driver;
pub mod feed;
pub mod simulation;
