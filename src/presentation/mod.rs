pub mod display;
pub mod views;
