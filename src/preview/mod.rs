pub mod controller;
pub mod flip;
