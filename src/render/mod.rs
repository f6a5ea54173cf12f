pub mod checkbox;
pub mod signature;
pub mod target;
