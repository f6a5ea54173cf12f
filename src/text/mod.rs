pub mod fixed;
pub mod layout;
pub mod parley_text;
