pub mod chemistry;
pub mod constants;
pub mod error;
pub mod experiment;
pub mod sim;
