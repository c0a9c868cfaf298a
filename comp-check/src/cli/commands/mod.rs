// Command implementations

pub mod check;
pub mod parse;
pub mod types;
