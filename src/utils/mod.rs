pub mod logger;
pub mod term;
