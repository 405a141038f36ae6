//! Console output and operator interaction

pub mod log;
pub mod prompt;
