//! Tool Foundations

mod token;

pub use token::*;
