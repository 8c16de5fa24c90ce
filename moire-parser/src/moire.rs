//! Main module for moire library functionality

pub mod ast;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod registry;
pub mod token;
