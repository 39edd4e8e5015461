pub mod builder;
pub mod config;
pub mod error;
pub mod expander;
pub mod formatter;
pub mod io;
pub mod node;
pub mod parser;
pub mod scanner;

pub use error::{Result, TwigError};
pub use expander::{expand, ExpandLimits, Expander};
