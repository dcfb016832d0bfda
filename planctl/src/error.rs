//! Error module
//!

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Status {
    #[error("Bad point {0}, need LAT,LON[,IDENT]")]
    BadPoint(String),
    #[error("Bad wind {0}, need DIR/SPEED")]
    BadWind(String),
    #[error("Unknown command {0}")]
    UnknownCommand(String),
    #[error("Bad arguments for {0}, usage: {1}")]
    BadArguments(String, &'static str),
    #[error("Need at least two points")]
    NotEnoughPoints,
}
