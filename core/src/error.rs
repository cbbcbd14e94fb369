use std::error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeFormatError(pub std::string::String);

impl fmt::Display for TimeFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid time format: {}", self.0)
    }
}

impl error::Error for TimeFormatError {}

#[derive(Debug)]
pub enum DocumentError {
    InvalidNumber(std::string::String),
    InvalidTimestamp(std::string::String),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DocumentError::InvalidNumber(msg) => write!(f, "invalid number: {}", msg),
            DocumentError::InvalidTimestamp(msg) => write!(f, "invalid timestamp: {}", msg),
        }
    }
}

impl error::Error for DocumentError {}
