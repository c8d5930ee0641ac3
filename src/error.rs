use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    InvalidConfig(String),
    InvalidShape(String),
    InvalidData(String),
    /// A weight write targeted a pair of neurons without an edge.
    NotConnected { from: usize, to: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::InvalidShape(msg) => write!(f, "invalid shape: {msg}"),
            Error::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            Error::NotConnected { from, to } => {
                write!(f, "neuron {from} is not connected to neuron {to}")
            }
        }
    }
}

impl std::error::Error for Error {}
