//! # Error Types
//!
//! This module defines all error types for the chime interpreter.
//!
//! Parse errors surface without location; the line runner wraps them in
//! [`Error::AtLine`] with the 1-based source line so users can find the
//! offending notation.
//!
//! ## Usage
//! ```rust
//! use chime::{check_source, Error};
//!
//! match check_source("C4 4\nH4 4") {
//!     Ok(events) => println!("{} events", events.len()),
//!     Err(Error::AtLine { line, source }) => {
//!         eprintln!("bad notation at line {}: {}", line, source);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

use crate::device::DeviceError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A tone token that is not `[A-G][0-9][#b]?`.
    ///
    /// Unrecognized pitch letters must fail loudly rather than fall back to
    /// some default offset.
    ///
    /// # Example
    /// ```
    /// # use chime::Error;
    /// let err = Error::InvalidNote("H4".to_string());
    /// assert_eq!(err.to_string(), "invalid note 'H4'");
    /// ```
    #[error("invalid note '{0}'")]
    InvalidNote(String),

    /// A non-positive duration denominator or BPM value.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    /// A line whose token shape matches no notation form.
    #[error("malformed line: {0}")]
    MalformedLine(String),

    /// A chord with more tones than the player supports.
    #[error("chord has {count} tones, at most {limit} are supported")]
    TooManyTones { count: usize, limit: usize },

    /// The tone device could not be actuated.
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// Any of the above, annotated with the 1-based source line it came from.
    #[error("line {line}: {source}")]
    AtLine { line: usize, source: Box<Error> },
}

impl Error {
    /// Wrap this error with the source line it was raised on.
    pub(crate) fn at_line(self, line: usize) -> Error {
        Error::AtLine {
            line,
            source: Box::new(self),
        }
    }
}
