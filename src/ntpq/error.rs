use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NtpqError {
    #[error("peer row has {found} columns, expected at least {expected}")]
    MissingColumns { expected: usize, found: usize },
}
