use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A mutation addressed a point that does not exist. This is a caller bug, not a user error.
    #[error("index {index} is out of range for a path of {len} points")]
    OutOfRange { index: usize, len: usize },
}
