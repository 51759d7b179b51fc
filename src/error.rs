use thiserror::Error;

/// Failures reported by [`LinkedList`](crate::LinkedList) operations.
///
/// A failed operation never changes the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("list is empty")]
    EmptyCollection,
    #[error("index {index} out of range for list of length {length}")]
    IndexOutOfRange { index: usize, length: usize },
}
