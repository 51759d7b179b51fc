//! A singly-linked list with head/tail insertion, indexed access, and
//! in-place reversal.

mod error;
mod linked_list;

pub use error::ListError;
pub use linked_list::{IntoIter, Iter, LinkedList, Node};
