use std::fmt;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::mem;
use std::ptr;

use crate::error::ListError;

/// One element of a [`LinkedList`].
///
/// Nodes handed back by [`LinkedList::pop`], [`LinkedList::pop_first`] and
/// [`LinkedList::remove`] are detached: their `next` link is always empty.
pub struct Node<V> {
    value: V,
    // Owning while linked into a list; null once detached.
    next: *mut Node<V>,
}

impl<V> Node<V> {
    fn alloc(value: V, next: *mut Node<V>) -> *mut Node<V> {
        Box::into_raw(Box::new(Node { value, next }))
    }

    /// Takes back a node that is no longer reachable from any list.
    ///
    /// # Safety
    ///
    /// `node` must come from [`Node::alloc`], be unlinked, and not be reclaimed twice.
    unsafe fn reclaim(node: *mut Node<V>) -> Node<V> {
        // SAFETY: guaranteed by the caller.
        let mut node = unsafe { *Box::from_raw(node) };
        node.next = ptr::null_mut();
        node
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn next(&self) -> Option<&Node<V>> {
        // SAFETY: `next` is only non-null on nodes borrowed out of a list, and that
        // borrow keeps the list and every node after this one alive.
        unsafe { self.next.as_ref() }
    }

    pub fn is_detached(&self) -> bool {
        self.next.is_null()
    }

    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V: fmt::Debug> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("detached", &self.is_detached())
            .finish()
    }
}

/// Singly-linked list with a cached length and an O(1) tail.
///
/// Nodes only link forward, so [`pop`](LinkedList::pop) has to walk from the
/// head to find the new tail. Use a doubly-linked list if removing from the
/// back is hot.
///
/// Every link is a raw pointer obtained from `Box::into_raw`, including the
/// non-owning `tail`, so no link is ever derived from a borrow of another.
pub struct LinkedList<V> {
    head: *mut Node<V>,
    // Non-owning; null exactly when the list is empty.
    tail: *mut Node<V>,
    length: usize,
    _owns: PhantomData<Box<Node<V>>>,
}

impl<V> LinkedList<V> {
    pub fn new(value: V) -> Self {
        let mut list = Self::empty();
        list.append(value);
        list
    }

    fn empty() -> Self {
        LinkedList {
            head: ptr::null_mut(),
            tail: ptr::null_mut(),
            length: 0,
            _owns: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn append(&mut self, value: V) {
        let new_node = Node::alloc(value, ptr::null_mut());

        if self.tail.is_null() {
            self.head = new_node;
        } else {
            // SAFETY: tail is non-null, so it points at the last live node of this list.
            unsafe {
                (*self.tail).next = new_node;
            }
        }

        self.tail = new_node;
        self.length += 1;
    }

    pub fn prepend(&mut self, value: V) {
        let new_node = Node::alloc(value, self.head);

        if self.tail.is_null() {
            self.tail = new_node;
        }

        self.head = new_node;
        self.length += 1;
    }

    /// Removes the last node. O(n): the new tail is found by walking from the head.
    pub fn pop(&mut self) -> Result<Node<V>, ListError> {
        if self.length <= 1 {
            return self.pop_first();
        }

        let pre = self.node_ptr(self.length - 2);
        // SAFETY: length >= 2, so `pre` is live and its successor is the tail.
        let last = unsafe {
            let last = (*pre).next;
            (*pre).next = ptr::null_mut();
            last
        };

        self.tail = pre;
        self.length -= 1;
        // SAFETY: `last` was just unlinked from the only node pointing at it.
        Ok(unsafe { Node::reclaim(last) })
    }

    pub fn pop_first(&mut self) -> Result<Node<V>, ListError> {
        if self.head.is_null() {
            tracing::debug!("pop on empty list");
            return Err(ListError::EmptyCollection);
        }

        let old_head = self.head;
        // SAFETY: head is non-null and owned by this list.
        self.head = unsafe { (*old_head).next };
        self.length -= 1;

        if self.head.is_null() {
            self.tail = ptr::null_mut();
        }

        // SAFETY: nothing in the list points at `old_head` any more.
        Ok(unsafe { Node::reclaim(old_head) })
    }

    pub fn get(&self, index: usize) -> Result<&Node<V>, ListError> {
        let length = self.length;
        if index >= length {
            return Err(out_of_range(index, length));
        }

        // SAFETY: index < length, so the node is live for as long as &self.
        Ok(unsafe { &*self.node_ptr(index) })
    }

    pub fn get_value(&self, index: usize) -> Result<&V, ListError> {
        self.get(index).map(Node::value)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut V, ListError> {
        let length = self.length;
        if index >= length {
            return Err(out_of_range(index, length));
        }

        // SAFETY: index < length, and &mut self rules out any other borrow of the node.
        Ok(unsafe { &mut (*self.node_ptr(index)).value })
    }

    pub fn set_value(&mut self, index: usize, value: V) -> Result<(), ListError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Inserts `value` so that it ends up at `index`. `index == len()` appends.
    pub fn insert(&mut self, index: usize, value: V) -> Result<(), ListError> {
        let length = self.length;
        if index > length {
            return Err(out_of_range(index, length));
        }

        if index == 0 {
            self.prepend(value);
            return Ok(());
        }

        if index == length {
            self.append(value);
            return Ok(());
        }

        let pre = self.node_ptr(index - 1);
        // SAFETY: 0 < index < length, so `pre` is live and is not the tail.
        unsafe {
            (*pre).next = Node::alloc(value, (*pre).next);
        }
        self.length += 1;

        tracing::trace!(index, length = self.length, "spliced node into list");
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Node<V>, ListError> {
        let length = self.length;
        if index >= length {
            return Err(out_of_range(index, length));
        }

        if index == 0 {
            return self.pop_first();
        }

        if index == length - 1 {
            return self.pop();
        }

        let pre = self.node_ptr(index - 1);
        // SAFETY: 0 < index < length - 1, so `pre` and its successor are live and
        // neither is the tail.
        let removed = unsafe {
            let removed = (*pre).next;
            (*pre).next = (*removed).next;
            removed
        };
        self.length -= 1;

        tracing::trace!(index, length = self.length, "spliced node out of list");
        // SAFETY: `removed` was just unlinked from its only predecessor.
        Ok(unsafe { Node::reclaim(removed) })
    }

    /// Reverses the list in place without allocating.
    pub fn reverse(&mut self) {
        if self.length <= 1 {
            return;
        }

        mem::swap(&mut self.head, &mut self.tail);

        let mut before: *mut Node<V> = ptr::null_mut();
        let mut current = self.tail;
        for _ in 0..self.length {
            // SAFETY: the loop visits each of the `length` live nodes of the original
            // chain once, reading `next` before overwriting it.
            unsafe {
                let after = (*current).next;
                (*current).next = before;
                before = current;
                current = after;
            }
        }

        tracing::trace!(length = self.length, "reversed list");
    }

    pub fn first(&self) -> Option<&V> {
        // SAFETY: head is null or a live node owned by this list.
        unsafe { self.head.as_ref() }.map(|node| &node.value)
    }

    pub fn last(&self) -> Option<&V> {
        // SAFETY: tail is null or a live node owned by this list.
        // The reference lifetime is tied to &self.
        unsafe { self.tail.as_ref() }.map(|node| &node.value)
    }

    pub fn clear(&mut self) {
        let mut current = self.head;
        while !current.is_null() {
            // SAFETY: every node reachable from head is live and freed exactly once.
            let node = unsafe { Box::from_raw(current) };
            current = node.next;
        }

        self.head = ptr::null_mut();
        self.tail = ptr::null_mut();
        self.length = 0;
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            // SAFETY: head is null or live for as long as &self.
            current: unsafe { self.head.as_ref() },
            remaining: self.length,
        }
    }

    /// Writes every value on its own line, head first.
    pub fn write_list<W: Write>(&self, mut out: W) -> io::Result<()>
    where
        V: fmt::Display,
    {
        for value in self.iter() {
            writeln!(out, "{value}")?;
        }
        out.flush()
    }

    pub fn print_list(&self) -> io::Result<()>
    where
        V: fmt::Display,
    {
        self.write_list(io::stdout().lock())
    }

    // Callers check `index < self.length`, which makes the walk infallible.
    fn node_ptr(&self, index: usize) -> *mut Node<V> {
        debug_assert!(index < self.length);

        let mut current = self.head;
        for _ in 0..index {
            // SAFETY: index < length, so every node walked over is live.
            current = unsafe { (*current).next };
        }
        current
    }
}

fn out_of_range(index: usize, length: usize) -> ListError {
    tracing::debug!(index, length, "index out of range");
    ListError::IndexOutOfRange { index, length }
}

impl<V> Drop for LinkedList<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<V: Clone> Clone for LinkedList<V> {
    fn clone(&self) -> Self {
        let mut new_list = LinkedList::empty();
        for value in self.iter() {
            new_list.append(value.clone());
        }
        new_list
    }
}

impl<V: fmt::Debug> fmt::Debug for LinkedList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V: fmt::Display> fmt::Display for LinkedList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

impl<V: PartialEq> PartialEq for LinkedList<V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for LinkedList<V> {}

impl<V> Extend<V> for LinkedList<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

pub struct Iter<'a, V> {
    current: Option<&'a Node<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next();
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a LinkedList<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct IntoIter<V> {
    list: LinkedList<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.list.is_empty() {
            return None;
        }
        self.list.pop_first().ok().map(Node::into_value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.length, Some(self.list.length))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> IntoIterator for LinkedList<V> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}
