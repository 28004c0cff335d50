use std::fmt;

struct Node<T> {
    item: T,
    next: Option<Box<Node<T>>>,
}

/// A singly-linked list of owned items.
///
/// Positional operations (`get`, `insert_after`, `insert_before`) are
/// zero-based and walk from the head.
pub struct List<T> {
    head: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.item)
    }

    pub fn tail(&self) -> Option<&T> {
        self.iter().last()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.node_mut(index).map(|node| &mut node.item)
    }

    pub fn prepend(&mut self, item: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { item, next }));
        self.len += 1;
    }

    pub fn append(&mut self, item: T) {
        let node = Box::new(Node { item, next: None });
        match self.len.checked_sub(1).and_then(|last| self.node_mut(last)) {
            Some(tail) => tail.next = Some(node),
            None => self.head = Some(node),
        }
        self.len += 1;
    }

    /// Insert `item` directly after the item at `index`. Returns `false`
    /// (and logs an error) if there is no such item.
    pub fn insert_after(&mut self, index: usize, item: T) -> bool {
        let Some(node) = self.node_mut(index) else {
            tracing::error!(
                "List::insert_after({}): index out of range for list of {}",
                index,
                self.len
            );
            return false;
        };
        let next = node.next.take();
        node.next = Some(Box::new(Node { item, next }));
        self.len += 1;
        true
    }

    /// Insert `item` directly before the item at `index`. Returns `false`
    /// (and logs an error) if there is no such item.
    pub fn insert_before(&mut self, index: usize, item: T) -> bool {
        if index >= self.len {
            tracing::error!(
                "List::insert_before({}): index out of range for list of {}",
                index,
                self.len
            );
            return false;
        }
        if index == 0 {
            self.prepend(item);
            true
        } else {
            self.insert_after(index - 1, item)
        }
    }

    /// Drop every item, iteratively so long lists cannot overflow the stack.
    pub fn clear(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut Node<T>> {
        let mut node = self.head.as_deref_mut()?;
        for _ in 0..index {
            node = node.next.as_deref_mut()?;
        }
        Some(node)
    }
}

impl<T: PartialEq> List<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.iter().any(|candidate| candidate == item)
    }

    /// Unlink the first item equal to `item`. Logs a warning and returns
    /// `false` if none matches.
    pub fn remove(&mut self, item: &T) -> bool {
        let Some(position) = self.iter().position(|candidate| candidate == item) else {
            tracing::warn!("List::remove: item not found in list of {}", self.len);
            return false;
        };

        if position == 0 {
            let removed = self.head.take();
            self.head = removed.and_then(|node| node.next);
        } else if let Some(previous) = self.node_mut(position - 1) {
            let removed = previous.next.take();
            previous.next = removed.and_then(|node| node.next);
        }
        self.len -= 1;
        true
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        let mut list = Self::new();
        for item in items.into_iter().rev() {
            list.prepend(item);
        }
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.item
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
