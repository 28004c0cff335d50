use std::ops::{Index, IndexMut};

use super::clamp_axis;

/// A heap-allocated array whose length is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Array<T> {
    data: Box<[T]>,
}

impl<T: Default> Array<T> {
    /// An array of `size` default values.
    pub fn new(size: usize) -> Self {
        Self {
            data: (0..size).map(|_| T::default()).collect(),
        }
    }
}

impl<T> Array<T> {
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Strict access.
    pub fn get(&self, position: usize) -> Option<&T> {
        self.data.get(position)
    }

    /// Strict access.
    pub fn get_mut(&mut self, position: usize) -> Option<&mut T> {
        self.data.get_mut(position)
    }

    /// Clamped access: past-the-end positions resolve to the last element.
    pub fn index_of(&self, position: usize) -> Option<&T> {
        let position = self.clamped(position)?;
        self.data.get(position)
    }

    /// Clamped access: past-the-end positions resolve to the last element.
    pub fn index_of_mut(&mut self, position: usize) -> Option<&mut T> {
        let position = self.clamped(position)?;
        self.data.get_mut(position)
    }

    fn clamped(&self, position: usize) -> Option<usize> {
        if self.data.is_empty() {
            tracing::error!("Array::index_of({}): array is empty", position);
            return None;
        }
        Some(clamp_axis("Array::index_of", "position", position, self.data.len()))
    }
}

impl<T> From<Vec<T>> for Array<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Index<usize> for Array<T> {
    type Output = T;

    /// Clamped access; panics only on an empty array.
    fn index(&self, position: usize) -> &T {
        match self.index_of(position) {
            Some(item) => item,
            None => panic!("index {} into an empty Array", position),
        }
    }
}

impl<T> IndexMut<usize> for Array<T> {
    fn index_mut(&mut self, position: usize) -> &mut T {
        match self.index_of_mut(position) {
            Some(item) => item,
            None => panic!("index {} into an empty Array", position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_default_filled() {
        let array = Array::<u32>::new(4);
        assert_eq!(array.len(), 4);
        assert!(array.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_strict_get_rejects_out_of_range() {
        let array = Array::from_vec(vec![1, 2, 3]);
        assert_eq!(array.get(2), Some(&3));
        assert_eq!(array.get(3), None);
    }

    // Out-of-range positions do not fail: they silently land on the last
    // element. Callers that need to detect the overrun must use `get`.
    #[test]
    fn test_index_clamps_to_last_element() {
        let mut array = Array::from_vec(vec![10, 20, 30]);
        assert_eq!(array[1], 20);
        assert_eq!(array[3], 30);
        assert_eq!(array[usize::MAX], 30);

        array[99] = 31;
        assert_eq!(array.as_slice(), &[10, 20, 31]);
    }

    #[test]
    fn test_empty_array_index_of_is_none() {
        let mut array = Array::<u8>::new(0);
        assert!(array.is_empty());
        assert_eq!(array.index_of(0), None);
        assert_eq!(array.index_of_mut(5), None);
    }

    #[test]
    #[should_panic(expected = "empty Array")]
    fn test_empty_array_index_panics() {
        let array = Array::<u8>::new(0);
        let _ = array[0];
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Array::from_vec(vec![String::from("a"), String::from("b")]);
        let mut copy = original.clone();
        copy[0].push('!');
        assert_eq!(original[0], "a");
        assert_eq!(copy[0], "a!");
    }
}
