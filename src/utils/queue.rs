use alloc::boxed::Box;
use log::debug;

/// A growable first-in first-out queue over a circular buffer
///
/// Drives level-order traversal. Unlike a rolling window it never evicts:
/// when the buffer is full the capacity doubles and the live elements are
/// laid out again from the start of the new buffer.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    /// The circular buffer, allocated on the heap
    buf: Box<[T]>,
    /// The index of the head element in the buffer
    front: usize,
    /// The index one past the tail element in the buffer
    back: usize,
    /// The current number of elements stored in the queue
    len: usize,
}

impl<T> Queue<T>
where
    T: Default + Clone,
{
    /// Creates a new `Queue` with room for `cap` elements before growing.
    ///
    /// # Arguments
    ///
    /// * `cap` - The initial capacity; zero is raised to one
    ///
    /// # Returns
    ///
    /// * `Self` - The `Queue` instance
    #[inline]
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            buf: vec![T::default(); cap].into_boxed_slice(),
            front: 0,
            back: 0,
            len: 0,
        }
    }

    /// Returns true if the queue holds no elements
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of elements stored in the queue
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of elements the queue can hold before it grows
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Clears all elements, keeping the current capacity
    #[inline]
    pub fn reset(&mut self) -> &mut Self {
        self.buf.fill(T::default());
        self.front = 0;
        self.back = 0;
        self.len = 0;
        self
    }

    /// Appends `value` at the tail of the queue, growing the buffer if full
    ///
    /// # Arguments
    ///
    /// * `value` - The value to enqueue
    #[inline]
    pub fn enqueue(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow();
        }

        self.buf[self.back] = value;
        self.back = (self.back + 1) % self.capacity();
        self.len += 1;
    }

    /// Removes and returns the head of the queue
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The head element, or `None` if the queue is empty
    #[inline]
    pub fn dequeue(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = core::mem::take(&mut self.buf[self.front]);
        self.front = (self.front + 1) % self.capacity();
        self.len -= 1;

        Some(value)
    }

    fn grow(&mut self) {
        let old_cap = self.capacity();
        let new_cap = old_cap * 2;
        let mut buf = vec![T::default(); new_cap].into_boxed_slice();

        for (i, slot) in buf.iter_mut().take(self.len).enumerate() {
            let idx = (self.front + i) % old_cap;
            *slot = core::mem::take(&mut self.buf[idx]);
        }

        debug!("queue grew from {old_cap} to {new_cap} slots");

        self.buf = buf;
        self.front = 0;
        self.back = self.len;
    }
}
