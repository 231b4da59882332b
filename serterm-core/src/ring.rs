//! Fixed-capacity single-producer/single-consumer FIFOs
//!
//! Three of these decouple the contexts of the terminal:
//!
//! - RX bytes: produced by the UART receive interrupt, consumed by the loop
//! - TX bytes: produced by the mode controller, drained to the UART
//! - Key tokens: produced by keyboard decoding, consumed by the mode controller
//!
//! # Overflow
//!
//! A full buffer drops the *incoming* item. Items already queued and the
//! indices stay intact; the producer never blocks.
//!
//! # Memory visibility
//!
//! Storage is a `heapless::spsc::Queue`. The producer writes the slot and
//! then publishes the new write index with release ordering; the consumer
//! reads the index with acquire ordering before touching the slot (and the
//! reverse for the read index). A consumer therefore never observes a torn
//! or half-written entry, even when the producer is an interrupt handler
//! that preempts it. Only one producer and one consumer may exist at a
//! time, which [`RingBuffer::split`] enforces through the borrow checker.
//!
//! # Capacity
//!
//! The buffer is full when the write index's successor equals the read
//! index, so `N` slots hold at most `N - 1` items.

use heapless::spsc::{Consumer, Producer, Queue};

/// Slots in the receive buffer
pub const RX_QUEUE_SLOTS: usize = 1000;

/// Slots in the transmit buffer
pub const TX_QUEUE_SLOTS: usize = 100;

/// Slots in the decoded key token buffer
pub const KEY_QUEUE_SLOTS: usize = 32;

/// Circular FIFO with `N` slots
pub struct RingBuffer<T, const N: usize> {
    queue: Queue<T, N>,
}

impl<T, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> RingBuffer<T, N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            queue: Queue::new(),
        }
    }

    /// Maximum number of items held at once
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Append an item
    ///
    /// Returns `false`, discarding the item, if the buffer is full.
    pub fn try_push(&mut self, item: T) -> bool {
        self.queue.enqueue(item).is_ok()
    }

    /// Remove the oldest item
    pub fn try_pop(&mut self) -> Option<T> {
        self.queue.dequeue()
    }

    /// Look at the oldest item without removing it
    pub fn peek(&self) -> Option<&T> {
        self.queue.peek()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Split into a producer and a consumer half
    ///
    /// The halves may live in different execution contexts (e.g. the
    /// producer in an interrupt handler). With a `'static` buffer the halves
    /// are `'static` as well.
    pub fn split(&mut self) -> (RingProducer<'_, T, N>, RingConsumer<'_, T, N>) {
        let (producer, consumer) = self.queue.split();
        (RingProducer { inner: producer }, RingConsumer { inner: consumer })
    }
}

/// Producer half of a [`RingBuffer`]
pub struct RingProducer<'a, T, const N: usize> {
    inner: Producer<'a, T, N>,
}

impl<'a, T, const N: usize> RingProducer<'a, T, N> {
    /// Append an item, dropping it if the buffer is full
    pub fn try_push(&mut self, item: T) -> bool {
        self.inner.enqueue(item).is_ok()
    }

    /// Check if there is room for another item
    pub fn has_room(&self) -> bool {
        self.inner.ready()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }
}

/// Consumer half of a [`RingBuffer`]
pub struct RingConsumer<'a, T, const N: usize> {
    inner: Consumer<'a, T, N>,
}

impl<'a, T, const N: usize> RingConsumer<'a, T, N> {
    /// Remove the oldest item
    pub fn try_pop(&mut self) -> Option<T> {
        self.inner.dequeue()
    }

    /// Look at the oldest item without removing it
    pub fn peek(&self) -> Option<&T> {
        self.inner.peek()
    }

    pub fn is_empty(&self) -> bool {
        !self.inner.ready()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_fifo() {
        let mut ring: RingBuffer<u8, 4> = RingBuffer::new();
        assert!(ring.is_empty());

        assert!(ring.try_push(1));
        assert!(ring.try_push(2));
        assert_eq!(ring.len(), 2);

        assert_eq!(ring.try_pop(), Some(1));
        assert_eq!(ring.try_pop(), Some(2));
        assert_eq!(ring.try_pop(), None);
    }

    #[test]
    fn test_full_drops_newest() {
        let mut ring: RingBuffer<u8, 4> = RingBuffer::new();
        assert_eq!(ring.capacity(), 3);

        assert!(ring.try_push(10));
        assert!(ring.try_push(11));
        assert!(ring.try_push(12));
        assert!(ring.is_full());
        assert!(!ring.try_push(13));

        assert_eq!(ring.try_pop(), Some(10));
        assert_eq!(ring.try_pop(), Some(11));
        assert_eq!(ring.try_pop(), Some(12));
        assert!(ring.is_empty());
    }

    #[test]
    fn test_wraparound_keeps_order() {
        let mut ring: RingBuffer<u8, 4> = RingBuffer::new();
        for round in 0..10u8 {
            assert!(ring.try_push(round));
            assert!(ring.try_push(round.wrapping_add(100)));
            assert_eq!(ring.try_pop(), Some(round));
            assert_eq!(ring.try_pop(), Some(round.wrapping_add(100)));
        }
        assert!(ring.is_empty());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut ring: RingBuffer<u8, 4> = RingBuffer::new();
        ring.try_push(7);
        assert_eq!(ring.peek(), Some(&7));
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.try_pop(), Some(7));
    }

    #[test]
    fn test_split_halves() {
        let mut ring: RingBuffer<u8, 3> = RingBuffer::new();
        let (mut producer, mut consumer) = ring.split();

        assert!(consumer.is_empty());
        assert!(producer.try_push(b'a'));
        assert!(producer.try_push(b'b'));
        assert!(!producer.has_room());
        assert!(!producer.try_push(b'c'));

        assert_eq!(consumer.len(), 2);
        assert_eq!(consumer.peek(), Some(&b'a'));
        assert_eq!(consumer.try_pop(), Some(b'a'));
        assert!(producer.has_room());
        assert_eq!(consumer.try_pop(), Some(b'b'));
        assert!(consumer.is_empty());
        assert!(producer.is_empty());
    }
}
