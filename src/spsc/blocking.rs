// Mutex-guarded baseline queue
//
// Same FIFO contract as the lock-free queue. Every operation holds the lock
// for its whole duration; the guard releases it on every return path.
use crate::{Consumer, Producer, SpscQueue};
use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc};

#[derive(Debug)]
pub struct BlockingQueue<T: Send> {
   items: Mutex<VecDeque<T>>,
}

impl<T: Send> BlockingQueue<T> {
   pub fn new() -> Self {
      Self { items: Mutex::new(VecDeque::new()) }
   }

   pub fn push(&self, item: T) {
      self.items.lock().push_back(item);
   }

   pub fn pop(&self) -> Option<T> {
      self.items.lock().pop_front()
   }

   pub fn is_empty(&self) -> bool {
      self.items.lock().is_empty()
   }

   pub fn len(&self) -> usize {
      self.items.lock().len()
   }
}

impl<T: Send> Default for BlockingQueue<T> {
   fn default() -> Self {
      Self::new()
   }
}

/*──────────────────────────── queue halves ────────────────────────────────*/

pub struct BlockingProducer<T: Send> {
   queue: Arc<BlockingQueue<T>>,
}

pub struct BlockingConsumer<T: Send> {
   queue: Arc<BlockingQueue<T>>,
}

impl<T: Send + 'static> SpscQueue<T> for BlockingQueue<T> {
   type Producer = BlockingProducer<T>;
   type Consumer = BlockingConsumer<T>;

   const NAME: &'static str = "Mutex Queue";

   fn split(self) -> (Self::Producer, Self::Consumer) {
      let queue = Arc::new(self);
      (
         BlockingProducer { queue: Arc::clone(&queue) },
         BlockingConsumer { queue },
      )
   }
}

impl<T: Send + 'static> Producer<T> for BlockingProducer<T> {
   #[inline]
   fn push(&mut self, item: T) {
      self.queue.push(item);
   }
}

impl<T: Send + 'static> Consumer<T> for BlockingConsumer<T> {
   #[inline]
   fn pop(&mut self) -> Option<T> {
      self.queue.pop()
   }

   #[inline]
   fn is_empty(&self) -> bool {
      self.queue.is_empty()
   }
}
