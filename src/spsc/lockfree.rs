// Unbounded lock-free SPSC queue – linked list with a dummy head
//
// `head` always points at an already-consumed sentinel whose `next` is the
// oldest live value. The producer only ever touches `tail` and the node it
// points to; the consumer only ever touches `head` and the nodes reachable
// from it. A node crosses from one side to the other exactly once, at the
// release store into the previous node's `next`.
use crate::{Consumer, Producer, SpscQueue};
use crossbeam::utils::CachePadded;
use std::{
   ptr::null_mut,
   sync::{
      atomic::{AtomicPtr, Ordering},
      Arc,
   },
};

struct Node<T> {
   val : Option<T>,             // `None` only in the sentinel
   next: AtomicPtr<Node<T>>,
}

impl<T> Node<T> {
   fn sentinel() -> Box<Self> {
      Box::new(Node { val: None, next: AtomicPtr::new(null_mut()) })
   }

   fn with_value(val: T) -> Box<Self> {
      Box::new(Node { val: Some(val), next: AtomicPtr::new(null_mut()) })
   }
}

pub struct LockFreeQueue<T: Send> {
   head: CachePadded<AtomicPtr<Node<T>>>, // consumer side
   tail: CachePadded<AtomicPtr<Node<T>>>, // producer side
}

// Nodes are only reachable through the queue, and each side is driven by the
// single handle that owns it.
unsafe impl<T: Send> Send for LockFreeQueue<T> {}
unsafe impl<T: Send> Sync for LockFreeQueue<T> {}

impl<T: Send> LockFreeQueue<T> {
   pub fn new() -> Self {
      let dummy = Box::into_raw(Node::sentinel());
      Self {
         head: CachePadded::new(AtomicPtr::new(dummy)),
         tail: CachePadded::new(AtomicPtr::new(dummy)),
      }
   }

   /// # Safety
   /// Must only be called from the thread holding the producer half.
   unsafe fn push(&self, item: T) {
      let node = Box::into_raw(Node::with_value(item));

      // `tail` cannot be freed here: the consumer frees a node only after it
      // has observed that node's `next`, which is the store below.
      let tail = self.tail.load(Ordering::Acquire);
      (*tail).next.store(node, Ordering::Release);
      self.tail.store(node, Ordering::Release);
   }

   /// # Safety
   /// Must only be called from the thread holding the consumer half.
   unsafe fn pop(&self) -> Option<T> {
      let head = self.head.load(Ordering::Acquire);
      let next = (*head).next.load(Ordering::Acquire);
      if next.is_null() {
         return None;
      }

      // `next` becomes the new sentinel; its payload is ours from now on.
      let val = (*next).val.take();
      debug_assert!(val.is_some(), "linked node without a payload");
      self.head.store(next, Ordering::Release);

      // the producer finished with the old sentinel when it linked `next`
      drop(Box::from_raw(head));
      val
   }

   /// # Safety
   /// Must only be called from the thread holding the consumer half, since
   /// the head node is freed by `pop`.
   unsafe fn is_empty(&self) -> bool {
      let head = self.head.load(Ordering::Acquire);
      (*head).next.load(Ordering::Acquire).is_null()
   }
}

impl<T: Send> Default for LockFreeQueue<T> {
   fn default() -> Self {
      Self::new()
   }
}

impl<T: Send> Drop for LockFreeQueue<T> {
   fn drop(&mut self) {
      // both halves are gone, so walk from the sentinel and free everything
      let mut cur = *self.head.get_mut();
      while !cur.is_null() {
         let mut node = unsafe { Box::from_raw(cur) };
         cur = *node.next.get_mut();
      }
   }
}

/*──────────────────────────── queue halves ────────────────────────────────*/

pub struct LockFreeProducer<T: Send> {
   queue: Arc<LockFreeQueue<T>>,
}

pub struct LockFreeConsumer<T: Send> {
   queue: Arc<LockFreeQueue<T>>,
}

impl<T: Send + 'static> SpscQueue<T> for LockFreeQueue<T> {
   type Producer = LockFreeProducer<T>;
   type Consumer = LockFreeConsumer<T>;

   const NAME: &'static str = "Lock-Free SPSC";

   fn split(self) -> (Self::Producer, Self::Consumer) {
      let queue = Arc::new(self);
      (
         LockFreeProducer { queue: Arc::clone(&queue) },
         LockFreeConsumer { queue },
      )
   }
}

impl<T: Send + 'static> Producer<T> for LockFreeProducer<T> {
   #[inline]
   fn push(&mut self, item: T) {
      // one producer handle per queue, and it is borrowed mutably
      unsafe { self.queue.push(item) }
   }
}

impl<T: Send + 'static> Consumer<T> for LockFreeConsumer<T> {
   #[inline]
   fn pop(&mut self) -> Option<T> {
      unsafe { self.queue.pop() }
   }

   #[inline]
   fn is_empty(&self) -> bool {
      unsafe { self.queue.is_empty() }
   }
}
