mod lockfree;
mod blocking;

pub use lockfree::{LockFreeConsumer, LockFreeProducer, LockFreeQueue};
pub use blocking::{BlockingConsumer, BlockingProducer, BlockingQueue};
