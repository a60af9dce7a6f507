pub mod notify;
pub mod timer;

pub use notify::{notify_all, notify_one, wake_channel, WakeListener, WakeSender};
pub use timer::{random_timeout, ElectionTimer, TimeoutEvent, TIMEOUT_SPREAD};
