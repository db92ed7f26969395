//! Push fan-out: subscriber registry and snapshot broadcaster

pub mod broadcaster;
pub mod registry;

pub use broadcaster::Broadcaster;
pub use registry::{SubscriberId, SubscriberRegistry, Subscription};
