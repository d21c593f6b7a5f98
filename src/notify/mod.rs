//! Change notification for option stores.

mod subscriber;

pub use subscriber::{ChangeNotifier, ChangedSubscriber, ErroredSubscriber};
