//! API endpoint implementations.

mod messages;

pub use messages::MessagesApi;
