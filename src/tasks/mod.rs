//! Background Tasks Module
//!
//! Contains the change-notification drain task behind the store's listen
//! subscription.

mod listener;

pub use listener::spawn_listener_task;
