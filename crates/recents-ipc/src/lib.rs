//! Wire protocol between the overlay and the out-of-process recents helper.
//!
//! One request per connection, newline-delimited JSON in both directions.

pub mod client;
pub mod protocol;
pub mod server;

pub use client::RecentsClient;
pub use protocol::{Reply, Request};
pub use server::{bind, serve};
