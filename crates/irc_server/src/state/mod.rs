pub mod channel;
pub mod client;
pub mod server;

pub use channel::Channel;
pub use client::{Client, ClientId};
pub use server::Server;
