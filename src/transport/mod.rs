#![cfg(feature = "std")]

//! Message transports. The lobby server and its clients exchange
//! [`Message`] frames; implementations only move frames, all game
//! semantics live behind the lobby.

use crate::protocol::Message;

/// A bidirectional frame pipe.
#[async_trait::async_trait]
pub trait Transport: Send {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Message>;

    /// Split into independently owned halves so a server can forward
    /// broadcasts while a reader task blocks on incoming frames.
    fn split(self: Box<Self>) -> (Box<dyn MessageSink>, Box<dyn MessageStream>);
}

/// Write half of a split transport.
#[async_trait::async_trait]
pub trait MessageSink: Send {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
}

/// Read half of a split transport.
#[async_trait::async_trait]
pub trait MessageStream: Send {
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

pub mod in_memory;
pub mod tcp;
