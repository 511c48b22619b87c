#![cfg(feature = "std")]

//! Length-prefixed bincode frames over TCP.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::Message;
use crate::transport::{MessageSink, MessageStream, Transport};

/// Timeout applied to outbound writes. Reads wait indefinitely: a stalled
/// player just leaves the match idle, idle policy is not the wire's job.
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Frame-size cap to keep a hostile peer from forcing huge allocations.
const MAX_FRAME_SIZE: u32 = 1_000_000;

async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, msg: &Message) -> anyhow::Result<()> {
    let data = bincode::serialize(msg).map_err(|e| anyhow::anyhow!("encode error: {}", e))?;
    if data.len() as u32 > MAX_FRAME_SIZE {
        return Err(anyhow::anyhow!(
            "frame too large: {} bytes (max {})",
            data.len(),
            MAX_FRAME_SIZE
        ));
    }
    writer.write_all(&(data.len() as u32).to_be_bytes()).await?;
    writer.write_all(&data).await?;
    Ok(())
}

async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> anyhow::Result<Message> {
    let mut len_buf = [0u8; 4];
    reader
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| anyhow::anyhow!("connection closed: {}", e))?;
    let len = u32::from_be_bytes(len_buf);
    if len == 0 || len > MAX_FRAME_SIZE {
        return Err(anyhow::anyhow!("invalid frame length: {}", len));
    }
    let mut buf = vec![0u8; len as usize];
    reader
        .read_exact(&mut buf)
        .await
        .map_err(|e| anyhow::anyhow!("connection closed: {}", e))?;
    bincode::deserialize(&buf).map_err(|e| anyhow::anyhow!("decode error: {}", e))
}

pub struct TcpTransport {
    stream: TcpStream,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self { stream }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        Ok(Self::new(TcpStream::connect(addr).await?))
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        timeout(SEND_TIMEOUT, write_frame(&mut self.stream, &msg))
            .await
            .map_err(|_| anyhow::anyhow!("send timeout after {:?}", SEND_TIMEOUT))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        read_frame(&mut self.stream).await
    }

    fn split(self: Box<Self>) -> (Box<dyn MessageSink>, Box<dyn MessageStream>) {
        let (reader, writer) = self.stream.into_split();
        (
            Box::new(TcpSink { writer }),
            Box::new(TcpSource { reader }),
        )
    }
}

struct TcpSink {
    writer: OwnedWriteHalf,
}

#[async_trait::async_trait]
impl MessageSink for TcpSink {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        timeout(SEND_TIMEOUT, write_frame(&mut self.writer, &msg))
            .await
            .map_err(|_| anyhow::anyhow!("send timeout after {:?}", SEND_TIMEOUT))?
    }
}

struct TcpSource {
    reader: OwnedReadHalf,
}

#[async_trait::async_trait]
impl MessageStream for TcpSource {
    async fn recv(&mut self) -> anyhow::Result<Message> {
        read_frame(&mut self.reader).await
    }
}
