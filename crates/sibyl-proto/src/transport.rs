//! Framed line transport over TCP.
//!
//! The session loop consumes the transport abstractly through
//! [`LineTransport`]: read one line, write one line. [`Transport`] is the
//! TCP implementation; tests and embedders can substitute their own.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::warn;

use crate::error::ProtocolError;
use crate::line::LineCodec;

/// A persistent, line-oriented, readable and writable byte stream.
#[async_trait]
pub trait LineTransport: Send {
    /// Read the next line, CR/LF stripped. `Ok(None)` means the peer
    /// closed the connection.
    async fn read_line(&mut self) -> Result<Option<String>, ProtocolError>;

    /// Write one line; framing appends the CR-LF terminator.
    async fn write_line(&mut self, line: &str) -> Result<(), ProtocolError>;
}

/// Line transport over a plain TCP connection.
pub struct Transport {
    framed: Framed<TcpStream, LineCodec>,
}

impl Transport {
    /// Connect to `host:port` and frame the stream with [`LineCodec`].
    pub async fn connect(host: &str, port: u16) -> Result<Self, std::io::Error> {
        let stream = TcpStream::connect((host, port)).await?;
        Ok(Self::from_stream(stream))
    }

    /// Frame an already-connected stream.
    pub fn from_stream(stream: TcpStream) -> Self {
        if let Err(e) = Self::enable_keepalive(&stream) {
            warn!(error = %e, "failed to enable TCP keepalive");
        }

        Self {
            framed: Framed::new(stream, LineCodec::new()),
        }
    }

    fn enable_keepalive(stream: &TcpStream) -> Result<(), std::io::Error> {
        use socket2::{SockRef, TcpKeepalive};
        use std::time::Duration;

        let sock = SockRef::from(stream);
        let keepalive = TcpKeepalive::new()
            .with_time(Duration::from_secs(120))
            .with_interval(Duration::from_secs(30));

        sock.set_tcp_keepalive(&keepalive)?;
        Ok(())
    }
}

#[async_trait]
impl LineTransport for Transport {
    async fn read_line(&mut self) -> Result<Option<String>, ProtocolError> {
        match self.framed.next().await {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    async fn write_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        self.framed.send(line.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_read_write_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            sock.write_all(b"PING :greeting\r\n").await.unwrap();

            let mut buf = [0u8; 64];
            let n = tokio::io::AsyncReadExt::read(&mut sock, &mut buf)
                .await
                .unwrap();
            buf[..n].to_vec()
        });

        let mut transport = Transport::connect("127.0.0.1", addr.port()).await.unwrap();

        let line = transport.read_line().await.unwrap();
        assert_eq!(line.as_deref(), Some("PING :greeting"));

        transport.write_line("PONG :greeting").await.unwrap();
        drop(transport);

        let received = server.await.unwrap();
        assert_eq!(&received, b"PONG :greeting\r\n");
    }

    #[tokio::test]
    async fn test_read_line_none_on_eof() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (sock, _) = listener.accept().await.unwrap();
            drop(sock);
        });

        let mut transport = Transport::connect("127.0.0.1", addr.port()).await.unwrap();
        assert!(transport.read_line().await.unwrap().is_none());
    }
}
