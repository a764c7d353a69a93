use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::TcpStream;

use thiserror::Error;

/// Largest message a [`BufferedMessenger`] reads in one go.
pub const BUFFERED_MESSAGE_SIZE: usize = 512;

/// Transport for whole protocol messages, without framing.
pub trait Messenger {
    fn send(&mut self, message: &str) -> Result<(), ProtocolError>;

    /// Blocks until the next message arrives.
    fn recv(&mut self) -> Result<String, ProtocolError>;
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("connection closed by server")]
    Closed,
    #[error("message is not valid utf-8")]
    Encoding,
}

/// Newline-terminated messages.
pub struct LineMessenger<R, W> {
    reader: R,
    writer: W,
}

impl LineMessenger<BufReader<TcpStream>, TcpStream> {
    pub fn connect(stream: TcpStream) -> io::Result<Self> {
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self::new(reader, stream))
    }
}

impl<R: BufRead, W: Write> LineMessenger<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Messenger for LineMessenger<R, W> {
    fn send(&mut self, message: &str) -> Result<(), ProtocolError> {
        self.writer.write_all(message.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn recv(&mut self) -> Result<String, ProtocolError> {
        let mut raw = Vec::new();
        if self.reader.read_until(b'\n', &mut raw)? == 0 {
            return Err(ProtocolError::Closed);
        }
        let line = String::from_utf8(raw).map_err(|_| ProtocolError::Encoding)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// One read per message, no terminator.
pub struct BufferedMessenger<R, W> {
    reader: R,
    writer: W,
}

impl BufferedMessenger<TcpStream, TcpStream> {
    pub fn connect(stream: TcpStream) -> io::Result<Self> {
        let reader = stream.try_clone()?;
        Ok(Self::new(reader, stream))
    }
}

impl<R: Read, W: Write> BufferedMessenger<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: Read, W: Write> Messenger for BufferedMessenger<R, W> {
    fn send(&mut self, message: &str) -> Result<(), ProtocolError> {
        self.writer.write_all(message.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn recv(&mut self) -> Result<String, ProtocolError> {
        let mut buf = [0u8; BUFFERED_MESSAGE_SIZE];
        let read = self.reader.read(&mut buf)?;
        if read == 0 {
            return Err(ProtocolError::Closed);
        }
        let message = std::str::from_utf8(&buf[..read]).map_err(|_| ProtocolError::Encoding)?;
        Ok(message.trim().to_string())
    }
}
