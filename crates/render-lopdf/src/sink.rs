use folio_render_core::RenderEvent;
use std::io::{self, Write};
use tokio::sync::mpsc::Sender;

/// Forwards written bytes to a render channel in fixed-size chunks.
///
/// Must be used off the async runtime: sending blocks while the channel is full. A dropped
/// receiver surfaces as [`io::ErrorKind::BrokenPipe`].
pub struct ChannelWriter {
    tx: Sender<RenderEvent>,
    buffer: Vec<u8>,
    chunk_size: usize,
}

impl ChannelWriter {
    pub fn new(tx: Sender<RenderEvent>, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            tx,
            buffer: Vec::with_capacity(chunk_size),
            chunk_size,
        }
    }

    fn send(&mut self, chunk: Vec<u8>) -> io::Result<()> {
        self.tx
            .blocking_send(RenderEvent::Data(chunk))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "render stream receiver dropped"))
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        while self.buffer.len() >= self.chunk_size {
            let rest = self.buffer.split_off(self.chunk_size);
            let chunk = std::mem::replace(&mut self.buffer, rest);
            self.send(chunk)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let chunk = std::mem::take(&mut self.buffer);
        self.send(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn writes_are_split_into_chunks() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut writer = ChannelWriter::new(tx, 4);
        writer.write_all(b"0123456789").unwrap();
        writer.flush().unwrap();
        drop(writer);

        let mut chunks = Vec::new();
        while let Some(RenderEvent::Data(chunk)) = rx.blocking_recv() {
            chunks.push(chunk);
        }
        assert_eq!(chunks, vec![b"0123".to_vec(), b"4567".to_vec(), b"89".to_vec()]);
    }

    #[test]
    fn dropped_receiver_is_a_broken_pipe() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let mut writer = ChannelWriter::new(tx, 2);
        let err = writer.write_all(b"abc").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
