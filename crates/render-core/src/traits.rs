use crate::error::RenderError;
use folio_types::AssembledDocument;
use tokio::sync::mpsc;

/// One step of a render, pushed by the engine as output becomes available.
#[derive(Debug)]
pub enum RenderEvent {
    /// The next chunk of the encoded document.
    Data(Vec<u8>),
    /// The document is complete. No further events follow.
    End,
    /// Rendering failed. No further events follow.
    Error(RenderError),
}

pub type RenderStream = mpsc::Receiver<RenderEvent>;

/// Turns an assembled document into an encoded byte stream.
///
/// Implementations start work immediately and return the receiving end of a bounded
/// channel. A stream that closes without [`RenderEvent::End`] is a failed render.
pub trait LayoutEngine: Send + Sync + std::fmt::Debug {
    fn render(&self, document: AssembledDocument) -> RenderStream;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Drains a render stream into one buffer.
pub async fn collect(mut stream: RenderStream) -> Result<Vec<u8>, RenderError> {
    let mut buffer = Vec::new();
    while let Some(event) = stream.recv().await {
        match event {
            RenderEvent::Data(chunk) => buffer.extend_from_slice(&chunk),
            RenderEvent::End => return Ok(buffer),
            RenderEvent::Error(e) => return Err(e),
        }
    }
    Err(RenderError::ChannelClosed)
}
