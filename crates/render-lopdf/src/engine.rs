use crate::document::render_document;
use crate::fonts::FontBook;
use crate::sink::ChannelWriter;
use folio_render_core::{EngineConfig, LayoutEngine, RenderError, RenderEvent, RenderStream};
use folio_types::AssembledDocument;
use std::io::{ErrorKind, Write};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Layout engine writing PDF with `lopdf`.
///
/// Each call to [`LayoutEngine::render`] lays the document out on a blocking task and
/// streams the encoded bytes back as they are written. Fonts under
/// [`EngineConfig::font_paths`] are read once, when the engine is built.
#[derive(Debug, Clone)]
pub struct LopdfLayoutEngine {
    config: EngineConfig,
    fonts: Arc<FontBook>,
}

impl Default for LopdfLayoutEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl LopdfLayoutEngine {
    pub fn new(config: EngineConfig) -> Self {
        let fonts = FontBook::load(&config.font_paths, &config.default_font);
        Self {
            config,
            fonts: Arc::new(fonts),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl LayoutEngine for LopdfLayoutEngine {
    fn render(&self, document: AssembledDocument) -> RenderStream {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));
        let config = self.config.clone();
        let fonts = Arc::clone(&self.fonts);
        let job = move || run(document, config, fonts, tx);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(job);
            }
            Err(_) => {
                std::thread::spawn(job);
            }
        }
        rx
    }

    fn name(&self) -> &'static str {
        "lopdf"
    }
}

fn run(
    document: AssembledDocument,
    config: EngineConfig,
    fonts: Arc<FontBook>,
    tx: mpsc::Sender<RenderEvent>,
) {
    let sink = ChannelWriter::new(tx.clone(), config.chunk_size);
    let result = render_document(&document, &config, &fonts, sink).and_then(|mut sink| {
        sink.flush()?;
        Ok(())
    });
    let event = match result {
        Ok(()) => RenderEvent::End,
        Err(RenderError::Io(e)) if e.kind() == ErrorKind::BrokenPipe => {
            log::debug!("Render stream receiver went away; stopping");
            return;
        }
        Err(e) => {
            log::error!("Rendering failed: {}", e);
            RenderEvent::Error(e)
        }
    };
    if tx.blocking_send(event).is_err() {
        log::debug!("Render stream receiver went away before completion was reported");
    }
}
