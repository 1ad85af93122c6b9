use lopdf::Document as LopdfDocument;
use lopdf::content::Content;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// The strings shown on a page (1-based), one entry per text line, in drawing order.
    pub fn page_texts(&self, page: u32) -> Vec<String> {
        let pages = self.doc.get_pages();
        let Some(id) = pages.get(&page) else {
            return Vec::new();
        };
        let Ok(content) = self.doc.get_page_content(*id) else {
            return Vec::new();
        };
        let Ok(content) = Content::decode(&content) else {
            return Vec::new();
        };
        content
            .operations
            .into_iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first().and_then(|o| o.as_str().ok()).map(|s| String::from_utf8_lossy(s).into_owned()))
            .collect()
    }

    pub fn all_texts(&self) -> Vec<String> {
        (1..=self.page_count() as u32)
            .flat_map(|page| self.page_texts(page))
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.all_texts().iter().any(|t| t.contains(needle))
    }

    /// Width and height of a page's media box.
    pub fn page_size(&self, page: u32) -> Option<(f32, f32)> {
        let id = *self.doc.get_pages().get(&page)?;
        let media_box = self.doc.get_dictionary(id).ok()?.get(b"MediaBox").ok()?.as_array().ok()?;
        let number = |i: usize| media_box.get(i).and_then(|o| o.as_float().ok());
        Some((number(2)?, number(3)?))
    }

    /// Count of image XObjects (soft masks excluded).
    pub fn image_count(&self) -> usize {
        self.doc
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .filter(|s| {
                s.dict.get(b"Subtype").and_then(|v| v.as_name()).ok() == Some(b"Image".as_slice())
                    && s.dict.get(b"ColorSpace").and_then(|v| v.as_name()).ok() != Some(b"DeviceGray".as_slice())
            })
            .count()
    }

    /// A string from the document information dictionary.
    pub fn info(&self, key: &str) -> Option<String> {
        let info = self.doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
        let dict = self.doc.get_dictionary(info).ok()?;
        let value = dict.get(key.as_bytes()).ok()?.as_str().ok()?;
        Some(String::from_utf8_lossy(value).into_owned())
    }
}
