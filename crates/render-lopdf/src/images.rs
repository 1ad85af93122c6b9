//! Image XObjects.
//!
//! Images arrive as base64 data URLs. JPEG data in gray or RGB is embedded as is; anything
//! else is decoded and stored as 8-bit RGB, with transparency in a separate soft mask.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use folio_render_core::RenderError;
use image::codecs::jpeg::JpegDecoder;
use image::{ColorType, ImageDecoder, ImageFormat};
use lopdf::{Dictionary, Stream, dictionary};
use std::collections::HashMap;
use std::io::Cursor;

/// Handle to an embedded image, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// An image ready to be written, with its optional soft mask.
#[derive(Debug)]
pub struct EncodedImage {
    pub name: String,
    pub image: Stream,
    pub mask: Option<Stream>,
}

/// Decodes each distinct image once per document.
#[derive(Debug, Default)]
pub struct ImageStore {
    compress: bool,
    loaded: HashMap<String, Option<ImageInfo>>,
    encoded: Vec<EncodedImage>,
}

impl ImageStore {
    pub fn new(compress: bool) -> Self {
        Self {
            compress,
            ..Self::default()
        }
    }

    /// Returns `None`, after logging, when the data cannot be decoded.
    pub fn load(&mut self, data_url: &str) -> Option<ImageInfo> {
        if let Some(cached) = self.loaded.get(data_url) {
            return cached.clone();
        }
        let name = format!("Im{}", self.encoded.len() + 1);
        let result = decode_data_url(data_url).and_then(|bytes| self.encode(name, &bytes));
        let info = match result {
            Ok((info, encoded)) => {
                self.encoded.push(encoded);
                Some(info)
            }
            Err(e) => {
                log::warn!("Skipping image: {}", e);
                None
            }
        };
        self.loaded.insert(data_url.to_string(), info.clone());
        info
    }

    pub fn into_encoded(self) -> Vec<EncodedImage> {
        self.encoded
    }

    fn encode(&self, name: String, bytes: &[u8]) -> Result<(ImageInfo, EncodedImage), RenderError> {
        if image::guess_format(bytes).ok() == Some(ImageFormat::Jpeg)
            && let Some(passthrough) = jpeg_passthrough(bytes)
        {
            let (width, height, image) = passthrough;
            let info = ImageInfo { name: name.clone(), width, height };
            return Ok((info, EncodedImage { name, image, mask: None }));
        }

        let decoded = image::load_from_memory(bytes).map_err(|e| image_error(bytes, e))?;
        let (width, height) = (decoded.width(), decoded.height());
        let (rgb, mask) = if decoded.color().has_alpha() {
            let rgba = decoded.to_rgba8().into_raw();
            let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
            let mut alpha = Vec::with_capacity(rgba.len() / 4);
            for pixel in rgba.chunks_exact(4) {
                rgb.extend_from_slice(&pixel[..3]);
                alpha.push(pixel[3]);
            }
            let opaque = alpha.iter().all(|a| *a == u8::MAX);
            (rgb, (!opaque).then_some(alpha))
        } else {
            (decoded.to_rgb8().into_raw(), None)
        };

        let image = self.raw_stream(width, height, "DeviceRGB", rgb);
        let mask = mask.map(|alpha| self.raw_stream(width, height, "DeviceGray", alpha));
        let info = ImageInfo { name: name.clone(), width, height };
        Ok((info, EncodedImage { name, image, mask }))
    }

    fn raw_stream(&self, width: u32, height: u32, color_space: &str, data: Vec<u8>) -> Stream {
        let mut dict = image_dict(width, height, color_space);
        if self.compress {
            dict.set("Filter", "FlateDecode");
            Stream::new(dict, miniz_oxide::deflate::compress_to_vec_zlib(&data, 6))
        } else {
            Stream::new(dict, data)
        }
    }
}

fn jpeg_passthrough(bytes: &[u8]) -> Option<(u32, u32, Stream)> {
    let decoder = JpegDecoder::new(Cursor::new(bytes)).ok()?;
    let color_space = match decoder.color_type() {
        ColorType::L8 => "DeviceGray",
        ColorType::Rgb8 => "DeviceRGB",
        _ => return None,
    };
    let (width, height) = decoder.dimensions();
    let mut dict = image_dict(width, height, color_space);
    dict.set("Filter", "DCTDecode");
    Some((width, height, Stream::new(dict, bytes.to_vec())))
}

fn image_dict(width: u32, height: u32, color_space: &str) -> Dictionary {
    dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width as i64,
        "Height" => height as i64,
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8,
    }
}

fn decode_data_url(url: &str) -> Result<Vec<u8>, RenderError> {
    let malformed = |message: &str| RenderError::Image {
        source_ref: preview(url),
        message: message.to_string(),
    };
    let (meta, payload) = url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(|| malformed("not a data URL"))?;
    if !meta.ends_with(";base64") {
        return Err(malformed("data URL is not base64 encoded"));
    }
    let payload: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(payload)
        .map_err(|e| malformed(&e.to_string()))
}

fn image_error(bytes: &[u8], e: image::ImageError) -> RenderError {
    RenderError::Image {
        source_ref: format!("{} bytes", bytes.len()),
        message: e.to_string(),
    }
}

/// Start of a data URL, short enough for a log line.
fn preview(url: &str) -> String {
    match url.char_indices().nth(40) {
        Some((i, _)) => format!("{}...", &url[..i]),
        None => url.to_string(),
    }
}
