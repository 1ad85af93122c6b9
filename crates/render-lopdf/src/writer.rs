use lopdf::content::Content;
use lopdf::{Dictionary, Object, ObjectId, Stream, dictionary};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Writes a PDF one indirect object at a time.
///
/// Objects go to the underlying writer as soon as they are handed over, so the output can
/// be streamed. The page tree, shared resources, info and catalog are only known at the end
/// and are buffered under reserved ids until [`StreamingPdfWriter::finish`].
pub struct StreamingPdfWriter<W: Write> {
    writer: CountingWriter<W>,
    offsets: BTreeMap<u32, u64>,
    max_id: u32,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    info_id: Option<ObjectId>,
    buffered_objects: BTreeMap<ObjectId, Object>,
}

impl<W: Write> StreamingPdfWriter<W> {
    pub fn new(writer: W, version: &str) -> io::Result<Self> {
        let mut writer = CountingWriter::new(writer);
        writer.write_all(format!("%PDF-{}\n%\u{e2}\u{e3}\u{cf}\u{d3}\n", version).as_bytes())?;

        Ok(Self {
            writer,
            offsets: BTreeMap::new(),
            max_id: 3,
            resources_id: (1, 0),
            pages_id: (2, 0),
            catalog_id: (3, 0),
            info_id: None,
            buffered_objects: BTreeMap::new(),
        })
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.max_id += 1;
        (self.max_id, 0)
    }

    /// Writes `object` immediately under a fresh id.
    pub fn write_object(&mut self, object: Object) -> io::Result<ObjectId> {
        let id = self.new_object_id();
        self.write_indirect(id, &object)?;
        Ok(id)
    }

    pub fn write_content_stream(&mut self, content: Content) -> io::Result<ObjectId> {
        let bytes = content
            .encode()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        self.write_object(Object::Stream(Stream::new(dictionary! {}, bytes)))
    }

    pub fn set_resources(&mut self, resources: Dictionary) {
        self.buffered_objects
            .insert(self.resources_id, Object::Dictionary(resources));
    }

    pub fn set_info(&mut self, info: Dictionary) {
        let id = self.new_object_id();
        self.buffered_objects.insert(id, Object::Dictionary(info));
        self.info_id = Some(id);
    }

    /// Writes the page tree, catalog and cross-reference table and returns the writer.
    pub fn finish(mut self, page_ids: &[ObjectId]) -> io::Result<W> {
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => page_ids.len() as i64,
        };
        self.buffered_objects.insert(self.pages_id, pages_dict.into());
        self.buffered_objects
            .entry(self.resources_id)
            .or_insert_with(|| Object::Dictionary(Dictionary::new()));
        let catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        self.buffered_objects.insert(self.catalog_id, catalog_dict.into());

        for (id, object) in std::mem::take(&mut self.buffered_objects) {
            self.write_indirect(id, &object)?;
        }

        let xref_start = self.writer.position;
        self.write_xref()?;

        let mut trailer = dictionary! {
            "Size" => (self.max_id + 1) as i64,
            "Root" => self.catalog_id,
        };
        if let Some(info_id) = self.info_id {
            trailer.set("Info", info_id);
        }
        writeln!(self.writer, "trailer")?;
        serialize::write_dictionary(&mut self.writer, &trailer)?;
        writeln!(self.writer, "\nstartxref")?;
        writeln!(self.writer, "{}", xref_start)?;
        write!(self.writer, "%%EOF")?;

        self.writer.flush()?;
        Ok(self.writer.inner)
    }

    fn write_indirect(&mut self, id: ObjectId, object: &Object) -> io::Result<()> {
        self.offsets.insert(id.0, self.writer.position);
        writeln!(self.writer, "{} {} obj", id.0, id.1)?;
        serialize::write_object(&mut self.writer, object)?;
        writeln!(self.writer, "\nendobj")
    }

    /// One subsection covering every id up to the highest allocated. Ids that were reserved
    /// but never written are listed as free.
    fn write_xref(&mut self) -> io::Result<()> {
        writeln!(self.writer, "xref")?;
        writeln!(self.writer, "0 {}", self.max_id + 1)?;
        writeln!(self.writer, "0000000000 65535 f ")?;
        for id in 1..=self.max_id {
            match self.offsets.get(&id) {
                Some(offset) => writeln!(self.writer, "{:010} 00000 n ", offset)?,
                None => writeln!(self.writer, "0000000000 00000 f ")?,
            }
        }
        Ok(())
    }
}

/// Tracks the byte offset of everything written, for the cross-reference table.
struct CountingWriter<W: Write> {
    inner: W,
    position: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.position += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

mod serialize {
    use lopdf::{Dictionary, Object, StringFormat};
    use std::io::{self, Write};

    pub fn write_object(writer: &mut dyn Write, object: &Object) -> io::Result<()> {
        match object {
            Object::Null => writer.write_all(b"null"),
            Object::Boolean(b) => writer.write_all(if *b { b"true" } else { b"false" }),
            Object::Integer(i) => write!(writer, "{}", i),
            Object::Real(r) => write!(writer, "{:.3}", r),
            Object::Name(n) => {
                writer.write_all(b"/")?;
                writer.write_all(n)
            }
            Object::String(s, StringFormat::Literal) => {
                writer.write_all(b"(")?;
                for &byte in s {
                    match byte {
                        b'(' | b')' | b'\\' => writer.write_all(&[b'\\', byte])?,
                        b'\r' => writer.write_all(b"\\r")?,
                        b'\n' => writer.write_all(b"\\n")?,
                        _ => writer.write_all(&[byte])?,
                    }
                }
                writer.write_all(b")")
            }
            Object::String(s, StringFormat::Hexadecimal) => {
                writer.write_all(b"<")?;
                for byte in s {
                    write!(writer, "{:02X}", byte)?;
                }
                writer.write_all(b">")
            }
            Object::Array(items) => {
                writer.write_all(b"[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writer.write_all(b" ")?;
                    }
                    write_object(writer, item)?;
                }
                writer.write_all(b"]")
            }
            Object::Dictionary(dict) => write_dictionary(writer, dict),
            Object::Stream(stream) => {
                let mut dict = stream.dict.clone();
                dict.set("Length", stream.content.len() as i64);
                write_dictionary(writer, &dict)?;
                writer.write_all(b"\nstream\n")?;
                writer.write_all(&stream.content)?;
                writer.write_all(b"\nendstream")
            }
            Object::Reference(id) => write!(writer, "{} {} R", id.0, id.1),
        }
    }

    pub fn write_dictionary(writer: &mut dyn Write, dict: &Dictionary) -> io::Result<()> {
        writer.write_all(b"<<")?;
        for (key, value) in dict.iter() {
            writer.write_all(b"/")?;
            writer.write_all(key)?;
            writer.write_all(b" ")?;
            write_object(writer, value)?;
            writer.write_all(b" ")?;
        }
        writer.write_all(b">>")
    }
}
