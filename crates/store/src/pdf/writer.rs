//! PDF Writer
//!
//! File structure (header, body, xref, trailer), object numbering and
//! stream compression.

use super::content::ContentStream;
use super::document::{create_catalog, create_pages, DocumentInfo, PdfVersion};
use super::images::ImageManager;
use super::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use super::options::PdfExportOptions;
use super::renderer::PdfRenderer;
use crate::{PdfError, Result};
use render_model::RenderModel;
use std::io::Write;

/// Low-level PDF file writer tracking byte offsets for the xref table
pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    /// (object number, byte offset)
    offsets: Vec<(u32, u64)>,
    next_obj_num: u32,
    version: PdfVersion,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W, version: PdfVersion) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            next_obj_num: 1,
            version,
            compress: true,
        }
    }

    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.write_str(&format!("%PDF-{}\n", self.version.as_str()))?;
        // Binary marker so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> Result<()> {
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(object)?;
        self.write_indirect(obj_num, &serializer.into_inner())
    }

    /// Write a stream object, compressing it when enabled
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.compressed {
            stream = compress_stream(stream)?;
        }
        stream.dict.insert("Length", stream.data.len() as i64);

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_stream(&stream)?;
        self.write_indirect(obj_num, &serializer.into_inner())
    }

    fn write_indirect(&mut self, obj_num: u32, body: &[u8]) -> Result<()> {
        self.offsets.push((obj_num, self.position));
        self.write_str(&format!("{} 0 obj\n", obj_num))?;
        self.write_bytes(body)?;
        self.write_str("\nendobj\n")
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: u32) -> Result<()> {
        let xref_offset = self.position;
        let size = self.next_obj_num;

        let mut offsets = std::mem::take(&mut self.offsets);
        offsets.sort_by_key(|(num, _)| *num);

        let mut table = format!("xref\n0 {}\n0000000000 65535 f \n", size);
        let mut expected = 1u32;
        for (num, offset) in &offsets {
            while expected < *num {
                table.push_str("0000000000 65535 f \n");
                expected += 1;
            }
            table.push_str(&format!("{:010} 00000 n \n", offset));
            expected = num + 1;
        }
        while expected < size {
            table.push_str("0000000000 65535 f \n");
            expected += 1;
        }
        self.write_str(&table)?;

        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", size as i64);
        trailer.insert("Root", PdfObject::reference(catalog_ref));
        trailer.insert("Info", PdfObject::reference(info_ref));

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&trailer.into())?;
        self.write_str("trailer\n")?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str(&format!("\nstartxref\n{}\n%%EOF\n", xref_offset))?;

        self.offsets = offsets;
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Compress a stream using flate compression
fn compress_stream(mut stream: PdfStream) -> Result<PdfStream> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&stream.data)
        .map_err(|e| PdfError::Compression(e.to_string()))?;
    stream.data = encoder
        .finish()
        .map_err(|e| PdfError::Compression(e.to_string()))?;
    stream.compressed = true;
    stream.dict.insert("Filter", PdfObject::name("FlateDecode"));
    Ok(stream)
}

/// High-level PDF document writer
pub struct PdfDocumentWriter {
    options: PdfExportOptions,
}

impl PdfDocumentWriter {
    pub fn new(options: PdfExportOptions) -> Self {
        Self { options }
    }

    /// Write a complete PDF document for a render model
    pub fn write<W: Write>(&self, model: &RenderModel, writer: W) -> Result<()> {
        if model.pages.is_empty() {
            return Err(PdfError::InvalidDocument("No pages to export".to_string()));
        }

        let images = ImageManager::from_images(&model.images)?;
        let mut renderer = PdfRenderer::new(&images);

        // Render every page first so the font set is known
        let contents: Vec<ContentStream> = model
            .pages
            .iter()
            .map(|page| renderer.render_page(page))
            .collect::<Result<_>>()?;

        let mut pdf = PdfWriter::new(writer, PdfVersion::default());
        pdf.set_compression(self.options.compress);
        pdf.write_header()?;

        let catalog_ref = pdf.allocate_object();
        let pages_ref = pdf.allocate_object();
        let info_ref = pdf.allocate_object();

        let font_refs: Vec<(String, u32)> = renderer
            .font_manager()
            .fonts()
            .iter()
            .map(|font| (font.name.clone(), pdf.allocate_object()))
            .collect();
        let image_refs: Vec<(String, u32)> = images
            .images()
            .iter()
            .map(|image| (image.name.clone(), pdf.allocate_object()))
            .collect();
        let page_refs: Vec<(u32, u32)> = contents
            .iter()
            .map(|_| (pdf.allocate_object(), pdf.allocate_object()))
            .collect();

        pdf.write_object(catalog_ref, &create_catalog(pages_ref).into())?;
        let kids: Vec<u32> = page_refs.iter().map(|(page, _)| *page).collect();
        pdf.write_object(pages_ref, &create_pages(&kids).into())?;
        pdf.write_object(
            info_ref,
            &DocumentInfo::from_options(&self.options).to_dictionary().into(),
        )?;

        for (font, (_, font_ref)) in renderer.font_manager().fonts().iter().zip(&font_refs) {
            pdf.write_object(*font_ref, &font.standard_font.to_dictionary().into())?;
        }
        for (image, (_, image_ref)) in images.images().iter().zip(&image_refs) {
            pdf.write_stream_object(*image_ref, image.to_stream())?;
        }

        let resources = resources_dictionary(&font_refs, &image_refs);
        for ((page, content), (page_ref, content_ref)) in
            model.pages.iter().zip(contents).zip(&page_refs)
        {
            pdf.write_stream_object(*content_ref, PdfStream::new(content.into_bytes()))?;

            let mut page_dict = PdfDictionary::typed("Page");
            page_dict.insert("Parent", PdfObject::reference(pages_ref));
            page_dict.insert("MediaBox", PdfObject::rect(page.width, page.height));
            page_dict.insert("Contents", PdfObject::reference(*content_ref));
            page_dict.insert("Resources", resources.clone());
            pdf.write_object(*page_ref, &page_dict.into())?;
        }

        pdf.write_xref_and_trailer(catalog_ref, info_ref)?;
        pdf.finish()?;

        tracing::debug!(
            pages = model.pages.len(),
            fonts = font_refs.len(),
            images = image_refs.len(),
            "wrote pdf document"
        );
        Ok(())
    }

    /// Write a complete PDF document to bytes
    pub fn write_to_bytes(&self, model: &RenderModel) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(model, &mut buffer)?;
        Ok(buffer)
    }
}

fn resources_dictionary(fonts: &[(String, u32)], images: &[(String, u32)]) -> PdfDictionary {
    let mut resources = PdfDictionary::new();
    if !fonts.is_empty() {
        let mut font_dict = PdfDictionary::new();
        for (name, obj) in fonts {
            font_dict.insert(name.clone(), PdfObject::reference(*obj));
        }
        resources.insert("Font", font_dict);
    }
    if !images.is_empty() {
        let mut xobjects = PdfDictionary::new();
        for (name, obj) in images {
            xobjects.insert(name.clone(), PdfObject::reference(*obj));
        }
        resources.insert("XObject", xobjects);
    }
    let mut proc_set = vec![PdfObject::name("PDF"), PdfObject::name("Text")];
    if !images.is_empty() {
        proc_set.push(PdfObject::name("ImageB"));
    }
    resources.insert("ProcSet", PdfObject::Array(proc_set));
    resources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_writer_header() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer, PdfVersion::V1_4);
        writer.write_header().unwrap();
        assert!(String::from_utf8_lossy(&buffer).starts_with("%PDF-1.4"));
    }

    #[test]
    fn test_pdf_writer_object() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer, PdfVersion::V1_4);
        let obj_num = writer.allocate_object();
        writer.write_object(obj_num, &PdfObject::Integer(42)).unwrap();
        assert_eq!(String::from_utf8_lossy(&buffer), "1 0 obj\n42\nendobj\n");
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut buffer = Vec::new();
        {
            let mut writer = PdfWriter::new(&mut buffer, PdfVersion::V1_4);
            writer.write_header().unwrap();
            let a = writer.allocate_object();
            let b = writer.allocate_object();
            writer.write_object(b, &PdfObject::Integer(2)).unwrap();
            writer.write_object(a, &PdfObject::Integer(1)).unwrap();
            writer.write_xref_and_trailer(a, b).unwrap();
        }
        let text = String::from_utf8_lossy(&buffer).into_owned();
        let xref = text.find("xref\n").unwrap();
        let entries: Vec<usize> = text[xref..]
            .lines()
            .skip(3)
            .take(2)
            .map(|line| line[..10].parse().unwrap())
            .collect();
        assert!(buffer[entries[0]..].starts_with(b"1 0 obj"));
        assert!(buffer[entries[1]..].starts_with(b"2 0 obj"));
    }

    #[test]
    fn test_compressed_stream_has_filter() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer, PdfVersion::V1_4);
        let n = writer.allocate_object();
        writer
            .write_stream_object(n, PdfStream::new(b"BT ET".repeat(20)))
            .unwrap();
        let text = String::from_utf8_lossy(&buffer);
        assert!(text.contains("/Filter /FlateDecode"));
        assert!(!text.contains("BT ET"));
    }

    #[test]
    fn test_empty_model_error() {
        let writer = PdfDocumentWriter::new(PdfExportOptions::default());
        assert!(matches!(
            writer.write_to_bytes(&RenderModel::new()),
            Err(PdfError::InvalidDocument(_))
        ));
    }
}
