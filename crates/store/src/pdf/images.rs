//! PDF Image Handling
//!
//! Raster images (barcodes) are embedded as 8-bit DeviceGray image XObjects.
//! Each image is written once and referenced from pages by resource name.

use super::objects::{PdfDictionary, PdfObject, PdfStream};
use crate::{PdfError, Result};
use render_model::RenderImage;

/// A grayscale image ready to be written as an XObject
#[derive(Debug, Clone)]
pub struct ImageXObject {
    /// Resource name used by `Do` operators (e.g. "Im0")
    pub name: String,
    /// Render model resource id this image was built from
    pub resource_id: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl ImageXObject {
    /// Build from a render image, checking the sample count
    pub fn from_render_image(image: &RenderImage, name: String) -> Result<Self> {
        let expected = image.width as usize * image.height as usize;
        if image.width == 0 || image.height == 0 {
            return Err(PdfError::InvalidDocument(format!(
                "image {} has zero size",
                image.id
            )));
        }
        if image.pixels.len() != expected {
            return Err(PdfError::InvalidDocument(format!(
                "image {} has {} samples, expected {}",
                image.id,
                image.pixels.len(),
                expected
            )));
        }
        Ok(Self {
            name,
            resource_id: image.id.clone(),
            width: image.width,
            height: image.height,
            data: image.pixels.clone(),
        })
    }

    pub fn to_stream(&self) -> PdfStream {
        let mut dict = PdfDictionary::typed("XObject");
        dict.insert("Subtype", PdfObject::name("Image"));
        dict.insert("Width", self.width as i64);
        dict.insert("Height", self.height as i64);
        dict.insert("ColorSpace", PdfObject::name("DeviceGray"));
        dict.insert("BitsPerComponent", 8i64);
        PdfStream::with_dict(self.data.clone(), dict)
    }
}

/// Resolves render model image ids to XObject resource names
#[derive(Debug, Default)]
pub struct ImageManager {
    images: Vec<ImageXObject>,
}

impl ImageManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every image of the model
    pub fn from_images(images: &[RenderImage]) -> Result<Self> {
        let images = images
            .iter()
            .enumerate()
            .map(|(i, image)| ImageXObject::from_render_image(image, format!("Im{}", i)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { images })
    }

    /// Resource name for a render model image id
    pub fn resource_name(&self, resource_id: &str) -> Option<&str> {
        self.images
            .iter()
            .find(|img| img.resource_id == resource_id)
            .map(|img| img.name.as_str())
    }

    pub fn images(&self) -> &[ImageXObject] {
        &self.images
    }
}
