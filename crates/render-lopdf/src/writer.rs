use crate::engine::PagePlacement;
use crate::error::RenderError;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use srsforge_raster::RasterImage;
use std::io::Write;

const IMAGE_NAME: &str = "Im1";

/// Builds an image-only PDF page by page, then writes it to memory.
pub(crate) struct ImagePdfWriter {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    page_width: f32,
    page_height: f32,
}

impl ImagePdfWriter {
    pub(crate) fn new(page_width: f32, page_height: f32) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            page_width,
            page_height,
        }
    }

    pub(crate) fn add_image_page(&mut self, band: &RasterImage, placement: &PagePlacement) -> Result<ObjectId, RenderError> {
        let image_stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => band.width() as i64,
                "Height" => band.height() as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
                "Filter" => "FlateDecode",
            },
            deflate(&band.to_rgb_bytes())?,
        );
        let image_id = self.document.add_object(image_stream);

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        placement.width.into(),
                        0.0.into(),
                        0.0.into(),
                        placement.height.into(),
                        placement.x.into(),
                        placement.y.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_stream = Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            deflate(&content.encode()?)?,
        );
        let content_id = self.document.add_object(content_stream);

        let resources_id = self.document.add_object(dictionary! {
            "XObject" => dictionary! { IMAGE_NAME => image_id },
        });
        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), self.page_width.into(), self.page_height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        self.page_ids.push(page_id);
        Ok(page_id)
    }

    pub(crate) fn finish(mut self, title: Option<&str>) -> Result<Vec<u8>, RenderError> {
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().copied().map(Object::Reference).collect::<Vec<_>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.document.objects.insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        if let Some(title) = title {
            let info_id = self.document.add_object(dictionary! {
                "Title" => text_string(title),
                "Producer" => Object::string_literal("srsforge"),
            });
            self.document.trailer.set("Info", info_id);
        }

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// A PDF text string: literal when ASCII, UTF-16BE with a byte-order mark otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
