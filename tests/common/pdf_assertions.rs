use flate2::read::ZlibDecoder;
use lopdf::{Document as LopdfDocument, Object};
use std::io::Read;

/// Heights, in source rows, of every image XObject in the document.
pub fn image_heights(doc: &LopdfDocument) -> Vec<i64> {
    image_streams(doc).map(|(_, height, _)| height).collect()
}

/// Decoded RGB bytes of the first image on the first page.
pub fn first_image_rgb(doc: &LopdfDocument) -> Option<Vec<u8>> {
    let (_, _, stream) = image_streams(doc).next()?;
    let mut data = Vec::new();
    ZlibDecoder::new(stream.content.as_slice()).read_to_end(&mut data).ok()?;
    Some(data)
}

fn image_streams(doc: &LopdfDocument) -> impl Iterator<Item = (i64, i64, &lopdf::Stream)> {
    doc.objects.values().filter_map(|object| match object {
        Object::Stream(stream)
            if stream.dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(b"Image".as_slice()) =>
        {
            let width = stream.dict.get(b"Width").and_then(Object::as_i64).ok()?;
            let height = stream.dict.get(b"Height").and_then(Object::as_i64).ok()?;
            Some((width, height, stream))
        }
        _ => None,
    })
}

pub fn info_title(doc: &LopdfDocument) -> Option<String> {
    let info = doc.trailer.get(b"Info").and_then(Object::as_reference).ok()?;
    let title = doc.get_dictionary(info).ok()?.get(b"Title").ok()?.as_str().ok()?;
    Some(String::from_utf8_lossy(title).into_owned())
}
