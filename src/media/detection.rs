/// Image MIME type for an upload, sniffed from magic bytes first and the
/// file extension second. `None` for anything that is not an image.
#[must_use]
pub fn detect_image_mime(data: &[u8], filename: Option<&str>) -> Option<&'static str> {
    match infer::get(data) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => Some(kind.mime_type()),
        Some(_) => None,
        None => filename.and_then(image_mime_from_extension),
    }
}

#[must_use]
pub fn image_mime_from_extension(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
