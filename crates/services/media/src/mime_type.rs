/// Determine the mime type of the given buffer from its magic signature
pub fn determine_mime_type(buf: &[u8]) -> &'static str {
    infer::get(buf)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use super::determine_mime_type;

    #[test]
    fn recognises_common_photo_formats() {
        assert_eq!(
            determine_mime_type(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46]),
            "image/jpeg"
        );
        assert_eq!(
            determine_mime_type(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            "image/png"
        );
    }

    #[test]
    fn unknown_bytes_are_octet_stream() {
        assert_eq!(
            determine_mime_type(b"just some text"),
            "application/octet-stream"
        );
    }
}
