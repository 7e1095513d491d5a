/// Decode HTML character references (named, decimal and hex) into text.
///
/// Text without an `&` is returned unchanged, so decoding already-decoded
/// plain text is a no-op.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
