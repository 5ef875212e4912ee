use base64::Engine as _;

/// `data:<mime_type>;base64,<payload>` with the standard padded alphabet.
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let mut uri = format!("data:{mime_type};base64,");
    base64::engine::general_purpose::STANDARD.encode_string(bytes, &mut uri);
    uri
}
