/// Turns a sample file name into a key for the generated object literal.
///
/// `#` becomes `s` (so `C#4.mp3` maps to `Cs4`) and a trailing
/// `.<extension>` is dropped.
pub fn sanitize_key(file_name: &str, extension: &str) -> String {
    let key = file_name.replace('#', "s");
    let suffix = format!(".{extension}");
    match key.strip_suffix(&suffix) {
        Some(stem) => stem.to_string(),
        None => key,
    }
}
