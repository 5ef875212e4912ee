use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One `"<key>": "<data uri>"` line of the generated script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundEntry {
    pub key: String,
    pub data_uri: String,
}

/// Writes the object literal declaration for `entries` to `out`:
///
/// ```text
/// const sounds = {
///     "A4": "data:audio/mp3;base64,...",
/// };
/// ```
///
/// Keys and values go through `serde_json` so quotes and backslashes are
/// escaped; JSON strings are valid JavaScript strings.
pub fn render_sounds_script<W: Write>(
    out: &mut W,
    variable_name: &str,
    entries: &[SoundEntry],
) -> io::Result<()> {
    writeln!(out, "const {variable_name} = {{")?;
    for entry in entries {
        out.write_all(b"    ")?;
        serde_json::to_writer(&mut *out, &entry.key)?;
        out.write_all(b": ")?;
        serde_json::to_writer(&mut *out, &entry.data_uri)?;
        out.write_all(b",\n")?;
    }
    writeln!(out, "}};")?;
    Ok(())
}

/// Creates or truncates `output_file` and renders the script into it.
pub fn write_sounds_script(
    output_file: &Path,
    variable_name: &str,
    entries: &[SoundEntry],
) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(output_file)?);
    render_sounds_script(&mut out, variable_name, entries)?;
    out.flush()?;
    Ok(())
}
