/// Implementation of `sbf inspect`.
///
/// Prints the first `--bytes` bytes of a file as a 16-byte-per-line hex
/// dump with an ASCII gutter, which is usually enough to eyeball length
/// prefixes and float layouts.
///
/// # Output format
///
/// ```text
/// file: values.sbf (1042 bytes, showing 32)
/// 0000  0a 68 65 6c 6c 6f 00 00  80 3f 02 ff ff ff ff ff  .hello...?......
/// 0010  ff ff ff 01 00 00 00 00  00 00 f0 3f 00 00 00 00  ...........?....
/// ```
use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result};

use crate::InspectArgs;

/// Run the `sbf inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let shown = &bytes[..bytes.len().min(args.bytes)];
    println!(
        "file: {} ({} bytes, showing {})",
        args.file.display(),
        bytes.len(),
        shown.len()
    );

    for (i, chunk) in shown.chunks(16).enumerate() {
        println!("{}", dump_line(i * 16, chunk));
    }

    Ok(())
}

/// Format one dump line: offset, hex split into two groups of 8, ASCII.
fn dump_line(offset: usize, chunk: &[u8]) -> String {
    let mut hex = String::with_capacity(48);
    for (i, b) in chunk.iter().enumerate() {
        if i == 8 {
            hex.push(' ');
        }
        if i > 0 {
            hex.push(' ');
        }
        let _ = write!(hex, "{b:02x}");
    }

    let ascii: String = chunk
        .iter()
        .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
        .collect();

    format!("{offset:04x}  {hex:<48}  {ascii}")
}
