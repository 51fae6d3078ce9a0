use crate::cancel::CancelToken;
use crate::charset;
use crate::error::Result;
use std::ffi::OsString;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Hex digest sealed to produce the Key Verification Value: the 8 ASCII
/// bytes of `"00000000"`. Sealing it authenticates the key alone,
/// independent of any document content.
pub const KEY_VERIFICATION_DIGEST: &str = "3030303030303030";

/// Scratch file holding the hex stream while the digest is built.
///
/// Named `<source file name>_tmp` in the resolved temp directory. Removal
/// happens in `Drop`, so the file is cleaned up on success, error and
/// cancellation alike.
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    fn new(source: &Path, temp_dir: &Path) -> Self {
        let mut name = source
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("source"));
        name.push("_tmp");
        Self {
            path: temp_dir.join(name),
        }
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to remove digest scratch file {}: {e}",
                    self.path.display()
                );
            }
        }
    }
}

/// Build the content digest for `source` and return it as one hex string.
///
/// The source document is decoded as ISO-8859-1 and every character of
/// every line is mapped through the legacy code table, in order, with no
/// separators; line terminators are not encoded, so the digest represents
/// content only. The hex stream is staged through a scratch file in
/// `temp_dir` before being read back whole.
pub fn content_digest(source: &Path, temp_dir: &Path, cancel: &CancelToken) -> Result<String> {
    let scratch = ScratchFile::new(source, temp_dir);

    let text = decode_latin1(&fs::read(source)?);

    let mut out = BufWriter::new(fs::File::create(&scratch.path)?);
    for line in text.split('\n') {
        cancel.check()?;
        let line = line.strip_suffix('\r').unwrap_or(line);

        let mut line_hex = String::with_capacity(line.len() * 2);
        for c in line.chars() {
            cancel.check()?;
            let code = charset::code_for(c);
            line_hex.push(char::from(code[0]));
            line_hex.push(char::from(code[1]));
        }
        out.write_all(line_hex.as_bytes())?;
    }
    out.flush()?;
    drop(out);

    let digest = fs::read_to_string(&scratch.path)?;
    log::debug!(
        "Digest for {} covers {} hex digits",
        source.display(),
        digest.len()
    );
    Ok(digest)
}

/// ISO-8859-1 maps every byte onto the identical Unicode codepoint.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtectError;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn digest_of(content: &[u8]) -> Result<String> {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("payment.txt");
        fs::write(&source, content).unwrap();
        content_digest(&source, dir.path(), &CancelToken::new())
    }

    #[test]
    fn single_line_maps_every_character() {
        assert_eq!(digest_of(b"Test").unwrap(), "54657374");
        assert_eq!(digest_of(b"Hello world!").unwrap(), "48656C6C6F20776F726C6421");
    }

    #[test]
    fn line_terminators_are_not_encoded() {
        assert_eq!(digest_of(b"AB\r\nCD").unwrap(), "41424344");
        // A trailing terminator adds nothing.
        assert_eq!(digest_of(b"AB\r\nCD\r\n").unwrap(), "41424344");
    }

    #[test]
    fn latin1_bytes_outside_the_table_fall_back() {
        // 0xDF is ISO-8859-1 'ß', absent from the legacy table.
        assert_eq!(digest_of(&[b'A', 0xDF, b'B']).unwrap(), "41C342");
    }

    #[test]
    fn aliased_latin1_bytes_use_their_legacy_codes() {
        // 0xE4 'ä' -> 7B, 0xC5 'Å' -> 5D in the legacy code page.
        assert_eq!(digest_of(&[0xE4, 0xC5]).unwrap(), "7B5D");
    }

    #[test]
    fn empty_document_yields_empty_digest() {
        assert_eq!(digest_of(b"").unwrap(), "");
    }

    #[test]
    fn scratch_file_is_removed_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("payment.txt");
        fs::write(&source, b"Test").unwrap();

        content_digest(&source, dir.path(), &CancelToken::new()).unwrap();

        assert!(!dir.path().join("payment.txt_tmp").exists());
    }

    #[test]
    fn scratch_file_is_removed_on_cancellation() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("payment.txt");
        fs::write(&source, b"Test").unwrap();

        let cancel = CancelToken::new();
        cancel.cancel();
        let result = content_digest(&source, dir.path(), &cancel);

        assert!(matches!(result, Err(ProtectError::Cancelled)));
        assert!(!dir.path().join("payment.txt_tmp").exists());
    }
}
