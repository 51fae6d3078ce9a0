use crate::cancel::CancelToken;
use crate::error::{ProtectError, Result};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::Path;

const CRLF: &[u8] = b"\r\n";
const COPY_BUF_LEN: usize = 8 * 1024;

/// Write the protected file to `target`.
///
/// Output byte sequence, in order: transmission header + CRLF, file header
/// + CRLF, the source file's bytes verbatim, CRLF + file trailer, CRLF +
/// transmission trailer; no terminator after the last line. Record text is
/// written as ISO-8859-1; the body is a streamed byte-for-byte copy.
///
/// Fails with [`ProtectError::TargetExists`] before any write when the
/// target is already present.
pub fn assemble(
    source: &Path,
    target: &Path,
    transmission_header: &str,
    file_header: &str,
    file_trailer: &str,
    transmission_trailer: &str,
    cancel: &CancelToken,
) -> Result<()> {
    if target.exists() {
        return Err(ProtectError::TargetExists(target.to_path_buf()));
    }

    let mut reader = fs::File::open(source)?;

    // create_new keeps a target raced into existence after the check above
    // from being clobbered.
    let out = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
        .map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                ProtectError::TargetExists(target.to_path_buf())
            } else {
                ProtectError::Io(e)
            }
        })?;
    let mut writer = BufWriter::new(out);

    writer.write_all(&encode_latin1(transmission_header))?;
    writer.write_all(CRLF)?;
    writer.write_all(&encode_latin1(file_header))?;
    writer.write_all(CRLF)?;

    let mut buf = [0u8; COPY_BUF_LEN];
    loop {
        cancel.check()?;
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n])?;
    }

    writer.write_all(CRLF)?;
    writer.write_all(&encode_latin1(file_trailer))?;
    writer.write_all(CRLF)?;
    writer.write_all(&encode_latin1(transmission_trailer))?;
    writer.flush()?;

    log::info!("Wrote protected file {}", target.display());
    Ok(())
}

/// Encode record text as ISO-8859-1. Validated record lines never leave the
/// single-byte range; anything that somehow does degrades to `?` instead of
/// aborting the write.
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines() -> [String; 4] {
        [
            format!("%001{}", " ".repeat(76)),
            format!("%020{}", " ".repeat(76)),
            format!("%022{}", " ".repeat(76)),
            format!("%002{}", " ".repeat(76)),
        ]
    }

    #[test]
    fn output_is_five_parts_with_crlf_framing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.txt");
        let target = dir.path().join("out.txt");
        fs::write(&source, b"BODY").unwrap();

        let [th, fh, ft, tt] = lines();
        assemble(&source, &target, &th, &fh, &ft, &tt, &CancelToken::new()).unwrap();

        let written = fs::read(&target).unwrap();
        let expected = format!("{th}\r\n{fh}\r\nBODY\r\n{ft}\r\n{tt}");
        assert_eq!(written, expected.as_bytes());
    }

    #[test]
    fn source_bytes_are_copied_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.txt");
        let target = dir.path().join("out.txt");
        // Raw ISO-8859-1 bytes, not valid UTF-8.
        fs::write(&source, [0xE4u8, 0xC5, 0xFF, b'\r', b'\n', b'X']).unwrap();

        let [th, fh, ft, tt] = lines();
        assemble(&source, &target, &th, &fh, &ft, &tt, &CancelToken::new()).unwrap();

        let written = fs::read(&target).unwrap();
        let body_start = th.len() + 2 + fh.len() + 2;
        assert_eq!(
            &written[body_start..body_start + 6],
            &[0xE4u8, 0xC5, 0xFF, b'\r', b'\n', b'X']
        );
    }

    #[test]
    fn record_text_is_written_as_latin1() {
        assert_eq!(encode_latin1("ABC"), b"ABC".to_vec());
        assert_eq!(encode_latin1("åäö"), vec![0xE5, 0xE4, 0xF6]);
        assert_eq!(encode_latin1("€"), vec![b'?']);
    }

    #[test]
    fn existing_target_is_refused_and_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.txt");
        let target = dir.path().join("out.txt");
        fs::write(&source, b"BODY").unwrap();
        fs::write(&target, b"precious").unwrap();

        let [th, fh, ft, tt] = lines();
        let result = assemble(&source, &target, &th, &fh, &ft, &tt, &CancelToken::new());

        assert!(matches!(result, Err(ProtectError::TargetExists(_))));
        assert_eq!(fs::read(&target).unwrap(), b"precious");
    }

    #[test]
    fn cancellation_during_copy_leaves_partial_target() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.txt");
        let target = dir.path().join("out.txt");
        fs::write(&source, b"BODY").unwrap();

        let cancel = CancelToken::new();
        cancel.cancel();
        let [th, fh, ft, tt] = lines();
        let result = assemble(&source, &target, &th, &fh, &ft, &tt, &cancel);

        assert!(matches!(result, Err(ProtectError::Cancelled)));
        // No rollback: the partially written target stays on disk.
        assert!(target.exists());
    }
}
