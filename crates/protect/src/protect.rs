use crate::assemble;
use crate::cancel::CancelToken;
use crate::config::{ProtectConfig, RecordFields};
use crate::digest::{self, KEY_VERIFICATION_DIGEST};
use crate::error::{ProtectError, Result};
use crate::mac;
use crate::record;
use crate::types::ProtectionResult;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Run the whole protection pipeline for one source document.
///
/// Computes the Key Verification Value and content seal MACs, renders the
/// four framing records and writes the protected file to
/// `config.target_path`. Either a complete [`ProtectionResult`] is returned
/// with the target fully written, or an error is returned and any partially
/// written target must be treated as invalid and removed by the caller.
pub fn protect_file(
    config: &ProtectConfig,
    fields: &RecordFields,
    cancel: &CancelToken,
) -> Result<ProtectionResult> {
    if config.target_path.exists() {
        return Err(ProtectError::TargetExists(config.target_path.clone()));
    }

    log::info!(
        "Protecting {} -> {}",
        config.source_path.display(),
        config.target_path.display()
    );

    let temp_dir = resolve_temp_dir(config)?;
    let key = mac::decode_key(&config.secret_key)?;

    let key_verification_value = mac::seal_mac(&key, KEY_VERIFICATION_DIGEST, cancel)?;
    let content_hex = digest::content_digest(&config.source_path, &temp_dir, cancel)?;
    let file_content_mac = mac::seal_mac(&key, &content_hex, cancel)?;

    let transmission_header = record::build_transmission_header(&fields.transmission_header)?;
    let file_header = record::build_file_header(&fields.file_header)?;
    let file_trailer = record::build_file_trailer(
        &fields.file_trailer,
        &key_verification_value,
        &file_content_mac,
    )?;
    let transmission_trailer =
        record::build_transmission_trailer(&fields.transmission_trailer)?;

    assemble::assemble(
        &config.source_path,
        &config.target_path,
        &transmission_header.line,
        &file_header.line,
        &file_trailer.line,
        &transmission_trailer.line,
        cancel,
    )?;

    Ok(ProtectionResult {
        source_path: config.source_path.clone(),
        target_path: config.target_path.clone(),
        temp_dir,
        transmission_header,
        file_header,
        file_trailer,
        transmission_trailer,
    })
}

/// Resolve the directory for the digest scratch file: the configured temp
/// directory (created if missing) when enabled, otherwise the source
/// document's own directory.
fn resolve_temp_dir(config: &ProtectConfig) -> Result<PathBuf> {
    if config.use_temp_dir {
        let dir = config.temp_dir.clone().ok_or_else(|| {
            ProtectError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "use_temp_dir is set but no temp_dir was provided",
            ))
        })?;
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    } else {
        Ok(config
            .source_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf())
    }
}
