use serde::Serialize;
use std::path::PathBuf;

/// Rendered `%001` transmission header: every padded field plus the full
/// 80-character line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransmissionHeaderRecord {
    pub prefix: String,
    pub node_id: String,
    pub password: String,
    pub delivery: String,
    pub file_type: String,
    pub external_reference: String,
    pub free_field: String,
    pub zero: String,
    pub reserve: String,
    /// The line as written to the target file.
    pub line: String,
}

/// Rendered `%020` file header.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileHeaderRecord {
    pub prefix: String,
    pub destination_node: String,
    pub source_node: String,
    pub external_reference_1: String,
    pub number_of_items: String,
    pub external_reference_2: String,
    pub reserve: String,
    /// The line as written to the target file.
    pub line: String,
}

/// Rendered `%022` file trailer carrying both seal MACs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileTrailerRecord {
    pub prefix: String,
    pub number_of_records: String,
    /// Key Verification Value seal, positions 12-43.
    pub key_verification_value: String,
    /// Content seal, positions 44-75.
    pub file_content_mac: String,
    pub reserve: String,
    /// The line as written to the target file.
    pub line: String,
}

/// Rendered `%002` transmission trailer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransmissionTrailerRecord {
    pub prefix: String,
    pub reserve: String,
    /// The line as written to the target file.
    pub line: String,
}

/// Terminal artifact of a protection run: every rendered record plus the
/// paths involved. Immutable once produced; the on-disk target file is the
/// only side effect.
#[derive(Debug, Clone, Serialize)]
pub struct ProtectionResult {
    pub source_path: PathBuf,
    pub target_path: PathBuf,
    /// Directory that held the digest scratch file.
    pub temp_dir: PathBuf,
    pub transmission_header: TransmissionHeaderRecord,
    pub file_header: FileHeaderRecord,
    pub file_trailer: FileTrailerRecord,
    pub transmission_trailer: TransmissionTrailerRecord,
}
