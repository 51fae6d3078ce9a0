use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General pipeline settings: the key, the paths and the scratch-directory
/// policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectConfig {
    /// Bank-assigned secret key as 32 hex characters.
    pub secret_key: String,

    /// Source document path. The document must already be encoded in
    /// ISO-8859-1 and use only CRLF line breaks.
    pub source_path: PathBuf,

    /// Target path for the protected file. Must not exist.
    pub target_path: PathBuf,

    /// Stage the digest scratch file in [`temp_dir`](Self::temp_dir)
    /// instead of next to the source document.
    #[serde(default)]
    pub use_temp_dir: bool,

    /// Scratch directory, created if missing. Only consulted when
    /// [`use_temp_dir`](Self::use_temp_dir) is set.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

/// Caller-supplied values for the `%001` transmission header.
///
/// Every field may be left empty; widths are enforced at build time and
/// short values are space-padded to position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmissionHeaderFields {
    /// Node id, positions 5-14 - max 10 chars.
    pub node_id: String,

    /// Password, positions 15-20 - max 6 chars.
    pub password: String,

    /// File type, positions 22-24 - max 3 chars.
    pub file_type: String,

    /// External reference, positions 25-30 - max 6 chars. Dates use the
    /// `yyMMdd` form; today's date is filled in when left empty.
    pub external_reference: String,

    /// Free field, position 31 - max 1 char.
    pub free_field: String,

    /// Reserve, positions 33-80 - max 48 chars.
    pub reserve: String,
}

/// Caller-supplied values for the `%020` file header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHeaderFields {
    /// Destination node, positions 5-14 - max 10 chars. Accepted for
    /// completeness but never rendered: the legacy wiring fills the
    /// destination slot from [`source_node`](Self::source_node).
    pub destination_node: String,

    /// Source node, positions 15-24 - max 10 chars. Also rendered into the
    /// destination-node slot (positions 5-14).
    pub source_node: String,

    /// External reference 1, positions 25-31 - max 7 chars. Dates use the
    /// `yyMMdd` form; today's date is filled in when left empty.
    pub external_reference_1: String,

    /// Number of items, positions 32-38 - max 7 chars.
    pub number_of_items: String,

    /// External reference 2, positions 39-48 - max 10 chars.
    pub external_reference_2: String,

    /// Reserve, positions 49-80 - max 32 chars.
    pub reserve: String,
}

/// Caller-supplied values for the `%022` file trailer. The two MAC fields
/// of this record are computed, never supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTrailerFields {
    /// Number of records, positions 5-11 - max 7 chars, zero-padded to the
    /// right.
    pub number_of_records: String,

    /// Reserve, positions 76-80 - max 5 chars.
    pub reserve: String,
}

/// Caller-supplied values for the `%002` transmission trailer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmissionTrailerFields {
    /// Reserve, positions 5-80 - max 76 chars.
    pub reserve: String,
}

/// All four records' field values together, as bound from the CLI's JSON
/// field file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFields {
    pub transmission_header: TransmissionHeaderFields,
    pub file_header: FileHeaderFields,
    pub file_trailer: FileTrailerFields,
    pub transmission_trailer: TransmissionTrailerFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_fields_deserialize_from_partial_json() {
        let fields: RecordFields = serde_json::from_str(
            r#"{
                "transmission_header": { "node_id": "NODE1", "file_type": "ABC" },
                "file_header": { "source_node": "SRC" }
            }"#,
        )
        .unwrap();

        assert_eq!(fields.transmission_header.node_id, "NODE1");
        assert_eq!(fields.transmission_header.password, "");
        assert_eq!(fields.file_header.source_node, "SRC");
        assert_eq!(fields.file_trailer.number_of_records, "");
    }
}
