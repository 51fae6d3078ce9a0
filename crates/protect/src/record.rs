use crate::config::{
    FileHeaderFields, FileTrailerFields, TransmissionHeaderFields, TransmissionTrailerFields,
};
use crate::error::{ProtectError, Result};
use crate::types::{
    FileHeaderRecord, FileTrailerRecord, TransmissionHeaderRecord, TransmissionTrailerRecord,
};
use chrono::Local;

/// Record type prefixes, fixed by the receiving bank. The file trailer
/// renders `%022` and the transmission trailer `%002`; these literals are
/// what the receiving system matches on.
const TRANSMISSION_HEADER_PREFIX: &str = "%001";
const FILE_HEADER_PREFIX: &str = "%020";
const FILE_TRAILER_PREFIX: &str = "%022";
const TRANSMISSION_TRAILER_PREFIX: &str = "%002";

/// Every rendered record is exactly this wide.
pub const RECORD_WIDTH: usize = 80;

/// How a short field value is padded out to its fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pad {
    /// Space-pad to the right (the default for text fields).
    Space,
    /// Zero-pad to the right (the numeric record-count field).
    Zero,
}

/// Validate a field value against its fixed width and pad it to exactly
/// that width.
pub fn validate_and_pad(value: &str, field: &str, width: usize, pad: Pad) -> Result<String> {
    let actual = value.chars().count();
    if actual > width {
        return Err(ProtectError::FieldTooLong {
            field: field.to_string(),
            limit: width,
            actual,
        });
    }

    let fill = match pad {
        Pad::Space => ' ',
        Pad::Zero => '0',
    };
    let mut padded = String::with_capacity(width);
    padded.push_str(value);
    padded.extend(std::iter::repeat(fill).take(width - actual));
    Ok(padded)
}

/// Today's date in the `yyMMdd` form used for defaulted reference fields.
fn today_reference() -> String {
    Local::now().format("%y%m%d").to_string()
}

fn or_today(value: &str) -> String {
    if value.is_empty() {
        today_reference()
    } else {
        value.to_string()
    }
}

/// Build the `%001` transmission header. An empty external reference
/// defaults to today's date.
pub fn build_transmission_header(
    fields: &TransmissionHeaderFields,
) -> Result<TransmissionHeaderRecord> {
    let external_reference = or_today(&fields.external_reference);

    let mut record = TransmissionHeaderRecord {
        prefix: TRANSMISSION_HEADER_PREFIX.to_string(),
        node_id: validate_and_pad(&fields.node_id, "Node id pos 5 to 14", 10, Pad::Space)?,
        password: validate_and_pad(&fields.password, "Password pos 15 to 20", 6, Pad::Space)?,
        delivery: "0".to_string(),
        file_type: validate_and_pad(&fields.file_type, "File type pos 22 to 24", 3, Pad::Space)?,
        external_reference: validate_and_pad(
            &external_reference,
            "External reference pos 25 to 30",
            6,
            Pad::Space,
        )?,
        free_field: validate_and_pad(&fields.free_field, "Free field pos 31", 1, Pad::Space)?,
        zero: "0".to_string(),
        reserve: validate_and_pad(&fields.reserve, "Reserve pos 33 to 80", 48, Pad::Space)?,
        line: String::new(),
    };

    record.line = [
        record.prefix.as_str(),
        record.node_id.as_str(),
        record.password.as_str(),
        record.delivery.as_str(),
        record.file_type.as_str(),
        record.external_reference.as_str(),
        record.free_field.as_str(),
        record.zero.as_str(),
        record.reserve.as_str(),
    ]
    .concat();

    Ok(record)
}

/// Build the `%020` file header. An empty external reference 1 defaults to
/// today's date.
///
/// The destination-node slot is filled from the source-node input, the
/// wiring the receiving side has always been fed. The dedicated
/// destination value is deliberately left unread.
pub fn build_file_header(fields: &FileHeaderFields) -> Result<FileHeaderRecord> {
    let external_reference_1 = or_today(&fields.external_reference_1);

    let mut record = FileHeaderRecord {
        prefix: FILE_HEADER_PREFIX.to_string(),
        destination_node: validate_and_pad(
            &fields.source_node,
            "Source node pos 15 to 24",
            10,
            Pad::Space,
        )?,
        source_node: validate_and_pad(
            &fields.source_node,
            "Source node pos 15 to 24",
            10,
            Pad::Space,
        )?,
        external_reference_1: validate_and_pad(
            &external_reference_1,
            "External reference 1 pos 25 to 31",
            7,
            Pad::Space,
        )?,
        number_of_items: validate_and_pad(
            &fields.number_of_items,
            "Number of items pos 32 to 38",
            7,
            Pad::Space,
        )?,
        external_reference_2: validate_and_pad(
            &fields.external_reference_2,
            "External reference 2 pos 39 to 48",
            10,
            Pad::Space,
        )?,
        reserve: validate_and_pad(&fields.reserve, "Reserve pos 49 to 80", 32, Pad::Space)?,
        line: String::new(),
    };

    record.line = [
        record.prefix.as_str(),
        record.destination_node.as_str(),
        record.source_node.as_str(),
        record.external_reference_1.as_str(),
        record.number_of_items.as_str(),
        record.external_reference_2.as_str(),
        record.reserve.as_str(),
    ]
    .concat();

    Ok(record)
}

/// Build the `%022` file trailer around the two computed seal MACs.
pub fn build_file_trailer(
    fields: &FileTrailerFields,
    key_verification_value: &str,
    file_content_mac: &str,
) -> Result<FileTrailerRecord> {
    let mut record = FileTrailerRecord {
        prefix: FILE_TRAILER_PREFIX.to_string(),
        number_of_records: validate_and_pad(
            &fields.number_of_records,
            "Number of Records pos 5 to 11",
            7,
            Pad::Zero,
        )?,
        key_verification_value: key_verification_value.to_string(),
        file_content_mac: file_content_mac.to_string(),
        reserve: validate_and_pad(&fields.reserve, "Reserve pos 76 to 80", 5, Pad::Space)?,
        line: String::new(),
    };

    record.line = [
        record.prefix.as_str(),
        record.number_of_records.as_str(),
        record.key_verification_value.as_str(),
        record.file_content_mac.as_str(),
        record.reserve.as_str(),
    ]
    .concat();

    Ok(record)
}

/// Build the `%002` transmission trailer.
pub fn build_transmission_trailer(
    fields: &TransmissionTrailerFields,
) -> Result<TransmissionTrailerRecord> {
    let mut record = TransmissionTrailerRecord {
        prefix: TRANSMISSION_TRAILER_PREFIX.to_string(),
        reserve: validate_and_pad(&fields.reserve, "Reserve pos 5 to 80", 76, Pad::Space)?,
        line: String::new(),
    };

    record.line = [record.prefix.as_str(), record.reserve.as_str()].concat();

    Ok(record)
}
