//! # Sigill Protect
//!
//! File-protection pipeline for bank transmission files: seals a payment
//! document with truncated HMAC-SHA256 "seal MAC" codes and wraps it in the
//! four fixed-width framing records the receiving system expects.
//!
//! ## Pipeline
//!
//! ```text
//! Source document (ISO-8859-1, CRLF)
//!     │
//!     ├──> Content digest (legacy char→hex table, line breaks dropped)
//!     │        └─> Seal MAC (HMAC-SHA256, first 16 bytes, uppercase hex)
//!     ├──> Key Verification Value (seal MAC over the fixed "00000000" digest)
//!     │
//!     ├──> Record building (%001 / %020 / %022 / %002, 80 chars each)
//!     │
//!     └──> Assembly: headers + source bytes verbatim + trailers → target
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use sigill_protect::{protect_file, CancelToken, ProtectConfig, RecordFields};
//!
//! let config = ProtectConfig {
//!     secret_key: "1234567890ABCDEF1234567890ABCDEF".into(),
//!     source_path: "payments.txt".into(),
//!     target_path: "payments.sealed.txt".into(),
//!     use_temp_dir: false,
//!     temp_dir: None,
//! };
//!
//! let result = protect_file(&config, &RecordFields::default(), &CancelToken::new())?;
//! println!("KVV: {}", result.file_trailer.key_verification_value);
//! # Ok::<(), sigill_protect::ProtectError>(())
//! ```

mod assemble;
mod cancel;
mod charset;
mod config;
mod digest;
mod error;
mod mac;
mod protect;
mod record;
mod types;

pub use cancel::CancelToken;
pub use charset::code_for;
pub use config::{
    FileHeaderFields, FileTrailerFields, ProtectConfig, RecordFields, TransmissionHeaderFields,
    TransmissionTrailerFields,
};
pub use digest::{content_digest, KEY_VERIFICATION_DIGEST};
pub use error::{ProtectError, Result};
pub use mac::{decode_key, seal_mac};
pub use protect::protect_file;
pub use record::{validate_and_pad, Pad, RECORD_WIDTH};
pub use types::{
    FileHeaderRecord, FileTrailerRecord, ProtectionResult, TransmissionHeaderRecord,
    TransmissionTrailerRecord,
};
