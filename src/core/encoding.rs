use crate::utils::error::{EtlError, Result};
use encoding_rs::{Encoding, UTF_8};

/// Candidate encodings, in the order they are tried.
///
/// `latin1` and `iso-8859-1` are WHATWG labels for `windows-1252`, so they
/// need no entry of their own.
pub const DEFAULT_ENCODINGS: [&str; 3] = ["utf-8", "windows-1252", "iso-8859-15"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone)]
pub struct DecodedInput {
    pub encoding: &'static Encoding,
    pub text: String,
}

/// Finds the first candidate encoding that decodes the whole input without error.
#[derive(Debug, Clone)]
pub struct EncodingProber {
    candidates: Vec<&'static Encoding>,
}

impl EncodingProber {
    pub fn new(candidates: impl IntoIterator<Item = &'static Encoding>) -> Self {
        let mut unique: Vec<&'static Encoding> = Vec::new();
        for encoding in candidates {
            if !unique.contains(&encoding) {
                unique.push(encoding);
            }
        }
        Self { candidates: unique }
    }

    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        let encodings = labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
                    EtlError::InvalidConfigValueError {
                        field: "input.encodings".to_string(),
                        value: label.to_string(),
                        reason: "Unknown encoding label".to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if encodings.is_empty() {
            return Err(EtlError::MissingConfigError {
                field: "input.encodings".to_string(),
            });
        }
        Ok(Self::new(encodings))
    }

    pub fn candidate_names(&self) -> Vec<String> {
        self.candidates.iter().map(|e| e.name().to_string()).collect()
    }

    /// `path` is only used for error reporting.
    pub fn decode(&self, path: &str, bytes: &[u8]) -> Result<DecodedInput> {
        for &encoding in &self.candidates {
            match decode_strict(encoding, bytes) {
                Some(text) => {
                    tracing::debug!("Decoded {} bytes as {}", bytes.len(), encoding.name());
                    return Ok(DecodedInput { encoding, text });
                }
                None => tracing::debug!("{} is not {}", path, encoding.name()),
            }
        }

        Err(EtlError::DecodingError {
            path: path.to_string(),
            tried: self.candidate_names(),
        })
    }
}

impl Default for EncodingProber {
    fn default() -> Self {
        Self::new(
            DEFAULT_ENCODINGS
                .iter()
                .filter_map(|label| Encoding::for_label(label.as_bytes())),
        )
    }
}

fn decode_strict(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    let bytes = if encoding == UTF_8 {
        bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
    } else {
        bytes
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}
