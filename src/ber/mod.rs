//! Format-string driven BER encoding for control values.

pub mod format;
mod reader;
mod writer;

use tracing::trace;

pub use format::{parse_format, Token};
pub use reader::BerReader;
pub use writer::BerWriter;

use crate::{ControlError, Result};

pub const TAG_BOOLEAN: u8 = 0x01;
pub const TAG_INTEGER: u8 = 0x02;
pub const TAG_OCTET_STRING: u8 = 0x04;
pub const TAG_ENUMERATED: u8 = 0x0a;
pub const TAG_SEQUENCE: u8 = 0x30;

/// Context-specific primitive tag `[n]`.
pub const fn context_tag(n: u8) -> u8 {
    0x80 | n
}

/// Context-specific constructed tag `[n]`.
pub const fn context_constructed_tag(n: u8) -> u8 {
    0xa0 | n
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BerValue {
    Integer(i32),
    Boolean(bool),
    String(String),
    Octets(Vec<u8>),
    OptionalOctets(Option<Vec<u8>>),
    Enumerated(i32),
    Tag(u8),
}

impl BerValue {
    pub fn as_integer(&self) -> Result<i32> {
        match self {
            BerValue::Integer(i) => Ok(*i),
            other => Err(unexpected("integer", other)),
        }
    }

    pub fn as_enumerated(&self) -> Result<i32> {
        match self {
            BerValue::Enumerated(e) => Ok(*e),
            other => Err(unexpected("enumerated", other)),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            BerValue::Boolean(b) => Ok(*b),
            other => Err(unexpected("boolean", other)),
        }
    }

    pub fn into_string(self) -> Result<String> {
        match self {
            BerValue::String(s) => Ok(s),
            other => Err(unexpected("string", &other)),
        }
    }

    pub fn into_octets(self) -> Result<Vec<u8>> {
        match self {
            BerValue::Octets(o) => Ok(o),
            other => Err(unexpected("octet string", &other)),
        }
    }

    pub fn into_optional_octets(self) -> Result<Option<Vec<u8>>> {
        match self {
            BerValue::OptionalOctets(o) => Ok(o),
            BerValue::Octets(o) => Ok(Some(o)),
            other => Err(unexpected("optional octet string", &other)),
        }
    }
}

fn unexpected(expected: &str, got: &BerValue) -> ControlError {
    ControlError::Decode(format!("expected {} value, got {:?}", expected, got))
}

pub fn encode(format: &str, values: &[BerValue]) -> Result<Vec<u8>> {
    let tokens = parse_format(format)?;
    BerWriter::new().write(&tokens, values)
}

pub fn decode(format: &str, bytes: &[u8]) -> Result<Vec<BerValue>> {
    let tokens = parse_format(format)?;
    BerReader::new(bytes).read(&tokens)
}

/// Like [`decode`], but reports a shape mismatch as `None` instead of an
/// error. Used for shapes with optional trailing fields.
pub fn try_decode(format: &str, bytes: &[u8]) -> Option<Vec<BerValue>> {
    match decode(format, bytes) {
        Ok(values) => Some(values),
        Err(e) => {
            trace!("Bytes do not match \"{}\": {}", format, e);
            None
        }
    }
}
