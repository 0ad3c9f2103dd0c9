use bytes::Buf;
use std::io::Cursor;

use super::format::Token;
use super::{BerValue, TAG_BOOLEAN, TAG_ENUMERATED, TAG_INTEGER, TAG_OCTET_STRING, TAG_SEQUENCE};
use crate::{ControlError, Result};

pub struct BerReader<'a> {
    buf: Cursor<&'a [u8]>,
    // End offsets of the sequences currently open.
    limits: Vec<usize>,
    tag_override: bool,
}

const CONSTRUCTED: u8 = 0x20;

fn decode_error(message: impl Into<String>) -> ControlError {
    ControlError::Decode(message.into())
}

impl<'a> BerReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            buf: Cursor::new(bytes),
            limits: Vec::new(),
            tag_override: false,
        }
    }

    fn position(&self) -> usize {
        self.buf.position() as usize
    }

    fn limit(&self) -> usize {
        self.limits
            .last()
            .copied()
            .unwrap_or_else(|| self.buf.get_ref().len())
    }

    fn remaining_in_scope(&self) -> usize {
        self.limit().saturating_sub(self.position())
    }

    fn peek_tag(&self) -> Option<u8> {
        if self.remaining_in_scope() == 0 {
            None
        } else {
            Some(self.buf.get_ref()[self.position()])
        }
    }

    pub fn read_length(buf: &mut Cursor<&[u8]>) -> Result<usize> {
        if buf.remaining() < 1 {
            return Err(decode_error("not enough data for length"));
        }

        let first_byte = buf.get_u8();
        if first_byte & 0x80 == 0 {
            return Ok(first_byte as usize);
        }

        let num_octets = (first_byte & 0x7f) as usize;
        if num_octets == 0 {
            return Err(decode_error("indefinite length is not supported"));
        }
        if num_octets > 4 || buf.remaining() < num_octets {
            return Err(decode_error("invalid length encoding"));
        }

        let mut length = 0usize;
        for _ in 0..num_octets {
            length = (length << 8) | (buf.get_u8() as usize);
        }
        Ok(length)
    }

    /// Reads tag and length, checking the element fits its enclosing sequence.
    fn read_header(&mut self, what: char) -> Result<(u8, usize)> {
        if self.remaining_in_scope() == 0 {
            return Err(decode_error(format!(
                "expected '{}' but the sequence has no more elements",
                what
            )));
        }
        let tag = self.buf.get_u8();
        let length = Self::read_length(&mut self.buf)?;
        if length > self.remaining_in_scope() {
            return Err(decode_error(format!(
                "element of length {} overruns its enclosing data",
                length
            )));
        }
        Ok((tag, length))
    }

    fn read_content(&mut self, length: usize) -> Vec<u8> {
        let mut content = vec![0u8; length];
        self.buf.copy_to_slice(&mut content);
        content
    }

    fn check_tag(&mut self, what: char, tag: u8, accepted: impl Fn(u8) -> bool) -> Result<()> {
        if std::mem::take(&mut self.tag_override) || accepted(tag) {
            Ok(())
        } else {
            Err(decode_error(format!(
                "unexpected tag 0x{:02x} for '{}'",
                tag, what
            )))
        }
    }

    fn read_signed(&mut self, what: char, expected: u8) -> Result<i32> {
        let (tag, length) = self.read_header(what)?;
        self.check_tag(what, tag, |t| t == expected)?;
        if length == 0 || length > 4 {
            return Err(decode_error(format!(
                "integer of {} octets does not fit in 32 bits",
                length
            )));
        }

        let content = self.read_content(length);
        let negative = content[0] & 0x80 != 0;
        let mut value: i64 = if negative { -1 } else { 0 };
        for byte in content {
            value = (value << 8) | byte as i64;
        }
        i32::try_from(value).map_err(|_| decode_error("integer out of range"))
    }

    fn read_string_bytes(&mut self, what: char) -> Result<Vec<u8>> {
        let (tag, length) = self.read_header(what)?;
        // Context-specific primitive tags carry strings such as the sort result [0].
        self.check_tag(what, tag, |t| {
            t == TAG_OCTET_STRING || (0x80..=0x9e).contains(&t)
        })?;
        Ok(self.read_content(length))
    }

    pub fn read(mut self, tokens: &[Token]) -> Result<Vec<BerValue>> {
        let mut values = Vec::new();

        for &token in tokens {
            match token {
                Token::Begin => {
                    let (tag, length) = self.read_header('{')?;
                    if tag & CONSTRUCTED == 0 {
                        return Err(decode_error(format!(
                            "tag 0x{:02x} is primitive, expected a constructed element",
                            tag
                        )));
                    }
                    self.check_tag('{', tag, |t| t == TAG_SEQUENCE)?;
                    let end = self.position() + length;
                    self.limits.push(end);
                }
                Token::End => {
                    // Trailing elements inside a sequence are skipped.
                    let end = self
                        .limits
                        .pop()
                        .ok_or_else(|| ControlError::Format("unbalanced '}'".to_string()))?;
                    self.buf.set_position(end as u64);
                }
                Token::Tag => {
                    let tag = self
                        .peek_tag()
                        .ok_or_else(|| decode_error("expected a tagged element"))?;
                    self.tag_override = true;
                    values.push(BerValue::Tag(tag));
                }
                Token::Integer => {
                    values.push(BerValue::Integer(self.read_signed('i', TAG_INTEGER)?));
                }
                Token::Enumerated => {
                    values.push(BerValue::Enumerated(
                        self.read_signed('e', TAG_ENUMERATED)?,
                    ));
                }
                Token::Boolean => {
                    let (tag, length) = self.read_header('b')?;
                    self.check_tag('b', tag, |t| t == TAG_BOOLEAN)?;
                    if length != 1 {
                        return Err(decode_error("boolean must be a single octet"));
                    }
                    values.push(BerValue::Boolean(self.buf.get_u8() != 0));
                }
                Token::String => {
                    let bytes = self.read_string_bytes('s')?;
                    let s = String::from_utf8(bytes)
                        .map_err(|_| decode_error("invalid UTF-8 in string"))?;
                    values.push(BerValue::String(s));
                }
                Token::Octets => {
                    values.push(BerValue::Octets(self.read_string_bytes('o')?));
                }
                Token::OptionalOctets => {
                    let bytes = self.read_string_bytes('O')?;
                    let value = if bytes.is_empty() { None } else { Some(bytes) };
                    values.push(BerValue::OptionalOctets(value));
                }
            }
        }

        if self.limits.is_empty() && self.position() != self.buf.get_ref().len() {
            return Err(decode_error(format!(
                "{} octets of trailing data after the outermost element",
                self.buf.get_ref().len() - self.position()
            )));
        }

        Ok(values)
    }
}
