use bytes::{BufMut, BytesMut};

use super::format::Token;
use super::{BerValue, TAG_BOOLEAN, TAG_ENUMERATED, TAG_INTEGER, TAG_OCTET_STRING, TAG_SEQUENCE};
use crate::{ControlError, Result};

pub struct BerWriter {
    out: BytesMut,
    // Open sequences: tag and content written so far.
    open: Vec<(u8, BytesMut)>,
    pending_tag: Option<u8>,
}

impl Default for BerWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BerWriter {
    pub fn new() -> Self {
        Self {
            out: BytesMut::with_capacity(64),
            open: Vec::new(),
            pending_tag: None,
        }
    }

    /// Lengths take at most four octets, the same limit the reader accepts.
    pub fn write_length(buf: &mut BytesMut, length: usize) -> Result<()> {
        if u32::try_from(length).is_err() {
            return Err(ControlError::Encode(format!(
                "element of {} octets exceeds the four octet length limit",
                length
            )));
        }

        if length < 128 {
            buf.put_u8(length as u8);
        } else if length < 256 {
            buf.put_u8(0x81);
            buf.put_u8(length as u8);
        } else if length < 65536 {
            buf.put_u8(0x82);
            buf.put_u16(length as u16);
        } else if length < (1 << 24) {
            buf.put_u8(0x83);
            buf.put_u8((length >> 16) as u8);
            buf.put_u8((length >> 8) as u8);
            buf.put_u8(length as u8);
        } else {
            buf.put_u8(0x84);
            buf.put_u32(length as u32);
        }
        Ok(())
    }

    pub fn write_element(buf: &mut BytesMut, tag: u8, content: &[u8]) -> Result<()> {
        buf.put_u8(tag);
        Self::write_length(buf, content.len())?;
        buf.put_slice(content);
        Ok(())
    }

    /// Minimal two's complement content octets.
    pub fn integer_content(value: i32) -> Vec<u8> {
        let bytes = value.to_be_bytes();
        let mut start = 0;
        while start < bytes.len() - 1 {
            let redundant_zero = bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0;
            let redundant_ones = bytes[start] == 0xff && bytes[start + 1] & 0x80 != 0;
            if redundant_zero || redundant_ones {
                start += 1;
            } else {
                break;
            }
        }
        bytes[start..].to_vec()
    }

    fn current(&mut self) -> &mut BytesMut {
        match self.open.last_mut() {
            Some((_, buf)) => buf,
            None => &mut self.out,
        }
    }

    fn take_tag(&mut self, default: u8) -> u8 {
        self.pending_tag.take().unwrap_or(default)
    }

    pub fn write(mut self, tokens: &[Token], values: &[BerValue]) -> Result<Vec<u8>> {
        let mut values = values.iter();

        for &token in tokens {
            match token {
                Token::Begin => {
                    let tag = self.take_tag(TAG_SEQUENCE);
                    self.open.push((tag, BytesMut::new()));
                }
                Token::End => {
                    let (tag, content) = self.open.pop().ok_or_else(|| {
                        ControlError::Format("unbalanced '}' while encoding".to_string())
                    })?;
                    Self::write_element(self.current(), tag, &content)?;
                }
                Token::Tag => match values.next() {
                    Some(BerValue::Tag(tag)) => self.pending_tag = Some(*tag),
                    other => return Err(mismatch(token, other)),
                },
                _ => {
                    let value = values.next();
                    self.write_scalar(token, value)?;
                }
            }
        }

        if let Some(extra) = values.next() {
            return Err(ControlError::Encode(format!(
                "more values than format elements (first unused: {:?})",
                extra
            )));
        }

        Ok(self.out.to_vec())
    }

    fn write_scalar(&mut self, token: Token, value: Option<&BerValue>) -> Result<()> {
        match (token, value) {
            (Token::Integer, Some(BerValue::Integer(i))) => {
                let tag = self.take_tag(TAG_INTEGER);
                Self::write_element(self.current(), tag, &Self::integer_content(*i))?;
            }
            (Token::Enumerated, Some(BerValue::Enumerated(e))) => {
                let tag = self.take_tag(TAG_ENUMERATED);
                Self::write_element(self.current(), tag, &Self::integer_content(*e))?;
            }
            (Token::Boolean, Some(BerValue::Boolean(b))) => {
                let tag = self.take_tag(TAG_BOOLEAN);
                let content = if *b { 0xff } else { 0x00 };
                Self::write_element(self.current(), tag, &[content])?;
            }
            (Token::String, Some(BerValue::String(s))) => {
                let tag = self.take_tag(TAG_OCTET_STRING);
                Self::write_element(self.current(), tag, s.as_bytes())?;
            }
            (Token::Octets, Some(BerValue::Octets(o))) => {
                let tag = self.take_tag(TAG_OCTET_STRING);
                Self::write_element(self.current(), tag, o)?;
            }
            (Token::OptionalOctets, Some(BerValue::OptionalOctets(o))) => {
                let tag = self.take_tag(TAG_OCTET_STRING);
                if let Some(o) = o {
                    Self::write_element(self.current(), tag, o)?;
                }
            }
            (token, other) => return Err(mismatch(token, other)),
        }
        Ok(())
    }
}

fn mismatch(token: Token, value: Option<&BerValue>) -> ControlError {
    match value {
        Some(value) => ControlError::Encode(format!(
            "format element '{}' cannot encode {:?}",
            token.symbol(),
            value
        )),
        None => ControlError::Encode(format!(
            "no value left for format element '{}'",
            token.symbol()
        )),
    }
}
