// Framing of the `controls` element of an LDAP message:
//
//   Controls ::= [0] SEQUENCE OF control SEQUENCE {
//        controlType     LDAPOID,
//        criticality     BOOLEAN DEFAULT FALSE,
//        controlValue    OCTET STRING OPTIONAL }

use bytes::{Buf, BytesMut};
use std::io::Cursor;
use tokio_util::codec::{Decoder, Encoder};
use tracing::debug;

use crate::ber::{BerReader, BerWriter, TAG_BOOLEAN, TAG_OCTET_STRING, TAG_SEQUENCE};
use crate::controls::DirectoryControl;
use crate::{ControlError, Result};

pub const CONTROLS_TAG: u8 = 0xa0;

/// Largest control list the decoder will buffer.
pub const MAX_LIST_LENGTH: usize = 1024 * 1024;

pub struct ControlListCodec;

impl ControlListCodec {
    fn read_header(buf: &mut Cursor<&[u8]>) -> Result<(u8, usize)> {
        if buf.remaining() < 1 {
            return Err(ControlError::Decode("not enough data for tag".to_string()));
        }
        let tag = buf.get_u8();
        let length = BerReader::read_length(buf)?;
        if buf.remaining() < length {
            return Err(ControlError::Decode(format!(
                "element of length {} overruns the buffer",
                length
            )));
        }
        Ok((tag, length))
    }

    fn read_bytes(buf: &mut Cursor<&[u8]>, length: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; length];
        buf.copy_to_slice(&mut bytes);
        bytes
    }

    fn read_control(buf: &mut Cursor<&[u8]>) -> Result<DirectoryControl> {
        let (tag, length) = Self::read_header(buf)?;
        if tag != TAG_SEQUENCE {
            return Err(ControlError::Decode(format!(
                "expected control SEQUENCE, got tag 0x{:02x}",
                tag
            )));
        }
        let end = buf.position() as usize + length;

        let (tag, length) = Self::read_header(buf)?;
        if tag != TAG_OCTET_STRING {
            return Err(ControlError::Decode("expected controlType".to_string()));
        }
        let oid = String::from_utf8(Self::read_bytes(buf, length))
            .map_err(|_| ControlError::Decode("controlType is not valid UTF-8".to_string()))?;

        let mut critical = false;
        let mut value = None;
        while (buf.position() as usize) < end {
            let (tag, length) = Self::read_header(buf)?;
            match tag {
                TAG_BOOLEAN if length == 1 && value.is_none() => critical = buf.get_u8() != 0,
                TAG_OCTET_STRING if value.is_none() => value = Some(Self::read_bytes(buf, length)),
                other => {
                    return Err(ControlError::Decode(format!(
                        "unexpected tag 0x{:02x} in control {}",
                        other, oid
                    )));
                }
            }
        }
        if buf.position() as usize != end {
            return Err(ControlError::Decode(format!(
                "control {} overruns its declared length",
                oid
            )));
        }

        DirectoryControl::raw(oid, critical, value.as_deref())
    }

    fn write_control(buf: &mut BytesMut, control: &DirectoryControl) -> Result<()> {
        let mut content = BytesMut::new();
        BerWriter::write_element(&mut content, TAG_OCTET_STRING, control.oid().as_bytes())?;
        // DEFAULT FALSE is left out.
        if control.critical() {
            BerWriter::write_element(&mut content, TAG_BOOLEAN, &[0xff])?;
        }
        if control.has_value() {
            BerWriter::write_element(&mut content, TAG_OCTET_STRING, &control.value())?;
        }
        BerWriter::write_element(buf, TAG_SEQUENCE, &content)
    }

    /// Encodes a control list into a standalone buffer.
    pub fn encode_list(controls: &[DirectoryControl]) -> Result<Vec<u8>> {
        let mut content = BytesMut::new();
        for control in controls {
            Self::write_control(&mut content, control)?;
        }
        let mut out = BytesMut::with_capacity(content.len() + 6);
        BerWriter::write_element(&mut out, CONTROLS_TAG, &content)?;
        Ok(out.to_vec())
    }
}

impl Decoder for ControlListCodec {
    type Item = Vec<DirectoryControl>;
    type Error = ControlError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if src.len() < 2 {
            return Ok(None);
        }

        if src[0] != CONTROLS_TAG {
            return Err(ControlError::Decode(format!(
                "expected controls [0], got tag 0x{:02x}",
                src[0]
            )));
        }

        let (list_length, header_len) = if src[1] & 0x80 == 0 {
            (src[1] as usize, 2)
        } else {
            let num_octets = (src[1] & 0x7f) as usize;
            if num_octets == 0 || num_octets > 4 {
                return Err(ControlError::Decode("invalid length encoding".to_string()));
            }
            if src.len() < 2 + num_octets {
                return Ok(None);
            }

            let mut length = 0usize;
            for i in 0..num_octets {
                length = (length << 8) | (src[2 + i] as usize);
            }
            (length, 2 + num_octets)
        };

        if list_length > MAX_LIST_LENGTH {
            return Err(ControlError::Decode(format!(
                "control list of {} octets exceeds the limit of {}",
                list_length, MAX_LIST_LENGTH
            )));
        }

        let total_len = header_len + list_length;
        if src.len() < total_len {
            return Ok(None);
        }

        let mut cursor = Cursor::new(&src[..total_len]);
        cursor.set_position(header_len as u64);

        let mut controls = Vec::new();
        while cursor.has_remaining() {
            controls.push(Self::read_control(&mut cursor)?);
        }

        debug!("Decoded control list with {} controls", controls.len());
        src.advance(total_len);
        Ok(Some(controls))
    }
}

impl Encoder<Vec<DirectoryControl>> for ControlListCodec {
    type Error = ControlError;

    fn encode(&mut self, item: Vec<DirectoryControl>, dst: &mut BytesMut) -> Result<()> {
        dst.extend_from_slice(&Self::encode_list(&item)?);
        Ok(())
    }
}
