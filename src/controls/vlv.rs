use super::control::DirectoryControl;
use super::oid;
use super::request::{non_negative, store_encoded};
use crate::ber::{context_constructed_tag, context_tag, BerValue};
use crate::Result;

/// Virtual list view request.
///
/// The target entry is chosen either by assertion value (`target`) or by
/// position (`offset` within `estimate_count`). A non-empty `target` always
/// wins; the positional form is sent otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlvRequest {
    control: DirectoryControl,
    before_count: i32,
    after_count: i32,
    offset: i32,
    estimate_count: i32,
    target: Option<Vec<u8>>,
    context_id: Option<Vec<u8>>,
}

impl Default for VlvRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl VlvRequest {
    pub fn new() -> Self {
        Self {
            control: DirectoryControl::request(oid::VLV_REQUEST),
            before_count: 0,
            after_count: 0,
            offset: 0,
            estimate_count: 0,
            target: None,
            context_id: None,
        }
    }

    pub fn by_offset(before_count: i32, after_count: i32, offset: i32) -> Result<Self> {
        let mut request = Self::new();
        request.set_before_count(before_count)?;
        request.set_after_count(after_count)?;
        request.set_offset(offset)?;
        Ok(request)
    }

    pub fn by_target(before_count: i32, after_count: i32, target: &[u8]) -> Result<Self> {
        let mut request = Self::new();
        request.set_before_count(before_count)?;
        request.set_after_count(after_count)?;
        request.set_target(Some(target));
        Ok(request)
    }

    pub fn before_count(&self) -> i32 {
        self.before_count
    }

    pub fn set_before_count(&mut self, before_count: i32) -> Result<()> {
        self.before_count = non_negative("before count", before_count)?;
        Ok(())
    }

    pub fn after_count(&self) -> i32 {
        self.after_count
    }

    pub fn set_after_count(&mut self, after_count: i32) -> Result<()> {
        self.after_count = non_negative("after count", after_count)?;
        Ok(())
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: i32) -> Result<()> {
        self.offset = non_negative("offset", offset)?;
        Ok(())
    }

    pub fn estimate_count(&self) -> i32 {
        self.estimate_count
    }

    pub fn set_estimate_count(&mut self, estimate_count: i32) -> Result<()> {
        self.estimate_count = non_negative("estimate count", estimate_count)?;
        Ok(())
    }

    pub fn target(&self) -> Vec<u8> {
        self.target.clone().unwrap_or_default()
    }

    pub fn set_target(&mut self, target: Option<&[u8]>) {
        self.target = target.map(|t| t.to_vec());
    }

    pub fn context_id(&self) -> Vec<u8> {
        self.context_id.clone().unwrap_or_default()
    }

    pub fn set_context_id(&mut self, context_id: Option<&[u8]>) {
        self.context_id = context_id.map(|c| c.to_vec());
    }

    fn validate(&self) -> Result<()> {
        non_negative("before count", self.before_count)?;
        non_negative("after count", self.after_count)?;
        non_negative("offset", self.offset)?;
        non_negative("estimate count", self.estimate_count)?;
        Ok(())
    }

    pub fn encode(&mut self) -> Result<Vec<u8>> {
        self.validate()?;

        let mut format = String::from("{ii");
        let mut values = vec![
            BerValue::Integer(self.before_count),
            BerValue::Integer(self.after_count),
        ];

        let target = self.target();
        if !target.is_empty() {
            // greaterThanOrEqual [1] AssertionValue
            format.push_str("to");
            values.push(BerValue::Tag(context_tag(1)));
            values.push(BerValue::Octets(target));
        } else {
            // byOffset [0] SEQUENCE { offset, contentCount }
            format.push_str("t{ii}");
            values.push(BerValue::Tag(context_constructed_tag(0)));
            values.push(BerValue::Integer(self.offset));
            values.push(BerValue::Integer(self.estimate_count));
        }

        let context_id = self.context_id();
        if !context_id.is_empty() {
            format.push('o');
            values.push(BerValue::Octets(context_id));
        }
        format.push('}');

        store_encoded(&mut self.control, &format, &values)
    }
}

super::request_accessors!(VlvRequest);
