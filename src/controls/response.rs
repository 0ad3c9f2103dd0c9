use tracing::debug;

use super::control::DirectoryControl;
use super::result_code::ResultCode;
use crate::ber::{self, BerValue};
use crate::Result;

fn take(values: &mut std::vec::IntoIter<BerValue>) -> Result<BerValue> {
    values
        .next()
        .ok_or_else(|| crate::ControlError::Decode("missing decoded field".to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResultResponse {
    control: DirectoryControl,
    total_count: i32,
    cookie: Vec<u8>,
}

impl PageResultResponse {
    pub(crate) fn decode(control: &DirectoryControl) -> Result<Self> {
        let mut values = ber::decode("{iO}", control.value_ref())?.into_iter();
        let total_count = take(&mut values)?.as_integer()?;
        // An empty cookie means the paged search is done.
        let cookie = take(&mut values)?.into_optional_octets()?.unwrap_or_default();

        Ok(Self {
            control: control.clone(),
            total_count,
            cookie,
        })
    }

    pub fn total_count(&self) -> i32 {
        self.total_count
    }

    pub fn cookie(&self) -> Vec<u8> {
        self.cookie.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsqResponse {
    control: DirectoryControl,
    result: ResultCode,
}

impl AsqResponse {
    pub(crate) fn decode(control: &DirectoryControl) -> Result<Self> {
        let mut values = ber::decode("{e}", control.value_ref())?.into_iter();
        let result = ResultCode::from(take(&mut values)?.as_enumerated()?);

        Ok(Self {
            control: control.clone(),
            result,
        })
    }

    pub fn result(&self) -> ResultCode {
        self.result
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirSyncResponse {
    control: DirectoryControl,
    cookie: Vec<u8>,
    more_data: bool,
    result_size: i32,
}

impl DirSyncResponse {
    pub(crate) fn decode(control: &DirectoryControl) -> Result<Self> {
        let mut values = ber::decode("{iiO}", control.value_ref())?.into_iter();
        let more_data = take(&mut values)?.as_integer()? != 0;
        let result_size = take(&mut values)?.as_integer()?;
        let cookie = take(&mut values)?.into_optional_octets()?.unwrap_or_default();

        Ok(Self {
            control: control.clone(),
            cookie,
            more_data,
            result_size,
        })
    }

    pub fn cookie(&self) -> Vec<u8> {
        self.cookie.clone()
    }

    pub fn more_data(&self) -> bool {
        self.more_data
    }

    pub fn result_size(&self) -> i32 {
        self.result_size
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortResponse {
    control: DirectoryControl,
    result: ResultCode,
    attribute_name: Option<String>,
}

impl SortResponse {
    /// Servers may leave out the attribute name (Active Directory never
    /// sends it), so the full shape is tried first and the bare result code
    /// second.
    pub(crate) fn decode(control: &DirectoryControl) -> Result<Self> {
        let bytes = control.value_ref();

        let (result, attribute_name) = match ber::try_decode("{ea}", bytes) {
            Some(values) => {
                let mut values = values.into_iter();
                let result = take(&mut values)?.as_enumerated()?;
                let attribute = take(&mut values)?.into_string()?;
                (result, Some(attribute))
            }
            None => {
                debug!("Sort response without attribute name");
                let mut values = ber::decode("{e}", bytes)?.into_iter();
                (take(&mut values)?.as_enumerated()?, None)
            }
        };

        Ok(Self {
            control: control.clone(),
            result: ResultCode::from(result),
            attribute_name,
        })
    }

    pub fn result(&self) -> ResultCode {
        self.result
    }

    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute_name.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlvResponse {
    control: DirectoryControl,
    target_position: i32,
    content_count: i32,
    context_id: Vec<u8>,
    result: ResultCode,
}

impl VlvResponse {
    pub(crate) fn decode(control: &DirectoryControl) -> Result<Self> {
        let bytes = control.value_ref();

        let values = match ber::try_decode("{iieO}", bytes) {
            Some(values) => values,
            None => {
                debug!("VLV response without context id");
                ber::decode("{iie}", bytes)?
            }
        };
        let mut values = values.into_iter();

        let target_position = take(&mut values)?.as_integer()?;
        let content_count = take(&mut values)?.as_integer()?;
        let result = ResultCode::from(take(&mut values)?.as_enumerated()?);
        let context_id = match values.next() {
            Some(value) => value.into_optional_octets()?.unwrap_or_default(),
            None => Vec::new(),
        };

        Ok(Self {
            control: control.clone(),
            target_position,
            content_count,
            context_id,
            result,
        })
    }

    pub fn target_position(&self) -> i32 {
        self.target_position
    }

    pub fn content_count(&self) -> i32 {
        self.content_count
    }

    pub fn context_id(&self) -> Vec<u8> {
        self.context_id.clone()
    }

    pub fn result(&self) -> ResultCode {
        self.result
    }
}

super::response_accessors!(
    PageResultResponse,
    AsqResponse,
    DirSyncResponse,
    SortResponse,
    VlvResponse,
);

/// A response control after dispatch: either one of the known typed
/// variants or the raw control, untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseControl {
    PageResult(PageResultResponse),
    Asq(AsqResponse),
    DirSync(DirSyncResponse),
    Sort(SortResponse),
    Vlv(VlvResponse),
    Raw(DirectoryControl),
}

impl ResponseControl {
    pub fn control(&self) -> &DirectoryControl {
        match self {
            ResponseControl::PageResult(c) => c.control(),
            ResponseControl::Asq(c) => c.control(),
            ResponseControl::DirSync(c) => c.control(),
            ResponseControl::Sort(c) => c.control(),
            ResponseControl::Vlv(c) => c.control(),
            ResponseControl::Raw(c) => c,
        }
    }

    pub fn oid(&self) -> &str {
        self.control().oid()
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, ResponseControl::Raw(_))
    }
}

impl From<DirectoryControl> for ResponseControl {
    fn from(control: DirectoryControl) -> Self {
        ResponseControl::Raw(control)
    }
}
