use bitflags::bitflags;

use super::control::DirectoryControl;
use super::oid;
use crate::ber::{self, BerValue};
use crate::{ControlError, Result};

pub const DEFAULT_PAGE_SIZE: i32 = 512;
pub const DEFAULT_DIR_SYNC_ATTRIBUTE_COUNT: i32 = 1_048_576;

bitflags! {
    /// Parts of the security descriptor the server should return.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SecurityMasks: u32 {
        const OWNER = 0x1;
        const GROUP = 0x2;
        const DACL = 0x4;
        const SACL = 0x8;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DirSyncOptions: u32 {
        const OBJECT_SECURITY = 0x1;
        const PARENTS_FIRST = 0x0800;
        const PUBLIC_DATA_ONLY = 0x2000;
        const INCREMENTAL_VALUES = 0x8000_0000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOption {
    DomainScope = 1,
    PhantomRoot = 2,
}

impl TryFrom<i32> for SearchOption {
    type Error = ControlError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            1 => Ok(SearchOption::DomainScope),
            2 => Ok(SearchOption::PhantomRoot),
            other => Err(ControlError::Validation(format!(
                "{} is not a valid search option",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtendedDnFlag {
    #[default]
    HexString = 0,
    StandardString = 1,
}

impl TryFrom<i32> for ExtendedDnFlag {
    type Error = ControlError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(ExtendedDnFlag::HexString),
            1 => Ok(ExtendedDnFlag::StandardString),
            other => Err(ControlError::Validation(format!(
                "{} is not a valid extended DN flag",
                other
            ))),
        }
    }
}

pub(crate) fn non_negative(field: &str, value: i32) -> Result<i32> {
    if value < 0 {
        return Err(ControlError::Validation(format!(
            "{} must not be negative (got {})",
            field, value
        )));
    }
    Ok(value)
}

/// Encodes `values` with `format` and stores the result as the control value.
pub(crate) fn store_encoded(
    control: &mut DirectoryControl,
    format: &str,
    values: &[BerValue],
) -> Result<Vec<u8>> {
    let bytes = ber::encode(format, values)?;
    control.store_value(Some(bytes));
    Ok(control.value())
}

/// Simple paged results (RFC 2696).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResultRequest {
    control: DirectoryControl,
    page_size: i32,
    cookie: Option<Vec<u8>>,
}

impl Default for PageResultRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl PageResultRequest {
    pub fn new() -> Self {
        Self {
            control: DirectoryControl::request(oid::PAGE_RESULT),
            page_size: DEFAULT_PAGE_SIZE,
            cookie: None,
        }
    }

    pub fn with_page_size(page_size: i32) -> Result<Self> {
        let mut request = Self::new();
        request.set_page_size(page_size)?;
        Ok(request)
    }

    pub fn with_cookie(cookie: &[u8]) -> Self {
        let mut request = Self::new();
        request.set_cookie(Some(cookie));
        request
    }

    pub fn page_size(&self) -> i32 {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: i32) -> Result<()> {
        self.page_size = non_negative("page size", page_size)?;
        Ok(())
    }

    pub fn cookie(&self) -> Vec<u8> {
        self.cookie.clone().unwrap_or_default()
    }

    pub fn set_cookie(&mut self, cookie: Option<&[u8]>) {
        self.cookie = cookie.map(|c| c.to_vec());
    }

    pub fn encode(&mut self) -> Result<Vec<u8>> {
        non_negative("page size", self.page_size)?;
        let values = [
            BerValue::Integer(self.page_size),
            BerValue::Octets(self.cookie()),
        ];
        store_encoded(&mut self.control, "{io}", &values)
    }
}

/// Attribute scoped query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsqRequest {
    control: DirectoryControl,
    attribute_name: String,
}

impl AsqRequest {
    pub fn new(attribute_name: impl Into<String>) -> Self {
        Self {
            control: DirectoryControl::request(oid::ASQ),
            attribute_name: attribute_name.into(),
        }
    }

    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    pub fn set_attribute_name(&mut self, attribute_name: impl Into<String>) {
        self.attribute_name = attribute_name.into();
    }

    pub fn encode(&mut self) -> Result<Vec<u8>> {
        let values = [BerValue::String(self.attribute_name.clone())];
        store_encoded(&mut self.control, "{s}", &values)
    }
}

/// Active Directory DirSync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirSyncRequest {
    control: DirectoryControl,
    cookie: Option<Vec<u8>>,
    options: DirSyncOptions,
    attribute_count: i32,
}

impl Default for DirSyncRequest {
    fn default() -> Self {
        Self::new(None, DirSyncOptions::empty())
    }
}

impl DirSyncRequest {
    pub fn new(cookie: Option<&[u8]>, options: DirSyncOptions) -> Self {
        Self {
            control: DirectoryControl::request(oid::DIR_SYNC),
            cookie: cookie.map(|c| c.to_vec()),
            options,
            attribute_count: DEFAULT_DIR_SYNC_ATTRIBUTE_COUNT,
        }
    }

    pub fn with_attribute_count(
        cookie: Option<&[u8]>,
        options: DirSyncOptions,
        attribute_count: i32,
    ) -> Result<Self> {
        let mut request = Self::new(cookie, options);
        request.set_attribute_count(attribute_count)?;
        Ok(request)
    }

    pub fn cookie(&self) -> Vec<u8> {
        self.cookie.clone().unwrap_or_default()
    }

    pub fn set_cookie(&mut self, cookie: Option<&[u8]>) {
        self.cookie = cookie.map(|c| c.to_vec());
    }

    pub fn options(&self) -> DirSyncOptions {
        self.options
    }

    /// Unknown bits are kept; the server decides what it accepts.
    pub fn set_options(&mut self, options: DirSyncOptions) {
        self.options = options;
    }

    pub fn attribute_count(&self) -> i32 {
        self.attribute_count
    }

    pub fn set_attribute_count(&mut self, attribute_count: i32) -> Result<()> {
        self.attribute_count = non_negative("attribute count", attribute_count)?;
        Ok(())
    }

    pub fn encode(&mut self) -> Result<Vec<u8>> {
        non_negative("attribute count", self.attribute_count)?;
        let values = [
            BerValue::Integer(self.options.bits() as i32),
            BerValue::Integer(self.attribute_count),
            BerValue::Octets(self.cookie()),
        ];
        store_encoded(&mut self.control, "{iio}", &values)
    }
}

/// Names the server to use when verifying DN references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyNameRequest {
    control: DirectoryControl,
    server_name: String,
    flag: i32,
}

impl VerifyNameRequest {
    pub fn new(server_name: impl Into<String>) -> Self {
        Self::with_flag(server_name, 0)
    }

    pub fn with_flag(server_name: impl Into<String>, flag: i32) -> Self {
        Self {
            control: DirectoryControl::request(oid::VERIFY_NAME),
            server_name: server_name.into(),
            flag,
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn set_server_name(&mut self, server_name: impl Into<String>) {
        self.server_name = server_name.into();
    }

    pub fn flag(&self) -> i32 {
        self.flag
    }

    pub fn set_flag(&mut self, flag: i32) {
        self.flag = flag;
    }

    pub fn encode(&mut self) -> Result<Vec<u8>> {
        // The server name travels as UTF-16LE.
        let name: Vec<u8> = self
            .server_name
            .encode_utf16()
            .flat_map(|unit| unit.to_le_bytes())
            .collect();
        let values = [BerValue::Integer(self.flag), BerValue::Octets(name)];
        store_encoded(&mut self.control, "{io}", &values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityDescriptorFlagRequest {
    control: DirectoryControl,
    masks: SecurityMasks,
}

impl SecurityDescriptorFlagRequest {
    pub fn new(masks: SecurityMasks) -> Self {
        Self {
            control: DirectoryControl::request(oid::SECURITY_DESCRIPTOR_FLAG),
            masks,
        }
    }

    pub fn masks(&self) -> SecurityMasks {
        self.masks
    }

    pub fn set_masks(&mut self, masks: SecurityMasks) {
        self.masks = masks;
    }

    pub fn encode(&mut self) -> Result<Vec<u8>> {
        let values = [BerValue::Integer(self.masks.bits() as i32)];
        store_encoded(&mut self.control, "{i}", &values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptionsRequest {
    control: DirectoryControl,
    option: SearchOption,
}

impl SearchOptionsRequest {
    pub fn new(option: SearchOption) -> Self {
        Self {
            control: DirectoryControl::request(oid::SEARCH_OPTIONS),
            option,
        }
    }

    pub fn option(&self) -> SearchOption {
        self.option
    }

    pub fn set_option(&mut self, option: SearchOption) {
        self.option = option;
    }

    /// Sets the option from its numeric protocol value.
    pub fn set_option_value(&mut self, value: i32) -> Result<()> {
        self.option = SearchOption::try_from(value)?;
        Ok(())
    }

    pub fn encode(&mut self) -> Result<Vec<u8>> {
        let values = [BerValue::Integer(self.option as i32)];
        store_encoded(&mut self.control, "{i}", &values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedDnRequest {
    control: DirectoryControl,
    flag: ExtendedDnFlag,
}

impl Default for ExtendedDnRequest {
    fn default() -> Self {
        Self::new(ExtendedDnFlag::default())
    }
}

impl ExtendedDnRequest {
    pub fn new(flag: ExtendedDnFlag) -> Self {
        Self {
            control: DirectoryControl::request(oid::EXTENDED_DN),
            flag,
        }
    }

    pub fn flag(&self) -> ExtendedDnFlag {
        self.flag
    }

    pub fn set_flag(&mut self, flag: ExtendedDnFlag) {
        self.flag = flag;
    }

    pub fn set_flag_value(&mut self, value: i32) -> Result<()> {
        self.flag = ExtendedDnFlag::try_from(value)?;
        Ok(())
    }

    pub fn encode(&mut self) -> Result<Vec<u8>> {
        let values = [BerValue::Integer(self.flag as i32)];
        store_encoded(&mut self.control, "{i}", &values)
    }
}

/// Quota query for the security principal identified by `query_sid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaRequest {
    control: DirectoryControl,
    query_sid: Vec<u8>,
}

impl QuotaRequest {
    pub fn new(query_sid: &[u8]) -> Self {
        Self {
            control: DirectoryControl::request(oid::QUOTA),
            query_sid: query_sid.to_vec(),
        }
    }

    pub fn query_sid(&self) -> Vec<u8> {
        self.query_sid.clone()
    }

    pub fn set_query_sid(&mut self, query_sid: &[u8]) {
        self.query_sid = query_sid.to_vec();
    }

    pub fn encode(&mut self) -> Result<Vec<u8>> {
        let values = [BerValue::Octets(self.query_sid.clone())];
        store_encoded(&mut self.control, "{o}", &values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossDomainMoveRequest {
    control: DirectoryControl,
    target_domain_controller: Option<String>,
}

impl CrossDomainMoveRequest {
    pub fn new(target_domain_controller: Option<String>) -> Self {
        Self {
            control: DirectoryControl::request(oid::CROSS_DOMAIN_MOVE),
            target_domain_controller,
        }
    }

    pub fn target_domain_controller(&self) -> Option<&str> {
        self.target_domain_controller.as_deref()
    }

    pub fn set_target_domain_controller(&mut self, target: Option<String>) {
        self.target_domain_controller = target;
    }

    /// The value is the raw UTF-8 name followed by two NUL bytes, not BER.
    pub fn encode(&mut self) -> Result<Vec<u8>> {
        if let Some(target) = &self.target_domain_controller {
            let mut bytes = target.as_bytes().to_vec();
            bytes.extend_from_slice(&[0, 0]);
            self.control.store_value(Some(bytes));
        }
        Ok(self.control.value())
    }
}

/// Controls whose presence is the whole message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    DomainScope,
    LazyCommit,
    DirectoryNotification,
    PermissiveModify,
    ShowDeleted,
    TreeDelete,
}

impl MarkerKind {
    pub fn oid(self) -> &'static str {
        match self {
            MarkerKind::DomainScope => oid::DOMAIN_SCOPE,
            MarkerKind::LazyCommit => oid::LAZY_COMMIT,
            MarkerKind::DirectoryNotification => oid::DIRECTORY_NOTIFICATION,
            MarkerKind::PermissiveModify => oid::PERMISSIVE_MODIFY,
            MarkerKind::ShowDeleted => oid::SHOW_DELETED,
            MarkerKind::TreeDelete => oid::TREE_DELETE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRequest {
    control: DirectoryControl,
    kind: MarkerKind,
}

impl MarkerRequest {
    pub fn new(kind: MarkerKind) -> Self {
        Self {
            control: DirectoryControl::request(kind.oid()),
            kind,
        }
    }

    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    pub fn encode(&mut self) -> Result<Vec<u8>> {
        Ok(self.control.value())
    }
}

super::request_accessors!(
    PageResultRequest,
    AsqRequest,
    DirSyncRequest,
    VerifyNameRequest,
    SecurityDescriptorFlagRequest,
    SearchOptionsRequest,
    ExtendedDnRequest,
    QuotaRequest,
    CrossDomainMoveRequest,
    MarkerRequest,
);
