use super::control::DirectoryControl;
use super::oid;
use super::request::{
    AsqRequest, CrossDomainMoveRequest, DirSyncRequest, ExtendedDnRequest, MarkerRequest,
    PageResultRequest, QuotaRequest, SearchOptionsRequest, SecurityDescriptorFlagRequest,
    VerifyNameRequest,
};
use super::response::{
    AsqResponse, DirSyncResponse, PageResultResponse, ResponseControl, SortResponse, VlvResponse,
};
use super::sort::SortRequest;
use super::vlv::VlvRequest;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestControl {
    PageResult(PageResultRequest),
    Asq(AsqRequest),
    Sort(SortRequest),
    Vlv(VlvRequest),
    DirSync(DirSyncRequest),
    VerifyName(VerifyNameRequest),
    SecurityDescriptorFlag(SecurityDescriptorFlagRequest),
    SearchOptions(SearchOptionsRequest),
    ExtendedDn(ExtendedDnRequest),
    Quota(QuotaRequest),
    CrossDomainMove(CrossDomainMoveRequest),
    Marker(MarkerRequest),
}

impl RequestControl {
    /// Validates the typed fields and writes the encoded value into the
    /// control. Returns a copy of the value.
    pub fn encode(&mut self) -> Result<Vec<u8>> {
        match self {
            RequestControl::PageResult(c) => c.encode(),
            RequestControl::Asq(c) => c.encode(),
            RequestControl::Sort(c) => c.encode(),
            RequestControl::Vlv(c) => c.encode(),
            RequestControl::DirSync(c) => c.encode(),
            RequestControl::VerifyName(c) => c.encode(),
            RequestControl::SecurityDescriptorFlag(c) => c.encode(),
            RequestControl::SearchOptions(c) => c.encode(),
            RequestControl::ExtendedDn(c) => c.encode(),
            RequestControl::Quota(c) => c.encode(),
            RequestControl::CrossDomainMove(c) => c.encode(),
            RequestControl::Marker(c) => c.encode(),
        }
    }

    pub fn control(&self) -> &DirectoryControl {
        match self {
            RequestControl::PageResult(c) => c.control(),
            RequestControl::Asq(c) => c.control(),
            RequestControl::Sort(c) => c.control(),
            RequestControl::Vlv(c) => c.control(),
            RequestControl::DirSync(c) => c.control(),
            RequestControl::VerifyName(c) => c.control(),
            RequestControl::SecurityDescriptorFlag(c) => c.control(),
            RequestControl::SearchOptions(c) => c.control(),
            RequestControl::ExtendedDn(c) => c.control(),
            RequestControl::Quota(c) => c.control(),
            RequestControl::CrossDomainMove(c) => c.control(),
            RequestControl::Marker(c) => c.control(),
        }
    }

    pub fn oid(&self) -> &str {
        self.control().oid()
    }

    /// Encodes the control and returns the wire form handed to the transport.
    pub fn to_wire(&mut self) -> Result<DirectoryControl> {
        self.encode()?;
        Ok(self.control().clone())
    }
}

macro_rules! request_from {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for RequestControl {
                fn from(control: $ty) -> Self {
                    RequestControl::$variant(control)
                }
            }
        )+
    };
}

request_from!(
    PageResult => PageResultRequest,
    Asq => AsqRequest,
    Sort => SortRequest,
    Vlv => VlvRequest,
    DirSync => DirSyncRequest,
    VerifyName => VerifyNameRequest,
    SecurityDescriptorFlag => SecurityDescriptorFlagRequest,
    SearchOptions => SearchOptionsRequest,
    ExtendedDn => ExtendedDnRequest,
    Quota => QuotaRequest,
    CrossDomainMove => CrossDomainMoveRequest,
    Marker => MarkerRequest,
);

/// Encodes every request control, failing on the first invalid one.
pub fn encode_all(controls: &mut [RequestControl]) -> Result<Vec<DirectoryControl>> {
    controls.iter_mut().map(RequestControl::to_wire).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    PageResult,
    Asq,
    DirSync,
    Sort,
    Vlv,
}

const RESPONSE_TABLE: &[(&str, ResponseKind)] = &[
    (oid::PAGE_RESULT, ResponseKind::PageResult),
    (oid::ASQ, ResponseKind::Asq),
    (oid::DIR_SYNC, ResponseKind::DirSync),
    (oid::SORT_RESPONSE, ResponseKind::Sort),
    (oid::VLV_RESPONSE, ResponseKind::Vlv),
];

pub fn lookup(oid: &str) -> Option<ResponseKind> {
    RESPONSE_TABLE
        .iter()
        .find(|(known, _)| *known == oid)
        .map(|(_, kind)| *kind)
}

impl ResponseKind {
    pub fn decode(self, control: &DirectoryControl) -> Result<ResponseControl> {
        Ok(match self {
            ResponseKind::PageResult => {
                ResponseControl::PageResult(PageResultResponse::decode(control)?)
            }
            ResponseKind::Asq => ResponseControl::Asq(AsqResponse::decode(control)?),
            ResponseKind::DirSync => ResponseControl::DirSync(DirSyncResponse::decode(control)?),
            ResponseKind::Sort => ResponseControl::Sort(SortResponse::decode(control)?),
            ResponseKind::Vlv => ResponseControl::Vlv(VlvResponse::decode(control)?),
        })
    }
}

/// Decodes a raw control into its typed response variant. `Ok(None)` means
/// the OID is not in the table, which is not an error.
pub fn decode_response(control: &DirectoryControl) -> Result<Option<ResponseControl>> {
    match lookup(control.oid()) {
        Some(kind) => kind.decode(control).map(Some),
        None => Ok(None),
    }
}
