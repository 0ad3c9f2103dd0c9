pub mod control;
pub mod dispatch;
pub mod oid;
pub mod registry;
pub mod request;
pub mod response;
pub mod result_code;
pub mod sort;
pub mod vlv;

pub use control::DirectoryControl;
pub use dispatch::{transform, transform_controls};
pub use registry::{RequestControl, ResponseKind};
pub use request::{
    AsqRequest, CrossDomainMoveRequest, DirSyncOptions, DirSyncRequest, ExtendedDnFlag,
    ExtendedDnRequest, MarkerKind, MarkerRequest, PageResultRequest, QuotaRequest, SearchOption,
    SearchOptionsRequest, SecurityDescriptorFlagRequest, SecurityMasks, VerifyNameRequest,
};
pub use response::{
    AsqResponse, DirSyncResponse, PageResultResponse, ResponseControl, SortResponse, VlvResponse,
};
pub use result_code::ResultCode;
pub use sort::{SortKey, SortRequest};
pub use vlv::VlvRequest;

macro_rules! response_accessors {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// The underlying wire control, including its last value.
                pub fn control(&self) -> &$crate::controls::DirectoryControl {
                    &self.control
                }

                pub fn oid(&self) -> &str {
                    self.control.oid()
                }

                pub fn critical(&self) -> bool {
                    self.control.critical()
                }

                pub fn value(&self) -> Vec<u8> {
                    self.control.value()
                }
            }
        )+
    };
}

macro_rules! request_accessors {
    ($($ty:ty),+ $(,)?) => {
        $(
            $crate::controls::response_accessors!($ty);

            impl $ty {
                pub fn set_critical(&mut self, critical: bool) {
                    self.control.set_critical(critical);
                }

                pub fn into_control(self) -> $crate::controls::DirectoryControl {
                    self.control
                }
            }
        )+
    };
}

pub(crate) use request_accessors;
pub(crate) use response_accessors;
