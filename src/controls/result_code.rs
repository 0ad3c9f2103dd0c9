/// LDAP result codes carried by response controls (RFC 4511, RFC 2891 and
/// the VLV draft). Codes outside the table are kept as `Unrecognized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Success,
    OperationsError,
    ProtocolError,
    TimeLimitExceeded,
    SizeLimitExceeded,
    CompareFalse,
    CompareTrue,
    AuthMethodNotSupported,
    StrongerAuthRequired,
    Referral,
    AdminLimitExceeded,
    UnavailableCriticalExtension,
    ConfidentialityRequired,
    SaslBindInProgress,
    NoSuchAttribute,
    UndefinedAttributeType,
    InappropriateMatching,
    ConstraintViolation,
    AttributeOrValueExists,
    InvalidAttributeSyntax,
    NoSuchObject,
    AliasProblem,
    InvalidDNSyntax,
    AliasDereferencingProblem,
    InappropriateAuthentication,
    InvalidCredentials,
    InsufficientAccessRights,
    Busy,
    Unavailable,
    UnwillingToPerform,
    LoopDetect,
    SortControlMissing,
    OffsetRangeError,
    NamingViolation,
    ObjectClassViolation,
    NotAllowedOnNonLeaf,
    NotAllowedOnRDN,
    EntryAlreadyExists,
    ObjectClassModsProhibited,
    AffectsMultipleDSAs,
    VirtualListViewError,
    Other,
    Unrecognized(i32),
}

const CODES: &[(i32, ResultCode)] = &[
    (0, ResultCode::Success),
    (1, ResultCode::OperationsError),
    (2, ResultCode::ProtocolError),
    (3, ResultCode::TimeLimitExceeded),
    (4, ResultCode::SizeLimitExceeded),
    (5, ResultCode::CompareFalse),
    (6, ResultCode::CompareTrue),
    (7, ResultCode::AuthMethodNotSupported),
    (8, ResultCode::StrongerAuthRequired),
    (10, ResultCode::Referral),
    (11, ResultCode::AdminLimitExceeded),
    (12, ResultCode::UnavailableCriticalExtension),
    (13, ResultCode::ConfidentialityRequired),
    (14, ResultCode::SaslBindInProgress),
    (16, ResultCode::NoSuchAttribute),
    (17, ResultCode::UndefinedAttributeType),
    (18, ResultCode::InappropriateMatching),
    (19, ResultCode::ConstraintViolation),
    (20, ResultCode::AttributeOrValueExists),
    (21, ResultCode::InvalidAttributeSyntax),
    (32, ResultCode::NoSuchObject),
    (33, ResultCode::AliasProblem),
    (34, ResultCode::InvalidDNSyntax),
    (36, ResultCode::AliasDereferencingProblem),
    (48, ResultCode::InappropriateAuthentication),
    (49, ResultCode::InvalidCredentials),
    (50, ResultCode::InsufficientAccessRights),
    (51, ResultCode::Busy),
    (52, ResultCode::Unavailable),
    (53, ResultCode::UnwillingToPerform),
    (54, ResultCode::LoopDetect),
    (60, ResultCode::SortControlMissing),
    (61, ResultCode::OffsetRangeError),
    (64, ResultCode::NamingViolation),
    (65, ResultCode::ObjectClassViolation),
    (66, ResultCode::NotAllowedOnNonLeaf),
    (67, ResultCode::NotAllowedOnRDN),
    (68, ResultCode::EntryAlreadyExists),
    (69, ResultCode::ObjectClassModsProhibited),
    (71, ResultCode::AffectsMultipleDSAs),
    (76, ResultCode::VirtualListViewError),
    (80, ResultCode::Other),
];

impl ResultCode {
    pub fn code(self) -> i32 {
        match self {
            ResultCode::Unrecognized(code) => code,
            known => CODES
                .iter()
                .find(|(_, c)| *c == known)
                .map(|(code, _)| *code)
                .unwrap_or_default(),
        }
    }

    pub fn is_success(self) -> bool {
        self == ResultCode::Success
    }
}

impl From<i32> for ResultCode {
    fn from(code: i32) -> Self {
        CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, result)| *result)
            .unwrap_or(ResultCode::Unrecognized(code))
    }
}
