// Control OIDs. These strings are fixed by the protocol and must match exactly.

pub const PAGE_RESULT: &str = "1.2.840.113556.1.4.319";
pub const ASQ: &str = "1.2.840.113556.1.4.1504";
pub const SORT_REQUEST: &str = "1.2.840.113556.1.4.473";
pub const SORT_RESPONSE: &str = "1.2.840.113556.1.4.474";
pub const VLV_REQUEST: &str = "2.16.840.1.113730.3.4.9";
pub const VLV_RESPONSE: &str = "2.16.840.1.113730.3.4.10";
pub const DIR_SYNC: &str = "1.2.840.113556.1.4.841";
pub const VERIFY_NAME: &str = "1.2.840.113556.1.4.1338";
pub const SECURITY_DESCRIPTOR_FLAG: &str = "1.2.840.113556.1.4.801";
pub const SEARCH_OPTIONS: &str = "1.2.840.113556.1.4.1340";
pub const EXTENDED_DN: &str = "1.2.840.113556.1.4.529";
pub const QUOTA: &str = "1.2.840.113556.1.4.1852";
pub const CROSS_DOMAIN_MOVE: &str = "1.2.840.113556.1.4.521";

pub const DOMAIN_SCOPE: &str = "1.2.840.113556.1.4.1339";
pub const LAZY_COMMIT: &str = "1.2.840.113556.1.4.619";
pub const DIRECTORY_NOTIFICATION: &str = "1.2.840.113556.1.4.528";
pub const PERMISSIVE_MODIFY: &str = "1.2.840.113556.1.4.1413";
pub const SHOW_DELETED: &str = "1.2.840.113556.1.4.417";
pub const TREE_DELETE: &str = "1.2.840.113556.1.4.805";
