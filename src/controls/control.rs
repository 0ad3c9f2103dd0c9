use crate::{ControlError, Result};

/// An LDAP control as it travels on the wire: OID, criticality and an
/// opaque value.
///
/// The value buffer is owned by the control. Constructors copy the bytes
/// they are given and [`DirectoryControl::value`] hands out a fresh copy,
/// so no caller can reach the stored buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryControl {
    oid: String,
    critical: bool,
    server_side: bool,
    value: Option<Vec<u8>>,
}

impl DirectoryControl {
    pub fn new(
        oid: impl Into<String>,
        value: Option<&[u8]>,
        critical: bool,
        server_side: bool,
    ) -> Result<Self> {
        let oid = oid.into();
        if oid.trim().is_empty() {
            return Err(ControlError::Validation(
                "control OID cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            oid,
            critical,
            server_side,
            value: value.map(|v| v.to_vec()),
        })
    }

    /// A control received from a server.
    pub fn raw(oid: impl Into<String>, critical: bool, value: Option<&[u8]>) -> Result<Self> {
        Self::new(oid, value, critical, true)
    }

    /// Request controls start out critical, server side and without a value.
    pub(crate) fn request(oid: &'static str) -> Self {
        Self {
            oid: oid.to_string(),
            critical: true,
            server_side: true,
            value: None,
        }
    }

    pub fn oid(&self) -> &str {
        &self.oid
    }

    pub fn critical(&self) -> bool {
        self.critical
    }

    pub fn set_critical(&mut self, critical: bool) {
        self.critical = critical;
    }

    pub fn server_side(&self) -> bool {
        self.server_side
    }

    /// Returns a copy of the value; empty when the control carries none.
    pub fn value(&self) -> Vec<u8> {
        self.value.clone().unwrap_or_default()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub(crate) fn value_ref(&self) -> &[u8] {
        self.value.as_deref().unwrap_or(&[])
    }

    pub(crate) fn store_value(&mut self, value: Option<Vec<u8>>) {
        self.value = value;
    }
}
