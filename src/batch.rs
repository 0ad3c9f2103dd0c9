use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::controls::{transform, DirectoryControl, ResponseControl};

/// A YAML document listing raw response controls, as captured from a
/// server, with base64 values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlBatch {
    #[serde(default)]
    pub controls: Vec<RawControlEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawControlEntry {
    pub oid: String,
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub value: Option<String>,
}

impl ControlBatch {
    pub fn from_yaml_str(content: &str) -> crate::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn into_controls(self) -> crate::Result<Vec<DirectoryControl>> {
        self.controls
            .into_iter()
            .map(|entry| {
                let value = entry
                    .value
                    .as_deref()
                    .map(|v| BASE64.decode(v.trim()))
                    .transpose()?;
                DirectoryControl::raw(entry.oid, entry.critical, value.as_deref())
            })
            .collect()
    }

    /// Decodes the batch through the dispatcher.
    pub fn transform(self) -> crate::Result<Vec<ResponseControl>> {
        transform(self.into_controls()?)
    }
}

/// Printable view of a dispatched response control.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlSummary {
    PageResult {
        oid: String,
        critical: bool,
        total_count: i32,
        cookie: String,
    },
    Asq {
        oid: String,
        critical: bool,
        result: i32,
    },
    DirSync {
        oid: String,
        critical: bool,
        more_data: bool,
        result_size: i32,
        cookie: String,
    },
    Sort {
        oid: String,
        critical: bool,
        result: i32,
        #[serde(skip_serializing_if = "Option::is_none")]
        attribute_name: Option<String>,
    },
    Vlv {
        oid: String,
        critical: bool,
        target_position: i32,
        content_count: i32,
        result: i32,
        context_id: String,
    },
    Unrecognized {
        oid: String,
        critical: bool,
        value: String,
    },
}

impl From<&ResponseControl> for ControlSummary {
    fn from(control: &ResponseControl) -> Self {
        let oid = control.oid().to_string();
        let critical = control.control().critical();

        match control {
            ResponseControl::PageResult(page) => ControlSummary::PageResult {
                oid,
                critical,
                total_count: page.total_count(),
                cookie: BASE64.encode(page.cookie()),
            },
            ResponseControl::Asq(asq) => ControlSummary::Asq {
                oid,
                critical,
                result: asq.result().code(),
            },
            ResponseControl::DirSync(sync) => ControlSummary::DirSync {
                oid,
                critical,
                more_data: sync.more_data(),
                result_size: sync.result_size(),
                cookie: BASE64.encode(sync.cookie()),
            },
            ResponseControl::Sort(sort) => ControlSummary::Sort {
                oid,
                critical,
                result: sort.result().code(),
                attribute_name: sort.attribute_name().map(str::to_string),
            },
            ResponseControl::Vlv(vlv) => ControlSummary::Vlv {
                oid,
                critical,
                target_position: vlv.target_position(),
                content_count: vlv.content_count(),
                result: vlv.result().code(),
                context_id: BASE64.encode(vlv.context_id()),
            },
            ResponseControl::Raw(raw) => ControlSummary::Unrecognized {
                oid,
                critical,
                value: BASE64.encode(raw.value()),
            },
        }
    }
}
