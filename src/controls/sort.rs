use super::control::DirectoryControl;
use super::oid;
use super::request::store_encoded;
use crate::ber::{context_tag, BerValue};
use crate::{ControlError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    attribute_name: String,
    matching_rule: Option<String>,
    reverse_order: bool,
}

impl SortKey {
    pub fn new(
        attribute_name: impl Into<String>,
        matching_rule: Option<&str>,
        reverse_order: bool,
    ) -> Result<Self> {
        let mut key = Self {
            attribute_name: String::new(),
            matching_rule: matching_rule.map(str::to_string),
            reverse_order,
        };
        key.set_attribute_name(attribute_name)?;
        Ok(key)
    }

    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    pub fn set_attribute_name(&mut self, attribute_name: impl Into<String>) -> Result<()> {
        let attribute_name = attribute_name.into();
        if attribute_name.is_empty() {
            return Err(ControlError::Validation(
                "sort key attribute name cannot be empty".to_string(),
            ));
        }
        self.attribute_name = attribute_name;
        Ok(())
    }

    pub fn matching_rule(&self) -> Option<&str> {
        self.matching_rule.as_deref()
    }

    pub fn set_matching_rule(&mut self, matching_rule: Option<&str>) {
        self.matching_rule = matching_rule.map(str::to_string);
    }

    pub fn reverse_order(&self) -> bool {
        self.reverse_order
    }

    pub fn set_reverse_order(&mut self, reverse_order: bool) {
        self.reverse_order = reverse_order;
    }
}

/// Server side sort request (RFC 2891).
///
/// Keys are encoded in the order given: the first key is the primary sort
/// key, the second breaks ties of the first, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
    control: DirectoryControl,
    keys: Vec<SortKey>,
}

impl SortRequest {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self {
            control: DirectoryControl::request(oid::SORT_REQUEST),
            keys,
        }
    }

    pub fn single(
        attribute_name: impl Into<String>,
        matching_rule: Option<&str>,
        reverse_order: bool,
    ) -> Result<Self> {
        let key = SortKey::new(attribute_name, matching_rule, reverse_order)?;
        Ok(Self::new(vec![key]))
    }

    /// Returns a copy of the keys; edits to it do not reach the request.
    pub fn sort_keys(&self) -> Vec<SortKey> {
        self.keys.clone()
    }

    pub fn set_sort_keys(&mut self, keys: Vec<SortKey>) {
        self.keys = keys;
    }

    /// SortKeyList ::= SEQUENCE OF SEQUENCE {
    ///     attributeType   AttributeDescription,
    ///     orderingRule    [0] MatchingRuleId OPTIONAL,
    ///     reverseOrder    [1] BOOLEAN DEFAULT FALSE }
    pub fn encode(&mut self) -> Result<Vec<u8>> {
        let mut format = String::from("{");
        let mut values = Vec::with_capacity(self.keys.len() * 5);

        for key in &self.keys {
            if key.attribute_name.is_empty() {
                return Err(ControlError::Validation(
                    "sort key attribute name cannot be empty".to_string(),
                ));
            }

            format.push_str("{s");
            values.push(BerValue::String(key.attribute_name.clone()));

            if let Some(rule) = &key.matching_rule {
                format.push_str("ts");
                values.push(BerValue::Tag(context_tag(0)));
                values.push(BerValue::String(rule.clone()));
            }

            if key.reverse_order {
                format.push_str("tb");
                values.push(BerValue::Tag(context_tag(1)));
                values.push(BerValue::Boolean(true));
            }

            format.push('}');
        }
        format.push('}');

        store_encoded(&mut self.control, &format, &values)
    }
}

super::request_accessors!(SortRequest);
