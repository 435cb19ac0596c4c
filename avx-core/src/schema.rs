//! Schema - Define type schemas for resources
//!
//! Each resource type declares its attributes up front: type, cardinality,
//! defaults, validators, and whether a change forces replacement. The
//! provider validates user input against the schema before any remote call.

use std::collections::HashMap;
use std::fmt;

use crate::resource::{Attributes, Value};

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// Enum (list of allowed values, exact match)
    Enum(Vec<String>),
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
    },
    /// Ordered list
    List(Box<AttributeType>),
    /// Unordered collection; order never counts as a change
    Set(Box<AttributeType>),
    /// Map
    Map(Box<AttributeType>),
    /// Nested block with its own attributes
    Block(HashMap<String, AttributeSchema>),
}

impl AttributeType {
    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::Custom { base, validate, .. }, v) => {
                base.validate(v)?;
                validate(v).map_err(|message| TypeError::ValidationFailed { message })
            }

            (AttributeType::List(inner) | AttributeType::Set(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Block(attributes), Value::Map(map)) => {
                match validate_attributes(attributes, map).into_iter().next() {
                    Some(e) => Err(e),
                    None => Ok(()),
                }
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    /// Zero value used when an attribute is absent
    pub fn zero_value(&self) -> Value {
        match self {
            AttributeType::String | AttributeType::Enum(_) => Value::String(String::new()),
            AttributeType::Int => Value::Int(0),
            AttributeType::Bool => Value::Bool(false),
            AttributeType::Custom { base, .. } => base.zero_value(),
            AttributeType::List(_) | AttributeType::Set(_) => Value::List(Vec::new()),
            AttributeType::Map(_) | AttributeType::Block(_) => Value::Map(HashMap::new()),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Set(inner) => format!("Set<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
            AttributeType::Block(_) => "Block".to_string(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("Attribute '{name}' is computed and cannot be configured")]
    NotConfigurable { name: String },

    #[error("Too many items: at most {max} allowed, got {got}")]
    TooManyItems { max: usize, got: usize },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },

    #[error("Attribute '{name}': {inner}")]
    AttributeError { name: String, inner: Box<TypeError> },
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// May be set by the user
    pub optional: bool,
    /// Filled in by the controller on read
    pub computed: bool,
    /// Changing this attribute requires replacing the resource
    pub force_new: bool,
    /// Hidden from display output
    pub sensitive: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
    pub max_items: Option<usize>,
    /// Returns true when old and new values should be treated as equal
    pub diff_suppress: Option<fn(&Value, &Value) -> bool>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            optional: true,
            computed: false,
            force_new: false,
            sensitive: false,
            default: None,
            description: None,
            max_items: None,
            diff_suppress: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    /// Output-only attribute
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self.optional = false;
        self
    }

    /// Optional attribute whose value is filled in by the controller when unset
    pub fn optional_computed(mut self) -> Self {
        self.computed = true;
        self.optional = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn with_diff_suppress(mut self, suppress: fn(&Value, &Value) -> bool) -> Self {
        self.diff_suppress = Some(suppress);
        self
    }

    /// True when the user can set this attribute
    pub fn is_configurable(&self) -> bool {
        self.required || self.optional
    }

    /// Check a configured value against type and item count
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        self.attr_type.validate(value)?;
        if let (Some(max), Value::List(items)) = (self.max_items, value)
            && items.len() > max
        {
            return Err(TypeError::TooManyItems {
                max,
                got: items.len(),
            });
        }
        Ok(())
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Attribute names in sorted order
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.attributes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Attributes whose change forces replacement
    pub fn force_new_attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .attributes
            .values()
            .filter(|a| a.force_new)
            .map(|a| a.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Validate resource attributes
    pub fn validate(&self, attributes: &Attributes) -> Result<(), Vec<TypeError>> {
        let errors = validate_attributes(&self.attributes, attributes);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Fill in declared defaults for absent attributes, including inside nested blocks
    pub fn apply_defaults(&self, attributes: &mut Attributes) {
        apply_defaults(&self.attributes, attributes);
    }
}

fn validate_attributes(
    schemas: &HashMap<String, AttributeSchema>,
    attributes: &Attributes,
) -> Vec<TypeError> {
    let mut errors = Vec::new();

    let mut names: Vec<&String> = schemas.keys().collect();
    names.sort();
    for name in names {
        let schema = &schemas[name];
        if schema.required && !attributes.contains_key(name) && schema.default.is_none() {
            errors.push(TypeError::MissingRequired { name: name.clone() });
        }
    }

    let mut keys: Vec<&String> = attributes.keys().collect();
    keys.sort();
    for name in keys {
        let value = &attributes[name];
        match schemas.get(name) {
            Some(schema) if !schema.is_configurable() => {
                errors.push(TypeError::NotConfigurable { name: name.clone() });
            }
            Some(schema) => {
                if let Err(e) = schema.validate(value) {
                    errors.push(TypeError::AttributeError {
                        name: name.clone(),
                        inner: Box::new(e),
                    });
                }
            }
            None => errors.push(TypeError::UnknownAttribute { name: name.clone() }),
        }
    }

    errors
}

fn apply_defaults(schemas: &HashMap<String, AttributeSchema>, attributes: &mut Attributes) {
    for (name, schema) in schemas {
        if !attributes.contains_key(name)
            && let Some(default) = &schema.default
        {
            attributes.insert(name.clone(), default.clone());
        }

        let nested = match &schema.attr_type {
            AttributeType::Block(nested) => nested,
            AttributeType::List(inner) | AttributeType::Set(inner) => match inner.as_ref() {
                AttributeType::Block(nested) => nested,
                _ => continue,
            },
            _ => continue,
        };

        match attributes.get_mut(name) {
            Some(Value::Map(block)) => apply_defaults(nested, block),
            Some(Value::List(items)) => {
                for item in items {
                    if let Value::Map(block) = item {
                        apply_defaults(nested, block);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;

    /// Build a custom type around a base type
    pub fn custom(
        name: impl Into<String>,
        base: AttributeType,
        validate: fn(&Value) -> Result<(), String>,
    ) -> AttributeType {
        AttributeType::Custom {
            name: name.into(),
            base: Box::new(base),
            validate,
        }
    }

    /// Nested block type from a list of attribute schemas
    pub fn block(attributes: Vec<AttributeSchema>) -> AttributeType {
        AttributeType::Block(
            attributes
                .into_iter()
                .map(|a| (a.name.clone(), a))
                .collect(),
        )
    }

    /// Set of strings
    pub fn string_set() -> AttributeType {
        AttributeType::Set(Box::new(AttributeType::String))
    }

    /// List of strings
    pub fn string_list() -> AttributeType {
        AttributeType::List(Box::new(AttributeType::String))
    }

    /// Positive integer type
    pub fn positive_int() -> AttributeType {
        custom("PositiveInt", AttributeType::Int, |value| {
            check_int_range(value, 1, i64::MAX)
        })
    }

    /// CIDR block type (e.g., "10.0.0.0/16")
    pub fn cidr() -> AttributeType {
        custom("Cidr", AttributeType::String, |value| match value {
            Value::String(s) => validate_cidr(s),
            _ => Err("Expected string".to_string()),
        })
    }

    /// IPv4 address type
    pub fn ipv4() -> AttributeType {
        custom("Ipv4", AttributeType::String, |value| match value {
            Value::String(s) => validate_ipv4(s),
            _ => Err("Expected string".to_string()),
        })
    }

    /// BGP AS number written as a string
    pub fn asn() -> AttributeType {
        custom("Asn", AttributeType::String, |value| match value {
            Value::String(s) => validate_asn(s),
            _ => Err("Expected string".to_string()),
        })
    }

    /// Name that takes part in a composite identifier
    pub fn natural_key() -> AttributeType {
        custom("NaturalKey", AttributeType::String, |value| match value {
            Value::String(s) => validate_natural_key(s),
            _ => Err("Expected string".to_string()),
        })
    }

    /// Range check for integer validators
    pub fn check_int_range(value: &Value, min: i64, max: i64) -> Result<(), String> {
        match value {
            Value::Int(n) if (min..=max).contains(n) => Ok(()),
            Value::Int(n) => Err(format!("expected value in range {}..={}, got {}", min, max, n)),
            _ => Err("Expected integer".to_string()),
        }
    }

    /// Membership check for string validators
    pub fn check_choice(value: &Value, choices: &[&str], ignore_case: bool) -> Result<(), String> {
        let Value::String(s) = value else {
            return Err("Expected string".to_string());
        };
        let matched = choices.iter().any(|c| {
            if ignore_case {
                c.eq_ignore_ascii_case(s)
            } else {
                c == s
            }
        });
        if matched {
            Ok(())
        } else {
            Err(format!(
                "expected one of [{}], got '{}'",
                choices.join(", "),
                s
            ))
        }
    }

    /// Diff suppressor for values that differ only by ASCII case
    pub fn suppress_case_difference(old: &Value, new: &Value) -> bool {
        match (old, new) {
            (Value::String(a), Value::String(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }
}

/// Validate CIDR block format (e.g., "10.0.0.0/16")
pub fn validate_cidr(cidr: &str) -> Result<(), String> {
    let Some((ip, prefix)) = cidr.split_once('/') else {
        return Err(format!("Invalid CIDR format '{}': expected IP/prefix", cidr));
    };

    validate_ipv4(ip)?;

    match prefix.parse::<u8>() {
        Ok(p) if p <= 32 => Ok(()),
        Ok(p) => Err(format!("Invalid prefix length '{}': must be 0-32", p)),
        Err(_) => Err(format!(
            "Invalid prefix length '{}': must be a number",
            prefix
        )),
    }
}

/// Validate a dotted-quad IPv4 address
pub fn validate_ipv4(ip: &str) -> Result<(), String> {
    let octets: Vec<&str> = ip.split('.').collect();
    if octets.len() != 4 {
        return Err(format!("Invalid IP address '{}': expected 4 octets", ip));
    }

    for octet in &octets {
        if octet.parse::<u8>().is_err() {
            return Err(format!(
                "Invalid octet '{}' in IP address: must be 0-255",
                octet
            ));
        }
    }
    Ok(())
}

/// Validate a 2- or 4-byte AS number
pub fn validate_asn(asn: &str) -> Result<(), String> {
    match asn.parse::<u64>() {
        Ok(n) if (1..=4_294_967_294).contains(&n) => Ok(()),
        _ => Err(format!(
            "Invalid AS number '{}': must be an integer in 1-4294967294",
            asn
        )),
    }
}

/// Reject names that would corrupt a composite identifier
pub fn validate_natural_key(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name must not be empty".to_string());
    }
    if let Some(c) = name.chars().find(|c| matches!(c, '~' | ':')) {
        return Err(format!("'{}' must not contain '{}'", name, c));
    }
    Ok(())
}
