//! Fields - Typed access into an attribute map
//!
//! Marshalers read configuration through [`Fields`] instead of matching on
//! [`Value`] by hand. An absent attribute reads as the zero value of the
//! requested type; a present attribute of the wrong type is an error, never
//! a panic.

use std::collections::{BTreeMap, BTreeSet};

use crate::resource::{Attributes, Value};

/// Error raised when an attribute holds an unexpected dynamic type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("attribute '{name}' has type {got}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        got: String,
    },
}

impl FieldError {
    fn mismatch(name: &str, expected: &'static str, got: &Value) -> Self {
        FieldError::TypeMismatch {
            name: name.to_string(),
            expected,
            got: got.type_name(),
        }
    }
}

pub type FieldResult<T> = Result<T, FieldError>;

/// Read-only typed view over attributes
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    attrs: &'a Attributes,
}

impl<'a> Fields<'a> {
    pub fn new(attrs: &'a Attributes) -> Self {
        Self { attrs }
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.attrs.get(name)
    }

    /// Present and not a zero value
    pub fn is_set(&self, name: &str) -> bool {
        self.attrs.get(name).is_some_and(|v| !v.is_zero())
    }

    pub fn string(&self, name: &str) -> FieldResult<String> {
        match self.attrs.get(name) {
            None => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(FieldError::mismatch(name, "String", other)),
        }
    }

    /// `None` when absent or empty
    pub fn optional_string(&self, name: &str) -> FieldResult<Option<String>> {
        let s = self.string(name)?;
        Ok((!s.is_empty()).then_some(s))
    }

    pub fn bool(&self, name: &str) -> FieldResult<bool> {
        match self.attrs.get(name) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(FieldError::mismatch(name, "Bool", other)),
        }
    }

    pub fn int(&self, name: &str) -> FieldResult<i64> {
        match self.attrs.get(name) {
            None => Ok(0),
            Some(Value::Int(n)) => Ok(*n),
            Some(other) => Err(FieldError::mismatch(name, "Int", other)),
        }
    }

    /// `None` when absent or zero
    pub fn optional_int(&self, name: &str) -> FieldResult<Option<i64>> {
        let n = self.int(name)?;
        Ok((n != 0).then_some(n))
    }

    /// List or set of strings, in configured order
    pub fn strings(&self, name: &str) -> FieldResult<Vec<String>> {
        match self.attrs.get(name) {
            None => Ok(Vec::new()),
            Some(Value::List(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(FieldError::mismatch(name, "String", other)),
                })
                .collect(),
            Some(other) => Err(FieldError::mismatch(name, "List", other)),
        }
    }

    pub fn string_set(&self, name: &str) -> FieldResult<BTreeSet<String>> {
        Ok(self.strings(name)?.into_iter().collect())
    }

    pub fn string_map(&self, name: &str) -> FieldResult<BTreeMap<String, String>> {
        match self.attrs.get(name) {
            None => Ok(BTreeMap::new()),
            Some(Value::Map(map)) => map
                .iter()
                .map(|(k, v)| match v {
                    Value::String(s) => Ok((k.clone(), s.clone())),
                    other => Err(FieldError::mismatch(name, "String", other)),
                })
                .collect(),
            Some(other) => Err(FieldError::mismatch(name, "Map", other)),
        }
    }

    /// Nested blocks of a list-of-block attribute
    pub fn blocks(&self, name: &str) -> FieldResult<Vec<Fields<'a>>> {
        match self.attrs.get(name) {
            None => Ok(Vec::new()),
            Some(Value::List(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Map(map) => Ok(Fields::new(map)),
                    other => Err(FieldError::mismatch(name, "Block", other)),
                })
                .collect(),
            Some(other) => Err(FieldError::mismatch(name, "List", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn attrs() -> Attributes {
        let mut range = HashMap::new();
        range.insert("lo".to_string(), Value::Int(80));

        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::from("web"));
        attrs.insert("logging".to_string(), Value::Bool(true));
        attrs.insert("priority".to_string(), Value::Int(10));
        attrs.insert("profiles".to_string(), Value::strings(["b", "a", "b"]));
        attrs.insert("port_ranges".to_string(), Value::List(vec![Value::Map(range)]));
        attrs.insert("empty".to_string(), Value::from(""));
        attrs
    }

    #[test]
    fn reads_declared_types() {
        let attrs = attrs();
        let fields = Fields::new(&attrs);
        assert_eq!(fields.string("name").unwrap(), "web");
        assert!(fields.bool("logging").unwrap());
        assert_eq!(fields.int("priority").unwrap(), 10);
        assert_eq!(
            fields.string_set("profiles").unwrap().into_iter().collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        let ranges = fields.blocks("port_ranges").unwrap();
        assert_eq!(ranges[0].int("lo").unwrap(), 80);
        assert_eq!(ranges[0].optional_int("hi").unwrap(), None);
    }

    #[test]
    fn missing_attributes_read_as_zero_values() {
        let attrs = HashMap::new();
        let fields = Fields::new(&attrs);
        assert_eq!(fields.string("name").unwrap(), "");
        assert!(!fields.bool("logging").unwrap());
        assert_eq!(fields.int("priority").unwrap(), 0);
        assert!(fields.strings("profiles").unwrap().is_empty());
        assert!(fields.blocks("policies").unwrap().is_empty());
    }

    #[test]
    fn optional_readers_treat_zero_as_unset() {
        let attrs = attrs();
        let fields = Fields::new(&attrs);
        assert_eq!(fields.optional_string("empty").unwrap(), None);
        assert!(!fields.is_set("empty"));
        assert!(fields.is_set("name"));
    }

    #[test]
    fn wrong_type_is_an_error() {
        let attrs = attrs();
        let fields = Fields::new(&attrs);
        let err = fields.int("name").unwrap_err();
        assert_eq!(
            err.to_string(),
            "attribute 'name' has type String, expected Int"
        );
        assert!(fields.blocks("profiles").is_err());
    }
}
