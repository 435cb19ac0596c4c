//! Differ - Compare prior state with desired configuration
//!
//! Update handlers consult [`Changes`] to decide which remote calls to make,
//! and [`set_diff`] to turn two versions of a set-valued attribute into
//! removals and additions.

use std::collections::BTreeSet;

use crate::fields::Fields;
use crate::resource::{Attributes, Value};
use crate::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// Attribute-level view of what changed between two attribute maps
#[derive(Debug, Clone, Copy)]
pub struct Changes<'a> {
    schema: &'a ResourceSchema,
    old: &'a Attributes,
    new: &'a Attributes,
}

impl<'a> Changes<'a> {
    pub fn new(schema: &'a ResourceSchema, old: &'a Attributes, new: &'a Attributes) -> Self {
        Self { schema, old, new }
    }

    /// Returns whether the named attribute differs between old and new
    pub fn has_change(&self, name: &str) -> bool {
        match self.schema.attributes.get(name) {
            Some(attr) => attribute_changed(attr, self.old.get(name), self.new.get(name)),
            None => self.old.get(name) != self.new.get(name),
        }
    }

    pub fn has_changes(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.has_change(name))
    }

    /// Names of every changed attribute, sorted
    pub fn changed_attributes(&self) -> Vec<String> {
        self.schema
            .attribute_names()
            .into_iter()
            .filter(|name| self.has_change(name))
            .map(str::to_string)
            .collect()
    }

    /// Changed attributes that cannot be updated in place
    pub fn replacement_attributes(&self) -> Vec<String> {
        self.schema
            .force_new_attributes()
            .into_iter()
            .filter(|name| self.has_change(name))
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.changed_attributes().is_empty()
    }

    pub fn old(&self) -> Fields<'a> {
        Fields::new(self.old)
    }

    pub fn new_fields(&self) -> Fields<'a> {
        Fields::new(self.new)
    }
}

fn attribute_changed(attr: &AttributeSchema, old: Option<&Value>, new: Option<&Value>) -> bool {
    // Computed attributes left out of the configuration keep whatever the controller reports
    if attr.computed && new.is_none() {
        return false;
    }

    let zero = attr.attr_type.zero_value();
    let old = old.unwrap_or(&zero);
    let new = new.unwrap_or(&zero);

    if let Some(suppress) = attr.diff_suppress
        && suppress(old, new)
    {
        return false;
    }

    !values_equal(&attr.attr_type, old, new)
}

fn values_equal(attr_type: &AttributeType, old: &Value, new: &Value) -> bool {
    match (attr_type, old, new) {
        (AttributeType::Set(_), Value::List(a), Value::List(b)) => {
            let mut a: Vec<String> = a.iter().map(canonical).collect();
            let mut b: Vec<String> = b.iter().map(canonical).collect();
            a.sort();
            a.dedup();
            b.sort();
            b.dedup();
            a == b
        }
        (AttributeType::List(inner), Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(inner, x, y))
        }
        (AttributeType::Block(attrs), Value::Map(a), Value::Map(b)) => attrs
            .values()
            .all(|attr| !attribute_changed(attr, a.get(&attr.name), b.get(&attr.name))),
        (AttributeType::Custom { base, .. }, a, b) => values_equal(base, a, b),
        _ => old == new,
    }
}

/// Order-independent rendering used to compare set members
fn canonical(value: &Value) -> String {
    match value {
        Value::String(s) => format!("s:{}", s),
        Value::Int(n) => format!("i:{}", n),
        Value::Bool(b) => format!("b:{}", b),
        Value::List(items) => {
            let inner: Vec<String> = items.iter().map(canonical).collect();
            format!("l:[{}]", inner.join(","))
        }
        Value::Map(map) => {
            let mut entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}={}", k, canonical(v)))
                .collect();
            entries.sort();
            format!("m:{{{}}}", entries.join(","))
        }
    }
}

/// Elements to remove and to add when moving from one set to another
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetDiff<T> {
    pub removed: Vec<T>,
    pub added: Vec<T>,
}

impl<T> SetDiff<T> {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Compute removals (old minus new) and additions (new minus old), both sorted
pub fn set_diff<T: Ord + Clone>(old: &BTreeSet<T>, new: &BTreeSet<T>) -> SetDiff<T> {
    SetDiff {
        removed: old.difference(new).cloned().collect(),
        added: new.difference(old).cloned().collect(),
    }
}
