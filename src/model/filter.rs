//! Attribute lookup by name and filterable list views over remote objects

use std::ops::Deref;

use super::value::AttrValue;

/// Read access to a model's fields by their snake_case name.
///
/// This is the dynamic side of the models: `actor.attribute("is_visible")`
/// gives the same answer as `actor.is_visible()`, which lets callers filter
/// lists with names that only arrive at runtime (CLI flags, config files).
pub trait Attributes {
    /// Value of the named field, or `None` if the model has no such field
    fn attribute(&self, name: &str) -> Option<AttrValue>;
}

/// A borrowed, filterable view over a list of models.
///
/// ```rust
/// # use esi_remote::model::{Attributes, AttrValue, FilterList};
/// # struct Car { kind: &'static str }
/// # impl Attributes for Car {
/// #     fn attribute(&self, name: &str) -> Option<AttrValue> {
/// #         (name == "type").then(|| AttrValue::from(self.kind))
/// #     }
/// # }
/// let cars = [Car { kind: "emergency_vehicle" }, Car { kind: "civil" }];
/// let list = FilterList::new(&cars);
/// assert_eq!(list.by_attribute("type", "civil").len(), 1);
/// ```
#[derive(Debug)]
pub struct FilterList<'a, T> {
    items: Vec<&'a T>,
}

impl<'a, T> Clone for FilterList<'a, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<'a, T> FilterList<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items: items.iter().collect(),
        }
    }

    /// Keep the items for which `predicate` returns true
    pub fn by_filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool,
    {
        Self {
            items: self.items.into_iter().filter(|item| predicate(item)).collect(),
        }
    }

    /// First item, if any
    pub fn first(&self) -> Option<&'a T> {
        self.items.first().copied()
    }

    /// Item at `index`, if any
    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.items.get(index).copied()
    }

    pub fn into_vec(self) -> Vec<&'a T> {
        self.items
    }
}

impl<'a, T: Attributes> FilterList<'a, T> {
    /// Keep the items whose attribute `name` equals `value`
    pub fn by_attribute(self, name: &str, value: impl Into<AttrValue>) -> Self {
        let value = value.into();
        self.by_filter(|item| item.attribute(name).as_ref() == Some(&value))
    }

    /// Keep the items matching every `(name, value)` pair
    pub fn by_attributes(self, criteria: &[(&str, AttrValue)]) -> Self {
        self.by_filter(|item| {
            criteria
                .iter()
                .all(|(name, value)| item.attribute(name).as_ref() == Some(value))
        })
    }
}

impl<'a, T> Deref for FilterList<'a, T> {
    type Target = [&'a T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a, T> IntoIterator for FilterList<'a, T> {
    type Item = &'a T;
    type IntoIter = std::vec::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> FromIterator<&'a T> for FilterList<'a, T> {
    fn from_iter<I: IntoIterator<Item = &'a T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
