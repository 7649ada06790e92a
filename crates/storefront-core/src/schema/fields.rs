//! Field-by-field decoding of one JSON object into a typed record.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{json_kind, ValidationErrors};

/// Reads a JSON object one field at a time.
///
/// A field that is missing or has the wrong JSON type is recorded under its
/// own path and replaced by a fallback, so the remaining fields are still
/// read and checked. `null` counts as absent.
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(raw: &'a Value) -> Result<Self, ValidationErrors> {
        match raw.as_object() {
            Some(map) => Ok(Self {
                map,
                errors: ValidationErrors::new(),
            }),
            None => Err(ValidationErrors::single(
                "$",
                format!("expected an object, found {}", json_kind(raw)),
            )),
        }
    }

    pub(crate) fn into_errors(self) -> ValidationErrors {
        self.errors
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(path, message);
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|value| !value.is_null())
    }

    /// Deserialize `value`, recording serde's message under `path` on failure.
    pub(crate) fn item<T: DeserializeOwned>(&mut self, path: &str, value: &Value) -> Option<T> {
        match T::deserialize(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                self.errors.push(path, e.to_string());
                None
            }
        }
    }

    pub(crate) fn required_or<T: DeserializeOwned>(&mut self, name: &str, fallback: T) -> T {
        match self.present(name) {
            Some(value) => self.item(name, value).unwrap_or(fallback),
            None => {
                self.errors.push(name, "is required");
                fallback
            }
        }
    }

    pub(crate) fn required<T: DeserializeOwned + Default>(&mut self, name: &str) -> T {
        self.required_or(name, T::default())
    }

    pub(crate) fn optional<T: DeserializeOwned>(&mut self, name: &str) -> Option<T> {
        let value = self.present(name)?;
        self.item(name, value)
    }

    pub(crate) fn defaulted<T: DeserializeOwned + Default>(&mut self, name: &str) -> T {
        self.optional(name).unwrap_or_default()
    }

    /// Read `value` as a nested object; its issues are recorded under `path.`.
    pub(crate) fn nest<T, R>(&mut self, path: &str, value: &'a Value, read: R) -> Option<T>
    where
        R: FnOnce(&mut Fields<'a>) -> T,
    {
        match Fields::new(value) {
            Ok(mut inner) => {
                let record = read(&mut inner);
                self.errors.extend_prefixed(path, inner.errors);
                Some(record)
            }
            Err(_) => {
                self.errors.push(
                    path,
                    format!("expected an object, found {}", json_kind(value)),
                );
                None
            }
        }
    }

    pub(crate) fn object<T, R>(&mut self, name: &str, read: R) -> Option<T>
    where
        R: FnOnce(&mut Fields<'a>) -> T,
    {
        let value = self.present(name)?;
        self.nest(name, value, read)
    }

    pub(crate) fn required_object<T, R>(&mut self, name: &str, read: R) -> T
    where
        T: Default,
        R: FnOnce(&mut Fields<'a>) -> T,
    {
        if self.present(name).is_none() {
            self.errors.push(name, "is required");
            return T::default();
        }
        self.object(name, read).unwrap_or_default()
    }

    /// Read an array with `read_item`, which gets the element path `name[i]`.
    /// Elements for which `read_item` returns `None` are dropped.
    pub(crate) fn list<T, R>(&mut self, name: &str, mut read_item: R) -> Option<Vec<T>>
    where
        R: FnMut(&mut Fields<'a>, &str, &'a Value) -> Option<T>,
    {
        let value = self.present(name)?;
        let Some(elements) = value.as_array() else {
            self.errors.push(
                name,
                format!("expected an array, found {}", json_kind(value)),
            );
            return None;
        };

        let mut out = Vec::with_capacity(elements.len());
        for (i, element) in elements.iter().enumerate() {
            if let Some(decoded) = read_item(self, &format!("{name}[{i}]"), element) {
                out.push(decoded);
            }
        }
        Some(out)
    }

    pub(crate) fn required_list<T, R>(&mut self, name: &str, read_item: R) -> Vec<T>
    where
        R: FnMut(&mut Fields<'a>, &str, &'a Value) -> Option<T>,
    {
        if self.present(name).is_none() {
            self.errors.push(name, "is required");
            return Vec::new();
        }
        self.list(name, read_item).unwrap_or_default()
    }

    /// Read an object whose keys decode into `K`, e.g. an enum keyed price table.
    /// Bad entries are recorded under `name.key` and left out.
    pub(crate) fn entries<K, V>(&mut self, name: &str) -> Option<BTreeMap<K, V>>
    where
        K: DeserializeOwned + Ord,
        V: DeserializeOwned,
    {
        let value = self.present(name)?;
        let Some(map) = value.as_object() else {
            self.errors.push(
                name,
                format!("expected an object, found {}", json_kind(value)),
            );
            return None;
        };

        let mut out = BTreeMap::new();
        for (key, entry) in map {
            let path = format!("{name}.{key}");
            let key = self.item::<K>(&path, &Value::String(key.clone()));
            let entry = self.item::<V>(&path, entry);
            if let (Some(key), Some(entry)) = (key, entry) {
                out.insert(key, entry);
            }
        }
        Some(out)
    }
}

/// A string list element; an element of the wrong type becomes `""` so later
/// elements keep their index.
pub(crate) fn string_item(fields: &mut Fields<'_>, path: &str, value: &Value) -> Option<String> {
    Some(fields.item(path, value).unwrap_or_default())
}
