use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A private listing as reported downstream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    /// Display price, e.g. "€ 250.000" or "Preis auf Anfrage"
    pub price: String,
    pub location: String,
    pub url: String,
    pub property_type: String,
    pub size: String,
    pub rooms: String,
}

/// One named attribute of an advert, e.g. `PROPERTY_TYPE` -> `["Wohnung"]`.
///
/// Values are kept as raw JSON so a non-string value only makes that
/// attribute unreadable, not the whole advert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeList {
    #[serde(default, deserialize_with = "attributes_or_empty")]
    pub attribute: Vec<Attribute>,
}

/// Advert summary as embedded in a search-result page.
///
/// Only the attribute collection is modelled; everything else in the
/// record is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAdvert {
    #[serde(default, deserialize_with = "object_or_none")]
    pub attributes: Option<AttributeList>,
}

fn object_or_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<AttributeList>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => AttributeList::deserialize(value).ok(),
        _ => None,
    })
}

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn list_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => values,
        _ => Vec::new(),
    })
}

// Entries that are not attribute objects are dropped.
fn attributes_or_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Attribute>, D::Error> {
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| Attribute::deserialize(entry).ok())
        .collect())
}

impl RawAdvert {
    /// First value of the named attribute.
    ///
    /// Returns `None` when the record has no attributes, the name is not
    /// present, every matching entry has an empty value list, or the first
    /// value is not a string.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .as_ref()?
            .attribute
            .iter()
            .filter(|attr| attr.name == name)
            .find_map(|attr| attr.values.first())
            .and_then(Value::as_str)
    }

    /// Build an advert from `(name, values)` pairs
    #[cfg(test)]
    pub fn from_pairs<'a, I, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: IntoIterator<Item = &'a str>,
    {
        let attribute = pairs
            .into_iter()
            .map(|(name, values)| Attribute {
                name: name.to_string(),
                values: values
                    .into_iter()
                    .map(|value| Value::String(value.to_string()))
                    .collect(),
            })
            .collect();

        Self {
            attributes: Some(AttributeList { attribute }),
        }
    }
}
