// core/src/id.rs
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Canonical product identifier.
///
/// Upstream rows may carry numeric or string ids. Both are normalized to a
/// trimmed decimal/string form on construction, so `ProductId::from(5)` and
/// `ProductId::from(" 5")` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ProductId(String);

impl ProductId {
  pub fn new(raw: impl AsRef<str>) -> Self {
    ProductId(raw.as_ref().trim().to_owned())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for ProductId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl From<&str> for ProductId {
  fn from(raw: &str) -> Self {
    ProductId::new(raw)
  }
}

impl From<String> for ProductId {
  fn from(raw: String) -> Self {
    ProductId::new(raw)
  }
}

impl From<&String> for ProductId {
  fn from(raw: &String) -> Self {
    ProductId::new(raw)
  }
}

impl From<&ProductId> for ProductId {
  fn from(id: &ProductId) -> Self {
    id.clone()
  }
}

macro_rules! impl_from_integer {
  ($($ty:ty),*) => {
    $(
      impl From<$ty> for ProductId {
        fn from(raw: $ty) -> Self {
          ProductId(raw.to_string())
        }
      }
    )*
  };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl Serialize for ProductId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.0)
  }
}

struct ProductIdVisitor;

impl<'de> Visitor<'de> for ProductIdVisitor {
  type Value = ProductId;

  fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("a product id as a string or an integer")
  }

  fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
    Ok(ProductId::new(v))
  }

  fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
    Ok(ProductId::from(v))
  }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
    Ok(ProductId::from(v))
  }

  // JSON sources may send `5.0` for an integer column.
  fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
      Ok(ProductId::from(v as i64))
    } else {
      Err(E::invalid_value(de::Unexpected::Float(v), &"an integral product id"))
    }
  }
}

impl<'de> Deserialize<'de> for ProductId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_any(ProductIdVisitor)
  }
}
