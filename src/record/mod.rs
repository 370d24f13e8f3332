mod raw_values;

pub use raw_values::{RawValues, RawValuesMut};

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A record with serde-declared fields plus a catch-all bag of raw values.
///
/// Implementors keep their `RawValues` out of serde with `#[serde(skip)]`;
/// the codec is responsible for flattening it on the way out and refilling it
/// on the way in. Declared fields should be `#[serde(default)]` so missing
/// keys bind to their defaults instead of failing.
///
/// ```rust
/// use catchall_codec::{RawValues, RawValuesMut, Record};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// #[serde(default)]
/// struct Image {
///     #[serde(rename = "Id")]
///     id: Option<String>,
///     #[serde(skip)]
///     raw: RawValues,
/// }
///
/// impl Record for Image {
///     fn raw_values(&self) -> &RawValues {
///         &self.raw
///     }
///
///     fn raw_values_mut(&mut self) -> RawValuesMut<'_> {
///         RawValuesMut::new(&mut self.raw)
///     }
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned + 'static {
    fn raw_values(&self) -> &RawValues;

    /// Single-entry write access to the raw values.
    ///
    /// The handle cannot be assigned through or swapped out, so only the
    /// codec ever replaces the whole bag:
    ///
    /// ```compile_fail
    /// use catchall_codec::models::Version;
    /// use catchall_codec::{RawValues, Record};
    ///
    /// let mut version = Version::default();
    /// *version.raw_values_mut() = RawValues::new();
    /// ```
    ///
    /// ```compile_fail
    /// use catchall_codec::models::Version;
    /// use catchall_codec::Record;
    ///
    /// let mut version = Version::default();
    /// let _taken = std::mem::take(&mut *version.raw_values_mut());
    /// ```
    fn raw_values_mut(&mut self) -> RawValuesMut<'_>;

    /// Declared fields under their external names, raw values excluded.
    fn declared_fields(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self).map_err(Error::Encode)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::not_an_object(&other)),
        }
    }
}
