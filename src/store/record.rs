//! Record type - the unit written to disk for one key

use crate::model::Storable;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A serialized value together with the tag of its type
///
/// The file for a key holds exactly the bincode encoding of this struct.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// `Storable::type_tag` of the encoded value
    pub type_tag: String,
    /// bincode encoding of the value
    pub payload: Vec<u8>,
}

impl Record {
    /// Encode a value into a record
    pub fn from_value<T: Storable>(value: &T) -> Result<Self> {
        Ok(Record {
            type_tag: T::type_tag(),
            payload: bincode::serialize(value)?,
        })
    }

    /// Decode the payload, checking the tag first
    pub fn into_value<T: Storable>(self, key: &str) -> Result<T> {
        let expected = T::type_tag();
        if self.type_tag != expected {
            return Err(Error::TypeMismatch {
                key: key.to_string(),
                expected,
                found: self.type_tag,
            });
        }
        Ok(bincode::deserialize(&self.payload)?)
    }

    /// Serialize the record for storage
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Parse a record read from storage
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::Corruption("Empty record".into()));
        }

        let record: Record = bincode::deserialize(data)?;
        if record.type_tag.is_empty() {
            return Err(Error::Corruption("Record has no type tag".into()));
        }
        Ok(record)
    }

    /// Size of the encoded value
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}
