//! Raw feed records and their resolution into [`Document`]s.

use feed_core::{Document, DocumentId, Operation};
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::value::RawValue;
use std::fmt;

use crate::error::DecodeErrorKind;

/// One JSON object of a feed, before the operation is chosen.
///
/// Only objects are accepted. Unknown keys are ignored, and a repeated key
/// keeps its last value. `fields` stays as raw JSON text, `null` included.
#[derive(Debug, Default)]
pub(crate) struct RawRecord {
    id: Option<String>,
    put: Option<String>,
    update: Option<String>,
    remove: Option<String>,
    condition: Option<String>,
    create: Option<bool>,
    fields: Option<Box<RawValue>>,
}

#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
enum Key {
    Id,
    Put,
    Update,
    Remove,
    Condition,
    Create,
    Fields,
    #[serde(other)]
    Unknown,
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = RawRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a feed record object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawRecord, A::Error> {
        let mut record = RawRecord::default();
        while let Some(key) = map.next_key::<Key>()? {
            match key {
                Key::Id => record.id = map.next_value()?,
                Key::Put => record.put = map.next_value()?,
                Key::Update => record.update = map.next_value()?,
                Key::Remove => record.remove = map.next_value()?,
                Key::Condition => record.condition = map.next_value()?,
                Key::Create => record.create = map.next_value()?,
                Key::Fields => record.fields = Some(map.next_value()?),
                Key::Unknown => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for RawRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

impl RawRecord {
    /// Pick the operation and parse its identifier.
    ///
    /// The first non-empty key in the order `id`, `put`, `update`, `remove`
    /// wins; `id` is shorthand for `put`. Later keys are ignored.
    pub(crate) fn into_document(self) -> Result<Document, DecodeErrorKind> {
        let candidates = [
            (self.id, Operation::Put),
            (self.put, Operation::Put),
            (self.update, Operation::Update),
            (self.remove, Operation::Remove),
        ];
        let mut present = candidates
            .into_iter()
            .filter_map(|(id, op)| id.filter(|id| !id.is_empty()).map(|id| (id, op)));

        let (serialized, operation) = present.next().ok_or(DecodeErrorKind::MissingOperation)?;
        let ignored = present.count();
        if ignored > 0 {
            log::debug!("Record sets {ignored} extra operation keys; using {operation} {serialized}");
        }

        let id = DocumentId::parse(&serialized)?;
        Ok(Document {
            id,
            operation,
            condition: self.condition.unwrap_or_default(),
            create: self.create.unwrap_or(false),
            fields: self.fields,
        })
    }
}
