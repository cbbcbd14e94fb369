use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// A record persisted in its own collection, keyed by `_id`
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name of the backing collection
    const COLLECTION: &'static str;
    /// Human readable entity name, used in error messages
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
    fn set_updated_at(&mut self, at: DateTime<Utc>);

    /// Referenced record that has to exist before this one may be created
    fn parent(&self) -> Option<ParentRef<'_>> {
        None
    }
}

/// Time series records, queried by creation window
pub trait LogEntry: Document {
    /// Field that references the sensor or actuator the entry belongs to
    const PARENT_FIELD: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentRef<'a> {
    pub collection: &'static str,
    pub kind: &'static str,
    pub id: &'a str,
}

/// Partial update of a `T`, merging only the fields that were supplied
pub trait Patch<T> {
    fn is_empty(&self) -> bool;
    fn apply(self, target: &mut T);
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Implements `Document` for a struct with `id`, `created_at` and `updated_at` fields
#[macro_export]
macro_rules! document {
    (@impl $ty:ty, $collection:expr, $kind:expr, { $($extra:tt)* }) => {
        impl $crate::Document for $ty {
            const COLLECTION: &'static str = $collection;
            const KIND: &'static str = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> chrono::DateTime<chrono::Utc> {
                self.updated_at
            }

            fn set_updated_at(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.updated_at = at;
            }

            $($extra)*
        }
    };
    ($ty:ty, $collection:expr, $kind:expr) => {
        $crate::document!(@impl $ty, $collection, $kind, {});
    };
    ($ty:ty, $collection:expr, $kind:expr, parent($field:ident => $parent:ty)) => {
        $crate::document!(@impl $ty, $collection, $kind, {
            fn parent(&self) -> Option<$crate::ParentRef<'_>> {
                Some($crate::ParentRef {
                    collection: <$parent as $crate::Document>::COLLECTION,
                    kind: <$parent as $crate::Document>::KIND,
                    id: &self.$field,
                })
            }
        });
    };
}

/// Assigns every supplied `Option` field of a patch to the target
macro_rules! merge {
    ($patch:expr, $target:expr, [$($field:ident),*]) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )*
    };
}
pub(crate) use merge;
