//! Record types and the mapping between their fields and table columns.
//!
//! A record is a struct whose fields are described once by a static
//! [`RecordDescriptor`]. The descriptor is normally generated by the
//! [`record!`](crate::record!) macro and replaces runtime reflection: every
//! mapping function here reads names, tags and kinds from it.

mod identity;
mod introspect;
mod macros;
mod materialize;
mod setter;
mod tag;

pub use identity::{derive_identity, identity_column};
pub use introspect::{ColumnMap, derive_columns};
pub use materialize::{materialize, materialize_into, materialize_row};
pub use setter::set_field;
pub use tag::ColumnTag;

use crate::error::SqlRecordError;
use crate::types::{RowValues, ValueKind};

/// Static description of one struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Rust identifier of the field.
    pub ident: &'static str,
    /// Raw `db` tag, e.g. `"id,primary"` or `"-"`.
    pub tag: Option<&'static str>,
    /// Whether the field has a non-private visibility.
    pub exported: bool,
    /// Declared kind of the field type.
    pub kind: ValueKind,
}

impl FieldDef {
    #[must_use]
    pub fn column_tag(&self) -> ColumnTag<'static> {
        ColumnTag::parse(self.tag)
    }

    /// Column name used in generated statements: the tag name when present,
    /// otherwise the lower-cased identifier.
    #[must_use]
    pub fn column_name(&self) -> String {
        match self.column_tag().name {
            Some(name) => name.to_string(),
            None => self.ident.to_lowercase(),
        }
    }

    /// Whether the field takes part in column mapping at all.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.exported && !self.column_tag().excluded
    }
}

/// Table name and field table of a record type.
#[derive(Debug)]
pub struct RecordDescriptor {
    pub table: &'static str,
    pub fields: &'static [FieldDef],
}

impl RecordDescriptor {
    #[must_use]
    pub fn field(&self, ident: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.ident == ident)
    }
}

/// A struct mapped to one table row.
///
/// Implemented by [`record!`](crate::record!). Hand-written implementations must
/// keep `read_field`/`write_field` in agreement with `descriptor()`.
pub trait Record: Default + Send + Sync {
    /// Field table for this type.
    fn descriptor() -> &'static RecordDescriptor;

    fn table_name() -> &'static str {
        Self::descriptor().table
    }

    /// Current value of the field named `ident`, or `None` if no such field exists.
    fn read_field(&self, ident: &str) -> Option<RowValues>;

    /// Assign `value` to the field named `ident`, converting it to the field's type.
    ///
    /// # Errors
    /// Returns `TypeMismatch` if the value cannot be converted or `FieldNotFound`
    /// if `ident` does not name a field.
    fn write_field(&mut self, ident: &str, value: RowValues) -> Result<(), SqlRecordError>;

    /// Identity column and current identity value.
    ///
    /// Defaults to [`derive_identity`]; override for a type whose key cannot be
    /// expressed with tags, together with [`Record::primary_key_column`].
    ///
    /// # Errors
    /// Returns `IdentityMissing` if the record has no identity field.
    fn primary_key(&self) -> Result<(String, RowValues), SqlRecordError> {
        derive_identity(self)
    }

    /// Identity column name, used where no instance exists yet (`find_by_id`).
    ///
    /// Defaults to [`identity_column`]; must agree with the column returned by
    /// [`Record::primary_key`].
    ///
    /// # Errors
    /// Returns `IdentityMissing` if the type has no identity field.
    fn primary_key_column() -> Result<String, SqlRecordError> {
        identity_column::<Self>()
    }
}
