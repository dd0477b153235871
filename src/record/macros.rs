/// Declare a struct mapped to a table and register its field table.
///
/// The first attribute must be `#[table = "..."]`. Each field may carry a
/// `#[db = "..."]` tag (after any doc comments):
///
/// - `#[db = "column"]` maps the field to `column`;
/// - `#[db = "column,primary"]` also marks it as the identity column;
/// - `#[db = "-"]` keeps the field out of generated statements.
///
/// Untagged fields map to their lower-cased identifier. Fields without `pub`
/// (or another non-private visibility) are not mapped.
///
/// ```rust
/// use sql_record::prelude::*;
///
/// sql_record::record! {
///     #[table = "users"]
///     #[derive(Debug, Default, Clone, PartialEq)]
///     pub struct User {
///         #[db = "id,primary"]
///         pub id: i64,
///         #[db = "name"]
///         pub name: String,
///         /// Not persisted.
///         #[db = "-"]
///         pub cached_score: i64,
///         pub email: Option<String>,
///     }
/// }
///
/// let user = User { id: 1, name: "Ana".into(), ..User::default() };
/// let columns = derive_columns(&user).unwrap();
/// assert_eq!(columns.get("name"), Some(&RowValues::Text("Ana".into())));
/// assert!(!columns.contains_key("cached_score"));
/// assert_eq!(User::table_name(), "users");
/// ```
#[macro_export]
macro_rules! record {
    (@tag) => { ::core::option::Option::None };
    (@tag $tag:literal) => { ::core::option::Option::Some($tag) };

    (
        #[table = $table:literal]
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $fdoc:literal])*
                $(#[db = $tag:literal])?
                $fvis:vis $field:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[doc = $fdoc])*
                $fvis $field: $fty,
            )*
        }

        impl $crate::record::Record for $name {
            fn descriptor() -> &'static $crate::record::RecordDescriptor {
                static DESCRIPTOR: $crate::record::RecordDescriptor =
                    $crate::record::RecordDescriptor {
                        table: $table,
                        fields: &[
                            $(
                                $crate::record::FieldDef {
                                    ident: stringify!($field),
                                    tag: $crate::record!(@tag $($tag)?),
                                    exported: !stringify!($fvis).is_empty(),
                                    kind: <$fty as $crate::types::FieldValue>::KIND,
                                },
                            )*
                        ],
                    };
                &DESCRIPTOR
            }

            fn read_field(
                &self,
                ident: &str,
            ) -> ::core::option::Option<$crate::types::RowValues> {
                match ident {
                    $(
                        stringify!($field) => ::core::option::Option::Some(
                            $crate::types::FieldValue::to_value(&self.$field),
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }

            fn write_field(
                &mut self,
                ident: &str,
                value: $crate::types::RowValues,
            ) -> ::core::result::Result<(), $crate::error::SqlRecordError> {
                match ident {
                    $(
                        stringify!($field) => {
                            self.$field =
                                <$fty as $crate::types::FieldValue>::from_value(value)?;
                            ::core::result::Result::Ok(())
                        }
                    )*
                    _ => ::core::result::Result::Err($crate::error::SqlRecordError::FieldNotFound(
                        ::std::format!("{}.{}", stringify!($name), ident),
                    )),
                }
            }
        }
    };
}
