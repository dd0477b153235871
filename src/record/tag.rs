/// Marker tag that removes a field from column mapping.
pub const EXCLUDED: &str = "-";

/// Option flag marking the identity column.
pub const PRIMARY: &str = "primary";

/// Parsed form of a `db` tag: `"<column>[,option...]"`, where a column of `"-"`
/// excludes the field and voids its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnTag<'a> {
    /// Column name from the first segment; `None` when the tag is absent or the
    /// segment is empty.
    pub name: Option<&'a str>,
    pub primary: bool,
    pub excluded: bool,
}

impl<'a> ColumnTag<'a> {
    #[must_use]
    pub fn parse(raw: Option<&'a str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.is_empty()) else {
            return Self::default();
        };
        let mut segments = raw.split(',').map(str::trim);
        let name = segments.next().filter(|s| !s.is_empty());
        if name == Some(EXCLUDED) {
            return Self {
                name,
                primary: false,
                excluded: true,
            };
        }

        let primary = segments.any(|option| option == PRIMARY);

        Self {
            name,
            primary,
            excluded: false,
        }
    }
}
