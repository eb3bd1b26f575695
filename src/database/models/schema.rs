use super::column::ColumnDef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub sort: SortDirection,
}

impl OrderBy {
    pub const fn asc(column: &'static str) -> Self {
        Self { column, sort: SortDirection::Asc }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self { column, sort: SortDirection::Desc }
    }
}

/// Extra columns pulled from a joined table when reading records.
/// The base table is always aliased `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    pub select: &'static str,
    pub join: &'static str,
}

/// Schema descriptor for one entity table.
///
/// A single generic repository is instantiated per descriptor, so everything
/// that differs between tables lives here: the writable columns (which double
/// as the update allow-list), external field aliases, the foreign keys a list
/// may be filtered by, and the declared list ordering.
#[derive(Debug)]
pub struct EntitySchema {
    /// Resource name used in routes; equal to the table name
    pub name: &'static str,
    /// Human-readable singular used in messages
    pub label: &'static str,
    pub columns: &'static [ColumnDef],
    /// External field name -> internal column name
    pub aliases: &'static [(&'static str, &'static str)],
    /// Foreign-key columns accepted as list filters
    pub filters: &'static [&'static str],
    pub order: &'static [OrderBy],
    pub projection: Option<Projection>,
}

impl EntitySchema {
    pub fn table(&self) -> &'static str {
        self.name
    }

    /// Resolve a caller-supplied field name to its column, following aliases.
    pub fn column(&self, field: &str) -> Option<&'static ColumnDef> {
        let internal = self
            .aliases
            .iter()
            .find(|(external, _)| *external == field)
            .map(|(_, internal)| *internal)
            .unwrap_or(field);
        self.columns.iter().find(|c| c.name == internal)
    }

    pub fn required_columns(&self) -> impl Iterator<Item = &'static ColumnDef> {
        self.columns.iter().filter(|c| c.required)
    }

    /// Position of a column in declaration order, used to keep generated SQL stable.
    pub fn position(&self, column: &ColumnDef) -> usize {
        self.columns
            .iter()
            .position(|c| c.name == column.name)
            .unwrap_or(usize::MAX)
    }
}
