/// Postgres type a column is bound and cast as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Uuid,
    Date,
    Numeric,
    Integer,
}

impl ColumnType {
    /// Cast appended to every placeholder, e.g. `$1::date`
    pub fn pg_cast(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Uuid => "uuid",
            ColumnType::Date => "date",
            ColumnType::Numeric => "numeric",
            ColumnType::Integer => "integer",
        }
    }
}

/// Value written on create when an optional column is absent or null.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Text(&'static str),
    Numeric(i64),
}

/// A writable column of an entity table.
///
/// Only columns declared here can ever appear in generated SQL; the
/// identifier and creation timestamp are store-assigned and never declared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub required: bool,
    pub default: Option<DefaultValue>,
}

impl ColumnDef {
    const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            required: false,
            default: None,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, ColumnType::Text)
    }

    pub const fn uuid(name: &'static str) -> Self {
        Self::new(name, ColumnType::Uuid)
    }

    pub const fn date(name: &'static str) -> Self {
        Self::new(name, ColumnType::Date)
    }

    pub const fn numeric(name: &'static str) -> Self {
        Self::new(name, ColumnType::Numeric)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, ColumnType::Integer)
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn default_to(self, default: DefaultValue) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }
}
