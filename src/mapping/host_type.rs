use crate::error::SchemaGenResult;
use crate::mapping::SqlType;

/// Size used for types whose storage depends on the declaration
pub const DEFAULT_SIZE_FALLBACK: u32 = 50;

/// Host-language types the model generator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostType {
    Bool,
    Double,
    Bytes,
    Byte,
    Int32,
    Int64,
    Text,
    Decimal,
    Guid,
    DateTime,
    Duration,
    DateTimeOffset,
    Any,
}

impl HostType {
    /// Host type for a recognized database type token
    pub fn for_sql_type(sql_type: SqlType) -> Self {
        match sql_type {
            SqlType::Bit => HostType::Bool,
            SqlType::Float | SqlType::Real => HostType::Double,
            SqlType::Binary
            | SqlType::VarBinary
            | SqlType::Image
            | SqlType::Timestamp
            | SqlType::RowVersion => HostType::Bytes,
            SqlType::TinyInt => HostType::Byte,
            SqlType::SmallInt | SqlType::Int => HostType::Int32,
            SqlType::BigInt => HostType::Int64,
            SqlType::Char
            | SqlType::NChar
            | SqlType::NText
            | SqlType::NVarChar
            | SqlType::VarChar
            | SqlType::Text => HostType::Text,
            SqlType::Numeric | SqlType::Money | SqlType::Decimal | SqlType::SmallMoney => {
                HostType::Decimal
            }
            SqlType::UniqueIdentifier => HostType::Guid,
            SqlType::Date | SqlType::SmallDateTime | SqlType::DateTime | SqlType::DateTime2 => {
                HostType::DateTime
            }
            SqlType::Time => HostType::Duration,
            SqlType::DateTimeOffset => HostType::DateTimeOffset,
            SqlType::Structured | SqlType::Udt | SqlType::Variant | SqlType::Xml => HostType::Any,
        }
    }

    /// Reference-like types have no separate nullable form
    pub fn has_nullable_form(&self) -> bool {
        !matches!(self, HostType::Bytes | HostType::Text | HostType::Any)
    }

    /// C# keyword or framework type name
    pub fn name(&self) -> &'static str {
        match self {
            HostType::Bool => "bool",
            HostType::Double => "double",
            HostType::Bytes => "byte[]",
            HostType::Byte => "byte",
            HostType::Int32 => "int",
            HostType::Int64 => "long",
            HostType::Text => "string",
            HostType::Decimal => "decimal",
            HostType::Guid => "Guid",
            HostType::DateTime => "DateTime",
            HostType::Duration => "TimeSpan",
            HostType::DateTimeOffset => "DateTimeOffset",
            HostType::Any => "object",
        }
    }

    /// Type name as declared for a column with the given nullability
    pub fn declared_name(&self, nullable: bool) -> String {
        if nullable && self.has_nullable_form() {
            format!("{}?", self.name())
        } else {
            self.name().to_string()
        }
    }
}

/// Map a database type token to the host type name declared in models
pub fn map_to_host_type(db_type: &str, nullable: bool) -> SchemaGenResult<String> {
    let sql_type: SqlType = db_type.parse()?;
    Ok(HostType::for_sql_type(sql_type).declared_name(nullable))
}

/// Default storage size in bytes for a database type token
pub fn default_size_for_type(db_type: &str, fallback: u32) -> SchemaGenResult<u32> {
    let sql_type: SqlType = db_type.parse()?;
    Ok(default_size(sql_type, fallback))
}

/// Default storage size for an already parsed token
pub fn default_size(sql_type: SqlType, fallback: u32) -> u32 {
    match sql_type {
        SqlType::BigInt | SqlType::Binary => 8,
        SqlType::Bit | SqlType::TinyInt => 1,
        SqlType::Date | SqlType::DateTime | SqlType::DateTime2 | SqlType::DateTimeOffset => 8,
        SqlType::Decimal | SqlType::Float | SqlType::Money | SqlType::Numeric => 20,
        SqlType::Int => 4,
        SqlType::NText => 200,
        SqlType::Real => 10,
        SqlType::SmallDateTime => 4,
        SqlType::SmallInt => 2,
        SqlType::Text => 500,
        SqlType::Time => 8,
        SqlType::UniqueIdentifier => 16,
        _ => fallback,
    }
}
