use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::SchemaGenError;

/// Database type tokens recognized by the mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    BigInt,
    Binary,
    Bit,
    Char,
    Date,
    DateTime,
    DateTime2,
    DateTimeOffset,
    Decimal,
    Float,
    Image,
    Int,
    Money,
    NChar,
    NText,
    Numeric,
    NVarChar,
    Real,
    RowVersion,
    SmallDateTime,
    SmallInt,
    SmallMoney,
    Structured,
    Text,
    Time,
    Timestamp,
    TinyInt,
    Udt,
    UniqueIdentifier,
    VarBinary,
    VarChar,
    Variant,
    Xml,
}

impl SqlType {
    /// Every recognized token, in alphabetical order
    pub const ALL: [SqlType; 33] = [
        SqlType::BigInt,
        SqlType::Binary,
        SqlType::Bit,
        SqlType::Char,
        SqlType::Date,
        SqlType::DateTime,
        SqlType::DateTime2,
        SqlType::DateTimeOffset,
        SqlType::Decimal,
        SqlType::Float,
        SqlType::Image,
        SqlType::Int,
        SqlType::Money,
        SqlType::NChar,
        SqlType::NText,
        SqlType::Numeric,
        SqlType::NVarChar,
        SqlType::Real,
        SqlType::RowVersion,
        SqlType::SmallDateTime,
        SqlType::SmallInt,
        SqlType::SmallMoney,
        SqlType::Structured,
        SqlType::Text,
        SqlType::Time,
        SqlType::Timestamp,
        SqlType::TinyInt,
        SqlType::Udt,
        SqlType::UniqueIdentifier,
        SqlType::VarBinary,
        SqlType::VarChar,
        SqlType::Variant,
        SqlType::Xml,
    ];

    /// Canonical lower-case token
    pub fn token(&self) -> &'static str {
        match self {
            SqlType::BigInt => "bigint",
            SqlType::Binary => "binary",
            SqlType::Bit => "bit",
            SqlType::Char => "char",
            SqlType::Date => "date",
            SqlType::DateTime => "datetime",
            SqlType::DateTime2 => "datetime2",
            SqlType::DateTimeOffset => "datetimeoffset",
            SqlType::Decimal => "decimal",
            SqlType::Float => "float",
            SqlType::Image => "image",
            SqlType::Int => "int",
            SqlType::Money => "money",
            SqlType::NChar => "nchar",
            SqlType::NText => "ntext",
            SqlType::Numeric => "numeric",
            SqlType::NVarChar => "nvarchar",
            SqlType::Real => "real",
            SqlType::RowVersion => "rowversion",
            SqlType::SmallDateTime => "smalldatetime",
            SqlType::SmallInt => "smallint",
            SqlType::SmallMoney => "smallmoney",
            SqlType::Structured => "structured",
            SqlType::Text => "text",
            SqlType::Time => "time",
            SqlType::Timestamp => "timestamp",
            SqlType::TinyInt => "tinyint",
            SqlType::Udt => "udt",
            SqlType::UniqueIdentifier => "uniqueidentifier",
            SqlType::VarBinary => "varbinary",
            SqlType::VarChar => "varchar",
            SqlType::Variant => "variant",
            SqlType::Xml => "xml",
        }
    }
}

static TOKENS: Lazy<HashMap<&'static str, SqlType>> =
    Lazy::new(|| SqlType::ALL.iter().map(|t| (t.token(), *t)).collect());

impl FromStr for SqlType {
    type Err = SchemaGenError;

    /// Case-insensitive lookup; surrounding whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        TOKENS
            .get(token.as_str())
            .copied()
            .ok_or_else(|| SchemaGenError::unrecognized_type(s))
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
