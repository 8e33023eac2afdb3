use sqlparser::ast::{ColumnOption, Statement};
use sqlparser::dialect::MsSqlDialect;
use sqlparser::parser::Parser;
use tracing::debug;

use crate::error::{SchemaGenError, SchemaGenResult};

const IDENTITY_KEYWORD: &str = "IDENTITY(";
const MAX_LENGTH: &str = "(MAX)";

/// Column definition recovered from a CREATE TABLE statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectedColumn {
    pub name: String,
    /// Base type token in upper case, without length arguments
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub identity: bool,
    /// Default expression as printed by the parser
    pub default: Option<String>,
}

/// Table definition recovered from a CREATE TABLE statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectedTable {
    pub name: String,
    pub columns: Vec<InspectedColumn>,
}

/// Parse the CREATE TABLE statement at the start of a generated DDL script.
///
/// Statements after the closing `);` line (descriptions) are ignored. The
/// MsSql dialect of sqlparser accepts neither `IDENTITY(seed, increment)` as
/// a column option nor `(MAX)` on every character type, so both are lifted
/// out of each column line first.
pub fn inspect_create_table(ddl: &str) -> SchemaGenResult<InspectedTable> {
    let mut sql = String::new();
    let mut identity_flags = Vec::new();
    let mut closed = false;

    for (index, line) in ddl.lines().enumerate() {
        let trimmed = line.trim();
        if index > 0 && !trimmed.starts_with(')') {
            let (stripped, identity) = lift_identity(line);
            identity_flags.push(identity);
            sql.push_str(&strip_max_length(&stripped));
        } else {
            sql.push_str(line);
        }
        sql.push('\n');
        if index > 0 && trimmed.starts_with(')') {
            closed = true;
            break;
        }
    }
    if !closed {
        return Err(SchemaGenError::ddl("CREATE TABLE statement is not terminated"));
    }

    let statements = Parser::parse_sql(&MsSqlDialect {}, &sql)?;
    let Some(Statement::CreateTable { name, columns, .. }) = statements.into_iter().next() else {
        return Err(SchemaGenError::ddl("script does not start with CREATE TABLE"));
    };
    debug!("Inspected CREATE TABLE {} with {} columns", name, columns.len());

    let table_name = name
        .0
        .last()
        .map(|ident| ident.value.clone())
        .unwrap_or_default();

    let columns = columns
        .into_iter()
        .enumerate()
        .map(|(index, column)| {
            let mut inspected = InspectedColumn {
                name: column.name.value,
                data_type: base_type(&column.data_type.to_string()),
                nullable: true,
                primary_key: false,
                identity: identity_flags.get(index).copied().unwrap_or(false),
                default: None,
            };
            for option in column.options {
                match option.option {
                    ColumnOption::NotNull => inspected.nullable = false,
                    ColumnOption::Null => inspected.nullable = true,
                    ColumnOption::Unique { is_primary, .. } if is_primary => {
                        inspected.primary_key = true;
                    }
                    ColumnOption::Default(expr) => inspected.default = Some(expr.to_string()),
                    _ => {}
                }
            }
            inspected
        })
        .collect();

    Ok(InspectedTable {
        name: table_name,
        columns,
    })
}

/// Remove an `IDENTITY(...)` clause from a column line
fn lift_identity(line: &str) -> (String, bool) {
    let upper = line.to_ascii_uppercase();
    let Some(start) = upper.find(IDENTITY_KEYWORD) else {
        return (line.to_string(), false);
    };
    let Some(close) = line[start..].find(')') else {
        return (line.to_string(), false);
    };
    let mut stripped = line[..start].trim_end().to_string();
    stripped.push_str(&line[start + close + 1..]);
    (stripped, true)
}

fn strip_max_length(line: &str) -> String {
    match line.to_ascii_uppercase().find(MAX_LENGTH) {
        Some(start) => format!("{}{}", &line[..start], &line[start + MAX_LENGTH.len()..]),
        None => line.to_string(),
    }
}

fn base_type(data_type: &str) -> String {
    data_type
        .split('(')
        .next()
        .unwrap_or(data_type)
        .trim()
        .to_ascii_uppercase()
}
