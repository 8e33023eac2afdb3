/// Conventional table name prefixes
const TABLE_PREFIXES: [&str; 2] = ["tbl", "tab"];

/// Separator allowed between a prefix and the table name
const PREFIX_SEPARATOR: char = '_';

/// Strip a conventional `tbl`/`tab` prefix (and a following `_`) from a table name.
///
/// The name is returned unchanged when stripping would leave nothing.
pub fn trim_table_prefix(name: &str) -> String {
    let name = name.trim();
    for prefix in TABLE_PREFIXES {
        if let Some(rest) = name.strip_prefix(prefix) {
            let rest = rest.strip_prefix(PREFIX_SEPARATOR).unwrap_or(rest);
            if !rest.is_empty() {
                return rest.to_string();
            }
        }
    }
    name.to_string()
}

/// Derive a backing field name from a public member name.
///
/// `ID` becomes `id`, `Name` becomes `name`, and `name` becomes `_name`.
pub fn to_private_field_name(identifier: &str) -> String {
    let mut chars = identifier.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    if identifier == identifier.to_uppercase() {
        return identifier.to_lowercase();
    }
    if first.is_uppercase() {
        let mut field: String = first.to_lowercase().collect();
        field.push_str(chars.as_str());
        return field;
    }
    format!("_{identifier}")
}
