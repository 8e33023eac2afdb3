use serde::{Deserialize, Serialize};

/// One level of indentation in generated source
pub const INDENT: &str = "    ";
/// Line terminator for every generated artifact
pub const NEWLINE: &str = "\n";
pub const BLOCK_OPEN: &str = "{";
pub const BLOCK_CLOSE: &str = "}";
pub const STATEMENT_END: &str = ";";
pub const LIST_SEPARATOR: &str = ",";

const DOC_PREFIX: &str = "/// ";
const SUMMARY_OPEN: &str = "/// <summary>";
const SUMMARY_CLOSE: &str = "/// </summary>";

/// SQL Server extended property statement for a table description
pub const TABLE_DESCRIPTION_TEMPLATE: &str = "EXECUTE sp_addextendedproperty N'MS_Description', N'{1}', N'SCHEMA', N'{2}', N'TABLE', N'{0}';";
/// SQL Server extended property statement for a column description
pub const COLUMN_DESCRIPTION_TEMPLATE: &str = "EXECUTE sp_addextendedproperty N'MS_Description', N'{2}', N'SCHEMA', N'{3}', N'TABLE', N'{0}', N'COLUMN', N'{1}';";

/// Line-oriented writer that owns indentation for generated source text
#[derive(Debug, Default)]
pub struct SourceWriter {
    buffer: String,
    level: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current indentation level
    pub fn line(&mut self, text: &str) -> &mut Self {
        for _ in 0..self.level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(text);
        self.buffer.push_str(NEWLINE);
        self
    }

    pub fn blank_line(&mut self) -> &mut Self {
        self.buffer.push_str(NEWLINE);
        self
    }

    /// Write `{` and indent the following lines
    pub fn open_block(&mut self) -> &mut Self {
        self.line(BLOCK_OPEN);
        self.level += 1;
        self
    }

    /// Outdent and write `}`
    pub fn close_block(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self.line(BLOCK_CLOSE)
    }

    /// XML documentation summary, one `///` line per description line
    pub fn doc_summary(&mut self, text: &str) -> &mut Self {
        self.line(SUMMARY_OPEN);
        for line in text.lines() {
            self.line(&format!("{DOC_PREFIX}{}", line.trim_end()));
        }
        self.line(SUMMARY_CLOSE)
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Statement format string with positional `{0}`, `{1}`, ... placeholders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementTemplate(String);

impl StatementTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether every placeholder `{0}`..`{count - 1}` appears in the template
    pub fn has_placeholders(&self, count: usize) -> bool {
        (0..count).all(|i| self.0.contains(&format!("{{{i}}}")))
    }

    /// Substitute placeholders in a single pass.
    ///
    /// Placeholders without a matching argument are left as written, and
    /// braces inside substituted text are never expanded again.
    pub fn fill(&self, args: &[&str]) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let index = after
                .find('}')
                .and_then(|end| after[..end].parse::<usize>().ok().map(|i| (i, end)));

            match index {
                Some((i, end)) if i < args.len() => {
                    out.push_str(args[i]);
                    rest = &after[end + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Escape text for use inside an `N'...'` literal
pub fn escape_sql_literal(text: &str) -> String {
    text.replace('\'', "''")
}

/// Bracket-quote an identifier, doubling any `]` inside it
pub fn quote_identifier(identifier: &str) -> String {
    format!("[{}]", identifier.replace(']', "]]"))
}
