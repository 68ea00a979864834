//! Statement classification for script-driven SQL.
//!
//! Decides whether a statement produces a result set, which is what the
//! SQLLogicTest runner needs to pick between a query and a plain execute.

use sqlparser::ast::Statement;
use sqlparser::dialect::DuckDbDialect;
use sqlparser::parser::Parser;

/// Leading keywords of DuckDB statements that return rows but that the
/// generic parser may not understand.
const QUERY_KEYWORDS: &[&str] = &[
    "SELECT", "WITH", "VALUES", "FROM", "TABLE", "SHOW", "DESCRIBE", "DESC", "SUMMARIZE",
    "EXPLAIN", "PRAGMA", "CALL",
];

/// A parsed SQL statement.
pub struct ParsedStatement {
    statement: Statement,
}

impl ParsedStatement {
    /// Parse a SQL statement.
    ///
    /// For multi-statement SQL, returns the last statement (which determines the result type).
    /// Returns `None` if the SQL cannot be parsed.
    pub fn parse(sql: &str) -> Option<Self> {
        let dialect = DuckDbDialect {};
        let statements = Parser::parse_sql(&dialect, sql).ok()?;

        Some(Self {
            statement: statements.into_iter().last()?,
        })
    }

    /// Check if this is a query statement (returns results).
    pub fn is_query(&self) -> bool {
        matches!(
            self.statement,
            Statement::Query(_)
                | Statement::ShowTables { .. }
                | Statement::ShowColumns { .. }
                | Statement::ShowCreate { .. }
                | Statement::ShowVariable { .. }
                | Statement::ShowVariables { .. }
                | Statement::Explain { .. }
                | Statement::ExplainTable { .. }
                | Statement::Pragma { .. }
                | Statement::Call(_)
        )
    }
}

/// Whether `sql` returns rows, falling back to the leading keyword when the
/// parser rejects DuckDB-specific syntax.
pub fn returns_rows(sql: &str) -> bool {
    if let Some(parsed) = ParsedStatement::parse(sql) {
        return parsed.is_query();
    }
    leading_keyword_is_query(sql)
}

fn leading_keyword_is_query(sql: &str) -> bool {
    let keyword = sql
        .trim_start()
        .trim_start_matches('(')
        .split(|c: char| c.is_whitespace() || c == '(' || c == ';')
        .next()
        .unwrap_or_default();
    QUERY_KEYWORDS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(keyword))
}
