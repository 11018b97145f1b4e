//! Output mode control.
//!
//! [`OutputMode`] decides whether the CLI prints plain query text or the
//! serialized form view.

use seekform::{ClauseKind, FormView, RowView};

use crate::error::CliError;

/// Controls how results are written.
///
/// This is the user-facing enum for the `--output` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Compiled query only, or a row listing for `show`
    #[default]
    Text,
    /// Serialize the form view as JSON
    Json,
    /// Serialize the form view as YAML
    Yaml,
}

impl OutputMode {
    /// Returns true if this is a structured output mode (JSON, YAML).
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml)
    }
}

/// Writes the result of an edit: the query text, or the serialized view.
pub fn render_query(view: &FormView, mode: OutputMode) -> Result<String, CliError> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(view)?),
        OutputMode::Yaml => Ok(serde_yaml::to_string(view)?),
        OutputMode::Text => Ok(view.compiled_query.clone()),
    }
}

/// Writes the whole form: one line per row, then combinator and query.
pub fn render_form(view: &FormView, mode: OutputMode) -> Result<String, CliError> {
    if mode.is_structured() {
        return render_query(view, mode);
    }

    let mut lines = Vec::new();
    for kind in ClauseKind::ALL {
        for row in view.rows(kind) {
            lines.push(format_row(row, kind, view));
        }
    }
    lines.push(format!("combinator: {}", view.combinator));
    lines.push(format!("query: {}", view.compiled_query));
    Ok(lines.join("\n"))
}

fn format_row(row: &RowView, kind: ClauseKind, view: &FormView) -> String {
    let marker = if row.keyword_control == view.focus {
        '>'
    } else {
        ' '
    };
    let sign = if kind.is_negated() { '-' } else { '+' };
    let pin = if row.removable { "" } else { " (pinned)" };
    format!(
        "{} {} {}[{}] {}: {:?}{}",
        marker, sign, kind, row.index, row.field, row.keyword, pin
    )
}
