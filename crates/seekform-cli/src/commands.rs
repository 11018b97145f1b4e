//! One-shot command handlers.

use std::str::FromStr;

use seekform::{ClauseKind, Combinator, Event, QueryState};

use crate::config::Config;
use crate::error::CliError;
use crate::output::{render_query, OutputMode};

/// A `FIELD:KEYWORD` command-line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseArg {
    pub field: String,
    pub keyword: String,
}

impl FromStr for ClauseArg {
    type Err = CliError;

    /// Splits at the first `:`; the keyword may contain further colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((field, keyword)) if !field.is_empty() => Ok(ClauseArg {
                field: field.to_string(),
                keyword: keyword.to_string(),
            }),
            _ => Err(CliError::InvalidClause(s.to_string())),
        }
    }
}

/// Builds a form from argument lists through the same events a session
/// would send.
pub fn build_form(
    config: &Config,
    include: &[ClauseArg],
    exclude: &[ClauseArg],
    combinator: Option<Combinator>,
) -> Result<QueryState, CliError> {
    let mut form = config.new_form();
    fill(&mut form, config, ClauseKind::Include, include)?;
    fill(&mut form, config, ClauseKind::Exclude, exclude)?;
    if let Some(combinator) = combinator {
        form.apply(Event::SetCombinator(combinator));
    }
    Ok(form)
}

fn fill(
    form: &mut QueryState,
    config: &Config,
    kind: ClauseKind,
    clauses: &[ClauseArg],
) -> Result<(), CliError> {
    for (index, clause) in clauses.iter().enumerate() {
        config.fields.validate(&clause.field)?;
        if index > 0 {
            form.apply(Event::Append(kind));
        }
        form.apply(Event::SetField {
            kind,
            index,
            field: clause.field.clone(),
        });
        form.apply(Event::SetKeyword {
            kind,
            index,
            keyword: clause.keyword.clone(),
        });
    }
    Ok(())
}

/// Handler for `seekform-cli compile`.
pub fn compile(
    config: &Config,
    include: &[ClauseArg],
    exclude: &[ClauseArg],
    combinator: Option<Combinator>,
    mode: OutputMode,
) -> Result<String, CliError> {
    let form = build_form(config, include, exclude, combinator)?;
    render_query(&form.view(), mode)
}

/// Handler for `seekform-cli fields`.
pub fn fields(config: &Config) -> String {
    config
        .fields
        .fields()
        .iter()
        .map(|field| {
            if field == config.fields.default_field() {
                format!("{} (default)", field)
            } else {
                field.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
