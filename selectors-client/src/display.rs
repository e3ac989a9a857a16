//! Result panels: what the user sees after a submission.

use std::fmt;

use crate::{
    error::{ClientError, ClientResult},
    types::Outcome,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// 1-based position in the service's ordering.
    pub rank: usize,
    pub text_signature: String,
    /// Creation date, `YYYY-MM-DD`.
    pub created: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelBody {
    Message(String),
    Table(Vec<Row>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Panel {
    pub title: String,
    pub body: PanelBody,
}

impl Panel {
    pub fn outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::NoMatches => Panel {
                title: "No Results".into(),
                body: PanelBody::Message("No signatures found for this hex signature.".into()),
            },
            Outcome::Matches { records, count } => {
                let plural = if *count == 1 { "" } else { "s" };
                let rows = records
                    .iter()
                    .enumerate()
                    .map(|(i, r)| Row {
                        rank: i + 1,
                        text_signature: r.text_signature.clone(),
                        created: r.created_at.format("%Y-%m-%d").to_string(),
                    })
                    .collect();
                Panel {
                    title: format!("Found {count} signature{plural}"),
                    body: PanelBody::Table(rows),
                }
            }
            Outcome::Created(record) => Panel {
                title: "Signature added".into(),
                body: PanelBody::Message(format!(
                    "{} was added as {}.",
                    record.text_signature, record.hex_signature
                )),
            },
        }
    }

    pub fn error(err: &ClientError) -> Self {
        Panel {
            title: "Error".into(),
            body: PanelBody::Message(err.to_string()),
        }
    }

    pub fn from_result(result: &ClientResult<Outcome>) -> Self {
        match result {
            Ok(outcome) => Panel::outcome(outcome),
            Err(e) => Panel::error(e),
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "-".repeat(self.title.chars().count()))?;
        match &self.body {
            PanelBody::Message(message) => writeln!(f, "{message}"),
            PanelBody::Table(rows) => {
                let rank_width = rows.len().to_string().len();
                let text_width = rows
                    .iter()
                    .map(|r| r.text_signature.chars().count())
                    .max()
                    .unwrap_or(0);
                for row in rows {
                    writeln!(
                        f,
                        "{:>rank_width$}  {:<text_width$}  {}",
                        row.rank, row.text_signature, row.created
                    )?;
                }
                Ok(())
            }
        }
    }
}
