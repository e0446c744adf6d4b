//! In-memory audit trail of every request a client handled.

use std::fmt;

use chrono::{DateTime, Local};

use crate::domain::{Operation, TransportMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditTarget {
    /// The request went out over HTTP.
    Sent {
        mode: TransportMode,
        /// Full URL, including the query string for GET-style modes.
        url: String,
        /// Serialized form body for [`TransportMode::BodyPost`].
        body: Option<String>,
    },
    /// The request failed local validation and was never sent.
    Rejected { operation: Operation },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One line of the audit log.
///
/// Sent entries contain the credentials as they appear on the wire.
pub struct AuditEntry {
    pub timestamp: DateTime<Local>,
    pub target: AuditTarget,
    /// Raw response body, or the synthesized `CATEGORY;CODE;MESSAGE` string.
    pub result: String,
}

impl AuditEntry {
    pub(crate) fn sent(
        mode: TransportMode,
        url: String,
        body: Option<String>,
        result: String,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            target: AuditTarget::Sent { mode, url, body },
            result,
        }
    }

    pub(crate) fn rejected(operation: Operation, result: String) -> Self {
        Self {
            timestamp: Local::now(),
            target: AuditTarget::Rejected { operation },
            result,
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - ", self.timestamp.format("%d-%m-%Y %H:%M:%S"))?;
        match &self.target {
            AuditTarget::Sent { mode, url, body } => {
                write!(f, "Sending request using {} to URL: [{url}]", mode.label())?;
                if let Some(body) = body {
                    write!(f, " with POST parameters: [{body}]")?;
                }
            }
            AuditTarget::Rejected { operation } => {
                write!(f, "Rejected {operation} by local validation")?;
            }
        }
        write!(f, " => Request Result: [{}]", self.result)
    }
}

#[derive(Debug, Clone, Default)]
/// Append-only, insertion-ordered list of [`AuditEntry`] values.
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub(crate) fn push(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&AuditEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AuditEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a AuditLog {
    type Item = &'a AuditEntry;
    type IntoIter = std::slice::Iter<'a, AuditEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at_noon(target: AuditTarget, result: &str) -> AuditEntry {
        AuditEntry {
            timestamp: Local.with_ymd_and_hms(2024, 3, 5, 12, 0, 9).unwrap(),
            target,
            result: result.to_owned(),
        }
    }

    #[test]
    fn get_entry_renders_on_one_line() {
        let entry = at_noon(
            AuditTarget::Sent {
                mode: TransportMode::QueryGet,
                url: "https://example.invalid/index.php?mode=blacklist-add".to_owned(),
                body: None,
            },
            "MESSAGE;1;Added;",
        );
        assert_eq!(
            entry.to_string(),
            "05-03-2024 12:00:09 - Sending request using HTTP GET to URL: \
             [https://example.invalid/index.php?mode=blacklist-add] \
             => Request Result: [MESSAGE;1;Added;]"
        );
    }

    #[test]
    fn post_entry_includes_body() {
        let entry = at_noon(
            AuditTarget::Sent {
                mode: TransportMode::BodyPost,
                url: "https://example.invalid/index.php".to_owned(),
                body: Some("mode=receiver-remove".to_owned()),
            },
            "ERROR;0;Unexpected HTTP code 500",
        );
        assert!(entry.to_string().ends_with(
            "using HTTP POST to URL: [https://example.invalid/index.php] \
             with POST parameters: [mode=receiver-remove] \
             => Request Result: [ERROR;0;Unexpected HTTP code 500]"
        ));
    }

    #[test]
    fn rejected_entry_names_operation() {
        let entry = at_noon(
            AuditTarget::Rejected {
                operation: Operation::ContactCreate,
            },
            "ERROR;0;Invalid Group ID.;",
        );
        assert!(entry
            .to_string()
            .contains("Rejected receiver-add by local validation"));
    }

    #[test]
    fn log_keeps_insertion_order() {
        let mut log = AuditLog::default();
        assert!(log.last().is_none());
        log.push(AuditEntry::rejected(Operation::BlacklistAdd, "first".to_owned()));
        log.push(AuditEntry::rejected(Operation::BlacklistRemove, "second".to_owned()));
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().map(|e| e.result.as_str()), Some("second"));
        let results: Vec<_> = log.iter().map(|e| e.result.as_str()).collect();
        assert_eq!(results, vec!["first", "second"]);
    }
}
