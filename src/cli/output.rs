//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use gitlab_warden::gitlab::{CollectionReport, Item, ReconcileReport, WardenError};

/// Writes the reconciliation message.
pub fn write_reconcile_report<W: Write>(
    writer: &mut W,
    report: &ReconcileReport,
) -> Result<(), WardenError> {
    writeln!(writer, "{}", report.detail).map_err(|e| io_error(&e))
}

/// Writes one line per collected item followed by the summary.
pub fn write_collection_report<W: Write>(
    writer: &mut W,
    report: &CollectionReport,
) -> Result<(), WardenError> {
    for item in &report.items {
        if let Some(line) = item_line(item) {
            writeln!(writer, "{line}").map_err(|e| io_error(&e))?;
        }
    }
    writeln!(writer, "{}", report.summary).map_err(|e| io_error(&e))
}

/// `#iid title`, followed by the web URL when the record has one.
fn item_line(item: &Item) -> Option<String> {
    let mut line = match (item.iid(), item.title()) {
        (Some(iid), Some(title)) => format!("  #{iid} {title}"),
        (Some(iid), None) => format!("  #{iid} (no title)"),
        (None, Some(title)) => format!("  {title}"),
        (None, None) => return None,
    };
    if let Some(url) = item.web_url() {
        line = format!("{line} <{url}>");
    }
    Some(line)
}

/// Converts an I/O error to a [`WardenError::Io`].
pub(crate) fn io_error(error: &io::Error) -> WardenError {
    WardenError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use gitlab_warden::gitlab::{
        CollectionReport, Item, ItemKind, MembershipOutcome, ReconcileReport,
    };
    use serde_json::json;

    use super::{write_collection_report, write_reconcile_report};

    #[test]
    fn write_collection_report_lists_items_before_summary() {
        let report = CollectionReport {
            kind: Some(ItemKind::Issue),
            year: 2023,
            items: vec![
                Item::new(json!({
                    "iid": 3,
                    "title": "Fix login",
                    "web_url": "https://gitlab.com/acme/api/-/issues/3"
                })),
                Item::new(json!({ "iid": 4 })),
                Item::new(json!({ "id": 99 })),
            ],
            pages_fetched: 2,
            error: None,
            summary: "Found 3 issue created in 2023.".to_owned(),
        };

        let mut buffer = Vec::new();
        write_collection_report(&mut buffer, &report).expect("should write report");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert_eq!(
            output,
            concat!(
                "  #3 Fix login <https://gitlab.com/acme/api/-/issues/3>\n",
                "  #4 (no title)\n",
                "Found 3 issue created in 2023.\n"
            )
        );
    }

    #[test]
    fn write_reconcile_report_prints_detail() {
        let report = ReconcileReport {
            outcome: MembershipOutcome::Created,
            user: None,
            entity: None,
            role: None,
            detail: "Successfully added user 'alice' to project 'api' with role 'Guest'."
                .to_owned(),
        };

        let mut buffer = Vec::new();
        write_reconcile_report(&mut buffer, &report).expect("should write report");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert!(
            output.contains("Successfully added user 'alice'"),
            "missing detail: {output}"
        );
    }
}
