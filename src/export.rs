//! TXT / CSV / JSON export of a session's results.
//!
//! Every export writes three sibling files sharing one `yyyyMMdd_HHmmss` stamp:
//!
//! ```text
//! <root>/<sanitized target>/risk_<stamp>.txt
//! <root>/<sanitized target>/risk_<stamp>.csv
//! <root>/<sanitized target>/risk_<stamp>.json
//! ```
//!
//! `<root>` defaults to `~/RISK-Exports`. Stamps are rendered in UTC.

use crate::error::ExportError;
use crate::types::ResultRecord;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use tracing::info;

/// Folder created under the home directory to hold exports.
pub const EXPORT_FOLDER: &str = "RISK-Exports";

pub const CSV_HEADER: &str = "id,target,scan_type,title,timestamp,command,output";

const BANNER: &str = "R.I.S.K – Real Internet Security Knowledge";
const HEAVY_RULE: usize = 60;
const LIGHT_RULE: usize = 40;

/// `~/RISK-Exports`.
pub fn default_export_root() -> Result<PathBuf, ExportError> {
    dirs::home_dir()
        .map(|home| home.join(EXPORT_FOLDER))
        .ok_or(ExportError::HomeDirUnavailable)
}

/// Make a target usable as a directory name.
///
/// Each of `/ : \ ? % * | " < >` becomes `_`; an empty result becomes `target`.
pub fn safe_file_name(raw: &str) -> String {
    const INVALID: &[char] = &['/', ':', '\\', '?', '%', '*', '|', '"', '<', '>'];
    let cleaned: String = raw
        .chars()
        .map(|c| if INVALID.contains(&c) { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "target".to_string()
    } else {
        cleaned
    }
}

/// `yyyyMMdd_HHmmss` in UTC.
pub fn file_stamp(at: OffsetDateTime) -> Result<String, ExportError> {
    Ok(at.to_offset(UtcOffset::UTC).format(format_description!(
        "[year][month][day]_[hour][minute][second]"
    ))?)
}

/// RFC 3339 in UTC. Fails only for instants outside years 0..=9999.
fn rfc3339(at: OffsetDateTime) -> Result<String, ExportError> {
    Ok(at.to_offset(UtcOffset::UTC).format(&Rfc3339)?)
}

/// Human-readable report of all records, in store order.
pub fn render_text(
    target: &str,
    records: &[ResultRecord],
    generated: OffsetDateTime,
) -> Result<String, ExportError> {
    let heavy = "=".repeat(HEAVY_RULE);
    let light = "-".repeat(LIGHT_RULE);

    let mut out = String::new();
    out.push_str(BANNER);
    out.push('\n');
    out.push_str(&format!("Target: {target}\n"));
    out.push_str(&format!("Generated: {}\n", rfc3339(generated)?));
    out.push_str(&heavy);
    out.push_str("\n\n");

    for r in records {
        out.push_str(&format!("[{}] {}\n", r.scan_type().label(), r.title()));
        out.push_str(&format!("Command: {}\n", r.command()));
        out.push_str(&format!("Timestamp: {}\n", rfc3339(r.timestamp())?));
        out.push_str(&light);
        out.push('\n');
        out.push_str(r.output());
        if !r.output().ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&heavy);
        out.push_str("\n\n");
    }
    Ok(out)
}

/// One header line plus one physical line per record.
///
/// Every field is quoted with embedded quotes doubled; newlines in `output`
/// become a literal `\n` first.
pub fn render_csv(records: &[ResultRecord]) -> Result<String, ExportError> {
    let mut head = String::with_capacity(CSV_HEADER.len() + 1);
    head.push_str(CSV_HEADER);
    head.push('\n');

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .double_quote(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(head.into_bytes());

    for r in records {
        let id = r.id().hyphenated().to_string();
        let stamp = file_stamp(r.timestamp())?;
        let output = r.output().replace('\n', "\\n");
        writer.write_record([
            id.as_str(),
            r.target(),
            r.scan_type().label(),
            r.title(),
            stamp.as_str(),
            r.command(),
            output.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Pretty-printed JSON array of the records.
pub fn render_json(records: &[ResultRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write the TXT, CSV and JSON exports for `records` under `root`.
///
/// Returns the three written paths in that order, or nothing when `records`
/// is empty. A failed write aborts the call; files already written stay.
pub async fn export_all(
    root: &Path,
    target: &str,
    records: &[ResultRecord],
) -> Result<Vec<PathBuf>, ExportError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let dir = root.join(safe_file_name(target));
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| ExportError::io(&dir, e))?;

    let now = OffsetDateTime::now_utc();
    let stamp = file_stamp(now)?;

    let bodies = [
        ("txt", render_text(target, records, now)?),
        ("csv", render_csv(records)?),
        ("json", render_json(records)?),
    ];

    let mut written = Vec::with_capacity(bodies.len());
    for (ext, body) in bodies {
        let path = dir.join(format!("risk_{stamp}.{ext}"));
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| ExportError::io(&path, e))?;
        info!(path = %path.display(), "wrote export");
        written.push(path);
    }
    Ok(written)
}
