//! CSV export of search results.

use crate::models::JobRecord;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

const HEADERS: [&str; 7] = [
    "ID",
    "Title",
    "Company",
    "Location",
    "Date Posted",
    "Description",
    "Apply URL",
];

/// Write `jobs` as CSV. Absent fields become empty cells.
pub fn export_csv<W: Write>(writer: W, jobs: &[JobRecord]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    csv_writer
        .write_record(HEADERS)
        .context("Failed to write CSV header")?;

    for job in jobs {
        csv_writer
            .write_record([
                job.id.as_str(),
                job.title.as_str(),
                job.company.as_deref().unwrap_or(""),
                job.location.as_deref().unwrap_or(""),
                job.date_posted.as_deref().unwrap_or(""),
                job.description.as_deref().unwrap_or(""),
                job.apply_url.as_deref().unwrap_or(""),
            ])
            .with_context(|| format!("Failed to write CSV row for job {}", job.id))?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Export to a file, replacing it.
pub fn export_csv_file(path: &Path, jobs: &[JobRecord]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    export_csv(file, jobs)
}
