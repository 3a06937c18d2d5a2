//! CSV import and export of student records.
//!
//! Import is synchronous and keeps no state between calls apart from the
//! caller's known-id set, which it extends as rows are accepted. Hosts with an
//! async runtime should run it on a blocking thread.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use roster_core::Result;
use roster_models::{Student, StudentStatus};
use roster_observability::track_import_completed;
use tracing::{debug, info, instrument};

use super::model::{
    CSV_HEADER, ERROR_REPORT_HEADER, IMPORT_ERRORS_FILE, ImportDiagnostic, ImportOutcome,
    RowError,
};
use crate::modules::students::validation::validate_student;

#[derive(Clone, Debug)]
pub struct CsvTransferService {
    data_dir: PathBuf,
}

impl CsvTransferService {
    /// Named exports and the error report are written under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Writes the header row and one row per student.
    pub fn export_to_writer<W: Write>(&self, students: &[Student], writer: W) -> Result<()> {
        let mut csv = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .from_writer(writer);

        csv.write_record(CSV_HEADER).map_err(io::Error::from)?;
        for student in students {
            csv.write_record(to_row(student)).map_err(io::Error::from)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Exports to `<data_dir>/<file_name>`, creating the directory if needed.
    #[instrument(skip(self, students), fields(records = students.len()))]
    pub fn export_to_file(&self, students: &[Student], file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.data_dir.join(file_name);
        self.export_to_path(students, &path)?;
        Ok(path)
    }

    pub fn export_to_path(&self, students: &[Student], path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.export_to_writer(students, BufWriter::new(file))?;
        info!(path = %path.display(), records = students.len(), "Export complete");
        Ok(())
    }

    /// Parses, dedupes and validates every data line of `reader`.
    ///
    /// The first line is a header and is always skipped. Blank lines are
    /// skipped without a diagnostic. Only an I/O failure on the reader itself
    /// is returned as an error.
    pub fn import_from_reader<R: BufRead>(
        &self,
        mut reader: R,
        known_ids: &mut HashSet<String>,
    ) -> Result<ImportOutcome> {
        let mut outcome = ImportOutcome::default();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_number += 1;
            if line_number == 1 {
                continue;
            }

            let line = match std::str::from_utf8(strip_line_ending(&buf)) {
                Ok(line) => line,
                Err(_) => {
                    outcome.diagnostics.push(ImportDiagnostic {
                        line: line_number,
                        error: RowError::InvalidEncoding,
                    });
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match accept_line(line, known_ids) {
                Ok(student) => outcome.accepted.push(student),
                Err(error) => {
                    debug!(line = line_number, error = %error, "Import row skipped");
                    outcome.diagnostics.push(ImportDiagnostic {
                        line: line_number,
                        error,
                    });
                }
            }
        }

        track_import_completed(outcome.accepted.len(), outcome.diagnostics.len());
        info!(
            imported = outcome.accepted.len(),
            errors = outcome.diagnostics.len(),
            "Import complete"
        );
        Ok(outcome)
    }

    #[instrument(skip(self, known_ids), fields(path = %path.display()))]
    pub fn import_from_file(
        &self,
        path: &Path,
        known_ids: &mut HashSet<String>,
    ) -> Result<ImportOutcome> {
        let file = File::open(path)?;
        self.import_from_reader(BufReader::new(file), known_ids)
    }

    /// Writes the `error_description` header then one quoted line per message.
    pub fn write_error_report<W: Write>(&self, messages: &[String], mut writer: W) -> Result<()> {
        writeln!(writer, "{ERROR_REPORT_HEADER}")?;

        let mut csv = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(writer);
        for message in messages {
            csv.write_record([message]).map_err(io::Error::from)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Saves `messages` to `<data_dir>/import_errors.csv`.
    pub fn save_error_report(&self, messages: &[String]) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.data_dir.join(IMPORT_ERRORS_FILE);
        let file = File::create(&path)?;
        self.write_error_report(messages, BufWriter::new(file))?;

        info!(path = %path.display(), errors = messages.len(), "Import error report saved");
        Ok(path)
    }
}

fn to_row(student: &Student) -> [String; 9] {
    [
        student.student_id.clone(),
        student.full_name.clone(),
        student.programme.clone(),
        student.level.to_string(),
        student.gpa.to_string(),
        student.email.clone(),
        student.phone_number.clone(),
        student.date_added.format("%Y-%m-%d").to_string(),
        student.status.as_str().to_string(),
    ]
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Duplicate check, then validation. The id joins `known_ids` only once the
/// row is accepted.
fn accept_line(line: &str, known_ids: &mut HashSet<String>) -> std::result::Result<Student, RowError> {
    let student = parse_line(line)?;

    if known_ids.contains(&student.student_id) {
        return Err(RowError::DuplicateId(student.student_id));
    }

    let outcome = validate_student(&student);
    if !outcome.is_valid() {
        return Err(RowError::Invalid(outcome));
    }

    known_ids.insert(student.student_id.clone());
    Ok(student)
}

/// Splits one line into its nine trimmed fields. Columns past the ninth are
/// ignored.
fn parse_line(line: &str) -> std::result::Result<Student, RowError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    reader
        .read_record(&mut record)
        .map_err(|e| RowError::Malformed(e.to_string()))?;

    if record.len() < CSV_HEADER.len() {
        return Err(RowError::ColumnCount {
            found: record.len(),
        });
    }
    let field = |i: usize| record.get(i).unwrap_or_default().trim();

    let level = field(3)
        .parse::<i32>()
        .map_err(|_| RowError::InvalidLevel(field(3).to_string()))?;
    let gpa = field(4)
        .parse::<f64>()
        .map_err(|_| RowError::InvalidGpa(field(4).to_string()))?;
    let date_added = NaiveDate::parse_from_str(field(7), "%Y-%m-%d")
        .map_err(|_| RowError::InvalidDate(field(7).to_string()))?;
    let status = match field(8) {
        "" => StudentStatus::Active,
        other => other.parse::<StudentStatus>()?,
    };

    Ok(Student {
        student_id: field(0).to_string(),
        full_name: field(1).to_string(),
        programme: field(2).to_string(),
        level,
        gpa,
        email: field(5).to_string(),
        phone_number: field(6).to_string(),
        date_added,
        status,
    })
}
