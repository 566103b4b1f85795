use crate::models::{DiskRecord, ParseReport, RejectReason, RowRejection};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, error, info, warn};

/// Subcommand that makes the tool print its disk table.
pub const INFO_SUBCOMMAND: &str = "info";

/// File name of the inventory tool, looked up in the working directory.
#[cfg(windows)]
pub const TOOL_FILE_NAME: &str = "ntfstool.x64.exe";
#[cfg(not(windows))]
pub const TOOL_FILE_NAME: &str = "ntfstool";

const SECTION_MARKER: &str = "Disks:";
const BORDER_PREFIX: char = '+';
const DELIMITER: char = '|';
const HEADER_LABELS: [&str; 5] = ["id", "model", "type", "partition", "size"];

/// Captured result of one tool run.
#[derive(Clone, Debug, Default)]
pub struct ToolOutput {
    /// Exit code; None when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an external program to completion and captures its output.
pub trait ToolRunner {
    fn run(&self, program: &Path, args: &[&str]) -> io::Result<ToolOutput>;
}

/// Blocking runner backed by `std::process::Command`.
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[&str]) -> io::Result<ToolOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Ways a tool run can fail before any parsing happens.
#[derive(Debug)]
pub enum FetchError {
    /// The executable could not be started
    Launch { tool: String, source: io::Error },
    /// The tool exited with a non-zero code or was killed
    Failed { code: Option<i32>, stderr: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Launch { tool, source } => write!(f, "failed to run {}: {}", tool, source),
            FetchError::Failed { code: Some(code), stderr } => {
                write!(f, "tool exited with code {}: {}", code, stderr.trim())
            }
            FetchError::Failed { code: None, stderr } => {
                write!(f, "tool terminated by signal: {}", stderr.trim())
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Launch { source, .. } => Some(source),
            FetchError::Failed { .. } => None,
        }
    }
}

/// Invokes the inventory tool and scrapes its disk table.
pub struct DiskLister<R = SystemRunner> {
    tool: PathBuf,
    runner: R,
}

impl DiskLister<SystemRunner> {
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self::with_runner(tool, SystemRunner)
    }
}

impl<R: ToolRunner> DiskLister<R> {
    pub fn with_runner(tool: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            tool: tool.into(),
            runner,
        }
    }

    pub fn tool(&self) -> &Path {
        &self.tool
    }

    /// Runs `<tool> info` and parses its output.
    /// A non-zero exit is a failure no matter what stdout holds.
    pub fn fetch(&self) -> Result<ParseReport, FetchError> {
        let output = self
            .runner
            .run(&self.tool, &[INFO_SUBCOMMAND])
            .map_err(|source| FetchError::Launch {
                tool: self.tool.display().to_string(),
                source,
            })?;

        if !output.success() {
            return Err(FetchError::Failed {
                code: output.code,
                stderr: output.stderr,
            });
        }

        debug!("raw output from {}:\n{}", self.tool.display(), output.stdout);
        Ok(parse_disk_table(&output.stdout))
    }

    /// Like `fetch`, but every failure becomes a log line and an empty list.
    pub fn list_disks(&self) -> Vec<DiskRecord> {
        match self.fetch() {
            Ok(report) => {
                for rejected in &report.rejected {
                    match rejected.reason {
                        RejectReason::FieldCount { found } => warn!(
                            "dropped line {} with {} fields: {}",
                            rejected.line_number,
                            found,
                            rejected.line.trim()
                        ),
                    }
                }
                info!("parsed {} disk rows", report.records.len());
                report.records
            }
            Err(e) => {
                error!("failed to fetch disks: {}", e);
                Vec::new()
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SectionState {
    BeforeSection,
    InSection,
}

/// Scrapes the bordered table that follows the `Disks:` marker.
pub fn parse_disk_table(stdout: &str) -> ParseReport {
    let mut report = ParseReport::default();
    let mut state = SectionState::BeforeSection;

    for (idx, line) in stdout.lines().enumerate() {
        if line.contains(SECTION_MARKER) {
            state = SectionState::InSection;
            continue;
        }
        if state == SectionState::BeforeSection {
            continue;
        }
        if line.trim_start().starts_with(BORDER_PREFIX) || !line.contains(DELIMITER) {
            continue;
        }

        let fields = inner_fields(line);
        match DiskRecord::from_fields(&fields) {
            Some(_) if is_header(&fields) => {}
            Some(record) => report.records.push(record),
            None => report.rejected.push(RowRejection {
                line_number: idx + 1,
                line: line.to_string(),
                reason: RejectReason::FieldCount {
                    found: fields.len(),
                },
            }),
        }
    }

    report
}

// Segments outside the first and last delimiter are not cells.
fn inner_fields(line: &str) -> Vec<&str> {
    let parts: Vec<&str> = line.split(DELIMITER).collect();
    if parts.len() < 2 {
        return Vec::new();
    }
    parts[1..parts.len() - 1].iter().map(|p| p.trim()).collect()
}

fn is_header(fields: &[&str]) -> bool {
    fields
        .iter()
        .zip(HEADER_LABELS)
        .all(|(field, label)| field.eq_ignore_ascii_case(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const SAMPLE_ROW: &str =
        "| 0 | Samsung SSD 970 | Fixed SSD | GPT | 1000204886016 (931.51 GiBs) |";

    struct FakeRunner {
        result: RefCell<Option<io::Result<ToolOutput>>>,
        calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
    }

    impl FakeRunner {
        fn exits(code: Option<i32>, stdout: &str) -> Self {
            Self::returning(Ok(ToolOutput {
                code,
                stdout: stdout.to_string(),
                stderr: "boom".to_string(),
            }))
        }

        fn returning(result: io::Result<ToolOutput>) -> Self {
            Self {
                result: RefCell::new(Some(result)),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ToolRunner for &FakeRunner {
        fn run(&self, program: &Path, args: &[&str]) -> io::Result<ToolOutput> {
            self.calls.borrow_mut().push((
                program.to_path_buf(),
                args.iter().map(|a| a.to_string()).collect(),
            ));
            self.result
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Ok(ToolOutput::default()))
        }
    }

    fn sample_output() -> String {
        format!("Disks:\n+---+\n{}\n+---+", SAMPLE_ROW)
    }

    #[test]
    fn test_parse_single_row_example() {
        let report = parse_disk_table(&sample_output());
        assert_eq!(
            report.records,
            vec![DiskRecord {
                id: "0".into(),
                model: "Samsung SSD 970".into(),
                kind: "Fixed SSD".into(),
                partition: "GPT".into(),
                size: "1000204886016 (931.51 GiBs)".into(),
            }]
        );
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_parse_multiple_rows_ignores_cell_padding() {
        let out = "Info for ntfstool\n\
                   Disks:\n\
                   +----+-------+\n\
                   |   0   |Samsung SSD 970|  Fixed SSD |GPT|  500 GB   |\n\
                   | 1 | WDC WD10EZEX | Fixed HDD | MBR | 1 TB |\n\
                   \t| 2 | SanDisk Cruzer | Removable | MBR | 16 GB |  \n\
                   +----+-------+\n";
        let report = parse_disk_table(out);
        let ids: Vec<&str> = report.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
        assert_eq!(report.records[0].model, "Samsung SSD 970");
        assert_eq!(report.records[0].size, "500 GB");
        assert_eq!(report.records[2].kind, "Removable");
    }

    #[test]
    fn test_parse_rejects_wrong_field_count_and_continues() {
        let out = "Disks:\n\
                   | 0 | short | row |\n\
                   | 1 | a | b | c | d | e |\n\
                   | 2 | Good Disk | Fixed SSD | GPT | 256 GB |\n";
        let report = parse_disk_table(out);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].id, "2");
        assert_eq!(
            report.rejected,
            vec![
                RowRejection {
                    line_number: 2,
                    line: "| 0 | short | row |".into(),
                    reason: RejectReason::FieldCount { found: 3 },
                },
                RowRejection {
                    line_number: 3,
                    line: "| 1 | a | b | c | d | e |".into(),
                    reason: RejectReason::FieldCount { found: 6 },
                },
            ]
        );
    }

    #[test]
    fn test_parse_skips_border_lines() {
        let out = "Disks:\n  +---|---|---|---|---|---+\n+|a|b|c|d|e|\n";
        let report = parse_disk_table(out);
        assert!(report.records.is_empty());
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_parse_ignores_rows_before_marker() {
        let out = format!("{}\nsome | other | table\n{}", SAMPLE_ROW, sample_output());
        let report = parse_disk_table(&out);
        assert_eq!(report.records.len(), 1);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_parse_without_marker_is_empty() {
        let report = parse_disk_table(SAMPLE_ROW);
        assert_eq!(report, ParseReport::default());
    }

    #[test]
    fn test_parse_skips_column_header_row() {
        let out = format!(
            "Disks:\n+---+\n| Id | Model | Type | Partition | Size |\n+---+\n{}\n+---+",
            SAMPLE_ROW
        );
        let report = parse_disk_table(&out);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].id, "0");
    }

    #[test]
    fn test_parse_single_delimiter_line_has_no_fields() {
        let report = parse_disk_table("Disks:\nfoo | bar\n");
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].reason, RejectReason::FieldCount { found: 0 });
    }

    #[test]
    fn test_fetch_invokes_info_subcommand() {
        let runner = FakeRunner::exits(Some(0), &sample_output());
        let lister = DiskLister::with_runner("/opt/tools/ntfstool", &runner);
        let report = lister.fetch().unwrap();
        assert_eq!(report.records.len(), 1);

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, PathBuf::from("/opt/tools/ntfstool"));
        assert_eq!(calls[0].1, vec!["info".to_string()]);
    }

    #[test]
    fn test_nonzero_exit_yields_empty_list() {
        let runner = FakeRunner::exits(Some(1), &sample_output());
        let lister = DiskLister::with_runner("ntfstool", &runner);
        match lister.fetch() {
            Err(FetchError::Failed { code, stderr }) => {
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected Failed, got {:?}", other),
        }

        let runner = FakeRunner::exits(Some(1), &sample_output());
        let lister = DiskLister::with_runner("ntfstool", &runner);
        assert!(lister.list_disks().is_empty());
    }

    #[test]
    fn test_signal_termination_is_failure() {
        let runner = FakeRunner::exits(None, &sample_output());
        let lister = DiskLister::with_runner("ntfstool", &runner);
        assert!(matches!(lister.fetch(), Err(FetchError::Failed { code: None, .. })));
    }

    #[test]
    fn test_launch_error_yields_empty_list() {
        let runner = FakeRunner::returning(Err(io::Error::new(io::ErrorKind::NotFound, "missing")));
        let lister = DiskLister::with_runner("ntfstool", &runner);
        assert!(lister.list_disks().is_empty());

        let runner = FakeRunner::returning(Err(io::Error::new(io::ErrorKind::NotFound, "missing")));
        let lister = DiskLister::with_runner("ntfstool", &runner);
        let err = lister.fetch().unwrap_err();
        assert!(err.to_string().starts_with("failed to run ntfstool"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_list_disks_drops_rejected_rows() {
        let out = format!("Disks:\n| bad | row |\n{}", SAMPLE_ROW);
        let runner = FakeRunner::exits(Some(0), &out);
        let lister = DiskLister::with_runner("ntfstool", &runner);
        let disks = lister.list_disks();
        assert_eq!(disks.len(), 1);
        assert_eq!(disks[0].model, "Samsung SSD 970");
    }
}
