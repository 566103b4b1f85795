// Data models for parsed disk inventory rows

/// One row of the external tool's disk table.
/// Every field is kept exactly as printed, only trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiskRecord {
    /// Disk index as reported by the tool (e.g., "0")
    pub id: String,
    /// Manufacturer model name
    pub model: String,
    /// Type/description column (e.g., "Fixed SSD")
    pub kind: String,
    /// Partition scheme (e.g., GPT, MBR)
    pub partition: String,
    /// Size with units embedded (e.g., "1000204886016 (931.51 GiBs)")
    pub size: String,
}

impl DiskRecord {
    /// Builds a record from exactly five fields in column order.
    /// Returns None for any other field count.
    pub fn from_fields(fields: &[&str]) -> Option<Self> {
        match fields {
            [id, model, kind, partition, size] => Some(Self {
                id: id.to_string(),
                model: model.to_string(),
                kind: kind.to_string(),
                partition: partition.to_string(),
                size: size.to_string(),
            }),
            _ => None,
        }
    }
}

/// Why a delimited line inside the disk section was not accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The line split into something other than five fields
    FieldCount { found: usize },
}

/// A line that looked like a data row but was dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowRejection {
    /// 1-based line number in the captured output
    pub line_number: usize,
    /// The raw line as captured
    pub line: String,
    pub reason: RejectReason,
}

/// Result of scraping one run of the tool's output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Accepted rows, in output order
    pub records: Vec<DiskRecord>,
    /// Rows that were dropped, in output order
    pub rejected: Vec<RowRejection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_assigns_columns_in_order() {
        let rec = DiskRecord::from_fields(&["1", "WDC WD10EZEX", "Fixed HDD", "MBR", "1 TB"]).unwrap();
        assert_eq!(rec.id, "1");
        assert_eq!(rec.model, "WDC WD10EZEX");
        assert_eq!(rec.kind, "Fixed HDD");
        assert_eq!(rec.partition, "MBR");
        assert_eq!(rec.size, "1 TB");
    }

    #[test]
    fn test_from_fields_requires_five() {
        assert!(DiskRecord::from_fields(&["1", "a", "b", "c"]).is_none());
        assert!(DiskRecord::from_fields(&["1", "a", "b", "c", "d", "e"]).is_none());
        assert!(DiskRecord::from_fields(&[]).is_none());
    }
}
