//! CSV parsing for bank rows.
//!
//! The first record is a header and is discarded. Every following record
//! must have as many fields as the header, and at least five; fields 1
//! through 4 become `bank_code`, `bank_name`, `address` and `phone`, taken
//! verbatim. Field 0 and anything past field 4 are ignored.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use super::{ImportError, MalformedRowPolicy};
use crate::domain::NewBankRecord;

/// Minimum number of fields in a data row.
pub const MIN_FIELDS: usize = 5;

/// Rows accepted from a CSV input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRows {
    /// Records in file order.
    pub records: Vec<NewBankRecord>,
    /// Number of malformed rows skipped under [`MalformedRowPolicy::Skip`].
    pub skipped: usize,
}

/// Reads bank rows from the CSV file at `path`.
///
/// # Errors
///
/// Returns `ImportError::Open` if the file cannot be opened, and otherwise
/// the errors of [`read_bank_records_from`].
pub fn read_bank_records(path: &Path, policy: MalformedRowPolicy) -> Result<ParsedRows, ImportError> {
    let reader = reader_builder()
        .from_path(path)
        .map_err(|source| ImportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    parse_rows(reader, policy)
}

/// Reads bank rows from any CSV source.
///
/// # Errors
///
/// - `ImportError::MissingHeader` if the input is empty
/// - `ImportError::Header` if the header cannot be parsed
/// - `ImportError::Read` on an I/O failure
/// - `ImportError::MalformedRow` for a bad data row under [`MalformedRowPolicy::Fail`]
pub fn read_bank_records_from<R: Read>(
    input: R,
    policy: MalformedRowPolicy,
) -> Result<ParsedRows, ImportError> {
    parse_rows(reader_builder().from_reader(input), policy)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // The header is consumed by hand so an empty file can be told apart
    // from a header-only one. Row lengths are checked against it in
    // `bank_record_from` so a mismatch falls under the row policy.
    builder.has_headers(false).flexible(true);
    builder
}

fn parse_rows<R: Read>(
    mut reader: csv::Reader<R>,
    policy: MalformedRowPolicy,
) -> Result<ParsedRows, ImportError> {
    let mut records = reader.records();

    let header_fields = match records.next() {
        None => return Err(ImportError::MissingHeader),
        Some(Err(error)) => return Err(ImportError::Header(error)),
        Some(Ok(header)) => header.len(),
    };

    let mut parsed = ParsedRows::default();

    for (index, result) in records.enumerate() {
        let row = index + 2;

        let outcome = match result {
            Ok(record) => bank_record_from(&record, header_fields),
            Err(error) if error.is_io_error() => return Err(ImportError::Read(error)),
            Err(error) => Err(error.to_string()),
        };

        match (outcome, policy) {
            (Ok(record), _) => parsed.records.push(record),
            (Err(reason), MalformedRowPolicy::Fail) => {
                return Err(ImportError::MalformedRow { row, reason });
            }
            (Err(reason), MalformedRowPolicy::Skip) => {
                tracing::warn!(row, %reason, "Skipping malformed CSV row");
                parsed.skipped += 1;
            }
        }
    }

    Ok(parsed)
}

/// Maps one data row onto a new bank record.
///
/// Every field is taken verbatim: an empty `address` or `phone` cell is
/// stored as an empty string.
fn bank_record_from(record: &StringRecord, header_fields: usize) -> Result<NewBankRecord, String> {
    if record.len() != header_fields {
        return Err(format!(
            "expected {header_fields} fields as in the header, found {}",
            record.len()
        ));
    }
    if record.len() < MIN_FIELDS {
        return Err(format!(
            "expected at least {MIN_FIELDS} fields, found {}",
            record.len()
        ));
    }

    Ok(NewBankRecord {
        bank_code: record[1].to_string(),
        bank_name: record[2].to_string(),
        address: Some(record[3].to_string()),
        phone: Some(record[4].to_string()),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    const HEADER: &str = "id,bank_code,bank_name,address,phone\n";

    fn parse(input: &str, policy: MalformedRowPolicy) -> Result<ParsedRows, ImportError> {
        read_bank_records_from(input.as_bytes(), policy)
    }

    #[rstest]
    fn test_reads_columns_one_through_four() {
        let input = format!("{HEADER}1,004,Bank A,1 Main St,02-1111-1111\n2,005,Bank B,5 Harbor Rd,02-2222-2222\n");

        let parsed = parse(&input, MalformedRowPolicy::Fail).unwrap();

        assert_eq!(
            parsed.records,
            vec![
                NewBankRecord::new("004", "Bank A")
                    .with_address("1 Main St")
                    .with_phone("02-1111-1111"),
                NewBankRecord::new("005", "Bank B")
                    .with_address("5 Harbor Rd")
                    .with_phone("02-2222-2222"),
            ]
        );
        assert_eq!(parsed.skipped, 0);
    }

    #[rstest]
    fn test_header_only_yields_no_rows() {
        let parsed = parse(HEADER, MalformedRowPolicy::Fail).unwrap();
        assert!(parsed.records.is_empty());
    }

    #[rstest]
    fn test_empty_input_is_missing_header() {
        assert!(matches!(
            parse("", MalformedRowPolicy::Fail),
            Err(ImportError::MissingHeader)
        ));
    }

    #[rstest]
    fn test_header_names_are_not_validated() {
        let parsed = parse("a,b,c,d,e\n1,004,Bank A,,\n", MalformedRowPolicy::Fail).unwrap();
        assert_eq!(parsed.records.len(), 1);
    }

    #[rstest]
    fn test_empty_optional_cells_are_kept_as_empty_strings() {
        let input = format!("{HEADER}1,004,Bank A,,\n");

        let record = &parse(&input, MalformedRowPolicy::Fail).unwrap().records[0];

        assert_eq!(record.address.as_deref(), Some(""));
        assert_eq!(record.phone.as_deref(), Some(""));
    }

    #[rstest]
    fn test_fields_are_not_trimmed() {
        let input = format!("{HEADER}1, 004 ,Bank A,,\n");
        let record = &parse(&input, MalformedRowPolicy::Fail).unwrap().records[0];
        assert_eq!(record.bank_code, " 004 ");
    }

    #[rstest]
    fn test_row_longer_than_header_is_malformed() {
        let input = format!("{HEADER}1,004,Bank A,1 Main St,02-1111-1111,extra\n");

        match parse(&input, MalformedRowPolicy::Fail) {
            Err(ImportError::MalformedRow { row, reason }) => {
                assert_eq!(row, 2);
                assert!(reason.contains("found 6"));
            }
            other => panic!("Expected MalformedRow, got {other:?}"),
        }
    }

    #[rstest]
    fn test_row_length_mismatch_skipped_under_skip_policy() {
        let input = format!("{HEADER}1,004,Bank A,,,extra\n2,005,Bank B,,\n");

        let parsed = parse(&input, MalformedRowPolicy::Skip).unwrap();

        assert_eq!(
            parsed.records,
            vec![NewBankRecord::new("005", "Bank B").with_address("").with_phone("")]
        );
        assert_eq!(parsed.skipped, 1);
    }

    #[rstest]
    fn test_wider_header_allows_extra_fields() {
        let input = "id,bank_code,bank_name,address,phone,swift\n1,004,Bank A,1 Main St,02,XYZ\n";
        let parsed = parse(input, MalformedRowPolicy::Fail).unwrap();
        assert_eq!(parsed.records[0].phone.as_deref(), Some("02"));
    }

    #[rstest]
    fn test_short_header_rejects_matching_rows() {
        assert!(matches!(
            parse("id,bank_code,bank_name\n1,004,Bank A\n", MalformedRowPolicy::Fail),
            Err(ImportError::MalformedRow { row: 2, .. })
        ));
    }

    #[rstest]
    fn test_quoted_fields_keep_commas() {
        let input = format!("{HEADER}1,004,\"Bank A, Ltd.\",\"1 Main St, Floor 2\",\n");
        let record = &parse(&input, MalformedRowPolicy::Fail).unwrap().records[0];
        assert_eq!(record.bank_name, "Bank A, Ltd.");
        assert_eq!(record.address.as_deref(), Some("1 Main St, Floor 2"));
    }

    #[rstest]
    fn test_short_row_fails_under_fail_policy() {
        let input = format!("{HEADER}1,004,Bank A,1 Main St,02\n2,005,Bank B\n");

        match parse(&input, MalformedRowPolicy::Fail) {
            Err(ImportError::MalformedRow { row, reason }) => {
                assert_eq!(row, 3);
                assert!(reason.contains("found 3"));
            }
            other => panic!("Expected MalformedRow, got {other:?}"),
        }
    }

    #[rstest]
    fn test_short_row_skipped_under_skip_policy() {
        let input = format!("{HEADER}1,004,Bank A,,\n2,005\n3,006,Bank C,,\n");

        let parsed = parse(&input, MalformedRowPolicy::Skip).unwrap();

        let codes: Vec<&str> = parsed.records.iter().map(|r| r.bank_code.as_str()).collect();
        assert_eq!(codes, vec!["004", "006"]);
        assert_eq!(parsed.skipped, 1);
    }

    #[rstest]
    fn test_invalid_utf8_row_is_malformed() {
        let mut input = HEADER.as_bytes().to_vec();
        input.extend_from_slice(b"1,004,Bank \xFF,,\n");

        assert!(matches!(
            read_bank_records_from(input.as_slice(), MalformedRowPolicy::Fail),
            Err(ImportError::MalformedRow { row: 2, .. })
        ));

        let parsed = read_bank_records_from(input.as_slice(), MalformedRowPolicy::Skip).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[rstest]
    fn test_read_bank_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{HEADER}1,004,Bank A,,\n2,005,Bank B,,\n").unwrap();

        let parsed = read_bank_records(file.path(), MalformedRowPolicy::Fail).unwrap();
        assert_eq!(parsed.records.len(), 2);
    }

    #[rstest]
    fn test_missing_file_is_open_error() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("missing.csv");

        match read_bank_records(&path, MalformedRowPolicy::Fail) {
            Err(ImportError::Open { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected Open error, got {other:?}"),
        }
    }
}
