//! Mapping parsed rows onto typed ledger records

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::ingest::FieldMap;
use crate::traits::LedgerRecord;
use crate::types::*;

/// Description used when none of the candidate fields hold a value
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Turns field mappings into bank transactions or expense records
///
/// Missing dates fall back to the processing date, missing descriptions to
/// [`UNKNOWN_DESCRIPTION`], missing or unparsable amounts to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordNormalizer {
    processing_date: NaiveDate,
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::today()
    }
}

impl RecordNormalizer {
    /// Create a normalizer that stamps undated rows with `processing_date`
    pub fn new(processing_date: NaiveDate) -> Self {
        Self { processing_date }
    }

    /// Create a normalizer using the current UTC calendar date
    pub fn today() -> Self {
        Self::new(chrono::Utc::now().date_naive())
    }

    /// Date stamped on rows that carry none
    pub fn processing_date(&self) -> NaiveDate {
        self.processing_date
    }

    /// Normalize a whole batch; ids are `<prefix><row index>`
    pub fn normalize<T: LedgerRecord>(&self, rows: &[FieldMap]) -> NormalizedBatch<T> {
        let mut diagnostics = Vec::new();
        let records: Vec<T> = rows
            .iter()
            .enumerate()
            .map(|(index, row)| self.normalize_row(index, row, &mut diagnostics))
            .collect();

        debug!(
            prefix = T::ID_PREFIX,
            records = records.len(),
            coerced = diagnostics.len(),
            "Normalized ledger batch"
        );

        NormalizedBatch {
            records,
            diagnostics,
        }
    }

    fn normalize_row<T: LedgerRecord>(
        &self,
        index: usize,
        row: &FieldMap,
        diagnostics: &mut Vec<RowDiagnostic>,
    ) -> T {
        let id = format!("{}{}", T::ID_PREFIX, index);

        let date = first_present(row, T::DATE_FIELDS)
            .map(|(_, value)| value.to_string())
            .unwrap_or_else(|| self.processing_date.format("%Y-%m-%d").to_string());

        let description = first_present(row, T::DESCRIPTION_FIELDS)
            .map(|(_, value)| value.to_string())
            .unwrap_or_else(|| UNKNOWN_DESCRIPTION.to_string());

        let amount = match first_present(row, T::AMOUNT_FIELDS) {
            Some((field, value)) => parse_amount(value).unwrap_or_else(|| {
                warn!(row = index, field, value, "Amount is not numeric, using 0");
                diagnostics.push(RowDiagnostic {
                    row: index,
                    field: field.to_string(),
                    value: value.to_string(),
                    kind: DiagnosticKind::AmountNotNumeric,
                });
                BigDecimal::zero()
            }),
            None => BigDecimal::zero(),
        };

        T::from_fields(id, date, description, amount)
    }
}

/// First candidate field holding a non-empty value, with the field name
fn first_present<'a>(
    row: &'a FieldMap,
    candidates: &[&'static str],
) -> Option<(&'static str, &'a str)> {
    candidates.iter().find_map(|&field| {
        row.get(field)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(|value| (field, value))
    })
}

/// Largest number of decimal places (or trailing zeros, for a negative scale)
/// accepted in an amount cell
pub const MAX_AMOUNT_SCALE: i64 = 18;

/// Parse a decimal amount, `None` if the text is not a number
///
/// The whole trimmed cell must be a decimal: `42.50 USD` or `42.50DR` are
/// rejected rather than read as their leading `42.50`. Amounts whose scale
/// falls outside `-MAX_AMOUNT_SCALE..=MAX_AMOUNT_SCALE` (e.g. `1e-400000000`)
/// are rejected too.
pub fn parse_amount(value: &str) -> Option<BigDecimal> {
    let amount = BigDecimal::from_str(value.trim()).ok()?;
    let (_, scale) = amount.as_bigint_and_exponent();
    (-MAX_AMOUNT_SCALE..=MAX_AMOUNT_SCALE)
        .contains(&scale)
        .then_some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::TabularParser;

    fn normalizer() -> RecordNormalizer {
        RecordNormalizer::new(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
    }

    fn rows(content: &str) -> Vec<FieldMap> {
        TabularParser::new().parse(content).unwrap()
    }

    #[test]
    fn test_bank_fields_and_ids() {
        let batch: NormalizedBatch<BankTransaction> = normalizer().normalize(&rows(
            "Date,Description,Amount\n2024-03-01,Shell Gas,42.50\n2024-03-02,Staples,15.00\n",
        ));

        assert_eq!(batch.len(), 2);
        assert!(batch.diagnostics.is_empty());
        assert_eq!(batch.records[0].id, "bank-0");
        assert_eq!(batch.records[1].id, "bank-1");
        assert_eq!(batch.records[0].date, "2024-03-01");
        assert_eq!(batch.records[0].description, "Shell Gas");
        assert_eq!(
            batch.records[0].amount,
            BigDecimal::from_str("42.50").unwrap()
        );
        assert!(!batch.records[0].reported);
    }

    #[test]
    fn test_bank_fallback_fields() {
        let batch: NormalizedBatch<BankTransaction> = normalizer().normalize(&rows(
            "Transaction Date,Payee,Merchant,Debit\n2024-03-05,,Home Depot,99.10\n",
        ));

        let txn = &batch.records[0];
        assert_eq!(txn.date, "2024-03-05");
        assert_eq!(txn.description, "Home Depot");
        assert_eq!(txn.amount, BigDecimal::from_str("99.10").unwrap());
    }

    #[test]
    fn test_expense_fallback_fields() {
        let batch: NormalizedBatch<ExpenseRecord> = normalizer().normalize(&rows(
            "Expense Date,Vendor,Category,Total\n2024-03-07,,Fuel,12.00\n",
        ));

        let expense = &batch.records[0];
        assert_eq!(expense.id, "jobber-0");
        assert_eq!(expense.date, "2024-03-07");
        assert_eq!(expense.description, "Fuel");
        assert_eq!(expense.amount, BigDecimal::from(12));
    }

    #[test]
    fn test_defaults_when_columns_missing() {
        let batch: NormalizedBatch<BankTransaction> =
            normalizer().normalize(&rows("Reference\nABC-1\n"));

        let txn = &batch.records[0];
        assert_eq!(txn.date, "2024-06-30");
        assert_eq!(txn.description, UNKNOWN_DESCRIPTION);
        assert_eq!(txn.amount, BigDecimal::zero());
        assert!(batch.diagnostics.is_empty());
    }

    #[test]
    fn test_unparsable_amount_is_zero_with_diagnostic() {
        let batch: NormalizedBatch<BankTransaction> =
            normalizer().normalize(&rows("description,amount,debit\nCoffee,$4.50,4.50\n"));

        assert_eq!(batch.records[0].amount, BigDecimal::zero());
        assert_eq!(
            batch.diagnostics,
            vec![RowDiagnostic {
                row: 0,
                field: "amount".to_string(),
                value: "$4.50".to_string(),
                kind: DiagnosticKind::AmountNotNumeric,
            }]
        );
    }

    #[test]
    fn test_empty_amount_falls_through_to_next_candidate() {
        let batch: NormalizedBatch<BankTransaction> =
            normalizer().normalize(&rows("description,amount,debit\nCoffee,,4.50\n"));

        assert_eq!(
            batch.records[0].amount,
            BigDecimal::from_str("4.50").unwrap()
        );
        assert!(batch.diagnostics.is_empty());
    }

    #[test]
    fn test_extreme_exponents_are_not_numeric() {
        assert_eq!(parse_amount("1e-400000000"), None);
        assert_eq!(parse_amount("1e400000000"), None);
        assert_eq!(parse_amount("1e18"), Some(BigDecimal::from_str("1e18").unwrap()));
        assert_eq!(
            parse_amount("0.000000000000000001"),
            Some(BigDecimal::from_str("0.000000000000000001").unwrap())
        );

        let batch: NormalizedBatch<BankTransaction> =
            normalizer().normalize(&rows("description,amount\nX,1e-400000000\n"));
        assert_eq!(batch.records[0].amount, BigDecimal::zero());
        assert_eq!(batch.diagnostics.len(), 1);
        assert_eq!(batch.diagnostics[0].value, "1e-400000000");
        assert_eq!(batch.diagnostics[0].kind, DiagnosticKind::AmountNotNumeric);
    }

    #[test]
    fn test_trailing_text_is_not_numeric() {
        assert_eq!(parse_amount("42.50 USD"), None);
        assert_eq!(parse_amount("42.50DR"), None);
    }

    #[test]
    fn test_default_date_is_processing_date() {
        let normalizer = normalizer();
        let batch: NormalizedBatch<ExpenseRecord> =
            normalizer.normalize(&rows("vendor,total\nFuel,12.00\n"));
        assert_eq!(
            batch.records[0].date,
            normalizer.processing_date().format("%Y-%m-%d").to_string()
        );
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(
            parse_amount(" -12.34 "),
            Some(BigDecimal::from_str("-12.34").unwrap())
        );
        assert_eq!(parse_amount("twelve"), None);
    }
}
