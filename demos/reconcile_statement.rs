//! Reconcile a small bank statement against an expense report

use bank_reconciler::utils::{MemoryStorage, RecordingSender};
use bank_reconciler::{EmployeeDirectory, MatchConfig, Matcher, ReconciliationSession};
use tracing_subscriber::EnvFilter;

const BANK_STATEMENT: &str = "\
Date,Description,Amount
2024-03-01,HOME DEPOT #1234,87.19
2024-03-02,Shell Gas,42.50
2024-03-03,Staples,15.00
2024-03-04,Parking Meter,n/a
";

const EXPENSE_REPORT: &str = "\
Date,Vendor,Total
2024-03-01,Home Depot,87.19
2024-03-02,Shell,42.50
";

const MATCH_CONFIG: &str = r#"
tolerance = "0.01"
strategy = "first_match"
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🧾 Bank Reconciler - Statement Example\n");

    let matcher = Matcher::new(MatchConfig::from_toml_str(MATCH_CONFIG)?)?;
    let mut session = ReconciliationSession::new(matcher);

    // 1. Load both ledgers; either order gives the same result
    for diagnostic in session.load_bank_statement(BANK_STATEMENT)? {
        println!(
            "  ⚠ Row {}: '{}' in column '{}' is not a number, using 0",
            diagnostic.row, diagnostic.value, diagnostic.field
        );
    }
    session.load_expense_report(EXPENSE_REPORT)?;

    // 2. Show the classification
    println!("\n📊 Transactions:");
    for txn in session.transactions() {
        println!(
            "  {} {:<20} {:>8}  {}",
            txn.date,
            txn.description,
            txn.amount,
            if txn.reported { "✓ Reported" } else { "✗ Missing" }
        );
    }

    let summary = session.summary();
    println!(
        "\n  Reported: {}  Unreported: {}\n",
        summary.reported, summary.unreported
    );

    // 3. Remind someone about each unreported charge
    let mut directory = EmployeeDirectory::new(MemoryStorage::new());
    let employee = directory
        .add("Dana Whitfield", "555-0142", Some("dana@example.com"))
        .await?;
    let employees = directory.list(None).await?;
    let sender = RecordingSender::new();

    let unreported: Vec<String> = session
        .report()
        .unreported()
        .map(|t| t.id.clone())
        .collect();

    for transaction_id in unreported {
        let request = session
            .notify(&transaction_id, &employee.id, &employees, &sender)
            .await?;
        println!(
            "  📱 To {} ({}): {}",
            request.recipient_name(),
            request.recipient_phone(),
            request.message_body()
        );
    }

    Ok(())
}
