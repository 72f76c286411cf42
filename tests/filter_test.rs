mod common;

use anyhow::Result;
use common::{parse_date, seed_sample, test_service, tx};
use fintrack::domain::{
    Category, FilterCriteria, FilterError, SortDirection, SortKey, TransactionType,
    filter_transactions, parse_date_bound, parse_optional_bound, sort_transactions,
};

fn ledger() -> Vec<fintrack::domain::Transaction> {
    vec![
        tx(2500.0, TransactionType::Income, Category::Salary, "2024-01-31")
            .with_description("Payroll January"),
        tx(54.3, TransactionType::Expense, Category::Food, "2024-02-02")
            .with_description("Weekly groceries"),
        tx(900.0, TransactionType::Expense, Category::Housing, "2024-02-01")
            .with_description("Rent"),
        tx(12.0, TransactionType::Expense, Category::Entertainment, "2024-02-14")
            .with_description("Movie night"),
        tx(150.0, TransactionType::Income, Category::Gift, "2024-02-14")
            .with_description("Birthday money"),
    ]
}

#[test]
fn test_unconstrained_filter_keeps_everything_in_order() {
    let transactions = ledger();
    let criteria = FilterCriteria::new();

    assert!(criteria.is_unconstrained());
    assert_eq!(filter_transactions(&transactions, &criteria), transactions);
}

#[test]
fn test_date_bounds_are_inclusive() {
    let transactions = ledger();
    let criteria = FilterCriteria::new()
        .with_start_date(parse_date("2024-02-01"))
        .with_end_date(parse_date("2024-02-02"));

    let result = filter_transactions(&transactions, &criteria);
    let descriptions: Vec<_> = result.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Weekly groceries", "Rent"]);
}

#[test]
fn test_criteria_combine() {
    let transactions = ledger();
    let criteria = FilterCriteria::new()
        .with_type(TransactionType::Income)
        .with_start_date(parse_date("2024-02-01"));

    let result = filter_transactions(&transactions, &criteria);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].category, Category::Gift);

    let criteria = FilterCriteria::new()
        .with_category(Category::Housing)
        .with_type(TransactionType::Income);
    assert!(filter_transactions(&transactions, &criteria).is_empty());
}

#[test]
fn test_search_is_case_insensitive_across_fields() {
    let transactions = ledger();

    let by_description = FilterCriteria::new().with_search("MOVIE");
    assert_eq!(filter_transactions(&transactions, &by_description).len(), 1);

    let by_category = FilterCriteria::new().with_search("housing");
    assert_eq!(filter_transactions(&transactions, &by_category)[0].description, "Rent");

    let by_type = FilterCriteria::new().with_search("Income");
    assert_eq!(filter_transactions(&transactions, &by_type).len(), 2);

    let blank = FilterCriteria::new().with_search("   ");
    assert!(blank.is_unconstrained());
    assert_eq!(filter_transactions(&transactions, &blank).len(), transactions.len());
}

#[test]
fn test_filter_is_idempotent() {
    let transactions = ledger();
    let criteria = FilterCriteria::new().with_type(TransactionType::Expense);

    let once = filter_transactions(&transactions, &criteria);
    let twice = filter_transactions(&once, &criteria);
    assert_eq!(once, twice);
}

#[test]
fn test_date_bound_parsing() {
    let day = parse_date_bound("2024-02-14").unwrap();
    assert_eq!(day, parse_date("2024-02-14"));

    let with_offset = parse_date_bound("2024-02-14T09:30:00+02:00").unwrap();
    assert_eq!(with_offset.to_rfc3339(), "2024-02-14T09:30:00+02:00");

    assert_eq!(
        parse_date_bound("14/02/2024"),
        Err(FilterError::InvalidDate("14/02/2024".into()))
    );

    assert_eq!(parse_optional_bound(None).unwrap(), None);
    assert_eq!(parse_optional_bound(Some("  ")).unwrap(), None);
    assert!(parse_optional_bound(Some("yesterday")).is_err());
}

#[test]
fn test_sorting_for_display() {
    let mut transactions = ledger();

    sort_transactions(&mut transactions, SortKey::Amount, SortDirection::Descending);
    assert_eq!(transactions[0].amount, 2500.0);
    assert_eq!(transactions[4].amount, 12.0);

    sort_transactions(&mut transactions, SortKey::Date, SortDirection::from(true));
    assert_eq!(transactions[0].description, "Payroll January");
    // Same day keeps the previous relative order
    assert_eq!(transactions[3].day(), transactions[4].day());
}

#[tokio::test]
async fn test_service_filtering() -> Result<()> {
    let (service, _temp) = test_service().await?;
    seed_sample(&service).await?;

    let criteria = FilterCriteria::new()
        .with_category(Category::Food)
        .with_end_date(parse_date("2024-01-01"));
    let result = service.list_transactions_filtered(&criteria).await?;

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].description, "Groceries");
    Ok(())
}
