use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::application::{TransactionDraft, TransactionService};
use crate::domain::{
    BalanceSummary, Category, CategoryBreakdown, FilterCriteria, SortDirection, SortKey,
    TimeSeriesPoint, Transaction, TransactionType, format_amount, parse_amount, parse_date_bound,
    parse_optional_bound, sort_transactions, today,
};
use crate::storage::SqliteStore;

type Service = TransactionService<SqliteStore>;

/// Fintrack - Personal income and expense tracker
#[derive(Parser)]
#[command(name = "fintrack")]
#[command(about = "Track income and expenses and see where the money goes")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "FINTRACK_DB", default_value = "fintrack.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(
        short,
        long,
        global = true,
        env = "FINTRACK_VERBOSE",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Record a new transaction
    Add {
        /// Amount (e.g., "50.00" or "50"), always positive
        amount: String,

        /// Transaction type: income, expense
        #[arg(short = 't', long = "type")]
        transaction_type: String,

        /// Category (defaults to salary for income, food for expenses)
        #[arg(short, long)]
        category: Option<String>,

        /// What the money was for
        #[arg(short, long)]
        description: String,

        /// Date (YYYY-MM-DD or RFC 3339, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Change fields of an existing transaction
    Edit {
        /// Transaction ID
        id: String,

        /// New amount
        #[arg(short, long)]
        amount: Option<String>,

        /// New type: income, expense
        #[arg(short = 't', long = "type")]
        transaction_type: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },

    /// Show a single transaction
    Show {
        /// Transaction ID
        id: String,
    },

    /// List transactions
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Only show transactions whose description, category or type contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Sort by: date, amount
        #[arg(long, default_value = "date")]
        sort: String,

        /// Sort ascending (default is descending)
        #[arg(long)]
        asc: bool,

        /// Maximum number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Total income, expenses and balance
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Totals per category for one transaction type
    Breakdown {
        /// Transaction type: income, expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: String,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Income, expenses and balance per day
    Trend {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Summary, category breakdowns and trend in one view
    Dashboard {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Print chart data as JSON
    #[command(subcommand)]
    Chart(ChartCommands),

    /// Export transactions to CSV or JSON
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output file ("-" for stdout, defaults to financial-transactions-<today>.<format>)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,
    },

    /// List the available categories
    Categories {
        /// Only show categories suggested for this type: income, expense
        #[arg(short = 't', long = "type")]
        transaction_type: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ChartCommands {
    /// One slice per category of a transaction type
    Category {
        /// Transaction type: income, expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: String,
    },

    /// Daily income, expenses and balance
    Trend,
}

/// Filters shared by list, summary and export.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only transactions on or after this date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub from: Option<String>,

    /// Only transactions on or before this date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub to: Option<String>,

    /// Only transactions in this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only transactions of this type: income, expense
    #[arg(short = 't', long = "type")]
    pub transaction_type: Option<String>,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> Result<FilterCriteria> {
        Ok(FilterCriteria {
            start_date: parse_optional_bound(self.from.as_deref()).context("Invalid --from")?,
            end_date: parse_optional_bound(self.to.as_deref()).context("Invalid --to")?,
            category: self
                .category
                .as_deref()
                .map(str::parse::<Category>)
                .transpose()?,
            transaction_type: self
                .transaction_type
                .as_deref()
                .map(str::parse::<TransactionType>)
                .transpose()?,
            search: None,
        })
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                Service::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Add {
                amount,
                transaction_type,
                category,
                description,
                date,
            } => {
                let service = Service::connect(&self.database).await?;
                let transaction_type: TransactionType = transaction_type.parse()?;
                let category = match category {
                    Some(name) => name.parse()?,
                    None => Category::default_for(transaction_type),
                };
                warn_on_unusual_category(category, transaction_type);

                let draft = TransactionDraft {
                    amount: parse_amount(&amount)
                        .context("Invalid amount format. Use '50.00' or '50'")?,
                    description,
                    category,
                    transaction_type,
                    date: parse_transaction_date(date.as_deref())?,
                };

                let transaction = service.add_transaction(draft).await?;
                println!(
                    "Recorded {}: {} {} ({})",
                    transaction.transaction_type,
                    format_amount(transaction.amount),
                    transaction.category,
                    transaction.id
                );
            }

            Commands::Edit {
                id,
                amount,
                transaction_type,
                category,
                description,
                date,
            } => {
                let service = Service::connect(&self.database).await?;
                let id = parse_id(&id)?;
                let existing = service.get_transaction(id).await?;

                let mut draft = TransactionDraft::from_transaction(&existing);
                if let Some(amount) = amount {
                    draft.amount = parse_amount(&amount)
                        .context("Invalid amount format. Use '50.00' or '50'")?;
                }
                if let Some(transaction_type) = transaction_type {
                    draft.transaction_type = transaction_type.parse()?;
                }
                if let Some(category) = category {
                    draft.category = category.parse()?;
                }
                if let Some(description) = description {
                    draft.description = description;
                }
                warn_on_unusual_category(draft.category, draft.transaction_type);
                if date.is_some() {
                    draft.date = parse_transaction_date(date.as_deref())?;
                }

                let transaction = service.update_transaction(id, draft).await?;
                println!("Updated transaction {}", transaction.id);
                print_transaction(&transaction);
            }

            Commands::Delete { id } => {
                let service = Service::connect(&self.database).await?;
                let transaction = service.delete_transaction(parse_id(&id)?).await?;
                println!(
                    "Deleted {}: {} {} ({})",
                    transaction.transaction_type,
                    format_amount(transaction.amount),
                    transaction.category,
                    transaction.id
                );
            }

            Commands::Show { id } => {
                let service = Service::connect(&self.database).await?;
                let transaction = service.get_transaction(parse_id(&id)?).await?;
                print_transaction(&transaction);
            }

            Commands::List {
                filter,
                search,
                sort,
                asc,
                limit,
            } => {
                let service = Service::connect(&self.database).await?;
                let mut criteria = filter.to_criteria()?;
                criteria.search = search;
                let sort_key = SortKey::from_str(&sort).ok_or_else(|| {
                    anyhow::anyhow!("Invalid sort key '{}'. Valid: date, amount", sort)
                })?;

                let mut transactions = service.list_transactions_filtered(&criteria).await?;
                sort_transactions(&mut transactions, sort_key, SortDirection::from(asc));
                if let Some(limit) = limit {
                    transactions.truncate(limit);
                }
                print_transaction_table(&transactions);
            }

            Commands::Summary { filter, format } => {
                let service = Service::connect(&self.database).await?;
                let criteria = filter.to_criteria()?;
                let transactions = service.list_transactions_filtered(&criteria).await?;
                let summary = crate::domain::compute_balance_summary(&transactions);

                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
                    _ => print_summary(&summary),
                }
            }

            Commands::Breakdown {
                transaction_type,
                format,
            } => {
                let service = Service::connect(&self.database).await?;
                let transaction_type: TransactionType = transaction_type.parse()?;
                let breakdown = service.category_breakdown(transaction_type).await?;

                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&breakdown)?),
                    _ => {
                        println!("{} by Category", transaction_type.series_label());
                        println!();
                        print_breakdown(&breakdown);
                    }
                }
            }

            Commands::Trend { format } => {
                let service = Service::connect(&self.database).await?;
                let points = service.time_series().await?;

                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&points)?),
                    _ => print_time_series(&points),
                }
            }

            Commands::Dashboard { format } => {
                let service = Service::connect(&self.database).await?;
                let dashboard = service.dashboard().await?;

                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&dashboard)?),
                    _ => {
                        if dashboard.is_empty() {
                            println!("No transactions yet.");
                            return Ok(());
                        }
                        print_summary(&dashboard.summary);
                        for transaction_type in [TransactionType::Income, TransactionType::Expense]
                        {
                            println!();
                            println!("{} by Category", transaction_type.series_label());
                            print_breakdown(dashboard.breakdown(transaction_type));
                        }
                        println!();
                        print_time_series(&dashboard.time_series);
                    }
                }
            }

            Commands::Chart(chart_cmd) => {
                let service = Service::connect(&self.database).await?;
                let chart = match chart_cmd {
                    ChartCommands::Category { transaction_type } => {
                        service.category_chart(transaction_type.parse()?).await?
                    }
                    ChartCommands::Trend => service.time_series_chart().await?,
                };
                if chart.is_empty() {
                    tracing::info!("no data to chart");
                }
                println!("{}", serde_json::to_string_pretty(&chart)?);
            }

            Commands::Export {
                filter,
                output,
                format,
            } => {
                let service = Service::connect(&self.database).await?;
                let criteria = filter.to_criteria()?;
                let transactions = service.list_transactions_filtered(&criteria).await?;
                run_export_command(&transactions, output.as_deref(), &format)?;
            }

            Commands::Categories { transaction_type } => {
                let categories: &[Category] = match transaction_type {
                    Some(name) => Category::suggested_for(name.parse()?),
                    None => &Category::ALL,
                };
                for category in categories {
                    println!("{:<16} {}", category.as_str(), category.display_name());
                }
            }
        }

        Ok(())
    }
}

fn run_export_command(transactions: &[Transaction], output: Option<&str>, format: &str) -> Result<()> {
    use crate::io::{Exporter, default_export_filename};
    use std::fs::File;
    use std::io::{Write, stdout};

    if transactions.is_empty() {
        anyhow::bail!("Nothing to export: no transactions match");
    }

    let extension = match format {
        "csv" | "json" => format,
        _ => anyhow::bail!("Invalid export format '{}'. Valid formats: csv, json", format),
    };

    let path = match output {
        Some("-") => None,
        Some(path) => Some(path.to_string()),
        None => Some(default_export_filename(Utc::now().date_naive(), extension)),
    };

    let writer: Box<dyn Write> = match &path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let exporter = Exporter::new(transactions);
    let count = match extension {
        "json" => exporter.export_json(writer)?.transactions.len(),
        _ => exporter.export_csv(writer)?,
    };

    if let Some(path) = path {
        eprintln!("Exported {} transactions to {}", count, path);
    }
    Ok(())
}

/// Warns when the category is not one suggested for the type.
/// Returns whether the pair is a usual one.
fn warn_on_unusual_category(category: Category, transaction_type: TransactionType) -> bool {
    let usual = category.is_suggested_for(transaction_type);
    if !usual {
        tracing::warn!(
            %category,
            kind = %transaction_type,
            "category is not usually used for this type"
        );
    }
    usual
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id.trim()).context("Invalid transaction ID format (expected UUID)")
}

fn parse_transaction_date(date: Option<&str>) -> Result<DateTime<FixedOffset>> {
    match date {
        Some(date_str) => parse_date_bound(date_str)
            .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str)),
        None => Ok(today()),
    }
}

fn print_transaction(transaction: &Transaction) {
    println!("Transaction: {}", transaction.id);
    println!("  Date:        {}", transaction.date.to_rfc3339());
    println!("  Type:        {}", transaction.transaction_type);
    println!("  Category:    {}", transaction.category.display_name());
    println!("  Amount:      {}", format_amount(transaction.amount));
    println!("  Description: {}", transaction.description);
}

fn print_transaction_table(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    println!(
        "{:<36} {:<10} {:<8} {:<14} {:>12} DESCRIPTION",
        "ID", "DATE", "TYPE", "CATEGORY", "AMOUNT"
    );
    println!("{}", "-".repeat(110));

    for transaction in transactions {
        let signed = match transaction.transaction_type {
            TransactionType::Income => transaction.amount,
            TransactionType::Expense => -transaction.amount,
        };
        println!(
            "{:<36} {:<10} {:<8} {:<14} {:>12} {}",
            transaction.id,
            transaction.day(),
            transaction.transaction_type,
            transaction.category,
            format_amount(signed),
            truncate(&transaction.description, 30)
        );
    }
}

fn print_summary(summary: &BalanceSummary) {
    println!("Total Income:   {:>15}", format_amount(summary.income));
    println!("Total Expense:  {:>15}", format_amount(summary.expense));
    println!("{}", "-".repeat(31));
    println!("Balance:        {:>15}", format_amount(summary.balance));
}

fn print_breakdown(breakdown: &[CategoryBreakdown]) {
    if breakdown.is_empty() {
        println!("No data.");
        return;
    }

    println!("{:<20} {:>12} {:>8}", "CATEGORY", "AMOUNT", "PERCENT");
    println!("{}", "-".repeat(42));
    for item in breakdown {
        println!(
            "{:<20} {:>12} {:>7.1}%",
            item.category.display_name(),
            format_amount(item.amount),
            item.percentage
        );
    }
}

fn print_time_series(points: &[TimeSeriesPoint]) {
    if points.is_empty() {
        println!("No data.");
        return;
    }

    println!(
        "{:<12} {:>12} {:>12} {:>12}",
        "DATE", "INCOME", "EXPENSES", "BALANCE"
    );
    println!("{}", "-".repeat(51));
    for point in points {
        println!(
            "{:<12} {:>12} {:>12} {:>12}",
            point.date,
            format_amount(point.income),
            format_amount(point.expense),
            format_amount(point.balance)
        );
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
