//! # roster-cli
//!
//! Command-line front end for the synthetic employee table.

mod clipboard;
mod config;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::{ColoredString, Colorize};
use config::{Config, GlobalArgs};
use roster_core::{
    Clock, ColumnDescriptor, ColumnFilter, ColumnSet, Employee, Page, RowGroup, SalaryBand, Snapshot,
    Sort, SystemClock, View, ViewQuery,
};
use roster_sheet::{
    copy_selection, project, to_clipboard_text, Book, Clipboard, CsvOptions, SpreadsheetExport,
};
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// roster - synthetic employee table with clipboard and spreadsheet export
#[derive(Parser)]
#[command(name = "roster")]
#[command(author, version, about = "Synthetic employee table with clipboard and spreadsheet export", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a page of the table
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Rows per page
        #[arg(long, default_value_t = 10)]
        page_size: usize,

        /// Output format (table, json, csv)
        #[arg(short = 'f', long = "format", default_value = "table")]
        format: OutputFormat,

        /// Group rows by a column, e.g. jobTitle
        #[arg(short = 'g', long, value_name = "COLUMN")]
        group_by: Option<String>,

        /// Show the signature catch phrase under each row
        #[arg(short = 'd', long)]
        details: bool,
    },
    /// Copy rows to the clipboard as tab-separated text
    Copy {
        #[command(flatten)]
        view: ViewArgs,

        #[command(flatten)]
        selection: Selection,

        /// Print the text instead of using the clipboard
        #[arg(long)]
        stdout: bool,
    },
    /// Activate the selected employees
    Activate {
        #[command(flatten)]
        view: ViewArgs,

        #[command(flatten)]
        selection: Selection,
    },
    /// Request a new employee
    Add,
    /// Write the filtered rows to employees_<date>.xlsx
    Export {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Distinct values of a column among the filtered rows
    Facets {
        /// Column key, e.g. jobTitle
        column: String,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Print the table's column descriptors as JSON
    Columns,
    /// Read a workbook back and summarise its sheets
    Inspect {
        /// Workbook to read
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Filter and sort flags shared by the data commands.
#[derive(Debug, Clone, Default, Args)]
struct ViewArgs {
    /// Search every column
    #[arg(short = 's', long)]
    search: Option<String>,

    /// Name contains
    #[arg(long)]
    name: Option<String>,

    /// Email contains
    #[arg(long)]
    email: Option<String>,

    /// Lowest salary
    #[arg(long)]
    min_salary: Option<i64>,

    /// Highest salary
    #[arg(long)]
    max_salary: Option<i64>,

    /// Job title (repeatable)
    #[arg(long = "job-title")]
    job_titles: Vec<String>,

    /// Earliest start date (YYYY-MM-DD)
    #[arg(long)]
    started_from: Option<NaiveDate>,

    /// Latest start date (YYYY-MM-DD)
    #[arg(long)]
    started_to: Option<NaiveDate>,

    /// Sort column, optionally suffixed with :desc (e.g. salary:desc)
    #[arg(long, value_name = "COLUMN[:asc|:desc]", value_parser = parse_sort)]
    sort: Option<Sort>,
}

impl ViewArgs {
    fn query(&self) -> ViewQuery {
        let mut query = ViewQuery::new();
        if let Some(search) = &self.search {
            query = query.with_global_filter(search);
        }
        if let Some(name) = &self.name {
            query = query.with_filter("name", ColumnFilter::Contains(name.clone()));
        }
        if let Some(email) = &self.email {
            query = query.with_filter("email", ColumnFilter::Contains(email.clone()));
        }
        if self.min_salary.is_some() || self.max_salary.is_some() {
            query = query.with_filter(
                "salary",
                ColumnFilter::Range {
                    min: self.min_salary,
                    max: self.max_salary,
                },
            );
        }
        if !self.job_titles.is_empty() {
            query = query.with_filter("jobTitle", ColumnFilter::OneOf(self.job_titles.clone()));
        }
        if self.started_from.is_some() || self.started_to.is_some() {
            query = query.with_filter(
                "startDate",
                ColumnFilter::DateBetween {
                    from: self.started_from,
                    to: self.started_to,
                },
            );
        }
        if let Some(sort) = &self.sort {
            query = query.with_sort(sort.clone());
        }
        query
    }
}

/// Rows picked by their position in the filtered view (the `#` column of `list`).
#[derive(Debug, Clone, Default, Args)]
struct Selection {
    /// Positions to select, comma separated
    #[arg(short, long, value_delimiter = ',', conflicts_with = "all")]
    rows: Vec<usize>,

    /// Select every row in the view
    #[arg(short, long)]
    all: bool,
}

impl Selection {
    fn resolve<'a>(&self, view: &View<'a>) -> Result<Vec<&'a Employee>> {
        if self.all {
            return Ok(view.rows().to_vec());
        }
        view.select(&self.rows).context("Invalid row selection")
    }
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Pretty table output (default)
    #[default]
    Table,
}

fn parse_sort(value: &str) -> Result<Sort, String> {
    let (key, direction) = value.split_once(':').unwrap_or((value, "asc"));
    if key.trim().is_empty() {
        return Err("sort column is empty".to_string());
    }
    match direction.to_ascii_lowercase().as_str() {
        "asc" => Ok(Sort::ascending(key.trim())),
        "desc" => Ok(Sort::descending(key.trim())),
        other => Err(format!("unknown sort direction '{other}', expected asc or desc")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.global.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let config = Config::from_cli(&cli.global)?;
    let columns = ColumnSet::employee_table();

    match cli.command {
        Command::Columns => {
            println!("{}", serde_json::to_string_pretty(&columns)?);
            Ok(())
        }
        Command::Inspect { file } => inspect(&file),
        Command::Add => {
            info!("add employee requested");
            println!("{}", "Add employee requested; no record was created.".yellow());
            Ok(())
        }
        command => {
            let snapshot = generate(&config)?;
            run(command, &config, &columns, &snapshot).await
        }
    }
}

/// Build the snapshot every data command reads from.
fn generate(config: &Config) -> Result<Snapshot> {
    let mut generator = config.generator();
    let snapshot = Snapshot::generate(&mut generator, config.count)
        .with_context(|| format!("Failed to generate {} employees", config.count))?;
    info!(rows = snapshot.len(), "generated snapshot");
    Ok(snapshot)
}

async fn run(
    command: Command,
    config: &Config,
    columns: &ColumnSet,
    snapshot: &Snapshot,
) -> Result<()> {
    match command {
        Command::List {
            view,
            page,
            page_size,
            format,
            group_by,
            details,
        } => {
            let Some(index) = page.checked_sub(1) else {
                bail!("Page numbers start at 1");
            };
            let view = view
                .query()
                .with_page(index, page_size)
                .apply(columns, snapshot)?;
            let page = Page {
                index,
                size: page_size,
            };
            let layout = Layout {
                format,
                group_by,
                details,
            };
            print_view(columns, &view, page, &layout)
        }
        Command::Copy {
            view,
            selection,
            stdout,
        } => {
            let view = view.query().apply(columns, snapshot)?;
            let rows = selection.resolve(&view)?;
            if stdout {
                if let Some(text) = to_clipboard_text(&rows) {
                    println!("{text}");
                }
                return Ok(());
            }

            println!("{}", copy_rows(&rows, &config.clipboard()).await?);
            Ok(())
        }
        Command::Activate { view, selection } => {
            let view = view.query().apply(columns, snapshot)?;
            let rows = selection.resolve(&view)?;
            if rows.is_empty() {
                println!("{}", "No rows selected.".yellow());
            }
            for employee in rows {
                info!(email = %employee.email, "activating employee");
                println!("activating {}", employee.full_name());
            }
            Ok(())
        }
        Command::Export { view } => {
            let view = view.query().apply(columns, snapshot)?;
            let export = SpreadsheetExport::build(view.rows(), SystemClock.today())?;
            let path = export.save_in(&config.export_dir).with_context(|| {
                format!("Failed to write export to {}", config.export_dir.display())
            })?;
            println!(
                "{} {} row(s) to {}",
                "Exported".green().bold(),
                export.rows,
                path.display()
            );
            Ok(())
        }
        Command::Facets { column, view } => {
            let view = view.query().apply(columns, snapshot)?;
            for value in view.facets(columns, &column)? {
                println!("{value}");
            }
            Ok(())
        }
        Command::Columns | Command::Inspect { .. } | Command::Add => Ok(()),
    }
}

/// Copy rows and return the notice for the user.
///
/// A rejected write already reads "Failed to copy to clipboard: ...".
async fn copy_rows<C: Clipboard + ?Sized>(rows: &[&Employee], clipboard: &C) -> Result<String> {
    let outcome = copy_selection(rows, clipboard).await?;
    Ok(match outcome.notice() {
        Some(notice) => notice.green().to_string(),
        None => "No rows selected; nothing copied.".yellow().to_string(),
    })
}

/// Read a workbook back and summarise each sheet.
fn inspect(file: &Path) -> Result<()> {
    let book = Book::from_xlsx(file)
        .with_context(|| format!("Failed to read workbook: {}", file.display()))?;

    for (name, sheet) in book.sheets() {
        println!("{} {}", "Sheet:".cyan().bold(), name);
        if let Ok(header) = sheet.row(0) {
            let labels: Vec<String> = header.iter().map(ToString::to_string).collect();
            println!("  columns: {}", labels.join(", "));
        }
        println!("  rows: {}", sheet.row_count().saturating_sub(1));
    }
    Ok(())
}

/// How `list` renders a page.
struct Layout {
    format: OutputFormat,
    group_by: Option<String>,
    details: bool,
}

/// Print the current page of a view in the specified format.
fn print_view(columns: &ColumnSet, view: &View<'_>, page: Page, layout: &Layout) -> Result<()> {
    let rows = view.page_rows();
    let bounds = view.page_bounds();

    // Groups cover the whole view; each lists only its rows on this page.
    let groups = match &layout.group_by {
        Some(key) => Some(view.group_by(columns, key)?),
        None => None,
    };

    match layout.format {
        OutputFormat::Json => {
            let json = match &groups {
                Some(groups) => serde_json::Value::Array(
                    groups
                        .iter()
                        .filter_map(|group| {
                            let rows = rows_on_page(group, &bounds);
                            (!rows.is_empty()).then(|| {
                                serde_json::json!({
                                    "value": group.value,
                                    "count": group.count(),
                                    "rows": rows.iter().map(|(_, e)| e).collect::<Vec<_>>(),
                                })
                            })
                        })
                        .collect(),
                ),
                None => serde_json::to_value(rows)?,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Csv => {
            project(columns, rows)
                .write_csv(std::io::stdout().lock(), CsvOptions::default())
                .context("Failed to write CSV")?;
        }
        OutputFormat::Table => {
            if view.is_empty() {
                println!("(no matching employees)");
                return Ok(());
            }
            if rows.is_empty() {
                println!("(page {} is past the end)", page.index + 1);
            } else if let (Some(groups), Some(key)) = (&groups, &layout.group_by) {
                let label = columns.get(key)?.label.as_str();
                for group in groups {
                    let entries = rows_on_page(group, &bounds);
                    if entries.is_empty() {
                        continue;
                    }
                    println!(
                        "\n{} {} ({})",
                        format!("{label}:").cyan().bold(),
                        group.value.bold(),
                        group.count()
                    );
                    print_table(columns, &entries, layout.details);
                }
            } else {
                let entries: Vec<(usize, &Employee)> =
                    bounds.clone().zip(rows.iter().copied()).collect();
                print_table(columns, &entries, layout.details);
            }
            println!(
                "\nPage {} of {} ({} matching rows)",
                page.index + 1,
                view.page_count(),
                view.len()
            );
        }
    }
    Ok(())
}

/// A group's rows that fall on the current page, with their view positions.
fn rows_on_page<'a>(group: &RowGroup<'a>, bounds: &Range<usize>) -> Vec<(usize, &'a Employee)> {
    group
        .positions
        .iter()
        .zip(&group.rows)
        .filter(|(position, _)| bounds.contains(*position))
        .map(|(position, employee)| (*position, *employee))
        .collect()
}

/// Render rows as an aligned table with column group headers.
fn print_table(columns: &ColumnSet, entries: &[(usize, &Employee)], details: bool) {
    let descriptors: Vec<&ColumnDescriptor> = columns.iter().collect();
    let cells: Vec<Vec<String>> = entries
        .iter()
        .map(|(_, employee)| descriptors.iter().map(|c| c.display(employee)).collect())
        .collect();

    let mut widths: Vec<usize> = descriptors.iter().map(|c| c.label.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let last = entries.last().map_or(0, |(position, _)| *position);
    let index_width = last.to_string().len();

    let mut group_line = format!("{:index_width$}", "");
    let mut i = 0;
    while i < descriptors.len() {
        let group = descriptors[i].group.as_deref().unwrap_or("");
        let mut span = 0;
        while i < descriptors.len() && descriptors[i].group.as_deref().unwrap_or("") == group {
            span += widths[i] + 2;
            i += 1;
        }
        group_line.push_str(&format!("  {:<width$}", group, width = span - 2));
    }
    println!("{}", group_line.trim_end().dimmed());

    let mut header = format!("{:>index_width$}", "#");
    for (column, width) in descriptors.iter().zip(&widths) {
        header.push_str(&format!("  {:<width$}", column.label, width = *width));
    }
    println!("{}", header.trim_end().bold());

    for ((position, employee), row) in entries.iter().zip(&cells) {
        let mut line = format!("{position:>index_width$}");
        for ((column, cell), width) in descriptors.iter().zip(row).zip(&widths) {
            let padded = format!("{cell:<width$}", width = *width);
            let rendered = if column.key == "salary" {
                salary_colour(padded, employee.salary).to_string()
            } else {
                padded
            };
            line.push_str("  ");
            line.push_str(&rendered);
        }
        println!("{}", line.trim_end());
        if details {
            println!(
                "{:index_width$}  {} \"{}\"",
                "",
                "Signature Catch Phrase:".dimmed(),
                employee.signature_catch_phrase
            );
        }
    }
}

fn salary_colour(text: String, salary: u32) -> ColoredString {
    match SalaryBand::of(salary) {
        SalaryBand::Low => text.red(),
        SalaryBand::Mid => text.yellow(),
        SalaryBand::High => text.green(),
    }
}
