//! # Seed Data Generator
//!
//! Populates a ledger file with demo employees and attendance for
//! development.
//!
//! ## Usage
//! ```bash
//! # 8 employees (default), attendance for the previous month
//! cargo run -p tally-store --bin seed
//!
//! # Custom amount
//! cargo run -p tally-store --bin seed -- --count 20
//!
//! # Specify data file and month
//! cargo run -p tally-store --bin seed -- --data ./data/tally.json --month 2025-06
//! ```
//!
//! ## Generated Data
//! - Employees `E-001`, `E-002`, ... with salaries between 22000 and 45000
//! - One fully entered month per employee, mostly WORKED with a sprinkle of
//!   leave, absences, half days and hourly deductions
//! - Every third employee's month is closed
//! - The last employee is terminated mid-month

use std::env;

use chrono::{Datelike, Local};
use tally_core::lifecycle::effective_day_cap;
use tally_core::{AttendanceCode, Money, YearMonth};
use tally_store::{RecordStore, StoreConfig, StoreResult};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Grace", "Linus", "Barbara", "Dennis", "Frances", "Ken", "Margaret", "Edsger",
    "Radia", "Niklaus",
];

const LAST_NAMES: &[&str] = &[
    "Byron", "Turing", "Hopper", "Torvalds", "Liskov", "Ritchie", "Allen", "Thompson",
    "Hamilton", "Dijkstra", "Perlman", "Wirth",
];

fn main() -> StoreResult<()> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 8;
    let mut data_path = String::from("./tally_dev.json");
    let mut month: Option<YearMonth> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(8);
                    i += 1;
                }
            }
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--month" | "-m" => {
                if i + 1 < args.len() {
                    month = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tally Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>       Number of employees to generate (default: 8)");
                println!("  -d, --data <PATH>     Ledger file path (default: ./tally_dev.json)");
                println!("  -m, --month <YYYY-MM> Month to fill (default: previous month)");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let month = month.unwrap_or_else(previous_month);

    println!("🌱 Tally Seed Data Generator");
    println!("============================");
    println!("Data file: {}", data_path);
    println!("Employees: {}", count);
    println!("Month:     {}", month);
    println!();

    // Backups are pointless for a throwaway dev file
    let store = RecordStore::open(StoreConfig::new(&data_path).backup_on_save(false));

    let existing = store.employees().list()?.len();
    if existing > 0 {
        println!("⚠ Ledger already has {} employees", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the data file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut closed = 0;

    for n in 0..count {
        let id = format!("E-{:03}", n + 1);
        let name = format!(
            "{} {}",
            FIRST_NAMES[n % FIRST_NAMES.len()],
            LAST_NAMES[(n * 7) % LAST_NAMES.len()]
        );
        let salary = Money::from_cents(2_200_000 + ((n as i64 * 317_000) % 2_300_000));

        let employee = store.employees().register(&id, &name, salary)?;

        if n + 1 == count && count > 1 {
            if let Some(date) = month.date(month.days() / 2) {
                store.employees().terminate(&id, date)?;
            }
        }

        store.months().begin_or_resume(&id, month)?;

        let account = store.employees().get(&id)?;
        let cap = effective_day_cap(&account.employee, month);
        for day in 1..=cap {
            let (code, hours) = pick_code(n, day);
            store.months().record_day(&id, month, day, code, hours)?;
        }

        if n % 3 == 0 {
            let outcome = store.months().close(&id, month)?;
            println!(
                "  {} {:<22} closed, net {}",
                employee.id,
                employee.full_name,
                outcome.breakdown().net_salary()
            );
            closed += 1;
        } else {
            println!("  {} {:<22} {} days entered", employee.id, employee.full_name, cap);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} employees ({} months closed) in {:?}", count, closed, elapsed);

    let report = store.months().report(month)?;
    println!(
        "  Report {}: gross {}, net {} over {} closed",
        month,
        report.total_gross,
        report.total_net,
        report.closed_count()
    );

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Deterministic code for an employee/day pair.
fn pick_code(employee: usize, day: u32) -> (AttendanceCode, u32) {
    match (employee as u32 * 31 + day * 7) % 23 {
        0 => (AttendanceCode::Leave, 0),
        1 => (AttendanceCode::Absent, 0),
        2 => (AttendanceCode::HalfDay, 0),
        3 => (AttendanceCode::HourlyDeduction, 1 + day % 4),
        4 => (AttendanceCode::Holiday, 0),
        _ => (AttendanceCode::Worked, 0),
    }
}

fn previous_month() -> YearMonth {
    let today = Local::now().date_naive();
    let (year, month) = if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    };
    YearMonth::new(year, month).unwrap_or_else(|_| YearMonth::of(today))
}
