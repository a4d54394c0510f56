use std::{
    env,
    io::{self, Read},
    process,
};

use colored::Colorize;
use lease_core::{
    build_info,
    config::ConfigManager,
    init,
    lease::{
        end_date_from_input, extend_end_date, parse_count, Frequency, ScheduleItem,
        ScheduleSummary,
    },
    utils::datetime::{format_timestamp, parse_wall_clock},
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["end-date", start, frequency, count] => {
            print_end(end_date_from_input(start, frequency, count)?);
        }
        ["end-date", start, count] => {
            let frequency = ConfigManager::new()?.load()?.default_frequency;
            print_end(end_date_from_input(start, frequency.as_str(), count)?);
        }
        ["extend", current_end, frequency, count] => {
            let frequency: Frequency = frequency.parse()?;
            let current_end = parse_wall_clock(current_end)
                .ok_or_else(|| format!("invalid end date `{current_end}`"))?;
            let end = match parse_count(count)? {
                Some(count) => extend_end_date(current_end, frequency, count)?,
                None => None,
            };
            print_end(end);
        }
        ["outstanding"] => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            let items: Vec<ScheduleItem> = serde_json::from_str(&buffer)?;
            print_summary(&ScheduleSummary::from_items(&items));
        }
        ["config"] | ["config", "show"] => {
            let manager = ConfigManager::new()?;
            println!("{}", serde_json::to_string_pretty(&manager.load()?)?);
        }
        ["config", "set", key, value] => {
            let manager = ConfigManager::new()?;
            let mut config = manager.load()?;
            config.set(key, value)?;
            manager.save(&config)?;
            println!("Saved {} to {}", key, manager.path().display());
        }
        ["version"] => {
            let info = build_info();
            println!(
                "lease_core {} ({} {}, {}, {} {})",
                info.version,
                info.git_hash,
                info.git_status,
                info.timestamp,
                info.target,
                info.profile
            );
            println!("{}", info.rustc);
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn print_end(end: Option<chrono::NaiveDateTime>) {
    match end {
        Some(end) => println!("{} {}", "End date:".bold(), format_timestamp(end)),
        None => println!("{}", "End date not computable".yellow()),
    }
}

fn print_summary(summary: &ScheduleSummary) {
    println!(
        "Items: {} (paid: {}, overdue: {}, voided: {})",
        summary.item_count, summary.paid_count, summary.overdue_count, summary.voided_count
    );
    println!("Total due: {:.2}", summary.total_due);
    println!("Total paid: {:.2}", summary.total_paid);
    let outstanding = format!("{:.2}", summary.outstanding);
    let outstanding = if summary.outstanding > 0.0 {
        outstanding.red().bold()
    } else {
        outstanding.green()
    };
    println!("Outstanding: {outstanding}");
    if let Some(amount) = summary.suggested_payment() {
        println!("Suggested payment: {amount:.2}");
    }
    if let Some(next_due) = summary.next_due {
        println!("Next due: {}", format_timestamp(next_due));
    }
}

fn print_usage() {
    eprintln!(
        "Usage: lease_core_cli <command>\n\
         Commands:\n  \
         end-date <start> [frequency] <count>\n  \
         extend <current-end> <frequency> <count>\n  \
         outstanding < schedule.json\n  \
         config [show | set <key> <value>]\n  \
         version"
    );
}
