use std::fmt::Write;

use alloy::hex;
use chrono::{DateTime, Utc};

use crate::{
    config::Explorer,
    types::{ContractType, DomainEvent, EventKind},
};

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

/// `0x1234...abcd` form used for addresses and hashes in tables.
pub fn shorten(hex_str: &str) -> String {
    if hex_str.len() <= 10 {
        return hex_str.to_string();
    }
    format!("{}...{}", &hex_str[..6], &hex_str[hex_str.len() - 4..])
}

/// Distance between a block timestamp and `now` in words, e.g. `about 2 hours ago`.
pub fn format_distance_to_now(timestamp: u64, now: DateTime<Utc>) -> String {
    let seconds = (now.timestamp() - timestamp as i64).max(0);
    let minutes = (seconds as f64 / 60.0).round() as i64;

    let distance = if minutes < 1 {
        "less than a minute".to_string()
    } else if minutes < 2 {
        "1 minute".to_string()
    } else if minutes < 45 {
        format!("{minutes} minutes")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_IN_DAY {
        let hours = (minutes as f64 / 60.0).round() as i64;
        format!("about {hours} hours")
    } else if minutes < 2520 {
        "1 day".to_string()
    } else if minutes < MINUTES_IN_MONTH {
        let days = (minutes as f64 / MINUTES_IN_DAY as f64).round() as i64;
        format!("{days} days")
    } else if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
        plural("about", months, "month")
    } else {
        let months = minutes / MINUTES_IN_MONTH;
        if months < 12 {
            let nearest = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
            format!("{nearest} months")
        } else {
            let years = months / 12;
            match months % 12 {
                0..3 => plural("about", years, "year"),
                3..9 => plural("over", years, "year"),
                _ => plural("almost", years + 1, "year"),
            }
        }
    };

    format!("{distance} ago")
}

fn plural(prefix: &str, count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{prefix} 1 {unit}")
    } else {
        format!("{prefix} {count} {unit}s")
    }
}

fn details(kind: &EventKind) -> String {
    match kind {
        EventKind::NameChange { old_name, new_name } => {
            format!("Changed from {old_name} to {new_name}")
        }
        _ => String::new(),
    }
}

/// Renders the "Transaction History" table for one contract.
pub fn render_events(
    events: &[DomainEvent],
    contract_type: ContractType,
    explorer: &Explorer,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::from("Transaction History\n");

    if events.is_empty() {
        out.push_str("No transactions yet\n");
        return out;
    }

    let with_details = contract_type == ContractType::NameRegistry;

    let mut header = vec!["TYPE", "FROM"];
    if with_details {
        header.push("DETAILS");
    }
    header.extend(["TRANSACTION", "TIME", "LINK"]);

    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|event| {
            let tx_hash = hex::encode_prefixed(event.transaction_hash);
            let mut row = vec![
                event.kind.label().to_string(),
                shorten(&event.from.to_checksum(None)),
            ];
            if with_details {
                row.push(details(&event.kind));
            }
            row.push(shorten(&tx_hash));
            row.push(format_distance_to_now(event.timestamp, now));
            row.push(explorer.tx_url(&tx_hash));
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write_row(&mut out, header.iter().map(|h| h.to_string()), &widths);
    for row in rows {
        write_row(&mut out, row.into_iter(), &widths);
    }
    out
}

fn write_row(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}
