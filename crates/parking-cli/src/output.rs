//! Output formatting module

use parking_app::app::query_service::LotStatus;
use parking_app::app::{EntryReceipt, ExitReceipt};
use parking_domain::model::Ticket;
use parking_types::{OutputFormat, Result};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn output_entry(output_format: OutputFormat, receipt: Option<&EntryReceipt>) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
        return Ok(());
    }

    match receipt {
        Some(receipt) => println!("{}", receipt),
        None => println!("No parking spot available for this selection"),
    }
    Ok(())
}

pub fn output_exit(output_format: OutputFormat, receipt: &ExitReceipt) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(receipt)?);
    } else {
        println!("{}", receipt);
        if receipt.discount {
            println!("Recurring user discount applied");
        }
    }
    Ok(())
}

pub fn output_status(output_format: OutputFormat, status: &LotStatus) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(status)?);
        return Ok(());
    }

    println!("\nParking Lot Status");
    println!("==================");
    for occupancy in &status.occupancy {
        println!(
            "{:<5} {} / {} available",
            occupancy.parking_type.as_str(),
            occupancy.available,
            occupancy.total
        );
    }
    println!("\n{:>4}  {:<5}  {}", "Spot", "Type", "State");
    println!("------------------------");
    for spot in &status.spots {
        println!(
            "{:>4}  {:<5}  {}",
            spot.id,
            spot.parking_type.as_str(),
            if spot.available { "free" } else { "occupied" }
        );
    }
    Ok(())
}

pub fn output_history(output_format: OutputFormat, plate: &str, tickets: &[Ticket]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(tickets)?);
        return Ok(());
    }

    if tickets.is_empty() {
        println!("No tickets for vehicle {}", plate);
        return Ok(());
    }

    println!("\nTickets for {}", plate);
    println!(
        "{:>5}  {:>4}  {:<5}  {:<16}  {:<16}  {:>8}",
        "ID", "Spot", "Type", "In", "Out", "Price"
    );
    println!("{}", "-".repeat(64));
    for ticket in tickets {
        let out = ticket
            .out_time
            .map(|t| t.format(TIME_FORMAT).to_string())
            .unwrap_or_else(|| "(parked)".to_string());
        println!(
            "{:>5}  {:>4}  {:<5}  {:<16}  {:<16}  {:>8.2}",
            ticket.id,
            ticket.parking_spot.id,
            ticket.parking_spot.parking_type.as_str(),
            ticket.in_time.format(TIME_FORMAT).to_string(),
            out,
            ticket.price
        );
    }
    Ok(())
}
