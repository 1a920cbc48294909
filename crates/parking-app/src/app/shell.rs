//! Interactive operator shell
//!
//! Menu loop around the parking service: 1 = vehicle entering,
//! 2 = vehicle exiting, 3 = shutdown. A failed transaction is reported and
//! the loop goes on.

use std::io::{BufRead, Write};

use parking_domain::clock::Clock;
use parking_domain::repository::{ParkingSpotRepository, TicketRepository};
use parking_infra::input::ConsoleInputReader;
use parking_types::{Error, InputError, Result};

use super::ParkingService;

pub const MENU: &str = "Please select an option. Simply enter the number to choose an action
1 New Vehicle Entering - Allocate Parking Space
2 Vehicle Exiting - Generate Ticket Price
3 Shutdown System";

/// Run the menu loop until shutdown or end of input
pub fn run_shell<R, W, S, T, C, O>(
    service: &mut ParkingService<ConsoleInputReader<R, W>, S, T, C>,
    out: &mut O,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    S: ParkingSpotRepository,
    T: TicketRepository,
    C: Clock,
    O: Write,
{
    writeln!(out, "Welcome to Parking System!")?;

    loop {
        let option = match service.input_mut().read_menu_option(MENU) {
            Ok(option) => option,
            Err(Error::Input(InputError::Closed)) => {
                tracing::debug!("input closed, leaving shell");
                break;
            }
            Err(e) => return Err(e),
        };

        match option {
            1 => match service.process_incoming_vehicle() {
                Ok(Some(receipt)) => writeln!(out, "{}", receipt)?,
                Ok(None) => writeln!(out, "No parking spot available for this selection")?,
                Err(e) => writeln!(out, "Unable to process incoming vehicle: {}", e)?,
            },
            2 => match service.process_exiting_vehicle() {
                Ok(receipt) => writeln!(out, "{}", receipt)?,
                Err(e) => writeln!(out, "Unable to process exiting vehicle: {}", e)?,
            },
            3 => {
                writeln!(out, "Exiting from the system!")?;
                break;
            }
            _ => writeln!(
                out,
                "Unsupported option. Please enter a number corresponding to the provided menu"
            )?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use parking_domain::clock::FixedClock;
    use parking_domain::repository::TicketRepository;
    use parking_infra::layout_loader::SpotLayout;
    use parking_infra::persistence::Database;
    use std::io::Cursor;

    fn run(db: &Database, script: &str) -> String {
        let input = ConsoleInputReader::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let mut service = ParkingService::new(input, db.spot_repository(), db.ticket_repository())
            .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()));
        let mut out = Vec::new();
        run_shell(&mut service, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.seed_inventory(&SpotLayout::default()).unwrap();
        db
    }

    #[test]
    fn test_enter_then_shutdown() {
        let db = seeded();
        let out = run(&db, "1\n1\nABCDEF\n3\n");

        assert!(out.contains("Please park your vehicle in spot number: 1"));
        assert!(out.contains("Exiting from the system!"));
        assert!(db.ticket_repository().get_ticket("ABCDEF").unwrap().unwrap().is_open());
    }

    #[test]
    fn test_enter_and_exit_within_grace_period() {
        let db = seeded();
        let out = run(&db, "1\n2\nBIKE42\n2\nBIKE42\n3\n");

        assert!(out.contains("spot number: 4"));
        assert!(out.contains("Please pay the parking fare: 0.00"));
        let ticket = db.ticket_repository().get_ticket("BIKE42").unwrap().unwrap();
        assert!(!ticket.is_open());
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let db = seeded();
        let out = run(&db, "7\n2\nGHOST\n1\n9\n3\n");

        assert!(out.contains("Unsupported option"));
        assert!(
            out.contains("Unable to process exiting vehicle: No ticket found for vehicle GHOST")
        );
        assert!(out.contains("No parking spot available"));
        assert!(out.contains("Exiting from the system!"));
    }

    #[test]
    fn test_end_of_input_leaves_quietly() {
        let db = seeded();
        let out = run(&db, "");
        assert!(out.starts_with("Welcome to Parking System!"));
        assert!(!out.contains("Exiting"));
    }
}
