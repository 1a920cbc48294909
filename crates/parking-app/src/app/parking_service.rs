//! Parking Service - Vehicle Entry and Exit Use Cases
//!
//! Entry workflow:
//! 1. Read the vehicle type selection and find a free spot
//! 2. Read the registration number and refuse vehicles already parked
//! 3. Mark the spot unavailable
//! 4. Save a new open ticket
//! 5. Count visits to detect recurring users
//!
//! Exit workflow:
//! 1. Read the registration number and fetch its open ticket
//! 2. Stamp the out time and compute the fare (discounted for recurring users)
//! 3. Update the ticket; only then release the spot

use parking_domain::clock::{Clock, SystemClock};
use parking_domain::input::InputReader;
use parking_domain::model::{ParkingSpot, Ticket};
use parking_domain::repository::{ParkingSpotRepository, TicketRepository};
use parking_domain::service::{calculate_fare, FareSchedule};
use parking_types::{Error, FareError, ParkingType};
use serde::Serialize;
use thiserror::Error;

/// Errors specific to the parking workflows
#[derive(Debug, Error)]
pub enum ParkingServiceError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Vehicle {0} is already parked")]
    AlreadyParked(String),

    #[error("No ticket found for vehicle {0}")]
    TicketNotFound(String),

    #[error("Vehicle {0} has no open ticket")]
    NoOpenTicket(String),

    #[error("Unable to update parking spot {0}")]
    SpotUpdateFailed(i32),

    #[error("Unable to save ticket for vehicle {0}")]
    TicketSaveFailed(String),

    #[error("Unable to update ticket information for vehicle {0}")]
    TicketUpdateFailed(String),

    #[error("Fare calculation failed: {0}")]
    Fare(#[from] FareError),

    #[error("Store error: {0}")]
    StoreError(String),
}

impl From<Error> for ParkingServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::Input(e) => ParkingServiceError::Input(e.to_string()),
            Error::Fare(e) => ParkingServiceError::Fare(e),
            _ => ParkingServiceError::StoreError(err.to_string()),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ParkingServiceError>;

/// Outcome of a successful vehicle entry
#[derive(Debug, Clone, Serialize)]
pub struct EntryReceipt {
    pub ticket: Ticket,
    /// The vehicle has been here before and will get the discount on exit
    pub recurring: bool,
}

/// Outcome of a successful vehicle exit
#[derive(Debug, Clone, Serialize)]
pub struct ExitReceipt {
    pub ticket: Ticket,
    pub discount: bool,
}

impl ExitReceipt {
    pub fn price(&self) -> f64 {
        self.ticket.price
    }
}

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl std::fmt::Display for EntryReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.recurring {
            writeln!(
                f,
                "Welcome back! As a recurring user of our parking lot, \
                 you'll benefit from a discount on exit."
            )?;
        }
        writeln!(f, "Generated Ticket and saved in DB")?;
        writeln!(
            f,
            "Please park your vehicle in spot number: {}",
            self.ticket.parking_spot.id
        )?;
        write!(
            f,
            "Recorded in-time for vehicle number: {} is: {}",
            self.ticket.vehicle_reg_number,
            self.ticket.in_time.format(TIME_FORMAT)
        )
    }
}

impl std::fmt::Display for ExitReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Please pay the parking fare: {:.2}", self.ticket.price)?;
        match self.ticket.out_time {
            Some(out_time) => write!(
                f,
                "Recorded out-time for vehicle number: {} is: {}",
                self.ticket.vehicle_reg_number,
                out_time.format(TIME_FORMAT)
            ),
            None => Ok(()),
        }
    }
}

/// Coordinates input, spot allocation, ticket persistence and fares
pub struct ParkingService<I, S, T, C = SystemClock> {
    input: I,
    spots: S,
    tickets: T,
    clock: C,
    schedule: FareSchedule,
}

impl<I, S, T> ParkingService<I, S, T>
where
    I: InputReader,
    S: ParkingSpotRepository,
    T: TicketRepository,
{
    pub fn new(input: I, spots: S, tickets: T) -> Self {
        Self {
            input,
            spots,
            tickets,
            clock: SystemClock,
            schedule: FareSchedule::default(),
        }
    }
}

impl<I, S, T, C> ParkingService<I, S, T, C>
where
    I: InputReader,
    S: ParkingSpotRepository,
    T: TicketRepository,
    C: Clock,
{
    /// Replace the time source
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ParkingService<I, S, T, C2> {
        ParkingService {
            input: self.input,
            spots: self.spots,
            tickets: self.tickets,
            clock,
            schedule: self.schedule,
        }
    }

    pub fn with_fare_schedule(mut self, schedule: FareSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn spot_repository(&self) -> &S {
        &self.spots
    }

    pub fn ticket_repository(&self) -> &T {
        &self.tickets
    }

    /// Read the vehicle type and find the next free spot for it
    ///
    /// Returns `None` for an unknown selection or a full lot. The spot is
    /// returned marked available; nothing is persisted.
    pub fn get_next_parking_number_if_available(&mut self) -> ServiceResult<Option<ParkingSpot>> {
        let selection = self.input.read_selection()?;
        let Some(parking_type) = ParkingType::from_selection(selection) else {
            tracing::warn!(selection, "incorrect vehicle type selection");
            return Ok(None);
        };

        match self.spots.get_next_available_slot(parking_type)? {
            Some(id) if id > 0 => Ok(Some(ParkingSpot::new(id, parking_type, true))),
            _ => {
                tracing::warn!(%parking_type, "parking slots might be full");
                Ok(None)
            }
        }
    }

    /// Register an incoming vehicle
    ///
    /// Returns `Ok(None)` when no spot can be allocated.
    pub fn process_incoming_vehicle(&mut self) -> ServiceResult<Option<EntryReceipt>> {
        // Step 1: Allocate a spot
        let Some(mut spot) = self.get_next_parking_number_if_available()? else {
            return Ok(None);
        };

        // Step 2: Identify the vehicle
        let vehicle_reg_number = self.input.read_vehicle_registration_number()?;
        if let Some(existing) = self.tickets.get_ticket(&vehicle_reg_number)? {
            if existing.is_open() {
                tracing::warn!(
                    vehicle = %vehicle_reg_number,
                    spot = existing.parking_spot.id,
                    "vehicle already parked"
                );
                return Err(ParkingServiceError::AlreadyParked(vehicle_reg_number));
            }
        }

        // Step 3: Occupy the spot
        spot.available = false;
        if !self.spots.update_parking(&spot)? {
            tracing::error!(spot = spot.id, "failed to mark spot unavailable");
            return Err(ParkingServiceError::SpotUpdateFailed(spot.id));
        }

        // Step 4: Open the ticket
        let mut ticket = Ticket::open(vehicle_reg_number.clone(), spot.clone(), self.clock.now());
        match self.tickets.save_ticket(&mut ticket) {
            Ok(true) => {}
            outcome => {
                if let Err(ref e) = outcome {
                    tracing::error!(
                        vehicle = %vehicle_reg_number,
                        error = %e,
                        "failed to save ticket"
                    );
                }
                self.release_spot_after_failed_entry(spot);
                return Err(ParkingServiceError::TicketSaveFailed(vehicle_reg_number));
            }
        }
        tracing::info!(
            ticket = ticket.id,
            vehicle = %vehicle_reg_number,
            spot = ticket.parking_spot.id,
            in_time = %ticket.in_time,
            "vehicle entered"
        );

        // Step 5: Recurring user check (the count includes this ticket)
        let recurring = self.tickets.get_nb_ticket(&vehicle_reg_number)? > 1;

        Ok(Some(EntryReceipt { ticket, recurring }))
    }

    /// Register an exiting vehicle and charge its fare
    pub fn process_exiting_vehicle(&mut self) -> ServiceResult<ExitReceipt> {
        // Step 1: Find the open ticket
        let vehicle_reg_number = self.input.read_vehicle_registration_number()?;
        let mut ticket = self
            .tickets
            .get_ticket(&vehicle_reg_number)?
            .ok_or_else(|| ParkingServiceError::TicketNotFound(vehicle_reg_number.clone()))?;
        if !ticket.is_open() {
            return Err(ParkingServiceError::NoOpenTicket(vehicle_reg_number));
        }

        // Step 2: Stamp out time and compute the fare
        ticket.out_time = Some(self.clock.now());
        let discount = self.tickets.get_nb_ticket(&vehicle_reg_number)? > 1;
        calculate_fare(&mut ticket, discount, &self.schedule)?;

        // Step 3: Close the ticket; the spot stays occupied if this fails
        match self.tickets.update_ticket(&ticket) {
            Ok(true) => {}
            Ok(false) => {
                tracing::error!(ticket = ticket.id, "ticket update was not applied");
                return Err(ParkingServiceError::TicketUpdateFailed(vehicle_reg_number));
            }
            Err(e) => {
                tracing::error!(ticket = ticket.id, error = %e, "failed to update ticket");
                return Err(ParkingServiceError::TicketUpdateFailed(vehicle_reg_number));
            }
        }

        // Step 4: Release the spot
        let mut spot = ticket.parking_spot.clone();
        spot.available = true;
        if !self.spots.update_parking(&spot)? {
            tracing::error!(spot = spot.id, "failed to release spot");
            return Err(ParkingServiceError::SpotUpdateFailed(spot.id));
        }
        ticket.parking_spot = spot;

        tracing::info!(
            ticket = ticket.id,
            vehicle = %vehicle_reg_number,
            price = ticket.price,
            discount,
            "vehicle exited"
        );

        Ok(ExitReceipt { ticket, discount })
    }

    /// Put a spot back after its ticket could not be saved
    fn release_spot_after_failed_entry(&self, mut spot: ParkingSpot) {
        spot.available = true;
        match self.spots.update_parking(&spot) {
            Ok(true) => tracing::warn!(spot = spot.id, "released spot after failed ticket save"),
            Ok(false) => {
                tracing::error!(spot = spot.id, "could not release spot after failed ticket save")
            }
            Err(e) => tracing::error!(
                spot = spot.id,
                error = %e,
                "could not release spot after failed ticket save"
            ),
        }
    }
}
