// Reservation Store: the room catalog plus every booking made against it.
// Answers "is this room free for these dates" and "what has this customer booked".

use std::{
    collections::{BTreeMap, HashMap},
    str::FromStr,
};

use chrono::NaiveDate;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    date_range::DateRange,
    model::{Customer, Reservation, Room},
};

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("Check-in {check_in} must be before check-out {check_out}")]
    InvalidDateRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Room {room_number} is already reserved for {requested}")]
    RoomUnavailable {
        room_number: String,
        requested: DateRange,
    },

    #[error("Room number {0} is already in use")]
    DuplicateRoom(String),

    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Room price must be a non-negative number, got {0}")]
    InvalidPrice(f64),

    #[error("Room number must not be empty")]
    InvalidRoomNumber,

    #[error("Unknown room type: {0}")]
    InvalidRoomType(String),

    #[error("Unknown room search type: {0} (expected A, P or F)")]
    InvalidRoomFilter(String),

    #[error("Shifting {dates} by {days} days leaves the supported calendar")]
    ShiftOutOfRange { dates: DateRange, days: i64 },

    #[error("Date parse error: {0}")]
    DateParse(#[from] chrono::ParseError),
}

// Price filter applied by find_available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomFilter {
    #[default]
    All,
    PaidOnly,
    FreeOnly,
}

impl RoomFilter {
    pub fn matches(&self, room: &Room) -> bool {
        match self {
            RoomFilter::All => true,
            RoomFilter::PaidOnly => !room.is_free(),
            RoomFilter::FreeOnly => room.is_free(),
        }
    }
}

// Menu codes: A (all rooms), P (only paid rooms), F (only free rooms)
impl FromStr for RoomFilter {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "all" => Ok(RoomFilter::All),
            "p" | "paid" => Ok(RoomFilter::PaidOnly),
            "f" | "free" => Ok(RoomFilter::FreeOnly),
            other => Err(ReservationError::InvalidRoomFilter(other.to_string())),
        }
    }
}

#[derive(Default)]
struct StoreState {
    rooms: BTreeMap<String, Room>,
    // every booking, in the order it was made
    reservations: Vec<Reservation>,
    // room number -> positions into `reservations`
    by_room: HashMap<String, Vec<usize>>,
}

impl StoreState {
    fn room_reservations<'a>(&'a self, room_number: &str) -> impl Iterator<Item = &'a Reservation> {
        self.by_room
            .get(room_number)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.reservations[idx])
    }

    fn is_available(&self, room_number: &str, dates: &DateRange) -> bool {
        !self
            .room_reservations(room_number)
            .any(|existing| existing.dates().overlaps(dates))
    }
}

/// In-memory room catalog and booking ledger.
///
/// One instance is built at process start and shared by reference. A single lock
/// guards the whole store, so a booking's conflict check and its insertion happen
/// under the same write guard and concurrent callers cannot double-book a room.
#[derive(Default)]
pub struct ReservationStore {
    state: RwLock<StoreState>,
}

impl ReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&self, room: Room) -> Result<(), ReservationError> {
        let mut state = self.state.write();

        if state.rooms.contains_key(room.number()) {
            return Err(ReservationError::DuplicateRoom(room.number().to_string()));
        }

        info!(
            room_number = room.number(),
            price = room.price(),
            room_type = %room.room_type(),
            "room added"
        );
        state.rooms.insert(room.number().to_string(), room);

        Ok(())
    }

    pub fn get_room(&self, room_number: &str) -> Option<Room> {
        self.state.read().rooms.get(room_number).cloned()
    }

    // Ordered by room number
    pub fn list_rooms(&self) -> Vec<Room> {
        self.state.read().rooms.values().cloned().collect()
    }

    pub fn room_count(&self) -> usize {
        self.state.read().rooms.len()
    }

    pub fn reservation_count(&self) -> usize {
        self.state.read().reservations.len()
    }

    /// Books `room` for `customer` over `[check_in, check_out)`.
    ///
    /// Fails without touching any state when the range is empty or inverted, when the
    /// room was never registered, or when an existing booking on the room overlaps.
    pub fn reserve(
        &self,
        customer: &Customer,
        room: &Room,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Reservation, ReservationError> {
        let dates = DateRange::new(check_in, check_out)?;
        self.reserve_range(customer, room.number(), dates)
    }

    pub fn reserve_range(
        &self,
        customer: &Customer,
        room_number: &str,
        dates: DateRange,
    ) -> Result<Reservation, ReservationError> {
        let mut state = self.state.write();

        // the catalog copy is authoritative, not whatever the caller holds
        let room = state
            .rooms
            .get(room_number)
            .cloned()
            .ok_or_else(|| ReservationError::RoomNotFound(room_number.to_string()))?;

        if !state.is_available(room_number, &dates) {
            return Err(ReservationError::RoomUnavailable {
                room_number: room_number.to_string(),
                requested: dates,
            });
        }

        let reservation = Reservation::new(customer.clone(), room, dates);
        let idx = state.reservations.len();
        state.reservations.push(reservation.clone());
        state
            .by_room
            .entry(room_number.to_string())
            .or_default()
            .push(idx);

        info!(
            room_number,
            email = customer.email(),
            check_in = %dates.check_in(),
            check_out = %dates.check_out(),
            "room reserved"
        );

        Ok(reservation)
    }

    // An unknown room is never available
    pub fn is_available(&self, room_number: &str, dates: &DateRange) -> bool {
        let state = self.state.read();
        state.rooms.contains_key(room_number) && state.is_available(room_number, dates)
    }

    pub fn find_available(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        filter: RoomFilter,
    ) -> Result<Vec<Room>, ReservationError> {
        let dates = DateRange::new(check_in, check_out)?;
        Ok(self.find_available_range(&dates, filter))
    }

    pub fn find_available_range(&self, dates: &DateRange, filter: RoomFilter) -> Vec<Room> {
        let state = self.state.read();

        let rooms: Vec<Room> = state
            .rooms
            .values()
            .filter(|room| filter.matches(room))
            .filter(|room| state.is_available(room.number(), dates))
            .cloned()
            .collect();

        debug!(
            %dates,
            ?filter,
            available = rooms.len(),
            "availability search"
        );

        rooms
    }

    // Booking order across all rooms
    pub fn reservations_for(&self, customer: &Customer) -> Vec<Reservation> {
        self.state
            .read()
            .reservations
            .iter()
            .filter(|reservation| reservation.customer() == customer)
            .cloned()
            .collect()
    }

    pub fn all_reservations(&self) -> Vec<Reservation> {
        self.state.read().reservations.clone()
    }
}
