// Value records shared by the store, the directory and the facades.
// All of them are immutable once built.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{config::RoomSeed, date_range::DateRange, reservation_store::ReservationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoomType {
    Single,
    Double,
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomType::Single => write!(f, "SINGLE"),
            RoomType::Double => write!(f, "DOUBLE"),
        }
    }
}

// Accepts the menu codes ("1" single bed, "2" double bed) as well as the names
impl FromStr for RoomType {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "single" => Ok(RoomType::Single),
            "2" | "double" => Ok(RoomType::Double),
            other => Err(ReservationError::InvalidRoomType(other.to_string())),
        }
    }
}

/// A bookable room. A price of zero marks a comped ("free") room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoomSeed")]
pub struct Room {
    number: String,
    price: f64,
    room_type: RoomType,
}

impl Room {
    pub fn new(
        number: impl Into<String>,
        price: f64,
        room_type: RoomType,
    ) -> Result<Self, ReservationError> {
        let number = number.into().trim().to_string();

        if number.is_empty() {
            return Err(ReservationError::InvalidRoomNumber);
        }

        if !price.is_finite() || price < 0.0 {
            return Err(ReservationError::InvalidPrice(price));
        }

        Ok(Self {
            number,
            price,
            room_type,
        })
    }

    pub fn free(number: impl Into<String>, room_type: RoomType) -> Result<Self, ReservationError> {
        Self::new(number, 0.0, room_type)
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_free() {
            write!(f, "Room: {} - {}, free", self.number, self.room_type)
        } else {
            write!(
                f,
                "Room: {} - {}, {:.2} price per night",
                self.number, self.room_type, self.price
            )
        }
    }
}

// Identity is the email; names are informational only.
// Serialize-only: a Customer comes from CustomerDirectory::add and nowhere else.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    email: String,
    first_name: String,
    last_name: String,
}

impl Customer {
    // Callers go through CustomerDirectory::add, which validates the email first
    pub(crate) fn new(email: String, first_name: String, last_name: String) -> Self {
        Self {
            email,
            first_name,
            last_name,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for Customer {}

impl Hash for Customer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.email.hash(state);
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "First name: {}; Last name: {}; E-mail: {}.",
            self.first_name, self.last_name, self.email
        )
    }
}

/// One customer holding one room for one stay. Only the store creates these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    customer: Customer,
    room: Room,
    dates: DateRange,
}

impl Reservation {
    pub(crate) fn new(customer: Customer, room: Room, dates: DateRange) -> Self {
        Self {
            customer,
            room,
            dates,
        }
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn dates(&self) -> DateRange {
        self.dates
    }

    pub fn nights(&self) -> i64 {
        self.dates.nights()
    }

    // Flat per-night rate, nothing else
    pub fn total_price(&self) -> f64 {
        self.room.price() * self.nights() as f64
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reservation")?;
        writeln!(
            f,
            "{} {}",
            self.customer.first_name(),
            self.customer.last_name()
        )?;
        writeln!(f, "Room: {} - {}", self.room.number(), self.room.room_type())?;
        writeln!(f, "Price: {:.2} price per night", self.room.price())?;
        writeln!(f, "Check-in date: {}", self.dates.check_in())?;
        write!(f, "Check-out date: {}", self.dates.check_out())
    }
}
