// Thin facades the menu layer talks to. HotelResource is the guest-facing side,
// AdminResource the staff side. Both share one store and one directory.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::{
    config::HotelConfig,
    customer_directory::{CustomerDirectory, CustomerError},
    date_range::DateRange,
    model::{Customer, Reservation, Room, RoomType},
    reservation_store::{ReservationError, ReservationStore, RoomFilter},
};

#[derive(Error, Debug)]
pub enum HotelError {
    #[error(transparent)]
    Reservation(#[from] ReservationError),

    #[error(transparent)]
    Customer(#[from] CustomerError),
}

/// Builds the process-wide store and directory once and hands out both facades.
pub fn resources(config: HotelConfig) -> (HotelResource, AdminResource) {
    let store = Arc::new(ReservationStore::new());
    let customers = Arc::new(CustomerDirectory::new());

    (
        HotelResource::new(store.clone(), customers.clone(), config),
        AdminResource::new(store, customers),
    )
}

pub struct HotelResource {
    store: Arc<ReservationStore>,
    customers: Arc<CustomerDirectory>,
    config: HotelConfig,
}

impl HotelResource {
    pub fn new(
        store: Arc<ReservationStore>,
        customers: Arc<CustomerDirectory>,
        config: HotelConfig,
    ) -> Self {
        Self {
            store,
            customers,
            config,
        }
    }

    pub fn config(&self) -> &HotelConfig {
        &self.config
    }

    pub fn create_customer(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Customer, HotelError> {
        Ok(self.customers.add(email, first_name, last_name)?)
    }

    pub fn get_customer(&self, email: &str) -> Option<Customer> {
        self.customers.get(email)
    }

    pub fn get_room(&self, room_number: &str) -> Option<Room> {
        self.store.get_room(room_number)
    }

    // Dates as typed by the guest, in the configured format
    pub fn parse_dates(&self, check_in: &str, check_out: &str) -> Result<DateRange, HotelError> {
        Ok(DateRange::parse(
            check_in,
            check_out,
            &self.config.date_format,
        )?)
    }

    pub fn reserve_room(
        &self,
        email: &str,
        room_number: &str,
        dates: DateRange,
    ) -> Result<Reservation, HotelError> {
        let customer = self.require_customer(email)?;
        Ok(self.store.reserve_range(&customer, room_number, dates)?)
    }

    pub fn customer_reservations(&self, email: &str) -> Result<Vec<Reservation>, HotelError> {
        let customer = self.require_customer(email)?;
        Ok(self.store.reservations_for(&customer))
    }

    pub fn find_available_rooms(&self, dates: &DateRange, filter: RoomFilter) -> Vec<Room> {
        self.store.find_available_range(dates, filter)
    }

    /// Rooms for the requested stay, or failing that for the same stay moved
    /// `recommendation_offset_days` later. `None` when both searches come up empty.
    pub fn find_recommended_rooms(
        &self,
        dates: &DateRange,
        filter: RoomFilter,
    ) -> Result<Option<(DateRange, Vec<Room>)>, HotelError> {
        let rooms = self.store.find_available_range(dates, filter);
        if !rooms.is_empty() {
            return Ok(Some((*dates, rooms)));
        }

        let alternative = dates.shifted(self.config.recommendation_offset_days)?;
        let rooms = self.store.find_available_range(&alternative, filter);

        debug!(
            requested = %dates,
            %alternative,
            available = rooms.len(),
            "searched alternative dates"
        );

        if rooms.is_empty() {
            Ok(None)
        } else {
            Ok(Some((alternative, rooms)))
        }
    }

    fn require_customer(&self, email: &str) -> Result<Customer, CustomerError> {
        self.customers
            .get(email)
            .ok_or_else(|| CustomerError::CustomerNotFound(email.trim().to_string()))
    }
}

pub struct AdminResource {
    store: Arc<ReservationStore>,
    customers: Arc<CustomerDirectory>,
}

impl AdminResource {
    pub fn new(store: Arc<ReservationStore>, customers: Arc<CustomerDirectory>) -> Self {
        Self { store, customers }
    }

    pub fn get_customer(&self, email: &str) -> Option<Customer> {
        self.customers.get(email)
    }

    pub fn add_room(
        &self,
        number: &str,
        price: f64,
        room_type: RoomType,
    ) -> Result<Room, HotelError> {
        let room = Room::new(number, price, room_type)?;
        self.store.add_room(room.clone())?;
        Ok(room)
    }

    // Stops at the first rejected room; rooms before it stay registered
    pub fn add_rooms(&self, rooms: impl IntoIterator<Item = Room>) -> Result<usize, HotelError> {
        let mut added = 0;
        for room in rooms {
            self.store.add_room(room)?;
            added += 1;
        }
        Ok(added)
    }

    pub fn all_rooms(&self) -> Vec<Room> {
        self.store.list_rooms()
    }

    pub fn all_customers(&self) -> Vec<Customer> {
        self.customers.list()
    }

    pub fn all_reservations(&self) -> Vec<Reservation> {
        self.store.all_reservations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_room_catalog;

    fn hotel() -> (HotelResource, AdminResource) {
        let (hotel, admin) = resources(HotelConfig::default());
        admin.add_room("100", 120.0, RoomType::Single).unwrap();
        admin.add_room("200", 0.0, RoomType::Double).unwrap();
        (hotel, admin)
    }

    #[test]
    fn test_guest_books_and_lists_reservations() {
        let (hotel, admin) = hotel();
        hotel.create_customer("ana@hotel.com", "Ana", "Silva").unwrap();

        let dates = hotel.parse_dates("2026/01/01", "2026/01/15").unwrap();
        let booked = hotel.reserve_room("ana@hotel.com", "100", dates).unwrap();
        assert_eq!(booked.room().number(), "100");

        let mine = hotel.customer_reservations("ana@hotel.com").unwrap();
        assert_eq!(mine, vec![booked]);
        assert_eq!(admin.all_reservations().len(), 1);
    }

    #[test]
    fn test_unknown_customer_or_room_is_not_found() {
        let (hotel, _admin) = hotel();
        let dates = hotel.parse_dates("2026/01/01", "2026/01/02").unwrap();

        assert!(matches!(
            hotel.reserve_room("ghost@hotel.com", "100", dates),
            Err(HotelError::Customer(CustomerError::CustomerNotFound(_)))
        ));
        assert!(matches!(
            hotel.customer_reservations("ghost@hotel.com"),
            Err(HotelError::Customer(CustomerError::CustomerNotFound(_)))
        ));

        hotel.create_customer("ana@hotel.com", "Ana", "Silva").unwrap();
        assert!(matches!(
            hotel.reserve_room("ana@hotel.com", "999", dates),
            Err(HotelError::Reservation(ReservationError::RoomNotFound(_)))
        ));
    }

    #[test]
    fn test_admin_duplicate_room_and_listing() {
        let (hotel, admin) = hotel();

        assert!(matches!(
            admin.add_room("100", 50.0, RoomType::Double),
            Err(HotelError::Reservation(ReservationError::DuplicateRoom(_)))
        ));
        assert!(matches!(
            admin.add_room("300", -1.0, RoomType::Double),
            Err(HotelError::Reservation(ReservationError::InvalidPrice(_)))
        ));

        hotel.create_customer("zoe@hotel.com", "Zoe", "Z").unwrap();
        hotel.create_customer("ana@hotel.com", "Ana", "A").unwrap();

        assert_eq!(admin.all_rooms().len(), 2);
        assert_eq!(admin.all_customers()[0].email(), "ana@hotel.com");
        assert!(admin.get_customer("zoe@hotel.com").is_some());
    }

    #[test]
    fn test_seed_catalog_through_admin() {
        let (hotel, admin) = resources(HotelConfig::default());
        let rooms = load_room_catalog(
            r#"[
                {"number": "101", "price": 99.0, "room_type": "SINGLE"},
                {"number": "102", "room_type": "DOUBLE"},
                {"number": "101", "price": 10.0, "room_type": "DOUBLE"}
            ]"#,
        )
        .unwrap();

        let res = admin.add_rooms(rooms);
        assert!(matches!(
            res,
            Err(HotelError::Reservation(ReservationError::DuplicateRoom(_)))
        ));
        assert_eq!(admin.all_rooms().len(), 2);
        assert_eq!(hotel.get_room("101").unwrap().price(), 99.0);
    }

    #[test]
    fn test_recommendation_moves_stay_forward() {
        let (hotel, _admin) = hotel();
        hotel.create_customer("ana@hotel.com", "Ana", "Silva").unwrap();

        let dates = hotel.parse_dates("2026/02/01", "2026/02/05").unwrap();
        hotel.reserve_room("ana@hotel.com", "100", dates).unwrap();

        // free room still open for the requested stay
        let (found_dates, rooms) = hotel
            .find_recommended_rooms(&dates, RoomFilter::All)
            .unwrap()
            .unwrap();
        assert_eq!(found_dates, dates);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].number(), "200");

        // paid rooms only: fall back to a week later
        let (found_dates, rooms) = hotel
            .find_recommended_rooms(&dates, RoomFilter::PaidOnly)
            .unwrap()
            .unwrap();
        assert_eq!(found_dates, hotel.parse_dates("2026/02/08", "2026/02/12").unwrap());
        assert_eq!(rooms[0].number(), "100");
    }

    #[test]
    fn test_recommendation_uses_configured_offset() {
        let config = HotelConfig {
            recommendation_offset_days: 3,
            ..HotelConfig::default()
        };
        let (hotel, admin) = resources(config);
        admin.add_room("100", 120.0, RoomType::Single).unwrap();
        assert_eq!(hotel.config().recommendation_offset_days, 3);

        hotel.create_customer("ana@hotel.com", "Ana", "Silva").unwrap();
        let dates = hotel.parse_dates("2026/02/01", "2026/02/03").unwrap();
        hotel.reserve_room("ana@hotel.com", "100", dates).unwrap();

        let (found_dates, _) = hotel
            .find_recommended_rooms(&dates, RoomFilter::All)
            .unwrap()
            .unwrap();
        assert_eq!(found_dates, dates.shifted(hotel.config().recommendation_offset_days).unwrap());
        assert_eq!(found_dates, hotel.parse_dates("2026/02/04", "2026/02/06").unwrap());
    }

    #[test]
    fn test_recommendation_none_when_both_ranges_taken() {
        let (hotel, _admin) = hotel();
        hotel.create_customer("ana@hotel.com", "Ana", "Silva").unwrap();

        let long_stay = hotel.parse_dates("2026/02/01", "2026/03/01").unwrap();
        hotel.reserve_room("ana@hotel.com", "100", long_stay).unwrap();

        let dates = hotel.parse_dates("2026/02/01", "2026/02/05").unwrap();
        let found = hotel
            .find_recommended_rooms(&dates, RoomFilter::PaidOnly)
            .unwrap();
        assert!(found.is_none());
        assert!(hotel
            .find_available_rooms(&dates, RoomFilter::PaidOnly)
            .is_empty());
    }
}
