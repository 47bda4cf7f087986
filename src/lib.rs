// Hotel reservation engine: room catalog, booking ledger and customer directory

// Export modules for each part of the engine
pub mod config;
pub mod customer_directory;
pub mod date_range;
pub mod hotel_resource;
pub mod model;
pub mod reservation_store;

// Re-export key types for convenience
pub use config::{load_room_catalog, ConfigError, HotelConfig, RoomSeed};
pub use customer_directory::{CustomerDirectory, CustomerError};
pub use date_range::DateRange;
pub use hotel_resource::{resources, AdminResource, HotelError, HotelResource};
pub use model::{Customer, Reservation, Room, RoomType};
pub use reservation_store::{ReservationError, ReservationStore, RoomFilter};
