pub mod booking_handler;

pub use booking_handler::{__path_create_booking, create_booking};
