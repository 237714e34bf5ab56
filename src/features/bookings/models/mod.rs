mod booking;

pub use booking::{Booking, NewBooking};
