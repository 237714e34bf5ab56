pub mod admin_handlers;

pub use admin_handlers::{
    __path_delete_booking, __path_list_bookings, __path_list_contacts, __path_list_donors,
    delete_booking, list_bookings, list_contacts, list_donors,
};
