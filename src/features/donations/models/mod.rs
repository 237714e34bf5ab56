mod donor;

pub use donor::{Donor, NewDonor, PaymentMethod, PaymentStatus};
