use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::bookings::dtos::{BookingDto, CreateBookingDto};
use crate::features::bookings::models::{Booking, NewBooking};
use crate::features::bookings::repositories::BookingRepository;
use crate::modules::email::{Mailer, OutgoingEmail};

pub struct BookingService {
    repository: Arc<dyn BookingRepository>,
    mailer: Arc<dyn Mailer>,
}

impl BookingService {
    pub fn new(repository: Arc<dyn BookingRepository>, mailer: Arc<dyn Mailer>) -> Self {
        Self { repository, mailer }
    }

    /// Stores the booking, then emails a confirmation to the booker
    pub async fn create(&self, dto: CreateBookingDto) -> Result<BookingDto> {
        let booking = self
            .repository
            .insert(NewBooking {
                id: Uuid::now_v7(),
                name: dto.name,
                email: dto.email,
                phone: dto.phone,
                date: dto.date,
                time: dto.time,
                duration: dto.duration,
                notes: dto.notes,
                category: dto.category,
            })
            .await?;

        tracing::info!(
            "Booking created: id={}, date={}, time={}",
            booking.id,
            booking.date,
            booking.time
        );

        if let Err(e) = self.mailer.send(confirmation_email(&booking)).await {
            tracing::warn!(
                "Failed to send booking confirmation to {}: {}",
                booking.email,
                e
            );
        }

        Ok(booking.into())
    }
}

fn confirmation_email(booking: &Booking) -> OutgoingEmail {
    let mut body = format!(
        "Hi {},\n\nThank you for your booking. Here are the details we received:\n\n\
         Date: {}\nTime: {}\nDuration: {}\n",
        booking.name, booking.date, booking.time, booking.duration
    );
    if let Some(category) = &booking.category {
        body.push_str(&format!("Category: {}\n", category));
    }
    if let Some(notes) = &booking.notes {
        body.push_str(&format!("Notes: {}\n", notes));
    }
    body.push_str("\nWe will be in touch if anything changes.\n\nReliance Soul International Youth Foundation");

    OutgoingEmail {
        to: booking.email.clone(),
        subject: "Booking Confirmation".to_string(),
        body,
        reply_to: None,
    }
}
