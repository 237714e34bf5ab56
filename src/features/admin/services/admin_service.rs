use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::bookings::dtos::BookingDto;
use crate::features::bookings::BookingRepository;
use crate::features::contacts::dtos::ContactMessageDto;
use crate::features::contacts::ContactRepository;
use crate::features::donations::dtos::DonorDto;
use crate::features::donations::DonorRepository;

/// Read-mostly access to records collected by the public endpoints
pub struct AdminService {
    bookings: Arc<dyn BookingRepository>,
    contacts: Arc<dyn ContactRepository>,
    donors: Arc<dyn DonorRepository>,
}

impl AdminService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        contacts: Arc<dyn ContactRepository>,
        donors: Arc<dyn DonorRepository>,
    ) -> Self {
        Self {
            bookings,
            contacts,
            donors,
        }
    }

    pub async fn list_bookings(&self, offset: i64, limit: i64) -> Result<(Vec<BookingDto>, i64)> {
        let items = self.bookings.list_newest_first(offset, limit).await?;
        let total = self.bookings.count().await?;
        Ok((items.into_iter().map(BookingDto::from).collect(), total))
    }

    pub async fn delete_booking(&self, id: Uuid) -> Result<()> {
        if !self.bookings.delete(id).await? {
            return Err(AppError::NotFound(format!("Booking {} not found", id)));
        }
        tracing::info!("Booking deleted: id={}", id);
        Ok(())
    }

    pub async fn list_contacts(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<ContactMessageDto>, i64)> {
        let items = self.contacts.list_newest_first(offset, limit).await?;
        let total = self.contacts.count().await?;
        Ok((items.into_iter().map(ContactMessageDto::from).collect(), total))
    }

    pub async fn list_donors(&self, offset: i64, limit: i64) -> Result<(Vec<DonorDto>, i64)> {
        let items = self.donors.list_newest_first(offset, limit).await?;
        let total = self.donors.count().await?;
        Ok((items.into_iter().map(DonorDto::from).collect(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::bookings::models::NewBooking;
    use crate::shared::test_helpers::{
        InMemoryBookingRepository, InMemoryContactRepository, InMemoryDonorRepository,
    };

    fn new_booking(name: &str) -> NewBooking {
        NewBooking {
            id: Uuid::now_v7(),
            name: name.to_string(),
            email: "guest@example.com".to_string(),
            phone: None,
            date: "2024-06-01".to_string(),
            time: "10:00".to_string(),
            duration: "2h".to_string(),
            notes: None,
            category: Some("hall".to_string()),
        }
    }

    fn service(bookings: Arc<InMemoryBookingRepository>) -> AdminService {
        AdminService::new(
            bookings,
            Arc::new(InMemoryContactRepository::default()),
            Arc::new(InMemoryDonorRepository::default()),
        )
    }

    #[tokio::test]
    async fn test_list_bookings_pages_newest_first() {
        let repo = Arc::new(InMemoryBookingRepository::default());
        for name in ["first", "second", "third"] {
            repo.insert(new_booking(name)).await.unwrap();
        }
        let service = service(repo);

        let (page, total) = service.list_bookings(0, 2).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "third");

        let (rest, _) = service.list_bookings(2, 2).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name, "first");
    }

    #[tokio::test]
    async fn test_delete_booking() {
        let repo = Arc::new(InMemoryBookingRepository::default());
        let booking = repo.insert(new_booking("guest")).await.unwrap();
        let service = service(repo.clone());

        service.delete_booking(booking.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);

        let again = service.delete_booking(booking.id).await;
        assert!(matches!(again, Err(AppError::NotFound(_))));
    }
}
