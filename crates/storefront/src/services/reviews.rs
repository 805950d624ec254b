//! Review submission and lookup.

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use campus_canteen_core::{OrderId, OrderStatus, Rating, RatingError, ReviewId, StoreId, UserId};
use campus_canteen_datastore::models::Review;
use campus_canteen_datastore::{ChangeNotifier, DataStore, StoreError};

/// Errors that can occur when submitting reviews.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The order does not exist.
    #[error("order not found")]
    OrderNotFound,

    /// The order belongs to a different buyer.
    #[error("order belongs to another account")]
    NotYourOrder,

    /// Only completed orders can be reviewed.
    #[error("order is {status}, only COMPLETED orders can be reviewed")]
    OrderNotCompleted {
        /// The order's actual status.
        status: OrderStatus,
    },

    /// The buyer already reviewed this order.
    #[error("order already reviewed")]
    AlreadyReviewed,

    /// The rating is outside the 1-5 scale.
    #[error(transparent)]
    InvalidRating(#[from] RatingError),

    /// The comment is empty.
    #[error("comment cannot be empty")]
    EmptyComment,

    /// Datastore error.
    #[error("datastore error: {0}")]
    Store(#[from] StoreError),
}

/// Review submission for the student window.
pub struct ReviewService<'a> {
    store: &'a DataStore,
    notifier: &'a ChangeNotifier,
}

impl<'a> ReviewService<'a> {
    /// Create a new review service.
    #[must_use]
    pub const fn new(store: &'a DataStore, notifier: &'a ChangeNotifier) -> Self {
        Self { store, notifier }
    }

    /// Submit a review for one of the buyer's completed orders.
    ///
    /// All gating runs against the same freshly loaded aggregate the review
    /// is written into: the order must exist, belong to the buyer, be
    /// `COMPLETED`, and not have been reviewed by this buyer before.
    /// Reviews are immutable once written.
    ///
    /// # Errors
    ///
    /// Returns the gating errors above, or `ReviewError::Store` if the
    /// write fails.
    pub fn submit(
        &self,
        buyer_id: UserId,
        order_id: OrderId,
        rating: u8,
        comment: &str,
    ) -> Result<Review, ReviewError> {
        let rating = Rating::new(rating)?;

        let comment = comment.trim();
        if comment.is_empty() {
            return Err(ReviewError::EmptyComment);
        }

        let mut db = self.store.load();

        let order = db.order_by_id(order_id).ok_or(ReviewError::OrderNotFound)?;
        if order.buyer_id != buyer_id {
            return Err(ReviewError::NotYourOrder);
        }
        if order.status != OrderStatus::Completed {
            return Err(ReviewError::OrderNotCompleted {
                status: order.status,
            });
        }
        if db.review_for(order_id, buyer_id).is_some() {
            return Err(ReviewError::AlreadyReviewed);
        }

        let review = Review {
            id: ReviewId::generate(),
            order_id,
            buyer_id,
            rating,
            comment: comment.to_owned(),
            created_at: Utc::now(),
        };

        db.reviews.push(review.clone());
        self.store.save(&db)?;
        self.notifier.notify();

        info!(%order_id, rating = %review.rating, "review submitted");
        Ok(review)
    }

    /// The buyer's reviews.
    #[must_use]
    pub fn my_reviews(&self, buyer_id: UserId) -> Vec<Review> {
        let db = self.store.load();
        db.reviews_for_buyer(buyer_id).into_iter().cloned().collect()
    }

    /// All reviews on a store's orders.
    ///
    /// Joined through the order records; reviews whose order vanished are
    /// simply not part of any store's list.
    #[must_use]
    pub fn reviews_for_store(&self, store_id: StoreId) -> Vec<Review> {
        let db = self.store.load();
        let order_ids: Vec<OrderId> = db
            .orders_for_store(store_id)
            .into_iter()
            .map(|o| o.id)
            .collect();
        db.reviews
            .iter()
            .filter(|r| order_ids.contains(&r.order_id))
            .cloned()
            .collect()
    }
}
