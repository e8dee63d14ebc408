//! Wishlist store
//!
//! A set of product ids. Guests keep it purely local; signed-in users
//! mirror it to their profile document. Remote writes are two-phase: the
//! local change applies first (optimistic), then the remote write is
//! awaited. On failure the local change is rolled back and the error
//! returned so the UI can show a notice instead of silently diverging
//! from remote truth.

use std::sync::Arc;

use tracing::warn;

use crate::ports::WishlistRemote;
use crate::StoreError;

pub struct WishlistStore {
    items: Vec<String>,
    user_id: Option<String>,
    remote: Arc<dyn WishlistRemote>,
}

impl WishlistStore {
    /// Open a guest wishlist; nothing is mirrored remotely.
    pub fn for_guest(remote: Arc<dyn WishlistRemote>) -> Self {
        Self { items: Vec::new(), user_id: None, remote }
    }

    /// Open a signed-in user's wishlist, hydrating from the profile
    /// document. A failed fetch starts empty with a logged diagnostic.
    pub async fn for_user(remote: Arc<dyn WishlistRemote>, user_id: &str) -> Self {
        let items = match remote.fetch(user_id).await {
            Ok(items) => items,
            Err(error) => {
                warn!(%error, user_id, "could not fetch wishlist, starting empty");
                Vec::new()
            }
        };
        Self {
            items,
            user_id: Some(user_id.to_string()),
            remote,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|id| id == product_id)
    }

    pub async fn add(&mut self, product_id: &str) -> Result<(), StoreError> {
        if product_id.is_empty() || self.contains(product_id) {
            return Ok(());
        }
        self.items.push(product_id.to_string());
        if let Some(user_id) = self.user_id.clone() {
            if let Err(error) = self.remote.add(&user_id, product_id).await {
                self.items.retain(|id| id != product_id);
                return Err(error);
            }
        }
        Ok(())
    }

    pub async fn remove(&mut self, product_id: &str) -> Result<(), StoreError> {
        if !self.contains(product_id) {
            return Ok(());
        }
        self.items.retain(|id| id != product_id);
        if let Some(user_id) = self.user_id.clone() {
            if let Err(error) = self.remote.remove(&user_id, product_id).await {
                // Rollback re-appends; original position is not preserved.
                self.items.push(product_id.to_string());
                return Err(error);
            }
        }
        Ok(())
    }

    pub async fn toggle(&mut self, product_id: &str) -> Result<(), StoreError> {
        if self.contains(product_id) {
            self.remove(product_id).await
        } else {
            self.add(product_id).await
        }
    }
}
