//! In-memory persistence
//!
//! Tables of organizations, users and orders behind one async lock. Each
//! entity module adds its read/readPage/create/update/delete operations to
//! [`Database`].

mod order;
mod organization;
mod user;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Order, Organization, User};

#[derive(Debug, Default)]
pub(crate) struct Tables {
    organizations: HashMap<Uuid, Organization>,
    users: HashMap<Uuid, User>,
    orders: HashMap<Uuid, Order>,
}

/// Cheaply clonable handle to the in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct Database {
    tables: Arc<RwLock<Tables>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }
}
