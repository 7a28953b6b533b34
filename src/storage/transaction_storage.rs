use crate::models::Transaction;
use crate::storage::Storage;
use crate::types::EmailId;
use dashmap::iter::Iter;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

pub struct TransactionStorage {
    cache: Arc<DashMap<EmailId, Transaction>>
}

impl TransactionStorage {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new())
        }
    }

    pub fn iter(&self) -> Iter<'_, EmailId, Transaction> {
        self.cache.iter()
    }
}

impl Storage for TransactionStorage {
    fn insert_new(&self, transaction: Transaction) -> bool {
        match self.cache.entry(transaction.email_id().to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(transaction);
                true
            }
        }
    }

    fn load(&self, email_id: &str) -> Option<Transaction> {
        self.cache.get(email_id).map(|entry| entry.value().clone())
    }

    fn save(&self, transaction: Transaction) {
        self.cache.insert(transaction.email_id().to_string(), transaction);
    }
}
