// Customer Directory: email -> Customer

use dashmap::{mapref::entry::Entry, DashMap};
use thiserror::Error;
use tracing::info;
use validator::ValidateEmail;

use crate::model::Customer;

#[derive(Error, Debug)]
pub enum CustomerError {
    #[error("That customer e-mail is already in use: {0}")]
    DuplicateCustomer(String),

    #[error("The e-mail should look like 'name@domain.extension' (e.g., user@example.com), got {0:?}")]
    InvalidEmail(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),
}

// `local@domain.tld`. validator accepts bare hosts such as `user@localhost`,
// so the domain must also carry a dot.
pub fn is_valid_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }

    match email.rsplit_once('@') {
        Some((_, domain)) => domain.contains('.'),
        None => false,
    }
}

#[derive(Default)]
pub struct CustomerDirectory {
    customers: DashMap<String, Customer>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Customer, CustomerError> {
        let email = email.trim();

        if !is_valid_email(email) {
            return Err(CustomerError::InvalidEmail(email.to_string()));
        }

        // entry() holds the shard lock across the check and the insert
        match self.customers.entry(email.to_string()) {
            Entry::Occupied(_) => Err(CustomerError::DuplicateCustomer(email.to_string())),
            Entry::Vacant(slot) => {
                let customer = Customer::new(
                    email.to_string(),
                    first_name.trim().to_string(),
                    last_name.trim().to_string(),
                );
                slot.insert(customer.clone());

                info!(email, "customer added");
                Ok(customer)
            }
        }
    }

    pub fn get(&self, email: &str) -> Option<Customer> {
        self.customers.get(email.trim()).map(|c| c.value().clone())
    }

    pub fn contains(&self, email: &str) -> bool {
        self.customers.contains_key(email.trim())
    }

    // Sorted by email; the map itself has no stable order
    pub fn list(&self) -> Vec<Customer> {
        let mut customers: Vec<Customer> = self
            .customers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        customers.sort_by(|a, b| a.email().cmp(b.email()));
        customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
