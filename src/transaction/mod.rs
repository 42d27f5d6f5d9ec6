//! Transactions: the records of cash handed to a person against their signature.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the form it is entered with
//! - Formatting of amounts and dates for display
//! - The root page and the route handlers that create and delete transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod format;
mod list;
mod page;

pub use core::{NewTransaction, SyncState, Transaction, TransactionId, demo_transactions};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use form::{FormDraft, notes_field, transaction_form_fields};
pub use format::{format_currency, format_date};
pub use list::transaction_list;
pub use page::get_root_page;
