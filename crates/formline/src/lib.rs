//! Formline - an observable form-model toolkit for table-based UIs.
//!
//! Formline is the model side of a scrollable form: an ordered collection
//! of fields ([`form::FormDataSource`]) whose value mutations are
//! announced to a rendering layer as per-row update notifications. The
//! rendering layer (a table view, a TUI list, anything that can draw a
//! row) stays an external collaborator: it renders a
//! [`form::FormItem`], mutates values through
//! [`update_value`](form::FormItem::update_value), and implements
//! [`form::DataSourceDelegate`] to refresh exactly the rows that changed.
//!
//! The model is in-memory and single-process: no persistence, no
//! networking, no background work. All notification dispatch is
//! synchronous on the mutating thread.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use formline::prelude::*;
//!
//! let source = FormDataSource::new();
//! source.push(Arc::new(
//!     FormItem::input("Email")
//!         .with_field_name("email")
//!         .with_validator(
//!             TextInputValidator::new().with_pattern(r"^\S+@\S+$").unwrap(),
//!         ),
//! ));
//!
//! let email = source.item_by_field_name("email").unwrap();
//! email.update_value(Some("user@example.com".into()), false);
//! assert!(email.validate());
//! ```

pub use formline_core::{ConnectionGuard, ConnectionId, Property, Signal};

mod error;
pub mod form;
pub mod prelude;

pub use error::{Error, Result};
