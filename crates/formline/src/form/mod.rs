//! The form model layer.
//!
//! This module provides the model side of a table-based form UI,
//! separating field data from display logic:
//!
//! - [`FormItem`]: one form field's model (identity, value, kind,
//!   validation)
//! - [`TextInputValidator`]: length bounds + pattern check for an input
//!   field's text value
//! - [`FormDataSource`]: ordered collection of items plus
//!   change-notification dispatch
//! - [`DataSourceDelegate`]: the contract a rendering layer implements to
//!   receive row-update brackets
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use formline::form::{FormDataSource, FormItem, TextInputValidator};
//!
//! let source = FormDataSource::new();
//!
//! source.push(Arc::new(FormItem::label("Sign in")));
//! source.push(Arc::new(
//!     FormItem::input("Username")
//!         .with_field_name("username")
//!         .with_validator(TextInputValidator::new().with_min_length(3)),
//! ));
//! source.push(Arc::new(
//!     FormItem::input("Password")
//!         .with_field_name("password")
//!         .with_secure(true),
//! ));
//!
//! let username = source.item_by_field_name("username").unwrap();
//! username.update_value(Some("ada".into()), false);
//! assert!(username.validate());
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────┐  value_changed   ┌────────────────┐  will/did bracket  ┌───────────┐
//! │ FormItem │─────────────────>│ FormDataSource │───────────────────>│  delegate │
//! │          │                  │ (row resolve)  │                    │ (renderer)│
//! └──────────┘                  └────────────────┘                    └───────────┘
//!      ▲                                                                    │
//!      └──────────────── update_value(text, user_initiated) ────────────────┘
//! ```
//!
//! The rendering layer mutates item values; the data source resolves which
//! row changed and tells the delegate to refresh exactly that row.

mod data_source;
mod item;
mod validator;

pub use data_source::{ChangeType, DataSourceDelegate, FormDataSource};
pub use item::{FieldAction, FieldId, FieldKind, FieldValue, FormItem};
pub use validator::TextInputValidator;
