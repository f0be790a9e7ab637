//! Prelude module for Formline.
//!
//! This module re-exports the most commonly used types for convenient
//! importing:
//!
//! ```
//! use formline::prelude::*;
//! ```
//!
//! This provides access to:
//! - The form model (`FormItem`, `FieldKind`, `FieldValue`, `FormDataSource`)
//! - Validation (`TextInputValidator`)
//! - The rendering-layer contract (`DataSourceDelegate`, `ChangeType`)
//! - The signal/slot system (`Signal`, `Property`)

pub use crate::error::{Error, Result};
pub use crate::form::{
    ChangeType, DataSourceDelegate, FieldAction, FieldId, FieldKind, FieldValue, FormDataSource,
    FormItem, TextInputValidator,
};
pub use formline_core::{ConnectionGuard, ConnectionId, Property, Signal};
