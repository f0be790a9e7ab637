//! Core systems for Formline.
//!
//! This crate provides the foundational components of the Formline form
//! toolkit:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Property System**: Reactive values with change detection
//! - **Logging**: `tracing` target constants for filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use formline_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use formline_core::{Property, Signal};
//!
//! // A reactive counter with change notification
//! struct Counter {
//!     value: Property<i32>,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn new() -> Self {
//!         Self {
//!             value: Property::new(0),
//!             value_changed: Signal::new(),
//!         }
//!     }
//!
//!     fn increment(&self) {
//!         let new_value = self.value.get() + 1;
//!         if self.value.set(new_value) {
//!             self.value_changed.emit(new_value);
//!         }
//!     }
//! }
//! ```

mod error;
pub mod logging;
mod property;
mod signal;

pub use error::SignalError;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
