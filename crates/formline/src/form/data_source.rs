//! Ordered form-item collection with change-notification dispatch.
//!
//! [`FormDataSource`] backs a scrollable list of form fields. It owns the
//! items in row order, subscribes to each item's `value_changed` signal,
//! and translates a value mutation into a three-phase row-update bracket
//! on its [`DataSourceDelegate`]:
//!
//! 1. [`will_change_content`](DataSourceDelegate::will_change_content)
//! 2. [`did_change_item`](DataSourceDelegate::did_change_item) with the
//!    item, its row, and [`ChangeType::Update`]
//! 3. [`did_change_content`](DataSourceDelegate::did_change_content)
//!
//! The delegate (the rendering layer) uses the bracket to refresh
//! exactly the affected row without reloading the whole list.
//!
//! # Ownership
//!
//! The delegate is held as a `Weak` reference: the data source never keeps
//! the rendering layer alive. Subscriptions run the other way. Each
//! pushed item's signal holds a `Weak` back-reference to the data source,
//! and every subscription is disconnected when the data source drops.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use formline::form::{ChangeType, DataSourceDelegate, FormDataSource, FormItem};
//!
//! struct LogDelegate;
//!
//! impl DataSourceDelegate for LogDelegate {
//!     fn will_change_content(&self) {}
//!     fn did_change_item(&self, item: &Arc<FormItem>, row: usize, _change: ChangeType) {
//!         println!("row {} ({}) changed", row, item.title());
//!     }
//!     fn did_change_content(&self) {}
//! }
//!
//! let delegate: Arc<dyn DataSourceDelegate> = Arc::new(LogDelegate);
//! let source = FormDataSource::with_delegate(Arc::downgrade(&delegate));
//!
//! let email = Arc::new(FormItem::input("Email"));
//! source.push(email.clone());
//!
//! // Programmatic mutation reaches the delegate as a row-update bracket.
//! email.update_value(Some("a@b.c".into()), false);
//! ```

use std::sync::{Arc, Weak};

use formline_core::ConnectionId;
use parking_lot::{Mutex, RwLock};

use super::item::{FieldId, FormItem};

/// The kind of structural change announced to a delegate.
///
/// Only `Update` is produced by this crate. `Insert` and `Delete` are
/// retained for forward compatibility with structural list changes; no
/// code path emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    /// A row was inserted.
    Insert,
    /// A row was deleted.
    Delete,
    /// An existing row's content changed.
    Update,
}

/// The rendering layer's contract for incremental list refresh.
///
/// Callbacks arrive synchronously on the thread that mutated the item,
/// always as a complete three-phase bracket: `will_change_content`, then
/// exactly one `did_change_item`, then `did_change_content`.
pub trait DataSourceDelegate: Send + Sync {
    /// A batched update is starting.
    fn will_change_content(&self);

    /// The item at `row` changed as described by `change`.
    fn did_change_item(&self, item: &Arc<FormItem>, row: usize, change: ChangeType);

    /// The batched update is complete.
    fn did_change_content(&self);
}

/// Bookkeeping for one item's `value_changed` subscription.
struct Subscription {
    item: Arc<FormItem>,
    connection: ConnectionId,
}

/// An ordered collection of [`FormItem`]s plus change-notification
/// dispatch.
///
/// Insertion order defines on-screen row order. Construction returns
/// `Arc<Self>` because each pushed item's subscription slot holds a weak
/// back-reference to the data source.
pub struct FormDataSource {
    items: RwLock<Vec<Arc<FormItem>>>,
    subscriptions: Mutex<Vec<Subscription>>,
    delegate: RwLock<Weak<dyn DataSourceDelegate>>,
}

impl FormDataSource {
    /// Create an empty data source with no delegate.
    pub fn new() -> Arc<Self> {
        let no_delegate: Weak<dyn DataSourceDelegate> = Weak::<Never>::new();
        Arc::new(Self {
            items: RwLock::new(Vec::new()),
            subscriptions: Mutex::new(Vec::new()),
            delegate: RwLock::new(no_delegate),
        })
    }

    /// Create an empty data source wired to a delegate.
    ///
    /// The reference is non-owning: dropping the delegate simply stops
    /// dispatch, it is never kept alive by the data source.
    pub fn with_delegate(delegate: Weak<dyn DataSourceDelegate>) -> Arc<Self> {
        let source = Self::new();
        source.set_delegate(delegate);
        source
    }

    /// Replace the delegate.
    pub fn set_delegate(&self, delegate: Weak<dyn DataSourceDelegate>) {
        *self.delegate.write() = delegate;
    }

    /// Append an item as the next row and subscribe to its value changes.
    pub fn push(self: &Arc<Self>, item: Arc<FormItem>) {
        let weak = Arc::downgrade(self);
        let id = item.id();
        let connection = item.value_changed.connect(move |&changed| {
            if let Some(source) = weak.upgrade() {
                source.on_item_changed(changed);
            }
        });

        tracing::debug!(
            target: "formline::data_source",
            id = id.value(),
            title = item.title(),
            row = self.items.read().len(),
            "item added"
        );

        self.subscriptions.lock().push(Subscription {
            item: item.clone(),
            connection,
        });
        self.items.write().push(item);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// The item at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= len()`. An out-of-range row is a stale index in
    /// the caller, not a recoverable condition.
    pub fn item_at(&self, row: usize) -> Arc<FormItem> {
        self.items.read()[row].clone()
    }

    /// The first item whose field name equals `field_name`, if any.
    ///
    /// Linear scan over row order; first match wins.
    pub fn item_by_field_name(&self, field_name: &str) -> Option<Arc<FormItem>> {
        self.items
            .read()
            .iter()
            .find(|item| item.field_name() == Some(field_name))
            .cloned()
    }

    /// React to an item's value change: resolve the row and forward the
    /// three-phase update bracket to the delegate.
    ///
    /// # Panics
    ///
    /// Panics if no item with `id` is present. The subscription wiring
    /// makes this unreachable through the public API; hitting it means an
    /// item was mutated after being detached from this data source.
    fn on_item_changed(&self, id: FieldId) {
        let (item, row) = {
            let items = self.items.read();
            let row = items
                .iter()
                .position(|item| item.id() == id)
                .unwrap_or_else(|| {
                    panic!("FormItem {:?} does not belong to this data source", id)
                });
            (items[row].clone(), row)
        };

        tracing::trace!(
            target: "formline::data_source",
            id = id.value(),
            row,
            "dispatching item change"
        );

        // A dead delegate skips the whole bracket; it is never partial.
        let Some(delegate) = self.delegate.read().upgrade() else {
            return;
        };

        delegate.will_change_content();
        delegate.did_change_item(&item, row, ChangeType::Update);
        delegate.did_change_content();
    }
}

impl Drop for FormDataSource {
    fn drop(&mut self) {
        // Deterministic teardown: no subscription slot may outlive the
        // data source it points back into.
        for sub in self.subscriptions.lock().drain(..) {
            sub.item.value_changed.disconnect(sub.connection);
        }
    }
}

/// Uninhabited delegate stand-in for `Weak::new()` on the trait object.
enum Never {}

impl DataSourceDelegate for Never {
    fn will_change_content(&self) {
        match *self {}
    }

    fn did_change_item(&self, _item: &Arc<FormItem>, _row: usize, _change: ChangeType) {
        match *self {}
    }

    fn did_change_content(&self) {
        match *self {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test delegate that records every callback in order.
    #[derive(Default)]
    struct RecordingDelegate {
        events: Mutex<Vec<String>>,
    }

    impl RecordingDelegate {
        fn events(&self) -> Vec<String> {
            self.events.lock().clone()
        }
    }

    impl DataSourceDelegate for RecordingDelegate {
        fn will_change_content(&self) {
            self.events.lock().push("will".to_string());
        }

        fn did_change_item(&self, item: &Arc<FormItem>, row: usize, change: ChangeType) {
            self.events
                .lock()
                .push(format!("did_item:{}:{}:{:?}", item.title(), row, change));
        }

        fn did_change_content(&self) {
            self.events.lock().push("did".to_string());
        }
    }

    fn downgrade(delegate: &Arc<RecordingDelegate>) -> Weak<dyn DataSourceDelegate> {
        let weak: Weak<RecordingDelegate> = Arc::downgrade(delegate);
        weak
    }

    fn source_with_delegate() -> (Arc<FormDataSource>, Arc<RecordingDelegate>) {
        let delegate = Arc::new(RecordingDelegate::default());
        let source = FormDataSource::with_delegate(downgrade(&delegate));
        (source, delegate)
    }

    #[test]
    fn test_empty_source() {
        let source = FormDataSource::new();
        assert_eq!(source.len(), 0);
        assert!(source.is_empty());
    }

    #[test]
    fn test_push_preserves_row_order() {
        let source = FormDataSource::new();
        source.push(Arc::new(FormItem::label("Header")));
        source.push(Arc::new(FormItem::input("Username")));
        source.push(Arc::new(FormItem::input("Password")));

        assert_eq!(source.len(), 3);
        assert_eq!(source.item_at(0).title(), "Header");
        assert_eq!(source.item_at(1).title(), "Username");
        assert_eq!(source.item_at(2).title(), "Password");
    }

    #[test]
    #[should_panic]
    fn test_item_at_out_of_range_panics() {
        let source = FormDataSource::new();
        source.push(Arc::new(FormItem::input("Only")));
        let _ = source.item_at(1);
    }

    #[test]
    fn test_item_by_field_name() {
        let source = FormDataSource::new();
        source.push(Arc::new(FormItem::input("Username").with_field_name("username")));
        source.push(Arc::new(FormItem::input("Password").with_field_name("password")));

        let found = source.item_by_field_name("password").unwrap();
        assert_eq!(found.title(), "Password");
        assert!(source.item_by_field_name("email").is_none());
    }

    #[test]
    fn test_item_by_field_name_skips_unnamed() {
        let source = FormDataSource::new();
        source.push(Arc::new(FormItem::label("Header")));
        source.push(Arc::new(FormItem::input("Email").with_field_name("email")));

        let found = source.item_by_field_name("email").unwrap();
        assert_eq!(found.title(), "Email");
    }

    #[test]
    fn test_change_emits_three_phase_bracket() {
        let (source, delegate) = source_with_delegate();
        let first = Arc::new(FormItem::input("First"));
        let second = Arc::new(FormItem::input("Second"));
        source.push(first);
        source.push(second.clone());

        second.update_value(Some("hello".into()), false);

        assert_eq!(
            delegate.events(),
            vec!["will", "did_item:Second:1:Update", "did"]
        );
    }

    #[test]
    fn test_user_initiated_change_emits_nothing() {
        let (source, delegate) = source_with_delegate();
        let item = Arc::new(FormItem::input("Email"));
        source.push(item.clone());

        item.update_value(Some("typed".into()), true);

        assert!(delegate.events().is_empty());
    }

    #[test]
    fn test_each_change_is_one_bracket() {
        let (source, delegate) = source_with_delegate();
        let item = Arc::new(FormItem::input("Email"));
        source.push(item.clone());

        item.update_value(Some("a".into()), false);
        item.update_value(Some("b".into()), false);

        assert_eq!(
            delegate.events(),
            vec![
                "will",
                "did_item:Email:0:Update",
                "did",
                "will",
                "did_item:Email:0:Update",
                "did",
            ]
        );
    }

    #[test]
    fn test_duplicate_titles_resolve_to_their_own_rows() {
        // Identity is the FieldId, not the title: two items sharing a
        // title resolve unambiguously to their own rows.
        let (source, delegate) = source_with_delegate();
        let first = Arc::new(FormItem::input("Name"));
        let second = Arc::new(FormItem::input("Name"));
        source.push(first.clone());
        source.push(second.clone());

        second.update_value(Some("b".into()), false);
        first.update_value(Some("a".into()), false);

        assert_eq!(
            delegate.events(),
            vec![
                "will",
                "did_item:Name:1:Update",
                "did",
                "will",
                "did_item:Name:0:Update",
                "did",
            ]
        );
    }

    #[test]
    fn test_dead_delegate_skips_bracket_entirely() {
        let delegate = Arc::new(RecordingDelegate::default());
        let source = FormDataSource::with_delegate(downgrade(&delegate));
        let item = Arc::new(FormItem::input("Email"));
        source.push(item.clone());

        drop(delegate);

        // Must not panic, and must not dispatch a partial bracket.
        item.update_value(Some("x".into()), false);
    }

    #[test]
    fn test_no_delegate_is_fine() {
        let source = FormDataSource::new();
        let item = Arc::new(FormItem::input("Email"));
        source.push(item.clone());

        item.update_value(Some("x".into()), false);
    }

    #[test]
    fn test_delegate_set_after_construction() {
        let source = FormDataSource::new();
        let item = Arc::new(FormItem::input("Email"));
        source.push(item.clone());

        let delegate = Arc::new(RecordingDelegate::default());
        source.set_delegate(downgrade(&delegate));

        item.update_value(Some("x".into()), false);
        assert_eq!(delegate.events().len(), 3);
    }

    #[test]
    fn test_drop_disconnects_subscriptions() {
        let item = Arc::new(FormItem::input("Email"));
        {
            let source = FormDataSource::new();
            source.push(item.clone());
            assert_eq!(item.value_changed.connection_count(), 1);
        }
        assert_eq!(item.value_changed.connection_count(), 0);

        // Mutating after teardown reaches no one.
        item.update_value(Some("late".into()), false);
    }

    #[test]
    fn test_push_logs_to_data_source_target() {
        use std::io::{self, Write};

        use formline_core::logging::targets;
        use tracing_subscriber::EnvFilter;

        #[derive(Clone, Default)]
        struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

        impl Write for CaptureWriter {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let capture = CaptureWriter::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(format!("{}=debug", targets::DATA_SOURCE)))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let source = FormDataSource::new();
            source.push(Arc::new(FormItem::input("Email")));
        });

        let output = String::from_utf8_lossy(&capture.0.lock()).into_owned();
        assert!(output.contains("item added"));
        assert!(output.contains("Email"));
    }

    #[test]
    fn test_two_sources_sharing_an_item_both_dispatch() {
        // An item handed to two data sources notifies both; each resolves
        // the row in its own collection.
        let (source_a, delegate_a) = source_with_delegate();
        let (source_b, delegate_b) = source_with_delegate();
        let shared = Arc::new(FormItem::input("Shared"));

        source_a.push(Arc::new(FormItem::label("Padding")));
        source_a.push(shared.clone());
        source_b.push(shared.clone());

        shared.update_value(Some("x".into()), false);

        assert_eq!(
            delegate_a.events(),
            vec!["will", "did_item:Shared:1:Update", "did"]
        );
        assert_eq!(
            delegate_b.events(),
            vec!["will", "did_item:Shared:0:Update", "did"]
        );
    }
}
