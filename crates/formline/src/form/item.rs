//! Form field model.
//!
//! A [`FormItem`] is the model for one row in a rendered form: its display
//! title, current value, field kind, and optional validation rule. The
//! rendering layer draws it, mutates its value through
//! [`update_value`](FormItem::update_value), and observes it through the
//! item's [`value_changed`](FormItem::value_changed) signal.
//!
//! # Identity
//!
//! Every item receives an immutable, process-unique [`FieldId`] at
//! construction. Equality and hashing use the id exclusively, never the
//! display title, so two items may share a title without corrupting
//! lookup and retitling a form never breaks identity.

use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use formline_core::{Property, Signal};

use super::validator::TextInputValidator;

/// A global counter for generating unique field IDs.
static FIELD_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// An opaque, immutable identifier for a [`FormItem`].
///
/// Assigned from a process-global counter at construction and never
/// reused. This is the item's identity for equality, hashing, and change
/// resolution; the display title carries no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u64);

impl FieldId {
    fn next() -> Self {
        Self(FIELD_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value, for logging and diagnostics.
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// The kind of control that renders a form item.
///
/// Fixed at construction; a field never changes kind during its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// An editable text input.
    Input,
    /// A static display label.
    Label,
    /// A tappable button.
    Button,
}

/// A form field's current content.
///
/// Values are hashable scalars; richer content belongs to the rendering
/// layer, not the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// Text content (the common case for input fields).
    Text(String),
    /// Boolean content (switches, checkboxes).
    Bool(bool),
    /// Integer content (steppers, counters).
    Int(i64),
}

impl FieldValue {
    /// The text content, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean content, if this is a `Bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer content, if this is an `Int` value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

/// Callback invoked by the rendering layer when a button field is
/// activated.
///
/// The model only stores and hands out the callback; it never invokes it
/// itself.
pub type FieldAction = Arc<dyn Fn() + Send + Sync>;

/// The model for one form field.
///
/// Everything except `value` is set at construction and immutable
/// afterwards. The value is mutated through the single entry point
/// [`update_value`](Self::update_value), which drives the
/// [`value_changed`](Self::value_changed) signal.
///
/// Items are shared between the owning screen and its
/// [`FormDataSource`](super::FormDataSource) as `Arc<FormItem>`.
///
/// # Example
///
/// ```
/// use formline::form::{FormItem, FieldKind, TextInputValidator};
///
/// let username = FormItem::input("Username")
///     .with_field_name("username")
///     .with_validator(TextInputValidator::new().with_min_length(3));
///
/// assert_eq!(username.kind(), FieldKind::Input);
/// username.update_value(Some("ada".into()), false);
/// assert!(username.validate());
/// ```
pub struct FormItem {
    id: FieldId,
    title: String,
    field_name: Option<String>,
    kind: FieldKind,
    secure: bool,
    validator: Option<TextInputValidator>,
    action: Option<FieldAction>,
    value: Property<Option<FieldValue>>,
    /// Emitted with this item's id on every programmatic value change.
    pub value_changed: Signal<FieldId>,
}

impl FormItem {
    fn with_kind(title: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: FieldId::next(),
            title: title.into(),
            field_name: None,
            kind,
            secure: false,
            validator: None,
            action: None,
            value: Property::new(None),
            value_changed: Signal::new(),
        }
    }

    /// Create an editable text-input field.
    pub fn input(title: impl Into<String>) -> Self {
        Self::with_kind(title, FieldKind::Input)
    }

    /// Create a static label field.
    pub fn label(title: impl Into<String>) -> Self {
        Self::with_kind(title, FieldKind::Label)
    }

    /// Create a button field with its activation callback.
    pub fn button(title: impl Into<String>, action: FieldAction) -> Self {
        let mut item = Self::with_kind(title, FieldKind::Button);
        item.action = Some(action);
        item
    }

    /// Set the stable external lookup key.
    ///
    /// The field name is independent of the display title and is what
    /// calling code uses with
    /// [`FormDataSource::item_by_field_name`](super::FormDataSource::item_by_field_name).
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Set the initial value.
    ///
    /// No notification is emitted; this runs before any observer exists.
    pub fn with_value(self, value: FieldValue) -> Self {
        self.value.set_silent(Some(value));
        self
    }

    /// Mark an input field's value as masked (password entry).
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Attach a validation rule. Meaningful for `Input` fields only;
    /// other kinds ignore it (see [`validate`](Self::validate)).
    pub fn with_validator(mut self, validator: TextInputValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// This item's immutable identity.
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// The display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The stable external lookup key, if set.
    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    /// The kind of control that renders this item.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether an input field's value should be masked.
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// The attached validation rule, if any.
    pub fn validator(&self) -> Option<&TextInputValidator> {
        self.validator.as_ref()
    }

    /// The button activation callback, if any.
    ///
    /// The rendering layer invokes this on user activation; the model
    /// never calls it.
    pub fn action(&self) -> Option<&FieldAction> {
        self.action.as_ref()
    }

    /// A snapshot of the current value.
    pub fn value(&self) -> Option<FieldValue> {
        self.value.get()
    }

    // -------------------------------------------------------------------------
    // Mutation and validation
    // -------------------------------------------------------------------------

    /// Set the field's value. The single mutation entry point.
    ///
    /// When `user_initiated` is `false` (a programmatic change), the
    /// [`value_changed`](Self::value_changed) signal is emitted exactly
    /// once, even if the stored value is unchanged.
    ///
    /// When `user_initiated` is `true`, nothing is emitted: a user edit
    /// already flows through the rendering layer's own live-update path,
    /// and re-notifying would refresh the row the user is typing into.
    pub fn update_value(&self, value: Option<FieldValue>, user_initiated: bool) {
        tracing::trace!(
            target: "formline::item",
            id = self.id.value(),
            user_initiated,
            "updating value"
        );
        self.value.set_silent(value);

        if !user_initiated {
            self.value_changed.emit(self.id);
        }
    }

    /// Check the current value against the attached validation rule.
    ///
    /// Only `Input` items with a present text value *and* a present
    /// validator are checked; every other combination (labels, buttons,
    /// missing value, non-text value, or no validator) passes through as
    /// `true`. Validation never mutates the value.
    pub fn validate(&self) -> bool {
        if self.kind != FieldKind::Input {
            return true;
        }
        let Some(ref validator) = self.validator else {
            return true;
        };
        self.value.with(|value| {
            match value.as_ref().and_then(FieldValue::as_text) {
                Some(text) => validator.check(text),
                None => true,
            }
        })
    }
}

impl PartialEq for FormItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FormItem {}

impl Hash for FormItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for FormItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormItem")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("field_name", &self.field_name)
            .field("kind", &self.kind)
            .field("secure", &self.secure)
            .field("has_validator", &self.validator.is_some())
            .field("has_action", &self.action.is_some())
            .field("value", &self.value)
            .finish()
    }
}
