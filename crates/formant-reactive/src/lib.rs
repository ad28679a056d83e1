//! Reactive binding layer
//!
//! Bridges the imperative, framework-agnostic [`FormManager`] API to
//! reactive consumers:
//! - [`FormHandle`] — whole-form binding with awaitable change notification
//! - [`FieldHandle`] — field-scoped binding that ignores unrelated fields
//! - [`Autosave`] — debounced background persistence of value snapshots
//!
//! All three own their event subscription and release it on drop, so a
//! binding never outlives the component that created it.
//!
//! [`FormManager`]: formant_forms::FormManager

pub mod autosave;
pub mod field_handle;
pub mod handle;

pub use autosave::{Autosave, SaveFn, SaveFuture, save_fn};
pub use field_handle::FieldHandle;
pub use handle::FormHandle;
