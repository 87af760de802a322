//! lectern-editor-runtime: the async half of the lectern editor.
//!
//! Everything here needs a task executor. On native targets that is the
//! ambient tokio runtime; in the browser it is wasm-bindgen-futures, both via
//! `n0-future`.
//!
//! - [`Debouncer`] / [`ChangeEmitter`]: trailing-edge change notifications
//! - [`ImageUploader`] and the data-URL default
//! - drop batches and the picker flow
//! - [`EditorSession`], which wires all of it to a core [`Toolbar`]
//!
//! [`Toolbar`]: lectern_editor_core::Toolbar

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod debounce;
pub mod dropped;
pub mod emitter;
pub mod picker;
pub mod session;
pub mod uploader;

pub use debounce::Debouncer;
pub use dropped::{DropReport, upload_dropped_images};
pub use emitter::{ChangeEmitter, SnapshotSource};
pub use picker::upload_picked_image;
pub use session::{EditorSession, SessionBuilder};
pub use uploader::{DataUrlUploader, ImageUploader, validate_and_upload, with_sniffed_type};

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
