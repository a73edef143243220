//! Presentation state that never reaches storage: the entry form, the
//! list view's reveal/copy flags and the save indicator.

mod form;
mod list;
mod status;

pub use form::{EntryForm, FormMode, Submission};
pub use list::{Clipboard, CopyField, EntryRow, ListView, EMPTY_LIST_HINT, EMPTY_LIST_TITLE};
pub use status::{SaveStatus, SAVED_LABEL};
