//! List view model
//!
//! Renders a cached list query and drives the per-row
//! idle → confirming → deleting → idle cycle.

mod list;
mod notice;
mod row;

pub use list::{ListView, Settlement};
pub use notice::{Notice, NoticeLevel, DEFAULT_NOTICE_DURATION};
pub use row::{render_rows, PendingDeletion, PendingPhase, RowState, RowView, UNTITLED};
