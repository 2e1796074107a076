//! List comparison and reconciliation engine
//!
//! Given two lists of named configuration objects fetched from two devices,
//! the engine runs a strict pipeline:
//!
//! ```text
//! Idle → Reconciling → Sorting → Diffing → Annotating → Rendered
//!   ↑                                                       │
//!   └──────────────── new device selection ─────────────────┘
//! ```
//!
//! - [`reconcile`] inserts copies of entries missing from the opposing list
//! - [`sort_by_name`] aligns both lists so index `i` names the same object
//! - [`diff_lists`] finds aligned pairs whose payload differs
//! - [`find_moved`] finds names sitting at different indices
//!
//! The data steps are pure. Presentation goes through the [`RenderSink`] and
//! [`Notifier`] traits, so the pipeline runs without any real UI.

mod connector;
mod diff;
mod error;
mod moved;
mod notify;
mod pipeline;
mod reconcile;
mod render;
mod report;
mod sort;

pub use connector::{line_between, ConnectorOverlay};
pub use diff::{diff_lists, differing_keys, differs, values_equal, PairDiff};
pub use error::{CompareError, CompareResult, InvalidTransition};
pub use moved::{find_moved, MovedPair};
pub use notify::{Notification, NotificationKind, NotificationLog, Notifier, TracingNotifier};
pub use pipeline::{CompareOptions, ComparisonContext, PipelineState};
pub use reconcile::{reconcile, reconcile_with, Insertion};
pub use render::{ConnectorLine, Mark, MemoryRenderer, NullRenderer, Point, Rect, RenderSink};
pub use report::{ComparisonReport, ComparisonSummary};
pub use sort::{is_sorted_by_name, sort_by_name};
