//! commitscope-core — commit aggregation and linked-selection engine.
//!
//! Raw change-log rows flow through a strict pipeline:
//!
//! 1. [`parse`] turns rows into [`LineRecord`]s (all-or-nothing).
//! 2. [`aggregate`] folds records into a timestamp-ordered [`Dataset`].
//! 3. [`filter`] applies time cutoff, viewport window and brush, in that order.
//! 4. [`selection`] holds the one mutable [`FilterState`].
//! 5. [`projection`] and [`narrative`] derive view-ready summaries.
//! 6. [`coordinator`] recomputes a [`Snapshot`] per input event and fans it
//!    out to render targets.
//!
//! [`load::load_log`] is the async ingestion entry point.

pub mod aggregate;
pub mod config;
pub mod coordinator;
pub mod filter;
pub mod load;
pub mod narrative;
pub mod parse;
pub mod projection;
pub mod selection;
pub mod types;

pub use aggregate::{aggregate_commits, Dataset, DatasetSummary};
pub use config::ViewConfig;
pub use coordinator::{
    InputEvent, MissingCollaborator, RenderReport, RenderTarget, ScatterPoint, Snapshot,
    ViewCoordinator, ViewKind,
};
pub use filter::{FilterPipeline, Projector, TimeOfDayProjection};
pub use load::{load_log, LoadError};
pub use parse::{ParseError, RawRow};
pub use selection::{FilterState, ScrollOffset, SelectionState};
pub use types::{BrushRect, Commit, LineRecord, Point};
