//! Comparison session for one object category
//!
//! A session owns one category, the client, both lists and the pipeline.
//! Sessions share nothing, so each category on a page gets its own.
//!
//! A device selection is split in two halves around the fetch:
//! [`ComparisonSession::begin_selection`] issues a ticket and resets the view,
//! [`ComparisonSession::finish_selection`] applies the fetched list only if the
//! ticket is still the newest for its side. [`ComparisonSession::select_device`]
//! runs both halves with the fetch in between.

use crate::client::ConsoleClient;
use crate::error::FetchError;
use crate::selection::{SelectionTicket, SelectionTracker};
use devcmp_compare::{
    CompareOptions, ComparisonContext, ComparisonReport, NotificationKind, Notifier,
    PipelineState, RenderSink,
};
use devcmp_core::{ListSide, ObjectCategory, ObjectList};
use tracing::{debug, warn};

/// Result of applying a fetch to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// List replaced with `count` objects
    Applied { count: usize },
    /// A newer selection on the same side superseded this one
    Stale,
    /// Fetch failed; the previous list is kept
    Failed,
}

#[derive(Debug)]
pub struct ComparisonSession {
    category: ObjectCategory,
    client: ConsoleClient,
    context: ComparisonContext,
    tracker: SelectionTracker,
    devices: [Option<String>; 2],
    /// Lists as fetched, before reconciliation padded them
    fetched: [ObjectList; 2],
    last_report: Option<ComparisonReport>,
}

fn slot(side: ListSide) -> usize {
    match side {
        ListSide::A => 0,
        ListSide::B => 1,
    }
}

impl ComparisonSession {
    pub fn new(client: ConsoleClient, category: ObjectCategory, options: CompareOptions) -> Self {
        Self {
            category,
            client,
            context: ComparisonContext::default().with_options(options),
            tracker: SelectionTracker::new(),
            devices: [None, None],
            fetched: [Vec::new(), Vec::new()],
            last_report: None,
        }
    }

    pub fn category(&self) -> ObjectCategory {
        self.category
    }

    pub fn client(&self) -> &ConsoleClient {
        &self.client
    }

    pub fn state(&self) -> PipelineState {
        self.context.state()
    }

    pub fn list(&self, side: ListSide) -> &ObjectList {
        self.context.list(side)
    }

    /// Device currently loaded on `side`
    pub fn device(&self, side: ListSide) -> Option<&str> {
        self.devices[slot(side)].as_deref()
    }

    /// Start selecting `device_id` on `side`
    ///
    /// Supersedes any selection still in flight on that side, shows the
    /// loading indicator and drops every annotation from the view.
    pub fn begin_selection(
        &mut self,
        side: ListSide,
        device_id: &str,
        sink: &mut dyn RenderSink,
    ) -> SelectionTicket {
        let ticket = self.tracker.begin(side);
        debug!(
            category = self.category.as_str(),
            side = %side,
            device_id,
            generation = ticket.generation(),
            "Device selected"
        );
        sink.set_loading(true);
        self.context.clear(sink);
        self.last_report = None;
        ticket
    }

    /// Apply the fetch result for `ticket`
    ///
    /// Stale results are discarded without touching the view. The loading
    /// indicator stays on while the other side is still in flight. Failures are
    /// reported through `notifier` and keep the previous list. Otherwise both
    /// sides go back to their lists as fetched, without placeholders from an
    /// earlier run.
    pub fn finish_selection(
        &mut self,
        ticket: SelectionTicket,
        device_id: &str,
        result: Result<ObjectList, FetchError>,
        sink: &mut dyn RenderSink,
        notifier: &dyn Notifier,
    ) -> SelectOutcome {
        let side = ticket.side();
        if !self.tracker.complete(ticket) {
            warn!(
                category = self.category.as_str(),
                side = %side,
                device_id,
                generation = ticket.generation(),
                "Discarding stale response"
            );
            return SelectOutcome::Stale;
        }

        if !self.tracker.any_in_flight() {
            sink.set_loading(false);
        }
        let outcome = match result {
            Ok(list) => {
                let count = list.len();
                self.fetched[slot(side)] = list;
                self.devices[slot(side)] = Some(device_id.to_string());
                SelectOutcome::Applied { count }
            }
            Err(err) => {
                notifier.notify(
                    &format!(
                        "Failed to load {} from device {}: {}",
                        self.category.label(),
                        device_id,
                        err
                    ),
                    NotificationKind::Failure,
                );
                SelectOutcome::Failed
            }
        };
        self.restore_lists(sink);
        outcome
    }

    fn restore_lists(&mut self, sink: &mut dyn RenderSink) {
        for side in [ListSide::A, ListSide::B] {
            let list = self.fetched[slot(side)].clone();
            sink.show_list(side, &list);
            self.context.set_list(side, list);
        }
    }

    /// Fetch and load `device_id` on `side`
    pub async fn select_device(
        &mut self,
        side: ListSide,
        device_id: &str,
        sink: &mut dyn RenderSink,
        notifier: &dyn Notifier,
    ) -> SelectOutcome {
        let ticket = self.begin_selection(side, device_id, sink);
        let result = self.client.fetch_objects(device_id, self.category).await;
        self.finish_selection(ticket, device_id, result, sink, notifier)
    }

    /// Run the comparison and report the outcome
    ///
    /// A second request after a finished run returns the same report without
    /// running again. Returns `None` when the run failed.
    pub fn compare(
        &mut self,
        sink: &mut dyn RenderSink,
        notifier: &dyn Notifier,
    ) -> Option<ComparisonReport> {
        if self.context.state() == PipelineState::Rendered {
            if let Some(report) = &self.last_report {
                return Some(report.clone());
            }
        }
        self.context.reset();

        match self.context.run(sink) {
            Ok(report) => {
                notifier.notify(
                    &format!("Compared {}: {}", self.category.label(), report.summary()),
                    NotificationKind::Success,
                );
                self.last_report = Some(report.clone());
                Some(report)
            }
            Err(err) => {
                notifier.notify(
                    &format!("Cannot compare {}: {}", self.category.label(), err),
                    NotificationKind::Failure,
                );
                None
            }
        }
    }

    /// Redraw connector lines after the viewport changed size
    pub fn on_resize(&self, sink: &mut dyn RenderSink) -> usize {
        self.context.on_resize(sink)
    }
}
