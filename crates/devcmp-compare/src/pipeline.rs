//! Comparison pipeline
//!
//! Runs the four steps in a fixed order and tracks progress in a small state
//! machine. Each step relies on the post-condition of the one before it, so
//! no step may start early:
//!
//! ```text
//! Idle → Reconciling → Sorting → Diffing → Annotating → Rendered
//! (any state) → Idle   on a new device selection or a failed run
//! ```

use crate::connector::ConnectorOverlay;
use crate::diff::diff_lists;
use crate::error::{CompareResult, InvalidTransition};
use crate::moved::find_moved;
use crate::reconcile::reconcile_with;
use crate::render::{Mark, NullRenderer, RenderSink};
use crate::report::ComparisonReport;
use crate::sort::sort_by_name;
use devcmp_core::{find_duplicate_names, validate_names, ListSide, NamedObject, ObjectList};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Progress of one comparison run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PipelineState {
    Idle,
    Reconciling,
    Sorting,
    Diffing,
    Annotating,
    Rendered,
}

impl PipelineState {
    /// Attempt a transition to a new state.
    pub fn try_transition(self, to: PipelineState) -> Result<PipelineState, InvalidTransition> {
        use PipelineState::*;

        let valid = matches!(
            (self, to),
            (_, Idle)
                | (Idle, Reconciling)
                | (Reconciling, Sorting)
                | (Sorting, Diffing)
                | (Diffing, Annotating)
                | (Annotating, Rendered)
        );

        if valid {
            Ok(to)
        } else {
            Err(InvalidTransition { from: self, to })
        }
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition_to(self, to: PipelineState) -> bool {
        self.try_transition(to).is_ok()
    }
}

/// Options for a comparison run
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Fail the run when a list repeats a name
    ///
    /// With this off, names match on their first occurrence and only name
    /// sets are equalised: both lists end up the same length holding the same
    /// names, but a repeated name may occur a different number of times on
    /// each side (`[d, d, z]` against `[d, z, z]` is left as is).
    pub reject_duplicate_names: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            reject_duplicate_names: true,
        }
    }
}

/// State of one comparison pair, owned by the caller
///
/// Holds both lists, the pipeline state and the connector overlay. Separate
/// contexts share nothing and can be driven independently.
#[derive(Debug, Clone)]
pub struct ComparisonContext {
    list_a: ObjectList,
    list_b: ObjectList,
    state: PipelineState,
    options: CompareOptions,
    connectors: ConnectorOverlay,
}

impl Default for ComparisonContext {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl ComparisonContext {
    pub fn new(list_a: ObjectList, list_b: ObjectList) -> Self {
        Self {
            list_a,
            list_b,
            state: PipelineState::Idle,
            options: CompareOptions::default(),
            connectors: ConnectorOverlay::new(),
        }
    }

    pub fn with_options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn list(&self, side: ListSide) -> &ObjectList {
        match side {
            ListSide::A => &self.list_a,
            ListSide::B => &self.list_b,
        }
    }

    /// Replace one list wholesale, as after a new device selection
    ///
    /// Resets the pipeline to Idle and forgets previous connectors.
    pub fn set_list(&mut self, side: ListSide, list: ObjectList) {
        match side {
            ListSide::A => self.list_a = list,
            ListSide::B => self.list_b = list,
        }
        self.connectors.set_pairs(Vec::new());
        self.state = PipelineState::Idle;
    }

    /// Return to Idle, keeping the lists
    pub fn reset(&mut self) {
        self.state = PipelineState::Idle;
    }

    /// Remove every annotation from `sink` and return to Idle
    pub fn clear(&mut self, sink: &mut dyn RenderSink) {
        self.connectors.clear(sink);
        sink.clear_annotations();
        self.state = PipelineState::Idle;
    }

    /// Redraw connector lines after the viewport changed size
    pub fn on_resize(&self, sink: &mut dyn RenderSink) -> usize {
        self.connectors.on_resize(sink)
    }

    /// Run the pipeline without a render surface
    pub fn run_detached(&mut self) -> CompareResult<ComparisonReport> {
        self.run(&mut NullRenderer)
    }

    /// Run all four steps, rendering into `sink` as they go
    ///
    /// Must start from Idle. On error the lists are left as they were and the
    /// pipeline returns to Idle. Missing render anchors are logged and skipped.
    pub fn run(&mut self, sink: &mut dyn RenderSink) -> CompareResult<ComparisonReport> {
        match self.run_steps(sink) {
            Ok(report) => Ok(report),
            Err(err) => {
                self.state = PipelineState::Idle;
                Err(err)
            }
        }
    }

    fn advance(&mut self, to: PipelineState) -> CompareResult<()> {
        self.state = self.state.try_transition(to)?;
        debug!(state = ?to, "Comparison pipeline advanced");
        Ok(())
    }

    fn run_steps(&mut self, sink: &mut dyn RenderSink) -> CompareResult<ComparisonReport> {
        self.advance(PipelineState::Reconciling)?;
        self.check_lists()?;

        let mut insertions = Vec::new();
        reconcile_with(&mut self.list_a, &mut self.list_b, |insertion| {
            sink.create_anchor(insertion.side, insertion.index, &insertion.name);
            mark_or_skip(&mut *sink, insertion.side, &insertion.name, Mark::Missing);
            insertions.push(insertion.clone());
        })?;

        self.advance(PipelineState::Sorting)?;
        sort_by_name(&mut self.list_a);
        sort_by_name(&mut self.list_b);
        sink.arrange(ListSide::A, &names(&self.list_a));
        sink.arrange(ListSide::B, &names(&self.list_b));

        self.advance(PipelineState::Diffing)?;
        let differences = diff_lists(&self.list_a, &self.list_b);
        for diff in &differences {
            mark_or_skip(sink, ListSide::A, &diff.name, Mark::Differs);
            if let Some(name) = self.list_b[diff.index].name() {
                mark_or_skip(sink, ListSide::B, name, Mark::Differs);
            }
        }

        self.advance(PipelineState::Annotating)?;
        let moved: Vec<_> = find_moved(&self.list_a, &self.list_b).into_iter().collect();
        let mut pairs = Vec::with_capacity(moved.len());
        for pair in &moved {
            let name_a = self.list_a[pair.index_a].name().unwrap_or_default();
            let name_b = self.list_b[pair.index_b].name().unwrap_or_default();
            mark_or_skip(sink, ListSide::A, name_a, Mark::Moved);
            mark_or_skip(sink, ListSide::B, name_b, Mark::Moved);
            pairs.push((*pair, name_a.to_string()));
        }
        self.connectors.set_pairs(pairs);
        sink.clear_connectors();
        self.connectors.draw(sink);

        self.advance(PipelineState::Rendered)?;

        let report = ComparisonReport {
            list_a: self.list_a.clone(),
            list_b: self.list_b.clone(),
            insertions,
            differences,
            moved,
        };
        info!(summary = %report.summary(), "Comparison complete");
        Ok(report)
    }

    fn check_lists(&self) -> CompareResult<()> {
        validate_names(&self.list_a, ListSide::A)?;
        validate_names(&self.list_b, ListSide::B)?;

        if self.options.reject_duplicate_names {
            let mut duplicates = find_duplicate_names(&self.list_a, ListSide::A);
            duplicates.extend(find_duplicate_names(&self.list_b, ListSide::B));
            for duplicate in &duplicates {
                warn!(error = %duplicate, "Duplicate object name");
            }
            if let Some(first) = duplicates.into_iter().next() {
                return Err(first.into());
            }
        }

        Ok(())
    }
}

fn names(list: &[NamedObject]) -> Vec<&str> {
    list.iter().filter_map(NamedObject::name).collect()
}

fn mark_or_skip(sink: &mut dyn RenderSink, side: ListSide, name: &str, mark: Mark) {
    if let Err(err) = sink.mark(side, name, mark) {
        warn!(error = %err, "Skipping annotation");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompareError;
    use crate::render::MemoryRenderer;
    use devcmp_core::ObjectError;

    use PipelineState::*;

    #[test]
    fn test_forward_transitions() {
        assert!(Idle.can_transition_to(Reconciling));
        assert!(Reconciling.can_transition_to(Sorting));
        assert!(Sorting.can_transition_to(Diffing));
        assert!(Diffing.can_transition_to(Annotating));
        assert!(Annotating.can_transition_to(Rendered));
    }

    #[test]
    fn test_no_skipping() {
        assert_eq!(
            Idle.try_transition(Sorting),
            Err(InvalidTransition {
                from: Idle,
                to: Sorting
            })
        );
        assert!(!Reconciling.can_transition_to(Diffing));
        assert!(!Rendered.can_transition_to(Reconciling));
    }

    #[test]
    fn test_reset_from_anywhere() {
        for state in [Idle, Reconciling, Sorting, Diffing, Annotating, Rendered] {
            assert!(state.can_transition_to(Idle));
        }
    }

    #[test]
    fn test_run_reaches_rendered() {
        let mut ctx = ComparisonContext::new(vec![NamedObject::new("a")], Vec::new());
        let report = ctx.run_detached().unwrap();
        assert_eq!(ctx.state(), Rendered);
        assert_eq!(report.list_b.len(), 1);
    }

    #[test]
    fn test_second_run_requires_reset() {
        let mut ctx = ComparisonContext::new(vec![NamedObject::new("a")], Vec::new());
        ctx.run_detached().unwrap();

        let err = ctx.run_detached().unwrap_err();
        assert!(matches!(err, CompareError::InvalidTransition(_)));

        ctx.reset();
        let report = ctx.run_detached().unwrap();
        assert!(report.insertions.is_empty());
    }

    #[test]
    fn test_duplicates_rejected_by_default() {
        let mut ctx = ComparisonContext::new(
            vec![NamedObject::new("a"), NamedObject::new("a")],
            vec![NamedObject::new("a")],
        );
        let err = ctx.run_detached().unwrap_err();
        assert_eq!(
            err,
            CompareError::Object(ObjectError::DuplicateName {
                side: ListSide::A,
                name: "a".to_string(),
                first: 0,
                duplicate: 1,
            })
        );
        assert_eq!(ctx.state(), Idle);
        assert_eq!(ctx.list(ListSide::A).len(), 2);
    }

    #[test]
    fn test_duplicates_tolerated_when_allowed() {
        let mut ctx = ComparisonContext::new(
            vec![NamedObject::new("a"), NamedObject::new("a")],
            vec![NamedObject::new("a")],
        )
        .with_options(CompareOptions {
            reject_duplicate_names: false,
        });
        let report = ctx.run_detached().unwrap();
        assert_eq!(report.list_a.len(), report.list_b.len());
    }

    #[test]
    fn test_tolerated_duplicates_equalise_name_sets_only() {
        let mut ctx = ComparisonContext::new(
            vec![NamedObject::new("d"), NamedObject::new("d"), NamedObject::new("z")],
            vec![NamedObject::new("d"), NamedObject::new("z"), NamedObject::new("z")],
        )
        .with_options(CompareOptions {
            reject_duplicate_names: false,
        });

        let report = ctx.run_detached().unwrap();

        assert!(report.insertions.is_empty());
        assert_eq!(names(&report.list_a), vec!["d", "d", "z"]);
        assert_eq!(names(&report.list_b), vec!["d", "z", "z"]);
    }

    #[test]
    fn test_render_marks() {
        let list_a = vec![
            NamedObject::new("web").with("addr", "10.0.0.1"),
            NamedObject::new("db"),
        ];
        let list_b = vec![NamedObject::new("web").with("addr", "10.0.0.2")];
        let mut renderer = MemoryRenderer::new("A", "B");
        renderer.show_list(ListSide::A, &list_a);
        renderer.show_list(ListSide::B, &list_b);

        let mut ctx = ComparisonContext::new(list_a, list_b);
        ctx.run(&mut renderer).unwrap();

        assert_eq!(renderer.names(ListSide::B), vec!["db", "web"]);
        assert_eq!(renderer.marks(ListSide::B, "db"), vec![Mark::Missing]);
        assert_eq!(renderer.marks(ListSide::A, "web"), vec![Mark::Differs]);
        assert_eq!(renderer.marks(ListSide::B, "web"), vec![Mark::Differs]);
        assert!(renderer.marks(ListSide::A, "db").is_empty());
    }

    #[test]
    fn test_missing_anchor_is_not_fatal() {
        // The renderer never saw list A, so marking its anchors fails.
        let mut renderer = MemoryRenderer::new("A", "B");
        let mut ctx = ComparisonContext::new(
            vec![NamedObject::new("x").with("v", 1)],
            vec![NamedObject::new("x").with("v", 2)],
        );
        let report = ctx.run(&mut renderer).unwrap();
        assert_eq!(report.differences.len(), 1);
        assert_eq!(ctx.state(), Rendered);
    }

    #[test]
    fn test_clear_returns_to_idle() {
        let mut renderer = MemoryRenderer::new("A", "B");
        let mut ctx = ComparisonContext::new(vec![NamedObject::new("x")], Vec::new());
        ctx.run(&mut renderer).unwrap();
        assert_eq!(renderer.marks(ListSide::B, "x"), vec![Mark::Missing]);

        ctx.clear(&mut renderer);
        assert_eq!(ctx.state(), Idle);
        assert!(renderer.marks(ListSide::B, "x").is_empty());
    }
}
