//! Connector lines between moved entries

use crate::moved::MovedPair;
use crate::render::{ConnectorLine, Point, Rect, RenderSink};
use devcmp_core::ListSide;
use tracing::{debug, warn};

/// Start and end points of a line joining two anchors
///
/// The line leaves the facing edge of `from` and enters the facing edge of
/// `to`, at mid height.
pub fn line_between(from: Rect, to: Rect) -> (Point, Point) {
    if from.center_x() <= to.center_x() {
        (from.right_middle(), to.left_middle())
    } else {
        (from.left_middle(), to.right_middle())
    }
}

/// Keeps the moved pairs of the last run and draws them on a sink
///
/// Geometry is read from the sink each time lines are drawn, so `on_resize`
/// produces lines matching the new layout.
#[derive(Debug, Default, Clone)]
pub struct ConnectorOverlay {
    pairs: Vec<(MovedPair, String)>,
}

impl ConnectorOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tracked pairs
    pub fn set_pairs(&mut self, pairs: impl IntoIterator<Item = (MovedPair, String)>) {
        self.pairs = pairs.into_iter().collect();
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Draw a line for every tracked pair
    ///
    /// Pairs whose anchors have no geometry are skipped with a warning.
    /// Returns the number of lines drawn.
    pub fn draw(&self, sink: &mut dyn RenderSink) -> usize {
        let mut drawn = 0;

        for (pair, name) in &self.pairs {
            let from = sink.anchor_rect(ListSide::A, name);
            let to = sink.anchor_rect(ListSide::B, name);
            let (Some(from), Some(to)) = (from, to) else {
                warn!(name = %name, "No anchor geometry for moved entry, skipping connector");
                continue;
            };

            let (start, end) = line_between(from, to);
            sink.draw_connector(&ConnectorLine {
                pair: *pair,
                name: name.clone(),
                start,
                end,
            });
            drawn += 1;
        }

        debug!(drawn, "Drew connector lines");
        drawn
    }

    /// Recompute every line after the viewport changed size
    pub fn on_resize(&self, sink: &mut dyn RenderSink) -> usize {
        sink.clear_connectors();
        self.draw(sink)
    }

    /// Remove every line and forget the pairs
    pub fn clear(&mut self, sink: &mut dyn RenderSink) {
        sink.clear_connectors();
        self.pairs.clear();
    }
}
