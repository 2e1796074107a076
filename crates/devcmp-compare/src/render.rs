//! Render sink abstraction and an in-memory renderer
//!
//! The pipeline never touches a UI directly. It creates anchors, marks them
//! and asks for their geometry through [`RenderSink`]; anchors are addressed
//! by the sanitized object name.

use crate::error::{CompareError, CompareResult};
use crate::moved::MovedPair;
use devcmp_core::{anchor_id, ListSide, NamedObject};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write;

/// Visual state applied to an anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    /// Placeholder synthesized during reconciliation
    Missing,
    /// Same name, different payload
    Differs,
    /// Same name at a different index in the other list
    Moved,
}

impl Mark {
    /// Style class used by the web console
    pub fn css_class(self) -> &'static str {
        match self {
            Mark::Missing => "highlight-missing",
            Mark::Differs => "highlight-different",
            Mark::Moved => "highlight-moved",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Mark::Missing => "[missing]",
            Mark::Differs => "[differs]",
            Mark::Moved => "[moved]",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Screen-space bounding box of an anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn left_middle(&self) -> Point {
        Point {
            x: self.x,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn right_middle(&self) -> Point {
        Point {
            x: self.x + self.width,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Directional marker joining a moved entry's two anchors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorLine {
    pub pair: MovedPair,
    pub name: String,
    pub start: Point,
    pub end: Point,
}

/// Presentation surface for one comparison pair
pub trait RenderSink: Send {
    /// Replace every anchor of `side` with one per entry of `list`
    fn show_list(&mut self, side: ListSide, list: &[NamedObject]);

    /// Create an anchor for `name` at `index`
    fn create_anchor(&mut self, side: ListSide, index: usize, name: &str);

    /// Reorder the anchors of `side` to follow `names`
    fn arrange(&mut self, side: ListSide, names: &[&str]);

    /// Apply `mark` to the anchor of `name`
    fn mark(&mut self, side: ListSide, name: &str, mark: Mark) -> CompareResult<()>;

    /// Current bounding box of the anchor of `name`
    fn anchor_rect(&self, side: ListSide, name: &str) -> Option<Rect>;

    fn draw_connector(&mut self, line: &ConnectorLine);

    fn clear_connectors(&mut self);

    /// Drop all marks and connectors, keeping the anchors
    fn clear_annotations(&mut self);

    fn set_loading(&mut self, _loading: bool) {}
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn show_list(&mut self, _side: ListSide, _list: &[NamedObject]) {}

    fn create_anchor(&mut self, _side: ListSide, _index: usize, _name: &str) {}

    fn arrange(&mut self, _side: ListSide, _names: &[&str]) {}

    fn mark(&mut self, _side: ListSide, _name: &str, _mark: Mark) -> CompareResult<()> {
        Ok(())
    }

    fn anchor_rect(&self, _side: ListSide, _name: &str) -> Option<Rect> {
        None
    }

    fn draw_connector(&mut self, _line: &ConnectorLine) {}

    fn clear_connectors(&mut self) {}

    fn clear_annotations(&mut self) {}
}

#[derive(Debug, Clone)]
struct Anchor {
    name: String,
    marks: BTreeSet<Mark>,
}

/// Row-per-entry renderer kept entirely in memory
///
/// List A occupies the left half of the viewport and list B the right half,
/// separated by a gutter. Used by the CLI for text output and by tests.
#[derive(Debug, Clone)]
pub struct MemoryRenderer {
    containers: [String; 2],
    anchors: [Vec<Anchor>; 2],
    connectors: Vec<ConnectorLine>,
    viewport_width: f64,
    loading: bool,
}

const ROW_HEIGHT: f64 = 1.0;
const GUTTER: f64 = 6.0;

fn slot(side: ListSide) -> usize {
    match side {
        ListSide::A => 0,
        ListSide::B => 1,
    }
}

impl MemoryRenderer {
    /// Create a renderer for two containers
    pub fn new(container_a: impl Into<String>, container_b: impl Into<String>) -> Self {
        Self {
            containers: [container_a.into(), container_b.into()],
            anchors: [Vec::new(), Vec::new()],
            connectors: Vec::new(),
            viewport_width: 120.0,
            loading: false,
        }
    }

    pub fn with_viewport_width(mut self, width: f64) -> Self {
        self.viewport_width = width;
        self
    }

    /// Change the viewport width; anchor geometry follows
    pub fn resize(&mut self, width: f64) {
        self.viewport_width = width;
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Names of `side` in display order
    pub fn names(&self, side: ListSide) -> Vec<&str> {
        self.anchors[slot(side)]
            .iter()
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Marks currently applied to the anchor of `name`
    pub fn marks(&self, side: ListSide, name: &str) -> Vec<Mark> {
        self.find(side, name)
            .map(|i| self.anchors[slot(side)][i].marks.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Full element id of the anchor of `name`
    pub fn anchor_element_id(&self, side: ListSide, name: &str) -> String {
        anchor_id(&self.containers[slot(side)], name)
    }

    pub fn connectors(&self) -> &[ConnectorLine] {
        &self.connectors
    }

    fn find(&self, side: ListSide, name: &str) -> Option<usize> {
        self.anchors[slot(side)].iter().position(|a| a.name == name)
    }

    fn column_width(&self) -> f64 {
        ((self.viewport_width - GUTTER) / 2.0).max(1.0)
    }

    /// Side-by-side text listing of both lists with their marks
    pub fn render_text(&self) -> String {
        let width = self.column_width() as usize;
        let rows = self.anchors[0].len().max(self.anchors[1].len());
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{:<width$}{:gutter$}{}",
            self.containers[0],
            "",
            self.containers[1],
            width = width,
            gutter = GUTTER as usize
        );
        for row in 0..rows {
            let left = self.anchors[0].get(row).map(cell).unwrap_or_default();
            let right = self.anchors[1].get(row).map(cell).unwrap_or_default();
            let _ = writeln!(
                out,
                "{:<width$}{:gutter$}{}",
                truncate(&left, width),
                "",
                right,
                width = width,
                gutter = GUTTER as usize
            );
        }
        for line in &self.connectors {
            let _ = writeln!(
                out,
                "  {} : A#{} -> B#{}",
                line.name, line.pair.index_a, line.pair.index_b
            );
        }

        out
    }
}

fn cell(anchor: &Anchor) -> String {
    let mut text = anchor.name.clone();
    for mark in &anchor.marks {
        text.push(' ');
        text.push_str(mark.label());
    }
    text
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        text.chars().take(width.saturating_sub(1)).chain(['~']).collect()
    }
}

impl RenderSink for MemoryRenderer {
    fn show_list(&mut self, side: ListSide, list: &[NamedObject]) {
        self.anchors[slot(side)] = list
            .iter()
            .filter_map(NamedObject::name)
            .map(|name| Anchor {
                name: name.to_string(),
                marks: BTreeSet::new(),
            })
            .collect();
        self.connectors.clear();
    }

    fn create_anchor(&mut self, side: ListSide, index: usize, name: &str) {
        let anchors = &mut self.anchors[slot(side)];
        let index = index.min(anchors.len());
        anchors.insert(
            index,
            Anchor {
                name: name.to_string(),
                marks: BTreeSet::new(),
            },
        );
    }

    fn arrange(&mut self, side: ListSide, names: &[&str]) {
        let mut remaining = std::mem::take(&mut self.anchors[slot(side)]);
        let mut ordered = Vec::with_capacity(remaining.len());

        for name in names {
            if let Some(pos) = remaining.iter().position(|a| a.name == *name) {
                ordered.push(remaining.remove(pos));
            }
        }
        // Anchors not named keep their relative order at the end.
        ordered.append(&mut remaining);

        self.anchors[slot(side)] = ordered;
    }

    fn mark(&mut self, side: ListSide, name: &str, mark: Mark) -> CompareResult<()> {
        match self.find(side, name) {
            Some(index) => {
                self.anchors[slot(side)][index].marks.insert(mark);
                Ok(())
            }
            None => Err(CompareError::RenderTargetMissing {
                side,
                anchor: self.anchor_element_id(side, name),
            }),
        }
    }

    fn anchor_rect(&self, side: ListSide, name: &str) -> Option<Rect> {
        let row = self.find(side, name)?;
        let width = self.column_width();
        let x = match side {
            ListSide::A => 0.0,
            ListSide::B => width + GUTTER,
        };
        Some(Rect {
            x,
            y: row as f64 * ROW_HEIGHT,
            width,
            height: ROW_HEIGHT,
        })
    }

    fn draw_connector(&mut self, line: &ConnectorLine) {
        self.connectors.push(line.clone());
    }

    fn clear_connectors(&mut self) {
        self.connectors.clear();
    }

    fn clear_annotations(&mut self) {
        for anchors in &mut self.anchors {
            for anchor in anchors {
                anchor.marks.clear();
            }
        }
        self.connectors.clear();
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> MemoryRenderer {
        let mut renderer = MemoryRenderer::new("tagsA", "tagsB").with_viewport_width(46.0);
        renderer.show_list(
            ListSide::A,
            &[NamedObject::new("alpha"), NamedObject::new("beta")],
        );
        renderer.show_list(ListSide::B, &[NamedObject::new("beta")]);
        renderer
    }

    #[test]
    fn test_create_and_mark() {
        let mut r = renderer();
        r.create_anchor(ListSide::B, 0, "alpha");
        r.mark(ListSide::B, "alpha", Mark::Missing).unwrap();

        assert_eq!(r.names(ListSide::B), vec!["alpha", "beta"]);
        assert_eq!(r.marks(ListSide::B, "alpha"), vec![Mark::Missing]);
    }

    #[test]
    fn test_mark_missing_anchor() {
        let mut r = renderer();
        assert_eq!(
            r.mark(ListSide::B, "gamma ray", Mark::Differs),
            Err(CompareError::RenderTargetMissing {
                side: ListSide::B,
                anchor: "tagsB_gamma_ray".to_string()
            })
        );
    }

    #[test]
    fn test_geometry_follows_resize() {
        let mut r = renderer();
        let before = r.anchor_rect(ListSide::B, "beta").unwrap();
        assert_eq!(before.x, 26.0);
        assert_eq!(before.width, 20.0);

        r.resize(86.0);
        let after = r.anchor_rect(ListSide::B, "beta").unwrap();
        assert_eq!(after.x, 46.0);
        assert_eq!(r.anchor_rect(ListSide::A, "beta").unwrap().y, 1.0);
    }

    #[test]
    fn test_arrange() {
        let mut r = renderer();
        r.arrange(ListSide::A, &["beta", "alpha"]);
        assert_eq!(r.names(ListSide::A), vec!["beta", "alpha"]);
    }

    #[test]
    fn test_clear_annotations_keeps_anchors() {
        let mut r = renderer();
        r.mark(ListSide::A, "alpha", Mark::Differs).unwrap();
        r.clear_annotations();
        assert!(r.marks(ListSide::A, "alpha").is_empty());
        assert_eq!(r.names(ListSide::A).len(), 2);
    }

    #[test]
    fn test_names_sharing_an_element_id_keep_their_own_marks() {
        let mut r = MemoryRenderer::new("A", "B");
        r.show_list(ListSide::A, &[NamedObject::new("a b")]);
        r.create_anchor(ListSide::A, 1, "a_b");
        r.mark(ListSide::A, "a_b", Mark::Missing).unwrap();

        assert_eq!(r.anchor_element_id(ListSide::A, "a b"), "A_a_b");
        assert_eq!(r.anchor_element_id(ListSide::A, "a_b"), "A_a_b");
        assert!(r.marks(ListSide::A, "a b").is_empty());
        assert_eq!(r.marks(ListSide::A, "a_b"), vec![Mark::Missing]);

        r.arrange(ListSide::A, &["a_b", "a b"]);
        assert_eq!(r.names(ListSide::A), vec!["a_b", "a b"]);
    }

    #[test]
    fn test_render_text() {
        let mut r = renderer();
        r.mark(ListSide::A, "alpha", Mark::Differs).unwrap();
        let text = r.render_text();
        assert!(text.starts_with("tagsA"));
        assert!(text.contains("alpha [differs]"));
        assert!(text.contains("beta"));
    }
}
