//! Pointer hit-testing
//!
//! A point maps to the gap after the closest token that ends left of the
//! point on the lowest row not below it. Points before every token map to
//! gap 0.

use std::cmp::Ordering;

use crate::editor::state::Editor;
use crate::models::{Point, Rect};

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    top: f64,
    dx: f64,
    dy: f64,
}

/// Gap closest to `point` given one box per token
pub fn closest_gap(rects: &[Rect], point: Point) -> usize {
    let candidates: Vec<Candidate> = rects
        .iter()
        .enumerate()
        .filter(|(_, rect)| rect.right() <= point.x && rect.top <= point.y)
        .map(|(index, rect)| Candidate {
            index,
            top: rect.top,
            dx: (point.x - rect.right()).abs(),
            dy: (point.y - rect.top).abs(),
        })
        .collect();

    let Some(row_top) = candidates.iter().map(|c| c.top).reduce(f64::max) else {
        return 0;
    };

    let mut row: Vec<Candidate> = candidates.iter().copied().filter(|c| c.top == row_top).collect();
    if row.is_empty() {
        row = candidates;
    }

    row.into_iter()
        .min_by(|a, b| {
            a.dx.partial_cmp(&b.dx)
                .unwrap_or(Ordering::Equal)
                .then(a.dy.partial_cmp(&b.dy).unwrap_or(Ordering::Equal))
        })
        .map(|c| c.index + 1)
        .unwrap_or(0)
}

impl Editor {
    /// Place the cursor at the gap closest to `point`, dissolving any drag group.
    pub fn pick(&mut self, point: Point) {
        let rects = self.layout.token_rects(&self.tokens);
        let gap = closest_gap(&rects, point);
        log::trace!("pick ({}, {}) -> gap {}", point.x, point.y, gap);

        self.cursor = Some(gap);
        self.remove_drag();
    }
}
