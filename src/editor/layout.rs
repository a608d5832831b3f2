//! Token geometry
//!
//! Pointer picking and vertical cursor movement need a bounding box per
//! token. The engine itself never measures anything: it asks a [`Layout`].
//! [`FlowLayout`] lays tokens out in fixed-width rows and is the default;
//! [`MeasuredLayout`] replays boxes reported by the host renderer.

use crate::models::{Rect, Token};
use crate::options::LayoutOptions;

/// Supplies token bounding boxes in container coordinates
pub trait Layout {
    /// One box per token, in sequence order
    fn token_rects(&self, tokens: &[Token]) -> Vec<Rect>;

    /// Height of one row
    fn line_height(&self) -> f64;

    /// Zero-width box of the cursor standing at `gap`
    fn cursor_rect(&self, tokens: &[Token], gap: usize) -> Rect {
        let rects = self.token_rects(tokens);

        if let Some(prev) = gap.checked_sub(1).and_then(|i| rects.get(i)) {
            return Rect::new(prev.right(), prev.top, 0.0, prev.height);
        }

        match rects.first() {
            Some(first) => Rect::new(first.left, first.top, 0.0, first.height),
            None => Rect::new(0.0, 0.0, 0.0, self.line_height()),
        }
    }
}

/// Monospace rows, wrapping at `max_width`
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowLayout {
    options: LayoutOptions,
}

impl FlowLayout {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }
}

impl Layout for FlowLayout {
    fn token_rects(&self, tokens: &[Token]) -> Vec<Rect> {
        let LayoutOptions {
            char_width,
            line_height,
            max_width,
            spacing,
        } = self.options;

        let mut rects = Vec::with_capacity(tokens.len());
        let mut x = 0.0;
        let mut y = 0.0;

        for token in tokens {
            let width = token.display_len() as f64 * char_width;
            if let Some(max) = max_width {
                if x > 0.0 && x + width > max {
                    x = 0.0;
                    y += line_height;
                }
            }
            rects.push(Rect::new(x, y, width, line_height));
            x += width + spacing;
        }

        rects
    }

    fn line_height(&self) -> f64 {
        self.options.line_height
    }
}

/// Boxes measured by the host
///
/// The host reports boxes after it re-renders, so they can lag behind the
/// token sequence. Missing entries are filled in from the flow layout.
#[derive(Debug, Clone, Default)]
pub struct MeasuredLayout {
    rects: Vec<Rect>,
    fallback: FlowLayout,
}

impl MeasuredLayout {
    pub fn new(rects: Vec<Rect>, fallback: FlowLayout) -> Self {
        Self { rects, fallback }
    }
}

impl Layout for MeasuredLayout {
    fn token_rects(&self, tokens: &[Token]) -> Vec<Rect> {
        if self.rects.len() >= tokens.len() {
            return self.rects[..tokens.len()].to_vec();
        }

        let mut rects = self.fallback.token_rects(tokens);
        rects[..self.rects.len()].copy_from_slice(&self.rects);
        rects
    }

    fn line_height(&self) -> f64 {
        self.rects
            .first()
            .map(|rect| rect.height)
            .unwrap_or_else(|| self.fallback.line_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenId;

    fn tokens(values: &[&str]) -> Vec<Token> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Token::unit(TokenId(i as u64), v))
            .collect()
    }

    #[test]
    fn test_flow_single_row() {
        let layout = FlowLayout::new(LayoutOptions::default());
        let rects = layout.token_rects(&tokens(&["1", "1000"]));
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 10.0, 20.0));
        // "1,000" is five characters wide
        assert_eq!(rects[1], Rect::new(14.0, 0.0, 50.0, 20.0));
    }

    #[test]
    fn test_flow_wraps() {
        let layout = FlowLayout::new(LayoutOptions {
            max_width: Some(30.0),
            ..LayoutOptions::default()
        });
        let rects = layout.token_rects(&tokens(&["1", "2", "3"]));
        assert_eq!(rects[1].top, 0.0);
        assert_eq!(rects[2], Rect::new(0.0, 20.0, 10.0, 20.0));
    }

    #[test]
    fn test_cursor_rect() {
        let layout = FlowLayout::new(LayoutOptions::default());
        let list = tokens(&["1", "2"]);
        assert_eq!(layout.cursor_rect(&list, 0), Rect::new(0.0, 0.0, 0.0, 20.0));
        assert_eq!(layout.cursor_rect(&list, 2), Rect::new(24.0, 0.0, 0.0, 20.0));
        assert_eq!(layout.cursor_rect(&[], 0), Rect::new(0.0, 0.0, 0.0, 20.0));
    }

    #[test]
    fn test_measured_falls_back_for_missing_boxes() {
        let layout = MeasuredLayout::new(
            vec![Rect::new(100.0, 50.0, 8.0, 16.0)],
            FlowLayout::new(LayoutOptions::default()),
        );
        let rects = layout.token_rects(&tokens(&["1", "2"]));
        assert_eq!(rects[0], Rect::new(100.0, 50.0, 8.0, 16.0));
        assert_eq!(rects[1], Rect::new(14.0, 0.0, 10.0, 20.0));
        assert_eq!(layout.line_height(), 16.0);
    }
}
