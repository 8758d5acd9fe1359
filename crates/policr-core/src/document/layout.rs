//! Reading-order reconstruction from recognized text boxes.

/// A recognized text fragment with its axis-aligned position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub text: String,
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Box height in pixels.
    pub height: f32,
}

impl TextBox {
    pub fn new(text: impl Into<String>, x: f32, y: f32, height: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            height,
        }
    }

    fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Bounding rectangle of a polygon given as `(x, y)` points.
    pub fn from_points(text: impl Into<String>, points: &[(f32, f32)]) -> Self {
        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let mut max_y = f32::MIN;
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        if points.is_empty() {
            return Self::new(text, 0.0, 0.0, 0.0);
        }
        Self::new(text, min_x, min_y, max_y - min_y)
    }
}

/// Join boxes into text lines.
///
/// Boxes whose vertical centers lie within `row_tolerance` pixels of a row's
/// first box belong to that row. Rows are emitted top to bottom, boxes left
/// to right within a row separated by a single space.
pub fn lines_from_boxes(mut boxes: Vec<TextBox>, row_tolerance: f32) -> String {
    boxes.retain(|b| !b.text.trim().is_empty());
    boxes.sort_by(|a, b| a.center_y().total_cmp(&b.center_y()));

    let mut rows: Vec<(f32, Vec<TextBox>)> = Vec::new();
    for text_box in boxes {
        match rows.last_mut() {
            Some((anchor, row)) if (text_box.center_y() - *anchor).abs() <= row_tolerance => {
                row.push(text_box);
            }
            _ => rows.push((text_box.center_y(), vec![text_box])),
        }
    }

    rows.into_iter()
        .map(|(_, mut row)| {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            row.iter()
                .map(|b| b.text.trim())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
