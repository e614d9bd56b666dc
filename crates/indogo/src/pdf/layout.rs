//! A small flow layout on top of PDF content-stream operators.
//!
//! Blocks are placed top to bottom inside the page margins. When a block does
//! not fit in the space left on the page, a new page is started.

use lopdf::content::Operation;
use lopdf::Object;

use super::metrics::{sanitize, text_width, wrap};

/// A4 width in points.
pub const PAGE_WIDTH: f32 = 595.0;
/// A4 height in points.
pub const PAGE_HEIGHT: f32 = 842.0;

const LEADING: f32 = 1.2;
const CELL_PADDING: f32 = 2.0;
const BORDER_WIDTH: f32 = 0.5;

/// Black.
pub const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
/// Muted gray used for labels.
pub const GRAY: [f32; 3] = [0.5, 0.5, 0.5];

/// Font faces, each registered under its own resource name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
    /// Helvetica-Oblique.
    Italic,
}

impl Font {
    /// All faces, in resource order.
    pub const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Italic];

    /// Resource name used in content streams.
    #[must_use]
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Italic => "F3",
        }
    }

    /// `BaseFont` of the standard Type 1 face.
    #[must_use]
    pub fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Italic => "Helvetica-Oblique",
        }
    }
}

/// Horizontal alignment of text within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Flush left.
    #[default]
    Left,
    /// Centred.
    Center,
    /// Flush right.
    Right,
    /// Stretched to both edges, except the last line.
    Justified,
}

/// A run of text with its styling and vertical margins.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    /// The text; wrapped to the available width.
    pub text: String,
    /// Font face.
    pub font: Font,
    /// Font size in points.
    pub size: f32,
    /// Fill colour as unit RGB.
    pub color: [f32; 3],
    /// Horizontal alignment.
    pub align: Align,
    /// Space above, in points.
    pub margin_top: f32,
    /// Space below, in points.
    pub margin_bottom: f32,
}

impl Paragraph {
    /// Regular 12pt black left-aligned text.
    #[must_use]
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: sanitize(text.as_ref()),
            font: Font::Regular,
            size: 12.0,
            color: BLACK,
            align: Align::Left,
            margin_top: 0.0,
            margin_bottom: 0.0,
        }
    }

    /// Set the font size.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Use the bold face.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.font = Font::Bold;
        self
    }

    /// Use the oblique face.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.font = Font::Italic;
        self
    }

    /// Set the fill colour.
    #[must_use]
    pub fn color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Set the alignment.
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set the space above.
    #[must_use]
    pub fn margin_top(mut self, margin: f32) -> Self {
        self.margin_top = margin;
        self
    }

    /// Set the space below.
    #[must_use]
    pub fn margin_bottom(mut self, margin: f32) -> Self {
        self.margin_bottom = margin;
        self
    }

    fn line_height(&self) -> f32 {
        self.size * LEADING
    }

    fn lines(&self, width: f32) -> Vec<String> {
        wrap(&self.text, self.font, self.size, width)
    }

    /// Height of the wrapped text plus margins at `width`.
    #[allow(clippy::cast_precision_loss)]
    fn height(&self, width: f32) -> f32 {
        self.margin_top + self.lines(width).len() as f32 * self.line_height() + self.margin_bottom
    }
}

/// Lays out blocks onto pages, producing one operation list per page.
#[derive(Debug)]
pub struct Composer {
    margin: f32,
    cursor: f32,
    pages: Vec<Vec<Operation>>,
}

fn real(value: f32) -> Object {
    value.into()
}

fn rgb(color: [f32; 3]) -> Vec<Object> {
    color.iter().copied().map(real).collect()
}

impl Composer {
    /// Start an empty first page with uniform margins.
    #[must_use]
    pub fn new(margin: f32) -> Self {
        Self {
            margin,
            cursor: PAGE_HEIGHT - margin,
            pages: vec![Vec::new()],
        }
    }

    /// Usable width between the side margins.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        PAGE_WIDTH - 2.0 * self.margin
    }

    /// Vertical position of the next block's top edge.
    #[must_use]
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Number of pages started so far.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn ensure_space(&mut self, height: f32) {
        let at_top = (self.cursor - (PAGE_HEIGHT - self.margin)).abs() < f32::EPSILON;
        if self.cursor - height < self.margin && !at_top {
            self.pages.push(Vec::new());
            self.cursor = PAGE_HEIGHT - self.margin;
        }
    }

    /// Advance the cursor by `height` points without drawing.
    pub fn skip(&mut self, height: f32) {
        self.ensure_space(height);
        self.cursor -= height;
    }

    /// Empty lines at the default 12pt size.
    pub fn blank_lines(&mut self, count: u8) {
        self.skip(f32::from(count) * 12.0 * LEADING);
    }

    /// Place a paragraph spanning the content width.
    pub fn paragraph(&mut self, paragraph: &Paragraph) {
        self.paragraph_with_background(paragraph, None);
    }

    /// Place a paragraph over a filled band of `background` colour.
    ///
    /// A paragraph that does not fit in the space left moves to a new page;
    /// one taller than a page flows line by line across pages, with the band
    /// drawn behind each page's part.
    pub fn paragraph_with_background(
        &mut self,
        paragraph: &Paragraph,
        background: Option<[f32; 3]>,
    ) {
        let width = self.content_width();
        self.ensure_space(paragraph.height(width));

        self.cursor -= paragraph.margin_top;
        let lines = paragraph.lines(width);
        let last = lines.len().saturating_sub(1);
        let left = self.margin;
        let line_height = paragraph.line_height();

        for (i, line) in lines.iter().enumerate() {
            self.ensure_space(line_height);
            if let Some(color) = background {
                self.fill_rect(left, self.cursor - line_height, width, line_height, color);
            }
            self.cursor = self.draw_line(paragraph, line, i == last, left, self.cursor, width);
        }
        self.cursor -= paragraph.margin_bottom;
    }

    /// Place a single-row table of `cells`, each a stack of paragraphs.
    ///
    /// The table is `width` points wide, centred, with equal columns and a
    /// thin border around every cell.
    pub fn table_row(&mut self, width: f32, cells: &[Vec<Paragraph>]) {
        if cells.is_empty() {
            return;
        }

        #[allow(clippy::cast_precision_loss)]
        let column = width / cells.len() as f32;
        let inner = column - 2.0 * CELL_PADDING;
        let row_height = cells
            .iter()
            .map(|stack| stack.iter().map(|p| p.height(inner)).sum::<f32>())
            .fold(0.0_f32, f32::max)
            + 2.0 * CELL_PADDING;

        self.ensure_space(row_height);
        let left = self.margin + (self.content_width() - width) / 2.0;
        let top = self.cursor;

        for (i, stack) in cells.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let x = left + i as f32 * column;
            self.stroke_rect(x, top - row_height, column, row_height);

            let mut y = top - CELL_PADDING;
            for paragraph in stack {
                y -= paragraph.margin_top;
                let lines = paragraph.lines(inner);
                y = self.draw_lines(paragraph, &lines, x + CELL_PADDING, y, inner);
                y -= paragraph.margin_bottom;
            }
        }

        self.cursor = top - row_height;
    }

    /// Draw wrapped lines starting with the first line's top at `top`;
    /// returns the bottom of the last line.
    fn draw_lines(
        &mut self,
        paragraph: &Paragraph,
        lines: &[String],
        left: f32,
        top: f32,
        width: f32,
    ) -> f32 {
        let last = lines.len().saturating_sub(1);
        lines.iter().enumerate().fold(top, |top, (i, line)| {
            self.draw_line(paragraph, line, i == last, left, top, width)
        })
    }

    /// Draw one line with its top at `top`; returns the line's bottom.
    fn draw_line(
        &mut self,
        paragraph: &Paragraph,
        line: &str,
        is_last: bool,
        left: f32,
        top: f32,
        width: f32,
    ) -> f32 {
        let line_width = text_width(line, paragraph.font, paragraph.size);
        let mut word_spacing = 0.0;
        let x = match paragraph.align {
            Align::Left => left,
            Align::Center => left + (width - line_width) / 2.0,
            Align::Right => left + width - line_width,
            Align::Justified => {
                let gaps = line.matches(' ').count();
                if !is_last && gaps > 0 {
                    #[allow(clippy::cast_precision_loss)]
                    let spread = (width - line_width) / gaps as f32;
                    word_spacing = spread;
                }
                left
            }
        };

        let baseline = top - paragraph.size;
        self.text(paragraph, line, x.max(left), baseline, word_spacing);
        top - paragraph.line_height()
    }

    fn text(&mut self, paragraph: &Paragraph, line: &str, x: f32, y: f32, word_spacing: f32) {
        let ops = self.ops();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![paragraph.font.resource_name().into(), real(paragraph.size)],
        ));
        ops.push(Operation::new("rg", rgb(paragraph.color)));
        if word_spacing > 0.0 {
            ops.push(Operation::new("Tw", vec![real(word_spacing)]));
        }
        ops.push(Operation::new("Td", vec![real(x), real(y)]));
        ops.push(Operation::new("Tj", vec![Object::string_literal(line)]));
        if word_spacing > 0.0 {
            ops.push(Operation::new("Tw", vec![real(0.0)]));
        }
        ops.push(Operation::new("ET", vec![]));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [f32; 3]) {
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("rg", rgb(color)));
        ops.push(Operation::new(
            "re",
            vec![real(x), real(y), real(width), real(height)],
        ));
        ops.push(Operation::new("f", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("w", vec![real(BORDER_WIDTH)]));
        ops.push(Operation::new("RG", rgb(BLACK)));
        ops.push(Operation::new(
            "re",
            vec![real(x), real(y), real(width), real(height)],
        ));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// Finish layout and hand back each page's operations.
    #[must_use]
    pub fn finish(self) -> Vec<Vec<Operation>> {
        self.pages
    }
}
