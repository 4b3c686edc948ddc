// Minimal PDF canvas over pdf-writer: A4 pages, Helvetica, text and boxes.
//
// Coordinates are in points with the origin at the bottom-left corner.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

pub const A4_WIDTH: f32 = 595.0;
pub const A4_HEIGHT: f32 = 842.0;
pub const MM: f32 = 72.0 / 25.4;

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");
pub const CELL_PADDING: f32 = 2.0;

// Average Helvetica glyph advance as a fraction of the font size.
const AVERAGE_GLYPH_WIDTH: f32 = 0.5;
const LINE_SPACING: f32 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

pub struct PdfCanvas {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    regular_font_id: Ref,
    bold_font_id: Ref,
    page_refs: Vec<Ref>,
    next_id: i32,
    content_id: Ref,
    content: Content,
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfCanvas {
    /// New document with its first page already open.
    pub fn new() -> Self {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let regular_font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);

        pdf.type1_font(regular_font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        let mut canvas = Self {
            pdf,
            catalog_id,
            pages_id,
            regular_font_id,
            bold_font_id,
            page_refs: Vec::new(),
            next_id: 5,
            content_id: Ref::new(5),
            content: Content::new(),
        };
        canvas.open_page();
        canvas
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Closes the current page and starts a new one.
    pub fn add_page(&mut self) {
        self.flush_page();
        self.open_page();
    }

    fn open_page(&mut self) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, A4_WIDTH, A4_HEIGHT))
            .contents(content_id);
        page.resources()
            .fonts()
            .pair(REGULAR, self.regular_font_id)
            .pair(BOLD, self.bold_font_id);
        drop(page);

        self.content_id = content_id;
    }

    fn flush_page(&mut self) {
        let content = std::mem::replace(&mut self.content, Content::new());
        self.pdf.stream(self.content_id, &content.finish());
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    pub fn text(&mut self, x: f32, y: f32, size: f32, weight: Weight, text: &str) {
        let font = match weight {
            Weight::Regular => REGULAR,
            Weight::Bold => BOLD,
        };
        let encoded = win_ansi(text);
        let content = &mut self.content;
        content.begin_text();
        content.set_font(font, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&encoded));
        content.end_text();
    }

    /// Bordered cell of width `w` and height `h` whose top-left corner is (`x`, `top`).
    /// Text too wide for the cell is cut with an ellipsis.
    #[allow(clippy::too_many_arguments)]
    pub fn cell(
        &mut self,
        x: f32,
        top: f32,
        w: f32,
        h: f32,
        size: f32,
        weight: Weight,
        align: Align,
        text: &str,
    ) {
        let fitted = fit_to_width(text, w - 2.0 * CELL_PADDING, size);
        self.lines_cell(x, top, w, h, size, weight, align, &[fitted]);
    }

    /// Bordered cell holding `lines` stacked and centred vertically.
    ///
    /// Size `h` with [`text_block_height`] so every line lands inside the border.
    #[allow(clippy::too_many_arguments)]
    pub fn lines_cell(
        &mut self,
        x: f32,
        top: f32,
        w: f32,
        h: f32,
        size: f32,
        weight: Weight,
        align: Align,
        lines: &[String],
    ) {
        let leading = size * LINE_SPACING;
        let block = lines.len() as f32 * leading;
        let mut baseline = top - (h - block) / 2.0 - leading / 2.0 - size * 0.35;
        for line in lines {
            let text_width = estimate_width(line, size);
            let text_x = match align {
                Align::Left => x + CELL_PADDING,
                Align::Center => x + (w - text_width) / 2.0,
                Align::Right => x + w - CELL_PADDING - text_width,
            };
            self.text(text_x, baseline, size, weight, line);
            baseline -= leading;
        }

        let content = &mut self.content;
        content.save_state();
        content.set_line_width(0.5);
        content.rect(x, top - h, w, h);
        content.stroke();
        content.restore_state();
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.flush_page();
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .count(self.page_refs.len() as i32)
            .kids(self.page_refs.iter().copied());
        self.pdf.finish()
    }
}

pub fn estimate_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVERAGE_GLYPH_WIDTH
}

/// Height of `lines` lines of text plus the cell padding above and below.
pub fn text_block_height(lines: usize, size: f32) -> f32 {
    lines as f32 * size * LINE_SPACING + 2.0 * CELL_PADDING
}

fn max_chars(width: f32, size: f32) -> usize {
    (width / (size * AVERAGE_GLYPH_WIDTH)).floor() as usize
}

/// Truncates `text` with an ellipsis so that it fits in `width` points.
pub fn fit_to_width(text: &str, width: f32, size: f32) -> String {
    if estimate_width(text, size) <= width {
        return text.to_string();
    }
    let kept: String = text
        .chars()
        .take(max_chars(width, size).saturating_sub(3))
        .collect();
    format!("{}...", kept.trim_end())
}

/// Breaks `text` into lines no wider than `width` points, keeping every word.
///
/// Lines break between words; a word longer than a whole line is split.
/// Always returns at least one line.
pub fn wrap_to_width(text: &str, width: f32, size: f32) -> Vec<String> {
    let limit = max_chars(width, size).max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_chars = 0;
        for word in paragraph.split_whitespace() {
            let mut rest: Vec<char> = word.chars().collect();
            loop {
                let separator = usize::from(line_chars > 0);
                if line_chars + separator + rest.len() <= limit {
                    if separator == 1 {
                        line.push(' ');
                    }
                    line.extend(rest.iter());
                    line_chars += separator + rest.len();
                    break;
                }
                if line_chars > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_chars = 0;
                    continue;
                }
                let tail = rest.split_off(limit);
                lines.push(rest.into_iter().collect());
                rest = tail;
            }
        }
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// Helvetica is a simple font: one byte per glyph. Latin-1 maps straight through.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
