//! Block list → paginated PDF bytes.
//!
//! Output depends only on the blocks: no creation date, no document ID and no
//! compression, so the same blocks always serialize to the same bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::errors::AppError;
use crate::layout::{get_metrics, wrap_lines, FontFace};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 54.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const LINE_SPACING: f32 = 1.25;
const BULLET_INDENT: f32 = 12.0;
const ROW_GUTTER: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
}

impl TextStyle {
    pub const fn regular(size: f32) -> Self {
        TextStyle {
            face: FontFace::Helvetica,
            size,
        }
    }

    pub const fn bold(size: f32) -> Self {
        TextStyle {
            face: FontFace::HelveticaBold,
            size,
        }
    }

    fn line_height(self) -> f32 {
        self.size * LINE_SPACING
    }
}

pub const BODY: TextStyle = TextStyle::regular(10.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One vertical unit of a document. Templates produce these; `write_pdf` lays
/// them out top to bottom and breaks pages as needed.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text {
        text: String,
        style: TextStyle,
        align: Align,
    },
    /// Bold `left`, regular `right` flush with the right margin on the first
    /// line. A `right` wider than half the content width moves below `left`.
    Row {
        left: String,
        right: String,
        size: f32,
    },
    /// Section title with a rule underneath.
    Heading(String),
    Bullet(String),
    Gap(f32),
}

impl Block {
    pub fn text(text: impl Into<String>) -> Self {
        Block::Text {
            text: text.into(),
            style: BODY,
            align: Align::Left,
        }
    }

    pub fn styled(text: impl Into<String>, style: TextStyle, align: Align) -> Self {
        Block::Text {
            text: text.into(),
            style,
            align,
        }
    }
}

/// Lays out `blocks` on US Letter pages and serializes the document.
pub fn write_pdf(blocks: &[Block]) -> Result<Vec<u8>, AppError> {
    let mut pages = PageBuilder::new();
    for block in blocks {
        pages.place(block);
    }
    build_document(pages.finish())
}

struct PageBuilder {
    done: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    /// Top of the next line, in PDF user space (origin bottom-left).
    y: f32,
}

impl PageBuilder {
    fn new() -> Self {
        PageBuilder {
            done: Vec::new(),
            ops: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn at_page_top(&self) -> bool {
        self.y >= PAGE_HEIGHT - MARGIN
    }

    fn ensure_room(&mut self, height: f32) {
        if self.y - height < MARGIN && !self.at_page_top() {
            self.done.push(std::mem::take(&mut self.ops));
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn place(&mut self, block: &Block) {
        match block {
            Block::Text { text, style, align } => {
                for paragraph_line in text.lines() {
                    let lines = wrap_lines(
                        paragraph_line,
                        get_metrics(style.face),
                        style.size,
                        CONTENT_WIDTH,
                    );
                    for line in lines {
                        self.ensure_room(style.line_height());
                        let x = match align {
                            Align::Left => MARGIN,
                            Align::Center => {
                                let width = get_metrics(style.face).measure_pt(&line, style.size);
                                MARGIN + (CONTENT_WIDTH - width).max(0.0) / 2.0
                            }
                        };
                        self.show_line(*style, x, &line);
                    }
                }
            }
            Block::Row { left, right, size } => {
                let left_style = TextStyle::bold(*size);
                let right_style = TextStyle::regular(*size);
                let right_metrics = get_metrics(right_style.face);
                let right_width = right_metrics.measure_pt(right, *size);

                if right_width > CONTENT_WIDTH / 2.0 - ROW_GUTTER {
                    // no room beside the left column: it goes underneath, flush right
                    for line in wrap_lines(left, get_metrics(left_style.face), *size, CONTENT_WIDTH) {
                        self.ensure_room(left_style.line_height());
                        self.show_line(left_style, MARGIN, &line);
                    }
                    for line in wrap_lines(right, right_metrics, *size, CONTENT_WIDTH) {
                        self.ensure_room(right_style.line_height());
                        let width = right_metrics.measure_pt(&line, *size);
                        self.show_line(right_style, PAGE_WIDTH - MARGIN - width, &line);
                    }
                    return;
                }

                let left_width = if right.is_empty() {
                    CONTENT_WIDTH
                } else {
                    CONTENT_WIDTH - right_width - ROW_GUTTER
                };
                let lines = wrap_lines(left, get_metrics(left_style.face), *size, left_width);
                for (i, line) in lines.iter().enumerate() {
                    self.ensure_room(left_style.line_height());
                    if i == 0 && !right.is_empty() {
                        let x = PAGE_WIDTH - MARGIN - right_width;
                        let baseline = self.y - *size;
                        self.text_op(right_style, x, baseline, right);
                    }
                    self.show_line(left_style, MARGIN, line);
                }
            }
            Block::Heading(title) => {
                let style = TextStyle::bold(12.0);
                if !self.at_page_top() {
                    self.y -= 8.0;
                }
                // keep the heading with at least one line of its section
                self.ensure_room(style.line_height() + 4.0 + BODY.line_height());
                self.show_line(style, MARGIN, title);
                let rule_y = self.y + 2.0;
                self.ops.push(Operation::new("w", vec![0.5_f32.into()]));
                self.ops
                    .push(Operation::new("m", vec![MARGIN.into(), rule_y.into()]));
                self.ops.push(Operation::new(
                    "l",
                    vec![(PAGE_WIDTH - MARGIN).into(), rule_y.into()],
                ));
                self.ops.push(Operation::new("S", vec![]));
                self.y -= 4.0;
            }
            Block::Bullet(text) => {
                let width = CONTENT_WIDTH - BULLET_INDENT;
                let lines = wrap_lines(text, get_metrics(BODY.face), BODY.size, width);
                for (i, line) in lines.iter().enumerate() {
                    self.ensure_room(BODY.line_height());
                    if i == 0 {
                        let baseline = self.y - BODY.size;
                        self.text_op(BODY, MARGIN + 2.0, baseline, "\u{2022}");
                    }
                    self.show_line(BODY, MARGIN + BULLET_INDENT, line);
                }
            }
            Block::Gap(height) => {
                if !self.at_page_top() {
                    self.y -= *height;
                }
            }
        }
    }

    /// Draws one already-wrapped line and advances the cursor.
    fn show_line(&mut self, style: TextStyle, x: f32, text: &str) {
        let baseline = self.y - style.size;
        self.text_op(style, x, baseline, text);
        self.y -= style.line_height();
    }

    fn text_op(&mut self, style: TextStyle, x: f32, baseline: f32, text: &str) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![style.face.resource_name().into(), style.size.into()],
        ));
        self.ops
            .push(Operation::new("Td", vec![x.into(), baseline.into()]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(text))],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.ops.is_empty() || self.done.is_empty() {
            self.done.push(self.ops);
        }
        self.done
    }
}

fn font_dictionary(face: FontFace) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn build_document(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, AppError> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(FontFace::Helvetica));
    let bold_id = doc.add_object(font_dictionary(FontFace::HelveticaBold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontFace::Helvetica.resource_name() => regular_id,
            FontFace::HelveticaBold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let encoded = Content { operations }
            .encode()
            .map_err(|e| AppError::Render(format!("failed to encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH as i64),
                Object::Integer(PAGE_HEIGHT as i64),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| AppError::Render(format!("failed to serialize PDF: {e}")))?;
    Ok(bytes)
}

/// Maps text to WinAnsiEncoding bytes. Characters outside the code page
/// become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\t' => b' ',
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            _ => b'?',
        })
        .collect()
}
