//! Per-type rendering policies.
//!
//! Each function maps one payload to one element. Markup-bearing fields are
//! attached as trusted fragments; URLs and ids go into attributes, which the
//! serializer escapes.

use crate::block::{
    Block, BlockData, BlockKind, CardPosition, EmbedData, HeaderData, ImageData, ListData,
    ParagraphData, QuoteData, ScrollyData, SpacerData, TableData, WarningData,
};
use crate::html::TrustedHtml;
use crate::node::Element;
use crate::video::{extract_youtube_embed_url, player::iframe_element};

use super::RenderConfig;

/// Height of the spacer that stands in for an empty paragraph.
pub const EMPTY_PARAGRAPH_HEIGHT: f64 = 16.0;

/// Marker drawn by delimiter blocks.
pub const DELIMITER_MARK: &str = "* * *";

/// Render one block. Unknown blocks yield `None`.
///
/// The returned kind is the rendering role, which differs from the block's
/// own kind in one case: an effectively empty paragraph renders as a
/// [`BlockKind::Spacer`].
pub fn render_block(block: &Block, config: &RenderConfig) -> Option<(BlockKind, Element)> {
    let rendered = match &block.data {
        BlockData::Header(d) => (BlockKind::Header, header(d)),
        BlockData::Paragraph(d) => paragraph(d),
        BlockData::List(d) => (BlockKind::List, list(d)),
        BlockData::Image(d) => (BlockKind::Image, image(d)),
        BlockData::Quote(d) => (BlockKind::Quote, quote(d)),
        BlockData::Embed(d) => (BlockKind::Embed, embed(d, config)),
        BlockData::Delimiter => (BlockKind::Delimiter, delimiter()),
        BlockData::Warning(d) => (BlockKind::Warning, warning(d)),
        BlockData::Scrolly(d) => (BlockKind::Scrolly, scrolly(d)),
        BlockData::Table(d) => (BlockKind::Table, table(d)),
        BlockData::Spacer(d) => (BlockKind::Spacer, spacer(d)),
        BlockData::Unknown(_) => return None,
    };
    Some(rendered)
}

// =============================================================================
// Header
// =============================================================================

/// Visual size of a header; levels past the last one share the smallest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderSize {
    Display,
    Title,
    Section,
    Subsection,
}

impl HeaderSize {
    pub fn for_level(level: u8) -> Self {
        match level {
            1 => HeaderSize::Display,
            2 => HeaderSize::Title,
            3 => HeaderSize::Section,
            _ => HeaderSize::Subsection,
        }
    }

    pub const fn class(&self) -> &'static str {
        match self {
            HeaderSize::Display => "text-4xl font-bold",
            HeaderSize::Title => "text-3xl font-bold",
            HeaderSize::Section => "text-2xl font-semibold",
            HeaderSize::Subsection => "text-xl font-semibold",
        }
    }
}

fn header(data: &HeaderData) -> Element {
    let level = data.level();
    Element::new(format!("h{}", level.clamp(1, 6)))
        .with_class("block-header")
        .with_class(HeaderSize::for_level(level).class())
        .html(data.text.clone())
}

// =============================================================================
// Paragraph / Spacer
// =============================================================================

fn paragraph(data: &ParagraphData) -> (BlockKind, Element) {
    if data.text.is_blank() {
        return (BlockKind::Spacer, spacer_element(EMPTY_PARAGRAPH_HEIGHT));
    }
    let elem = Element::new("p")
        .with_class("block-paragraph")
        .with_class(data.class_name.as_deref().unwrap_or(""))
        .html(data.text.clone());
    (BlockKind::Paragraph, elem)
}

fn spacer(data: &SpacerData) -> Element {
    spacer_element(data.height())
}

fn spacer_element(height: f64) -> Element {
    Element::new("div")
        .with_class("block-spacer")
        .attr("style", format!("height: {height}px"))
        .attr("aria-hidden", "true")
}

// =============================================================================
// List
// =============================================================================

fn list(data: &ListData) -> Element {
    let (tag, class) = if data.is_ordered() {
        ("ol", "list-decimal")
    } else {
        ("ul", "list-disc")
    };
    let mut elem = Element::new(tag).with_class("block-list").with_class(class);
    for item in &data.items {
        elem.push_elem(Element::new("li").html(TrustedHtml::new(item.display_text())));
    }
    elem
}

// =============================================================================
// Image
// =============================================================================

fn image(data: &ImageData) -> Element {
    let mut frame = Element::new("div").with_class("block-image__frame");
    if data.with_background {
        frame = frame.with_class("with-background");
    }
    if data.with_border {
        frame = frame.with_class("with-border");
    }

    let alt = data.caption().map(TrustedHtml::to_plain_text).unwrap_or_default();
    let frame = frame.child(
        Element::new("img")
            .attr("src", data.src())
            .attr("alt", alt)
            .attr("loading", "lazy"),
    );

    let mut figure = Element::new("figure").with_class("block-image");
    if data.stretched {
        figure = figure.with_class("is-stretched");
    }
    figure
        .child(frame)
        .child_opt(data.caption().map(figcaption))
}

fn figcaption(caption: &TrustedHtml) -> Element {
    Element::new("figcaption").html(caption.clone())
}

// =============================================================================
// Quote / Embed / Delimiter / Warning
// =============================================================================

fn quote(data: &QuoteData) -> Element {
    let layout = if data.is_centered() {
        "quote-center border-t-4 pt-4 text-center"
    } else {
        "quote-left border-l-4 pl-4 text-left"
    };
    Element::new("blockquote")
        .with_class("block-quote")
        .with_class(layout)
        .child(Element::new("div").with_class("block-quote__text").html(data.text.clone()))
        .child_opt(data.caption().map(|c| Element::new("cite").html(c.clone())))
}

fn embed(data: &EmbedData, config: &RenderConfig) -> Element {
    let normalized = config
        .normalize_embeds
        .then(|| extract_youtube_embed_url(&data.embed))
        .flatten();
    let src = normalized.as_deref().unwrap_or(&data.embed);

    let mut frame = iframe_element(src);
    if let Some(width) = data.width {
        frame.set_attr("width", width.to_string());
    }
    if let Some(height) = data.height {
        frame.set_attr("height", height.to_string());
    }

    let mut figure = Element::new("figure").with_class("block-embed");
    if let Some(service) = data.service.as_deref().filter(|s| !s.is_empty()) {
        figure.set_attr("data-service", service);
    }
    figure
        .child(frame)
        .child_opt(data.caption().map(figcaption))
}

fn delimiter() -> Element {
    Element::new("div")
        .with_class("block-delimiter")
        .attr("role", "separator")
        .text(DELIMITER_MARK)
}

fn warning(data: &WarningData) -> Element {
    Element::new("div")
        .with_class("block-warning")
        .attr("role", "note")
        .child(
            Element::new("span")
                .with_class("block-warning__icon")
                .attr("aria-hidden", "true")
                .text("\u{26a0}\u{fe0f}"),
        )
        .child(
            Element::new("div")
                .with_class("block-warning__body")
                .child(
                    Element::new("strong")
                        .with_class("block-warning__title")
                        .html(data.title.clone()),
                )
                .child(
                    Element::new("div")
                        .with_class("block-warning__message")
                        .html(data.message.clone()),
                ),
        )
}

// =============================================================================
// Scrolly
// =============================================================================

impl CardPosition {
    pub const fn class(&self) -> &'static str {
        match self {
            CardPosition::Left => "justify-start",
            CardPosition::Right => "justify-end",
            CardPosition::Center => "justify-center",
        }
    }
}

fn scrolly(data: &ScrollyData) -> Element {
    let mut section = Element::new("section").with_class("block-scrolly");
    for step in &data.steps {
        let background = data.background_for(step).map(|bg| {
            Element::new("img")
                .with_class("scrolly-step__background")
                .attr("src", bg.src.as_str())
                .attr("alt", "")
                .attr("data-background-id", bg.id.as_str())
        });
        let card = Element::new("div")
            .with_class("scrolly-step__track")
            .with_class(step.position().class())
            .child(
                Element::new("div")
                    .with_class("scrolly-step__card")
                    .html(step.text.clone()),
            );
        section.push_elem(
            Element::new("div")
                .with_class("scrolly-step")
                .attr("data-trigger-id", step.trigger_id.as_str())
                .child_opt(background)
                .child(card),
        );
    }
    section
}

// =============================================================================
// Table
// =============================================================================

fn table(data: &TableData) -> Element {
    let mut rows = data.content.iter();
    let mut table = Element::new("table");

    if data.with_headings {
        if let Some(first) = rows.next() {
            table.push_elem(Element::new("thead").child(row("th", first)));
        }
    }

    let mut body = Element::new("tbody");
    for cells in rows {
        body.push_elem(row("td", cells));
    }
    table.push_elem(body);

    Element::new("div").with_class("block-table").child(table)
}

fn row(cell_tag: &str, cells: &[TrustedHtml]) -> Element {
    let mut tr = Element::new("tr");
    for cell in cells {
        tr.push_elem(Element::new(cell_tag).html(cell.clone()));
    }
    tr
}
