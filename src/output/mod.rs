pub mod report;

use std::collections::HashMap;

use colored::Colorize;
use serde::Serialize;

use crate::binder::{Field, Renderer, SlotBindings};
use crate::controls::{ControlKind, NavBar};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// In-memory page with the fixed card layout. Regions that were never
/// declared are reported as missing to the binder.
#[derive(Clone, Debug)]
pub struct PageView {
    layout: SlotBindings,
    texts: HashMap<String, String>,
    images: HashMap<String, Option<ImageView>>,
    controls: NavBar,
    redraws: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub slot: usize,
    pub name: String,
    pub affiliation: String,
    pub clan: String,
    pub abilities: String,
    pub image: Option<ImageView>,
}

impl CardView {
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.image.is_none()
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PageRecord {
    pub page: Option<usize>,
    pub cards: Vec<CardView>,
    pub controls: NavBar,
}

impl PageView {
    pub fn standard(page_size: usize) -> Self {
        let layout = SlotBindings::standard(page_size);
        let mut texts = HashMap::new();
        let mut images = HashMap::new();
        for (_, regions) in layout.iter() {
            for field in Field::TEXT {
                texts.insert(regions.text(field).to_string(), String::new());
            }
            images.insert(regions.image.clone(), None);
        }
        Self {
            layout,
            texts,
            images,
            controls: NavBar::default(),
            redraws: 0,
        }
    }

    pub fn remove_region(&mut self, region: &str) {
        self.texts.remove(region);
        self.images.remove(region);
    }

    pub fn text(&self, region: &str) -> Option<&str> {
        self.texts.get(region).map(String::as_str)
    }

    pub fn image(&self, region: &str) -> Option<&ImageView> {
        self.images.get(region).and_then(Option::as_ref)
    }

    pub fn controls(&self) -> &NavBar {
        &self.controls
    }

    /// How many times the navigation bar has been rebuilt.
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    pub fn cards(&self) -> Vec<CardView> {
        let text = |id: &str| self.text(id).unwrap_or_default().to_string();
        self.layout
            .iter()
            .map(|(slot, regions)| CardView {
                slot: slot.index(),
                name: text(&regions.name),
                affiliation: text(&regions.affiliation),
                clan: text(&regions.clan),
                abilities: text(&regions.abilities),
                image: self.image(&regions.image).cloned(),
            })
            .collect()
    }

    pub fn record(&self) -> PageRecord {
        PageRecord {
            page: self.controls.active_page(),
            cards: self.cards(),
            controls: self.controls.clone(),
        }
    }
}

impl Renderer for PageView {
    fn write_text(&mut self, region: &str, text: &str) -> bool {
        match self.texts.get_mut(region) {
            Some(slot) => {
                *slot = text.to_string();
                true
            }
            None => false,
        }
    }

    fn set_image(&mut self, region: &str, url: &str, alt: &str) -> bool {
        match self.images.get_mut(region) {
            Some(slot) => {
                *slot = Some(ImageView {
                    url: url.to_string(),
                    alt: alt.to_string(),
                });
                true
            }
            None => false,
        }
    }

    fn clear_image(&mut self, region: &str) -> bool {
        match self.images.get_mut(region) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    fn render_controls(&mut self, bar: &NavBar) {
        self.controls = bar.clone();
        self.redraws += 1;
    }
}

pub fn render_nav_line(bar: &NavBar) -> String {
    let mut parts: Vec<String> = Vec::new();
    for c in bar.controls.iter() {
        let label = match c.kind {
            ControlKind::Previous => format!("< {}", c.label),
            ControlKind::Next => format!("{} >", c.label),
            ControlKind::Page(_) if c.active => format!("[{}]", c.label),
            ControlKind::Page(_) => format!(" {} ", c.label),
        };
        let label = if !c.enabled {
            label.dimmed().to_string()
        } else if c.active {
            label.bold().yellow().to_string()
        } else {
            label
        };
        parts.push(label);
    }
    parts.join(" ")
}

pub fn render_text(view: &PageView) -> Vec<u8> {
    let mut out = String::new();
    for card in view.cards().iter().filter(|c| !c.is_blank()) {
        out.push_str(&format!(
            "{} {}\n",
            format!("[{}]", card.slot).bold().white(),
            card.name.bold().cyan()
        ));
        out.push_str(&format!("    {}\n", card.affiliation));
        out.push_str(&format!("    {}\n", card.clan));
        out.push_str(&format!("    {}\n", card.abilities));
        if let Some(image) = card.image.as_ref() {
            out.push_str(&format!("    {}\n", image.url.dimmed()));
        }
        out.push('\n');
    }
    out.push_str(&render_nav_line(view.controls()));
    out.push('\n');
    out.into_bytes()
}

pub fn render_json(view: &PageView) -> Vec<u8> {
    serde_json::to_vec_pretty(&view.record()).unwrap_or_else(|_| b"{}\n".to_vec())
}

pub fn render_html(view: &PageView) -> Vec<u8> {
    report::render_html(view)
}

pub fn render(view: &PageView, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(view),
        OutputFormat::Json => render_json(view),
        OutputFormat::Html => render_html(view),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls;

    #[test]
    fn format_parse_and_inference() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("xml"), None);
        assert_eq!(infer_format_from_path("page.htm"), Some(OutputFormat::Html));
        assert_eq!(infer_format_from_path("page"), None);
    }

    #[test]
    fn unknown_regions_are_reported() {
        let mut view = PageView::standard(2);
        assert!(view.write_text("personaje-2", "Shikamaru"));
        assert!(!view.write_text("personaje-3", "Choji"));
        assert!(!view.set_image("card-image-3", "x", "y"));
    }

    #[test]
    fn json_record_lists_every_slot() {
        let mut view = PageView::standard(4);
        view.write_text("personaje-1", "Sakura Haruno");
        view.render_controls(&controls::rebuild(2, 1));
        let value: serde_json::Value = serde_json::from_slice(&render_json(&view)).unwrap();
        assert_eq!(value["page"], 1);
        assert_eq!(value["cards"].as_array().unwrap().len(), 4);
        assert_eq!(value["cards"][0]["name"], "Sakura Haruno");
        assert_eq!(value["controls"]["controls"][0]["kind"], "previous");
    }

    #[test]
    fn text_skips_blank_cards() {
        colored::control::set_override(false);
        let mut view = PageView::standard(4);
        view.write_text("personaje-1", "Neji Hyuga");
        view.render_controls(&controls::rebuild(1, 1));
        let text = String::from_utf8(render_text(&view)).unwrap();
        assert!(text.contains("Neji Hyuga"));
        assert!(!text.contains("[2]"));
        assert!(text.contains("[1]"));
        assert!(text.contains("< Anterior"));
    }
}
