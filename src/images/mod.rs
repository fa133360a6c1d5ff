pub mod validate;

use std::collections::HashMap;

use crate::binder::Renderer;
use crate::repository::Character;

pub use validate::{AcceptAll, HttpImageValidator, ImageValidator};

pub const DEFAULT_IMAGE: &str = "./assets/default-image.jpg";

const JIRAIYA_IMAGES: [&str; 2] = [
    "https://preview.redd.it/ebn2tdznx1pd1.jpeg?auto=webp&s=c87056f6fed51dccc88ed7fadcaa41b350d0565b",
    "https://s0.smartresize.com/wallpaper/287/15/HD-wallpaper-sage-mode-jiraiya-anime-naruto.jpg",
];

/// Extra images, keyed by exact character name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: HashMap<String, Vec<String>>,
}

impl OverrideTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.insert(
            "Jiraiya",
            JIRAIYA_IMAGES.iter().map(|s| s.to_string()).collect(),
        );
        table
    }

    /// Replaces any existing entry for `name`.
    pub fn insert(&mut self, name: &str, images: Vec<String>) {
        let images: Vec<String> = images
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if images.is_empty() {
            self.entries.remove(name);
        } else {
            self.entries.insert(name.to_string(), images);
        }
    }

    pub fn extend(&mut self, other: HashMap<String, Vec<String>>) {
        for (name, images) in other {
            self.insert(&name, images);
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }
}

/// The image sequence a card rotates through. Never empty.
pub fn resolve_images(
    character: &Character,
    overrides: &OverrideTable,
    default_image: &str,
) -> Vec<String> {
    let api: Vec<&String> = character
        .images
        .iter()
        .filter(|s| !s.trim().is_empty())
        .collect();

    let extra = character.name.as_deref().and_then(|n| overrides.get(n));
    let mut out: Vec<String> = match extra {
        Some(extra) => {
            let mut seq: Vec<String> = api.first().map(|s| s.to_string()).into_iter().collect();
            for url in extra {
                if seq.first() != Some(url) {
                    seq.push(url.clone());
                }
            }
            seq
        }
        None => api.into_iter().cloned().collect(),
    };
    if out.is_empty() {
        out.push(default_image.to_string());
    }
    out
}

pub fn alt_text(character: &Character) -> String {
    let name = character
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or("Personaje desconocido");
    format!("Imagen de {name}")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageCycle {
    images: Vec<String>,
    cursor: usize,
    alt: String,
}

impl ImageCycle {
    /// An empty `images` list falls back to the single `placeholder` entry.
    pub fn new(mut images: Vec<String>, alt: String, placeholder: &str) -> Self {
        if images.is_empty() {
            images.push(placeholder.to_string());
        }
        Self {
            images,
            cursor: 0,
            alt,
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &str {
        &self.images[self.cursor]
    }

    pub fn alt(&self) -> &str {
        &self.alt
    }

    pub fn advance(&mut self) -> &str {
        self.cursor = (self.cursor + 1) % self.images.len();
        self.current()
    }
}

/// Resolves and rotates card images.
pub struct ImageRotator {
    overrides: OverrideTable,
    default_image: String,
    validator: Box<dyn ImageValidator>,
}

impl std::fmt::Debug for ImageRotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRotator")
            .field("overrides", &self.overrides)
            .field("default_image", &self.default_image)
            .finish_non_exhaustive()
    }
}

impl ImageRotator {
    pub fn new(
        overrides: OverrideTable,
        default_image: impl Into<String>,
        validator: Box<dyn ImageValidator>,
    ) -> Self {
        Self {
            overrides,
            default_image: default_image.into(),
            validator,
        }
    }

    /// Builds a fresh cycle for `character` and shows its first image.
    pub fn attach(
        &self,
        region: &str,
        character: &Character,
        renderer: &mut dyn Renderer,
    ) -> ImageCycle {
        let images = resolve_images(character, &self.overrides, &self.default_image);
        if character.images.iter().all(|s| s.trim().is_empty()) {
            tracing::debug!(name = ?character.name, "no API images for character");
        }
        let cycle = ImageCycle::new(images, alt_text(character), &self.default_image);
        self.show(region, &cycle, renderer);
        cycle
    }

    pub fn activate(&self, region: &str, cycle: &mut ImageCycle, renderer: &mut dyn Renderer) {
        cycle.advance();
        self.show(region, cycle, renderer);
    }

    fn show(&self, region: &str, cycle: &ImageCycle, renderer: &mut dyn Renderer) {
        let url = if self.validator.accept(cycle.current()) {
            cycle.current()
        } else {
            tracing::warn!(url = cycle.current(), "image failed validation, using placeholder");
            self.default_image.as_str()
        };
        if !renderer.set_image(region, url, cycle.alt()) {
            tracing::warn!(region, "image region not found, skipping");
        }
    }
}
