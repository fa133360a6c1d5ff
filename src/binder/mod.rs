use crate::controls::NavBar;
use crate::repository::{Character, Clan};

pub const NAME_FALLBACK: &str = "Nombre no disponible";
pub const AFFILIATION_PREFIX: &str = "Aldeas donde estuvo: ";
pub const AFFILIATION_FALLBACK: &str = "Desconocida";
pub const CLAN_PREFIX: &str = "Clan: ";
pub const CLAN_FALLBACK: &str = "Desconocido";
pub const ABILITIES_PREFIX: &str = "Habilidades: ";
pub const ABILITIES_FALLBACK: &str = "No disponibles";

/// The surface cards and controls are drawn on.
///
/// Writes return `false` when the surface has no region with that id.
pub trait Renderer {
    fn write_text(&mut self, region: &str, text: &str) -> bool;
    fn set_image(&mut self, region: &str, url: &str, alt: &str) -> bool;
    fn clear_image(&mut self, region: &str) -> bool;
    /// Replaces whatever navigation bar was rendered before.
    fn render_controls(&mut self, bar: &NavBar);
}

/// 1-based display position on a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardSlot(usize);

impl CardSlot {
    pub fn new(index: usize, page_size: usize) -> Option<Self> {
        (1..=page_size).contains(&index).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Affiliation,
    Clan,
    Abilities,
}

impl Field {
    pub const TEXT: [Field; 4] = [Field::Name, Field::Affiliation, Field::Clan, Field::Abilities];
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotRegions {
    pub name: String,
    pub affiliation: String,
    pub clan: String,
    pub abilities: String,
    pub image: String,
}

impl SlotRegions {
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Affiliation => &self.affiliation,
            Field::Clan => &self.clan,
            Field::Abilities => &self.abilities,
        }
    }
}

/// Slot → region id table, built once per session.
#[derive(Clone, Debug)]
pub struct SlotBindings {
    slots: Vec<SlotRegions>,
}

impl SlotBindings {
    pub fn standard(page_size: usize) -> Self {
        let slots = (1..=page_size)
            .map(|n| SlotRegions {
                name: format!("personaje-{n}"),
                affiliation: format!("aldea-personaje{n}"),
                clan: format!("clan-personaje{n}"),
                abilities: format!("habilidades-personaje{n}"),
                image: format!("card-image-{n}"),
            })
            .collect();
        Self { slots }
    }

    pub fn slot(&self, slot: CardSlot) -> Option<&SlotRegions> {
        self.slots.get(slot.index() - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardSlot, &SlotRegions)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, regions)| (CardSlot(i + 1), regions))
    }
}

fn non_empty_join(items: Option<&Vec<String>>, sep: &str) -> Option<String> {
    let joined = items?.join(sep);
    (!joined.is_empty()).then_some(joined)
}

pub fn name_text(character: &Character) -> String {
    character
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(NAME_FALLBACK)
        .to_string()
}

pub fn affiliation_text(character: &Character) -> String {
    let joined = non_empty_join(character.affiliations.as_ref(), ", ");
    format!(
        "{AFFILIATION_PREFIX}{}",
        joined.as_deref().unwrap_or(AFFILIATION_FALLBACK)
    )
}

pub fn clan_text(character: &Character) -> String {
    let clan = match character.clan.as_ref() {
        Some(Clan::Single(s)) if !s.is_empty() => Some(s.clone()),
        Some(Clan::Many(list)) => non_empty_join(Some(list), ","),
        _ => None,
    };
    format!("{CLAN_PREFIX}{}", clan.as_deref().unwrap_or(CLAN_FALLBACK))
}

pub fn abilities_text(character: &Character) -> String {
    let joined = non_empty_join(character.nature_types.as_ref(), ", ");
    format!(
        "{ABILITIES_PREFIX}{}",
        joined.as_deref().unwrap_or(ABILITIES_FALLBACK)
    )
}

pub fn field_text(character: &Character, field: Field) -> String {
    match field {
        Field::Name => name_text(character),
        Field::Affiliation => affiliation_text(character),
        Field::Clan => clan_text(character),
        Field::Abilities => abilities_text(character),
    }
}

/// Projects characters onto the text regions of a slot.
#[derive(Clone, Debug)]
pub struct CardBinder {
    bindings: SlotBindings,
}

impl CardBinder {
    pub fn new(bindings: SlotBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &SlotBindings {
        &self.bindings
    }

    pub fn bind(&self, character: &Character, slot: CardSlot, renderer: &mut dyn Renderer) {
        for field in Field::TEXT {
            self.write(slot, field, &field_text(character, field), renderer);
        }
    }

    /// Blanks the text regions of a slot that has no character on this page.
    pub fn clear(&self, slot: CardSlot, renderer: &mut dyn Renderer) {
        for field in Field::TEXT {
            self.write(slot, field, "", renderer);
        }
    }

    fn write(&self, slot: CardSlot, field: Field, text: &str, renderer: &mut dyn Renderer) {
        let Some(regions) = self.bindings.slot(slot) else {
            tracing::warn!(slot = slot.index(), "slot has no region binding");
            return;
        };
        let region = regions.text(field);
        if !renderer.write_text(region, text) {
            tracing::warn!(region, "region not found, skipping write");
        }
    }
}
