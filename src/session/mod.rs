use crate::binder::{CardBinder, CardSlot, Renderer, SlotBindings};
use crate::controls::{self, NavBar};
use crate::images::{ImageCycle, ImageRotator};
use crate::paginator::{self, EmptyListPolicy, NavAction, PaginationState};
use crate::repository::Character;

/// Owns the loaded characters and all view state for one viewing session.
///
/// Every mutation goes through `&mut self`, so the page counter and the
/// per-slot image cursors are never touched concurrently.
#[derive(Debug)]
pub struct Session {
    characters: Vec<Character>,
    state: PaginationState,
    binder: CardBinder,
    rotator: ImageRotator,
    cycles: Vec<Option<ImageCycle>>,
}

impl Session {
    pub fn new(
        characters: Vec<Character>,
        page_size: usize,
        policy: EmptyListPolicy,
        rotator: ImageRotator,
    ) -> Self {
        let state = PaginationState::new(characters.len(), page_size, policy);
        Self {
            characters,
            state,
            binder: CardBinder::new(SlotBindings::standard(page_size)),
            rotator,
            cycles: vec![None; page_size],
        }
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn visible(&self) -> &[Character] {
        paginator::visible(self.state.current_page, &self.characters, self.state.page_size)
    }

    pub fn controls(&self) -> NavBar {
        controls::rebuild(self.state.total_pages, self.state.current_page)
    }

    pub fn cycle(&self, slot: CardSlot) -> Option<&ImageCycle> {
        self.cycles.get(slot.index() - 1).and_then(Option::as_ref)
    }

    pub fn slot(&self, index: usize) -> Option<CardSlot> {
        CardSlot::new(index, self.state.page_size)
    }

    /// Draws the current page from scratch; image cursors restart at 0.
    pub fn render(&mut self, renderer: &mut dyn Renderer) {
        let start = (self.state.current_page - 1) * self.state.page_size;
        let shown = self.visible().len();
        tracing::debug!(
            page = self.state.current_page,
            total = self.state.total_pages,
            shown,
            "rendering page"
        );

        let slots: Vec<(CardSlot, String)> = self
            .binder
            .bindings()
            .iter()
            .map(|(slot, regions)| (slot, regions.image.clone()))
            .collect();
        for (slot, image_region) in slots {
            let i = slot.index() - 1;
            match self.characters.get(start + i).filter(|_| i < shown) {
                Some(character) => {
                    self.binder.bind(character, slot, renderer);
                    let cycle = self.rotator.attach(&image_region, character, renderer);
                    self.cycles[i] = Some(cycle);
                }
                None => {
                    self.binder.clear(slot, renderer);
                    if !renderer.clear_image(&image_region) {
                        tracing::warn!(region = image_region.as_str(), "image region not found");
                    }
                    self.cycles[i] = None;
                }
            }
        }

        renderer.render_controls(&self.controls());
    }

    /// Applies a navigation action and re-renders when the page changed.
    /// Returns whether the page changed.
    pub fn navigate(&mut self, action: NavAction, renderer: &mut dyn Renderer) -> bool {
        let next = self.state.apply(action);
        if next == self.state {
            tracing::debug!(?action, "navigation ignored");
            return false;
        }
        self.state = next;
        self.render(renderer);
        true
    }

    /// Jumps to `page`, clamped into range, without rendering.
    pub fn set_page(&mut self, page: usize) {
        self.state = self.state.clamped(page);
    }

    /// Advances the image of a bound slot. Empty slots ignore the click.
    pub fn activate_image(&mut self, slot: CardSlot, renderer: &mut dyn Renderer) -> bool {
        let Some(region) = self.binder.bindings().slot(slot).map(|r| r.image.clone()) else {
            return false;
        };
        match self.cycles.get_mut(slot.index() - 1).and_then(Option::as_mut) {
            Some(cycle) => {
                self.rotator.activate(&region, cycle, renderer);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::{AcceptAll, OverrideTable, DEFAULT_IMAGE};
    use crate::output::PageView;
    use crate::paginator::PAGE_SIZE;

    fn roster(n: usize) -> Vec<Character> {
        (0..n)
            .map(|i| Character {
                images: vec![format!("img-{i}-a"), format!("img-{i}-b")],
                ..Character::named(&format!("Ninja {i}"))
            })
            .collect()
    }

    fn session(chars: Vec<Character>) -> Session {
        let rotator = ImageRotator::new(OverrideTable::builtin(), DEFAULT_IMAGE, Box::new(AcceptAll));
        Session::new(chars, PAGE_SIZE, EmptyListPolicy::FloorToOne, rotator)
    }

    #[test]
    fn short_page_clears_unused_slots() {
        let mut s = session(roster(5));
        let mut view = PageView::standard(PAGE_SIZE);
        s.render(&mut view);
        assert_eq!(view.text("personaje-4"), Some("Ninja 3"));

        assert!(s.navigate(NavAction::Next, &mut view));
        assert_eq!(view.text("personaje-1"), Some("Ninja 4"));
        assert_eq!(view.text("personaje-2"), Some(""));
        assert!(view.image("card-image-2").is_none());
        assert!(s.cycle(s.slot(2).unwrap()).is_none());
    }

    #[test]
    fn page_change_resets_cursor() {
        let mut s = session(roster(8));
        let mut view = PageView::standard(PAGE_SIZE);
        s.render(&mut view);
        let slot = s.slot(1).unwrap();
        assert!(s.activate_image(slot, &mut view));
        assert_eq!(s.cycle(slot).unwrap().cursor(), 1);

        s.navigate(NavAction::Next, &mut view);
        s.navigate(NavAction::Previous, &mut view);
        assert_eq!(s.cycle(slot).unwrap().cursor(), 0);
        assert_eq!(view.image("card-image-1").unwrap().url, "img-0-a");
    }

    #[test]
    fn ignored_navigation_does_not_rerender() {
        let mut s = session(roster(3));
        let mut view = PageView::standard(PAGE_SIZE);
        s.render(&mut view);
        assert!(!s.navigate(NavAction::Previous, &mut view));
        assert!(!s.navigate(NavAction::Next, &mut view));
        assert_eq!(s.state().current_page, 1);
    }

    #[test]
    fn controls_follow_current_page() {
        let mut s = session(roster(12));
        let mut view = PageView::standard(PAGE_SIZE);
        s.render(&mut view);
        s.navigate(NavAction::Goto(3), &mut view);
        assert_eq!(view.controls().active_page(), Some(3));
        assert_eq!(view.controls().pages().count(), 3);
    }

    #[test]
    fn clicking_empty_slot_is_a_no_op() {
        let mut s = session(roster(1));
        let mut view = PageView::standard(PAGE_SIZE);
        s.render(&mut view);
        assert!(!s.activate_image(s.slot(3).unwrap(), &mut view));
    }

    #[test]
    fn set_page_clamps() {
        let mut s = session(roster(9));
        s.set_page(10);
        assert_eq!(s.state().current_page, 3);
        s.set_page(0);
        assert_eq!(s.state().current_page, 1);
    }
}
