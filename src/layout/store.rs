//! Layout state machine
//!
//! Every section lives in a fixed slot tagged `Active` or `Removed`, so a
//! section can never be in both lists or in neither. A monotonically
//! increasing rank orders each list. Card mutations are written to durable
//! storage before they are committed in memory.

use super::section::{Section, SectionId, SectionStatus};
use super::snapshot::LayoutSnapshot;
use super::storage::LayoutStorage;
use super::{LayoutError, Theme};
use crate::market::CoinRecord;
use log::{debug, info, warn};

/// Outcome of a drag gesture: where the item came from and where it was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragResult {
    pub source: usize,
    /// `None` when the gesture was cancelled or dropped outside the list.
    pub destination: Option<usize>,
}

impl DragResult {
    pub fn new(source: usize, destination: usize) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    pub fn cancelled(source: usize) -> Self {
        Self {
            source,
            destination: None,
        }
    }
}

/// What happened when fresh market data reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No layout existed; the cards were seeded from the data.
    Seeded(usize),
    /// A layout existed; this many cards got new quotes.
    QuotesRefreshed(usize),
    /// Nothing changed.
    Skipped,
}

/// Plain view of the whole layout, for comparisons and rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    pub sections: Vec<Section>,
    pub removed_sections: Vec<Section>,
    pub cards: Vec<CoinRecord>,
    pub theme: Theme,
}

#[derive(Debug, Clone)]
struct SectionSlot {
    section: Section,
    status: SectionStatus,
    rank: u64,
}

#[derive(Debug)]
pub struct LayoutStore {
    /// One slot per section, indexed by `SectionId::index`.
    slots: Vec<SectionSlot>,
    next_rank: u64,
    cards: Vec<CoinRecord>,
    /// Whether storage holds a card layout; once set, market data no longer seeds.
    persisted: bool,
    theme: Theme,
    storage: Box<dyn LayoutStorage>,
}

impl LayoutStore {
    /// Opens the store over `storage`, restoring any persisted cards.
    ///
    /// Sections and theme are session state and always start from defaults.
    pub fn open(mut storage: Box<dyn LayoutStorage>, theme: Theme) -> Self {
        let mut cards = match storage.load_cards() {
            Ok(cards) => cards,
            Err(e) => {
                warn!("Ignoring unreadable saved layout: {}", e);
                None
            }
        };
        if let Some(cards) = &mut cards {
            if !ids_are_dense(cards) {
                warn!("Saved layout has gaps or duplicate card ids; renumbering");
                renumber(cards);
                if let Err(e) = storage.save_cards(cards) {
                    warn!("Failed to save renumbered layout: {}", e);
                }
            }
            info!("Restored saved layout with {} cards", cards.len());
        }

        Self {
            slots: default_slots(),
            next_rank: SectionId::ALL.len() as u64,
            persisted: cards.is_some(),
            cards: cards.unwrap_or_default(),
            theme,
            storage,
        }
    }

    pub fn sections(&self) -> Vec<Section> {
        self.ordered(SectionStatus::Active)
    }

    pub fn removed_sections(&self) -> Vec<Section> {
        self.ordered(SectionStatus::Removed)
    }

    /// Ids of the active sections, in display order.
    pub fn section_order(&self) -> Vec<SectionId> {
        self.sections().into_iter().map(|s| s.id).collect()
    }

    pub fn status(&self, id: SectionId) -> SectionStatus {
        self.slots[id.index()].status
    }

    pub fn cards(&self) -> &[CoinRecord] {
        &self.cards
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn has_persisted_layout(&self) -> bool {
        self.persisted
    }

    pub fn state(&self) -> LayoutState {
        LayoutState {
            sections: self.sections(),
            removed_sections: self.removed_sections(),
            cards: self.cards.clone(),
            theme: self.theme,
        }
    }

    fn ordered(&self, status: SectionStatus) -> Vec<Section> {
        let mut slots: Vec<&SectionSlot> =
            self.slots.iter().filter(|s| s.status == status).collect();
        slots.sort_by_key(|s| s.rank);
        slots.into_iter().map(|s| s.section.clone()).collect()
    }

    fn bump_rank(&mut self) -> u64 {
        let rank = self.next_rank;
        self.next_rank += 1;
        rank
    }

    /// Moves an active section. Returns whether the order changed hands.
    pub fn reorder_sections(&mut self, drag: DragResult) -> bool {
        let mut order = self.section_order();
        if !apply_drag(&mut order, drag) {
            return false;
        }
        for id in order {
            let rank = self.bump_rank();
            self.slots[id.index()].rank = rank;
        }
        debug!("Sections reordered: {:?}", self.section_order());
        true
    }

    /// `Active -> Removed`. No-op unless the section is active.
    pub fn remove_section(&mut self, id: SectionId) -> bool {
        if self.status(id) != SectionStatus::Active {
            return false;
        }
        let rank = self.bump_rank();
        let slot = &mut self.slots[id.index()];
        slot.status = SectionStatus::Removed;
        slot.rank = rank;
        info!("Removed section {}", id);
        true
    }

    /// `Removed -> Active`, appended after the other active sections.
    pub fn restore_section(&mut self, id: SectionId) -> bool {
        if self.status(id) != SectionStatus::Removed {
            return false;
        }
        let rank = self.bump_rank();
        let slot = &mut self.slots[id.index()];
        slot.status = SectionStatus::Active;
        slot.rank = rank;
        info!("Restored section {}", id);
        true
    }

    /// Feeds freshly normalized market data into the layout.
    ///
    /// Without a saved layout the data seeds the cards. With one, the saved
    /// membership and order are kept and only quotes are refreshed.
    pub fn sync_with_market(&mut self, fresh: &[CoinRecord]) -> Result<SyncOutcome, LayoutError> {
        if !self.persisted {
            if fresh.is_empty() {
                return Ok(SyncOutcome::Skipped);
            }
            let mut seeded = fresh.to_vec();
            renumber(&mut seeded);
            self.commit_cards(seeded)?;
            info!("Seeded layout with {} cards", self.cards.len());
            return Ok(SyncOutcome::Seeded(self.cards.len()));
        }

        let mut updated = self.cards.clone();
        let mut refreshed = 0;
        for card in updated.iter_mut() {
            if let Some(latest) = fresh.iter().find(|f| card.same_asset(f)) {
                let before = card.clone();
                card.refresh_quotes(latest);
                if *card != before {
                    refreshed += 1;
                }
            }
        }
        if refreshed == 0 {
            return Ok(SyncOutcome::Skipped);
        }
        self.commit_cards(updated)?;
        debug!("Refreshed quotes on {} cards", refreshed);
        Ok(SyncOutcome::QuotesRefreshed(refreshed))
    }

    /// Moves a card within the grid and persists the new order.
    pub fn reorder_cards(&mut self, drag: DragResult) -> Result<bool, LayoutError> {
        let mut cards = self.cards.clone();
        if !apply_drag(&mut cards, drag) {
            return Ok(false);
        }
        self.commit_cards(cards)?;
        Ok(true)
    }

    /// Deletes the card with `id` and renumbers the rest by position.
    pub fn remove_card(&mut self, id: u32) -> Result<bool, LayoutError> {
        if !self.cards.iter().any(|c| c.id == id) {
            return Ok(false);
        }
        let mut remaining: Vec<CoinRecord> =
            self.cards.iter().filter(|c| c.id != id).cloned().collect();
        renumber(&mut remaining);
        self.commit_cards(remaining)?;
        info!("Removed card {}, {} left", id, self.cards.len());
        Ok(true)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn export_layout(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            sections: self.sections(),
            components: self.cards.clone(),
            theme: self.theme,
            removed_sections: self.removed_sections(),
        }
    }

    /// Replaces sections, cards and theme with the snapshot's.
    ///
    /// Defaults the snapshot mentions in neither list come back as removed.
    /// On any error the current layout is left untouched.
    pub fn import_layout(&mut self, snapshot: LayoutSnapshot) -> Result<(), LayoutError> {
        let mut seen = [false; SectionId::ALL.len()];
        for section in snapshot.sections.iter().chain(&snapshot.removed_sections) {
            let index = section.id.index();
            if seen[index] {
                return Err(LayoutError::DuplicateSection(section.id));
            }
            seen[index] = true;
        }

        let mut cards = snapshot.components;
        if !ids_are_dense(&cards) {
            renumber(&mut cards);
        }
        self.commit_cards(cards)?;

        let mut slots = default_slots();
        let mut rank = 0;
        let listed = snapshot
            .sections
            .into_iter()
            .map(|s| (s, SectionStatus::Active))
            .chain(
                snapshot
                    .removed_sections
                    .into_iter()
                    .map(|s| (s, SectionStatus::Removed)),
            );
        for (section, status) in listed {
            let index = section.id.index();
            slots[index] = SectionSlot {
                section,
                status,
                rank,
            };
            rank += 1;
        }
        for id in SectionId::ALL {
            if !seen[id.index()] {
                slots[id.index()].status = SectionStatus::Removed;
                slots[id.index()].rank = rank;
                rank += 1;
            }
        }

        self.slots = slots;
        self.next_rank = rank;
        self.theme = snapshot.theme;
        info!(
            "Imported layout: {} sections, {} cards, {} theme",
            self.section_order().len(),
            self.cards.len(),
            self.theme
        );
        Ok(())
    }

    /// Parses an export document and imports it.
    pub fn import_json(&mut self, json: &str) -> Result<(), LayoutError> {
        let snapshot = LayoutSnapshot::parse(json)?;
        self.import_layout(snapshot)
    }

    /// Forgets the saved card layout so the next market data seeds it again.
    pub fn clear_persisted(&mut self) -> Result<(), LayoutError> {
        self.storage.clear()?;
        self.cards.clear();
        self.persisted = false;
        info!("Cleared saved layout");
        Ok(())
    }

    fn commit_cards(&mut self, cards: Vec<CoinRecord>) -> Result<(), LayoutError> {
        self.storage.save_cards(&cards)?;
        self.cards = cards;
        self.persisted = true;
        Ok(())
    }
}

fn default_slots() -> Vec<SectionSlot> {
    Section::defaults()
        .into_iter()
        .enumerate()
        .map(|(rank, section)| SectionSlot {
            section,
            status: SectionStatus::Active,
            rank: rank as u64,
        })
        .collect()
}

/// Splices the dragged item into its destination. Leaves `items` untouched
/// when the drag has no destination or an index is out of range.
fn apply_drag<T>(items: &mut Vec<T>, drag: DragResult) -> bool {
    let Some(destination) = drag.destination else {
        return false;
    };
    let len = items.len();
    if drag.source >= len || destination >= len {
        warn!(
            "Ignoring move {} -> {} on a list of {}",
            drag.source, destination, len
        );
        return false;
    }
    let item = items.remove(drag.source);
    items.insert(destination, item);
    true
}

fn renumber(cards: &mut [CoinRecord]) {
    for (index, card) in cards.iter_mut().enumerate() {
        card.id = index as u32 + 1;
    }
}

/// True when the ids are exactly a permutation of `1..=len`.
fn ids_are_dense(cards: &[CoinRecord]) -> bool {
    let mut seen = vec![false; cards.len()];
    for card in cards {
        let id = card.id as usize;
        if id == 0 || id > cards.len() || seen[id - 1] {
            return false;
        }
        seen[id - 1] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::storage::memory::MemoryStorage;

    fn coin(id: u32, name: &str, symbol: &str) -> CoinRecord {
        CoinRecord {
            id,
            name: Some(name.to_string()),
            symbol: Some(symbol.to_string()),
            current_price: Some(id as f64 * 10.0),
            ..Default::default()
        }
    }

    fn market() -> Vec<CoinRecord> {
        vec![
            coin(1, "Bitcoin", "btc"),
            coin(2, "Ethereum", "eth"),
            coin(3, "Tether", "usdt"),
            coin(4, "Solana", "sol"),
        ]
    }

    fn seeded_store() -> (LayoutStore, MemoryStorage) {
        let storage = MemoryStorage::default();
        let mut store = LayoutStore::open(Box::new(storage.clone()), Theme::Light);
        store.sync_with_market(&market()).unwrap();
        (store, storage)
    }

    fn ids(store: &LayoutStore) -> Vec<u32> {
        store.cards().iter().map(|c| c.id).collect()
    }

    fn names(store: &LayoutStore) -> Vec<String> {
        store
            .cards()
            .iter()
            .map(|c| c.display_name().to_string())
            .collect()
    }

    fn assert_partitioned(store: &LayoutStore) {
        let active = store.section_order();
        let removed: Vec<SectionId> = store.removed_sections().iter().map(|s| s.id).collect();
        for id in SectionId::ALL {
            let in_active = active.contains(&id);
            let in_removed = removed.contains(&id);
            assert!(in_active ^ in_removed, "{} must be in exactly one list", id);
        }
    }

    #[test]
    fn starts_with_default_sections() {
        let store = LayoutStore::open(Box::new(MemoryStorage::default()), Theme::Dark);

        assert_eq!(
            store.section_order(),
            vec![SectionId::Table, SectionId::Graph, SectionId::Cards]
        );
        assert!(store.removed_sections().is_empty());
        assert!(store.cards().is_empty());
        assert!(!store.has_persisted_layout());
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn reorder_then_inverse_restores_order() {
        for i in 0..3 {
            for j in 0..3 {
                let mut store = LayoutStore::open(Box::new(MemoryStorage::default()), Theme::Light);
                let original = store.section_order();

                assert!(store.reorder_sections(DragResult::new(i, j)));
                let mut moved = store.section_order();
                assert_eq!(moved.len(), original.len());
                moved.sort_by_key(|id| id.index());
                assert_eq!(moved, SectionId::ALL.to_vec());

                assert!(store.reorder_sections(DragResult::new(j, i)));
                assert_eq!(store.section_order(), original);
            }
        }
    }

    #[test]
    fn reorder_moves_source_to_destination() {
        let mut store = LayoutStore::open(Box::new(MemoryStorage::default()), Theme::Light);

        store.reorder_sections(DragResult::new(0, 2));

        assert_eq!(
            store.section_order(),
            vec![SectionId::Graph, SectionId::Cards, SectionId::Table]
        );
    }

    #[test]
    fn cancelled_or_out_of_range_drag_is_ignored() {
        let mut store = LayoutStore::open(Box::new(MemoryStorage::default()), Theme::Light);
        let before = store.state();

        assert!(!store.reorder_sections(DragResult::cancelled(1)));
        assert!(!store.reorder_sections(DragResult::new(0, 3)));
        assert!(!store.reorder_sections(DragResult::new(7, 0)));

        assert_eq!(store.state(), before);
    }

    #[test]
    fn remove_then_restore_appends_to_end() {
        let mut store = LayoutStore::open(Box::new(MemoryStorage::default()), Theme::Light);

        assert!(store.remove_section(SectionId::Table));
        assert_eq!(store.status(SectionId::Table), SectionStatus::Removed);
        assert_eq!(store.removed_sections(), vec![Section::new(SectionId::Table)]);
        assert_partitioned(&store);

        assert!(store.restore_section(SectionId::Table));
        assert_eq!(
            store.section_order(),
            vec![SectionId::Graph, SectionId::Cards, SectionId::Table]
        );
        assert!(store.removed_sections().is_empty());
        assert_partitioned(&store);
    }

    #[test]
    fn remove_and_restore_are_silent_noops_in_wrong_state() {
        let mut store = LayoutStore::open(Box::new(MemoryStorage::default()), Theme::Light);

        assert!(!store.restore_section(SectionId::Graph));
        assert!(store.remove_section(SectionId::Graph));
        assert!(!store.remove_section(SectionId::Graph));
        assert_eq!(store.removed_sections().len(), 1);
    }

    #[test]
    fn removed_sections_keep_removal_order() {
        let mut store = LayoutStore::open(Box::new(MemoryStorage::default()), Theme::Light);

        store.remove_section(SectionId::Cards);
        store.remove_section(SectionId::Table);

        let removed: Vec<SectionId> = store.removed_sections().iter().map(|s| s.id).collect();
        assert_eq!(removed, vec![SectionId::Cards, SectionId::Table]);
        assert_eq!(store.section_order(), vec![SectionId::Graph]);
        assert_partitioned(&store);
    }

    #[test]
    fn reorder_with_removed_sections_only_touches_active() {
        let mut store = LayoutStore::open(Box::new(MemoryStorage::default()), Theme::Light);
        store.remove_section(SectionId::Graph);

        assert!(store.reorder_sections(DragResult::new(1, 0)));
        assert!(!store.reorder_sections(DragResult::new(0, 2)));

        assert_eq!(
            store.section_order(),
            vec![SectionId::Cards, SectionId::Table]
        );
        assert_partitioned(&store);
    }

    #[test]
    fn first_market_data_seeds_and_persists() {
        let (store, storage) = seeded_store();

        assert!(store.has_persisted_layout());
        assert_eq!(ids(&store), vec![1, 2, 3, 4]);
        assert_eq!(storage.cards.lock().unwrap().as_ref().unwrap().len(), 4);
    }

    #[test]
    fn empty_market_data_does_not_seed() {
        let storage = MemoryStorage::default();
        let mut store = LayoutStore::open(Box::new(storage.clone()), Theme::Light);

        assert_eq!(store.sync_with_market(&[]).unwrap(), SyncOutcome::Skipped);
        assert!(!store.has_persisted_layout());
        assert!(storage.cards.lock().unwrap().is_none());
    }

    #[test]
    fn saved_layout_is_not_reseeded_but_quotes_refresh() {
        let (mut store, _storage) = seeded_store();
        store.remove_card(1).unwrap();

        let mut fresh = market();
        fresh[1].current_price = Some(9999.0);
        fresh.push(coin(5, "Dogecoin", "doge"));

        let outcome = store.sync_with_market(&fresh).unwrap();

        assert_eq!(outcome, SyncOutcome::QuotesRefreshed(1));
        assert_eq!(names(&store), vec!["Ethereum", "Tether", "Solana"]);
        assert_eq!(store.cards()[0].current_price, Some(9999.0));
        assert_eq!(ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn unchanged_quotes_skip_the_write() {
        let (mut store, storage) = seeded_store();
        let writes = *storage.writes.lock().unwrap();

        assert_eq!(
            store.sync_with_market(&market()).unwrap(),
            SyncOutcome::Skipped
        );
        assert_eq!(*storage.writes.lock().unwrap(), writes);
    }

    #[test]
    fn remove_card_renumbers_densely() {
        let (mut store, storage) = seeded_store();

        assert!(store.remove_card(2).unwrap());

        assert_eq!(ids(&store), vec![1, 2, 3]);
        assert_eq!(names(&store), vec!["Bitcoin", "Tether", "Solana"]);
        let saved = storage.cards.lock().unwrap().clone().unwrap();
        assert_eq!(saved, store.cards().to_vec());
    }

    #[test]
    fn remove_card_keeps_relative_order_after_reorder() {
        let (mut store, _storage) = seeded_store();
        store.reorder_cards(DragResult::new(3, 0)).unwrap();
        assert_eq!(ids(&store), vec![4, 1, 2, 3]);

        store.remove_card(1).unwrap();

        assert_eq!(names(&store), vec!["Solana", "Ethereum", "Tether"]);
        assert_eq!(ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn open_renumbers_saved_cards_with_duplicate_ids() {
        let storage = MemoryStorage::default();
        *storage.cards.lock().unwrap() = Some(vec![
            coin(1, "Bitcoin", "btc"),
            coin(1, "Ethereum", "eth"),
            coin(5, "Tether", "usdt"),
        ]);

        let mut store = LayoutStore::open(Box::new(storage.clone()), Theme::Light);

        assert_eq!(ids(&store), vec![1, 2, 3]);
        assert_eq!(names(&store), vec!["Bitcoin", "Ethereum", "Tether"]);
        let saved = storage.cards.lock().unwrap().clone().unwrap();
        assert_eq!(saved, store.cards().to_vec());

        assert!(store.remove_card(1).unwrap());
        assert_eq!(names(&store), vec!["Ethereum", "Tether"]);
        assert_eq!(ids(&store), vec![1, 2]);
    }

    #[test]
    fn open_keeps_dense_saved_ids_untouched() {
        let storage = MemoryStorage::default();
        *storage.cards.lock().unwrap() =
            Some(vec![coin(2, "Bitcoin", "btc"), coin(1, "Ethereum", "eth")]);

        let store = LayoutStore::open(Box::new(storage.clone()), Theme::Light);

        assert_eq!(ids(&store), vec![2, 1]);
        assert_eq!(*storage.writes.lock().unwrap(), 0);
    }

    #[test]
    fn remove_unknown_card_is_noop() {
        let (mut store, storage) = seeded_store();
        let writes = *storage.writes.lock().unwrap();

        assert!(!store.remove_card(42).unwrap());

        assert_eq!(ids(&store), vec![1, 2, 3, 4]);
        assert_eq!(*storage.writes.lock().unwrap(), writes);
    }

    #[test]
    fn card_mutations_survive_reload() {
        let (mut store, storage) = seeded_store();
        store.reorder_cards(DragResult::new(0, 2)).unwrap();
        store.remove_card(4).unwrap();
        let expected = store.cards().to_vec();

        let reloaded = LayoutStore::open(Box::new(storage), Theme::Light);

        assert!(reloaded.has_persisted_layout());
        assert_eq!(reloaded.cards(), expected.as_slice());
        assert_eq!(reloaded.section_order().len(), 3);
    }

    #[test]
    fn cancelled_card_drag_does_not_write() {
        let (mut store, storage) = seeded_store();
        let writes = *storage.writes.lock().unwrap();

        assert!(!store.reorder_cards(DragResult::cancelled(0)).unwrap());
        assert_eq!(*storage.writes.lock().unwrap(), writes);
    }

    #[test]
    fn failed_write_leaves_cards_untouched() {
        let (mut store, mut storage) = seeded_store();
        let before = store.state();
        storage.fail_writes = true;
        store.storage = Box::new(storage);

        assert!(matches!(
            store.remove_card(1),
            Err(LayoutError::Storage(_))
        ));
        assert!(store.reorder_cards(DragResult::new(0, 1)).is_err());
        assert_eq!(store.state(), before);
    }

    #[test]
    fn export_then_import_round_trips() {
        let (mut store, _storage) = seeded_store();
        store.reorder_sections(DragResult::new(2, 0));
        store.remove_section(SectionId::Graph);
        store.reorder_cards(DragResult::new(1, 3)).unwrap();
        store.toggle_theme();
        let before = store.state();

        let json = store.export_layout().to_json_pretty().unwrap();
        let mut other = LayoutStore::open(Box::new(MemoryStorage::default()), Theme::Light);
        other.import_json(&json).unwrap();

        assert_eq!(other.state(), before);
        assert_partitioned(&other);
    }

    #[test]
    fn import_missing_theme_leaves_state_identical() {
        let (mut store, _storage) = seeded_store();
        store.remove_section(SectionId::Table);
        let before = store.state();

        let doc = serde_json::json!({
            "sections": [{"id": "graph", "title": "Graph"}],
            "components": []
        })
        .to_string();

        assert!(matches!(
            store.import_json(&doc),
            Err(LayoutError::MissingKey("theme"))
        ));
        assert!(matches!(
            store.import_json("not json"),
            Err(LayoutError::InvalidJson(_))
        ));
        assert_eq!(store.state(), before);
    }

    #[test]
    fn import_rejects_duplicate_sections() {
        let (mut store, _storage) = seeded_store();
        let before = store.state();

        let snapshot = LayoutSnapshot {
            sections: vec![Section::new(SectionId::Table)],
            components: Vec::new(),
            theme: Theme::Dark,
            removed_sections: vec![Section::new(SectionId::Table)],
        };

        assert!(matches!(
            store.import_layout(snapshot),
            Err(LayoutError::DuplicateSection(SectionId::Table))
        ));
        assert_eq!(store.state(), before);
    }

    #[test]
    fn import_marks_unlisted_sections_removed() {
        let mut store = LayoutStore::open(Box::new(MemoryStorage::default()), Theme::Light);
        let snapshot = LayoutSnapshot {
            sections: vec![Section {
                id: SectionId::Cards,
                title: "My Coins".to_string(),
            }],
            components: Vec::new(),
            theme: Theme::Light,
            removed_sections: Vec::new(),
        };

        store.import_layout(snapshot).unwrap();

        assert_eq!(store.sections()[0].title, "My Coins");
        let removed: Vec<SectionId> = store.removed_sections().iter().map(|s| s.id).collect();
        assert_eq!(removed, vec![SectionId::Table, SectionId::Graph]);
        assert_partitioned(&store);

        assert!(store.restore_section(SectionId::Graph));
        assert_eq!(
            store.section_order(),
            vec![SectionId::Cards, SectionId::Graph]
        );
    }

    #[test]
    fn import_renumbers_only_invalid_ids() {
        let mut store = LayoutStore::open(Box::new(MemoryStorage::default()), Theme::Light);

        let mut permuted = market();
        permuted.swap(0, 3);
        store
            .import_layout(LayoutSnapshot {
                sections: Section::defaults(),
                components: permuted,
                theme: Theme::Light,
                removed_sections: Vec::new(),
            })
            .unwrap();
        assert_eq!(ids(&store), vec![4, 2, 3, 1]);

        let gapped = vec![coin(3, "Bitcoin", "btc"), coin(9, "Ethereum", "eth")];
        store
            .import_layout(LayoutSnapshot {
                sections: Section::defaults(),
                components: gapped,
                theme: Theme::Light,
                removed_sections: Vec::new(),
            })
            .unwrap();
        assert_eq!(ids(&store), vec![1, 2]);
        assert!(store.has_persisted_layout());
    }

    #[test]
    fn clear_allows_reseeding() {
        let (mut store, storage) = seeded_store();
        store.remove_card(1).unwrap();

        store.clear_persisted().unwrap();
        assert!(store.cards().is_empty());
        assert!(storage.cards.lock().unwrap().is_none());

        assert_eq!(
            store.sync_with_market(&market()).unwrap(),
            SyncOutcome::Seeded(4)
        );
    }

    #[test]
    fn ids_are_dense_checks_permutation() {
        assert!(ids_are_dense(&[]));
        assert!(ids_are_dense(&[coin(2, "a", "a"), coin(1, "b", "b")]));
        assert!(!ids_are_dense(&[coin(1, "a", "a"), coin(1, "b", "b")]));
        assert!(!ids_are_dense(&[coin(0, "a", "a")]));
        assert!(!ids_are_dense(&[coin(1, "a", "a"), coin(3, "b", "b")]));
    }
}
