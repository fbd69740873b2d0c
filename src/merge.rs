// src/merge.rs
//
// Best-effort English/Arabic alignment. Never fails.
//
// Strategy, first that applies:
//  1. ById        – every item on both sides has an id; outer join on it.
//  2. ByCategory  – both sides have the same number of (>1) category groups; the n-th
//                   English group pairs with the n-th Arabic group, by position inside it.
//  3. ByPosition  – raw index.
//
// Rows follow English order; leftover Arabic items are appended in Arabic order.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::menu::{Language, MenuItem, MenuRecordSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Alignment {
    ById,
    ByCategory,
    ByPosition,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MergedRow {
    pub english: Option<MenuItem>,
    pub arabic: Option<MenuItem>,
}

impl MergedRow {
    pub fn side(&self, language: Language) -> Option<&MenuItem> {
        match language {
            Language::English => self.english.as_ref(),
            Language::Arabic => self.arabic.as_ref(),
        }
    }

    fn either<'a>(&'a self, f: impl Fn(&'a MenuItem) -> Option<&'a str>) -> Option<&'a str> {
        self.english.as_ref().and_then(&f).or_else(|| self.arabic.as_ref().and_then(&f))
    }

    pub fn image_url(&self) -> Option<&str> {
        self.either(|i| i.image_url.as_deref())
    }

    pub fn id(&self) -> Option<&str> {
        self.either(|i| i.id.as_deref())
    }

    pub fn display_name(&self) -> Option<&str> {
        self.either(|i| Some(i.name.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Merged {
    pub rows: Vec<MergedRow>,
    pub alignment: Alignment,
}

pub fn merge(english: &MenuRecordSet, arabic: &MenuRecordSet) -> Merged {
    let en = &english.items;
    let ar = &arabic.items;

    let (alignment, partners) = if let Some(p) = pair_by_id(en, ar) {
        (Alignment::ById, p)
    } else if let Some(p) = pair_by_category(en, ar) {
        (Alignment::ByCategory, p)
    } else {
        (Alignment::ByPosition, (0..en.len()).map(|i| (i < ar.len()).then_some(i)).collect())
    };

    logd!("Merge: en={} ar={} alignment={:?}", en.len(), ar.len(), alignment);
    Merged { rows: build_rows(en, ar, &partners), alignment }
}

/// `partners[i]` is the Arabic index paired with English item `i`.
fn build_rows(en: &[MenuItem], ar: &[MenuItem], partners: &[Option<usize>]) -> Vec<MergedRow> {
    let mut used = vec![false; ar.len()];
    let mut rows = Vec::with_capacity(en.len().max(ar.len()));

    for (item, partner) in en.iter().zip(partners) {
        let partner = partner.filter(|&j| j < ar.len() && !used[j]);
        if let Some(j) = partner {
            used[j] = true;
        }
        rows.push(MergedRow {
            english: Some(item.clone()),
            arabic: partner.map(|j| ar[j].clone()),
        });
    }

    for (item, _) in ar.iter().zip(&used).filter(|(_, u)| !**u) {
        rows.push(MergedRow { english: None, arabic: Some(item.clone()) });
    }
    rows
}

fn all_have_ids(items: &[MenuItem]) -> bool {
    !items.is_empty() && items.iter().all(|i| i.id.is_some())
}

/// Outer join on id. Repeated ids pair up in page order.
fn pair_by_id(en: &[MenuItem], ar: &[MenuItem]) -> Option<Vec<Option<usize>>> {
    if !all_have_ids(en) || !all_have_ids(ar) {
        return None;
    }

    let mut index: HashMap<&str, VecDeque<usize>> = HashMap::new();
    for (j, item) in ar.iter().enumerate() {
        if let Some(id) = item.id.as_deref() {
            index.entry(id).or_default().push_back(j);
        }
    }
    Some(
        en.iter()
            .map(|item| {
                item.id
                    .as_deref()
                    .and_then(|id| index.get_mut(id))
                    .and_then(VecDeque::pop_front)
            })
            .collect(),
    )
}

/// For each item: (group ordinal, position within its group). Groups are
/// category labels in order of first appearance.
fn group_slots(items: &[MenuItem]) -> (Vec<(usize, usize)>, usize) {
    let mut ordinal: HashMap<&str, usize> = HashMap::new();
    let mut sizes: Vec<usize> = Vec::new();
    let mut slots = Vec::with_capacity(items.len());

    for item in items {
        let next = ordinal.len();
        let g = *ordinal.entry(item.category.as_str()).or_insert(next);
        if g == sizes.len() {
            sizes.push(0);
        }
        slots.push((g, sizes[g]));
        sizes[g] += 1;
    }
    (slots, sizes.len())
}

fn pair_by_category(en: &[MenuItem], ar: &[MenuItem]) -> Option<Vec<Option<usize>>> {
    let (en_slots, en_groups) = group_slots(en);
    let (ar_slots, ar_groups) = group_slots(ar);
    if en_groups != ar_groups || en_groups < 2 {
        return None;
    }

    let index: HashMap<(usize, usize), usize> =
        ar_slots.into_iter().enumerate().map(|(j, slot)| (slot, j)).collect();
    Some(en_slots.iter().map(|slot| index.get(slot).copied()).collect())
}
