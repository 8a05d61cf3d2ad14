//! "At most one primary" maintenance over sibling collections.
//!
//! Colors carry a prime flag and images a primary flag; within one sibling
//! collection at most one item may hold it. The functions here never mutate
//! their input: each returns a new collection.
//!
//! # First-remaining promotion
//!
//! When the flagged item is removed and others remain, the first remaining
//! item becomes flagged. This is a deliberate policy (the alternative would
//! be to leave the collection unflagged and force the user to choose), and it
//! lives in one place: [`promote_first_remaining`].
//!
//! Zero flagged items is still a legal intermediate state, e.g. after
//! [`set_only`] with an unknown target. Submission validation rejects it.

/// An item with a boolean primary flag.
pub trait Flagged {
    /// Whether the item currently holds the flag.
    fn is_flagged(&self) -> bool;

    /// Set or clear the flag.
    fn set_flagged(&mut self, flagged: bool);
}

/// An item with a stable identity inside its collection.
pub trait Keyed {
    type Key: PartialEq + ?Sized;

    /// The item's identity.
    fn key(&self) -> &Self::Key;
}

/// Picks the target item of an operation.
pub trait Selector<T> {
    /// Returns `true` if the item at `index` is the target.
    fn selects(&self, index: usize, item: &T) -> bool;
}

/// Target an item by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct At(pub usize);

impl<T> Selector<T> for At {
    fn selects(&self, index: usize, _item: &T) -> bool {
        index == self.0
    }
}

/// Target an item by its [`Keyed::key`].
#[derive(Debug, Clone, Copy)]
pub struct ByKey<'a, K: ?Sized>(pub &'a K);

impl<T> Selector<T> for ByKey<'_, T::Key>
where
    T: Keyed,
{
    fn selects(&self, _index: usize, item: &T) -> bool {
        item.key() == self.0
    }
}

/// Flag exactly the target item and clear every other flag.
///
/// If the target is not found, every flag is cleared. If several items match,
/// only the first is flagged.
#[must_use]
pub fn set_only<T, S>(items: &[T], target: &S) -> Vec<T>
where
    T: Flagged + Clone,
    S: Selector<T> + ?Sized,
{
    let hit = items
        .iter()
        .enumerate()
        .position(|(index, item)| target.selects(index, item));

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut item = item.clone();
            item.set_flagged(Some(index) == hit);
            item
        })
        .collect()
}

/// Append an item.
///
/// A flagged new item clears the flag on every existing item; an unflagged
/// one leaves existing items untouched.
#[must_use]
pub fn add_item<T>(items: &[T], new_item: T) -> Vec<T>
where
    T: Flagged + Clone,
{
    let clear = new_item.is_flagged();
    let mut result: Vec<T> = items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if clear {
                item.set_flagged(false);
            }
            item
        })
        .collect();
    result.push(new_item);
    result
}

/// Remove the target item.
///
/// If the removed item held the flag, [`promote_first_remaining`] is applied
/// to the result. The result may be empty; use [`remove_item_or_seed`] when
/// the collection must never be empty.
#[must_use]
pub fn remove_item<T, S>(items: &[T], target: &S) -> Vec<T>
where
    T: Flagged + Clone,
    S: Selector<T> + ?Sized,
{
    let Some(hit) = items
        .iter()
        .enumerate()
        .position(|(index, item)| target.selects(index, item))
    else {
        return items.to_vec();
    };

    let removed_flagged = items.get(hit).is_some_and(Flagged::is_flagged);
    let mut result: Vec<T> = items
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != hit)
        .map(|(_, item)| item.clone())
        .collect();

    if removed_flagged {
        promote_first_remaining(&mut result);
    }
    result
}

/// Remove the target item, re-seeding an emptied collection.
///
/// `seed` builds the single default item used when nothing remains.
#[must_use]
pub fn remove_item_or_seed<T, S, F>(items: &[T], target: &S, seed: F) -> Vec<T>
where
    T: Flagged + Clone,
    S: Selector<T> + ?Sized,
    F: FnOnce() -> T,
{
    let result = remove_item(items, target);
    if result.is_empty() {
        vec![seed()]
    } else {
        result
    }
}

/// Flag the first item if none is flagged.
///
/// No-op on an empty slice or when some item is already flagged.
pub fn promote_first_remaining<T: Flagged>(items: &mut [T]) {
    if has_flagged(items) {
        return;
    }
    if let Some(first) = items.first_mut() {
        first.set_flagged(true);
    }
}

/// Returns `true` if any item holds the flag.
#[must_use]
pub fn has_flagged<T: Flagged>(items: &[T]) -> bool {
    items.iter().any(Flagged::is_flagged)
}

/// Number of items holding the flag.
#[must_use]
pub fn flagged_count<T: Flagged>(items: &[T]) -> usize {
    items.iter().filter(|item| item.is_flagged()).count()
}
