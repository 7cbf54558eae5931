use std::{collections::HashSet, hash::Hash};

/// Drop repeated items, keeping the first occurrence of each in input order.
pub fn dedup_first_seen<T, I>(items: I) -> Vec<T>
where
    T: Copy + Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}
