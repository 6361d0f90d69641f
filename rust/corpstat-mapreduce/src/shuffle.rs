//! Collation of intermediate pairs into sorted key runs and reducer groups.
//!
//! All sorting in this module is stable: for equal keys, values keep the order in
//! which they were produced (map task order, then emission order within a task).

use crate::job::Combiner;

/// All values gathered so far for one exact intermediate key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRun<K, V> {
    pub key: K,
    pub values: Vec<V>,
}

impl<K, V> KeyRun<K, V> {
    pub fn new(key: K, values: Vec<V>) -> KeyRun<K, V> {
        KeyRun { key, values }
    }
}

/// A maximal sequence of adjacent sorted key runs that the job groups together.
///
/// Runs are in ascending key order and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<K, V> {
    runs: Vec<KeyRun<K, V>>,
}

impl<K, V> Group<K, V> {
    /// Creates a group from runs already in ascending key order.
    ///
    /// # Panics
    ///
    /// Panics if `runs` is empty.
    pub fn new(runs: Vec<KeyRun<K, V>>) -> Group<K, V> {
        assert!(!runs.is_empty(), "a group holds at least one key run");
        Group { runs }
    }

    /// The smallest key of the group.
    pub fn key(&self) -> &K {
        &self.runs[0].key
    }

    pub fn into_runs(self) -> Vec<KeyRun<K, V>> {
        self.runs
    }
}

/// Sorts `pairs` by key and merges equal keys into runs.
pub fn collate<K: Ord, V>(pairs: Vec<(K, V)>) -> Vec<KeyRun<K, V>> {
    merge_runs(
        pairs
            .into_iter()
            .map(|(key, value)| KeyRun::new(key, vec![value]))
            .collect(),
    )
}

/// Sorts runs by key and concatenates the values of runs with equal keys.
pub fn merge_runs<K: Ord, V>(mut runs: Vec<KeyRun<K, V>>) -> Vec<KeyRun<K, V>> {
    runs.sort_by(|a, b| a.key.cmp(&b.key));
    let mut merged: Vec<KeyRun<K, V>> = Vec::with_capacity(runs.len());
    for run in runs {
        match merged.last_mut() {
            Some(last) if last.key == run.key => last.values.extend(run.values),
            _ => merged.push(run),
        }
    }
    merged
}

/// Applies `combiner` to the values of every run.
pub fn combine_runs<K, V>(
    combiner: &dyn Combiner<K, V>,
    runs: Vec<KeyRun<K, V>>,
) -> Vec<KeyRun<K, V>> {
    runs.into_iter()
        .map(|KeyRun { key, values }| {
            let values = combiner.combine(&key, values);
            KeyRun { key, values }
        })
        .collect()
}

/// Cuts sorted runs into groups: a new group starts whenever `same_group` returns
/// `false` for the first key of the current group and the next key.
pub fn group_runs<K, V>(
    runs: Vec<KeyRun<K, V>>,
    same_group: impl Fn(&K, &K) -> bool,
) -> Vec<Group<K, V>> {
    let mut groups = Vec::new();
    let mut current: Vec<KeyRun<K, V>> = Vec::new();
    for run in runs {
        if let Some(first) = current.first() {
            if !same_group(&first.key, &run.key) {
                groups.push(Group::new(std::mem::take(&mut current)));
            }
        }
        current.push(run);
    }
    if !current.is_empty() {
        groups.push(Group::new(current));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::SumCombiner;

    #[test]
    fn test_collate_is_stable() {
        let runs = collate(vec![("b", 1), ("a", 2), ("b", 3), ("a", 4)]);
        assert_eq!(
            runs,
            vec![KeyRun::new("a", vec![2, 4]), KeyRun::new("b", vec![1, 3])]
        );
    }

    #[test]
    fn test_merge_runs_from_several_tasks() {
        let task0 = collate(vec![("x", 1u64), ("y", 1)]);
        let task1 = collate(vec![("y", 5u64), ("w", 2)]);
        let merged = merge_runs(task0.into_iter().chain(task1).collect());
        assert_eq!(
            merged,
            vec![
                KeyRun::new("w", vec![2]),
                KeyRun::new("x", vec![1]),
                KeyRun::new("y", vec![1, 5]),
            ]
        );
    }

    #[test]
    fn test_combine_runs() {
        let runs = collate(vec![("a", 1u64), ("b", 1), ("a", 1)]);
        let combined = combine_runs(&SumCombiner, runs);
        assert_eq!(
            combined,
            vec![KeyRun::new("a", vec![2]), KeyRun::new("b", vec![1])]
        );
    }

    #[test]
    fn test_group_runs_by_prefix() {
        let runs = collate(vec![
            (("a", 1), ()),
            (("a", 0), ()),
            (("b", 0), ()),
            (("c", 5), ()),
            (("c", 2), ()),
        ]);
        let groups = group_runs(runs, |x, y| x.0 == y.0);
        assert_eq!(*groups[2].key(), ("c", 2));
        let shape = groups
            .into_iter()
            .map(|g| {
                let prefix = g.key().0;
                (prefix, g.into_runs().len())
            })
            .collect::<Vec<_>>();
        assert_eq!(shape, vec![("a", 2), ("b", 1), ("c", 2)]);
    }

    #[test]
    fn test_group_runs_empty() {
        let groups = group_runs(Vec::<KeyRun<u32, u32>>::new(), |a, b| a == b);
        assert!(groups.is_empty());
    }
}
