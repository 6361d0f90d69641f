use std::cmp::Ordering;

/// A count or frequency that can be ranked.
pub trait Weight: Copy {
    fn weight_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_integer_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn weight_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

impl_integer_weight!(u32, u64, usize);

impl Weight for f64 {
    fn weight_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

/// Returns the `k` heaviest items, by descending weight and then ascending key.
///
/// The order is total, so the selection is deterministic for any input order.
pub fn top_k<K, W>(items: impl IntoIterator<Item = (K, W)>, k: usize) -> Vec<(K, W)>
where
    K: Ord,
    W: Weight,
{
    let ranking = |a: &(K, W), b: &(K, W)| b.1.weight_cmp(&a.1).then_with(|| a.0.cmp(&b.0));
    let mut items = items.into_iter().collect::<Vec<_>>();
    if k == 0 {
        return Vec::new();
    }
    if k < items.len() {
        items.select_nth_unstable_by(k - 1, ranking);
        items.truncate(k);
    }
    items.sort_unstable_by(ranking);
    items
}
