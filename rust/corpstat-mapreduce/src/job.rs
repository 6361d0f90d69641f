//! The job contract: map, combine, partition, group and reduce.

use std::iter::Sum;

use corpstat_common::Result;

use crate::{input::Record, shuffle::Group};

/// Destination for key/value pairs produced by a map or reduce function.
pub trait Emitter<K, V> {
    fn emit(&mut self, key: K, value: V) -> Result<()>;
}

impl<K, V> Emitter<K, V> for Vec<(K, V)> {
    fn emit(&mut self, key: K, value: V) -> Result<()> {
        self.push((key, value));
        Ok(())
    }
}

/// Pre-aggregates the values of one key inside a map task.
///
/// A combiner must be associative and commutative over the values of a key and must
/// keep the key unchanged: the engine may apply it zero, one or several times, and the
/// final output is identical in every case.
pub trait Combiner<K, V>: Send + Sync {
    fn combine(&self, key: &K, values: Vec<V>) -> Vec<V>;
}

/// Combiner that folds all values of a key into their sum.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumCombiner;

impl<K, V> Combiner<K, V> for SumCombiner
where
    V: Sum<V>,
{
    fn combine(&self, _key: &K, values: Vec<V>) -> Vec<V> {
        vec![values.into_iter().sum()]
    }
}

/// A map-reduce job.
///
/// Implementations are shared by reference across all map and reduce tasks, so every
/// method must be a pure function of its arguments. Per-group state lives on the stack
/// of [`MapReduceJob::reduce`].
pub trait MapReduceJob: Send + Sync {
    /// Intermediate key. Its `Ord` is the sort order delivered to reducers.
    type Key: Ord + Send;
    /// Intermediate value.
    type Value: Send;
    type OutputKey: Send;
    type OutputValue: Send;

    /// Short job name used in log messages.
    fn name(&self) -> &str;

    /// Emits zero or more intermediate pairs for one input record.
    fn map(&self, record: &Record, out: &mut dyn Emitter<Self::Key, Self::Value>) -> Result<()>;

    /// The optional combiner, applied per exact key to map task output.
    fn combiner(&self) -> Option<&dyn Combiner<Self::Key, Self::Value>> {
        None
    }

    /// Chooses the reduce unit for `key`, in `0..partitions_count`.
    ///
    /// Every key that [`MapReduceJob::same_group`] puts into one group must map to the
    /// same unit.
    fn partition(&self, key: &Self::Key, partitions_count: usize) -> usize;

    /// Grouping predicate over adjacent sorted keys. Consecutive keys for which this
    /// returns `true` are delivered to a single [`MapReduceJob::reduce`] call.
    ///
    /// Defaults to key equality, i.e. one group per distinct key.
    fn same_group(&self, a: &Self::Key, b: &Self::Key) -> bool {
        a == b
    }

    /// Reduces one group. Within a reduce unit, groups arrive in ascending key order.
    fn reduce(
        &self,
        group: Group<Self::Key, Self::Value>,
        out: &mut dyn Emitter<Self::OutputKey, Self::OutputValue>,
    ) -> Result<()>;
}
