// strand/src/chain/adapters.rs

//! Built-in chain verbs. Each captures its arguments now and queues one
//! auto-advancing step that applies the operation when drained.
//!
//! `map`, `filter`, `reverse`, `slice`, `splice`, `sort`, `sort_by` and `concat`
//! replace the sequence with the operation's result. `append` and `prepend`
//! insert into the live sequence in place.

use crate::chain::definition::Strand;
use crate::core::step::Step;
use std::cmp::Ordering;

impl<T: Clone + Send + Sync + 'static> Strand<T> {
  pub fn map(&self, mut f: impl FnMut(&T) -> T + Send + 'static) -> &Self {
    self.push(Step::auto("map", move |access| {
      let mapped: Vec<T> = access.read().iter().map(&mut f).collect();
      access.set(mapped);
      Ok(())
    }))
  }

  pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool + Send + 'static) -> &Self {
    self.push(Step::auto("filter", move |access| {
      let kept: Vec<T> = access.read().iter().filter(|item| predicate(*item)).cloned().collect();
      access.set(kept);
      Ok(())
    }))
  }

  pub fn reverse(&self) -> &Self {
    self.push(Step::auto("reverse", |access| {
      let mut reversed = access.get();
      reversed.reverse();
      access.set(reversed);
      Ok(())
    }))
  }

  /// Keeps `[start, end)`. Negative indices count from the end; both are
  /// clamped to the sequence, and `end: None` means the end.
  pub fn slice(&self, start: isize, end: Option<isize>) -> &Self {
    self.push(Step::auto("slice", move |access| {
      let sliced = {
        let sequence = access.read();
        let len = sequence.len();
        let from = relative_index(start, len);
        let to = end.map_or(len, |end| relative_index(end, len));
        if from < to {
          sequence[from..to].to_vec()
        } else {
          Vec::new()
        }
      };
      access.set(sliced);
      Ok(())
    }))
  }

  /// Removes `delete_count` items at `start` (all remaining when `None`) and
  /// inserts `items` there. The sequence then becomes the REMOVED items, which
  /// is what the splice operation returns.
  pub fn splice(&self, start: isize, delete_count: Option<usize>, items: Vec<T>) -> &Self {
    self.push(Step::auto("splice", move |access| {
      let removed: Vec<T> = {
        let mut sequence = access.write();
        let len = sequence.len();
        let from = relative_index(start, len);
        let count = delete_count.unwrap_or(len - from).min(len - from);
        sequence.splice(from..from + count, items).collect()
      };
      access.set(removed);
      Ok(())
    }))
  }

  /// Stable sort with `compare`.
  pub fn sort_by(&self, mut compare: impl FnMut(&T, &T) -> Ordering + Send + 'static) -> &Self {
    self.push(Step::auto("sort", move |access| {
      let mut sorted = access.get();
      sorted.sort_by(&mut compare);
      access.set(sorted);
      Ok(())
    }))
  }

  pub fn concat(&self, items: impl IntoIterator<Item = T>) -> &Self {
    let items: Vec<T> = items.into_iter().collect();
    self.push(Step::auto("concat", move |access| {
      let mut joined = access.get();
      joined.extend(items);
      access.set(joined);
      Ok(())
    }))
  }

  /// Pushes `values` onto the end of the live sequence, in order.
  pub fn append(&self, values: impl IntoIterator<Item = T>) -> &Self {
    let values: Vec<T> = values.into_iter().collect();
    self.push(Step::auto("append", move |access| {
      access.write().extend(values);
      Ok(())
    }))
  }

  /// Inserts `values` at the front of the live sequence, keeping their order.
  pub fn prepend(&self, values: impl IntoIterator<Item = T>) -> &Self {
    let mut values: Vec<T> = values.into_iter().collect();
    self.push(Step::auto("prepend", move |access| {
      let mut sequence = access.write();
      values.append(&mut sequence);
      *sequence = values;
      Ok(())
    }))
  }
}

impl<T: Ord + Clone + Send + Sync + 'static> Strand<T> {
  /// Stable sort by `T`'s natural order.
  pub fn sort(&self) -> &Self {
    self.sort_by(T::cmp)
  }
}

// Resolves an index that may count from the end, clamped to `0..=len`.
fn relative_index(index: isize, len: usize) -> usize {
  if index < 0 {
    len.saturating_sub(index.unsigned_abs())
  } else {
    (index as usize).min(len)
  }
}
