//! A partition-refinement structure over `{0..n-1}` with a worklist.
//!
//! Blocks are contiguous ranges of one shared element permutation, so
//! splitting moves elements by swapping instead of allocating. Used by the
//! Hopcroft minimizer, which repeatedly refines the state partition by
//! transition preimages until it stabilizes.

/// A block of the partition, a contiguous range `[start, end)` of the
/// element permutation.
#[derive(Debug, Clone)]
struct Block {
    start: usize,
    end: usize,
    /// If true, this block is present in the `unprocessed` stack. The stack
    /// may additionally contain stale indices with this flag cleared.
    in_worklist: bool,
    /// The block receiving elements split off during the current refine call.
    sibling: Option<usize>,
}

impl Block {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A refinable partition of `{0..n-1}`, initially one block holding everything.
#[derive(Debug, Clone)]
pub(crate) struct Partition {
    /// A permutation of `0..n`; every block is a contiguous range of it.
    elements: Vec<usize>,
    /// Inverse of `elements`: `positions[elements[i]] == i`.
    positions: Vec<usize>,
    /// The block index each element currently belongs to.
    block_of: Vec<usize>,
    blocks: Vec<Block>,
    /// Stack of blocks awaiting processing; entries whose block has
    /// `in_worklist == false` are stale and skipped on pop.
    unprocessed: Vec<usize>,
    /// Number of non-empty blocks.
    live: usize,
}

impl Partition {
    /// Create the trivial partition of `{0..n-1}`.
    pub(crate) fn new(n: usize) -> Self {
        Self {
            elements: (0..n).collect(),
            positions: (0..n).collect(),
            block_of: vec![0; n],
            blocks: vec![Block {
                start: 0,
                end: n,
                in_worklist: false,
                sibling: None,
            }],
            unprocessed: Vec::new(),
            live: usize::from(n > 0),
        }
    }

    /// The number of elements partitioned.
    #[allow(dead_code)]
    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    /// The number of non-empty blocks.
    pub(crate) fn block_count(&self) -> usize {
        self.live
    }

    /// Split every block along the given set. Elements of `set` must be
    /// pairwise distinct. Costs O(|set|).
    ///
    /// A block B intersecting `set` is split into B ∩ set (moved into a fresh
    /// sibling block adjacent to B) and B \ set. Afterwards, for each split
    /// block: if B emptied out the sibling simply replaces it; otherwise the
    /// smaller half is scheduled, unless B already was, in which case both
    /// halves end up scheduled.
    pub(crate) fn refine(&mut self, set: &[usize]) {
        let mut touched = Vec::new();
        for &x in set {
            let b = self.block_of[x];
            let sibling = match self.blocks[b].sibling {
                Some(sibling) => sibling,
                None => {
                    let sibling = self.blocks.len();
                    let boundary = self.blocks[b].end;
                    let in_worklist = self.blocks[b].in_worklist;
                    self.blocks.push(Block {
                        start: boundary,
                        end: boundary,
                        in_worklist,
                        sibling: None,
                    });
                    self.blocks[b].sibling = Some(sibling);
                    if in_worklist {
                        self.unprocessed.push(sibling);
                    }
                    touched.push(b);
                    sibling
                }
            };
            // Move x to the sibling by swapping it with the last element of b.
            let position = self.positions[x];
            let last = self.blocks[b].end - 1;
            let displaced = self.elements[last];
            self.elements.swap(position, last);
            self.positions[x] = last;
            self.positions[displaced] = position;
            self.blocks[b].end = last;
            self.blocks[sibling].start = last;
            self.block_of[x] = sibling;
        }
        for b in touched {
            let sibling = self.blocks[b].sibling.take().expect("block was touched");
            if self.blocks[b].is_empty() {
                // The whole block moved: the sibling replaced it and no split
                // happened. Any stack entry for b is now stale.
                self.blocks[b].in_worklist = false;
                continue;
            }
            self.live += 1;
            if !self.blocks[b].in_worklist {
                let smaller = if self.blocks[b].len() <= self.blocks[sibling].len() {
                    b
                } else {
                    sibling
                };
                self.blocks[smaller].in_worklist = true;
                self.unprocessed.push(smaller);
            }
        }
    }

    /// Pop the next scheduled block and return a copy of its elements, or
    /// None once the worklist is exhausted. Stale stack entries are skipped.
    pub(crate) fn poll_unprocessed(&mut self) -> Option<Vec<usize>> {
        while let Some(b) = self.unprocessed.pop() {
            if self.blocks[b].in_worklist {
                self.blocks[b].in_worklist = false;
                let block = &self.blocks[b];
                return Some(self.elements[block.start..block.end].to_vec());
            }
        }
        None
    }

    /// The canonical representative of the block containing `x`: the element
    /// at the block's start position.
    pub(crate) fn representative(&self, x: usize) -> usize {
        self.elements[self.blocks[self.block_of[x]].start]
    }

    /// Check if two elements are currently in the same block.
    #[allow(dead_code)]
    pub(crate) fn same_block(&self, x: usize, y: usize) -> bool {
        self.block_of[x] == self.block_of[y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_block(partition: &Partition, x: usize) -> Vec<usize> {
        let mut block: Vec<usize> = (0..partition.len())
            .filter(|&y| partition.same_block(x, y))
            .collect();
        block.sort_unstable();
        block
    }

    #[test]
    fn test_single_refine_splits_once() {
        let mut partition = Partition::new(6);
        assert_eq!(partition.block_count(), 1);
        partition.refine(&[1, 3, 5]);
        assert_eq!(partition.block_count(), 2);
        assert_eq!(sorted_block(&partition, 1), vec![1, 3, 5]);
        assert_eq!(sorted_block(&partition, 0), vec![0, 2, 4]);
        assert!(!partition.same_block(0, 1));
    }

    #[test]
    fn test_refine_by_superset_is_noop() {
        let mut partition = Partition::new(4);
        partition.refine(&[0, 1, 2, 3]);
        assert_eq!(partition.block_count(), 1);
        assert_eq!(sorted_block(&partition, 0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_refine_splits_several_blocks() {
        let mut partition = Partition::new(8);
        partition.refine(&[0, 1, 2, 3]);
        partition.refine(&[2, 3, 4, 5]);
        assert_eq!(partition.block_count(), 4);
        assert_eq!(sorted_block(&partition, 0), vec![0, 1]);
        assert_eq!(sorted_block(&partition, 2), vec![2, 3]);
        assert_eq!(sorted_block(&partition, 4), vec![4, 5]);
        assert_eq!(sorted_block(&partition, 6), vec![6, 7]);
    }

    #[test]
    fn test_representative_is_shared_within_block() {
        let mut partition = Partition::new(5);
        partition.refine(&[1, 4]);
        assert_eq!(partition.representative(1), partition.representative(4));
        assert_eq!(partition.representative(0), partition.representative(2));
        assert_ne!(partition.representative(0), partition.representative(4));
    }

    #[test]
    fn test_worklist_drains() {
        let mut partition = Partition::new(6);
        partition.refine(&[0, 1]);
        let first = partition.poll_unprocessed().expect("one block scheduled");
        // The smaller half of the split was scheduled.
        assert_eq!(first.len(), 2);
        assert_eq!(partition.poll_unprocessed(), None);
    }

    #[test]
    fn test_split_of_scheduled_block_schedules_both_halves() {
        let mut partition = Partition::new(6);
        partition.refine(&[0, 1]);
        // {0, 1} is in the worklist; splitting it must leave both halves
        // scheduled.
        partition.refine(&[0]);
        let mut drained = Vec::new();
        while let Some(block) = partition.poll_unprocessed() {
            drained.extend(block);
        }
        drained.sort_unstable();
        assert_eq!(drained, vec![0, 1]);
    }
}
