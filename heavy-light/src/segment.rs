use std::ops::Range;

use crate::HeavyLightDecomposition;

/// パス内を辿る向き
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// パス内位置が増える向き(根から離れる向き)
    Ascending,
    /// パス内位置が減る向き(根に近づく向き)
    Descending,
}

impl Direction {
    pub const fn reverse(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// Heavy path上の連続区間。`range`は常に`start < end`の半開区間で、
/// 辿る向きは`direction`が持つ。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub path: usize,
    pub range: Range<usize>,
    pub direction: Direction,
}

impl Segment {
    pub(crate) fn new(path: usize, range: Range<usize>, direction: Direction) -> Self {
        debug_assert!(range.start < range.end);
        Self {
            path,
            range,
            direction,
        }
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn is_ascending(&self) -> bool {
        self.direction == Direction::Ascending
    }

    /// 向きを考慮した最初のパス内位置
    pub fn first(&self) -> usize {
        match self.direction {
            Direction::Ascending => self.range.start,
            Direction::Descending => self.range.end - 1,
        }
    }

    /// 向きを考慮した最後のパス内位置
    pub fn last(&self) -> usize {
        match self.direction {
            Direction::Ascending => self.range.end - 1,
            Direction::Descending => self.range.start,
        }
    }

    /// 区間に含まれる頂点を辿る順に列挙する。
    pub fn vertices<'a>(
        &'a self,
        hld: &'a HeavyLightDecomposition,
    ) -> impl Iterator<Item = usize> + 'a {
        let Range { start, end } = self.range;
        (0..self.len()).map(move |k| {
            let i = match self.direction {
                Direction::Ascending => start + k,
                Direction::Descending => end - 1 - k,
            };
            hld.vertex_id(self.path, i)
        })
    }
}
