pub mod lazy;
pub mod operation;

use operation::Operator;
use std::{
    cmp::Ordering,
    iter,
    ops::{Bound, Deref, DerefMut, RangeBounds},
};

pub use lazy::LazySegtree;

#[derive(Debug, Clone)]
pub struct Segtree<T, OP> {
    /// 葉の数(2べき)
    size: usize,
    /// 論理的な要素数
    len: usize,
    data: Box<[T]>,
    op: OP,
}

impl<T, OP> Segtree<T, OP> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 内部で確保している葉の数。`self.len()`以上の最小の2べき。
    pub fn capacity(&self) -> usize {
        self.size
    }

    pub fn operator(&self) -> &OP {
        &self.op
    }

    pub fn into_vec(self) -> Vec<T> {
        let Self { size, len, data, .. } = self;
        data.into_vec().into_iter().skip(size).take(len).collect()
    }
}

impl<T, OP> Deref for Segtree<T, OP> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.data[self.size..self.size + self.len]
    }
}

/// 戻り値を`(l, r)`とすると以下が保証される。
///
/// * `l <= r <= len`
pub(crate) fn get_lr<R: RangeBounds<usize>>(len: usize, range: R) -> (usize, usize) {
    use Bound::*;
    let l = match range.start_bound() {
        Excluded(s) => s
            .checked_add(1)
            .unwrap_or_else(|| panic!("attempted to index slice from after maximum usize")),
        Included(s) => *s,
        Unbounded => 0,
    };
    let r = match range.end_bound() {
        Excluded(e) => *e,
        Included(e) => e
            .checked_add(1)
            .unwrap_or_else(|| panic!("attempted to index slice up to maximum usize")),
        Unbounded => len,
    };
    if l > r {
        panic!("slice index starts at {l} but ends at {r}");
    } else if r > len {
        panic!("range end index {r} out of range for slice of length {len}");
    }
    (l, r)
}

impl<T, OP: Operator<Query = T>> Segtree<T, OP> {
    fn eval(mut self) -> Self {
        for i in (1..self.size).rev() {
            self.data[i] = self.op.op(&self.data[i * 2], &self.data[i * 2 + 1]);
        }
        self
    }

    /// 葉を`len`個持ち、すべて単位元で初期化されたセグメント木を作る。
    pub fn new_op(len: usize, op: OP) -> Self {
        let size = len.next_power_of_two();
        let data = iter::repeat_with(|| op.ident()).take(size * 2).collect();
        Self {
            size,
            len,
            data,
            op,
        }
    }

    /// `iter`の要素を左から順に葉に並べる。要素数がそのまま`self.len()`になる。
    pub fn from_iter_op<I: IntoIterator<Item = T>>(iter: I, op: OP) -> Self {
        let values = iter.into_iter().collect::<Vec<_>>();
        let len = values.len();
        let size = len.next_power_of_two();
        let data = iter::repeat_with(|| op.ident())
            .take(size)
            .chain(
                values
                    .into_iter()
                    .chain(iter::repeat_with(|| op.ident()))
                    .take(size),
            )
            .collect();
        Self {
            size,
            len,
            data,
            op,
        }
        .eval()
    }

    pub fn get(&self, index: usize) -> &T {
        &self[index]
    }

    pub fn query<R: RangeBounds<usize>>(&self, range: R) -> T {
        let (mut l, mut r) = get_lr(self.len, range);
        l += self.size;
        r += self.size;
        let mut query_l = self.op.ident();
        let mut query_r = self.op.ident();
        while l < r {
            if r & 1 == 1 {
                r -= 1;
                query_r = self.op.op(&self.data[r], &query_r);
            }
            if l & 1 == 1 {
                query_l = self.op.op(&query_l, &self.data[l]);
                l += 1;
            }
            l >>= 1;
            r >>= 1;
        }
        self.op.op(&query_l, &query_r)
    }

    pub fn get_mut(&mut self, index: usize) -> ValMut<'_, T, OP> {
        assert!(
            index < self.len,
            "index {index} out of range for slice of length {}",
            self.len
        );
        ValMut {
            index: index + self.size,
            segtree: self,
        }
    }

    fn update_val(&mut self, mut i: usize) {
        while i > 1 {
            i >>= 1;
            self.data[i] = self.op.op(&self.data[i * 2], &self.data[i * 2 + 1]);
        }
    }

    pub fn update(&mut self, index: usize, value: T) {
        *self.get_mut(index) = value;
    }

    /// `pred(self.query(l..j))`が`true`となる最大の`j`をO(log(n))で求める。
    ///
    /// `pred(&ident)`は`true`である必要がある。
    pub fn upper_bound<P>(&self, l: usize, mut pred: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        match l.cmp(&self.len) {
            Ordering::Equal => return l,
            Ordering::Greater => {
                panic!("index {l} out of range for slice of length {}", self.len)
            }
            _ => {}
        };
        let mut l = l + self.size;
        let mut l_query = self.op.ident();
        loop {
            while l & 1 == 0 {
                l >>= 1;
            }
            let next_query = self.op.op(&l_query, &self.data[l]);
            if !pred(&next_query) {
                while l < self.size {
                    l <<= 1;
                    let next_query = self.op.op(&l_query, &self.data[l]);
                    if pred(&next_query) {
                        l_query = next_query;
                        l += 1;
                    }
                }
                return l - self.size;
            }
            l_query = next_query;
            l += 1;
            if l.is_power_of_two() {
                return self.len;
            }
        }
    }

    /// `pred(self.query(j..r))`が`true`となる最小の`j`をO(log(n))で求める。
    ///
    /// `pred(&ident)`は`true`である必要がある。
    pub fn lower_bound<P>(&self, r: usize, mut pred: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        if r > self.len {
            panic!("index {r} out of range for slice of length {}", self.len)
        }
        if r == 0 {
            return 0;
        }
        let mut r = r + self.size;
        let mut r_query = self.op.ident();
        loop {
            r -= 1;
            while r > 1 && r & 1 == 1 {
                r >>= 1;
            }
            let next_query = self.op.op(&self.data[r], &r_query);
            if !pred(&next_query) {
                while r < self.size {
                    r = (r << 1) + 1;
                    let next_query = self.op.op(&self.data[r], &r_query);
                    if pred(&next_query) {
                        r_query = next_query;
                        r -= 1;
                    }
                }
                return r + 1 - self.size;
            }
            r_query = next_query;
            if r.is_power_of_two() {
                return 0;
            }
        }
    }
}

impl<T: Clone, OP: Operator<Query = T>> Segtree<T, OP> {
    /// 全要素を`value`にする。O(n)
    pub fn fill(&mut self, value: T) {
        let (size, len) = (self.size, self.len);
        self.data[size..size + len].fill(value);
        for i in (1..size).rev() {
            self.data[i] = self.op.op(&self.data[i * 2], &self.data[i * 2 + 1]);
        }
    }
}

pub struct ValMut<'a, T, OP: Operator<Query = T>> {
    segtree: &'a mut Segtree<T, OP>,
    index: usize,
}

impl<T, OP: Operator<Query = T>> Deref for ValMut<'_, T, OP> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.segtree.data[self.index]
    }
}

impl<T, OP: Operator<Query = T>> DerefMut for ValMut<'_, T, OP> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.segtree.data[self.index]
    }
}

impl<T, OP: Operator<Query = T>> Drop for ValMut<'_, T, OP> {
    fn drop(&mut self) {
        self.segtree.update_val(self.index);
    }
}

impl<I, OP> FromIterator<I> for Segtree<I, OP>
where
    OP: Default + Operator<Query = I>,
{
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self::from_iter_op(iter, OP::default())
    }
}

impl<T, OP> From<Segtree<T, OP>> for Vec<T> {
    fn from(value: Segtree<T, OP>) -> Self {
        value.into_vec()
    }
}
