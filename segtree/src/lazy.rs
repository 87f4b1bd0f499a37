use std::{iter, mem, ops::RangeBounds};

use super::{get_lr, operation::LazyOperator, Segtree};

/// 遅延伝搬セグメント木
///
/// 各節点は、自身より上の節点の作用素がすべて伝搬された後に
/// `op.resolve(l, r, &data[k], &lazy[k])`が区間`[l, r)`の値となる状態を保つ。
#[derive(Debug, Clone)]
pub struct LazySegtree<T, F, OP> {
    size: usize,
    len: usize,
    data: Box<[T]>,
    lazy: Box<[F]>,
    op: OP,
}

impl<T, F, OP> LazySegtree<T, F, OP> {
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn operator(&self) -> &OP {
        &self.op
    }

    /// 節点`k`が担当する区間
    fn span(&self, k: usize) -> (usize, usize) {
        let depth = k.ilog2();
        let width = self.size >> depth;
        let l = (k - (1 << depth)) * width;
        (l, l + width)
    }
}

impl<T, F, OP: LazyOperator<Query = T, Modifier = F>> LazySegtree<T, F, OP> {
    pub fn new_op(len: usize, op: OP) -> Self {
        Self::from_segtree(Segtree::new_op(len, op))
    }

    pub fn from_iter_op<I>(iter: I, op: OP) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_segtree(Segtree::from_iter_op(iter, op))
    }

    pub fn from_segtree(segtree: Segtree<T, OP>) -> Self {
        let Segtree {
            size,
            len,
            data,
            op,
        } = segtree;
        let lazy = iter::repeat_with(|| op.ident_modifier())
            .take(data.len())
            .collect();
        Self {
            size,
            len,
            data,
            lazy,
            op,
        }
    }

    fn resolved(&self, k: usize, l: usize, r: usize) -> T {
        self.op.resolve(l, r, &self.data[k], &self.lazy[k])
    }

    /// 節点`k`の作用素を自身の値に反映し、子に伝搬させる。`k`は葉であってはならない。
    fn push(&mut self, k: usize, l: usize, r: usize) {
        let lazy = mem::replace(&mut self.lazy[k], self.op.ident_modifier());
        self.data[k] = self.op.resolve(l, r, &self.data[k], &lazy);
        self.lazy[k * 2] = self.op.merge_modifier(&self.lazy[k * 2], &lazy);
        self.lazy[k * 2 + 1] = self.op.merge_modifier(&self.lazy[k * 2 + 1], &lazy);
    }

    fn eval(&mut self, k: usize, l: usize, r: usize) {
        let c = (l + r) / 2;
        let vl = self.resolved(k * 2, l, c);
        let vr = self.resolved(k * 2 + 1, c, r);
        self.data[k] = self.op.op(&vl, &vr);
    }

    fn modify_rec(&mut self, a: usize, b: usize, k: usize, l: usize, r: usize, m: &F) {
        if r <= a || b <= l {
            return;
        }
        if a <= l && r <= b {
            self.lazy[k] = self.op.merge_modifier(&self.lazy[k], m);
            return;
        }
        self.push(k, l, r);
        let c = (l + r) / 2;
        self.modify_rec(a, b, k * 2, l, c, m);
        self.modify_rec(a, b, k * 2 + 1, c, r, m);
        self.eval(k, l, r);
    }

    fn query_rec(&mut self, a: usize, b: usize, k: usize, l: usize, r: usize) -> T {
        if r <= a || b <= l {
            return self.op.ident();
        }
        if a <= l && r <= b {
            return self.resolved(k, l, r);
        }
        self.push(k, l, r);
        let c = (l + r) / 2;
        let vl = self.query_rec(a, b, k * 2, l, c);
        let vr = self.query_rec(a, b, k * 2 + 1, c, r);
        self.op.op(&vl, &vr)
    }

    /// 区間内の全要素に作用素`m`を作用させる。O(log(n))
    pub fn modify<R: RangeBounds<usize>>(&mut self, range: R, m: F) {
        let (a, b) = get_lr(self.len, range);
        if a < b {
            self.modify_rec(a, b, 1, 0, self.size, &m);
        }
    }

    /// O(log(n))
    pub fn query<R: RangeBounds<usize>>(&mut self, range: R) -> T {
        let (a, b) = get_lr(self.len, range);
        if a < b {
            self.query_rec(a, b, 1, 0, self.size)
        } else {
            self.op.ident()
        }
    }

    pub fn get(&mut self, index: usize) -> T {
        self.query(index..=index)
    }

    /// `index`番目の要素を`value`で置き換える。O(log(n))
    pub fn set(&mut self, index: usize, value: T) {
        assert!(
            index < self.len,
            "index {index} out of range for slice of length {}",
            self.len
        );
        let leaf = index + self.size;
        for j in (1..=self.size.trailing_zeros()).rev() {
            let k = leaf >> j;
            let (l, r) = self.span(k);
            self.push(k, l, r);
        }
        self.data[leaf] = value;
        self.lazy[leaf] = self.op.ident_modifier();
        let mut k = leaf;
        while k > 1 {
            k >>= 1;
            let (l, r) = self.span(k);
            self.eval(k, l, r);
        }
    }

    fn apply_all(&mut self) {
        for k in 1..self.size {
            let (l, r) = self.span(k);
            self.push(k, l, r);
        }
        for i in 0..self.size {
            let k = i + self.size;
            let lazy = mem::replace(&mut self.lazy[k], self.op.ident_modifier());
            self.data[k] = self.op.resolve(i, i + 1, &self.data[k], &lazy);
        }
    }

    /// 作用素をすべて作用させた後の配列を返す。データ数をnとすると、O(n)時間かかることに注意。
    pub fn borrow_data(&mut self) -> &[T] {
        self.apply_all();
        &self.data[self.size..self.size + self.len]
    }

    pub fn into_vec(mut self) -> Vec<T> {
        self.apply_all();
        let Self { size, len, data, .. } = self;
        data.into_vec().into_iter().skip(size).take(len).collect()
    }
}

impl<T, F, OP> FromIterator<T> for LazySegtree<T, F, OP>
where
    OP: Default + LazyOperator<Query = T, Modifier = F>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_op(iter, OP::default())
    }
}

#[cfg(test)]
mod tests {
    use super::super::operation;
    use super::*;

    #[test]
    fn build_test() {
        let segtree = LazySegtree::from_iter_op((0..14).map(Some), operation::range_add_min());
        assert_eq!(segtree.len(), 14);
        assert_eq!(segtree.size, 16);
        let expected = [
            0, 0, 8, 0, 4, 8, 12, 0, 2, 4, 6, 8, 10, 12, -1, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11,
            12, 13, -1, -1,
        ]
        .map(|x| (x >= 0).then_some(x));
        assert_eq!(&segtree.data[1..], &expected);
        assert_eq!(segtree.operator(), &operation::range_add_min());
    }

    #[test]
    fn span_test() {
        let segtree = LazySegtree::new_op(8, operation::range_add_sum::<i64>());
        assert_eq!(segtree.span(1), (0, 8));
        assert_eq!(segtree.span(3), (4, 8));
        assert_eq!(segtree.span(5), (2, 4));
        assert_eq!(segtree.span(12), (4, 5));
    }

    #[test]
    fn update_range_test() {
        let mut segtree = LazySegtree::from_iter_op((0..14).map(Some), operation::range_add_min());
        segtree.modify(3..7, 1);
        // [0, 1, 2, 4, 5, 6, 7, 7, 8, 9, 10, 11, 12, 13]
        segtree.modify(8..12, 1);
        // [0, 1, 2, 4, 5, 6, 7, 7, 9, 10, 11, 12, 12, 13]
        segtree.modify(6.., -2);
        // [0, 1, 2, 4, 5, 6, 5, 5, 7, 8, 9, 10, 10, 11]
        assert_eq!(segtree.query(3..), Some(4));
        assert_eq!(segtree.query(5..), Some(5));
        assert_eq!(segtree.query(8..), Some(7));
        assert_eq!(segtree.query(12..13), Some(10));
        assert_eq!(segtree.query(4..4), None);
        assert_eq!(
            segtree.borrow_data(),
            &[0, 1, 2, 4, 5, 6, 5, 5, 7, 8, 9, 10, 10, 11].map(Some)
        );
    }

    #[test]
    fn range_add_sum_test() {
        let mut segtree = [1i64, 2, 3, 4, 5]
            .into_iter()
            .collect::<LazySegtree<i64, i64, operation::RangeAddSum<i64>>>();
        assert_eq!(segtree.query(..), 15);
        segtree.modify(1..4, 10);
        assert_eq!(segtree.query(..), 45);
        assert_eq!(segtree.query(0..2), 13);
        assert_eq!(segtree.query(3..), 19);
        assert_eq!(segtree.query(2..2), 0);
        segtree.modify(.., -1);
        assert_eq!(segtree.query(..), 40);
        assert_eq!(segtree.get(2), 12);
    }

    #[test]
    fn nested_pending_test() {
        let mut segtree = LazySegtree::new_op(8, operation::range_add_sum::<i64>());
        // 全体に保留
        segtree.modify(.., 1);
        // 保留の内側
        segtree.modify(2..4, 10);
        // 保留をまたぐ
        segtree.modify(3..6, 100);
        // 範囲外
        segtree.modify(7..7, 1000);
        assert_eq!(segtree.borrow_data(), &[1, 1, 11, 111, 101, 101, 1, 1]);
        assert_eq!(segtree.query(..), 328);
        assert_eq!(segtree.query(3..5), 212);
    }

    #[test]
    fn assign_test() {
        let mut segtree =
            LazySegtree::from_iter_op([5i32, 5, 5, 5, 5, 5], operation::range_assign_sum());
        segtree.modify(1..5, Some(2));
        segtree.modify(3..6, Some(7));
        assert_eq!(segtree.query(..), 5 + 2 + 2 + 7 + 7 + 7);
        segtree.modify(0..6, None);
        assert_eq!(segtree.query(2..4), 9);
        segtree.set(3, 100);
        assert_eq!(segtree.query(2..4), 102);
        assert_eq!(segtree.into_vec(), vec![5, 2, 2, 100, 7, 7]);
    }

    #[test]
    fn set_test() {
        let mut segtree = LazySegtree::new_op(5, operation::range_add_max::<i32>());
        assert_eq!(segtree.query(..), None);
        for i in 0..5 {
            segtree.set(i, Some(0));
        }
        segtree.modify(.., 3);
        segtree.set(2, Some(-10));
        assert_eq!(segtree.query(..), Some(3));
        assert_eq!(segtree.query(2..3), Some(-10));
        segtree.modify(1..3, 20);
        assert_eq!(segtree.query(2..), Some(10));
        assert_eq!(segtree.query(..2), Some(23));
    }

    #[test]
    fn extreme_value_test() {
        let mut segtree =
            LazySegtree::from_iter_op([Some(i32::MAX), Some(0)], operation::range_add_min());
        segtree.modify(0..1, -1);
        assert_eq!(segtree.query(0..1), Some(i32::MAX - 1));
        assert_eq!(segtree.query(..), Some(0));

        let mut segtree = LazySegtree::from_iter_op(
            [Some(i64::MIN), Some(i64::MIN)],
            operation::range_add_max(),
        );
        segtree.modify(..1, 5);
        assert_eq!(segtree.query(..), Some(i64::MIN + 5));
        segtree.modify(.., 1);
        assert_eq!(segtree.into_vec(), vec![Some(i64::MIN + 6), Some(i64::MIN + 1)]);
    }

    #[test]
    fn update_range_all() {
        let n = 16;
        let mut segtree = LazySegtree::new_op(n, operation::range_add_sum::<i64>());
        let mut naive = vec![0i64; n];
        for d in 0..=n {
            for l in 0..=n - d {
                segtree.modify(l..l + d, 1);
                naive[l..l + d].iter_mut().for_each(|x| *x += 1);
            }
        }
        assert_eq!(segtree.borrow_data(), &naive[..]);
        assert_eq!(segtree.query(..), naive.iter().sum::<i64>());
    }
}
