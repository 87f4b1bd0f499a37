//! Heavy pathごとのセグメント木を束ねて、木のパスに対するクエリを処理する。
//!
//! 頂点の値はパス内位置の昇順(根に近い順)にセグメント木へ並べる。
//! `Descending`な区間の畳み込みは根に近い側から順に計算されるので、
//! 非可換な演算では呼び出し側が`reverse`で向きを直す。

use segtree::{
    lazy::LazySegtree,
    operation::{Commutative, LazyOperator, Operator},
    Segtree,
};

use crate::{Direction, HeavyLightDecomposition, Segment};

fn orient<T, R: FnMut(T) -> T>(segment: &Segment, value: T, reverse: &mut R) -> T {
    match segment.direction {
        Direction::Ascending => value,
        Direction::Descending => reverse(value),
    }
}

/// 頂点に値を持つ木のパス上の総積。点更新O(log(n))、パスクエリO(log(n)^2)
#[derive(Debug, Clone)]
pub struct PathSegtree<T, OP> {
    hld: HeavyLightDecomposition,
    trees: Vec<Segtree<T, OP>>,
    op: OP,
}

impl<T: Clone, OP: Operator<Query = T> + Clone> PathSegtree<T, OP> {
    /// `values[v]`を頂点`v`の値とする。
    ///
    /// # Panics
    ///
    /// `values`の長さが頂点数と異なるとき。
    pub fn with_op(hld: HeavyLightDecomposition, values: &[T], op: OP) -> Self {
        assert_eq!(values.len(), hld.len(), "expected one value per vertex");
        let trees = (0..hld.path_count())
            .map(|p| {
                Segtree::from_iter_op(
                    hld.path_vertices(p).iter().map(|&v| values[v].clone()),
                    op.clone(),
                )
            })
            .collect();
        Self { hld, trees, op }
    }

    pub fn decomposition(&self) -> &HeavyLightDecomposition {
        &self.hld
    }

    pub fn get(&self, v: usize) -> &T {
        self.trees[self.hld.path_id(v)].get(self.hld.local_index(v))
    }

    pub fn set(&mut self, v: usize, value: T) {
        let (p, i) = (self.hld.path_id(v), self.hld.local_index(v));
        self.trees[p].update(i, value);
    }

    /// 頂点`v`の値をその場で書き換える。
    pub fn update_with<F: FnOnce(&mut T)>(&mut self, v: usize, f: F) {
        let (p, i) = (self.hld.path_id(v), self.hld.local_index(v));
        let mut value = self.trees[p].get_mut(i);
        f(&mut *value);
    }

    /// `a`から`b`へのパス上の値を辿る順に畳み込む。
    pub fn path_fold<R: FnMut(T) -> T>(&self, a: usize, b: usize, mut reverse: R) -> T {
        let mut acc = self.op.ident();
        for segment in self.hld.shortest_path(a, b) {
            let x = self.trees[segment.path].query(segment.range.clone());
            let x = orient(&segment, x, &mut reverse);
            acc = self.op.op(&acc, &x);
        }
        acc
    }

    /// 頂点ごとの値を頂点番号順に並べて返す。
    pub fn to_vec(&self) -> Vec<T> {
        (0..self.hld.len()).map(|v| self.get(v).clone()).collect()
    }
}

impl<T: Clone, OP: Operator<Query = T> + Clone + Default> PathSegtree<T, OP> {
    pub fn new(hld: HeavyLightDecomposition, values: &[T]) -> Self {
        Self::with_op(hld, values, OP::default())
    }
}

impl<T: Clone, OP: Commutative + Operator<Query = T> + Clone> PathSegtree<T, OP> {
    /// 交換則を満たす演算でのパス上の総積
    pub fn path_query(&self, a: usize, b: usize) -> T {
        self.path_fold(a, b, |x| x)
    }
}

/// パスへの一括作用とパス上の総積を扱う。どちらもO(log(n)^2)
#[derive(Debug, Clone)]
pub struct LazyPathSegtree<T, F, OP> {
    hld: HeavyLightDecomposition,
    trees: Vec<LazySegtree<T, F, OP>>,
    op: OP,
}

impl<T, F, OP> LazyPathSegtree<T, F, OP>
where
    T: Clone,
    F: Clone,
    OP: LazyOperator<Query = T, Modifier = F> + Clone,
{
    /// # Panics
    ///
    /// `values`の長さが頂点数と異なるとき。
    pub fn with_op(hld: HeavyLightDecomposition, values: &[T], op: OP) -> Self {
        assert_eq!(values.len(), hld.len(), "expected one value per vertex");
        let trees = (0..hld.path_count())
            .map(|p| {
                LazySegtree::from_iter_op(
                    hld.path_vertices(p).iter().map(|&v| values[v].clone()),
                    op.clone(),
                )
            })
            .collect();
        Self { hld, trees, op }
    }

    pub fn decomposition(&self) -> &HeavyLightDecomposition {
        &self.hld
    }

    pub fn get(&mut self, v: usize) -> T {
        let (p, i) = (self.hld.path_id(v), self.hld.local_index(v));
        self.trees[p].get(i)
    }

    pub fn set(&mut self, v: usize, value: T) {
        let (p, i) = (self.hld.path_id(v), self.hld.local_index(v));
        self.trees[p].set(i, value);
    }

    pub fn modify_vertex(&mut self, v: usize, m: F) {
        let (p, i) = (self.hld.path_id(v), self.hld.local_index(v));
        self.trees[p].modify(i..=i, m);
    }

    /// `a`から`b`へのパス上の全頂点に`m`を作用させる。
    pub fn path_modify(&mut self, a: usize, b: usize, m: F) {
        for segment in self.hld.shortest_path(a, b) {
            self.trees[segment.path].modify(segment.range, m.clone());
        }
    }

    /// `a`から`b`へのパス上の値を辿る順に畳み込む。
    pub fn path_fold<R: FnMut(T) -> T>(&mut self, a: usize, b: usize, mut reverse: R) -> T {
        let mut acc = self.op.ident();
        for segment in self.hld.shortest_path(a, b) {
            let x = self.trees[segment.path].query(segment.range.clone());
            let x = orient(&segment, x, &mut reverse);
            acc = self.op.op(&acc, &x);
        }
        acc
    }

    /// 作用素をすべて反映した頂点ごとの値。O(n)
    pub fn to_vec(&mut self) -> Vec<T> {
        let mut values = vec![self.op.ident(); self.hld.len()];
        for (p, tree) in self.trees.iter_mut().enumerate() {
            for (&v, x) in self.hld.path_vertices(p).iter().zip(tree.borrow_data()) {
                values[v] = x.clone();
            }
        }
        values
    }
}

impl<T, F, OP> LazyPathSegtree<T, F, OP>
where
    T: Clone,
    F: Clone,
    OP: LazyOperator<Query = T, Modifier = F> + Clone + Default,
{
    pub fn new(hld: HeavyLightDecomposition, values: &[T]) -> Self {
        Self::with_op(hld, values, OP::default())
    }
}

impl<T, F, OP> LazyPathSegtree<T, F, OP>
where
    T: Clone,
    F: Clone,
    OP: LazyOperator<Query = T, Modifier = F> + Commutative + Clone,
{
    pub fn path_query(&mut self, a: usize, b: usize) -> T {
        self.path_fold(a, b, |x| x)
    }
}

#[cfg(test)]
mod tests {
    use segtree::operation::{self, FnOp};

    use super::*;
    use crate::adjacency_list;

    fn sample_tree() -> HeavyLightDecomposition {
        let adj = adjacency_list(
            10,
            [
                (0, 1),
                (1, 2),
                (1, 3),
                (0, 4),
                (0, 5),
                (5, 6),
                (6, 7),
                (6, 8),
                (8, 9),
            ],
        );
        HeavyLightDecomposition::new(&adj, 0)
    }

    #[test]
    fn path_sum_test() {
        let values: Vec<i64> = (0..10).collect();
        let mut tree = PathSegtree::with_op(sample_tree(), &values, operation::add());
        assert_eq!(tree.path_query(3, 9), 3 + 1 + 5 + 6 + 8 + 9);
        assert_eq!(tree.path_query(9, 3), 32);
        assert_eq!(tree.path_query(7, 4), 7 + 6 + 5 + 4);
        assert_eq!(tree.path_query(2, 2), 2);
        tree.set(5, 100);
        assert_eq!(tree.path_query(3, 9), 127);
        tree.update_with(0, |x| *x += 1000);
        assert_eq!(tree.path_query(2, 4), 2 + 1 + 1000 + 4);
        assert_eq!(*tree.get(0), 1000);
        assert_eq!(tree.path_query(6, 9), 6 + 8 + 9);
    }

    #[test]
    fn path_order_test() {
        let concat = FnOp::new(vec![], |a: &Vec<usize>, b: &Vec<usize>| {
            let mut c = a.clone();
            c.extend(b);
            c
        });
        let values: Vec<Vec<usize>> = (0..10).map(|v| vec![v]).collect();
        let tree = PathSegtree::with_op(sample_tree(), &values, concat);
        let rev = |mut x: Vec<usize>| {
            x.reverse();
            x
        };
        assert_eq!(tree.path_fold(3, 9, rev), vec![3, 1, 0, 5, 6, 8, 9]);
        assert_eq!(tree.path_fold(9, 3, rev), vec![9, 8, 6, 5, 0, 1, 3]);
        assert_eq!(tree.path_fold(7, 4, rev), vec![7, 6, 5, 0, 4]);
        assert_eq!(tree.path_fold(2, 3, rev), vec![2, 1, 3]);
        assert_eq!(tree.path_fold(8, 8, rev), vec![8]);
    }

    #[test]
    fn to_vec_test() {
        let values: Vec<i32> = (0..10).map(|v| v * v).collect();
        let mut tree = PathSegtree::with_op(sample_tree(), &values, operation::max());
        tree.set(7, -1);
        let mut expected = values.clone();
        expected[7] = -1;
        assert_eq!(tree.to_vec(), expected);
        assert_eq!(tree.path_query(7, 4), 36);
    }

    #[test]
    fn lazy_path_add_test() {
        let mut tree =
            LazyPathSegtree::with_op(sample_tree(), &[0i64; 10], operation::range_add_sum());
        tree.path_modify(3, 9, 1);
        tree.path_modify(7, 4, 10);
        tree.modify_vertex(2, 100);
        assert_eq!(tree.to_vec(), vec![11, 1, 100, 1, 10, 11, 11, 10, 1, 1]);
        assert_eq!(tree.path_query(2, 9), 100 + 1 + 11 + 11 + 11 + 1 + 1);
        assert_eq!(tree.get(6), 11);
        tree.set(6, -5);
        assert_eq!(tree.path_query(7, 8), 10 - 5 + 1);
        tree.path_modify(0, 0, 3);
        assert_eq!(tree.get(0), 14);
    }

    #[test]
    fn lazy_path_assign_test() {
        let mut tree = LazyPathSegtree::with_op(
            sample_tree(),
            &[1i32; 10],
            operation::range_assign_sum(),
        );
        tree.path_modify(2, 7, Some(3));
        assert_eq!(tree.path_query(3, 9), 1 + 3 + 3 + 3 + 3 + 1 + 1);
        tree.path_modify(9, 4, Some(0));
        assert_eq!(tree.to_vec(), vec![0, 3, 3, 1, 0, 0, 0, 3, 0, 0]);
    }

    #[test]
    #[should_panic]
    fn wrong_length_test() {
        PathSegtree::with_op(sample_tree(), &[0i64; 9], operation::add());
    }
}
