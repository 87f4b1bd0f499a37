/// 隣接リストの要素。反対端の頂点番号を返せればよい。
pub trait Edge {
    fn to(&self) -> usize;
}

impl Edge for usize {
    fn to(&self) -> usize {
        *self
    }
}

impl<E: Edge> Edge for &E {
    fn to(&self) -> usize {
        (*self).to()
    }
}

impl<W> Edge for (usize, W) {
    fn to(&self) -> usize {
        self.0
    }
}

/// 重みと容量を持つ辺。分解には`to`しか使わない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeightedEdge {
    pub to: usize,
    pub weight: i64,
    pub capacity: i64,
}

impl WeightedEdge {
    pub const fn new(to: usize) -> Self {
        Self {
            to,
            weight: 0,
            capacity: 0,
        }
    }

    pub const fn with_weight(to: usize, weight: i64) -> Self {
        Self {
            to,
            weight,
            capacity: 0,
        }
    }
}

impl Edge for WeightedEdge {
    fn to(&self) -> usize {
        self.to
    }
}

/// 無向辺の列から隣接リストを作る。
pub fn adjacency_list<I>(n: usize, edges: I) -> Vec<Vec<usize>>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut adj = vec![vec![]; n];
    for (u, v) in edges {
        adj[u].push(v);
        adj[v].push(u);
    }
    adj
}
