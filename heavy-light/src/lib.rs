//! Heavy-light decomposition
//!
//! 根付き木の頂点集合をheavy pathに分割する。根から任意の頂点までの単純パスは
//! 高々`⌊log2(n)⌋ + 1`本のheavy pathしか通らない。

mod edge;
mod error;
pub mod path;
mod segment;

pub use edge::{adjacency_list, Edge, WeightedEdge};
pub use error::DecomposeError;
pub use path::{LazyPathSegtree, PathSegtree};
pub use segment::{Direction, Segment};

/// パス同士の接続関係
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    /// 親頂点のパス内位置
    pub local_index: usize,
    /// 子のパス番号
    pub child_path: usize,
}

#[derive(Debug, Clone)]
struct HeavyPath {
    parent_vertex: Option<usize>,
    children: Vec<Connection>,
    vertices: Vec<usize>,
    depth: usize,
}

#[derive(Debug, Clone)]
pub struct HeavyLightDecomposition {
    root: usize,
    paths: Vec<HeavyPath>,
    path_ids: Vec<usize>,
    local_indices: Vec<usize>,
}

/// `root`を根としたときの各頂点の親と部分木の大きさ。
/// 深い木でもスタックを溢れさせないよう明示的なスタックで辿る。
fn subtree_sizes<E: Edge>(adj: &[Vec<E>], root: usize) -> (Vec<Option<usize>>, Vec<usize>) {
    let n = adj.len();
    let mut parent = vec![None; n];
    let mut size = vec![0; n];
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut stack = vec![root];
    visited[root] = true;
    while let Some(u) = stack.pop() {
        order.push(u);
        for v in adj[u].iter().map(Edge::to) {
            if !visited[v] {
                visited[v] = true;
                parent[v] = Some(u);
                stack.push(v);
            }
        }
    }
    // 行きがけ順の逆は帰りがけ順の条件(子が親より先)を満たす
    for &u in order.iter().rev() {
        size[u] += 1;
        if let Some(p) = parent[u] {
            size[p] += size[u];
        }
    }
    (parent, size)
}

impl HeavyLightDecomposition {
    /// `root`を根とした木`adj`をheavy-light decompositionする。O(n)
    ///
    /// 入力が木であることは検査しない。検査が必要なら[`Self::try_new`]を使う。
    ///
    /// # Panics
    ///
    /// `root`や辺の行き先が範囲外のとき。
    pub fn new<E: Edge>(adj: &[Vec<E>], root: usize) -> Self {
        let n = adj.len();
        let (parent, subtree_size) = subtree_sizes(adj, root);
        let mut paths: Vec<HeavyPath> = Vec::new();
        let mut path_ids = vec![usize::MAX; n];
        let mut local_indices = vec![usize::MAX; n];
        let mut seeds: Vec<(usize, Option<usize>)> = vec![(root, None)];
        while let Some((head, parent_vertex)) = seeds.pop() {
            let pid = paths.len();
            let depth = match parent_vertex {
                Some(pv) => {
                    let parent_path = &mut paths[path_ids[pv]];
                    parent_path.children.push(Connection {
                        local_index: local_indices[pv],
                        child_path: pid,
                    });
                    parent_path.depth + 1
                }
                None => 0,
            };
            let mut vertices = vec![];
            let mut cur = Some(head);
            while let Some(u) = cur {
                path_ids[u] = pid;
                local_indices[u] = vertices.len();
                vertices.push(u);
                let threshold = subtree_size[u] / 2;
                cur = None;
                for v in adj[u].iter().map(Edge::to) {
                    if parent[v] != Some(u) {
                        continue;
                    }
                    if cur.is_none() && subtree_size[v] >= threshold {
                        cur = Some(v);
                    } else {
                        seeds.push((v, Some(u)));
                    }
                }
            }
            paths.push(HeavyPath {
                parent_vertex,
                children: vec![],
                vertices,
                depth,
            });
        }
        log::debug!(
            "decomposed {} vertices into {} heavy paths (max depth {})",
            n,
            paths.len(),
            paths.iter().map(|p| p.depth).max().unwrap_or(0)
        );
        Self {
            root,
            paths,
            path_ids,
            local_indices,
        }
    }

    /// 入力が`root`から連結な木であることを確かめてから分解する。O(n log(n))
    pub fn try_new<E: Edge>(adj: &[Vec<E>], root: usize) -> Result<Self, DecomposeError> {
        if let Err(e) = validate_tree(adj, root) {
            log::warn!("rejected input graph: {e}");
            return Err(e);
        }
        Ok(Self::new(adj, root))
    }

    pub fn root(&self) -> usize {
        self.root
    }

    /// 頂点数
    pub fn len(&self) -> usize {
        self.path_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path_ids.is_empty()
    }

    /// 分解された木に含まれるheavy pathの総数
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// パス`p`に含まれる頂点の数
    pub fn path_length(&self, p: usize) -> usize {
        self.paths[p].vertices.len()
    }

    /// 根を含むパスからパス`p`までに通るパスの境界の数
    pub fn path_depth(&self, p: usize) -> usize {
        self.paths[p].depth
    }

    /// パス`p`の頂点を根に近い順に並べたもの
    pub fn path_vertices(&self, p: usize) -> &[usize] {
        &self.paths[p].vertices
    }

    /// パス`p`から子に向かう接続関係
    pub fn path_children(&self, p: usize) -> &[Connection] {
        &self.paths[p].children
    }

    /// パス`p`の親にあたる頂点。パス`p`が根を含むなら`None`。
    pub fn parent_vertex_id(&self, p: usize) -> Option<usize> {
        self.paths[p].parent_vertex
    }

    /// パス`p`の親にあたるパス。パス`p`が根を含むなら`None`。
    pub fn parent_path_id(&self, p: usize) -> Option<usize> {
        self.paths[p].parent_vertex.map(|v| self.path_ids[v])
    }

    /// パス`p`の親にあたる頂点のパス内位置。パス`p`が根を含むなら`None`。
    pub fn parent_local_index(&self, p: usize) -> Option<usize> {
        self.paths[p].parent_vertex.map(|v| self.local_indices[v])
    }

    /// 頂点`v`を含むパス
    pub fn path_id(&self, v: usize) -> usize {
        self.path_ids[v]
    }

    /// 頂点`v`のパス内位置。パスの先頭(根に最も近い頂点)が`0`。
    pub fn local_index(&self, v: usize) -> usize {
        self.local_indices[v]
    }

    /// パス`p`の`i`番目の頂点
    pub fn vertex_id(&self, p: usize, i: usize) -> usize {
        self.paths[p].vertices[i]
    }

    fn parent_of_path(&self, p: usize, a: usize, b: usize) -> usize {
        match self.paths[p].parent_vertex {
            Some(v) => v,
            None => panic!("vertices {a} and {b} are not in the same tree"),
        }
    }

    /// `a`から`b`への単純パスを、辿る順に並んだパス上の区間の列として返す。O(log(n))
    pub fn shortest_path(&self, a: usize, b: usize) -> Vec<Segment> {
        let mut head = vec![];
        let mut tail = vec![];
        let (mut u, mut v) = (a, b);
        loop {
            let (pu, pv) = (self.path_ids[u], self.path_ids[v]);
            if pu == pv {
                let (lu, lv) = (self.local_indices[u], self.local_indices[v]);
                head.push(if lu <= lv {
                    Segment::new(pu, lu..lv + 1, Direction::Ascending)
                } else {
                    Segment::new(pu, lv..lu + 1, Direction::Descending)
                });
                break;
            }
            if self.paths[pu].depth >= self.paths[pv].depth {
                head.push(Segment::new(
                    pu,
                    0..self.local_indices[u] + 1,
                    Direction::Descending,
                ));
                u = self.parent_of_path(pu, a, b);
            } else {
                tail.push(Segment::new(
                    pv,
                    0..self.local_indices[v] + 1,
                    Direction::Ascending,
                ));
                v = self.parent_of_path(pv, a, b);
            }
        }
        head.extend(tail.into_iter().rev());
        head
    }

    /// `v`から根までの単純パス。すべて`Descending`な区間になる。
    pub fn path_to_root(&self, mut v: usize) -> Vec<Segment> {
        let mut segments = vec![];
        loop {
            let p = self.path_ids[v];
            segments.push(Segment::new(
                p,
                0..self.local_indices[v] + 1,
                Direction::Descending,
            ));
            match self.paths[p].parent_vertex {
                Some(pv) => v = pv,
                None => break segments,
            }
        }
    }

    /// 最小共通祖先。O(log(n))
    pub fn lca(&self, a: usize, b: usize) -> usize {
        let (mut u, mut v) = (a, b);
        while self.path_ids[u] != self.path_ids[v] {
            let (pu, pv) = (self.path_ids[u], self.path_ids[v]);
            if self.paths[pu].depth >= self.paths[pv].depth {
                u = self.parent_of_path(pu, a, b);
            } else {
                v = self.parent_of_path(pv, a, b);
            }
        }
        if self.local_indices[u] <= self.local_indices[v] {
            u
        } else {
            v
        }
    }

    /// `a`と`b`の間の辺の数。O(log(n))
    pub fn distance(&self, a: usize, b: usize) -> usize {
        self.shortest_path(a, b)
            .iter()
            .map(Segment::len)
            .sum::<usize>()
            - 1
    }
}

fn validate_tree<E: Edge>(adj: &[Vec<E>], root: usize) -> Result<(), DecomposeError> {
    let n = adj.len();
    if n == 0 {
        return Err(DecomposeError::Empty);
    }
    if root >= n {
        return Err(DecomposeError::RootOutOfRange { root, len: n });
    }
    let mut sorted = Vec::with_capacity(n);
    let mut entries = 0;
    for (u, edges) in adj.iter().enumerate() {
        let mut targets = Vec::with_capacity(edges.len());
        for v in edges.iter().map(Edge::to) {
            if v >= n {
                return Err(DecomposeError::VertexOutOfRange {
                    from: u,
                    to: v,
                    len: n,
                });
            }
            if v == u {
                return Err(DecomposeError::SelfLoop { vertex: u });
            }
            targets.push(v);
        }
        entries += targets.len();
        targets.sort_unstable();
        sorted.push(targets);
    }
    if entries != 2 * (n - 1) {
        return Err(DecomposeError::EdgeCount {
            expected: 2 * (n - 1),
            found: entries,
        });
    }
    for (u, targets) in sorted.iter().enumerate() {
        if let Some(&v) = targets.iter().find(|&&v| sorted[v].binary_search(&u).is_err()) {
            return Err(DecomposeError::Asymmetric { from: u, to: v });
        }
    }
    let mut visited = vec![false; n];
    visited[root] = true;
    let mut stack = vec![root];
    while let Some(u) = stack.pop() {
        for &v in &sorted[u] {
            if !visited[v] {
                visited[v] = true;
                stack.push(v);
            }
        }
    }
    match visited.iter().position(|&x| !x) {
        Some(vertex) => Err(DecomposeError::Disconnected { vertex }),
        None => Ok(()),
    }
}
