use std::io::{BufWriter, Write};

use heavy_light::{adjacency_list, HeavyLightDecomposition, LazyPathSegtree};
use proconio::input;
use segtree::operation;

fn main() {
    input! {
        n: usize,
        q: usize,
        a: [i64; n],
        edges: [(usize, usize); n - 1],
    }
    let adj = adjacency_list(n, edges);
    let hld = HeavyLightDecomposition::new(&adj, 0);
    let mut tree = LazyPathSegtree::with_op(hld, &a, operation::range_add_sum());

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..q {
        input! { t: u8, u: usize, v: usize }
        match t {
            0 => {
                input! { x: i64 }
                tree.path_modify(u, v, x);
            }
            1 => {
                writeln!(out, "{}", tree.path_query(u, v)).unwrap();
            }
            _ => unreachable!(),
        }
    }
}
