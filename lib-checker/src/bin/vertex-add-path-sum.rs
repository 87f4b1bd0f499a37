use std::io::{BufWriter, Write};

use heavy_light::{adjacency_list, HeavyLightDecomposition, PathSegtree};
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
    let mut tree = PathSegtree::with_op(hld, &a, operation::add());

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..q {
        input! { t: u8 }
        match t {
            0 => {
                input! { p: usize, x: i64 }
                tree.update_with(p, |v| *v += x);
            }
            1 => {
                input! { u: usize, v: usize }
                writeln!(out, "{}", tree.path_query(u, v)).unwrap();
            }
            _ => unreachable!(),
        }
    }
}
