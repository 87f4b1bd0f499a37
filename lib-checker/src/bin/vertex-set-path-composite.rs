use std::io::{BufWriter, Write};

use heavy_light::{adjacency_list, HeavyLightDecomposition, PathSegtree};
use proconio::input;
use segtree::operation::FnOp;

const MOD: u64 = 998244353;

/// `x -> a x + b`
type Affine = (u64, u64);

/// `f`の後に`g`
fn then(f: Affine, g: Affine) -> Affine {
    (f.0 * g.0 % MOD, (f.1 * g.0 + g.1) % MOD)
}

fn main() {
    input! {
        n: usize,
        q: usize,
        funcs: [(u64, u64); n],
        edges: [(usize, usize); n - 1],
    }
    let adj = adjacency_list(n, edges);
    let hld = HeavyLightDecomposition::new(&adj, 0);
    // 根から遠ざかる向きの合成と、根に近づく向きの合成を組で持つ
    let op = FnOp::new(
        ((1, 0), (1, 0)),
        |x: &(Affine, Affine), y: &(Affine, Affine)| (then(x.0, y.0), then(y.1, x.1)),
    );
    let values: Vec<_> = funcs.into_iter().map(|f| (f, f)).collect();
    let mut tree = PathSegtree::with_op(hld, &values, op);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..q {
        input! { t: u8 }
        match t {
            0 => {
                input! { p: usize, c: u64, d: u64 }
                tree.set(p, ((c, d), (c, d)));
            }
            1 => {
                input! { u: usize, v: usize, x: u64 }
                let ((a, b), _) = tree.path_fold(u, v, |(f, g)| (g, f));
                writeln!(out, "{}", (a * x + b) % MOD).unwrap();
            }
            _ => unreachable!(),
        }
    }
}
