use std::{error::Error, fmt};

/// `HeavyLightDecomposition::try_new`が木でない入力を拒否した理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecomposeError {
    Empty,
    RootOutOfRange { root: usize, len: usize },
    VertexOutOfRange { from: usize, to: usize, len: usize },
    SelfLoop { vertex: usize },
    EdgeCount { expected: usize, found: usize },
    Asymmetric { from: usize, to: usize },
    Disconnected { vertex: usize },
}

impl fmt::Display for DecomposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecomposeError::Empty => write!(f, "graph has no vertices"),
            DecomposeError::RootOutOfRange { root, len } => {
                write!(f, "root {root} out of range for graph of {len} vertices")
            }
            DecomposeError::VertexOutOfRange { from, to, len } => write!(
                f,
                "edge {from} -> {to} points out of range for graph of {len} vertices"
            ),
            DecomposeError::SelfLoop { vertex } => write!(f, "self loop at vertex {vertex}"),
            DecomposeError::EdgeCount { expected, found } => write!(
                f,
                "expected {expected} adjacency entries for a tree, found {found}"
            ),
            DecomposeError::Asymmetric { from, to } => {
                write!(f, "edge {from} -> {to} has no reverse edge")
            }
            DecomposeError::Disconnected { vertex } => {
                write!(f, "vertex {vertex} is not reachable from the root")
            }
        }
    }
}

impl Error for DecomposeError {}
