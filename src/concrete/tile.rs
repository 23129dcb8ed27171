//! A grid of tiles as a graph.

use std::{fmt, str::FromStr};

use bitvec::vec::BitVec;
use thiserror::Error;

use crate::graph::{Coster, Edge, EdgeList, Graph, NodeId, Undirected};

const WALL: char = '▀';
const FLOOR: char = ' ';

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("Row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unknown tile {glyph:?} at ({row}, {col})")]
    UnknownTile { glyph: char, row: usize, col: usize },
    #[error("({row}, {col}) is outside of a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// A `rows × cols` grid where every tile is a node and orthogonally adjacent
/// passable tiles are joined by an edge of cost `1`.
///
/// The tile at `(row, col)` is node `row * cols + col`. Impassable tiles are
/// still nodes, just isolated ones.
///
/// Grids parse from and print as text, one line per row, with `▀` for an
/// impassable tile and a space for a passable one:
///
/// ```
/// use trellis::{concrete::TileGraph, graph::{Graph, NodeId}};
///
/// let grid: TileGraph = "▀ ▀\n   ".parse().unwrap();
/// assert_eq!(grid.dimensions(), (2, 3));
/// assert_eq!(grid.successors(NodeId(1)).count(), 1);
/// assert_eq!(grid.to_string(), "▀ ▀\n   ");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGraph {
    passable: BitVec,
    rows: usize,
    cols: usize,
}

impl TileGraph {
    pub fn new(rows: usize, cols: usize, passable: bool) -> Self {
        TileGraph {
            passable: BitVec::repeat(passable, rows * cols),
            rows,
            cols,
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    pub fn set_passability(&mut self, row: usize, col: usize, passable: bool) -> Result<(), TileError> {
        let index = self.index(row, col).ok_or(TileError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        })?;
        self.passable.set(index, passable);
        Ok(())
    }

    /// Whether `(row, col)` is a passable tile of the grid.
    pub fn passable(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_some_and(|i| self.passable[i])
    }

    pub fn coords_to_node(&self, row: usize, col: usize) -> Option<NodeId> {
        self.index(row, col).map(NodeId)
    }

    pub fn id_to_coords(&self, node: NodeId) -> Option<(usize, usize)> {
        self.has(node).then(|| (node.0 / self.cols, node.0 % self.cols))
    }

    fn is_open(&self, node: NodeId) -> bool {
        self.has(node) && self.passable[node.0]
    }

    /// Taxicab distance between two tiles, `0` if either is off the grid.
    ///
    /// Never more than the true cost on this grid, and consistent.
    pub fn manhattan(&self) -> impl Fn(NodeId, NodeId) -> f64 + '_ {
        move |node, goal| match (self.id_to_coords(node), self.id_to_coords(goal)) {
            (Some((r1, c1)), Some((r2, c2))) => (r1.abs_diff(r2) + c1.abs_diff(c2)) as f64,
            _ => 0.,
        }
    }

    /// The grid with `path` drawn on it: `♥` on every tile of the path, `s` on
    /// its first tile and `g` on its last.
    ///
    /// Nodes off the grid are ignored.
    pub fn path_string(&self, path: &[NodeId]) -> String {
        let mut glyphs: Vec<char> = (0..self.rows * self.cols)
            .map(|i| if self.passable[i] { FLOOR } else { WALL })
            .collect();

        let mut mark = |node: &NodeId, glyph| {
            if self.has(*node) {
                glyphs[node.0] = glyph;
            }
        };
        path.iter().for_each(|n| mark(n, '♥'));
        if let Some(start) = path.first() {
            mark(start, 's');
        }
        if let Some(goal) = path.last() {
            mark(goal, 'g');
        }

        render(&glyphs, self.cols)
    }

    fn neighbours(&self, node: NodeId) -> [Option<NodeId>; 4] {
        let Some((row, col)) = self.id_to_coords(node) else {
            return [None; 4];
        };
        [
            row.checked_sub(1).and_then(|r| self.coords_to_node(r, col)),
            self.coords_to_node(row + 1, col),
            col.checked_sub(1).and_then(|c| self.coords_to_node(row, c)),
            self.coords_to_node(row, col + 1),
        ]
    }
}

fn render(glyphs: &[char], cols: usize) -> String {
    if cols == 0 {
        return String::new();
    }
    glyphs
        .chunks(cols)
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for TileGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_string(&[]))
    }
}

impl FromStr for TileGraph {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut passable: BitVec = BitVec::new();
        let mut rows = 0;
        let mut cols = None;

        for (row, line) in s.lines().enumerate() {
            let start = passable.len();
            for (col, glyph) in line.chars().enumerate() {
                match glyph {
                    WALL => passable.push(false),
                    FLOOR => passable.push(true),
                    glyph => return Err(TileError::UnknownTile { glyph, row, col }),
                }
            }

            let found = passable.len() - start;
            let expected = *cols.get_or_insert(found);
            if found != expected {
                return Err(TileError::Ragged {
                    row,
                    expected,
                    found,
                });
            }
            rows += 1;
        }

        Ok(TileGraph {
            passable,
            rows,
            cols: cols.unwrap_or(0),
        })
    }
}

impl Graph for TileGraph {
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.rows * self.cols).map(NodeId)
    }

    fn has(&self, node: NodeId) -> bool {
        node.0 < self.rows * self.cols
    }

    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let neighbours = if self.is_open(node) {
            self.neighbours(node)
        } else {
            [None; 4]
        };
        neighbours
            .into_iter()
            .flatten()
            .filter(move |&n| self.is_open(n))
    }

    fn edge_from_to(&self, from: NodeId, to: NodeId) -> Option<Edge> {
        let adjacent = self.is_open(from) && self.is_open(to) && self.neighbours(from).contains(&Some(to));
        adjacent.then_some(Edge { from, to })
    }

    fn node_count(&self) -> usize {
        self.rows * self.cols
    }
}

impl Undirected for TileGraph {}

impl Coster for TileGraph {
    fn cost(&self, edge: &Edge) -> f64 {
        match self.edge_from_to(edge.from, edge.to) {
            Some(_) => 1.,
            None => f64::INFINITY,
        }
    }
}

impl EdgeList for TileGraph {
    /// Every edge once, from a tile to the one right of or below it.
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes().flat_map(move |from| {
            self.successors(from)
                .filter(move |&to| from < to)
                .map(move |to| Edge { from, to })
        })
    }
}
