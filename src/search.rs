//! Rotation-aware shortest paths over the connectivity graph.
//!
//! A step costs 1 when it keeps the heading of the previous step and 2 when
//! a rotation is needed first, so the search is Dijkstra rather than BFS.
//! Both modes share the same core: a binary heap of candidates and a dense
//! table holding, per cell, the best known cost and its predecessor.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{LabyError, Result};
use crate::geometry::{Cell, Heading};
use crate::map::MazeMap;
use crate::route::Route;

const STRAIGHT_COST: u32 = 1;
const TURN_COST: u32 = 2;

#[derive(Clone, Copy, Debug)]
struct Visit {
    cost: u32,
    predecessor: Option<Cell>,
}

/// Entry of the priority queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SearchNode {
    cell: Cell,
    /// Heading used to arrive on `cell`.
    heading: Heading,
    cost: u32,
    /// Another known edge continues along `heading` (two-point mode only).
    straight: bool,
    seq: u64,
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap: lowest cost, then straight
        // continuation, then insertion order.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.straight.cmp(&other.straight))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// True when the graph has an edge leaving `cell` along `heading`.
pub fn can_continue_straight(map: &MazeMap, cell: Cell, heading: Heading) -> bool {
    map.has_edge(cell, cell.step(heading))
}

struct Dijkstra {
    visits: Vec<Option<Visit>>,
    open: BinaryHeap<SearchNode>,
    seq: u64,
    prefer_straight: bool,
}

impl Dijkstra {
    fn new(map: &MazeMap, start: Cell, heading: Heading, prefer_straight: bool) -> Result<Self> {
        let start_index = map.index(start).ok_or(LabyError::OutOfBounds(start))?;
        let mut visits = vec![None; map.cell_count()];
        visits[start_index] = Some(Visit {
            cost: 0,
            predecessor: None,
        });

        let mut search = Self {
            visits,
            open: BinaryHeap::new(),
            seq: 0,
            prefer_straight,
        };
        search.push(map, start, heading, 0);
        Ok(search)
    }

    fn visit(&self, map: &MazeMap, cell: Cell) -> Option<Visit> {
        map.index(cell).and_then(|i| self.visits[i])
    }

    fn push(&mut self, map: &MazeMap, cell: Cell, heading: Heading, cost: u32) {
        let straight = self.prefer_straight && can_continue_straight(map, cell, heading);
        self.open.push(SearchNode {
            cell,
            heading,
            cost,
            straight,
            seq: self.seq,
        });
        self.seq += 1;
    }

    /// Next candidate, skipping entries superseded by a cheaper one.
    fn pop(&mut self, map: &MazeMap) -> Option<SearchNode> {
        while let Some(node) = self.open.pop() {
            let stale = self
                .visit(map, node.cell)
                .is_some_and(|best| node.cost > best.cost);
            if !stale {
                return Some(node);
            }
        }
        None
    }

    fn expand(&mut self, map: &MazeMap, node: SearchNode) {
        for &next in map.neighbors(node.cell) {
            let Some(heading) = Heading::between(node.cell, next) else {
                continue;
            };
            let Some(index) = map.index(next) else {
                continue;
            };
            let cost = node.cost
                + if heading == node.heading {
                    STRAIGHT_COST
                } else {
                    TURN_COST
                };
            if self.visits[index].map_or(true, |best| cost < best.cost) {
                self.visits[index] = Some(Visit {
                    cost,
                    predecessor: Some(node.cell),
                });
                self.push(map, next, heading, cost);
            }
        }
    }

    /// Walks predecessors back from `destination` to the start.
    fn route_to(&self, map: &MazeMap, destination: Cell) -> Route {
        let cost = self.visit(map, destination).map_or(0, |v| v.cost);
        let mut cells = vec![destination];
        let mut current = destination;
        while let Some(previous) = self.visit(map, current).and_then(|v| v.predecessor) {
            cells.push(previous);
            current = previous;
        }
        cells.reverse();
        Route::new(cells, cost)
    }
}

/// Cheapest route from `start` to the closest frontier cell.
///
/// Frontier cells found to be surrounded on the way are pruned from the
/// frontier and the search carries on past them. Must not be called with an
/// empty frontier.
pub fn nearest_frontier(map: &mut MazeMap, start: Cell, heading: Heading) -> Result<Route> {
    if map.frontier().is_empty() {
        return Err(LabyError::EmptyFrontier);
    }
    let mut search = Dijkstra::new(map, start, heading, false)?;

    while let Some(node) = search.pop(map) {
        if map.frontier().contains(node.cell) && !map.is_surrounded(node.cell) {
            let route = search.route_to(map, node.cell);
            debug!(
                "Nearest frontier from {} is {} (cost {})",
                start,
                node.cell,
                route.cost()
            );
            return Ok(route);
        }
        search.expand(map, node);
    }
    Err(LabyError::NoFrontierRoute(start))
}

/// Cheapest route from `start` to `target`. On equal cost, candidates that
/// can keep going straight are explored first, which saves rotations.
pub fn shortest_route(map: &MazeMap, start: Cell, target: Cell, heading: Heading) -> Result<Route> {
    if !map.contains(target) {
        return Err(LabyError::OutOfBounds(target));
    }
    let mut search = Dijkstra::new(map, start, heading, true)?;

    while let Some(node) = search.pop(map) {
        if node.cell == target {
            return Ok(search.route_to(map, target));
        }
        search.expand(map, node);
    }
    Err(LabyError::NoRoute {
        from: start,
        to: target,
    })
}
