use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::{MazeGraph, NodeId};
use crate::grid::Point;

/// An entry in the frontier. `seq` is a monotone insertion counter so that
/// entries with equal distance pop in first-inserted order.
#[derive(Debug)]
struct Visit {
    dist: usize,
    seq: usize,
    node: NodeId,
}

impl Ord for Visit {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse for BinaryHeap to be a min-heap
        (self.dist, self.seq).cmp(&(other.dist, other.seq)).reverse()
    }
}

impl PartialOrd for Visit {
    fn partial_cmp(&self, other: &Visit) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Visit {
    fn eq(&self, other: &Visit) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Visit {}

/// The open set: discovered but not yet finalized nodes, popped in ascending
/// distance order. Re-inserting a node after its label improved is allowed;
/// stale entries are skipped on pop (lazy deletion).
#[derive(Debug, Default)]
struct Frontier {
    heap: BinaryHeap<Visit>,
    seq: usize,
}

impl Frontier {
    fn push(&mut self, node: NodeId, dist: usize) {
        self.heap.push(Visit {
            dist,
            seq: self.seq,
            node,
        });
        self.seq += 1;
    }

    /// Pop the minimum-distance entry whose node is still unsettled.
    fn pop_unsettled(&mut self, settled: &[Option<Settled>]) -> Option<NodeId> {
        while let Some(visit) = self.heap.pop() {
            if settled[visit.node.index()].is_none() {
                return Some(visit.node);
            }
        }
        None
    }
}

/// The committed label of a finalized node: its shortest distance from the
/// start and the neighbor its best path arrived through. A `None` predecessor
/// marks a fully isolated node.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Settled {
    pub dist: usize,
    pub pred: Option<NodeId>,
}

/// The result of a search: the settled label of every finalized node.
/// Once present here, a label never changes.
#[derive(Debug)]
pub struct Solution {
    settled: Vec<Option<Settled>>,
}

impl Solution {
    pub fn get(&self, id: NodeId) -> Option<Settled> {
        self.settled[id.index()]
    }
}

/// The axis-aligned pixel distance between two directly linked nodes,
/// computed along whichever single axis differs. Links are never diagonal.
fn manhattan_step(a: Point, b: Point) -> usize {
    if a.x != b.x {
        a.x.abs_diff(b.x)
    } else {
        a.y.abs_diff(b.y)
    }
}

/// Label-setting shortest-path search from the graph's start node.
///
/// All mutable search state lives in this call; nothing is shared between
/// invocations. The loop runs until the finish node is finalized or every
/// node is, so an unreachable finish terminates naturally with the finish
/// absent from the returned [`Solution`].
///
/// Finalized labels are never revisited, which matches classical Dijkstra
/// output here because every link weight is non-negative and links are only
/// discovered from already-explored nodes in distance order. Graphs with
/// back-edges offering cheaper routes into finalized nodes are not supported.
pub fn solve(graph: &MazeGraph) -> Solution {
    let n = graph.node_count();

    // tentative labels, mutated only until a node settles
    let mut dist = vec![usize::MAX; n];
    let mut pred: Vec<Option<NodeId>> = vec![None; n];

    let mut settled: Vec<Option<Settled>> = vec![None; n];
    let mut settled_count = 0usize;
    let mut frontier = Frontier::default();

    let start = graph.start();
    let finish = graph.finish();

    dist[start.index()] = 0;
    pred[start.index()] = Some(start);

    let mut current = start;

    while settled[finish.index()].is_none() && settled_count < n {
        let candidates: Vec<NodeId> = graph
            .node(current)
            .neighbors()
            .filter(|id| settled[id.index()].is_none())
            .collect();

        if candidates.is_empty() {
            // a fully isolated node settles with the no-predecessor
            // sentinel; a node whose neighbors are all settled commits its
            // existing predecessor; either way advance to the frontier
            // minimum
            let committed = if graph.node(current).neighbors().next().is_none() {
                None
            } else {
                pred[current.index()]
            };
            settle(
                &mut settled,
                &mut settled_count,
                current,
                dist[current.index()],
                committed,
            );
            match frontier.pop_unsettled(&settled) {
                Some(next) => current = next,
                None => break,
            }
            continue;
        }

        for &candidate in &candidates {
            let tentative = dist[current.index()]
                + manhattan_step(graph.node(current).pos, graph.node(candidate).pos);
            if tentative < dist[candidate.index()] {
                dist[candidate.index()] = tentative;
                pred[candidate.index()] = Some(current);
            }
        }

        settle(
            &mut settled,
            &mut settled_count,
            current,
            dist[current.index()],
            pred[current.index()],
        );

        current = candidates[0];
        for &candidate in &candidates[1..] {
            frontier.push(candidate, dist[candidate.index()]);
        }
    }

    Solution { settled }
}

fn settle(
    settled: &mut [Option<Settled>],
    settled_count: &mut usize,
    node: NodeId,
    dist: usize,
    pred: Option<NodeId>,
) {
    debug_assert!(settled[node.index()].is_none());
    settled[node.index()] = Some(Settled { dist, pred });
    *settled_count += 1;
}
