use serde::{Deserialize, Serialize};

use crate::error::MazeError;
use crate::grid::{Grid, Point};

/// The four cardinal link slots of a node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// Stable index of a node in the graph arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A decision point in the maze: a junction, a corridor turn, or a dead end.
/// Straight corridor interiors are not materialized; they are implicit in the
/// link between the two nodes bounding them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub pos: Point,
    links: [Option<NodeId>; 4],
}

impl Node {
    fn new(pos: Point) -> Self {
        Self {
            pos,
            links: [None; 4],
        }
    }

    pub fn link(&self, direction: Direction) -> Option<NodeId> {
        self.links[direction as usize]
    }

    /// The non-empty neighbor links, in north/east/south/west order.
    pub fn neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.links.iter().flatten().copied()
    }
}

/// The compacted node graph of a maze, with its two distinguished members.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MazeGraph {
    nodes: Vec<Node>,
    start: NodeId,
    finish: NodeId,
}

impl MazeGraph {
    /// Scan the grid once and compact it into a node graph.
    ///
    /// The start node is the first open cell of the top row, the finish node
    /// the first open cell of the bottom row, both scanning left-to-right.
    pub fn build(grid: &Grid) -> Result<Self, MazeError> {
        // a single-row image has no bottom row distinct from the top, so
        // there is no finish to scan for (and linking start to a finish at
        // the same position would create a zero-length link)
        if grid.height < 2 {
            return Err(MazeError::MissingExit);
        }

        let mut graph = MazeGraph {
            nodes: Vec::new(),
            start: NodeId(0),
            finish: NodeId(0),
        };

        // per-column slot holding the last node with an open cell below it,
        // waiting for a vertical partner further down
        let mut top_nodes: Vec<Option<NodeId>> = vec![None; grid.width];

        let sx = (0..grid.width)
            .find(|&x| grid.is_open(x, 0))
            .ok_or(MazeError::MissingEntrance)?;
        graph.start = graph.push(Point { x: sx, y: 0 });
        top_nodes[sx] = Some(graph.start);

        for y in 1..grid.height.saturating_sub(1) {
            // three-cell sliding window over the row
            let mut cur = false;
            let mut nxt = grid.is_open(1, y);

            // most recently placed node of this row, reset by walls
            let mut left: Option<NodeId> = None;

            for x in 1..grid.width.saturating_sub(1) {
                let prv = cur;
                cur = nxt;
                nxt = grid.is_open(x + 1, y);

                if !cur {
                    left = None;
                    continue;
                }

                let above = grid.is_open(x, y - 1);
                let below = grid.is_open(x, y + 1);

                let place = match (prv, nxt) {
                    // inside a horizontal run: only a vertical branch makes
                    // this cell a decision point
                    (true, true) => above || below,
                    // a wall on either side ends or starts a run
                    (true, false) | (false, true) => true,
                    // walls on both sides: a dead end unless this is the
                    // interior of a vertical corridor
                    (false, false) => !above || !below,
                };

                if !place {
                    continue;
                }

                let id = graph.push(Point { x, y });

                if prv {
                    if let Some(west) = left {
                        graph.connect(west, Direction::East, id);
                    }
                }
                left = Some(id);

                if above {
                    if let Some(top) = top_nodes[x] {
                        graph.connect(top, Direction::South, id);
                    }
                }
                top_nodes[x] = if below { Some(id) } else { None };
            }
        }

        let fy = grid.height - 1;
        let fx = (0..grid.width)
            .find(|&x| grid.is_open(x, fy))
            .ok_or(MazeError::MissingExit)?;
        let finish = graph.push(Point { x: fx, y: fy });
        if let Some(top) = top_nodes[fx] {
            graph.connect(top, Direction::South, finish);
        }
        graph.finish = finish;

        Ok(graph)
    }

    fn push(&mut self, pos: Point) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(pos));
        id
    }

    /// Wire a reciprocal link: `a`'s slot in `direction` points at `b`, and
    /// `b`'s opposite slot points back at `a`.
    fn connect(&mut self, a: NodeId, direction: Direction, b: NodeId) {
        self.nodes[a.0].links[direction as usize] = Some(b);
        self.nodes[b.0].links[direction.opposite() as usize] = Some(a);
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Look up a node by its grid position.
    pub fn node_at(&self, pos: Point) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.pos == pos).map(NodeId)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn finish(&self) -> NodeId {
        self.finish
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::grid_from_rows;

    #[test]
    fn test_straight_vertical_corridor() {
        let grid = grid_from_rows(&[
            "##.##", //
            "##.##", //
            "##.##", //
            "##.##", //
            "##.##", //
        ]);

        let graph = MazeGraph::build(&grid).unwrap();

        // corridor interiors are implicit: only the start and finish remain
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node(graph.start()).pos, Point { x: 2, y: 0 });
        assert_eq!(graph.node(graph.finish()).pos, Point { x: 2, y: 4 });
        assert_eq!(
            graph.node(graph.start()).link(Direction::South),
            Some(graph.finish())
        );
        assert_eq!(
            graph.node(graph.finish()).link(Direction::North),
            Some(graph.start())
        );
    }

    #[test]
    fn test_l_shaped_corridor() {
        let grid = grid_from_rows(&[
            "#.###", //
            "#...#", //
            "###.#", //
            "###.#", //
            "###.#", //
        ]);

        let graph = MazeGraph::build(&grid).unwrap();

        // start, the turn under it, the corner, finish
        assert_eq!(graph.node_count(), 4);

        let positions: Vec<Point> = graph.nodes().iter().map(|n| n.pos).collect();
        assert_eq!(
            positions,
            vec![
                Point { x: 1, y: 0 },
                Point { x: 1, y: 1 },
                Point { x: 3, y: 1 },
                Point { x: 3, y: 4 },
            ]
        );

        // the corner joins a horizontal and a vertical segment
        let corner = &graph.nodes()[2];
        assert!(corner.link(Direction::West).is_some());
        assert!(corner.link(Direction::South).is_some());
        assert!(corner.link(Direction::North).is_none());
        assert!(corner.link(Direction::East).is_none());
    }

    #[test]
    fn test_junction_in_straight_corridor() {
        // a T-junction: horizontal corridor with a branch going down
        let grid = grid_from_rows(&[
            "#.###", //
            "#...#", //
            "##.##", //
            "##.##", //
            "##.##", //
        ]);

        let graph = MazeGraph::build(&grid).unwrap();

        // the junction at (2, 1) must be materialized even though its left
        // and right are both open
        let junction = graph
            .nodes()
            .iter()
            .find(|n| n.pos == (Point { x: 2, y: 1 }))
            .expect("junction node missing");
        assert!(junction.link(Direction::West).is_some());
        assert!(junction.link(Direction::East).is_some());
        assert!(junction.link(Direction::South).is_some());
    }

    #[test]
    fn test_links_are_reciprocal() {
        let grid = grid_from_rows(&[
            "#.#####", //
            "#.....#", //
            "#.###.#", //
            "#.#...#", //
            "#.#.#.#", //
            "#...#.#", //
            "#####.#", //
        ]);

        let graph = MazeGraph::build(&grid).unwrap();

        for (i, node) in graph.nodes().iter().enumerate() {
            for direction in Direction::ALL {
                if let Some(other) = node.link(direction) {
                    assert_eq!(
                        graph.node(other).link(direction.opposite()),
                        Some(NodeId(i)),
                        "link {:?} of node {} is not reciprocal",
                        direction,
                        i
                    );
                }
            }
        }
    }

    #[test]
    fn test_builder_is_deterministic() {
        let grid = grid_from_rows(&[
            "#.#####", //
            "#.....#", //
            "#.###.#", //
            "#...#.#", //
            "###.#.#", //
            "#...#.#", //
            "#####.#", //
        ]);

        let first = MazeGraph::build(&grid).unwrap();
        let second = MazeGraph::build(&grid).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_isolated_dead_end_node() {
        // the open cell at (3, 2) is walled in on all sides; it becomes a
        // node with no links at all, which is permitted
        let grid = grid_from_rows(&[
            "#.###", //
            "#.###", //
            "#.#.#", //
            "#.###", //
            "#.###", //
        ]);

        let graph = MazeGraph::build(&grid).unwrap();

        let isolated = graph
            .nodes()
            .iter()
            .find(|n| n.pos == (Point { x: 3, y: 2 }))
            .expect("isolated node missing");
        assert_eq!(isolated.neighbors().count(), 0);
    }

    #[test]
    fn test_single_row_image_has_no_exit() {
        // top and bottom row coincide; there is no separate finish, and no
        // zero-length start-finish link may be fabricated
        let grid = grid_from_rows(&["#.#"]);

        assert!(matches!(
            MazeGraph::build(&grid),
            Err(MazeError::MissingExit)
        ));
    }

    #[test]
    fn test_missing_entrance_and_exit() {
        let sealed = grid_from_rows(&[
            "#####", //
            "#...#", //
            "#####", //
        ]);
        assert!(matches!(
            MazeGraph::build(&sealed),
            Err(MazeError::MissingEntrance)
        ));

        let no_exit = grid_from_rows(&[
            "#.###", //
            "#...#", //
            "#####", //
        ]);
        assert!(matches!(
            MazeGraph::build(&no_exit),
            Err(MazeError::MissingExit)
        ));
    }
}
