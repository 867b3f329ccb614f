use common::shapes::{Circle, Rectangle, Vec2};
use quadtree::{Config, QuadTree, QuadTreeItem, QuadtreeError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn bounds() -> Rectangle {
    Rectangle::from_size(100.0, 100.0)
}

// Nine circles around the center of each quadrant (36 total), none touching a boundary.
fn quadrant_grid() -> Vec<Circle> {
    let mut circles = Vec::new();
    for (cx, cy) in [(25.0, 25.0), (75.0, 25.0), (25.0, 75.0), (75.0, 75.0)] {
        for dy in [-10.0, 0.0, 10.0] {
            for dx in [-10.0, 0.0, 10.0] {
                circles.push(Circle::new(cx + dx, cy + dy, 1.0));
            }
        }
    }
    circles
}

fn children_of(qt: &QuadTree) -> Vec<&quadtree::QuadNode> {
    qt.root()
        .children()
        .expect("root should be subdivided")
        .iter()
        .map(|&id| qt.node(id).unwrap())
        .collect()
}

#[test]
fn test_leaf_below_capacity() {
    let circles: Vec<Circle> = (0..10)
        .map(|i| Circle::new(5.0 + i as f32 * 9.0, 50.0, 1.0))
        .collect();
    let qt = QuadTree::build(bounds(), Config::default(), &circles).unwrap();

    assert!(qt.root().is_leaf());
    assert_eq!(qt.root().items(), (0..10).collect::<Vec<_>>().as_slice());
    assert_eq!(qt.node_count(), 1);
}

#[test]
fn test_subdivides_on_overflow() {
    let circles = quadrant_grid();
    let qt = QuadTree::build(bounds(), Config::default(), &circles).unwrap();

    assert!(!qt.root().is_leaf());
    assert!(qt.root().items().is_empty());

    let children = children_of(&qt);
    let quadrants = bounds().quadrants();
    for (q, child) in children.iter().enumerate() {
        assert!(child.is_leaf());
        assert_eq!(child.depth(), 1);
        assert_eq!(*child.bounds(), quadrants[q]);
        let expected: Vec<usize> = (q * 9..q * 9 + 9).collect();
        assert_eq!(child.items(), expected.as_slice());
    }
}

#[test]
fn test_no_subdivision_at_exact_capacity() {
    let circles: Vec<Circle> = quadrant_grid().into_iter().take(32).collect();
    let qt = QuadTree::build(bounds(), Config::default(), &circles).unwrap();
    assert!(qt.root().is_leaf());
    assert_eq!(qt.root().items().len(), 32);
}

#[test]
fn test_straddler_is_duplicated() {
    let mut circles = quadrant_grid();
    // Sits on the center point: touches all four quadrants.
    circles.push(Circle::new(50.0, 50.0, 2.0));
    // Crosses only the vertical split line, in the northern half.
    circles.push(Circle::new(50.0, 10.0, 1.0));
    let qt = QuadTree::build(bounds(), Config::default(), &circles).unwrap();

    let children = children_of(&qt);
    for child in &children {
        assert!(child.items().contains(&36));
    }
    assert!(children[0].items().contains(&37));
    assert!(children[1].items().contains(&37));
    assert!(!children[2].items().contains(&37));
    assert!(!children[3].items().contains(&37));
}

#[test]
fn test_straddler_inserted_before_split_is_redistributed() {
    let mut circles = vec![Circle::new(50.0, 50.0, 2.0)];
    circles.extend(quadrant_grid());
    let qt = QuadTree::build(bounds(), Config::default(), &circles).unwrap();

    for child in children_of(&qt) {
        assert_eq!(child.items()[0], 0);
    }
}

#[test]
fn test_leaf_capacity_respected_when_clustered() {
    let mut rng = StdRng::seed_from_u64(7);
    let circles: Vec<Circle> = (0..2_000)
        .map(|_| {
            Circle::new(
                rng.gen_range(0.0..50.0),
                rng.gen_range(0.0..50.0),
                rng.gen_range(0.1..1.0),
            )
        })
        .collect();
    let config = Config::default();
    let qt = QuadTree::build(bounds(), config, &circles).unwrap();

    for node in qt.nodes() {
        assert!(node.depth() <= config.max_depth);
        if node.is_leaf() {
            assert!(node.items().len() <= config.node_capacity || node.depth() == config.max_depth);
        } else {
            assert!(node.items().is_empty());
        }
    }

    // Everything inserted is reachable from some leaf.
    let stored: HashSet<usize> = qt.leaves().flat_map(|leaf| leaf.items().to_vec()).collect();
    assert_eq!(stored.len(), circles.len());
}

#[test]
fn test_max_depth_caps_subdivision() {
    let circles = vec![Circle::new(10.0, 10.0, 0.1); 100];
    let qt = QuadTree::build(bounds(), Config::default(), &circles).unwrap();

    let deepest: Vec<_> = qt.leaves().filter(|leaf| !leaf.items().is_empty()).collect();
    assert_eq!(deepest.len(), 1);
    assert_eq!(deepest[0].depth(), 6);
    assert_eq!(deepest[0].items().len(), 100);
    assert_eq!(qt.stats().max_depth, 6);
}

#[test]
fn test_custom_config() {
    let config = Config {
        node_capacity: 1,
        max_depth: 1,
    };
    let circles = vec![
        Circle::new(10.0, 10.0, 1.0),
        Circle::new(12.0, 10.0, 1.0),
        Circle::new(90.0, 90.0, 1.0),
    ];
    let qt = QuadTree::build(bounds(), config, &circles).unwrap();

    let children = children_of(&qt);
    assert_eq!(children[0].items(), &[0, 1]);
    assert!(children[0].is_leaf());
    assert_eq!(children[3].items(), &[2]);
}

#[test]
fn test_invalid_config() {
    let empty_leaves = Config {
        node_capacity: 0,
        max_depth: 6,
    };
    assert_eq!(
        QuadTree::new(bounds(), empty_leaves).unwrap_err(),
        QuadtreeError::InvalidConfig {
            node_capacity: 0,
            max_depth: 6,
        }
    );

    let too_deep = Config {
        node_capacity: 32,
        max_depth: Config::MAX_DEPTH_LIMIT + 1,
    };
    assert!(too_deep.validate().is_err());
    assert!(QuadTree::build(bounds(), too_deep, &quadrant_grid()).is_err());

    let deepest = Config {
        node_capacity: 1,
        max_depth: Config::MAX_DEPTH_LIMIT,
    };
    let circles = vec![Circle::new(10.0, 10.0, 0.01); 40];
    let qt = QuadTree::build(bounds(), deepest, &circles).unwrap();
    assert_eq!(qt.stats().max_depth, Config::MAX_DEPTH_LIMIT);
}

#[test]
fn test_nodes_pre_order() {
    let mut circles = quadrant_grid();
    // Overflow the nw quadrant so it splits a second time.
    for i in 0..30 {
        circles.push(Circle::new(5.0 + i as f32, 5.0, 0.25));
    }
    let qt = QuadTree::build(bounds(), Config::default(), &circles).unwrap();

    let depths: Vec<usize> = qt.nodes().map(|node| node.depth()).collect();
    assert_eq!(depths, vec![0, 1, 2, 2, 2, 2, 1, 1, 1]);

    let nw = bounds().quadrants()[0];
    let bounds_in_order: Vec<Rectangle> = qt.nodes().map(|node| *node.bounds()).collect();
    assert_eq!(bounds_in_order[1], nw);
    assert_eq!(&bounds_in_order[2..6], &nw.quadrants());
    assert_eq!(&bounds_in_order[6..9], &bounds().quadrants()[1..]);
}

struct Counted {
    circle: Circle,
    visits: usize,
}

impl QuadTreeItem for Counted {
    fn intersects_rect(&self, rect: &Rectangle) -> bool {
        self.circle.intersects_rect(rect)
    }
}

#[test]
fn test_traverse_visits_leaves_with_pairs_only() {
    let mut circles = quadrant_grid();
    // Leave the se quadrant with a single member.
    circles.truncate(28);
    circles.push(Circle::new(50.0, 10.0, 1.0));
    circles.push(Circle::new(5.0, 5.0, 1.0));
    circles.push(Circle::new(6.0, 6.0, 1.0));
    circles.push(Circle::new(7.0, 7.0, 1.0));
    circles.push(Circle::new(8.0, 8.0, 1.0));
    let qt = QuadTree::build(bounds(), Config::default(), &circles).unwrap();
    let mut items: Vec<Counted> = circles
        .iter()
        .map(|&circle| Counted { circle, visits: 0 })
        .collect();

    let mut visited = Vec::new();
    qt.traverse_leaves(&mut items, |container, items| {
        assert!(container.len() >= 2);
        visited.push(container.to_vec());
        for &index in container {
            items[index].visits += 1;
        }
    });

    let expected: Vec<Vec<usize>> = qt
        .leaves()
        .filter(|leaf| leaf.items().len() > 1)
        .map(|leaf| leaf.items().to_vec())
        .collect();
    assert_eq!(visited, expected);
    assert_eq!(visited.len(), 3);

    // The boundary straddler is seen once from each leaf it lives in.
    assert_eq!(items[28].visits, 2);
    assert_eq!(items[27].visits, 0);
    assert_eq!(items[0].visits, 1);
}

#[test]
fn test_stats_counts_redundant_pairs() {
    let mut circles = quadrant_grid();
    circles.push(Circle::new(50.0, 50.0, 2.0));
    circles.push(Circle::new(50.0, 50.0, 3.0));
    let qt = QuadTree::build(bounds(), Config::default(), &circles).unwrap();

    let stats = qt.stats();
    assert_eq!(stats.nodes, 5);
    assert_eq!(stats.leaves, 4);
    assert_eq!(stats.max_depth, 1);
    assert_eq!(stats.stored_indices, 44);
    assert_eq!(stats.candidate_pairs, 4 * 55);
    assert_eq!(stats.unique_candidate_pairs, 4 * 36 + 2 * 36 + 1);
    assert_eq!(stats.redundant_pairs(), 3);
}

#[test]
fn test_invalid_bounds() {
    let inverted = Rectangle::new(Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0));
    assert_eq!(
        QuadTree::new(inverted, Config::default()).unwrap_err(),
        QuadtreeError::InvalidBounds {
            start_x: 10.0,
            start_y: 0.0,
            end_x: 0.0,
            end_y: 10.0,
        }
    );
    assert!(QuadTree::new(Rectangle::from_size(f32::NAN, 1.0), Config::default()).is_err());
    // Degenerate but structurally fine.
    assert!(QuadTree::new(Rectangle::from_size(0.0, 0.0), Config::default()).is_ok());
}

#[test]
fn test_reset() {
    let circles = quadrant_grid();
    let mut qt = QuadTree::build(bounds(), Config::default(), &circles).unwrap();
    assert_eq!(qt.node_count(), 5);

    qt.reset(Rectangle::from_size(200.0, 50.0)).unwrap();
    assert_eq!(qt.node_count(), 1);
    assert!(qt.root().is_leaf());
    assert!(qt.root().items().is_empty());
    assert_eq!(qt.bounds().width(), 200.0);
    assert!(qt.reset(Rectangle::from_size(-1.0, 1.0)).is_err());
}

#[test]
fn test_out_of_bounds_item_dropped_on_split() {
    let mut circles = vec![Circle::new(500.0, 500.0, 1.0)];
    circles.extend(quadrant_grid());
    let qt = QuadTree::build(bounds(), Config::default(), &circles).unwrap();

    assert!(qt.leaves().all(|leaf| !leaf.items().contains(&0)));
}
