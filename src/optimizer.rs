//! Cheap plot-order optimization: join strokes that already touch, then
//! visit the rest nearest-first so the pen spends less time in the air.
use std::collections::BTreeMap;

use geo::{Distance, Euclidean};
use geo_types::{Coord, LineString, MultiLineString, Point};
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

fn gap(a: &Coord<f64>, b: &Coord<f64>) -> f64 {
    Euclidean.distance(Point::from(*a), Point::from(*b))
}

/// Total pen-up distance when plotting `mls` in order.
pub fn travel_distance(mls: &MultiLineString<f64>) -> f64 {
    mls.0
        .windows(2)
        .filter_map(|pair| Some(gap(pair[0].0.last()?, pair[1].0.first()?)))
        .sum()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Optimizer {
    max_keepdown: f64,
}

impl Optimizer {
    /// `max_keepdown` is the largest gap the pen may bridge without lifting
    /// when merging strokes.
    pub fn new(max_keepdown: f64) -> Optimizer {
        Optimizer { max_keepdown }
    }

    /// Appends each stroke to its predecessor when the predecessor ends
    /// within `max_keepdown` of where the stroke starts. Empty strokes are
    /// dropped.
    pub fn merge(&self, mls: &MultiLineString<f64>) -> MultiLineString<f64> {
        let mut lines_out: Vec<LineString<f64>> = vec![];
        for source in mls.0.iter().filter(|l| !l.0.is_empty()) {
            match lines_out.last_mut() {
                Some(current)
                    if current
                        .0
                        .last()
                        .zip(source.0.first())
                        .is_some_and(|(end, start)| gap(end, start) <= self.max_keepdown) =>
                {
                    let skip = usize::from(current.0.last() == source.0.first());
                    current.0.extend(source.0.iter().skip(skip).copied());
                }
                _ => lines_out.push(source.clone()),
            }
        }
        MultiLineString::new(lines_out)
    }

    /// Greedy nearest-neighbor ordering. Each stroke may be reversed if its
    /// far end is the closer one. Strokes with fewer than two points are
    /// dropped.
    pub fn optimize(&self, mls: &MultiLineString<f64>) -> MultiLineString<f64> {
        let mut remaining: BTreeMap<usize, LineString<f64>> = mls
            .0
            .iter()
            .filter(|line| line.0.len() > 1)
            .cloned()
            .enumerate()
            .collect();
        if remaining.len() < 2 {
            return MultiLineString::new(remaining.into_values().collect());
        }
        let rtree = build_rtree(&remaining);

        let mut lines_out: Vec<LineString<f64>> = vec![];
        let mut cursor = match remaining.remove(&0) {
            Some(first) => {
                let end = first.0[first.0.len() - 1];
                lines_out.push(first);
                end
            }
            None => return MultiLineString::new(lines_out),
        };
        while !remaining.is_empty() {
            let next = rtree
                .nearest_neighbor_iter(&[cursor.x, cursor.y])
                .find(|endpoint| remaining.contains_key(&endpoint.line_id));
            let endpoint = match next {
                Some(endpoint) => endpoint,
                None => break,
            };
            if let Some(mut line) = remaining.remove(&endpoint.line_id) {
                if endpoint.reversed {
                    line.0.reverse();
                }
                cursor = line.0[line.0.len() - 1];
                lines_out.push(line);
            }
        }
        lines_out.extend(remaining.into_values());

        let out = MultiLineString::new(lines_out);
        debug!(
            "Optimized {} strokes, pen-up travel {:.3} -> {:.3}",
            out.0.len(),
            travel_distance(mls),
            travel_distance(&out)
        );
        out
    }

    /// Merge, then order.
    pub fn run(&self, mls: &MultiLineString<f64>) -> MultiLineString<f64> {
        self.merge(&self.optimize(&self.merge(mls)))
    }
}

fn build_rtree(lines: &BTreeMap<usize, LineString<f64>>) -> RTree<Endpoint> {
    let mut endpoints: Vec<Endpoint> = vec![];
    for (id, line) in lines {
        if let (Some(first), Some(last)) = (line.0.first(), line.0.last()) {
            endpoints.push(Endpoint::new(*id, *first, false));
            endpoints.push(Endpoint::new(*id, *last, true));
        }
    }
    RTree::bulk_load(endpoints)
}

/// One end of a stroke. Entering the stroke at its last point means drawing
/// it `reversed`.
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
    line_id: usize,
    at: Coord<f64>,
    reversed: bool,
}

impl Endpoint {
    pub fn new(line_id: usize, at: Coord<f64>, reversed: bool) -> Endpoint {
        Endpoint {
            line_id,
            at,
            reversed,
        }
    }
}

impl RTreeObject for Endpoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.at.x, self.at.y])
    }
}

impl PointDistance for Endpoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let d_x = self.at.x - point[0];
        let d_y = self.at.y - point[1];
        d_x * d_x + d_y * d_y
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo_types::coord;
    use std::str::FromStr;
    use wkt::Wkt;

    fn mls(wkt: &str) -> MultiLineString<f64> {
        MultiLineString::try_from(Wkt::<f64>::from_str(wkt).expect("bad wkt"))
            .expect("not a multilinestring")
    }

    #[test]
    fn test_merge_touching() {
        let lines = mls("MULTILINESTRING((0 0,1 0),(1 0,1 1),(5 5,6 6))");
        let merged = Optimizer::new(0.01).merge(&lines);
        assert_eq!(merged.0.len(), 2);
        assert_eq!(
            merged.0[0].0,
            vec![
                coord! {x: 0.0, y: 0.0},
                coord! {x: 1.0, y: 0.0},
                coord! {x: 1.0, y: 1.0}
            ]
        );
    }

    #[test]
    fn test_travel_distance() {
        let lines = mls("MULTILINESTRING((0 0,1 0),(4 4,5 5))");
        assert!((travel_distance(&lines) - 5.0).abs() < 1e-12);
        assert_eq!(travel_distance(&mls("MULTILINESTRING((0 0,1 0))")), 0.0);
    }

    #[test]
    fn test_merge_within_keepdown() {
        let lines = mls("MULTILINESTRING((0 0,1 0),(1.05 0,2 0))");
        assert_eq!(Optimizer::new(0.1).merge(&lines).0.len(), 1);
        assert_eq!(Optimizer::new(0.01).merge(&lines).0.len(), 2);
    }

    #[test]
    fn test_optimize_trivial() {
        let opt = Optimizer::new(0.1);
        assert!(opt.optimize(&MultiLineString::new(vec![])).0.is_empty());
        let one = mls("MULTILINESTRING((0 0,1 1))");
        assert_eq!(opt.optimize(&one), one);
    }

    #[test]
    fn test_optimize_reduces_travel() {
        let lines = mls(
            "MULTILINESTRING((0 0,1 0),(10 0,11 0),(2 0,3 0),(12 0,13 0),(4 0,5 0))",
        );
        let opt = Optimizer::new(0.1);
        let out = opt.optimize(&lines);
        assert_eq!(out.0.len(), 5);
        assert!(travel_distance(&out) < travel_distance(&lines));
        assert_eq!(out.0[1].0[0], coord! {x: 2.0, y: 0.0});
    }

    #[test]
    fn test_optimize_reverses() {
        let lines = mls("MULTILINESTRING((0 0,1 0),(5 0,1.5 0))");
        let out = Optimizer::new(0.1).optimize(&lines);
        assert_eq!(out.0[1].0[0], coord! {x: 1.5, y: 0.0});
        assert_eq!(out.0[1].0[1], coord! {x: 5.0, y: 0.0});
    }

    #[test]
    fn test_lineref_lookup() {
        let mut tree = RTree::new();
        tree.insert(Endpoint::new(0, coord! {x: 0., y: 0.}, false));
        tree.insert(Endpoint::new(0, coord! {x: 20., y: 0.}, true));
        tree.insert(Endpoint::new(1, coord! {x: 10., y: 10.}, false));
        let nearest = tree.nearest_neighbor(&[9., 9.]).unwrap();
        assert_eq!(nearest.line_id, 1);
        assert!(!nearest.reversed);
    }

    #[test]
    fn test_run_joins_reordered_strokes() {
        // Out of order, but once sorted every stroke touches the next.
        let lines = mls("MULTILINESTRING((0 0,1 0),(2 0,3 0),(1 0,2 0))");
        let out = Optimizer::new(0.01).run(&lines);
        assert_eq!(out.0.len(), 1);
        assert_eq!(out.0[0].0.len(), 4);
    }
}
