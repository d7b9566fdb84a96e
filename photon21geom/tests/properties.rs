use photon21geom::corner::{corner, effective_radius};
use photon21geom::offset::offset_polyline;
use photon21geom::{fillet_polyline, CornerMode, Grid, Polyline, Vector};
use proptest::prelude::*;

/// Polyline from a start heading and a list of (segment length, turn in degrees) steps
fn walk(heading: f64, steps: &[(f64, f64)]) -> Polyline {
    let mut pts = vec![Vector::new(0.0, 0.0)];
    let mut angle = heading;
    for (len, turn) in steps {
        let last = pts[pts.len() - 1];
        pts.push(last + Vector::from_polar(*len, angle));
        angle += turn;
    }
    Polyline::new(pts).unwrap()
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`
fn line_distance(p: &Vector, a: &Vector, b: &Vector) -> f64 {
    let t = (*b - *a).normalize().unwrap();
    t.cross(&(*p - *a)).abs()
}

fn steps() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.5f64..30.0, -170.0f64..170.0), 1..7)
}

proptest! {
    #[test]
    fn offset_points_keep_distance(
        heading in 0.0f64..360.0,
        steps in steps(),
        d in -5.0f64..5.0,
    ) {
        let line = walk(heading, &steps);
        let pts = line.points();
        let off = offset_polyline(&line, d, false).unwrap();
        prop_assert_eq!(off.len(), pts.len());
        let n = pts.len();
        for idx in 0..n {
            // Distance to each adjacent segment's line
            if idx > 0 {
                let dist = line_distance(&off[idx], &pts[idx - 1], &pts[idx]);
                prop_assert!((dist - d.abs()).abs() < 1e-6, "{} vs {}", dist, d);
            }
            if idx + 1 < n {
                let dist = line_distance(&off[idx], &pts[idx], &pts[idx + 1]);
                prop_assert!((dist - d.abs()).abs() < 1e-6, "{} vs {}", dist, d);
            }
        }
    }

    #[test]
    fn corners_stay_within_their_segments(
        heading in 0.0f64..360.0,
        steps in prop::collection::vec((0.5f64..30.0, -170.0f64..170.0), 2..7),
        radius in 0.1f64..40.0,
        chamfer in any::<bool>(),
    ) {
        let grid = Grid::default();
        let mode = if chamfer { CornerMode::Chamfer } else { CornerMode::Arc };
        let line = walk(heading, &steps);
        let pts = line.points();
        let n = pts.len();
        // Distance consumed at each end of each segment
        let mut consumed = vec![0.0f64; 2 * (n - 1)];
        for idx in 1..n - 1 {
            let d1 = pts[idx].distance(&pts[idx - 1]);
            let d2 = pts[idx].distance(&pts[idx + 1]);
            let r = effective_radius(pts, idx, radius);
            prop_assert!(r <= radius + 1e-12);
            prop_assert!(r <= d1.min(d2) + 1e-12);
            let out = corner(&pts[idx - 1], &pts[idx], &pts[idx + 1], r, mode, &grid).unwrap();
            let (first, last) = (out[0], out[out.len() - 1]);
            let back = first.distance(&pts[idx]);
            let fwd = last.distance(&pts[idx]);
            prop_assert!(back <= d1.min(d2) + 1e-9);
            prop_assert!(fwd <= d1.min(d2) + 1e-9);
            consumed[2 * (idx - 1) + 1] = back;
            consumed[2 * idx] = fwd;
        }
        // Neighboring corners never overlap on a shared segment
        for seg in 0..n - 1 {
            let len = pts[seg].distance(&pts[seg + 1]);
            prop_assert!(consumed[2 * seg] + consumed[2 * seg + 1] <= len + 1e-9);
        }
        // And the full fillet pass succeeds
        prop_assert!(fillet_polyline(&line, radius, mode, &grid).is_ok());
    }

    #[test]
    fn fillet_is_deterministic(
        heading in 0.0f64..360.0,
        steps in steps(),
        radius in 0.1f64..20.0,
    ) {
        let grid = Grid::default();
        let line = walk(heading, &steps);
        let a = fillet_polyline(&line, radius, CornerMode::Arc, &grid).unwrap();
        let b = fillet_polyline(&line, radius, CornerMode::Arc, &grid).unwrap();
        prop_assert_eq!(a, b);
    }
}
