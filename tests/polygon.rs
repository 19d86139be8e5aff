//! Polygon assembly: nesting-derived orientation, crossing-loop rejection,
//! and duplicate-loop suppression.

mod support;

use s2_stitch::{BuilderOptions, PolygonBuilder};
use support::points::{boundary_approx_eq, latlng, parse_chain};

const TOL: f64 = 1e-9;

fn directed_no_xor() -> BuilderOptions {
    BuilderOptions {
        xor_edges: false,
        ..BuilderOptions::directed_xor()
    }
}

#[test]
fn test_single_shell() {
    let mut builder = PolygonBuilder::new(directed_no_xor()).unwrap();
    builder.add_loop(&parse_chain("0:0, 0:10, 10:5"));
    let result = builder.assemble_polygon();

    assert_eq!(result.polygon.num_loops(), 1);
    assert!(result.unused_edges.is_empty());
    let shell = result.polygon.loop_at(0);
    assert!(shell.is_ccw());
    assert!(boundary_approx_eq(
        shell,
        &parse_chain("0:0, 0:10, 10:5"),
        TOL,
        false
    ));
}

#[test]
fn test_shell_and_hole_orientation() {
    // Both loops arrive counter-clockwise; the nested one must come out
    // clockwise.
    let mut builder = PolygonBuilder::new(directed_no_xor()).unwrap();
    builder.add_loop(&parse_chain("0:0, 0:10, 10:10, 10:0"));
    builder.add_loop(&parse_chain("2:2, 2:8, 8:8, 8:2"));
    let result = builder.assemble_polygon();

    assert_eq!(result.polygon.num_loops(), 2);
    assert!(result.unused_edges.is_empty());

    let mut saw_shell = false;
    let mut saw_hole = false;
    for lp in result.polygon.loops() {
        let outer = lp
            .vertices()
            .iter()
            .any(|&v| support::points::angle_between(v, latlng(0.0, 0.0)) < TOL);
        if outer {
            saw_shell = true;
            assert!(lp.is_ccw(), "outer shell must stay counter-clockwise");
        } else {
            saw_hole = true;
            assert!(!lp.is_ccw(), "nested loop must be inverted to a hole");
        }
    }
    assert!(saw_shell && saw_hole);
}

#[test]
fn test_crossing_loops_rejected() {
    // Two triangles that intersect each other: neither can participate in a
    // valid polygon, so all six edges are unused.
    let mut builder = PolygonBuilder::new(directed_no_xor()).unwrap();
    builder.add_loop(&parse_chain("0:0, 0:12, 6:6"));
    builder.add_loop(&parse_chain("3:6, 3:18, 9:12"));
    let result = builder.assemble_polygon();

    assert_eq!(result.polygon.num_loops(), 0);
    assert_eq!(result.unused_edges.len(), 6);
}

#[test]
fn test_duplicate_loop_suppressed() {
    // The same triangle added twice: the second copy would produce an
    // identical loop, which is routed to the unused list instead.
    let triangle = parse_chain("0:0, 0:10, 10:5");
    let mut builder = PolygonBuilder::new(directed_no_xor()).unwrap();
    builder.add_loop(&triangle);
    builder.add_loop(&triangle);
    let result = builder.assemble_polygon();

    assert_eq!(result.polygon.num_loops(), 1);
    assert_eq!(result.unused_edges.len(), 3);
}

#[test]
fn test_polygon_roundtrip() {
    let mut builder = PolygonBuilder::new(directed_no_xor()).unwrap();
    builder.add_loop(&parse_chain("0:0, 0:10, 10:10, 10:0"));
    builder.add_loop(&parse_chain("2:2, 2:8, 8:8, 8:2"));
    let first = builder.assemble_polygon();
    assert!(first.unused_edges.is_empty());

    // Feeding a polygon back through a fresh builder reproduces it: the hole
    // is already clockwise, and its depth keeps it clockwise.
    let mut builder = PolygonBuilder::new(directed_no_xor()).unwrap();
    builder.add_polygon(&first.polygon);
    let second = builder.assemble_polygon();

    assert_eq!(second.polygon.num_loops(), first.polygon.num_loops());
    assert!(second.unused_edges.is_empty());
    for lp in first.polygon.loops() {
        assert!(
            second
                .polygon
                .loops()
                .iter()
                .any(|other| boundary_approx_eq(other, lp.vertices(), TOL, false)),
            "round-tripped polygon lost a loop"
        );
    }
}

#[test]
fn test_xor_shells_polygon() {
    // The shell/hole/shell union from loop assembly, in polygon form.
    let mut builder = PolygonBuilder::new(BuilderOptions::directed_xor()).unwrap();
    builder.add_loop(&parse_chain("0:0, 0:10, 5:10, 10:10, 10:5, 10:0"));
    builder.add_loop(&parse_chain("0:10, 0:15, 5:15, 5:10"));
    builder.add_loop(&parse_chain("10:10, 5:10, 5:5, 10:5"));
    let result = builder.assemble_polygon();

    assert_eq!(result.polygon.num_loops(), 1);
    assert!(result.unused_edges.is_empty());
    assert!(boundary_approx_eq(
        result.polygon.loop_at(0),
        &parse_chain("0:0, 0:10, 0:15, 5:15, 5:10, 5:5, 10:5, 10:0"),
        TOL,
        false
    ));
}
