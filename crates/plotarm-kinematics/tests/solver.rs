use plotarm_core::Point;
use plotarm_kinematics::{GearRatio, TwoLinkSolver};

fn arm() -> TwoLinkSolver {
    TwoLinkSolver::new(10.0, 10.0, GearRatio::default()).unwrap()
}

#[test]
fn test_beyond_reach_is_unreachable() {
    let mut solver = arm();
    let err = solver.move_to(21.0, 0.0).unwrap_err();
    assert!(err.is_unreachable());
    assert!(err.to_string().contains("unreachable"));
}

#[test]
fn test_repeated_target_has_no_drift() {
    let mut solver = arm();
    let first = solver.move_to(12.5, 3.25).unwrap();
    let second = solver.move_to(12.5, 3.25).unwrap();
    assert_eq!(second.deltas(), (0, 0));
    assert_eq!(second.totals(), first.totals());
}

#[test]
fn test_totals_do_not_depend_on_history() {
    let mut direct = arm();
    direct.move_to(8.0, 9.0).unwrap();

    let mut wandering = arm();
    for (x, y) in [(15.0, 2.0), (-4.0, 11.0), (3.0, 19.0), (8.0, 9.0)] {
        wandering.move_to(x, y).unwrap();
    }
    assert_eq!(direct.state().totals(), wandering.state().totals());
}

#[test]
fn test_reset_returns_to_home() {
    let mut solver = arm();
    let mut shoulder = 0i64;
    let mut elbow = 0i64;
    for (x, y) in [(10.0, 10.0), (15.0, 5.0), (-6.0, 13.0), (2.0, 18.0)] {
        let (a, b) = solver.move_to(x, y).unwrap().deltas();
        shoulder += a;
        elbow += b;
    }
    let (a, b) = solver.reset().deltas();
    shoulder += a;
    elbow += b;

    assert_eq!((shoulder, elbow), (0, 0));
    assert_eq!(solver.state().totals(), (0, 0));
}

#[test]
fn test_quantized_pose_stays_close_to_target() {
    let mut solver = arm();
    let target = Point::new(11.0, 7.0);
    solver.move_to_point(target).unwrap();
    let pose = solver.pose();
    // One step is under 0.1° per joint; two 10-unit links stay well within 0.05.
    assert!(pose.pen.distance_to(&target) < 0.05, "pen at {}", pose.pen);
}

#[test]
fn test_joint_angles_follow_totals() {
    let mut solver = arm();
    solver.move_to(20.0, 0.0).unwrap();
    let (shoulder, elbow) = solver.joint_angles();
    assert!((shoulder.degrees() - 180.0).abs() < 0.1);
    assert!((elbow.degrees() - 180.0).abs() < 0.1);
}
