//! Motion planner
//!
//! Tracks the pen (`Unknown`, `Up`, `Down`) and, for each waypoint:
//! 1. solves the joint motion (an unreachable waypoint aborts the path)
//! 2. schedules a pen actuation only when the waypoint's intent differs from
//!    the tracked pen state
//! 3. produces one motion command with both joint deltas

use crate::command::{MotionCommand, PlannedMove};
use crate::pen::{PenAction, PenProtocol};
use plotarm_core::{PenState, Result, Transport, Waypoint};
use plotarm_kinematics::TwoLinkSolver;
use plotarm_path::{InterpolatorConfig, PathInterpolator};

/// Totals for one executed path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanSummary {
    /// Waypoints sent
    pub waypoints: usize,
    /// Pen actuations sent
    pub pen_actuations: usize,
    /// Shoulder total after the path
    pub shoulder_total: i64,
    /// Elbow total after the path
    pub elbow_total: i64,
}

/// Pen-aware planner driving a two-link solver
#[derive(Debug, Clone)]
pub struct MotionPlanner {
    solver: TwoLinkSolver,
    interpolation: InterpolatorConfig,
    protocol: PenProtocol,
    pen: PenState,
    last: Waypoint,
}

impl MotionPlanner {
    /// Create a planner with the pen state unknown
    pub fn new(
        solver: TwoLinkSolver,
        interpolation: InterpolatorConfig,
        protocol: PenProtocol,
    ) -> Self {
        Self {
            solver,
            interpolation,
            protocol,
            pen: PenState::Unknown,
            last: Waypoint::default(),
        }
    }

    /// Assume a known pen state instead of `Unknown`
    pub fn with_pen_state(mut self, pen: PenState) -> Self {
        self.pen = pen;
        self
    }

    /// The solver and its joint bookkeeping
    pub fn solver(&self) -> &TwoLinkSolver {
        &self.solver
    }

    /// Mutable access to the solver
    pub fn solver_mut(&mut self) -> &mut TwoLinkSolver {
        &mut self.solver
    }

    /// Pen commands in use
    pub fn protocol(&self) -> &PenProtocol {
        &self.protocol
    }

    /// Tracked pen state
    pub fn pen_state(&self) -> PenState {
        self.pen
    }

    /// Last waypoint reached; the start of the next path
    pub fn last_waypoint(&self) -> Waypoint {
        self.last
    }

    /// Plan a single waypoint
    ///
    /// On error neither the pen state nor the joint totals change.
    pub fn plan(&mut self, waypoint: Waypoint) -> Result<PlannedMove> {
        let state = self.solver.move_to(waypoint.x, waypoint.y)?;

        let required = PenState::required_by(&waypoint);
        let pen = (self.pen != required).then(|| {
            if waypoint.pen_down {
                PenAction::Drop
            } else {
                PenAction::Lift
            }
        });
        self.pen = required;
        self.last = waypoint;

        Ok(PlannedMove {
            waypoint,
            pen,
            motion: MotionCommand::from(state),
            state,
        })
    }

    /// Waypoints of a path, starting where the previous path ended
    pub fn waypoints<'a>(&self, path: &'a str) -> Result<PathInterpolator<'a>> {
        Ok(PathInterpolator::new(path, &self.interpolation)?.starting_at(self.last))
    }

    /// Plan every waypoint of a path lazily without sending anything
    ///
    /// Fails immediately on an empty path; later errors are yielded in place
    /// and end the sequence.
    pub fn plan_path<'a>(&'a mut self, path: &'a str) -> Result<PlannedMoves<'a>> {
        let waypoints = self.waypoints(path)?;
        Ok(PlannedMoves {
            planner: self,
            waypoints,
            done: false,
        })
    }

    /// Plan one waypoint and write its commands to a transport
    ///
    /// The planner only keeps the new joint totals once every command was
    /// written. On a failed write the totals and last waypoint are restored
    /// and the pen state becomes `Unknown`, so the next waypoint re-sends the
    /// pen actuation and the full joint motion.
    pub fn send(
        &mut self,
        waypoint: Waypoint,
        transport: &mut dyn Transport,
    ) -> Result<PlannedMove> {
        let state = self.solver.state();
        let last = self.last;
        let planned = self.plan(waypoint)?;

        if let Err(e) = send_move(&self.protocol, &planned, transport) {
            tracing::warn!("Write to {} failed at {}: {}", transport.name(), waypoint, e);
            self.solver.restore(state);
            self.last = last;
            self.pen = PenState::Unknown;
            return Err(e);
        }
        Ok(planned)
    }

    /// Plan a path and write its commands to a transport
    ///
    /// Stops at the first error; commands for earlier waypoints have already
    /// been written by then.
    pub fn execute(&mut self, path: &str, transport: &mut dyn Transport) -> Result<PlanSummary> {
        tracing::info!("Running path '{}' on {}", path, transport.name());
        let mut summary = PlanSummary::default();

        for waypoint in self.waypoints(path)? {
            let planned = self.send(waypoint?, transport)?;
            summary.waypoints += 1;
            if planned.pen.is_some() {
                summary.pen_actuations += 1;
            }
        }

        (summary.shoulder_total, summary.elbow_total) = self.solver.state().totals();
        tracing::info!(
            "Path complete: {} waypoints, {} pen actuations",
            summary.waypoints,
            summary.pen_actuations
        );
        Ok(summary)
    }

    /// Return the arm to its home position
    ///
    /// On a failed write the joint totals are left as they were.
    pub fn home(&mut self, transport: &mut dyn Transport) -> Result<MotionCommand> {
        let state = self.solver.state();
        let motion = MotionCommand::from(self.solver.reset());
        if let Err(e) = transport.write(&motion.to_string()) {
            self.solver.restore(state);
            return Err(e);
        }
        self.last = Waypoint::default();
        tracing::info!("Homed arm with {}", motion);
        Ok(motion)
    }
}

/// Write one planned move: pen actuation first, then the motion command
fn send_move(
    protocol: &PenProtocol,
    planned: &PlannedMove,
    transport: &mut dyn Transport,
) -> Result<()> {
    if let Some(action) = planned.pen {
        tracing::debug!("Pen {}", action);
        protocol.actuation(action).send(transport)?;
    }
    transport.write(&planned.motion.to_string())
}

/// Lazy planned moves for one path
pub struct PlannedMoves<'a> {
    planner: &'a mut MotionPlanner,
    waypoints: PathInterpolator<'a>,
    done: bool,
}

impl Iterator for PlannedMoves<'_> {
    type Item = Result<PlannedMove>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let planned = match self.waypoints.next()? {
            Ok(waypoint) => self.planner.plan(waypoint),
            Err(e) => Err(e),
        };
        if planned.is_err() {
            self.done = true;
        }
        Some(planned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotarm_kinematics::GearRatio;

    fn planner() -> MotionPlanner {
        let solver = TwoLinkSolver::new(10.0, 10.0, GearRatio::default()).unwrap();
        MotionPlanner::new(
            solver,
            InterpolatorConfig::default(),
            PenProtocol::default().without_pauses(),
        )
    }

    #[test]
    fn test_first_waypoint_sets_pen() {
        let mut planner = planner();
        let planned = planner.plan(Waypoint::new(10.0, 10.0, false)).unwrap();
        assert_eq!(planned.pen, Some(PenAction::Lift));
        assert_eq!(planned.motion, MotionCommand::new(1018, 1018));
        assert_eq!(planner.pen_state(), PenState::Up);
    }

    #[test]
    fn test_pen_only_on_transition() {
        let mut planner = planner().with_pen_state(PenState::Up);
        let pens: Vec<_> = [false, false, true, true, false]
            .iter()
            .enumerate()
            .map(|(i, &down)| {
                planner
                    .plan(Waypoint::new(5.0 + i as f64, 10.0, down))
                    .unwrap()
                    .pen
            })
            .collect();
        assert_eq!(
            pens,
            vec![None, None, Some(PenAction::Drop), None, Some(PenAction::Lift)]
        );
    }

    #[test]
    fn test_unreachable_changes_nothing() {
        let mut planner = planner();
        planner.plan(Waypoint::new(10.0, 10.0, false)).unwrap();
        let err = planner.plan(Waypoint::new(30.0, 0.0, true)).unwrap_err();
        assert!(err.is_unreachable());
        assert_eq!(planner.pen_state(), PenState::Up);
        assert_eq!(planner.solver().state().totals(), (1018, 1018));
        assert_eq!(planner.last_waypoint(), Waypoint::new(10.0, 10.0, false));
    }

    #[test]
    fn test_plan_path_stops_at_unreachable() {
        let mut planner = planner();
        let results: Vec<_> = planner.plan_path("M10 0L25 0L10 10").unwrap().collect();
        let failures = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(failures, 1);
        assert!(results.last().unwrap().is_err());
        // (10,0) and (11,0)..(20,0) are reachable, (21,0) is not.
        assert_eq!(results.len(), 1 + 10 + 1);
    }

    #[test]
    fn test_next_path_continues_from_last_waypoint() {
        let mut planner = planner();
        planner.plan_path("M10 5").unwrap().for_each(drop);
        let moves: Vec<_> = planner
            .plan_path("l2 0")
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[1].waypoint, Waypoint::new(12.0, 5.0, true));
    }
}
