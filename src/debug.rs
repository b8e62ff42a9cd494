use hashbrown::HashSet;

use crate::types::{Point, Triangle, Triangles};

/// Defines which phases of the Triangulation are recorded
#[derive(Debug, Clone)]
pub enum PhaseRecord {
    /// Records all the phases
    All,
    /// Records the steps during the specified phase
    In(TriangulationPhase),
    /// Records the steps during the specified phases
    InAny(HashSet<TriangulationPhase>),
}

/// Defines which steps (vertex insertions) of the Triangulation are recorded
#[derive(Debug, Clone)]
pub enum StepsRecord {
    /// Records all the steps
    All,
    /// Records all the steps after the specified one (inclusive)
    From(usize),
    /// Records all the steps until the specified one (inclusive)
    Until(usize),
    /// Records all the steps between the specified ones (inclusive)
    Between(usize, usize),
}

#[derive(Debug, Clone)]
pub struct DebugConfiguration {
    pub phase_record: PhaseRecord,
    pub steps_record: StepsRecord,
    /// Stops the insertions before this step. [None] means that it won't force an early exit
    pub force_end_at_step: Option<usize>,
}
impl Default for DebugConfiguration {
    fn default() -> Self {
        Self {
            phase_record: PhaseRecord::All,
            steps_record: StepsRecord::All,
            force_end_at_step: Default::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DebugSnapshot {
    pub step: usize,
    pub triangulation_phase: TriangulationPhase,
    /// Triangles removed or created during this phase
    pub changed: Vec<Triangle>,
    /// Live triangles at the end of this phase
    pub triangles: Vec<Triangle>,
}

#[derive(Debug, Clone)]
pub struct DebugContext {
    pub config: DebugConfiguration,
    pub snapshots: Vec<DebugSnapshot>,
    pub current_step: usize,
}

impl DebugContext {
    pub(crate) fn new(config: DebugConfiguration) -> Self {
        Self {
            config,
            snapshots: Vec::new(),
            current_step: 0,
        }
    }

    fn should_record(&self, phase: TriangulationPhase) -> bool {
        let record = match &self.config.phase_record {
            PhaseRecord::All => true,
            PhaseRecord::InAny(phases) => phases.contains(&phase),
            PhaseRecord::In(rec_phase) => phase == *rec_phase,
        };
        record
            && match self.config.steps_record {
                StepsRecord::All => true,
                StepsRecord::From(from) => self.current_step >= from,
                StepsRecord::Until(to) => self.current_step <= to,
                StepsRecord::Between(from, to) => {
                    self.current_step >= from && self.current_step <= to
                }
            }
    }

    pub(crate) fn push_snapshot(
        &mut self,
        phase: TriangulationPhase,
        triangles: &Triangles,
        changed: &[Triangle],
    ) {
        if !self.should_record(phase) {
            return;
        }
        self.snapshots.push(DebugSnapshot {
            step: self.current_step,
            triangulation_phase: phase,
            changed: changed.to_vec(),
            triangles: triangles.values().copied().collect(),
        });
    }

    /// Returns true if the algorithm should stop
    pub(crate) fn set_step(&mut self, step: usize) -> bool {
        self.current_step = step;
        match self.config.force_end_at_step {
            Some(end_step) => step >= end_step,
            None => false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TriangulationPhase {
    ScaffoldInsertion,
    /// Bad triangles of the inserted vertex were removed
    RemoveBadTriangles(Point),
    /// The hole around the inserted vertex was re-triangulated
    FillHole(Point),
}
