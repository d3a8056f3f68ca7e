use tracing::{debug, info, warn};

use crate::error::HeatError;
use crate::heat;
use crate::model::{DirNode, FileRecord, Metric, View};
use crate::navigate::NavState;
use crate::tree;

/// A loaded dataset: the built tree plus provenance for summaries.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub name: String,
    pub root: DirNode,
    pub file_count: usize,
    pub skipped: usize,
}

enum Phase {
    Empty,
    Loading,
    Ready(Dataset),
    Failed(String),
}

/// One user session over one dataset: the immutable tree, the drill
/// position, the selected metric, and the load lifecycle around them.
/// Single writer, no locking; everything here is synchronous.
pub struct Session {
    phase: Phase,
    nav: NavState,
    metric: Metric,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Empty,
            nav: NavState::new(),
            metric: Metric::Changes,
            generation: 0,
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Switch the color axis. The drill position is kept; the next view()
    /// picks the new axis up since nothing is cached.
    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.phase {
            Phase::Ready(ds) => Some(ds),
            _ => None,
        }
    }

    /// Start a dataset load and hand out its token. Issuing a newer token
    /// invalidates every outstanding one.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.generation
    }

    /// Deliver the outcome of a load. An outcome carrying a superseded
    /// token is dropped without touching state.
    pub fn finish_load(
        &mut self,
        token: u64,
        name: &str,
        outcome: Result<Vec<FileRecord>, HeatError>,
    ) {
        if token != self.generation {
            debug!(token, current = self.generation, "discarding stale load result");
            return;
        }

        match outcome {
            Ok(records) => {
                let report = tree::build(&records);
                for rec in &report.skipped {
                    warn!(record = %rec, "dropped during tree build");
                }
                if records.is_empty() {
                    info!(dataset = name, "dataset is empty, nothing to show");
                }
                self.phase = Phase::Ready(Dataset {
                    name: name.to_string(),
                    root: report.root,
                    file_count: records.len() - report.skipped.len(),
                    skipped: report.skipped.len(),
                });
                self.nav.reset();
            }
            Err(err) => {
                self.phase = Phase::Failed(err.to_string());
            }
        }
    }

    fn ready_root(phase: &Phase) -> Result<&DirNode, HeatError> {
        match phase {
            Phase::Ready(ds) => Ok(&ds.root),
            Phase::Loading => Err(HeatError::LoadPending),
            Phase::Empty => Err(HeatError::NoDataset),
            Phase::Failed(msg) => Err(HeatError::Load(msg.clone())),
        }
    }

    /// The renderer's input at the current position: breadcrumb segments
    /// plus one tile per child of the focused directory. Recomputed fresh
    /// on every call.
    pub fn view(&self) -> Result<View, HeatError> {
        let root = Self::ready_root(&self.phase)?;
        let here = self.nav.resolve(root);
        Ok(View {
            breadcrumb: self.nav.path().to_vec(),
            tiles: heat::tiles(here, self.metric),
        })
    }

    /// Tile click: enter `name` if it is a drillable directory.
    pub fn drill_down(&mut self, name: &str) -> Result<bool, HeatError> {
        let root = Self::ready_root(&self.phase)?;
        Ok(self.nav.drill_down(root, name))
    }

    /// Back action. No-op at the root.
    pub fn drill_up(&mut self) -> Result<bool, HeatError> {
        Self::ready_root(&self.phase)?;
        Ok(self.nav.drill_up())
    }

    /// Breadcrumb jump: clicking segment index `i` maps to depth `i + 1`,
    /// the root crumb to depth 0. Out-of-range depths clamp.
    pub fn jump_to(&mut self, depth: usize) -> Result<(), HeatError> {
        Self::ready_root(&self.phase)?;
        self.nav.jump_to(depth);
        Ok(())
    }
}
