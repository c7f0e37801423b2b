//! Force directed embedding with adaptive step length
//!
//! Edges act as springs pulling their ends together while every pair of nodes
//! repels. Each iteration sweeps over the nodes and moves each one by a fixed
//! step in the direction of the net force acting on it, using the positions
//! already updated earlier in the same sweep. The step grows while the total
//! energy keeps decreasing and shrinks as soon as it does not.

use crate::{
    Dimension, Embedding, Graph, GridEmbedding, ProjectionPlane, RandomEmbedding, Vector,
    Vector2, Vector3,
};
use rand::Rng;
use tracing::{debug, trace, warn};

/// Placement the spring embedding starts from in two dimensions
///
/// Three dimensional runs always start from random positions in the unit cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialLayout {
    #[default]
    Grid,
    Random,
}

/// Configuration for the spring embedding
#[derive(Debug, Clone)]
pub struct SpringEmbedding {
    pub dimension: Dimension,

    pub initial: InitialLayout,

    /// Iteration cap of [`Embedding::embed`]
    pub max_iterations: usize,

    /// The layout is stable once the nodes moved less than
    /// `spring_length * tolerance` in one iteration
    pub tolerance: f64,

    pub initial_step: f64,

    /// Factor applied to the step when the energy regresses, its inverse is
    /// applied after five improving iterations in a row
    pub step_factor: f64,

    /// Natural spring length `K`
    pub spring_length: f64,

    /// Repulsion strength `C`
    pub repulsion: f64,

    /// Plane used to draw three dimensional results
    pub plane: ProjectionPlane,
}

impl Default for SpringEmbedding {
    fn default() -> Self {
        Self {
            dimension: Dimension::Two,
            initial: InitialLayout::Grid,
            max_iterations: 1000,
            tolerance: 1e-6,
            initial_step: 0.1,
            step_factor: 0.9,
            spring_length: 1.0,
            repulsion: 1.0,
            plane: ProjectionPlane::default(),
        }
    }
}

/// Outcome of a spring embedding run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Convergence {
    /// Iterations actually performed
    pub iterations: usize,

    /// Whether the last iteration moved the nodes less than the tolerance
    pub converged: bool,

    /// Total displacement of the nodes during the last iteration
    pub measure: f64,
}

impl SpringEmbedding {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            ..Default::default()
        }
    }

    /// Seed the graph with the initial layout and iterate until the layout
    /// is stable or `max_iterations` is reached
    pub fn run(&self, graph: &mut Graph) -> Convergence {
        self.run_with_rng(graph, &mut rand::thread_rng())
    }

    /// Same as [`SpringEmbedding::run`] with a caller provided generator
    pub fn run_with_rng<R: Rng + ?Sized>(&self, graph: &mut Graph, rng: &mut R) -> Convergence {
        if graph.is_empty() {
            return Convergence::default();
        }

        self.seed_with_rng(graph, rng);
        let report = self.start_with_rng(graph, rng).iterate(graph, self.max_iterations);

        if report.converged {
            debug!("Spring embedding converged within {} steps", report.iterations);
        } else {
            debug!(
                "Spring embedding stopped after {} steps, last displacement {}",
                report.iterations, report.measure
            );
        }
        report
    }

    /// Place the nodes where a run starts from
    ///
    /// In two dimensions this is the configured [`InitialLayout`], in three
    /// dimensions random positions in the unit cube.
    pub fn seed(&self, graph: &mut Graph) {
        self.seed_with_rng(graph, &mut rand::thread_rng());
    }

    /// Same as [`SpringEmbedding::seed`] with a caller provided generator
    pub fn seed_with_rng<R: Rng + ?Sized>(&self, graph: &mut Graph, rng: &mut R) {
        match (self.dimension, self.initial) {
            (Dimension::Two, InitialLayout::Grid) => GridEmbedding::default().embed(graph),
            (Dimension::Two, InitialLayout::Random) => {
                RandomEmbedding::default().embed_with_rng(graph, rng)
            }
            (Dimension::Three, _) => {
                for node in graph.nodes_mut() {
                    node.place_in_space(Vector3::xyz(rng.gen(), rng.gen(), rng.gen()));
                }
                self.plane.project(graph);
            }
        }
    }

    /// Start a stepwise simulation from the current positions of the graph
    ///
    /// Nothing is reseeded. In three dimensions a node that was never placed
    /// in space starts from its 2D position at a random depth.
    pub fn start(&self, graph: &Graph) -> SpringSimulation {
        self.start_with_rng(graph, &mut rand::thread_rng())
    }

    /// Same as [`SpringEmbedding::start`] with a caller provided generator
    pub fn start_with_rng<R: Rng + ?Sized>(&self, graph: &Graph, rng: &mut R) -> SpringSimulation {
        let working = match self.dimension {
            Dimension::Two => Working::Planar(graph.nodes().map(|node| node.position).collect()),
            Dimension::Three => Working::Spatial(
                graph
                    .nodes()
                    .map(|node| {
                        node.position_3d()
                            .unwrap_or_else(|| Vector3::xyz(node.x(), node.y(), rng.gen()))
                    })
                    .collect(),
            ),
        };

        SpringSimulation {
            control: StepControl::new(self.initial_step, self.step_factor),
            adjacency: adjacency(graph),
            working,
            iterations: 0,
            converged: false,
            embedding: self.clone(),
        }
    }

    fn relax<const D: usize>(
        &self,
        positions: &mut [Vector<D>],
        adjacency: &[Vec<usize>],
        control: &mut StepControl,
        budget: usize,
    ) -> Convergence {
        let mut report = Convergence::default();

        while !report.converged && report.iterations < budget {
            let previous = positions.to_vec();
            let energy = self.sweep(positions, adjacency, control.step);
            control.update(energy);

            report.iterations += 1;
            report.measure = previous
                .iter()
                .zip(positions.iter())
                .map(|(old, new)| {
                    let delta = *old - *new;
                    delta.dot(&delta)
                })
                .sum::<f64>()
                .sqrt();
            report.converged = report.measure < self.spring_length * self.tolerance;

            trace!(
                "Iteration {}: energy {energy}, step {}, displacement {}",
                report.iterations,
                control.step,
                report.measure
            );
        }

        report
    }

    /// Move every node once, returns the energy of the system
    fn sweep<const D: usize>(
        &self,
        positions: &mut [Vector<D>],
        adjacency: &[Vec<usize>],
        step: f64,
    ) -> f64 {
        let mut energy = 0.0;

        for i in 0..positions.len() {
            let mut force = Vector::<D>::zero();

            for &j in &adjacency[i] {
                if let Some(pull) = pair_force(positions[i], positions[j], |d| self.attraction(d)) {
                    force += pull;
                }
            }
            for j in (0..positions.len()).filter(|&j| j != i) {
                if let Some(push) = pair_force(positions[i], positions[j], |d| self.repulsion(d)) {
                    force += push;
                }
            }

            let magnitude = force.length();
            if magnitude > 0.0 {
                energy += magnitude * magnitude;
                positions[i] += force * (step / magnitude);
            }
        }

        energy
    }

    fn attraction(&self, distance: f64) -> f64 {
        distance * distance / self.spring_length
    }

    fn repulsion(&self, distance: f64) -> f64 {
        -self.repulsion * self.spring_length * self.spring_length / distance
    }
}

impl Embedding for SpringEmbedding {
    fn embed(&self, graph: &mut Graph) {
        self.run(graph);
    }
}

/// Working coordinates of a simulation, before any rescaling
#[derive(Debug, Clone)]
enum Working {
    Planar(Vec<Vector2>),
    Spatial(Vec<Vector3>),
}

/// Spring embedding advanced a few iterations at a time
///
/// Holds the unscaled coordinates and the adaptive step between calls, so
/// driving it one iteration per frame converges exactly like a full
/// [`SpringEmbedding::run`]. Every call writes the current layout into the
/// graph, fitted to the unit square. A simulation belongs to the graph it was
/// started from: nodes must not be added in between.
#[derive(Debug, Clone)]
pub struct SpringSimulation {
    embedding: SpringEmbedding,
    adjacency: Vec<Vec<usize>>,
    working: Working,
    control: StepControl,
    iterations: usize,
    converged: bool,
}

impl SpringSimulation {
    /// Run at most `iterations` more iterations and export the layout
    ///
    /// The report covers this call only.
    pub fn iterate(&mut self, graph: &mut Graph, iterations: usize) -> Convergence {
        if self.adjacency.len() != graph.len() {
            warn!(
                "Spring simulation started on {} nodes, graph now has {}",
                self.adjacency.len(),
                graph.len()
            );
            return Convergence::default();
        }
        if graph.is_empty() {
            return Convergence::default();
        }

        let embedding = &self.embedding;
        let report = match &mut self.working {
            Working::Planar(positions) => {
                let report =
                    embedding.relax(positions, &self.adjacency, &mut self.control, iterations);
                for (node, position) in graph.nodes_mut().zip(positions.iter()) {
                    node.place(position.x(), position.y());
                }
                graph.fit_to_unit_square();
                report
            }
            Working::Spatial(positions) => {
                let report =
                    embedding.relax(positions, &self.adjacency, &mut self.control, iterations);
                for (node, position) in graph.nodes_mut().zip(positions.iter()) {
                    node.place_in_space(*position);
                }
                embedding.plane.project(graph);
                report
            }
        };

        self.iterations += report.iterations;
        if report.iterations > 0 {
            self.converged = report.converged;
        }
        report
    }

    /// Iterations performed over all calls
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the last iteration moved the nodes less than the tolerance
    pub fn is_converged(&self) -> bool {
        self.converged
    }
}

/// Force exerted on `from` by `to`, `None` when both share a position
fn pair_force<const D: usize>(
    from: Vector<D>,
    to: Vector<D>,
    magnitude: impl Fn(f64) -> f64,
) -> Option<Vector<D>> {
    let distance = from.distance(&to);
    if distance == 0.0 {
        return None;
    }
    Some((to - from) * (magnitude(distance) / distance))
}

/// Undirected neighbors of every node, in edge order and without self-loops
fn adjacency(graph: &Graph) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); graph.len()];
    for (from, to) in graph.edges().filter(|(from, to)| from != to) {
        if !adjacency[from].contains(&to) {
            adjacency[from].push(to);
        }
        if !adjacency[to].contains(&from) {
            adjacency[to].push(from);
        }
    }
    adjacency
}

#[derive(Debug, Clone)]
struct StepControl {
    step: f64,
    energy: f64,
    progress: usize,
    factor: f64,
}

impl StepControl {
    fn new(step: f64, factor: f64) -> Self {
        Self {
            step,
            energy: f64::MAX,
            progress: 0,
            factor,
        }
    }

    fn update(&mut self, energy: f64) {
        if energy < self.energy {
            self.progress += 1;
            if self.progress == 5 {
                self.progress = 0;
                self.step /= self.factor;
            }
        } else {
            self.progress = 0;
            self.step *= self.factor;
        }
        self.energy = energy;
    }
}
