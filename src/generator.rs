//! Synthetic instance generator.
//!
//! Node 0 is the depot, nodes `1..=H` are the candidate hubs and the rest
//! receive packages. Connectivity is guaranteed by a spanning path
//! `0 - 1 - ... - (N-1)`; about `N / 2` random extra edges are added on
//! top. Edge weights are Euclidean distances between node coordinates.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::io::{
    HEADER_CONFIG, HEADER_EDGES, HEADER_HUBS, HEADER_NODES, HEADER_PACKAGES, KEY_CAPACITY,
    KEY_DEPOT, KEY_HUBS, KEY_NODES, KEY_PACKAGES,
};
use crate::models::{Hub, Node, Package, Problem};

/// Coordinates are drawn uniformly from `0..=MAX_COORD`.
pub const MAX_COORD: i64 = 1000;

const DEPOT: usize = 0;
const MIN_HUB_COST: u32 = 100;
const HUB_COST_SPREAD: u32 = 400;
/// Weight given to edges between coincident nodes; `0.0` reads as "no edge".
const MIN_EDGE_WEIGHT: f64 = 0.01;

/// Generator parameters.
///
/// # Examples
///
/// ```
/// use hub_routing::generator::{generate, GeneratorConfig};
///
/// let config = GeneratorConfig::default().with_nodes(12).with_hubs(2).with_seed(9);
/// let instance = generate(&config).unwrap();
/// assert_eq!(instance.nodes().len(), 12);
/// assert_eq!(instance.hubs().len(), 2);
/// assert!(instance.to_text().starts_with("// --- CONFIGURACION ---"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    nodes: usize,
    hubs: usize,
    packages: usize,
    capacity: i64,
    seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nodes: 10,
            hubs: 3,
            packages: 5,
            capacity: 8,
            seed: 123,
        }
    }
}

impl GeneratorConfig {
    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_hubs(mut self, hubs: usize) -> Self {
        self.hubs = hubs;
        self
    }

    pub fn with_packages(mut self, packages: usize) -> Self {
        self.packages = packages;
        self
    }

    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Seed for the random generator; `0` picks one from the clock.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub fn hubs(&self) -> usize {
        self.hubs
    }

    pub fn packages(&self) -> usize {
        self.packages
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn validate(&self) -> Result<()> {
        if self.hubs >= self.nodes {
            return Err(Error::invalid_config(
                "the number of hubs must be smaller than the number of nodes",
            ));
        }
        if self.nodes - self.hubs - 1 == 0 {
            return Err(Error::invalid_config(
                "no delivery nodes left after the depot and the hubs",
            ));
        }
        Ok(())
    }
}

/// A generated problem instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    nodes: Vec<Node>,
    hubs: Vec<Hub>,
    packages: Vec<Package>,
    edges: Vec<(usize, usize, f64)>,
    capacity: i64,
    seed: u64,
}

impl Instance {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn hubs(&self) -> &[Hub] {
        &self.hubs
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Undirected edges as `(u, v, weight)`.
    pub fn edges(&self) -> &[(usize, usize, f64)] {
        &self.edges
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Seed actually used (resolved from the clock when configured as `0`).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Builds a [`Problem`] directly, without a text round trip.
    pub fn into_problem(self) -> Result<Problem> {
        let edges = DistanceMatrix::from_edges(self.nodes.len(), &self.edges);
        Problem::new(
            self.nodes,
            self.hubs,
            self.packages,
            self.capacity,
            DEPOT,
            edges,
        )
    }

    /// Renders the instance in the sectioned problem text format.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hub_count = self.hubs.len();

        writeln!(f, "{HEADER_CONFIG}")?;
        writeln!(f, "{KEY_NODES} {}", self.nodes.len())?;
        writeln!(f, "{KEY_HUBS} {hub_count}")?;
        writeln!(f, "{KEY_PACKAGES} {}", self.packages.len())?;
        writeln!(f, "{KEY_CAPACITY} {}", self.capacity)?;
        writeln!(f, "{KEY_DEPOT} {DEPOT}\n")?;

        writeln!(f, "{HEADER_NODES} (ID X Y) ---")?;
        for node in &self.nodes {
            let role = if node.id() == DEPOT {
                "Deposito"
            } else if node.id() <= hub_count {
                "Hub"
            } else {
                "Entrega"
            };
            writeln!(f, "{} {} {} // {role}", node.id(), node.x(), node.y())?;
        }

        writeln!(f, "\n{HEADER_HUBS} (ID COSTO_ACTIVACION) ---")?;
        for hub in &self.hubs {
            writeln!(f, "{} {:.2}", hub.node_id(), hub.activation_cost())?;
        }

        writeln!(f, "\n{HEADER_PACKAGES} (ID NODO_ORIGEN NODO_DESTINO) ---")?;
        for p in &self.packages {
            writeln!(f, "{} {} {}", p.id(), p.origin(), p.destination())?;
        }

        writeln!(f, "\n{HEADER_EDGES} (NODO1 NODO2 PESO) ---")?;
        for &(u, v, w) in &self.edges {
            writeln!(f, "{u} {v} {w:.2}")?;
        }
        Ok(())
    }
}

/// Generates a random, connected instance.
///
/// # Errors
///
/// [`Error::InvalidConfig`] if `hubs >= nodes` or no node is left for
/// deliveries.
pub fn generate(config: &GeneratorConfig) -> Result<Instance> {
    config.validate()?;

    let seed = if config.seed == 0 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(1)
    } else {
        config.seed
    };
    info!("generating instance with seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let n = config.nodes;
    let nodes: Vec<Node> = (0..n)
        .map(|i| {
            Node::new(
                i,
                rng.random_range(0..=MAX_COORD),
                rng.random_range(0..=MAX_COORD),
            )
        })
        .collect();

    let mut connected = vec![false; n * n];
    let mut edges = Vec::with_capacity(n + n / 2);
    for i in 0..n - 1 {
        connect(&nodes, &mut connected, &mut edges, i, i + 1);
    }
    for _ in 0..n / 2 {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        if u != v && !connected[u * n + v] {
            connect(&nodes, &mut connected, &mut edges, u, v);
        }
    }

    let hubs = (1..=config.hubs)
        .map(|id| {
            let cost = MIN_HUB_COST + rng.random_range(0..=HUB_COST_SPREAD);
            Hub::new(id, cost as f64)
        })
        .collect();

    let first_delivery = config.hubs + 1;
    let packages = (0..config.packages)
        .map(|id| Package::new(id, DEPOT, rng.random_range(first_delivery..n)))
        .collect();

    Ok(Instance {
        nodes,
        hubs,
        packages,
        edges,
        capacity: config.capacity,
        seed,
    })
}

fn connect(
    nodes: &[Node],
    connected: &mut [bool],
    edges: &mut Vec<(usize, usize, f64)>,
    u: usize,
    v: usize,
) {
    let n = nodes.len();
    let weight = nodes[u].distance_to(&nodes[v]).max(MIN_EDGE_WEIGHT);
    edges.push((u, v, weight));
    connected[u * n + v] = true;
    connected[v * n + u] = true;
}
