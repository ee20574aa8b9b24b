//! Reader for the sectioned problem text format.
//!
//! ```text
//! // --- CONFIGURACION ---
//! NODOS 4
//! HUBS 1
//! PAQUETES 2
//! CAPACIDAD_CAMION 2
//! DEPOSITO_ID 0
//!
//! // --- NODOS (ID X Y) ---
//! 0 0 0 // Deposito
//! 1 10 0 // Hub
//! ...
//! // --- HUBS (ID COSTO_ACTIVACION) ---
//! 1 150.00
//! // --- PAQUETES (ID NODO_ORIGEN NODO_DESTINO) ---
//! 0 0 3
//! // --- ARISTAS (NODO1 NODO2 PESO) ---
//! 0 1 10.00
//! ```
//!
//! Malformed data lines are skipped with a warning; only I/O failures, a
//! missing node count, and invalid problem data abort loading.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::warn;

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::{Hub, Node, Package, Problem};

pub(crate) const KEY_NODES: &str = "NODOS";
pub(crate) const KEY_HUBS: &str = "HUBS";
pub(crate) const KEY_PACKAGES: &str = "PAQUETES";
pub(crate) const KEY_CAPACITY: &str = "CAPACIDAD_CAMION";
pub(crate) const KEY_DEPOT: &str = "DEPOSITO_ID";

pub(crate) const HEADER_CONFIG: &str = "// --- CONFIGURACION ---";
pub(crate) const HEADER_NODES: &str = "// --- NODOS";
pub(crate) const HEADER_HUBS: &str = "// --- HUBS";
pub(crate) const HEADER_PACKAGES: &str = "// --- PAQUETES";
pub(crate) const HEADER_EDGES: &str = "// --- ARISTAS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Config,
    Nodes,
    Hubs,
    Packages,
    Edges,
}

#[derive(Debug, Default)]
struct Declared {
    nodes: Option<usize>,
    hubs: usize,
    packages: usize,
    capacity: i64,
    depot: usize,
}

/// Reads and parses a problem file.
pub fn read_problem(path: impl AsRef<Path>) -> Result<Problem> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_problem(&text)
}

/// Parses a problem from its text representation.
///
/// # Examples
///
/// ```
/// use hub_routing::io::parse_problem;
///
/// let text = "\
/// NODOS 3
/// HUBS 1
/// PAQUETES 1
/// CAPACIDAD_CAMION 1
/// DEPOSITO_ID 0
/// // --- NODOS (ID X Y) ---
/// 0 0 0
/// 1 1 0
/// 2 2 0
/// // --- HUBS (ID COSTO_ACTIVACION) ---
/// 1 0,50
/// // --- PAQUETES (ID NODO_ORIGEN NODO_DESTINO) ---
/// 0 0 2
/// // --- ARISTAS (NODO1 NODO2 PESO) ---
/// 0 1 1.0
/// 1 2 1.0
/// ";
/// let problem = parse_problem(text).unwrap();
/// assert_eq!(problem.hubs()[0].activation_cost(), 0.5);
/// assert_eq!(problem.distance(0, 2), 2.0);
/// ```
pub fn parse_problem(text: &str) -> Result<Problem> {
    let mut section = Section::Config;
    let mut declared = Declared::default();
    let mut nodes = Vec::new();
    let mut hubs = Vec::new();
    let mut packages = Vec::new();
    let mut edges: Option<DistanceMatrix> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(next) = section_header(trimmed) {
            section = next;
            continue;
        }

        let data = strip_comment(raw);
        if data.is_empty() {
            continue;
        }
        let fields: Vec<&str> = data.split_whitespace().collect();

        let parsed = match section {
            Section::Config => parse_config(&fields, &mut declared),
            Section::Nodes => {
                if nodes.len() < declared.nodes.unwrap_or(0) {
                    parse_node(&fields).map(|n| nodes.push(n))
                } else {
                    Ok(())
                }
            }
            Section::Hubs => {
                if hubs.len() < declared.hubs {
                    parse_hub(&fields).map(|h| hubs.push(h))
                } else {
                    Ok(())
                }
            }
            Section::Packages => {
                if packages.len() < declared.packages {
                    parse_package(&fields).map(|p| packages.push(p))
                } else {
                    Ok(())
                }
            }
            Section::Edges => {
                let size = declared
                    .nodes
                    .ok_or_else(|| Error::parse(line_no, "edges listed before NODOS"))?;
                let matrix = edges.get_or_insert_with(|| DistanceMatrix::new(size));
                parse_edge(&fields).map(|(u, v, w)| {
                    if u < size && v < size {
                        matrix.set(u, v, w);
                        matrix.set(v, u, w);
                    } else {
                        warn!("line {line_no}: edge {u} - {v} is outside {size} nodes, skipped");
                    }
                })
            }
        };

        if let Err(message) = parsed {
            warn!("line {line_no}: skipped malformed line '{}': {message}", raw.trim());
        }
    }

    let size = match declared.nodes {
        Some(n) if n > 0 => n,
        _ => return Err(Error::parse(0, "missing or zero NODOS declaration")),
    };

    check_count("nodes", size, nodes.len());
    check_count("hubs", declared.hubs, hubs.len());
    check_count("packages", declared.packages, packages.len());

    let edges = edges.unwrap_or_else(|| DistanceMatrix::new(size));
    Problem::new(nodes, hubs, packages, declared.capacity, declared.depot, edges)
}

fn section_header(line: &str) -> Option<Section> {
    if line.starts_with(HEADER_CONFIG) {
        Some(Section::Config)
    } else if line.starts_with(HEADER_NODES) {
        Some(Section::Nodes)
    } else if line.starts_with(HEADER_HUBS) {
        Some(Section::Hubs)
    } else if line.starts_with(HEADER_PACKAGES) {
        Some(Section::Packages)
    } else if line.starts_with(HEADER_EDGES) {
        Some(Section::Edges)
    } else {
        None
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}

fn check_count(what: &str, declared: usize, read: usize) {
    if declared != read {
        warn!("expected {declared} {what}, read {read}");
    }
}

fn field<T: FromStr>(fields: &[&str], idx: usize) -> std::result::Result<T, String> {
    let raw = fields
        .get(idx)
        .ok_or_else(|| format!("missing field {}", idx + 1))?;
    raw.parse()
        .map_err(|_| format!("invalid value '{raw}' in field {}", idx + 1))
}

/// Parses a decimal that may use a comma as separator.
fn decimal(fields: &[&str], idx: usize) -> std::result::Result<f64, String> {
    let raw = fields
        .get(idx)
        .ok_or_else(|| format!("missing field {}", idx + 1))?;
    raw.replace(',', ".")
        .parse()
        .map_err(|_| format!("invalid number '{raw}' in field {}", idx + 1))
}

fn parse_config(fields: &[&str], declared: &mut Declared) -> std::result::Result<(), String> {
    if fields.len() < 2 {
        return Ok(());
    }
    match fields[0] {
        KEY_NODES => declared.nodes = Some(field(fields, 1)?),
        KEY_HUBS => declared.hubs = field(fields, 1)?,
        KEY_PACKAGES => declared.packages = field(fields, 1)?,
        KEY_CAPACITY => declared.capacity = field(fields, 1)?,
        KEY_DEPOT => declared.depot = field(fields, 1)?,
        _ => {}
    }
    Ok(())
}

fn parse_node(fields: &[&str]) -> std::result::Result<Node, String> {
    Ok(Node::new(field(fields, 0)?, field(fields, 1)?, field(fields, 2)?))
}

fn parse_hub(fields: &[&str]) -> std::result::Result<Hub, String> {
    Ok(Hub::new(field(fields, 0)?, decimal(fields, 1)?))
}

fn parse_package(fields: &[&str]) -> std::result::Result<Package, String> {
    Ok(Package::new(
        field(fields, 0)?,
        field(fields, 1)?,
        field(fields, 2)?,
    ))
}

fn parse_edge(fields: &[&str]) -> std::result::Result<(usize, usize, f64), String> {
    Ok((field(fields, 0)?, field(fields, 1)?, decimal(fields, 2)?))
}
