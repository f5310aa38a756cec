use super::axis::Axis;
use super::cell::SimulationCell;
use nalgebra::Point3;
use std::fmt;

/// A single snapshot of particle positions together with its simulation cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub timestep: Option<u64>,
    pub cell: SimulationCell,
    pub positions: Vec<Point3<f64>>,
    /// Per-particle species names, when the source provides them.
    pub species: Option<Vec<String>>,
}

impl Frame {
    pub fn new(index: usize, cell: SimulationCell, positions: Vec<Point3<f64>>) -> Self {
        Self {
            index,
            timestep: None,
            cell,
            positions,
            species: None,
        }
    }

    pub fn with_species(mut self, species: Vec<String>) -> Self {
        self.species = Some(species);
        self
    }

    pub fn num_particles(&self) -> usize {
        self.positions.len()
    }

    /// Coordinates of every particle along one axis.
    pub fn coordinates(&self, axis: Axis) -> impl Iterator<Item = f64> + '_ {
        let i = axis.index();
        self.positions.iter().map(move |p| p[i])
    }

    pub fn has_species(&self, name: &str) -> bool {
        self.species
            .as_ref()
            .is_some_and(|species| species.iter().any(|s| s == name))
    }
}

/// Predicate restricting the particles of every frame read through a
/// [`FilteredSource`](crate::core::io::source::FilteredSource).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParticleFilter {
    #[default]
    All,
    /// Keep only particles whose species matches exactly.
    Species(String),
}

impl ParticleFilter {
    /// Parses a selection string where `"None"` means no filtering.
    pub fn from_selection(selection: &str) -> Self {
        match selection {
            "None" | "" => ParticleFilter::All,
            name => ParticleFilter::Species(name.to_string()),
        }
    }

    pub fn matches(&self, species: &str) -> bool {
        match self {
            ParticleFilter::All => true,
            ParticleFilter::Species(name) => name == species,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ParticleFilter::All)
    }
}

impl fmt::Display for ParticleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticleFilter::All => write!(f, "all particles"),
            ParticleFilter::Species(name) => write!(f, "species '{}'", name),
        }
    }
}
