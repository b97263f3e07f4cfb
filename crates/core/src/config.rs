use std::fmt;

use serde::{Deserialize, Serialize};

/// The only error that crosses the engine boundary: parameters that would
/// produce meaningless geometry. Degenerate geometry, placement exhaustion
/// and invalid branches are all recovered internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    NonFinite { field: &'static str },
    Negative { field: &'static str },
    OutOfRange { field: &'static str },
    ResolutionTooLow { field: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { field } => write!(f, "parameter {field} must be finite"),
            ConfigError::Negative { field } => write!(f, "parameter {field} must be non-negative"),
            ConfigError::OutOfRange { field } => {
                write!(f, "parameter {field} must lie within [0, 1]")
            }
            ConfigError::ResolutionTooLow { field } => {
                write!(f, "parameter {field} must be at least 2")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn check_non_negative(value: f32, field: &'static str) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field });
    }
    Ok(())
}

fn check_unit_interval(value: f32, field: &'static str) -> Result<(), ConfigError> {
    check_non_negative(value, field)?;
    if value > 1.0 {
        return Err(ConfigError::OutOfRange { field });
    }
    Ok(())
}

fn check_resolution(value: u32, field: &'static str) -> Result<(), ConfigError> {
    if value < 2 {
        return Err(ConfigError::ResolutionTooLow { field });
    }
    Ok(())
}

/// Generation parameters, one variant per visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum GraphParams {
    Cluster(ClusterParams),
    Lattice(LatticeParams),
    Arbor(ArborParams),
}

impl GraphParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            GraphParams::Cluster(params) => params.validate(),
            GraphParams::Lattice(params) => params.validate(),
            GraphParams::Arbor(params) => params.validate(),
        }
    }
}

/// Groups of nodes clustered around scattered centers, dendrite branches per
/// node, closest-pair connections between groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterParams {
    pub cluster_count: u32,
    pub nodes_per_cluster: u32,
    pub cluster_spread: f32,
    pub node_spread: f32,
    pub base_scale: f32,
    pub branches_per_node: u32,
    pub branch_segments: u32,
    pub branch_step: f32,
    pub branch_curvature: f32,
    pub curve_resolution: u32,
    pub max_connection_distance: f32,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            cluster_count: 6,
            nodes_per_cluster: 24,
            cluster_spread: 40.0,
            node_spread: 6.0,
            base_scale: 1.0,
            branches_per_node: 3,
            branch_segments: 6,
            branch_step: 1.2,
            branch_curvature: 0.8,
            curve_resolution: 24,
            max_connection_distance: 30.0,
        }
    }
}

impl ClusterParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative(self.cluster_spread, "cluster_spread")?;
        check_non_negative(self.node_spread, "node_spread")?;
        check_non_negative(self.base_scale, "base_scale")?;
        check_non_negative(self.branch_step, "branch_step")?;
        check_non_negative(self.branch_curvature, "branch_curvature")?;
        check_non_negative(self.max_connection_distance, "max_connection_distance")?;
        check_resolution(self.curve_resolution, "curve_resolution")
    }
}

/// One group on a jittered grid with minimum separation, all-pairs
/// connections, no branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeParams {
    pub count: u32,
    pub separation: f32,
    pub max_connection_distance: f32,
}

impl Default for LatticeParams {
    fn default() -> Self {
        Self {
            count: 64,
            separation: 4.0,
            max_connection_distance: 6.0,
        }
    }
}

impl LatticeParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative(self.separation, "separation")?;
        check_non_negative(self.max_connection_distance, "max_connection_distance")
    }
}

/// Branching structure: primaries from a common origin normalized to
/// `main_radius`, secondaries spawned along them and clipped at `max_radius`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArborParams {
    pub main_branch_count: u32,
    pub segments: u32,
    pub step_length: f32,
    pub curvature: f32,
    pub main_radius: f32,
    pub sub_branch_count: u32,
    pub sub_segments: u32,
    pub sub_step_length: f32,
    pub sub_curvature: f32,
    /// 0 follows the parent tangent exactly, 1 leaves fully perpendicular.
    pub sub_branch_offset: f32,
    pub max_radius: f32,
    pub curve_resolution: u32,
}

impl Default for ArborParams {
    fn default() -> Self {
        Self {
            main_branch_count: 12,
            segments: 10,
            step_length: 2.0,
            curvature: 0.6,
            main_radius: 18.0,
            sub_branch_count: 4,
            sub_segments: 6,
            sub_step_length: 1.2,
            sub_curvature: 0.9,
            sub_branch_offset: 0.6,
            max_radius: 22.0,
            curve_resolution: 32,
        }
    }
}

impl ArborParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative(self.step_length, "step_length")?;
        check_non_negative(self.curvature, "curvature")?;
        check_non_negative(self.main_radius, "main_radius")?;
        check_non_negative(self.sub_step_length, "sub_step_length")?;
        check_non_negative(self.sub_curvature, "sub_curvature")?;
        check_unit_interval(self.sub_branch_offset, "sub_branch_offset")?;
        check_non_negative(self.max_radius, "max_radius")?;
        check_resolution(self.curve_resolution, "curve_resolution")
    }
}
