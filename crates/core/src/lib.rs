mod assemble;
mod branch;
mod config;
mod connect;
mod curve;
mod graph;
mod placement;
mod rng;

pub use assemble::generate;
pub use branch::{clip_to_radius, grow_branch, normalize_to_radius};
pub use config::{ArborParams, ClusterParams, ConfigError, GraphParams, LatticeParams};
pub use connect::{all_pairs_within, closest_pairs_between, GroupLinks};
pub use curve::Curve;
pub use graph::{Branch, Connection, Graph, Node, NodeGroup, NodeRef, Sample};
pub use placement::{place_clustered, place_rejection, ClusteredSpec, RejectionSpec};
pub use rng::{seeded, RandomStream};
