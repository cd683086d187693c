//! Graph edges and journey legs.

use super::{Minutes, RouteCode, Station};

/// A directed adjacency entry in the network graph.
///
/// Every edge belongs to the adjacency list of the station it leaves from,
/// so only the far end is stored. The loader always inserts edges in pairs
/// (u→v and v→u) carrying identical metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Station this edge leads to
    pub to: Station,
    /// Route code of the service that introduced this adjacency
    pub route: RouteCode,
    /// Operating company
    pub operator: String,
    /// Service class (e.g. "Express", "Stopper")
    pub service_type: String,
    /// Travel time along this segment
    pub time: Minutes,
    /// Origin label of the whole route, if known
    pub route_origin: Option<Station>,
    /// Destination label of the whole route, if known
    pub route_destination: Option<Station>,
}

impl Edge {
    /// Returns the same edge pointing back to `from`.
    pub fn reversed(&self, from: Station) -> Edge {
        Edge {
            to: from,
            ..self.clone()
        }
    }
}

/// One traversed edge within a journey.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Boarding station
    pub from: Station,
    /// Alighting station
    pub to: Station,
    /// Route code ridden on this leg
    pub route: RouteCode,
    /// Operating company
    pub operator: String,
    /// Service class
    pub service_type: String,
    /// Travel time of this leg
    pub time: Minutes,
}

impl Leg {
    /// Creates the leg that follows `edge` out of `from`.
    pub fn along(from: &Station, edge: &Edge) -> Self {
        Self {
            from: from.clone(),
            to: edge.to.clone(),
            route: edge.route.clone(),
            operator: edge.operator.clone(),
            service_type: edge.service_type.clone(),
            time: edge.time,
        }
    }
}
