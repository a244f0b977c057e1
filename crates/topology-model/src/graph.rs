use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Position pinned by the user in an editor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Constructor)]
pub struct UiPosition {
    pub x: f64,
    pub y: f64,
}

/// A node as described by the caller
///
/// The id is matched case-insensitively. The kind label is classified into a
/// [`NodeCategory`](crate::NodeCategory) by the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "S: Deserialize<'de> + Default")
)]
pub struct GraphNode<S = ()> {
    pub id: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiPosition>,
    #[serde(default)]
    pub semantics: S,
}

impl<S: Default> GraphNode<S> {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            ui: None,
            semantics: S::default(),
        }
    }
}

impl<S> GraphNode<S> {
    pub fn with_ui(mut self, x: f64, y: f64) -> Self {
        self.ui = Some(UiPosition::new(x, y));
        self
    }

    pub fn with_semantics<T>(self, semantics: T) -> GraphNode<T> {
        GraphNode {
            id: self.id,
            kind: self.kind,
            ui: self.ui,
            semantics,
        }
    }
}

/// A directed, weighted connection between two nodes
///
/// `from` and `to` may carry a `node:port` suffix, only the part before the
/// first colon names the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lag: Option<i32>,
}

fn default_weight() -> f64 {
    1.0
}

impl GraphEdge {
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            weight: default_weight(),
            edge_type: None,
            field: None,
            multiplier: None,
            lag: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Node id of the source, without port
    pub fn source_id(&self) -> &str {
        strip_port(&self.from)
    }

    /// Node id of the target, without port
    pub fn target_id(&self) -> &str {
        strip_port(&self.to)
    }
}

/// Drop the `:port` suffix of an edge endpoint
pub fn strip_port(endpoint: &str) -> &str {
    endpoint
        .split_once(':')
        .map_or(endpoint, |(node, _)| node)
        .trim()
}

/// The raw graph handed to the layout engine
///
/// Node order matters: the position of a node in `nodes` is its ordinal,
/// which breaks every tie during layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Default"))]
pub struct GraphDescription<S = ()> {
    #[serde(default)]
    pub nodes: Vec<GraphNode<S>>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl<S> Default for GraphDescription<S> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<S> GraphDescription<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: GraphNode<S>) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_edge(mut self, edge: GraphEdge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("svc"), "svc");
        assert_eq!(strip_port("svc:out"), "svc");
        assert_eq!(strip_port(" svc :in:extra"), "svc");
        assert_eq!(strip_port(":port"), "");
    }

    #[test]
    fn test_edge_endpoints() {
        let edge = GraphEdge::new("e1", "A:out", "b:in");
        assert_eq!(edge.source_id(), "A");
        assert_eq!(edge.target_id(), "b");
        assert_eq!(edge.weight, 1.0);
    }

    #[test]
    fn test_deserialize_description() {
        let json = r#"{
            "nodes": [
                {"id": "rate", "kind": "const", "semantics": {"value": 3}},
                {"id": "api", "kind": "service", "ui": {"x": 10.0, "y": 20.0}}
            ],
            "edges": [
                {"id": "e1", "from": "rate:out", "to": "api", "edgeType": "param", "lag": 2}
            ]
        }"#;

        let graph: GraphDescription<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].semantics["value"], 3);
        assert_eq!(graph.nodes[1].ui, Some(UiPosition::new(10.0, 20.0)));
        assert!(graph.nodes[1].semantics.is_null());

        let edge = &graph.edges[0];
        assert_eq!(edge.weight, 1.0);
        assert_eq!(edge.edge_type.as_deref(), Some("param"));
        assert_eq!(edge.lag, Some(2));
        assert_eq!(edge.multiplier, None);
    }

    #[test]
    fn test_builders() {
        let graph = GraphDescription::<()>::new()
            .with_node(GraphNode::new("a", "const").with_ui(1.0, 2.0))
            .with_edge(GraphEdge::new("e", "a", "b").with_weight(0.5));
        assert_eq!(graph.nodes[0].ui, Some(UiPosition::new(1.0, 2.0)));
        assert_eq!(graph.edges[0].weight, 0.5);

        let node = GraphNode::<()>::new("a", "expr").with_semantics("payload");
        assert_eq!(node.semantics, "payload");
    }
}
