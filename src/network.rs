//! Social graph analysis
//!
//! Computes per-student network position and class-level structure from
//! peer-relationship edges. Edges are treated as undirected. Betweenness is
//! a two-hop path-share heuristic calibrated against the role and isolation
//! thresholds, not true betweenness centrality.

use crate::config::EngineConfig;
use crate::types::{
    ClassNetwork, ConflictPair, FriendCluster, IsolationRisk, NetworkMetrics, PeerRelationship,
    RelationshipType, SocialRole, StudentId,
};
use std::collections::{HashMap, HashSet};

/// Analyzer for one class worth of peer edges
pub struct SocialGraphAnalyzer;

/// Per-student metrics plus the class summary
#[derive(Debug, Clone)]
pub struct ClassAnalysis {
    pub metrics: Vec<NetworkMetrics>,
    pub network: ClassNetwork,
}

impl SocialGraphAnalyzer {
    /// Analyze a class roster against its peer edges.
    ///
    /// `roster` defines class size and guarantees students with no edges
    /// still get a row (as isolates).
    pub fn analyze(
        class_name: &str,
        roster: &[StudentId],
        edges: &[PeerRelationship],
        config: &EngineConfig,
    ) -> ClassAnalysis {
        let adjacency = non_conflict_adjacency(roster, edges);
        let class_size = roster.len();

        // Two-hop paths through a student: unordered pairs of its neighbors.
        let through: HashMap<StudentId, usize> = adjacency
            .iter()
            .map(|(id, peers)| (*id, peers.len() * peers.len().saturating_sub(1) / 2))
            .collect();
        let total_two_hop: usize = through.values().sum();

        let mut metrics: Vec<NetworkMetrics> = roster
            .iter()
            .map(|id| {
                let degree = adjacency.get(id).map_or(0, HashSet::len);
                let centrality = if class_size <= 1 {
                    0.0
                } else {
                    degree as f64 / (class_size - 1) as f64
                };
                let betweenness = if total_two_hop == 0 {
                    0.0
                } else {
                    through.get(id).copied().unwrap_or(0) as f64 / total_two_hop as f64
                };
                NetworkMetrics {
                    student_id: *id,
                    class_name: class_name.to_string(),
                    centrality,
                    betweenness,
                    degree,
                    isolation_risk: isolation_risk(degree, centrality, config),
                    social_role: social_role(degree, centrality, config),
                    influence_score: influence(centrality, betweenness),
                }
            })
            .collect();
        metrics.sort_by(|a, b| {
            b.influence_score
                .partial_cmp(&a.influence_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let isolated_students: Vec<StudentId> = metrics
            .iter()
            .filter(|m| m.degree == 0)
            .map(|m| m.student_id)
            .collect();

        let central_figures: Vec<StudentId> = metrics
            .iter()
            .filter(|m| matches!(m.social_role, SocialRole::Leader | SocialRole::Bridge))
            .take(config.network.central_figures)
            .map(|m| m.student_id)
            .collect();

        let network = ClassNetwork {
            class_name: class_name.to_string(),
            density: density(&adjacency, class_size),
            clusters: friend_clusters(roster, edges, config),
            isolated_students,
            central_figures,
            conflicts: conflicts(edges),
        };

        ClassAnalysis { metrics, network }
    }
}

/// Undirected adjacency over non-CONFLICT edges, covering the whole roster
fn non_conflict_adjacency(
    roster: &[StudentId],
    edges: &[PeerRelationship],
) -> HashMap<StudentId, HashSet<StudentId>> {
    let mut adjacency: HashMap<StudentId, HashSet<StudentId>> =
        roster.iter().map(|id| (*id, HashSet::new())).collect();
    for edge in edges {
        if edge.relationship == RelationshipType::Conflict || edge.student_id == edge.peer_id {
            continue;
        }
        adjacency.entry(edge.student_id).or_default().insert(edge.peer_id);
        adjacency.entry(edge.peer_id).or_default().insert(edge.student_id);
    }
    adjacency
}

/// Non-conflict edge count over possible undirected pairs
fn density(adjacency: &HashMap<StudentId, HashSet<StudentId>>, class_size: usize) -> f64 {
    if class_size <= 1 {
        return 0.0;
    }
    let edge_count: usize = adjacency.values().map(HashSet::len).sum::<usize>() / 2;
    let possible = class_size * (class_size - 1) / 2;
    edge_count as f64 / possible as f64
}

/// 0 connections is CRITICAL regardless of class size; otherwise the
/// connection ratio is bucketed
fn isolation_risk(degree: usize, centrality: f64, config: &EngineConfig) -> IsolationRisk {
    if degree == 0 {
        IsolationRisk::Critical
    } else if centrality < config.network.isolation_high {
        IsolationRisk::High
    } else if centrality < config.network.isolation_medium {
        IsolationRisk::Medium
    } else {
        IsolationRisk::Low
    }
}

fn social_role(degree: usize, centrality: f64, config: &EngineConfig) -> SocialRole {
    if degree == 0 {
        SocialRole::Isolate
    } else if centrality > config.network.leader_centrality {
        SocialRole::Leader
    } else if centrality > config.network.bridge_centrality {
        SocialRole::Bridge
    } else if centrality > config.network.follower_centrality {
        SocialRole::Follower
    } else {
        SocialRole::Peripheral
    }
}

/// Influence blends connectedness with path position
fn influence(centrality: f64, betweenness: f64) -> f64 {
    0.6 * centrality + 0.4 * betweenness
}

/// Connected components over strong FRIEND/CLOSE_FRIEND edges.
///
/// Cohesion uses the ordered-pair denominator `size x (size - 1)` with the
/// undirected internal edge count, and is defined as 0 for singletons.
fn friend_clusters(
    roster: &[StudentId],
    edges: &[PeerRelationship],
    config: &EngineConfig,
) -> Vec<FriendCluster> {
    let strong: Vec<&PeerRelationship> = edges
        .iter()
        .filter(|e| {
            matches!(
                e.relationship,
                RelationshipType::Friend | RelationshipType::CloseFriend
            ) && e.strength >= config.network.cluster_min_strength
                && e.student_id != e.peer_id
        })
        .collect();

    let mut adjacency: HashMap<StudentId, HashSet<StudentId>> = HashMap::new();
    for edge in &strong {
        adjacency.entry(edge.student_id).or_default().insert(edge.peer_id);
        adjacency.entry(edge.peer_id).or_default().insert(edge.student_id);
    }

    let mut visited: HashSet<StudentId> = HashSet::new();
    let mut clusters = Vec::new();

    for id in roster {
        if visited.contains(id) || !adjacency.contains_key(id) {
            continue;
        }

        // Plain stack traversal over the strong-edge subgraph.
        let mut members = Vec::new();
        let mut stack = vec![*id];
        visited.insert(*id);
        while let Some(current) = stack.pop() {
            members.push(current);
            if let Some(peers) = adjacency.get(&current) {
                for peer in peers {
                    if visited.insert(*peer) {
                        stack.push(*peer);
                    }
                }
            }
        }

        let member_set: HashSet<StudentId> = members.iter().copied().collect();
        let internal_edges = strong
            .iter()
            .filter(|e| member_set.contains(&e.student_id) && member_set.contains(&e.peer_id))
            .count();
        let size = members.len();
        let cohesion = if size <= 1 {
            0.0
        } else {
            internal_edges as f64 / (size * (size - 1)) as f64
        };

        members.sort();
        clusters.push(FriendCluster { members, cohesion });
    }

    clusters
}

/// All CONFLICT edges, strongest first
fn conflicts(edges: &[PeerRelationship]) -> Vec<ConflictPair> {
    let mut pairs: Vec<ConflictPair> = edges
        .iter()
        .filter(|e| e.relationship == RelationshipType::Conflict)
        .map(|e| ConflictPair {
            student_a: e.student_id,
            student_b: e.peer_id,
            strength: e.strength,
        })
        .collect();
    pairs.sort_by(|a, b| {
        b.strength
            .partial_cmp(&a.strength)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pairs
}
