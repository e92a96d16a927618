//! Cluster search - exploding and falling bubbles
//!
//! Adjacency is purely geometric: two bubbles are neighbours when their
//! centers are within the cluster contact threshold (a little over one
//! diameter, to absorb placement drift). Every search rebuilds its status
//! array from scratch over the current field indices.

use std::collections::VecDeque;

use glam::Vec2;

use super::field::BubbleField;

/// Per-bubble tag produced by a search pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterStatus {
    #[default]
    Idle,
    Exploding,
    Falling,
}

/// Flood fill from `start` through adjacent bubbles of the same color.
///
/// Returns the cluster's indices in ascending order, or nothing when the
/// cluster is smaller than `min_size`.
pub fn find_cluster(
    field: &BubbleField,
    start: usize,
    threshold: f32,
    min_size: usize,
) -> Vec<usize> {
    let bubbles = field.as_slice();
    let Some(seed) = bubbles.get(start) else {
        return Vec::new();
    };

    let threshold_sq = threshold * threshold;
    let mut status = vec![ClusterStatus::Idle; bubbles.len()];
    let mut queue = VecDeque::new();

    status[start] = ClusterStatus::Exploding;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let pos = bubbles[current].pos;
        for (index, bubble) in bubbles.iter().enumerate() {
            if status[index] == ClusterStatus::Idle
                && bubble.kind == seed.kind
                && bubble.pos.distance_squared(pos) <= threshold_sq
            {
                status[index] = ClusterStatus::Exploding;
                queue.push_back(index);
            }
        }
    }

    let cluster = marked(&status, ClusterStatus::Exploding);
    if cluster.len() < min_size {
        return Vec::new();
    }
    cluster
}

/// Every bubble within `radius` of `center`, regardless of color
pub fn find_blast(field: &BubbleField, center: Vec2, radius: f32) -> Vec<usize> {
    let radius_sq = radius * radius;
    field
        .iter()
        .enumerate()
        .filter(|(_, bubble)| bubble.pos.distance_squared(center) <= radius_sq)
        .map(|(index, _)| index)
        .collect()
}

/// Tag bubbles in connected components that do not reach `anchor_line`
///
/// The whole field is partitioned into components (color is ignored). A
/// component whose highest member is strictly below `anchor_line` has lost
/// its support and every member is tagged `Falling`. The result has one
/// entry per field index.
pub fn find_floating(
    field: &BubbleField,
    threshold: f32,
    anchor_line: f32,
) -> Vec<ClusterStatus> {
    let bubbles = field.as_slice();
    let threshold_sq = threshold * threshold;
    let mut status = vec![ClusterStatus::Idle; bubbles.len()];
    let mut labels: Vec<Option<u32>> = vec![None; bubbles.len()];
    let mut queue = VecDeque::new();
    let mut next_label = 0u32;

    for root in 0..bubbles.len() {
        if labels[root].is_some() {
            continue;
        }

        let label = next_label;
        next_label += 1;
        labels[root] = Some(label);
        queue.push_back(root);
        let mut members = vec![root];
        let mut max_y = bubbles[root].pos.y;

        while let Some(current) = queue.pop_front() {
            let pos = bubbles[current].pos;
            for (index, bubble) in bubbles.iter().enumerate() {
                if labels[index].is_none() && bubble.pos.distance_squared(pos) <= threshold_sq {
                    labels[index] = Some(label);
                    queue.push_back(index);
                    members.push(index);
                    max_y = max_y.max(bubble.pos.y);
                }
            }
        }

        if max_y < anchor_line {
            for index in members {
                status[index] = ClusterStatus::Falling;
            }
        }
    }

    status
}

fn marked(status: &[ClusterStatus], tag: ClusterStatus) -> Vec<usize> {
    status
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == tag)
        .map(|(index, _)| index)
        .collect()
}
