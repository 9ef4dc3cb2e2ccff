use bevy::prelude::*;
use smallvec::SmallVec;

use super::{
    layout::{bounding_size, column, grid, row_centered, LayoutMetrics, LayoutMode},
    tree::{WidgetId, WidgetTree},
};
use crate::systems::motion::stagger_delay;

type ChildList = SmallVec<[WidgetId; 16]>;

/// Re-runs layout for `id` and every container below it, children first, then
/// stores the resulting bounds as the container's logical size.
pub fn reflow(tree: &mut WidgetTree, id: WidgetId, metrics: &LayoutMetrics) {
    let children: ChildList = tree.children(id).iter().copied().collect();
    for child in &children {
        if tree.get(*child).is_some_and(|node| node.kind.container().is_some()) {
            reflow(tree, *child, metrics);
        }
    }

    let Some(mut container) = tree.get(id).and_then(|node| node.kind.container().cloned()) else {
        return;
    };

    match container.layout {
        LayoutMode::Grid => {
            let range = container.page_range(children.len());
            for (index, child) in children.iter().enumerate() {
                tree.set_visible(*child, range.contains(&index));
            }
            let page = &children[range];
            let cell = page
                .first()
                .map_or(Vec2::ZERO, |first| tree.logical_size(*first) * metrics.cell_scale);
            let positions = grid(
                page.len(),
                cell,
                container.spacing,
                container.columns,
                metrics.invert_grid_x,
            );
            for (child, position) in page.iter().zip(positions) {
                tree.set_local_position(*child, position);
            }
        }
        LayoutMode::RowCentered | LayoutMode::ColumnDown | LayoutMode::ColumnUp => {
            let visible = visible_children(tree, &children);
            let sizes: Vec<Vec2> = visible.iter().map(|child| tree.logical_size(*child)).collect();
            let positions = match container.layout {
                LayoutMode::RowCentered => row_centered(&sizes, container.spacing),
                LayoutMode::ColumnUp => column(&sizes, container.spacing, false),
                _ => column(&sizes, container.spacing, true),
            };
            for (child, position) in visible.iter().zip(positions) {
                tree.set_local_position(*child, position);
            }
        }
        LayoutMode::Free => {}
    }

    let centered = tree
        .get(id)
        .and_then(|node| node.kind.panel())
        .is_some_and(|panel| panel.center_content);
    if let (true, Some(first)) = (centered, children.first()) {
        let half_height = tree.logical_size(*first).y / 2.0;
        tree.set_local_position(*first, Vec3::new(0.0, 0.0, half_height));
    }

    let size = bounding_size(visible_children(tree, &children).iter().filter_map(|child| {
        tree.get(*child)
            .map(|node| (node.local.translation, node.size()))
    }));

    if let Some(node) = tree.get_mut(id) {
        node.width = size.x;
        node.height = size.y;
        if let Some(state) = node.kind.container_mut() {
            *state = container;
        }
    }
}

/// Restarts the entrance animation on every visible interactive widget under
/// `root`, delayed by its position in that list.
pub fn stagger_entrance(tree: &mut WidgetTree, root: WidgetId) -> usize {
    let targets: Vec<WidgetId> = tree
        .descendants(root)
        .into_iter()
        .filter(|id| {
            tree.is_visible(*id) && tree.get(*id).is_some_and(|node| node.kind.is_interactive())
        })
        .collect();
    for (index, id) in targets.iter().enumerate() {
        if let Some(node) = tree.get_mut(*id) {
            node.animation.start(stagger_delay(index));
        }
    }
    targets.len()
}

fn visible_children(tree: &WidgetTree, children: &[WidgetId]) -> ChildList {
    children
        .iter()
        .copied()
        .filter(|child| tree.get(*child).is_some_and(|node| node.visible))
        .collect()
}
