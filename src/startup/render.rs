use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use super::hands::MenuHand;
use crate::systems::ui::{menu::VrMenu, tree::WidgetId};

/// Scene-graph stand-in for one widget. Renderers key meshes and labels off it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[require(Transform)]
pub struct WidgetProxy {
    pub id: WidgetId,
    /// Effective visibility, ancestors included.
    pub visible: bool,
}

/// Widget to proxy entity lookup.
#[derive(Resource, Debug, Default)]
pub struct ProxyIndex(HashMap<WidgetId, Entity>);

impl ProxyIndex {
    pub fn entity(&self, id: WidgetId) -> Option<Entity> {
        self.0.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Mirrors every widget under a registered panel onto a proxy entity: local
/// transform, visibility and parent. Attached panels are parented to the
/// [`MenuHand`]. Proxies of widgets that are gone or no longer under a panel are
/// despawned.
pub fn sync_widget_proxies(
    mut commands: Commands,
    menu: Res<VrMenu>,
    mut index: ResMut<ProxyIndex>,
    mut proxies: Query<(&mut WidgetProxy, &mut Transform, Option<&ChildOf>)>,
    menu_hand: Query<Entity, With<MenuHand>>,
) {
    let tree = menu.tree();
    let hand = menu_hand.single().ok();

    let mut live = HashSet::new();
    for panel in menu.panels() {
        let attached = menu
            .panel_state(*panel)
            .is_some_and(|state| state.is_attached());

        for id in tree.descendants(*panel) {
            let Some(node) = tree.get(id) else {
                continue;
            };
            live.insert(id);

            let transform = node.effective_local().to_transform();
            let visible = tree.is_visible(id);
            let parent = match tree.parent(id) {
                Some(parent) => index.entity(parent),
                None if attached => hand,
                None => None,
            };

            let Some(entity) = index.entity(id) else {
                let mut proxy = commands.spawn((
                    Name::new(node.name.clone()),
                    WidgetProxy { id, visible },
                    transform,
                ));
                if let Some(parent) = parent {
                    proxy.insert(ChildOf(parent));
                }
                index.0.insert(id, proxy.id());
                continue;
            };

            let Ok((mut proxy, mut current, child_of)) = proxies.get_mut(entity) else {
                continue;
            };
            proxy.set_if_neq(WidgetProxy { id, visible });
            current.set_if_neq(transform);
            if child_of.map(ChildOf::parent) != parent {
                match parent {
                    Some(parent) => {
                        commands.entity(entity).insert(ChildOf(parent));
                    }
                    None => {
                        commands.entity(entity).remove::<ChildOf>();
                    }
                }
            }
        }
    }

    index.0.retain(|id, entity| {
        if live.contains(id) {
            return true;
        }
        if let Ok(mut stale) = commands.get_entity(*entity) {
            stale.try_despawn();
        }
        false
    });
}
