use crate::models::models::{Connections, User};

/// Adds `target_id` to the user's connections. Returns whether anything changed.
pub fn connect(user: &mut User, target_id: &str) -> bool {
    if target_id.is_empty() || target_id == user.id {
        return false;
    }

    let mut connections = Connections::of(user);
    let changed = connections.insert(target_id);
    if changed {
        user.connections = Some(connections.to_serialized());
    }
    changed
}

pub fn disconnect(user: &mut User, target_id: &str) -> bool {
    let mut connections = Connections::of(user);
    let changed = connections.remove(target_id);
    if changed {
        user.connections = Some(connections.to_serialized());
    }
    changed
}

/// Ids of the users whose connection list contains `user_id`.
pub fn followers_of(users: &[User], user_id: &str) -> Vec<String> {
    users
        .iter()
        .filter(|u| u.id != user_id && Connections::of(u).contains(user_id))
        .map(|u| u.id.clone())
        .collect()
}
