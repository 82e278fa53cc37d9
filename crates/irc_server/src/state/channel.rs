use super::client::ClientId;
use std::collections::HashSet;

pub const MAX_CHANNEL_NAME_LEN: usize = 50;

/// A named multicast group. Membership lives here as a set of `ClientId`s;
/// the matching `Client::channels` set on the other side is the
/// bidirectional-membership invariant (§3/§8).
#[derive(Debug)]
pub struct Channel {
    pub name: String,
    pub topic: Option<String>,
    pub topic_setter: Option<(String, String)>,
    pub key: Option<String>,
    pub member_limit: Option<usize>,
    pub invite_only: bool,
    pub topic_restricted: bool,
    /// Insertion order preserved so broadcasts and NAMES replies are
    /// deterministic for a given channel state (§5).
    pub members: Vec<ClientId>,
    pub operators: HashSet<ClientId>,
    pub invited: HashSet<ClientId>,
    pub created_at: u64,
}

impl Channel {
    pub fn new(name: String, created_at: u64) -> Self {
        Channel {
            name,
            topic: None,
            topic_setter: None,
            key: None,
            member_limit: None,
            invite_only: false,
            topic_restricted: false,
            members: Vec::new(),
            operators: HashSet::new(),
            invited: HashSet::new(),
            created_at,
        }
    }

    pub fn is_member(&self, id: ClientId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_operator(&self, id: ClientId) -> bool {
        self.operators.contains(&id)
    }

    pub fn add_member(&mut self, id: ClientId) {
        if !self.is_member(id) {
            self.members.push(id);
        }
        self.invited.remove(&id);
    }

    pub fn remove_member(&mut self, id: ClientId) {
        self.members.retain(|m| *m != id);
        self.operators.remove(&id);
        self.invited.remove(&id);
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Channel names start with `#`, are at most 50 bytes, and contain no
/// space, comma, or bell character (§3).
pub fn is_valid_channel_name(name: &str) -> bool {
    name.starts_with('#')
        && name.len() <= MAX_CHANNEL_NAME_LEN
        && !name.contains(' ')
        && !name.contains(',')
        && !name.contains('\x07')
}
