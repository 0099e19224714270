//! The meeting-room directory.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// A bookable room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRoom {
    /// Stable identifier.
    pub id: String,
    /// Display name; unique case-insensitively within the directory.
    pub name: String,
    /// Seats, when declared. Undeclared capacity is treated as unbounded
    /// by the resolver's capacity filter.
    pub capacity: Option<u32>,
    /// Physical location, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl MeetingRoom {
    /// Create a room with a fresh id.
    pub fn new(name: impl Into<String>, capacity: Option<u32>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            capacity,
            location: None,
        }
    }
}

/// Thread-safe room store.
///
/// A fixed seed set exists by default; rooms named in requests but not yet
/// known are created lazily on first reference. A room's stored capacity is
/// only ever raised, never lowered.
pub struct RoomDirectory {
    rooms: RwLock<Vec<MeetingRoom>>,
}

impl RoomDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(Vec::new()),
        }
    }

    /// Create a directory with the default seed rooms.
    pub fn with_default_rooms() -> Self {
        Self {
            rooms: RwLock::new(vec![
                MeetingRoom::new("Meeting room A", Some(4)),
                MeetingRoom::new("Meeting room B", Some(8)),
                MeetingRoom::new("Meeting room C", Some(12)),
            ]),
        }
    }

    /// Add a room.
    pub async fn insert(&self, room: MeetingRoom) {
        self.rooms.write().await.push(room);
    }

    /// Number of known rooms.
    pub async fn len(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Whether the directory is empty.
    pub async fn is_empty(&self) -> bool {
        self.rooms.read().await.is_empty()
    }

    /// Look up a room by name, case-insensitively.
    pub async fn find_by_name(&self, name: &str) -> Option<MeetingRoom> {
        let wanted = name.trim().to_lowercase();
        self.rooms
            .read()
            .await
            .iter()
            .find(|room| room.name.to_lowercase() == wanted)
            .cloned()
    }

    /// Resolve a room by name, creating it ad hoc when unknown.
    ///
    /// When the request needs more seats than the room declares, the stored
    /// capacity is raised to match; it is never lowered.
    pub async fn resolve_or_create(&self, name: &str, needed: Option<u32>) -> MeetingRoom {
        let wanted = name.trim().to_lowercase();
        let mut rooms = self.rooms.write().await;

        if let Some(room) = rooms
            .iter_mut()
            .find(|room| room.name.to_lowercase() == wanted)
        {
            if let Some(needed) = needed {
                if room.capacity.map_or(true, |current| current < needed) {
                    debug!(
                        room = %room.name,
                        from = ?room.capacity,
                        to = needed,
                        "raising room capacity"
                    );
                    room.capacity = Some(needed);
                }
            }
            return room.clone();
        }

        let room = MeetingRoom::new(capitalize(name.trim()), needed);
        info!(room = %room.name, capacity = ?room.capacity, "created ad hoc room");
        rooms.push(room.clone());
        room
    }

    /// All rooms in ascending capacity order (undeclared capacity sorts
    /// last), filtered to those satisfying `needed` and excluding the given
    /// room id.
    pub async fn candidates_by_capacity(
        &self,
        needed: Option<u32>,
        exclude_id: Option<&str>,
    ) -> Vec<MeetingRoom> {
        let mut candidates: Vec<MeetingRoom> = self
            .rooms
            .read()
            .await
            .iter()
            .filter(|room| exclude_id != Some(room.id.as_str()))
            .filter(|room| match (needed, room.capacity) {
                (Some(needed), Some(capacity)) => capacity >= needed,
                // Undeclared capacity cannot be proven too small.
                _ => true,
            })
            .cloned()
            .collect();

        candidates.sort_by_key(|room| room.capacity.unwrap_or(u32::MAX));
        candidates
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_rooms_exist() {
        let directory = RoomDirectory::with_default_rooms();
        assert_eq!(directory.len().await, 3);
        assert!(directory.find_by_name("meeting room b").await.is_some());
    }

    #[tokio::test]
    async fn test_resolve_is_case_insensitive() {
        let directory = RoomDirectory::with_default_rooms();
        let room = directory.resolve_or_create("MEETING ROOM B", None).await;
        assert_eq!(room.name, "Meeting room B");
        assert_eq!(directory.len().await, 3);
    }

    #[tokio::test]
    async fn test_ad_hoc_creation() {
        let directory = RoomDirectory::with_default_rooms();
        let room = directory.resolve_or_create("fishbowl", Some(2)).await;
        assert_eq!(room.name, "Fishbowl");
        assert_eq!(room.capacity, Some(2));
        assert_eq!(directory.len().await, 4);

        // Second reference resolves instead of duplicating.
        let again = directory.resolve_or_create("Fishbowl", None).await;
        assert_eq!(again.id, room.id);
        assert_eq!(directory.len().await, 4);
    }

    #[tokio::test]
    async fn test_capacity_raised_never_lowered() {
        let directory = RoomDirectory::with_default_rooms();

        let room = directory.resolve_or_create("Meeting room A", Some(10)).await;
        assert_eq!(room.capacity, Some(10));

        let room = directory.resolve_or_create("Meeting room A", Some(3)).await;
        assert_eq!(room.capacity, Some(10));
    }

    #[tokio::test]
    async fn test_candidates_sorted_and_filtered() {
        let directory = RoomDirectory::new();
        directory.insert(MeetingRoom::new("Big", Some(10))).await;
        directory.insert(MeetingRoom::new("Small", Some(4))).await;
        directory.insert(MeetingRoom::new("Unknown", None)).await;

        let candidates = directory.candidates_by_capacity(Some(4), None).await;
        let names: Vec<&str> = candidates.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Small", "Big", "Unknown"]);

        let candidates = directory.candidates_by_capacity(Some(6), None).await;
        let names: Vec<&str> = candidates.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Big", "Unknown"]);
    }

    #[tokio::test]
    async fn test_candidates_exclude() {
        let directory = RoomDirectory::new();
        directory.insert(MeetingRoom::new("Only", Some(4))).await;
        let only = directory.find_by_name("Only").await.unwrap();

        let candidates = directory
            .candidates_by_capacity(None, Some(only.id.as_str()))
            .await;
        assert!(candidates.is_empty());
    }
}
