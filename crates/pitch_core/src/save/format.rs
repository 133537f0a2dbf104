use super::error::SaveError;
use super::SAVE_VERSION;
use crate::engine::clock::GameClock;
use crate::engine::planner::PlanConfig;
use crate::models::{GoalEvent, PitchCoord, Player, SubstitutionEvent};
use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

/// Durable pitch-board state. One blob per linked event; last writer wins,
/// there is no merge.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BoardSave {
    /// Save format version for migration.
    pub version: u32,

    /// Last update time (unix milliseconds).
    pub last_update_time: u64,

    pub players: Vec<Player>,
    pub team_size: usize,
    pub selected_formation_index: usize,

    #[serde(default)]
    pub ball_position: Option<PitchCoord>,

    /// Remaining and consumed rotation events.
    #[serde(default)]
    pub auto_sub_plan: Vec<SubstitutionEvent>,
    #[serde(default)]
    pub auto_sub_active: bool,
    #[serde(default)]
    pub auto_sub_paused: bool,
    #[serde(default)]
    pub plan_config: Option<PlanConfig>,

    #[serde(default)]
    pub mock_mode: bool,

    /// Calendar event this board belongs to, if any.
    #[serde(default)]
    pub linked_event_id: Option<String>,

    #[serde(default)]
    pub goals: Vec<GoalEvent>,

    pub clock: GameClock,

    /// Last accounted total elapsed seconds across the match, used for
    /// minute crediting after a suspension.
    #[serde(default)]
    pub last_timer_seconds: u32,
}

impl BoardSave {
    pub fn validate(&self) -> Result<(), SaveError> {
        if self.players.len() > 200 {
            return Err(SaveError::Corrupted);
        }
        let mut ids = std::collections::HashSet::new();
        for player in &self.players {
            if !ids.insert(&player.id) {
                return Err(SaveError::Corrupted);
            }
        }
        Ok(())
    }
}

/// Serialize and compress board state: MessagePack with field names, LZ4
/// with prepended size, trailing SHA-256 checksum.
pub fn serialize_and_compress(save: &BoardSave) -> Result<Vec<u8>, SaveError> {
    save.validate()?;

    let msgpack = to_vec_named(save).map_err(SaveError::Serialization)?;
    let compressed = compress_prepend_size(&msgpack);

    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);
    Ok(result)
}

/// Verify, decompress and deserialize a board blob.
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<BoardSave, SaveError> {
    // Minimum: size header + checksum.
    if bytes.len() < 4 + 32 {
        return Err(SaveError::Corrupted);
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    if &hasher.finalize()[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;
    let save: BoardSave = from_slice(&msgpack).map_err(SaveError::Deserialization)?;

    if save.version > SAVE_VERSION {
        return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
    }
    Ok(save)
}

pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_save() -> BoardSave {
        BoardSave {
            version: SAVE_VERSION,
            last_update_time: current_timestamp(),
            players: vec![Player::new("p1", "Ada", 7), Player::new("p2", "Grace", 9)],
            team_size: 7,
            selected_formation_index: 0,
            ball_position: None,
            auto_sub_plan: Vec::new(),
            auto_sub_active: false,
            auto_sub_paused: false,
            plan_config: Some(PlanConfig::default()),
            mock_mode: false,
            linked_event_id: Some("event-42".into()),
            goals: Vec::new(),
            clock: GameClock::new(25),
            last_timer_seconds: 0,
        }
    }

    #[test]
    fn roundtrip() {
        let save = sample_save();
        let bytes = serialize_and_compress(&save).unwrap();
        let loaded = decompress_and_deserialize(&bytes).unwrap();
        assert_eq!(save, loaded);
    }

    #[test]
    fn checksum_validation() {
        let mut bytes = serialize_and_compress(&sample_save()).unwrap();
        if let Some(last) = bytes.last_mut() {
            *last = last.wrapping_add(1);
        }
        assert!(matches!(
            decompress_and_deserialize(&bytes),
            Err(SaveError::ChecksumMismatch)
        ));
    }

    #[test]
    fn truncated_blob_is_corrupted() {
        assert!(matches!(decompress_and_deserialize(&[0u8; 10]), Err(SaveError::Corrupted)));
    }

    #[test]
    fn duplicate_player_ids_fail_validation() {
        let mut save = sample_save();
        save.players.push(Player::new("p1", "Dup", 11));
        assert!(matches!(save.validate(), Err(SaveError::Corrupted)));
    }

    #[test]
    fn newer_version_is_rejected() {
        let mut save = sample_save();
        save.version = SAVE_VERSION + 1;
        let msgpack = to_vec_named(&save).unwrap();
        let compressed = compress_prepend_size(&msgpack);
        let mut hasher = Sha256::new();
        hasher.update(&compressed);
        let checksum = hasher.finalize();
        let mut bytes = compressed;
        bytes.extend_from_slice(&checksum);

        assert!(matches!(
            decompress_and_deserialize(&bytes),
            Err(SaveError::VersionMismatch { .. })
        ));
    }
}
