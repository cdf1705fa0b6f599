//! Turn-level values: plays, rolls and the record of an applied turn.
//!
//! A turn is a roll followed by a play:
//! - A `Roll` counts, for every dice colour in the active hand, how many
//!   dice landed on each face.
//! - A `CasinoId` is the play: the face whose whole group of dice moves to
//!   the casino with that index.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::EntityId;
use super::player::PlayerId;

/// Casino identifier, equal to the die face that sends dice there.
///
/// Casinos are numbered `0..num_casinos`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CasinoId(pub u8);

impl CasinoId {
    /// Create a new casino ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw casino index (also the die face).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all casinos of a board with `casino_count` casinos.
    pub fn all(casino_count: usize) -> impl Iterator<Item = CasinoId> {
        (0..casino_count as u8).map(CasinoId)
    }
}

impl std::fmt::Display for CasinoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Casino {}", self.0)
    }
}

/// Result of throwing every die left in a hand.
///
/// Stored as a colour-major count matrix: `count(colour, face)` is the
/// number of dice of `colour` showing `face`. Colours with no dice in
/// hand simply have an all-zero row.
///
/// ## Example
///
/// ```
/// use lasvegas::core::{CasinoId, EntityId, Roll};
///
/// // Two colours (a player and one extra pool), six faces.
/// let roll = Roll::empty(2, 6)
///     .with_dice(EntityId(0), CasinoId(3), 2)
///     .with_dice(EntityId(0), CasinoId(5), 1)
///     .with_dice(EntityId(1), CasinoId(3), 1);
///
/// assert_eq!(roll.face_total(CasinoId(3)), 3);
/// assert_eq!(roll.colour_total(EntityId(0)), 3);
/// assert_eq!(roll.faces_present().collect::<Vec<_>>(), vec![CasinoId(3), CasinoId(5)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roll {
    colours: u8,
    faces: u8,
    counts: SmallVec<[u32; 32]>,
}

impl Roll {
    /// A roll with no dice for the given board shape.
    #[must_use]
    pub fn empty(colour_count: usize, face_count: usize) -> Self {
        Self {
            colours: colour_count as u8,
            faces: face_count as u8,
            counts: SmallVec::from_elem(0, colour_count * face_count),
        }
    }

    /// Build a roll from per-colour lists of faces.
    ///
    /// Returns `None` if there are more lists than colours or a face is
    /// out of range.
    #[must_use]
    pub fn from_faces(colour_count: usize, face_count: usize, faces: &[Vec<usize>]) -> Option<Self> {
        if faces.len() > colour_count {
            return None;
        }
        let mut roll = Self::empty(colour_count, face_count);
        for (colour, dice) in faces.iter().enumerate() {
            for &face in dice {
                if face >= face_count {
                    return None;
                }
                roll.counts[colour * face_count + face] += 1;
            }
        }
        Some(roll)
    }

    /// Add `count` dice of `colour` showing `face`.
    #[must_use]
    pub fn with_dice(mut self, colour: EntityId, face: CasinoId, count: u32) -> Self {
        self.add(colour, face, count);
        self
    }

    /// Add `count` dice of `colour` showing `face`.
    ///
    /// Out-of-range colours or faces are ignored.
    pub fn add(&mut self, colour: EntityId, face: CasinoId, count: u32) {
        if let Some(slot) = self.slot(colour, face) {
            self.counts[slot] += count;
        }
    }

    fn slot(&self, colour: EntityId, face: CasinoId) -> Option<usize> {
        if colour.index() < self.colour_count() && face.index() < self.face_count() {
            Some(colour.index() * self.face_count() + face.index())
        } else {
            None
        }
    }

    /// Number of colours this roll is shaped for.
    #[must_use]
    pub fn colour_count(&self) -> usize {
        self.colours as usize
    }

    /// Number of faces (casinos) this roll is shaped for.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces as usize
    }

    /// Dice of `colour` showing `face`.
    #[must_use]
    pub fn count(&self, colour: EntityId, face: CasinoId) -> u32 {
        self.slot(colour, face).map_or(0, |slot| self.counts[slot])
    }

    /// Dice of `colour` thrown, all faces together.
    #[must_use]
    pub fn colour_total(&self, colour: EntityId) -> u32 {
        if colour.index() >= self.colour_count() {
            return 0;
        }
        let start = colour.index() * self.face_count();
        self.counts[start..start + self.face_count()].iter().sum()
    }

    /// Dice showing `face`, all colours together.
    #[must_use]
    pub fn face_total(&self, face: CasinoId) -> u32 {
        EntityId::all(self.colour_count())
            .map(|colour| self.count(colour, face))
            .sum()
    }

    /// Total dice in the roll.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Per-colour counts of the dice showing `face` (the group a play moves).
    #[must_use]
    pub fn group(&self, face: CasinoId) -> SmallVec<[u32; 8]> {
        EntityId::all(self.colour_count())
            .map(|colour| self.count(colour, face))
            .collect()
    }

    /// Faces with at least one die, in ascending order.
    pub fn faces_present(&self) -> impl Iterator<Item = CasinoId> + '_ {
        CasinoId::all(self.face_count()).filter(move |&face| self.face_total(face) > 0)
    }

    /// Split the dice showing `face` into the player's own colour and
    /// every other colour it carries.
    #[must_use]
    pub fn own_and_extra(&self, face: CasinoId, player: PlayerId) -> (u32, u32) {
        let own = self.count(EntityId::player(player), face);
        (own, self.face_total(face) - own)
    }

    /// Face-major counts, shaped `(face_count, colour_count)` like the board.
    #[must_use]
    pub fn by_face(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.counts.len());
        for face in CasinoId::all(self.face_count()) {
            out.extend(EntityId::all(self.colour_count()).map(|colour| self.count(colour, face)));
        }
        out
    }
}

/// Where the dice of a turn came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollSource {
    /// Thrown by the environment's own RNG.
    Fair,
    /// Provided by a rollicy (manual entry, loaded dice, scripts).
    Manual,
}

/// A single applied turn, kept in the environment history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Round the turn was played in (1-based).
    pub round: usize,

    /// Player who rolled and played.
    pub player: PlayerId,

    /// The roll, before the play.
    pub roll: Roll,

    /// Whether the environment or a rollicy produced the roll.
    pub source: RollSource,

    /// Chosen casino.
    pub play: CasinoId,

    /// Dice moved to the casino (all colours).
    pub moved: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_roll() -> Roll {
        Roll::empty(3, 6)
            .with_dice(EntityId(0), CasinoId(0), 2)
            .with_dice(EntityId(0), CasinoId(4), 3)
            .with_dice(EntityId(2), CasinoId(4), 1)
    }

    #[test]
    fn test_casino_id_basics() {
        assert_eq!(CasinoId::new(4).index(), 4);
        assert_eq!(format!("{}", CasinoId(2)), "Casino 2");
        assert_eq!(CasinoId::all(6).count(), 6);
    }

    #[test]
    fn test_roll_counts() {
        let roll = sample_roll();

        assert_eq!(roll.count(EntityId(0), CasinoId(4)), 3);
        assert_eq!(roll.count(EntityId(1), CasinoId(4)), 0);
        assert_eq!(roll.colour_total(EntityId(0)), 5);
        assert_eq!(roll.colour_total(EntityId(2)), 1);
        assert_eq!(roll.face_total(CasinoId(4)), 4);
        assert_eq!(roll.total(), 6);
    }

    #[test]
    fn test_roll_out_of_range_is_zero() {
        let roll = sample_roll();
        assert_eq!(roll.count(EntityId(9), CasinoId(0)), 0);
        assert_eq!(roll.count(EntityId(0), CasinoId(9)), 0);
        assert_eq!(roll.colour_total(EntityId(9)), 0);
    }

    #[test]
    fn test_roll_group() {
        let roll = sample_roll();
        assert_eq!(roll.group(CasinoId(4)).as_slice(), &[3, 0, 1]);
        assert_eq!(roll.group(CasinoId(1)).as_slice(), &[0, 0, 0]);
    }

    #[test]
    fn test_faces_present() {
        let roll = sample_roll();
        let faces: Vec<_> = roll.faces_present().collect();
        assert_eq!(faces, vec![CasinoId(0), CasinoId(4)]);
    }

    #[test]
    fn test_own_and_extra() {
        let roll = sample_roll();
        assert_eq!(roll.own_and_extra(CasinoId(4), PlayerId::new(0)), (3, 1));
        assert_eq!(roll.own_and_extra(CasinoId(0), PlayerId::new(0)), (2, 0));
    }

    #[test]
    fn test_from_faces() {
        let roll = Roll::from_faces(2, 6, &[vec![1, 1, 5], vec![2]]).unwrap();
        assert_eq!(roll.count(EntityId(0), CasinoId(1)), 2);
        assert_eq!(roll.count(EntityId(1), CasinoId(2)), 1);
        assert_eq!(roll.total(), 4);

        assert!(Roll::from_faces(2, 6, &[vec![6]]).is_none());
        assert!(Roll::from_faces(1, 6, &[vec![], vec![]]).is_none());
    }

    #[test]
    fn test_by_face_layout() {
        let roll = Roll::empty(2, 2)
            .with_dice(EntityId(0), CasinoId(1), 2)
            .with_dice(EntityId(1), CasinoId(0), 1);
        // rows = faces, columns = colours
        assert_eq!(roll.by_face(), vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_turn_record_serialization() {
        let record = TurnRecord {
            round: 2,
            player: PlayerId::new(1),
            roll: sample_roll(),
            source: RollSource::Fair,
            play: CasinoId(4),
            moved: 4,
        };
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: TurnRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
