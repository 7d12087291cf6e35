//! Faces and the dice they make up.
//!
//! The composition of a dice is fixed when it is built. Only which face
//! comes up varies at runtime, and the randomness is always injected by
//! the caller so seeded runs reproduce exactly.

use crate::error::RaceError;
use crate::piece::{Piece, SpecialEffect};
use crate::player::PlayerColor;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Number of faces on a standard die.
pub const STANDARD_FACES: usize = 6;

/// One rollable outcome: an ordered sequence of pieces.
///
/// Order matters. A turbo piece only affects movement pieces after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Face {
    pieces: Vec<Piece>,
}

impl Face {
    /// Creates a face from its pieces.
    pub fn new(pieces: Vec<Piece>) -> Self {
        Self { pieces }
    }

    /// A face with a single empty piece: "no effect this roll".
    pub fn blank() -> Self {
        Self::new(vec![Piece::Empty])
    }

    /// Pieces in resolution order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Number of pieces on the face.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// True if the face has no pieces at all.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// True if every piece is [`Piece::Empty`].
    pub fn is_blank(&self) -> bool {
        self.pieces.iter().all(|p| matches!(p, Piece::Empty))
    }
}

impl FromIterator<Piece> for Face {
    fn from_iter<I: IntoIterator<Item = Piece>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, piece) in self.pieces.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", piece)?;
        }
        write!(f, "]")
    }
}

/// An ordered, immutable set of faces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Face>", into = "Vec<Face>")]
pub struct Dice {
    faces: Vec<Face>,
}

impl Dice {
    /// Builds a dice, rejecting an empty face list or an empty face.
    #[instrument(skip(faces), fields(face_count = faces.len()))]
    pub fn new(faces: Vec<Face>) -> Result<Self, RaceError> {
        if faces.is_empty() {
            return Err(RaceError::Configuration(
                "dice must have at least one face".to_string(),
            ));
        }
        if let Some(index) = faces.iter().position(Face::is_empty) {
            return Err(RaceError::Configuration(format!(
                "face {} has no pieces",
                index
            )));
        }
        Ok(Self { faces })
    }

    /// Six-face dice for `entrants`: one face per entrant's color in
    /// rotation, plus a turbo face, an oil face and a pit face.
    #[instrument]
    pub fn standard(entrants: &[PlayerColor]) -> Result<Self, RaceError> {
        if entrants.is_empty() {
            return Err(RaceError::Configuration(
                "standard dice needs at least one entrant".to_string(),
            ));
        }
        let mover = |i: usize| Piece::Movement(entrants[i % entrants.len()]);
        let faces = vec![
            Face::new(vec![mover(0)]),
            Face::new(vec![mover(1), mover(2)]),
            Face::new(vec![mover(3)]),
            Face::new(vec![
                Piece::Special(SpecialEffect::Turbo),
                mover(0),
                mover(1),
            ]),
            Face::new(vec![Piece::Special(SpecialEffect::Oil)]),
            Face::new(vec![mover(2), Piece::Special(SpecialEffect::Pit)]),
        ];
        debug_assert_eq!(faces.len(), STANDARD_FACES);
        Self::new(faces)
    }

    /// Faces in index order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Always false; a dice is never built without faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Face at `index`, if any.
    pub fn face(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    /// Rolls the dice, drawing one face uniformly at random.
    ///
    /// Returns the face index together with the face.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, &Face) {
        let index = rng.random_range(0..self.faces.len());
        debug!(index, face = %self.faces[index], "Rolled dice");
        (index, &self.faces[index])
    }

    /// Checks that every movement piece names one of `entrants`.
    #[instrument(skip(self))]
    pub fn validate_players(&self, entrants: &[PlayerColor]) -> Result<(), RaceError> {
        for (index, face) in self.faces.iter().enumerate() {
            for piece in face.pieces() {
                if let Piece::Movement(player) = piece
                    && !entrants.contains(player)
                {
                    return Err(RaceError::MalformedFace(format!(
                        "face {} has a movement piece for unregistered player {}",
                        index, player
                    )));
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<Face>> for Dice {
    type Error = RaceError;

    fn try_from(faces: Vec<Face>) -> Result<Self, Self::Error> {
        Self::new(faces)
    }
}

impl From<Dice> for Vec<Face> {
    fn from(dice: Dice) -> Self {
        dice.faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_empty_dice_rejected() {
        assert!(matches!(
            Dice::new(Vec::new()),
            Err(RaceError::Configuration(_))
        ));
    }

    #[test]
    fn test_face_without_pieces_rejected() {
        let faces = vec![Face::blank(), Face::new(Vec::new())];
        assert!(matches!(Dice::new(faces), Err(RaceError::Configuration(_))));
    }

    #[test]
    fn test_roll_stays_within_face_set() {
        let dice = Dice::standard(&[PlayerColor::Red, PlayerColor::Blue]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let (index, face) = dice.roll(&mut rng);
            assert!(index < dice.len());
            assert!(dice.faces().contains(face));
            assert_eq!(dice.face(index), Some(face));
        }
    }

    #[test]
    fn test_seeded_rolls_repeat() {
        let dice = Dice::standard(&[PlayerColor::Green]).unwrap();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20).map(|_| dice.roll(&mut rng).0).collect::<Vec<_>>()
        };
        assert_eq!(draw(7), draw(7));
    }

    #[test]
    fn test_standard_dice_has_six_faces() {
        let dice = Dice::standard(&[PlayerColor::Red]).unwrap();
        assert_eq!(dice.len(), STANDARD_FACES);
        assert!(dice.validate_players(&[PlayerColor::Red]).is_ok());
    }

    #[test]
    fn test_unregistered_mover_is_malformed() {
        let dice = Dice::new(vec![Face::new(vec![
            Piece::Special(SpecialEffect::Turbo),
            Piece::Movement(PlayerColor::White),
        ])])
        .unwrap();
        assert!(matches!(
            dice.validate_players(&[PlayerColor::Red]),
            Err(RaceError::MalformedFace(_))
        ));
    }

    #[test]
    fn test_blank_face() {
        assert!(Face::blank().is_blank());
        assert!(!Face::new(vec![Piece::Movement(PlayerColor::Red)]).is_blank());
    }
}
