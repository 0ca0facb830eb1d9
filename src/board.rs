//! The action board: occupancy tracking for action spaces.
//!
//! Spaces are defined by the catalog; the board tracks which player occupies
//! which space during the current round. Occupancy is the board's only
//! mutable state and is cleared at every round boundary.

use crate::catalog::Catalog;
use crate::color::{Color, ColorSet};
use crate::ids::{PlayerId, SpaceId};

/// Errors from attempting to occupy an action space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Another worker already sits on the space this round.
    AlreadyOccupied { space: SpaceId },
    /// The space's round requirement exceeds the current round.
    NotAvailable { space: SpaceId, round: u8 },
    /// No such space in the catalog.
    UnknownSpace(SpaceId),
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::AlreadyOccupied { space } => {
                write!(f, "Space {} is already occupied", space.raw())
            }
            PlacementError::NotAvailable { space, round } => {
                write!(f, "Space {} is not available in round {}", space.raw(), round)
            }
            PlacementError::UnknownSpace(space) => {
                write!(f, "Unknown action space {}", space.raw())
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Runtime state of one action space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpace {
    pub id: SpaceId,
    pub color: Color,
    pub min_round: u8,
    pub occupant: Option<PlayerId>,
}

impl ActionSpace {
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn available_in(&self, round: u8) -> bool {
        round >= self.min_round
    }
}

/// The full action board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    spaces: Vec<ActionSpace>,
}

impl Board {
    /// Build the board from the catalog's action definitions.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            spaces: catalog
                .actions()
                .iter()
                .map(|def| ActionSpace {
                    id: def.id,
                    color: def.color,
                    min_round: def.min_round,
                    occupant: None,
                })
                .collect(),
        }
    }

    /// All spaces, in board order.
    pub fn spaces(&self) -> &[ActionSpace] {
        &self.spaces
    }

    pub fn space(&self, id: SpaceId) -> Option<&ActionSpace> {
        self.spaces.iter().find(|s| s.id == id)
    }

    pub fn occupant(&self, id: SpaceId) -> Option<PlayerId> {
        self.space(id).and_then(|s| s.occupant)
    }

    /// Place a worker on a space.
    pub fn occupy(
        &mut self,
        id: SpaceId,
        player: PlayerId,
        round: u8,
    ) -> Result<(), PlacementError> {
        let space = self
            .spaces
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(PlacementError::UnknownSpace(id))?;
        if !space.available_in(round) {
            return Err(PlacementError::NotAvailable { space: id, round });
        }
        if space.occupant.is_some() {
            return Err(PlacementError::AlreadyOccupied { space: id });
        }
        space.occupant = Some(player);
        Ok(())
    }

    /// Free a space, returning its previous occupant.
    pub fn release(&mut self, id: SpaceId) -> Option<PlayerId> {
        self.spaces
            .iter_mut()
            .find(|s| s.id == id)
            .and_then(|s| s.occupant.take())
    }

    /// Unoccupied, round-eligible spaces.
    pub fn available(&self, round: u8) -> impl Iterator<Item = &ActionSpace> {
        self.spaces
            .iter()
            .filter(move |s| !s.is_occupied() && s.available_in(round))
    }

    /// Colors that still have at least one open space this round.
    pub fn colors_with_open_spaces(&self, round: u8) -> ColorSet {
        self.available(round).map(|s| s.color).collect()
    }

    /// Clear all occupancy at a round boundary.
    pub fn reset_for_round(&mut self) {
        for space in &mut self.spaces {
            space.occupant = None;
        }
    }
}
