use web_time::Instant;

use crate::*;

/// Identifies a pending joker preview: which grid instance, which cell, and when it must be hidden again.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PreviewTicket {
    pub epoch: u64,
    pub coords: Coord2,
    pub expires_at: Instant,
}

impl PreviewTicket {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Single-use joker, reset for every level attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JokerState {
    Available,
    /// Next tap previews instead of revealing.
    Armed,
    Previewing(PreviewTicket),
    Spent,
}

impl JokerState {
    /// Still usable in this attempt, armed or not.
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available | Self::Armed)
    }

    pub const fn is_armed(self) -> bool {
        matches!(self, Self::Armed)
    }

    pub const fn pending_preview(self) -> Option<PreviewTicket> {
        match self {
            Self::Previewing(ticket) => Some(ticket),
            _ => None,
        }
    }

    pub fn toggled(self) -> Result<Self> {
        match self {
            Self::Available => Ok(Self::Armed),
            Self::Armed => Ok(Self::Available),
            Self::Previewing(_) | Self::Spent => Err(GameError::JokerUnavailable),
        }
    }
}

impl Default for JokerState {
    fn default() -> Self {
        Self::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_arms_and_disarms() {
        let armed = JokerState::Available.toggled().unwrap();

        assert!(armed.is_armed());
        assert!(armed.is_available());
        assert_eq!(armed.toggled(), Ok(JokerState::Available));
    }

    #[test]
    fn spent_joker_cannot_be_armed() {
        assert_eq!(JokerState::Spent.toggled(), Err(GameError::JokerUnavailable));
        assert!(!JokerState::Spent.is_available());
    }

    #[test]
    fn ticket_expires_at_deadline() {
        let now = Instant::now();
        let ticket = PreviewTicket {
            epoch: 0,
            coords: (1, 2),
            expires_at: now + JOKER_PREVIEW,
        };

        assert!(!ticket.is_expired(now));
        assert!(ticket.is_expired(now + JOKER_PREVIEW));
        assert_eq!(JokerState::Previewing(ticket).pending_preview(), Some(ticket));
    }
}
