use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Direction stored on a vote row. A missing row is the neutral state.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    AsRefStr,
    Display,
    EnumString,
)]
#[sqlx(type_name = "vote_direction", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VoteDirection {
    Up,
    Down,
}

/// A user's current opinion on a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoteState {
    #[default]
    None,
    Up,
    Down,
}

impl VoteState {
    /// Contribution of this state to the question's vote tally.
    pub fn weight(self) -> i32 {
        match self {
            VoteState::None => 0,
            VoteState::Up => 1,
            VoteState::Down => -1,
        }
    }

    /// Moves into `direction`. Casting the current direction again is a no-op.
    pub fn cast(self, direction: VoteDirection) -> VoteTransition {
        let to = VoteState::from(direction);
        VoteTransition {
            from: self,
            to,
            delta: to.weight() - self.weight(),
        }
    }
}

impl From<VoteDirection> for VoteState {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => VoteState::Up,
            VoteDirection::Down => VoteState::Down,
        }
    }
}

impl From<Option<VoteDirection>> for VoteState {
    fn from(direction: Option<VoteDirection>) -> Self {
        direction.map(VoteState::from).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTransition {
    pub from: VoteState,
    pub to: VoteState,
    /// Amount to add to the question's tally.
    pub delta: i32,
}

impl VoteTransition {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upvote_transitions() {
        let t = VoteState::None.cast(VoteDirection::Up);
        assert_eq!((t.to, t.delta), (VoteState::Up, 1));

        let t = VoteState::Up.cast(VoteDirection::Up);
        assert_eq!((t.to, t.delta), (VoteState::Up, 0));
        assert!(t.is_noop());

        let t = VoteState::Down.cast(VoteDirection::Up);
        assert_eq!((t.to, t.delta), (VoteState::Up, 2));
    }

    #[test]
    fn downvote_transitions() {
        let t = VoteState::None.cast(VoteDirection::Down);
        assert_eq!((t.to, t.delta), (VoteState::Down, -1));

        let t = VoteState::Down.cast(VoteDirection::Down);
        assert_eq!((t.to, t.delta), (VoteState::Down, 0));
        assert!(t.is_noop());

        let t = VoteState::Up.cast(VoteDirection::Down);
        assert_eq!((t.to, t.delta), (VoteState::Down, -2));
    }

    #[test]
    fn tally_always_matches_final_state() {
        // Whatever path a user takes, the sum of deltas equals the weight of where they end up.
        let paths = [
            vec![VoteDirection::Up, VoteDirection::Up, VoteDirection::Down],
            vec![VoteDirection::Down, VoteDirection::Up, VoteDirection::Up],
            vec![VoteDirection::Down, VoteDirection::Down],
            vec![VoteDirection::Up, VoteDirection::Down, VoteDirection::Up, VoteDirection::Down],
        ];

        for path in paths {
            let mut state = VoteState::None;
            let mut tally = 0;
            for direction in path {
                let t = state.cast(direction);
                tally += t.delta;
                state = t.to;
            }
            assert_eq!(tally, state.weight());
        }
    }

    #[test]
    fn missing_vote_row_is_neutral() {
        assert_eq!(VoteState::from(None), VoteState::None);
        assert_eq!(VoteState::from(Some(VoteDirection::Down)), VoteState::Down);
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("UP".parse::<VoteDirection>().unwrap(), VoteDirection::Up);
        assert_eq!(VoteDirection::Down.to_string(), "down");
        assert!("sideways".parse::<VoteDirection>().is_err());
    }
}
