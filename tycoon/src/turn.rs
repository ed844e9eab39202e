use crate::Player;

/// Turn sequencing over an externally owned, fixed-order player list.
///
/// The manager only tracks indices; the player slice stays owned by the game
/// aggregate and is borrowed for the duration of each call.
#[derive(Clone, Debug)]
pub struct TurnManager {
    current: usize,
    turn_number: u64,
}

impl TurnManager {
    /// The player at index 0 begins.
    pub fn start() -> Self {
        Self {
            current: 0,
            turn_number: 1,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    pub fn current_player<'a>(&self, players: &'a [Player]) -> &'a Player {
        &players[self.current]
    }

    /// Advances to the next eligible player and returns their index.
    ///
    /// A jailed player is skipped while their counter is positive; each
    /// encounter burns one remaining jail turn, and on reaching zero they are
    /// released and play normally. If a full revolution finds everyone still
    /// confined, the currently indexed player is let through so the game
    /// cannot hang. The turn counter increments exactly once per call, no
    /// matter how many players were skipped.
    pub fn next(&mut self, players: &mut [Player]) -> usize {
        let count = players.len();
        let mut seen = 0;
        loop {
            self.current = (self.current + 1) % count;
            seen += 1;
            let player = &mut players[self.current];
            if !player.in_jail {
                break;
            }
            if player.jail_turns == 0 {
                player.in_jail = false;
                break;
            }
            player.jail_turns -= 1;
            if seen >= count {
                break;
            }
        }
        self.turn_number += 1;
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    fn players(count: u32) -> Vec<Player> {
        (0..count)
            .map(|id| Player::new(id, format!("p{id}"), "ES", "#fff"))
            .collect()
    }

    fn jail(player: &mut Player, turns: u32) {
        player.in_jail = true;
        player.jail_turns = turns;
    }

    #[test]
    fn round_robin_without_jail() {
        let mut players = players(3);
        let mut turns = TurnManager::start();
        assert_eq!(turns.current(), 0);
        assert_eq!(turns.next(&mut players), 1);
        assert_eq!(turns.next(&mut players), 2);
        assert_eq!(turns.next(&mut players), 0);
        assert_eq!(turns.turn_number(), 4);
    }

    #[test]
    fn two_jail_turns_mean_two_skipped_encounters() {
        let mut players = players(2);
        jail(&mut players[1], 2);
        let mut turns = TurnManager::start();

        // First two passes skip the prisoner; player 0 plays again both times.
        assert_eq!(turns.next(&mut players), 0);
        assert_eq!(turns.next(&mut players), 0);
        // Third encounter releases them.
        assert_eq!(turns.next(&mut players), 1);
        assert!(!players[1].in_jail);
        assert_eq!(players[1].jail_turns, 0);
    }

    #[test]
    fn turn_number_counts_calls_not_skips() {
        let mut players = players(3);
        jail(&mut players[1], 2);
        jail(&mut players[2], 2);
        let mut turns = TurnManager::start();
        turns.next(&mut players);
        assert_eq!(turns.turn_number(), 2);
    }

    #[test]
    fn free_players_still_get_their_turns() {
        let mut players = players(4);
        jail(&mut players[1], 2);
        jail(&mut players[3], 2);
        let mut turns = TurnManager::start();

        let mut visited = Vec::new();
        for _ in 0..8 {
            visited.push(turns.next(&mut players));
        }
        // Both free players appear in every revolution.
        assert!(visited.iter().filter(|&&idx| idx == 0).count() >= 2);
        assert!(visited.iter().filter(|&&idx| idx == 2).count() >= 2);
        // The prisoners got out eventually.
        assert!(visited.contains(&1));
        assert!(visited.contains(&3));
    }

    #[test]
    fn all_jailed_still_terminates() {
        let mut players = players(3);
        for player in players.iter_mut() {
            jail(player, 10);
        }
        let mut turns = TurnManager::start();
        // One full revolution, then the currently indexed player is admitted.
        let idx = turns.next(&mut players);
        assert!(idx < 3);
        assert_eq!(turns.turn_number(), 2);
    }
}
