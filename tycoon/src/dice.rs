use rand::Rng;

/// The result of throwing both dice at once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiceRoll {
    pub d1: u8,
    pub d2: u8,
    pub total: u8,
}

impl DiceRoll {
    pub fn new(d1: u8, d2: u8) -> Self {
        Self {
            d1,
            d2,
            total: d1 + d2,
        }
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {} = {}", self.d1, self.d2, self.total)
    }
}

/// A single six-sided die throw.
pub fn roll_single(rng: &mut impl Rng) -> u8 {
    rng.gen_range(1..=6)
}

/// Two independent die throws. The rng is injected so that callers can
/// substitute a seeded one for reproducible games.
pub fn roll_pair(rng: &mut impl Rng) -> DiceRoll {
    DiceRoll::new(roll_single(rng), roll_single(rng))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn rolls_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let roll = roll_pair(&mut rng);
            assert!((1..=6).contains(&roll.d1));
            assert!((1..=6).contains(&roll.d2));
            assert_eq!(roll.total, roll.d1 + roll.d2);
        }
    }
}
