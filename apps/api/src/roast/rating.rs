//! Rating and the five-bucket verdict mapping (stars, caption, reaction image).

use serde::Serialize;

/// Integer rating, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    /// Used when the completion carries no `RATING:` line.
    pub const DEFAULT: Rating = Rating(3);

    /// Clamps any extracted integer into the valid range.
    pub fn clamped(raw: u64) -> Self {
        Rating(raw.clamp(Self::MIN as u64, Self::MAX as u64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn bucket(self) -> Bucket {
        Bucket::for_score(self.0 as i64)
    }

    /// Five star slots; slot `i` (1-based) is filled iff `i <= rating`.
    pub fn stars(self) -> [bool; 5] {
        std::array::from_fn(|i| (i as u8) < self.0)
    }
}

/// Severity tiers, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Terrible,
    Bad,
    Average,
    Good,
    Excellent,
}

impl Bucket {
    /// Step function over inclusive thresholds 1, 2, 3, 4. Total over all integers.
    pub fn for_score(score: i64) -> Self {
        if score <= 1 {
            Bucket::Terrible
        } else if score <= 2 {
            Bucket::Bad
        } else if score <= 3 {
            Bucket::Average
        } else if score <= 4 {
            Bucket::Good
        } else {
            Bucket::Excellent
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            Bucket::Terrible => "YOU'RE AN IDIOT SANDWICH!",
            Bucket::Bad => "IT'S BLOODY RAW!",
            Bucket::Average => "IT'S DECENT, BUT I'VE SEEN BETTER!",
            Bucket::Good => "NOW THAT'S MORE LIKE IT!",
            Bucket::Excellent => "ABSOLUTELY BRILLIANT!",
        }
    }

    pub fn reaction_image(self) -> &'static str {
        match self {
            // Idiot sandwich
            Bucket::Terrible => "https://media.giphy.com/media/v1.Y2lkPTc5MGI3NjExMDZ6dGFiaXRqc3JqMWxwc3FzajV1c2w1a3FtcHl0bDIwaWMxZXE2YSZlcD12MV9naWZzX3NlYXJjaCZjdD1n/3o85g2ttYzgw6o661q/giphy.gif",
            // IT'S RAW
            Bucket::Bad => "https://media.giphy.com/media/2kMQiSEW6Wkyh3YltH/giphy.gif",
            Bucket::Average => "https://media.giphy.com/media/3o6ZtpvPW6fqxkE1xu/giphy.gif",
            // Finally, some good food
            Bucket::Good => "https://media.giphy.com/media/TIMB8bgHa1mb41tMaS/giphy.gif",
            Bucket::Excellent => "https://media.giphy.com/media/v1.Y2lkPTc5MGI3NjExczdndDV1aThlNXpjeWZ6Z3F3eWI4aGliNG83bGl3YnBvOWhjMWVnNCZlcD12MV9naWZzX3NlYXJjaCZjdD1n/l0MYyoYPvz22wTXkQ/giphy.gif",
        }
    }
}
