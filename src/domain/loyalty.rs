use std::fmt;

use serde::{Deserialize, Serialize};

/// One point per this many currency units of order total.
pub const CURRENCY_UNITS_PER_POINT: u64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[default]
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    /// Points needed to reach this tier.
    pub fn threshold(self) -> u64 {
        match self {
            Tier::Bronze => 0,
            Tier::Silver => 500,
            Tier::Gold => 1000,
        }
    }

    /// Highest tier whose threshold `points` meets.
    pub fn for_points(points: u64) -> Tier {
        [Tier::Gold, Tier::Silver]
            .into_iter()
            .find(|tier| points >= tier.threshold())
            .unwrap_or(Tier::Bronze)
    }

    pub fn next(self) -> Option<Tier> {
        match self {
            Tier::Bronze => Some(Tier::Silver),
            Tier::Silver => Some(Tier::Gold),
            Tier::Gold => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
        };
        f.write_str(name)
    }
}

/// The shopper's loyalty profile, stored under the `user` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyProfile {
    pub points: u64,
    #[serde(rename = "level")]
    pub tier: Tier,
    pub orders_count: u32,
}

impl Default for LoyaltyProfile {
    fn default() -> Self {
        Self {
            points: 0,
            tier: Tier::Bronze,
            orders_count: 0,
        }
    }
}

pub fn points_for(order_total: u64) -> u64 {
    order_total / CURRENCY_UNITS_PER_POINT
}

/// Outcome of crediting a completed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsAward {
    pub points: u64,
    pub balance: u64,
    pub promoted_to: Option<Tier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub cost: u64,
}

pub const REWARDS: [Reward; 4] = [
    Reward {
        id: "discount5",
        title: "5% Off Next Order",
        description: "Get 5% discount on your next purchase",
        cost: 100,
    },
    Reward {
        id: "discount10",
        title: "10% Off Next Order",
        description: "Get 10% discount on your next purchase",
        cost: 250,
    },
    Reward {
        id: "freedelivery",
        title: "Free Delivery",
        description: "Free delivery for your next 5 orders",
        cost: 150,
    },
    Reward {
        id: "premium",
        title: "Premium Member",
        description: "Unlock premium features for 1 month",
        cost: 500,
    },
];

pub fn find_reward(id: &str) -> Option<&'static Reward> {
    REWARDS.iter().find(|reward| reward.id == id)
}

/// Where the point balance sits between tier thresholds.
///
/// Computed from the balance alone, so after spending points it can trail
/// the stored (never demoted) tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierProgress {
    pub band: Tier,
    pub next: Option<Tier>,
    pub points_to_next: u64,
    pub percent: u8,
}

impl TierProgress {
    pub fn for_points(points: u64) -> Self {
        let band = Tier::for_points(points);
        match band.next() {
            Some(next) => {
                let span = next.threshold() - band.threshold();
                let into = points - band.threshold();
                Self {
                    band,
                    next: Some(next),
                    points_to_next: next.threshold() - points,
                    percent: (into * 100 / span) as u8,
                }
            }
            None => Self {
                band,
                next: None,
                points_to_next: 0,
                percent: 100,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds() {
        assert_eq!(Tier::for_points(0), Tier::Bronze);
        assert_eq!(Tier::for_points(499), Tier::Bronze);
        assert_eq!(Tier::for_points(500), Tier::Silver);
        assert_eq!(Tier::for_points(999), Tier::Silver);
        assert_eq!(Tier::for_points(1000), Tier::Gold);
    }

    #[test]
    fn progress_between_bands() {
        let p = TierProgress::for_points(250);
        assert_eq!(p.band, Tier::Bronze);
        assert_eq!(p.next, Some(Tier::Silver));
        assert_eq!(p.points_to_next, 250);
        assert_eq!(p.percent, 50);

        let gold = TierProgress::for_points(4200);
        assert_eq!(gold.next, None);
        assert_eq!(gold.percent, 100);
    }

    #[test]
    fn one_point_per_ten_units() {
        assert_eq!(points_for(250), 25);
        assert_eq!(points_for(708), 70);
        assert_eq!(points_for(9), 0);
    }

    #[test]
    fn reward_lookup() {
        assert_eq!(find_reward("premium").map(|r| r.cost), Some(500));
        assert!(find_reward("nope").is_none());
    }
}
