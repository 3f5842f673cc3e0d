/// Weight applied to a category that is missing or cannot be resolved.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Category name applied when a post has no resolvable category.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Priority score = (likes × 2) + (comments × 3) + category weight.
///
/// Comments outweigh likes because commenting signals stronger civic
/// engagement than a passive like; the additive weight lets admins bias
/// whole categories upward independent of engagement volume.
pub fn priority_score(likes: i64, comments: i64, category_weight: f64) -> f64 {
    (likes * 2 + comments * 3) as f64 + category_weight
}

/// The score exposed to clients, rounded half-away-from-zero.
pub fn rounded_priority(likes: i64, comments: i64, category_weight: f64) -> i64 {
    priority_score(likes, comments, category_weight).round() as i64
}

/// Two-bucket engagement label. There is no "Low Engagement" tier.
pub fn engagement_label(comment_count: i64) -> &'static str {
    if comment_count > 10 {
        "High Engagement"
    } else {
        "Medium Engagement"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_matches_formula() {
        assert_eq!(priority_score(5, 12, 2.5), 5.0 * 2.0 + 12.0 * 3.0 + 2.5);
        assert_eq!(priority_score(0, 0, 1.0), 1.0);
        assert_eq!(priority_score(7, 0, 0.0), 14.0);
    }

    #[test]
    fn score_is_monotonic_in_each_argument() {
        let base = priority_score(3, 4, 1.5);
        assert!(priority_score(4, 4, 1.5) > base);
        assert!(priority_score(3, 5, 1.5) > base);
        assert!(priority_score(3, 4, 2.0) > base);
    }

    #[test]
    fn priority_rounds_half_away_from_zero() {
        // 5*2 + 12*3 + 2.5 = 48.5 → 49
        assert_eq!(rounded_priority(5, 12, 2.5), 49);
        assert_eq!(rounded_priority(0, 0, 1.0), 1);
        assert_eq!(rounded_priority(1, 1, 1.2), 6);
    }

    #[test]
    fn engagement_boundary_sits_at_ten() {
        assert_eq!(engagement_label(10), "Medium Engagement");
        assert_eq!(engagement_label(11), "High Engagement");
        assert_eq!(engagement_label(0), "Medium Engagement");
    }
}
