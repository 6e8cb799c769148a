use crate::engine::progress::DirectionRecord;

pub const WEIGHT_NEW: usize = 4;
pub const WEIGHT_LEARNING: usize = 3;
pub const WEIGHT_COMFORTABLE: usize = 1;

/// Number of copies of a card placed in the session pool.
pub fn weight(record: &DirectionRecord) -> usize {
    if record.attempts() == 0 {
        WEIGHT_NEW
    } else if !record.comfortable {
        WEIGHT_LEARNING
    } else {
        WEIGHT_COMFORTABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(correct: u32, incorrect: u32, streak: u32, comfortable: bool) -> DirectionRecord {
        DirectionRecord {
            correct,
            incorrect,
            streak,
            comfortable,
        }
    }

    #[test]
    fn test_unseen_weighs_four() {
        assert_eq!(weight(&rec(0, 0, 0, false)), 4);
    }

    #[test]
    fn test_attempted_not_comfortable_weighs_three() {
        assert_eq!(weight(&rec(0, 1, 0, false)), 3);
        assert_eq!(weight(&rec(2, 0, 2, false)), 3);
    }

    #[test]
    fn test_comfortable_weighs_one() {
        assert_eq!(weight(&rec(3, 0, 3, true)), 1);
        assert_eq!(weight(&rec(3, 5, 0, true)), 1);
    }
}
