use orderqueue_rs::{Guid, Message, MessageKind, MessageTracker};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_admission_matches_hash_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tracker = MessageTracker::new();
        let mut oracle: HashSet<(MessageKind, Guid)> = HashSet::new();

        for step in 0..20_000 {
            let kind = MessageKind::ALL[rng.gen_range(0..MessageKind::COUNT)];
            let message = Message::new(kind, rng.gen_range(0..60), rng.gen_range(0..60));
            let expected = oracle.insert((kind, message.guid()));
            assert_eq!(tracker.admit_message(&message), expected, "step {step}");
            assert!(tracker.is_admitted(kind, message.trader_id, message.trade_id));
            if step % 97 == 0 {
                if let Err(err) = tracker.validate() {
                    panic!("tracker invalid at step {step}: {err}");
                }
            }
        }

        assert!(tracker.validate().is_ok());
        assert_eq!(tracker.len(), oracle.len());
        for kind in MessageKind::ALL {
            let mut expected: Vec<Guid> = oracle
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, guid)| *guid)
                .collect();
            expected.sort();
            assert_eq!(tracker.len_for(kind), expected.len());
            assert_eq!(tracker.admitted(kind).collect::<Vec<_>>(), expected);
        }
    }

    #[test]
    fn test_tree_valid_after_every_admit() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut tracker = MessageTracker::new();
        for _ in 0..3_000 {
            tracker.admit(MessageKind::NewOrder, rng.gen_range(0..u32::MAX), rng.gen_range(0..4));
            assert!(tracker.validate().is_ok());
        }
        let set = tracker.set(MessageKind::NewOrder).expect("set exists");
        // Black height of a left-leaning red-black tree is at most log2(n + 1).
        assert!(set.black_height() <= 12);
    }

    #[test]
    fn test_new_order_then_cancel() {
        let mut tracker = MessageTracker::new();
        assert!(tracker.admit(MessageKind::NewOrder, 7, 3));
        assert!(!tracker.admit(MessageKind::NewOrder, 7, 3));
        assert!(tracker.admit(MessageKind::Cancel, 7, 3));
        assert!(!tracker.admit(MessageKind::Cancel, 7, 3));
        assert_eq!(tracker.len(), 2);
    }
}
