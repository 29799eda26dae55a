use orderqueue_rs::{
    Guid, GuidSet, Order, OrderMaker, OrderQueue, PriorityQueue, QueueStrategy, Side,
};
use proptest::prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Reverse;
    use std::collections::BTreeSet;

    const STRATEGIES: [QueueStrategy; 2] = [QueueStrategy::LevelHeap, QueueStrategy::SequenceHeap];

    fn side_from(buy: bool) -> Side {
        if buy { Side::Buy } else { Side::Sell }
    }

    /// Orders sorted by price-time priority with a stable sort.
    fn priority_sorted(side: Side, orders: &[Order]) -> Vec<Guid> {
        let mut sorted = orders.to_vec();
        match side {
            Side::Buy => sorted.sort_by_key(|o| Reverse(o.price())),
            Side::Sell => sorted.sort_by_key(Order::price),
        }
        sorted.iter().map(Order::guid).collect()
    }

    proptest! {
        #[test]
        fn prop_drain_follows_price_time_priority(
            prices in prop::collection::vec(-1_000i64..1_000, 0..200),
            buy in any::<bool>(),
        ) {
            let side = side_from(buy);
            let mut maker = OrderMaker::new();
            let orders: Vec<Order> = prices.iter().map(|&p| maker.priced(p, side)).collect();
            let expected = priority_sorted(side, &orders);

            for strategy in STRATEGIES {
                let mut queue = PriorityQueue::new(side, strategy);
                for order in &orders {
                    queue.push(order.clone());
                }
                prop_assert!(queue.validate().is_ok());
                let drained: Vec<Guid> = queue.drain().iter().map(Order::guid).collect();
                prop_assert_eq!(&drained, &expected);
            }
        }

        #[test]
        fn prop_remove_keeps_relative_order(
            entries in prop::collection::vec((0i64..20, any::<bool>()), 1..150),
            buy in any::<bool>(),
        ) {
            let side = side_from(buy);
            let mut maker = OrderMaker::new();
            let orders: Vec<(Order, bool)> = entries
                .iter()
                .map(|&(p, cancel)| (maker.priced(p, side), cancel))
                .collect();
            let kept: Vec<Order> = orders
                .iter()
                .filter(|(_, cancel)| !cancel)
                .map(|(o, _)| o.clone())
                .collect();
            let expected = priority_sorted(side, &kept);

            for strategy in STRATEGIES {
                let mut queue = PriorityQueue::new(side, strategy);
                for (order, _) in &orders {
                    queue.push(order.clone());
                }
                for (order, cancel) in &orders {
                    if *cancel {
                        prop_assert_eq!(queue.remove(order.guid(), order.price()), Some(order.clone()));
                        prop_assert!(queue.validate().is_ok());
                    }
                }
                prop_assert_eq!(queue.len(), kept.len());
                let drained: Vec<Guid> = queue.drain().iter().map(Order::guid).collect();
                prop_assert_eq!(&drained, &expected);
            }
        }

        #[test]
        fn prop_guid_set_matches_btree(keys in prop::collection::vec(any::<u64>(), 0..300)) {
            let mut set = GuidSet::new();
            let mut oracle = BTreeSet::new();
            for &key in &keys {
                prop_assert_eq!(set.insert(Guid::from(key)), oracle.insert(key));
            }
            prop_assert!(set.validate().is_ok());
            prop_assert_eq!(set.len(), oracle.len());
            let ordered: Vec<u64> = set.iter().map(Guid::as_u64).collect();
            prop_assert_eq!(ordered, oracle.into_iter().collect::<Vec<_>>());
        }
    }
}
