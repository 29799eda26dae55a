//! Price-time ordering scenarios, run against every strategy.

#[cfg(test)]
mod tests {
    use super::super::test_helpers::{assert_valid, queues};
    use crate::queue::{OrderMaker, OrderQueue, Side};

    #[test]
    fn test_all_same_price_buy() {
        for mut queue in queues(Side::Buy) {
            let mut maker = OrderMaker::new();
            for _ in 0..20 {
                queue.push(maker.priced_buy(1));
            }
            assert_valid(&queue);
            while let Some(order) = queue.pop() {
                assert_valid(&queue);
                assert_eq!(order.price(), 1);
            }
        }
    }

    #[test]
    fn test_all_same_price_sell() {
        for mut queue in queues(Side::Sell) {
            let mut maker = OrderMaker::new();
            for _ in 0..20 {
                queue.push(maker.priced_sell(1));
            }
            assert_valid(&queue);
            while let Some(order) = queue.pop() {
                assert_valid(&queue);
                assert_eq!(order.price(), 1);
            }
        }
    }

    #[test]
    fn test_descending_buy_pops_highest_first() {
        for mut queue in queues(Side::Buy) {
            let mut maker = OrderMaker::new();
            for price in (1..=20).rev() {
                queue.push(maker.priced_buy(price));
            }
            assert_valid(&queue);
            for expected in (1..=20).rev() {
                assert_eq!(queue.pop().map(|o| o.price()), Some(expected));
                assert_valid(&queue);
            }
            assert!(queue.pop().is_none());
        }
    }

    #[test]
    fn test_descending_sell_pops_lowest_first() {
        for mut queue in queues(Side::Sell) {
            let mut maker = OrderMaker::new();
            for price in (1..=20).rev() {
                queue.push(maker.priced_sell(price));
            }
            assert_valid(&queue);
            for expected in 1..=20 {
                assert_eq!(queue.pop().map(|o| o.price()), Some(expected));
                assert_valid(&queue);
            }
        }
    }

    #[test]
    fn test_ascending_buy_pops_highest_first() {
        for mut queue in queues(Side::Buy) {
            let mut maker = OrderMaker::new();
            for price in 1..=20 {
                queue.push(maker.priced_buy(price));
            }
            for expected in (1..=20).rev() {
                assert_eq!(queue.pop().map(|o| o.price()), Some(expected));
                assert_valid(&queue);
            }
        }
    }

    #[test]
    fn test_ascending_sell_pops_lowest_first() {
        for mut queue in queues(Side::Sell) {
            let mut maker = OrderMaker::new();
            for price in 1..=20 {
                queue.push(maker.priced_sell(price));
            }
            for expected in 1..=20 {
                assert_eq!(queue.pop().map(|o| o.price()), Some(expected));
                assert_valid(&queue);
            }
        }
    }

    #[test]
    fn test_equal_price_pops_in_arrival_order() {
        for side in [Side::Buy, Side::Sell] {
            for mut queue in queues(side) {
                let mut maker = OrderMaker::new();
                let arrivals: Vec<_> = (0..10).map(|_| maker.priced(5, side)).collect();
                for order in &arrivals {
                    queue.push(order.clone());
                }
                for expected in &arrivals {
                    assert_eq!(queue.pop().as_ref(), Some(expected));
                }
            }
        }
    }

    #[test]
    fn test_price_beats_time_then_time_breaks_ties() {
        for mut queue in queues(Side::Buy) {
            let mut maker = OrderMaker::new();
            let first_at_10 = maker.priced_buy(10);
            let late_at_11 = maker.priced_buy(11);
            let second_at_10 = maker.priced_buy(10);
            queue.push(first_at_10.clone());
            queue.push(late_at_11.clone());
            queue.push(second_at_10.clone());

            assert_eq!(queue.peek(), Some(&late_at_11));
            assert_eq!(queue.pop(), Some(late_at_11));
            assert_eq!(queue.pop(), Some(first_at_10));
            assert_eq!(queue.pop(), Some(second_at_10));
            assert_eq!(queue.peek(), None);
        }
    }

    #[test]
    fn test_peek_matches_pop_and_does_not_remove() {
        for mut queue in queues(Side::Sell) {
            let mut maker = OrderMaker::new();
            for price in [7, 3, 9, 3] {
                queue.push(maker.priced_sell(price));
            }
            while !queue.is_empty() {
                let len = queue.len();
                let peeked = queue.peek().cloned();
                assert_eq!(queue.len(), len);
                assert_eq!(queue.pop(), peeked);
            }
        }
    }

    #[test]
    fn test_empty_queue_yields_nothing() {
        for mut queue in queues(Side::Buy) {
            assert!(queue.is_empty());
            assert_eq!(queue.len(), 0);
            assert!(queue.peek().is_none());
            assert!(queue.pop().is_none());
            assert_valid(&queue);
        }
    }

    #[test]
    fn test_negative_prices_are_ordered() {
        for mut queue in queues(Side::Sell) {
            let mut maker = OrderMaker::new();
            for price in [0, -3, 4, -10] {
                queue.push(maker.priced_sell(price));
            }
            let prices: Vec<i64> = queue.drain().iter().map(|o| o.price()).collect();
            assert_eq!(prices, vec![-10, -3, 0, 4]);
        }
    }
}
