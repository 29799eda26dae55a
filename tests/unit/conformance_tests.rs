use orderqueue_rs::{Guid, Order, OrderMaker, OrderQueue, PriorityQueue, QueueStrategy, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const STRATEGIES: [QueueStrategy; 2] = [QueueStrategy::LevelHeap, QueueStrategy::SequenceHeap];

    /// Linear-scan reference: resting orders tagged with their arrival number.
    struct Model {
        side: Side,
        resting: Vec<(u64, Order)>,
        arrivals: u64,
    }

    impl Model {
        fn new(side: Side) -> Self {
            Model {
                side,
                resting: Vec::new(),
                arrivals: 0,
            }
        }

        fn push(&mut self, order: Order) {
            self.resting.push((self.arrivals, order));
            self.arrivals += 1;
        }

        fn best_index(&self) -> Option<usize> {
            (0..self.resting.len()).reduce(|best, i| {
                let (best_seq, best_order) = &self.resting[best];
                let (seq, order) = &self.resting[i];
                let wins = self.side.better(order.price(), best_order.price())
                    || (order.price() == best_order.price() && seq < best_seq);
                if wins { i } else { best }
            })
        }

        fn peek(&self) -> Option<&Order> {
            self.best_index().map(|i| &self.resting[i].1)
        }

        fn pop(&mut self) -> Option<Order> {
            self.best_index().map(|i| self.resting.remove(i).1)
        }
    }

    /// Runs a seeded random workload against `strategy`, checking every step
    /// against the model. Returns the identities in the order they left the
    /// queue through `pop`.
    fn run_workload(side: Side, strategy: QueueStrategy, seed: u64, steps: usize) -> Vec<Guid> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut maker = OrderMaker::new().with_amount(10);
        let mut queue = PriorityQueue::new(side, strategy);
        let mut model = Model::new(side);
        let mut pushed = HashSet::new();
        let mut departed = HashSet::new();
        let mut popped = Vec::new();

        for step in 0..steps {
            match rng.gen_range(0..10) {
                0..=4 => {
                    let price = rng.gen_range(90..=110);
                    let order = maker.priced(price, side);
                    assert!(pushed.insert(order.guid()));
                    model.push(order.clone());
                    queue.push(order);
                }
                7 => {
                    let quantity = rng.gen_range(0..=6);
                    let expected = model.best_index().map(|i| {
                        let remaining = model.resting[i].1.reduce(quantity);
                        if remaining == 0 {
                            let (_, filled) = model.resting.remove(i);
                            assert!(departed.insert(filled.guid()));
                        }
                        remaining
                    });
                    assert_eq!(queue.reduce_head(quantity), expected, "reduce at step {step}");
                }
                5..=6 => {
                    assert_eq!(queue.peek(), model.peek(), "peek at step {step}");
                    let expected = model.pop();
                    let got = queue.pop();
                    assert_eq!(got, expected, "pop at step {step}");
                    if let Some(order) = got {
                        assert!(departed.insert(order.guid()), "{} left twice", order.guid());
                        popped.push(order.guid());
                    }
                }
                _ if model.resting.is_empty() || rng.gen_bool(0.1) => {
                    // The maker never hands out trader id 0.
                    let stranger = Guid::new(0, step as u32);
                    assert_eq!(queue.remove(stranger, 100), None);
                }
                _ => {
                    let i = rng.gen_range(0..model.resting.len());
                    let order = model.resting[i].1.clone();
                    if rng.gen_bool(0.1) {
                        assert_eq!(queue.remove(order.guid(), order.price() + 1_000), None);
                    } else {
                        model.resting.remove(i);
                        assert_eq!(queue.remove(order.guid(), order.price()), Some(order.clone()));
                        assert_eq!(queue.remove(order.guid(), order.price()), None);
                        assert!(departed.insert(order.guid()));
                    }
                }
            }
            assert_eq!(queue.len(), model.resting.len(), "len at step {step}");
            if let Err(err) = queue.validate() {
                panic!("{strategy} {side} invalid at step {step}: {err}");
            }
        }

        for order in queue.drain() {
            assert!(departed.insert(order.guid()));
        }
        assert_eq!(departed, pushed);
        popped
    }

    #[test]
    fn test_random_workload_buy() {
        for strategy in STRATEGIES {
            run_workload(Side::Buy, strategy, 0x5eed, 12_000);
        }
    }

    #[test]
    fn test_random_workload_sell() {
        for strategy in STRATEGIES {
            run_workload(Side::Sell, strategy, 0xfeed, 12_000);
        }
    }

    #[test]
    fn test_strategies_pop_identically() {
        for (seed, side) in [(1, Side::Buy), (2, Side::Sell), (3, Side::Buy)] {
            let levels = run_workload(side, QueueStrategy::LevelHeap, seed, 3_000);
            let sequence = run_workload(side, QueueStrategy::SequenceHeap, seed, 3_000);
            assert!(!levels.is_empty());
            assert_eq!(levels, sequence);
        }
    }

    #[test]
    fn test_pops_never_improve() {
        let mut rng = StdRng::seed_from_u64(42);
        for side in [Side::Buy, Side::Sell] {
            for strategy in STRATEGIES {
                let mut maker = OrderMaker::new();
                let mut queue = PriorityQueue::new(side, strategy);
                for _ in 0..2_000 {
                    queue.push(maker.priced(rng.gen_range(-50..=50), side));
                }
                let drained = queue.drain();
                assert_eq!(drained.len(), 2_000);
                for pair in drained.windows(2) {
                    assert!(
                        !side.better(pair[1].price(), pair[0].price()),
                        "{strategy} {side}: {} after {}",
                        pair[1].price(),
                        pair[0].price()
                    );
                    if pair[0].price() == pair[1].price() {
                        // Same trade id, so trader ids follow arrival.
                        assert!(pair[0].trader_id() < pair[1].trader_id());
                    }
                }
            }
        }
    }

    #[test]
    fn test_twenty_distinct_prices() {
        for strategy in STRATEGIES {
            let mut maker = OrderMaker::new();
            let mut bids = PriorityQueue::new(Side::Buy, strategy);
            let mut asks = PriorityQueue::new(Side::Sell, strategy);
            for price in (1..=20).rev() {
                bids.push(maker.priced_buy(price));
            }
            for price in 1..=20 {
                asks.push(maker.priced_sell(price));
            }
            let bid_prices: Vec<i64> = bids.drain().iter().map(Order::price).collect();
            let ask_prices: Vec<i64> = asks.drain().iter().map(Order::price).collect();
            assert_eq!(bid_prices, (1..=20).rev().collect::<Vec<_>>());
            assert_eq!(ask_prices, (1..=20).collect::<Vec<_>>());
        }
    }
}
