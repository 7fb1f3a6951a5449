#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::{Tile, TileShape};
    use crate::error::EngineError;
    use crate::queue::TileQueue;
    use proptest::prelude::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = TileQueue::new();
        for shape in [TileShape::Bar, TileShape::J, TileShape::T] {
            queue.enqueue(Tile::new(shape)).unwrap();
        }

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue().unwrap().shape, TileShape::Bar);
        assert_eq!(queue.dequeue().unwrap().shape, TileShape::J);
        assert_eq!(queue.dequeue().unwrap().shape, TileShape::T);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dequeue_empty_leaves_queue_untouched() {
        let mut queue = TileQueue::new();

        let err = queue.dequeue().unwrap_err();
        assert!(matches!(err, EngineError::Empty));
        assert!(err.is_recoverable());
        assert_eq!(queue.len(), 0);
        assert!(queue.front().is_none());
        assert!(queue.back().is_none());

        // Still usable afterwards
        queue.enqueue(Tile::new(TileShape::S)).unwrap();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_single_element_is_front_and_back() {
        let mut queue = TileQueue::new();
        queue.enqueue(Tile::new(TileShape::Z)).unwrap();

        assert_eq!(queue.front(), queue.back());
        assert_eq!(queue.front().unwrap().shape, TileShape::Z);
    }

    #[test]
    fn test_failed_enqueue_keeps_queue_identical() {
        let mut queue = TileQueue::with_limit(2);
        queue.enqueue(Tile::new(TileShape::L)).unwrap();
        queue.enqueue(Tile::new(TileShape::Square)).unwrap();

        let front = queue.front().copied();
        let back = queue.back().copied();

        let result = queue.enqueue(Tile::new(TileShape::Bar));
        assert!(matches!(result, Err(EngineError::MemoryFailure)));
        assert!(!result.unwrap_err().is_recoverable());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.front().copied(), front);
        assert_eq!(queue.back().copied(), back);
    }

    #[test]
    fn test_flush_then_reuse() {
        let mut queue = TileQueue::new();
        for shape in TileShape::PLAYABLE {
            queue.enqueue(Tile::new(shape)).unwrap();
        }
        queue.flush();

        assert!(queue.is_empty());
        assert_eq!(queue.iter().count(), 0);

        queue.enqueue(Tile::new(TileShape::T)).unwrap();
        assert_eq!(queue.front().unwrap().shape, TileShape::T);
        queue.destroy();
    }

    #[test]
    fn test_display() {
        let mut queue = TileQueue::new();
        assert_eq!(queue.to_string(), "Queue is empty\n");

        queue.enqueue(Tile::new(TileShape::Bar)).unwrap();
        assert_eq!(queue.to_string(), "Queue size: 1\nBar Aqua r0 at (0, 0)\n");
    }

    proptest! {
        // true enqueues, false dequeues
        #[test]
        fn prop_len_matches_traversal(ops in prop::collection::vec(any::<bool>(), 0..64)) {
            let mut queue = TileQueue::new();
            let mut expected = std::collections::VecDeque::new();

            for (i, push) in ops.into_iter().enumerate() {
                if push {
                    let tile = Tile::new(TileShape::PLAYABLE[i % TileShape::PLAYABLE.len()]);
                    queue.enqueue(tile).unwrap();
                    expected.push_back(tile);
                } else {
                    let got = queue.dequeue().ok();
                    prop_assert_eq!(got, expected.pop_front());
                }

                prop_assert_eq!(queue.len(), queue.iter().count());
                prop_assert_eq!(queue.is_empty(), queue.front().is_none());
                prop_assert_eq!(queue.is_empty(), queue.back().is_none());
                prop_assert_eq!(queue.iter().last(), queue.back());
            }
        }
    }
}
