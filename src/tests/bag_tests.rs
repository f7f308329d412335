#[cfg(test)]
mod tests {
    use crate::bag::Bag;
    use crate::components::TetrominoType;

    fn full_set() -> Vec<TetrominoType> {
        let mut kinds = TetrominoType::ALL.to_vec();
        kinds.sort();
        kinds
    }

    #[test]
    fn test_bag_starts_empty() {
        let bag = Bag::new(Some(1));
        assert_eq!(bag.remaining(), 0);
    }

    #[test]
    fn test_each_bag_holds_every_kind_once() {
        let mut bag = Bag::new(Some(42));

        for _ in 0..3 {
            let mut drawn: Vec<_> = (0..7).map(|_| bag.draw()).collect();
            assert_eq!(bag.remaining(), 0);
            drawn.sort();
            assert_eq!(drawn, full_set());
        }
    }

    #[test]
    fn test_eighth_draw_refills() {
        let mut bag = Bag::new(Some(7));
        for _ in 0..7 {
            bag.draw();
        }
        assert_eq!(bag.remaining(), 0);

        bag.draw();
        assert_eq!(bag.remaining(), 6);
    }

    #[test]
    fn test_drawn_and_remaining_cover_the_set() {
        let mut bag = Bag::new(Some(99));
        let mut drawn = vec![bag.draw()];

        while bag.remaining() > 0 {
            let mut covered = drawn.clone();
            covered.extend(bag.peek(bag.remaining()));
            covered.sort();
            assert_eq!(covered, full_set());

            drawn.push(bag.draw());
        }
    }

    #[test]
    fn test_peek_matches_future_draws() {
        let mut bag = Bag::new(Some(3));
        for _ in 0..5 {
            bag.draw();
        }

        // Two left in this bag, so the peek crosses into the next one
        let peeked = bag.peek(5);
        let drawn: Vec<_> = (0..5).map(|_| bag.draw()).collect();
        assert_eq!(peeked, drawn);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let bag = Bag::new(Some(5));
        assert_eq!(bag.peek(3), bag.peek(3));
        assert_eq!(bag.peek(7).len(), 7);
        assert_eq!(bag.remaining(), 0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Bag::new(Some(1234));
        let mut b = Bag::new(Some(1234));
        let first: Vec<_> = (0..21).map(|_| a.draw()).collect();
        let second: Vec<_> = (0..21).map(|_| b.draw()).collect();
        assert_eq!(first, second);
    }
}
