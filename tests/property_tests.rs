use lineshell::History;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Push(String),
    Previous,
    NextEntry,
}

// Short words plus the occasional empty string, so empty-push suppression
// gets exercised too
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-c]{0,3}".prop_map(Op::Push),
        Just(Op::Previous),
        Just(Op::NextEntry),
    ]
}

proptest! {
    #[test]
    fn cursor_stays_in_bounds(
        circular in any::<bool>(),
        ops in prop::collection::vec(op_strategy(), 0..64),
    ) {
        let mut history = History::new(circular);

        for op in ops {
            match op {
                Op::Push(line) => history.push(&line),
                Op::Previous => {
                    history.previous();
                }
                Op::NextEntry => {
                    history.next_entry();
                }
            }

            prop_assert!(history.cursor() <= history.len());
        }
    }

    #[test]
    fn entries_never_hold_adjacent_duplicates_or_empties(
        circular in any::<bool>(),
        lines in prop::collection::vec("[a-b]{0,2}", 0..64),
    ) {
        let mut history = History::new(circular);

        for line in &lines {
            history.push(line);
        }

        for pair in history.entries().windows(2) {
            prop_assert_ne!(&pair[0], &pair[1]);
        }

        prop_assert!(!history.entries().iter().any(|entry| entry.is_empty()));
    }

    #[test]
    fn first_recall_is_always_the_newest_entry(
        lines in prop::collection::vec("[a-z]{1,4}", 1..16),
    ) {
        let mut history = History::new(false);

        for line in &lines {
            history.push(line);
        }

        let newest = history.previous().to_string();

        prop_assert_eq!(newest.as_str(), history.entries().last().unwrap().as_str());

        history.next_entry();
        prop_assert_eq!(history.cursor(), history.len());
    }
}
