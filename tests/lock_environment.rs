//! Transition properties of the combination lock over every state and action

use combolock::lock::{ADVANCE_ACTION, CombinationLock, UNLOCK_REWARD};

const ALPHABET: usize = 10;
const LENGTH: usize = 4;

#[test]
fn advance_moves_one_state_forward_from_every_state() {
    let mut lock = CombinationLock::new(ALPHABET, LENGTH);
    for state in 0..LENGTH {
        lock.reset(state);
        let t = lock.step(ADVANCE_ACTION);
        assert_eq!(t.next_state, state + 1);
        assert_eq!(lock.state(), state + 1);
        if state == LENGTH - 1 {
            assert!(t.terminal);
            assert_eq!(t.reward, UNLOCK_REWARD);
        } else {
            assert!(!t.terminal);
            assert_eq!(t.reward, 0.0);
        }
    }
}

#[test]
fn every_other_action_resets_to_origin() {
    let mut lock = CombinationLock::new(ALPHABET, LENGTH);
    for state in 0..LENGTH {
        for action in (0..ALPHABET).filter(|&a| a != ADVANCE_ACTION) {
            lock.reset(state);
            let t = lock.step(action);
            assert_eq!(t.next_state, 0, "state {state} action {action}");
            assert_eq!(t.reward, 0.0);
            assert!(!t.terminal);
        }
    }
}

#[test]
fn full_sequence_opens_lock_exactly_once() {
    let mut lock = CombinationLock::new(ALPHABET, LENGTH);
    lock.reset(0);
    let rewards: Vec<f64> = (0..LENGTH).map(|_| lock.step(ADVANCE_ACTION).reward).collect();
    assert_eq!(rewards, vec![0.0, 0.0, 0.0, 1.0]);
    assert_eq!(lock.state(), LENGTH);
}

#[test]
fn single_step_lock_opens_from_origin() {
    let mut lock = CombinationLock::new(2, 1);
    lock.reset(0);
    let t = lock.step(ADVANCE_ACTION);
    assert!(t.terminal);
    assert_eq!(t.next_state, 1);
}
