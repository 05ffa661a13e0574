use super::*;

fn walk(p: &mut Playback, steps: usize) -> Vec<usize> {
    (0..steps).map(|_| p.step()).collect()
}

#[test]
fn loop_wraps_to_start() {
    let mut p = Playback::new(3, LoopBehavior::Loop);
    assert_eq!(walk(&mut p, 5), vec![1, 2, 0, 1, 2]);
    assert_eq!(p.speed(), 1);
}

#[test]
fn once_holds_last_frame() {
    let mut p = Playback::new(3, LoopBehavior::Once);
    assert_eq!(walk(&mut p, 4), vec![1, 2, 2, 2]);
    assert_eq!(p.speed(), 0);
}

#[test]
fn reverse_bounces_at_both_ends() {
    let mut p = Playback::new(3, LoopBehavior::Reverse);
    // 0 -> 1 -> 2 -> (3 => 2*3-3-1 = 2, speed -1) -> 1 -> 0 -> (-1 => 1, speed +1)
    assert_eq!(walk(&mut p, 6), vec![1, 2, 2, 1, 0, 1]);
    assert_eq!(p.speed(), 1);
}

#[test]
fn backwards_loop_and_once() {
    let mut p = Playback::new(4, LoopBehavior::Loop);
    p.set_speed(-1);
    assert_eq!(walk(&mut p, 2), vec![3, 2]);

    let mut p = Playback::new(4, LoopBehavior::Once);
    p.set_speed(-1);
    assert_eq!(p.step(), 0);
    assert_eq!(p.speed(), 0);
}

#[test]
fn fewer_than_two_frames_never_move() {
    let mut p = Playback::new(1, LoopBehavior::Loop);
    assert_eq!(p.speed(), 0);
    p.set_speed(3);
    assert_eq!(p.speed(), 0);
    assert_eq!(p.step(), 0);
    assert!(Playback::new(0, LoopBehavior::Reverse).is_empty());
}

#[test]
fn pause_blocks_step_but_not_single_step() {
    let mut p = Playback::new(5, LoopBehavior::Loop);
    assert!(p.toggle_pause());
    assert_eq!(p.step(), 0);
    assert_eq!(p.step_once(), 1);
    assert_eq!(p.step(), 1);
    assert!(!p.toggle_pause());
    assert_eq!(p.step(), 2);
}

#[test]
fn large_speed_stays_in_range() {
    let mut p = Playback::new(3, LoopBehavior::Loop);
    p.set_speed(10);
    for _ in 0..10 {
        assert!(p.step() < 3);
    }
}

#[test]
fn behavior_parses_and_serializes_lowercase() {
    assert_eq!("once".parse::<LoopBehavior>().unwrap(), LoopBehavior::Once);
    assert_eq!(" Reverse ".parse::<LoopBehavior>().unwrap(), LoopBehavior::Reverse);
    assert!("sometimes".parse::<LoopBehavior>().is_err());
    assert_eq!(
        serde_json::to_string(&LoopBehavior::Loop).unwrap(),
        "\"loop\""
    );
    assert_eq!(LoopBehavior::default(), LoopBehavior::Loop);
}

#[test]
fn delay_rounds_up() {
    assert_eq!(Playback::delay_ms(Fps::new(30).unwrap()), 34);
    assert_eq!(Playback::delay_ms(Fps::new(1000).unwrap()), 1);
}
